#[cfg(feature = "lambda")]
use infusionsoft_client::{execute, CrmClient, LambdaConfig, Operation};
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use serde::Serialize;

#[cfg(feature = "lambda")]
#[derive(Serialize)]
pub struct Response {
    pub operation: String,
    pub result: serde_json::Value,
}

#[cfg(feature = "lambda")]
async fn function_handler(
    client: &CrmClient,
    event: LambdaEvent<Operation>,
) -> Result<Response, Error> {
    let operation = event.payload;
    tracing::info!(
        request_id = %event.context.request_id,
        "Handling {}",
        operation.name()
    );

    let result = execute(client, &operation).await.map_err(|e| {
        tracing::error!("{} failed: {}", operation.name(), e);
        Box::new(e) as Box<dyn std::error::Error + Send + Sync>
    })?;

    Ok(Response {
        operation: operation.name().to_string(),
        result,
    })
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    infusionsoft_client::utils::logger::init_lambda_logger();

    let config = LambdaConfig::from_env()?;
    let client = CrmClient::from_config(&config, config.token_source())?;
    let client = &client;

    run(service_fn(move |event: LambdaEvent<Operation>| async move {
        function_handler(client, event).await
    }))
    .await
}
