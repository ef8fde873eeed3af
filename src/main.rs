use anyhow::Context;
use clap::Parser;
use infusionsoft_client::config::{Command, OutputFormat};
use infusionsoft_client::utils::{logger, validation::Validate};
use infusionsoft_client::{execute, CliConfig, CrmClient, SelectOption};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);
    tracing::debug!("CLI command: {:?}", cli.command);

    let config = cli.client_config()?;
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let client = CrmClient::from_config(&config, config.token_source())?;
    tracing::debug!("Using API base URL {}", client.base_url());

    // CSV 只適用於下拉選項
    if let Command::Options {
        prop,
        format: OutputFormat::Csv,
    } = &cli.command
    {
        let options = prop.options(&client).await?;
        write_csv(&options)?;
        return Ok(());
    }

    let operation = cli.command.clone().into_operation()?;
    match execute(&client, &operation).await {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Err(e) => {
            tracing::error!("❌ {} failed: {}", operation.name(), e);
            eprintln!("❌ {}", e);
            std::process::exit(2);
        }
    }

    Ok(())
}

fn write_csv(options: &[SelectOption]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(std::io::stdout());
    for option in options {
        writer
            .serialize(option)
            .context("failed to write option row")?;
    }
    writer.flush()?;
    Ok(())
}
