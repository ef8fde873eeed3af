use crate::domain::model::{
    Company, Contact, CreateHookParams, CreateOrderItemParams, CreatePaymentParams,
    DeleteHookParams, GetCompanyParams, GetContactParams, Hook, Order, Product, Reply,
    ResponsePayload,
};
use crate::domain::ports::{ConfigProvider, TokenSource};
use crate::utils::error::{CrmError, Result};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.infusionsoft.com/crm/rest/v1";

/// Facade over the Infusionsoft REST API.
///
/// Every operation is a single call to [`CrmClient::request`] with a fixed
/// method and path. Failures are returned as-is: no retries, no pagination.
#[derive(Clone)]
pub struct CrmClient {
    base_url: String,
    tokens: Arc<dyn TokenSource>,
    http: Client,
}

impl CrmClient {
    pub fn new<T: TokenSource + 'static>(tokens: T) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            tokens: Arc::new(tokens),
            http: Client::new(),
        }
    }

    pub fn from_config<C, T>(config: &C, tokens: T) -> Result<Self>
    where
        C: ConfigProvider,
        T: TokenSource + 'static,
    {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_seconds() {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(agent) = config.user_agent() {
            builder = builder.user_agent(agent.to_string());
        }

        Ok(Self {
            base_url: config.base_url().to_string(),
            tokens: Arc::new(tokens),
            http: builder.build()?,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Base URL and path are concatenated verbatim.
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    pub fn auth_header(&self) -> Result<String> {
        Ok(format!("Bearer {}", self.tokens.access_token()?))
    }

    /// Generic request primitive. Returns the decoded JSON body, or the status
    /// code when the body is empty.
    pub async fn request<B>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<ResponsePayload>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(endpoint);
        tracing::debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method, &url)
            .header(AUTHORIZATION, self.auth_header()?);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CrmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(ResponsePayload::Status(status.as_u16()));
        }

        let value: Value = serde_json::from_slice(&bytes)?;
        Ok(ResponsePayload::Body(value))
    }

    async fn get(&self, endpoint: &str) -> Result<ResponsePayload> {
        self.request::<()>(Method::GET, endpoint, None).await
    }

    pub async fn create_hook(&self, params: &CreateHookParams) -> Result<Reply<Hook>> {
        let payload = self.request(Method::POST, "/hooks", Some(params)).await?;
        decode(payload)
    }

    /// Usually answered with an empty body, which yields the status code.
    pub async fn delete_hook(&self, params: &DeleteHookParams) -> Result<ResponsePayload> {
        let endpoint = format!("/hooks/{}", params.key);
        self.request::<()>(Method::DELETE, &endpoint, None).await
    }

    pub async fn list_companies(&self) -> Result<Vec<Company>> {
        unwrap_list(self.get("/companies").await?, "companies")
    }

    pub async fn get_company(&self, params: GetCompanyParams) -> Result<Reply<Company>> {
        decode(self.get(&format!("/companies/{}", params.company_id)).await?)
    }

    pub async fn list_contacts(&self) -> Result<Vec<Contact>> {
        unwrap_list(self.get("/contacts").await?, "contacts")
    }

    pub async fn get_contact(&self, params: GetContactParams) -> Result<Reply<Contact>> {
        decode(self.get(&format!("/contacts/{}", params.contact_id)).await?)
    }

    pub async fn list_orders(&self) -> Result<Vec<Order>> {
        unwrap_list(self.get("/orders").await?, "orders")
    }

    pub async fn list_products(&self) -> Result<Vec<Product>> {
        unwrap_list(self.get("/products").await?, "products")
    }

    pub async fn create_order_item(&self, params: &CreateOrderItemParams) -> Result<ResponsePayload> {
        let endpoint = format!("/orders/{}/items", params.order_id);
        self.request(Method::POST, &endpoint, Some(&params.data)).await
    }

    pub async fn create_payment(&self, params: &CreatePaymentParams) -> Result<ResponsePayload> {
        let endpoint = format!("/orders/{}/payments", params.order_id);
        self.request(Method::POST, &endpoint, Some(&params.data)).await
    }
}

fn decode<T: DeserializeOwned>(payload: ResponsePayload) -> Result<Reply<T>> {
    match payload {
        ResponsePayload::Body(value) => Ok(Reply::Record(serde_json::from_value(value)?)),
        ResponsePayload::Status(status) => Ok(Reply::Status(status)),
    }
}

/// List endpoints wrap their records: `{"companies": [...], "count": n, ...}`.
fn unwrap_list<T: DeserializeOwned>(payload: ResponsePayload, field: &str) -> Result<Vec<T>> {
    let missing = || CrmError::MissingField {
        field: field.to_string(),
    };

    match payload {
        ResponsePayload::Body(Value::Object(mut map)) => {
            let items = map.remove(field).ok_or_else(missing)?;
            Ok(serde_json::from_value(items)?)
        }
        ResponsePayload::Body(_) => Err(missing()),
        ResponsePayload::Status(status) => Err(CrmError::EmptyResponse { status }),
    }
}
