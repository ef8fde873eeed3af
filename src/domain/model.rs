use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Fields the client does not model are kept as-is.
pub type Extra = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    #[serde(default)]
    pub given_name: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OrderContact {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub contact: OrderContact,
    #[serde(default, deserialize_with = "null_as_default")]
    pub order_items: Vec<Value>,
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub product_price: Option<f64>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hook {
    #[serde(deserialize_with = "string_or_number")]
    pub key: String,
    #[serde(default)]
    pub event_key: Option<String>,
    #[serde(default)]
    pub hook_url: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

// hook keys come back as strings from some accounts and integers from others
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number for hook key, got {}",
            other
        ))),
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHookParams {
    pub event_key: String,
    pub hook_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteHookParams {
    pub key: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCompanyParams {
    pub company_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetContactParams {
    pub contact_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderItemParams {
    pub order_id: i64,
    pub data: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentParams {
    pub order_id: i64,
    pub data: Value,
}

/// A `{label, value}` pair shown in a selection dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: i64,
}

/// What a successful call produced: the decoded body, or the status code when
/// the body was empty.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponsePayload {
    Body(Value),
    Status(u16),
}

/// Result of an operation that decodes its body into a record. Like
/// [`ResponsePayload`], an empty body yields the status code instead.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<T> {
    Record(T),
    Status(u16),
}

impl<T> Reply<T> {
    pub fn into_record(self) -> Option<T> {
        match self {
            Reply::Record(record) => Some(record),
            Reply::Status(_) => None,
        }
    }
}

impl<T: Serialize> Reply<T> {
    pub fn into_value(self) -> serde_json::Result<Value> {
        match self {
            Reply::Record(record) => serde_json::to_value(record),
            Reply::Status(status) => Ok(Value::from(status)),
        }
    }
}

impl ResponsePayload {
    pub fn into_value(self) -> Value {
        match self {
            ResponsePayload::Body(value) => value,
            ResponsePayload::Status(status) => Value::from(status),
        }
    }
}
