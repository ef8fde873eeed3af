use crate::core::client::CrmClient;
use crate::core::options::PropKind;
use crate::domain::model::{
    CreateHookParams, CreateOrderItemParams, CreatePaymentParams, DeleteHookParams,
    GetCompanyParams, GetContactParams,
};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionsParams {
    pub prop: PropKind,
}

/// A named operation as a host sends it:
/// `{"operation": "getContact", "params": {"contactId": 42}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation", content = "params", rename_all = "camelCase")]
pub enum Operation {
    CreateHook(CreateHookParams),
    DeleteHook(DeleteHookParams),
    ListCompanies,
    GetCompany(GetCompanyParams),
    ListContacts,
    GetContact(GetContactParams),
    ListOrders,
    ListProducts,
    CreateOrderItem(CreateOrderItemParams),
    CreatePayment(CreatePaymentParams),
    Options(OptionsParams),
    PropDefinitions,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::CreateHook(_) => "createHook",
            Operation::DeleteHook(_) => "deleteHook",
            Operation::ListCompanies => "listCompanies",
            Operation::GetCompany(_) => "getCompany",
            Operation::ListContacts => "listContacts",
            Operation::GetContact(_) => "getContact",
            Operation::ListOrders => "listOrders",
            Operation::ListProducts => "listProducts",
            Operation::CreateOrderItem(_) => "createOrderItem",
            Operation::CreatePayment(_) => "createPayment",
            Operation::Options(_) => "options",
            Operation::PropDefinitions => "propDefinitions",
        }
    }

    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }
}

/// Runs one operation against the API and returns its result as JSON.
pub async fn execute(client: &CrmClient, operation: &Operation) -> Result<Value> {
    tracing::info!("Executing {}", operation.name());

    let result = match operation {
        Operation::CreateHook(params) => client.create_hook(params).await?.into_value()?,
        Operation::DeleteHook(params) => client.delete_hook(params).await?.into_value(),
        Operation::ListCompanies => serde_json::to_value(client.list_companies().await?)?,
        Operation::GetCompany(params) => client.get_company(*params).await?.into_value()?,
        Operation::ListContacts => serde_json::to_value(client.list_contacts().await?)?,
        Operation::GetContact(params) => client.get_contact(*params).await?.into_value()?,
        Operation::ListOrders => serde_json::to_value(client.list_orders().await?)?,
        Operation::ListProducts => serde_json::to_value(client.list_products().await?)?,
        Operation::CreateOrderItem(params) => client.create_order_item(params).await?.into_value(),
        Operation::CreatePayment(params) => client.create_payment(params).await?.into_value(),
        Operation::Options(params) => serde_json::to_value(params.prop.options(client).await?)?,
        Operation::PropDefinitions => serde_json::to_value(PropKind::definitions())?,
    };

    Ok(result)
}
