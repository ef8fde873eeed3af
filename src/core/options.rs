use crate::core::client::CrmClient;
use crate::domain::model::{Company, Contact, Order, Product, SelectOption};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Produces dropdown entries for a selectable property.
#[async_trait]
pub trait OptionsProvider: Send + Sync {
    async fn options(&self, client: &CrmClient) -> Result<Vec<SelectOption>>;
}

/// Stands in for a missing total or price in a label.
const MISSING_AMOUNT: &str = "n/a";

fn amount(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING_AMOUNT.to_string(), |v| v.to_string())
}

pub fn company_option(company: &Company) -> SelectOption {
    SelectOption {
        label: company
            .company_name
            .clone()
            .unwrap_or_else(|| company.id.to_string()),
        value: company.id,
    }
}

pub fn contact_option(contact: &Contact) -> SelectOption {
    SelectOption {
        label: contact
            .given_name
            .clone()
            .unwrap_or_else(|| contact.id.to_string()),
        value: contact.id,
    }
}

pub fn order_option(order: &Order) -> SelectOption {
    SelectOption {
        label: format!(
            "{} items (total {}) by {} {}",
            order.order_items.len(),
            amount(order.total),
            order.contact.first_name.as_deref().unwrap_or_default(),
            order.contact.last_name.as_deref().unwrap_or_default(),
        ),
        value: order.id,
    }
}

pub fn product_option(product: &Product) -> SelectOption {
    SelectOption {
        label: format!(
            "{} ({})",
            product
                .product_name
                .clone()
                .unwrap_or_else(|| product.id.to_string()),
            amount(product.product_price)
        ),
        value: product.id,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CompanyOptions;

#[derive(Debug, Clone, Copy, Default)]
pub struct ContactOptions;

#[derive(Debug, Clone, Copy, Default)]
pub struct OrderOptions;

#[derive(Debug, Clone, Copy, Default)]
pub struct ProductOptions;

#[async_trait]
impl OptionsProvider for CompanyOptions {
    async fn options(&self, client: &CrmClient) -> Result<Vec<SelectOption>> {
        let companies = client.list_companies().await?;
        Ok(companies.iter().map(company_option).collect())
    }
}

#[async_trait]
impl OptionsProvider for ContactOptions {
    async fn options(&self, client: &CrmClient) -> Result<Vec<SelectOption>> {
        let contacts = client.list_contacts().await?;
        Ok(contacts.iter().map(contact_option).collect())
    }
}

#[async_trait]
impl OptionsProvider for OrderOptions {
    async fn options(&self, client: &CrmClient) -> Result<Vec<SelectOption>> {
        let orders = client.list_orders().await?;
        Ok(orders.iter().map(order_option).collect())
    }
}

#[async_trait]
impl OptionsProvider for ProductOptions {
    async fn options(&self, client: &CrmClient) -> Result<Vec<SelectOption>> {
        let products = client.list_products().await?;
        Ok(products.iter().map(product_option).collect())
    }
}

/// How a host describes a selectable property in its parameter form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropDefinition {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub value_type: &'static str,
    pub label: &'static str,
    pub description: String,
}

/// The selectable properties a host can render as a dropdown. All of them
/// take an integer id, and accept a custom id typed in by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "camelCase")]
pub enum PropKind {
    #[serde(alias = "companyId")]
    Company,
    #[serde(alias = "contactId")]
    Contact,
    #[serde(alias = "orderId")]
    Order,
    #[serde(alias = "productId")]
    Product,
}

impl PropKind {
    pub const ALL: [PropKind; 4] = [
        PropKind::Company,
        PropKind::Contact,
        PropKind::Order,
        PropKind::Product,
    ];

    /// Parameter name the host binds the selected value to.
    pub fn param_name(&self) -> &'static str {
        match self {
            PropKind::Company => "companyId",
            PropKind::Contact => "contactId",
            PropKind::Order => "orderId",
            PropKind::Product => "productId",
        }
    }

    pub fn value_type(&self) -> &'static str {
        "integer"
    }

    pub fn label(&self) -> &'static str {
        match self {
            PropKind::Company => "Company",
            PropKind::Contact => "Contact",
            PropKind::Order => "Order",
            PropKind::Product => "Product",
        }
    }

    pub fn description(&self) -> String {
        let article = match self {
            PropKind::Order => "an",
            _ => "a",
        };
        format!(
            "Select {} **{}** from the list. Alternatively, you can provide a custom *{} ID*.",
            article,
            self.label(),
            self.label()
        )
    }

    pub fn definition(&self) -> PropDefinition {
        PropDefinition {
            name: self.param_name(),
            value_type: self.value_type(),
            label: self.label(),
            description: self.description(),
        }
    }

    pub fn definitions() -> Vec<PropDefinition> {
        Self::ALL.iter().map(PropKind::definition).collect()
    }

    pub fn provider(&self) -> &'static dyn OptionsProvider {
        match self {
            PropKind::Company => &CompanyOptions,
            PropKind::Contact => &ContactOptions,
            PropKind::Order => &OrderOptions,
            PropKind::Product => &ProductOptions,
        }
    }

    pub async fn options(&self, client: &CrmClient) -> Result<Vec<SelectOption>> {
        self.provider().options(client).await
    }
}
