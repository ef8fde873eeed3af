use crate::config::toml_config::ClientConfig;
use crate::core::operation::{Operation, OptionsParams};
use crate::core::options::PropKind;
use crate::domain::model::{
    CreateHookParams, CreateOrderItemParams, CreatePaymentParams, DeleteHookParams,
    GetCompanyParams, GetContactParams,
};
use crate::utils::error::{CrmError, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "infusionsoft")]
#[command(about = "Call the Infusionsoft CRM REST API from the command line")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Path to a TOML config file")]
    pub config: Option<PathBuf>,

    #[arg(long, env = "INFUSIONSOFT_BASE_URL", global = true)]
    pub base_url: Option<String>,

    #[arg(long, env = "INFUSIONSOFT_ACCESS_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    #[arg(long, global = true)]
    pub timeout_seconds: Option<u64>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Csv,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Subscribe a URL to a REST hook event
    CreateHook {
        #[arg(long)]
        event_key: String,
        #[arg(long)]
        hook_url: String,
    },
    /// Remove a REST hook subscription
    DeleteHook {
        #[arg(long)]
        key: String,
    },
    ListCompanies,
    GetCompany {
        #[arg(long)]
        company_id: i64,
    },
    ListContacts,
    GetContact {
        #[arg(long)]
        contact_id: i64,
    },
    ListOrders,
    ListProducts,
    /// Add an item to an order; DATA is the JSON request body
    CreateOrderItem {
        #[arg(long)]
        order_id: i64,
        #[arg(long)]
        data: String,
    },
    /// Record a payment on an order; DATA is the JSON request body
    CreatePayment {
        #[arg(long)]
        order_id: i64,
        #[arg(long)]
        data: String,
    },
    /// Print the dropdown options for a property
    Options {
        #[arg(value_enum)]
        prop: PropKind,
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Describe the selectable properties a host can offer as dropdowns
    Props,
    /// Run an operation given as JSON, e.g. '{"operation":"listOrders"}'
    Invoke { operation: String },
}

impl Command {
    pub fn into_operation(self) -> Result<Operation> {
        let operation = match self {
            Command::CreateHook {
                event_key,
                hook_url,
            } => Operation::CreateHook(CreateHookParams {
                event_key,
                hook_url,
            }),
            Command::DeleteHook { key } => Operation::DeleteHook(DeleteHookParams { key }),
            Command::ListCompanies => Operation::ListCompanies,
            Command::GetCompany { company_id } => {
                Operation::GetCompany(GetCompanyParams { company_id })
            }
            Command::ListContacts => Operation::ListContacts,
            Command::GetContact { contact_id } => {
                Operation::GetContact(GetContactParams { contact_id })
            }
            Command::ListOrders => Operation::ListOrders,
            Command::ListProducts => Operation::ListProducts,
            Command::CreateOrderItem { order_id, data } => {
                Operation::CreateOrderItem(CreateOrderItemParams {
                    order_id,
                    data: serde_json::from_str(&data)?,
                })
            }
            Command::CreatePayment { order_id, data } => {
                Operation::CreatePayment(CreatePaymentParams {
                    order_id,
                    data: serde_json::from_str(&data)?,
                })
            }
            Command::Options { prop, .. } => Operation::Options(OptionsParams { prop }),
            Command::Props => Operation::PropDefinitions,
            Command::Invoke { operation } => Operation::from_json(&operation)?,
        };
        Ok(operation)
    }
}

impl CliConfig {
    /// File settings first, then flags and their environment variables on top.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.config {
            Some(path) => ClientConfig::from_file(path).map_err(|e| CrmError::Config {
                message: format!("failed to load {}: {}", path.display(), e),
            })?,
            None => ClientConfig::default(),
        };

        if let Some(base_url) = &self.base_url {
            config.api.base_url = base_url.clone();
        }
        if let Some(token) = &self.token {
            config.auth.access_token = Some(token.clone());
        }
        if let Some(timeout) = self.timeout_seconds {
            config.api.timeout_seconds = Some(timeout);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_get_contact() {
        let cli = CliConfig::try_parse_from([
            "infusionsoft",
            "--token",
            "abc",
            "get-contact",
            "--contact-id",
            "42",
        ])
        .unwrap();

        assert_eq!(cli.token.as_deref(), Some("abc"));
        assert_eq!(
            cli.command.into_operation().unwrap(),
            Operation::GetContact(GetContactParams { contact_id: 42 })
        );
    }

    #[test]
    fn test_parse_options_with_format() {
        let cli =
            CliConfig::try_parse_from(["infusionsoft", "options", "order", "--format", "csv"])
                .unwrap();

        match cli.command {
            Command::Options { prop, format } => {
                assert_eq!(prop, PropKind::Order);
                assert_eq!(format, OutputFormat::Csv);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_props() {
        let cli = CliConfig::try_parse_from(["infusionsoft", "props"]).unwrap();
        assert_eq!(cli.command.into_operation().unwrap(), Operation::PropDefinitions);
    }

    #[test]
    fn test_order_item_data_must_be_json() {
        let command = Command::CreateOrderItem {
            order_id: 1,
            data: "{not json".to_string(),
        };
        assert!(matches!(
            command.into_operation(),
            Err(CrmError::Serialization(_))
        ));

        let command = Command::CreateOrderItem {
            order_id: 1,
            data: r#"{"product_id": 4, "quantity": 2}"#.to_string(),
        };
        assert_eq!(
            command.into_operation().unwrap(),
            Operation::CreateOrderItem(CreateOrderItemParams {
                order_id: 1,
                data: json!({"product_id": 4, "quantity": 2}),
            })
        );
    }

    #[test]
    fn test_flags_override_file_defaults() {
        let cli = CliConfig::try_parse_from([
            "infusionsoft",
            "--base-url",
            "http://localhost:9000",
            "--timeout-seconds",
            "3",
            "list-orders",
        ])
        .unwrap();

        let config = cli.client_config().unwrap();
        assert_eq!(config.api.base_url, "http://localhost:9000");
        assert_eq!(config.api.timeout_seconds, Some(3));
    }
}
