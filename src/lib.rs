pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

#[cfg(feature = "lambda")]
pub use config::lambda::LambdaConfig;

pub use config::{ClientConfig, EnvToken, StaticToken};
pub use crate::core::client::{CrmClient, DEFAULT_BASE_URL};
pub use crate::core::operation::{execute, Operation};
pub use crate::core::options::{OptionsProvider, PropKind};
pub use domain::model::{Reply, ResponsePayload, SelectOption};
pub use utils::error::{CrmError, Result};
