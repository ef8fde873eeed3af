#[cfg(feature = "cli")]
pub mod cli;
pub mod credentials;
pub mod lambda;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command, OutputFormat};
pub use credentials::{EnvToken, StaticToken};
pub use toml_config::ClientConfig;
