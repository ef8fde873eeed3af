#[cfg(feature = "lambda")]
use crate::config::credentials::{EnvToken, DEFAULT_TOKEN_ENV};
#[cfg(feature = "lambda")]
use crate::core::client::DEFAULT_BASE_URL;
#[cfg(feature = "lambda")]
use crate::domain::ports::ConfigProvider;
#[cfg(feature = "lambda")]
use crate::utils::error::Result;
#[cfg(feature = "lambda")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "lambda")]
use std::env;

#[cfg(feature = "lambda")]
#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub base_url: String,
    pub token_env: String,
    pub timeout_seconds: Option<u64>,
}

#[cfg(feature = "lambda")]
impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        let config = Self {
            base_url: env::var("INFUSIONSOFT_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            token_env: env::var("INFUSIONSOFT_TOKEN_ENV")
                .unwrap_or_else(|_| DEFAULT_TOKEN_ENV.to_string()),
            timeout_seconds: env::var("INFUSIONSOFT_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok()),
        };
        config.validate()?;
        Ok(config)
    }

    /// The token is re-read per invocation so rotated secrets take effect on
    /// warm containers.
    pub fn token_source(&self) -> EnvToken {
        EnvToken::new(self.token_env.clone())
    }
}

#[cfg(feature = "lambda")]
impl ConfigProvider for LambdaConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }
}

#[cfg(feature = "lambda")]
impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_base_url("INFUSIONSOFT_BASE_URL", &self.base_url)?;
        validation::validate_non_empty_string("INFUSIONSOFT_TOKEN_ENV", &self.token_env)?;
        if let Some(timeout) = self.timeout_seconds {
            validation::validate_positive_number("INFUSIONSOFT_TIMEOUT_SECONDS", timeout, 1)?;
        }
        Ok(())
    }
}
