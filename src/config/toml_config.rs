use crate::config::credentials::{EnvToken, StaticToken, DEFAULT_TOKEN_ENV};
use crate::core::client::DEFAULT_BASE_URL;
use crate::domain::ports::{ConfigProvider, TokenSource};
use crate::utils::error::{CrmError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    pub access_token: Option<String>,
    pub token_env: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: None,
            user_agent: None,
        }
    }
}

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid"))
}

impl ClientConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| CrmError::Config {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value. Unset variables are left
    /// in place and rejected by validation if they end up somewhere that matters.
    fn substitute_env_vars(content: &str) -> String {
        placeholder_regex()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// A literal token wins over the environment variable.
    pub fn token_source(&self) -> Box<dyn TokenSource> {
        match &self.auth.access_token {
            Some(token) => Box::new(StaticToken::new(token.clone())),
            None => Box::new(EnvToken::new(
                self.auth
                    .token_env
                    .clone()
                    .unwrap_or_else(|| DEFAULT_TOKEN_ENV.to_string()),
            )),
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_base_url("api.base_url", &self.api.base_url)?;

        if let Some(timeout) = self.api.timeout_seconds {
            validation::validate_positive_number("api.timeout_seconds", timeout, 1)?;
        }

        if let Some(token) = &self.auth.access_token {
            validation::validate_non_empty_string("auth.access_token", token)?;
            if let Some(caps) = placeholder_regex().captures(token) {
                return Err(CrmError::InvalidConfigValue {
                    field: "auth.access_token".to_string(),
                    value: caps[0].to_string(),
                    reason: format!("environment variable {} is not set", &caps[1]),
                });
            }
        }

        if let Some(var) = &self.auth.token_env {
            validation::validate_non_empty_string("auth.token_env", var)?;
        }

        Ok(())
    }
}

impl ConfigProvider for ClientConfig {
    fn base_url(&self) -> &str {
        &self.api.base_url
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.api.timeout_seconds
    }

    fn user_agent(&self) -> Option<&str> {
        self.api.user_agent.as_deref()
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ClientConfig::from_toml_str("").unwrap();

        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.timeout_seconds(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[api]
base_url = "https://sandbox.example.com/crm/rest/v1"
timeout_seconds = 15
user_agent = "workflow-host/2.1"

[auth]
access_token = "tok-123"
"#;

        let config = ClientConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.base_url(), "https://sandbox.example.com/crm/rest/v1");
        assert_eq!(config.timeout_seconds(), Some(15));
        assert_eq!(config.user_agent(), Some("workflow-host/2.1"));
        assert_eq!(config.token_source().access_token().unwrap(), "tok-123");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("INFUSIONSOFT_TEST_SUBST_TOKEN", "from-env");

        let toml_content = r#"
[auth]
access_token = "${INFUSIONSOFT_TEST_SUBST_TOKEN}"
"#;

        let config = ClientConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.auth.access_token.as_deref(), Some("from-env"));
        assert!(config.validate().is_ok());

        std::env::remove_var("INFUSIONSOFT_TEST_SUBST_TOKEN");
    }

    #[test]
    fn test_unresolved_token_placeholder_fails_validation() {
        let toml_content = r#"
[auth]
access_token = "${INFUSIONSOFT_TEST_NEVER_SET}"
"#;

        let config = ClientConfig::from_toml_str(toml_content).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("INFUSIONSOFT_TEST_NEVER_SET"));
    }

    #[test]
    fn test_token_env_fallback() {
        std::env::set_var("INFUSIONSOFT_TEST_CUSTOM_VAR", "custom");

        let toml_content = r#"
[auth]
token_env = "INFUSIONSOFT_TEST_CUSTOM_VAR"
"#;

        let config = ClientConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.token_source().access_token().unwrap(), "custom");

        std::env::remove_var("INFUSIONSOFT_TEST_CUSTOM_VAR");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[api]
base_url = "invalid-url"
"#;
        let config = ClientConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let toml_content = r#"
[api]
timeout_seconds = 0
"#;
        let config = ClientConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = ClientConfig::from_toml_str("[api\nbase_url =").unwrap_err();
        assert!(matches!(err, CrmError::Config { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[api]
base_url = "https://api.example.com/crm/rest/v1"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = ClientConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.api.base_url, "https://api.example.com/crm/rest/v1");
    }
}
