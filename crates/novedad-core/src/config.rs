//! Glide connection settings read from the process environment.

use std::collections::HashMap;
use std::env;
use std::fmt;
use std::time::Duration;

use thiserror::Error;

pub const ENV_TOKEN: &str = "GLIDE_TOKEN";
pub const ENV_APP: &str = "GLIDE_APP";
pub const ENV_TABLE: &str = "GLIDE_TABLE";
pub const ENV_API_URL: &str = "GLIDE_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "GLIDE_TIMEOUT_SECS";

pub const DEFAULT_API_URL: &str = "https://api.glideapp.io/api/function";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Credentials and identifiers for one Glide table.
#[derive(Clone, PartialEq, Eq)]
pub struct GlideConfig {
    /// API access token (secret)
    pub token: String,
    /// Glide application id
    pub app_id: String,
    /// Table identifier, e.g. `native-table-…`
    pub table_name: String,
    /// Base URL of the Glide function API, without trailing slash
    pub api_url: String,
    /// Per-request timeout; none by default
    pub timeout: Option<Duration>,
}

impl fmt::Debug for GlideConfig {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("GlideConfig")
            .field("token", &"[REDACTED]")
            .field("app_id", &self.app_id)
            .field("table_name", &self.table_name)
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GlideConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let values: HashMap<String, String> = env::vars().collect();
        Self::from_lookup(|name| values.get(name).cloned())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token = optional_trimmed(&lookup, ENV_TOKEN);
        let app_id = optional_trimmed(&lookup, ENV_APP);
        let table_name = optional_trimmed(&lookup, ENV_TABLE);

        let missing: Vec<&'static str> = [
            (ENV_TOKEN, token.is_none()),
            (ENV_APP, app_id.is_none()),
            (ENV_TABLE, table_name.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();

        let (Some(token), Some(app_id), Some(table_name)) = (token, app_id, table_name) else {
            return Err(ConfigError::Missing(missing));
        };

        let api_url = optional_trimmed(&lookup, ENV_API_URL)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "{ENV_API_URL} must start with http:// or https://"
            )));
        }

        Ok(Self {
            token,
            app_id,
            table_name,
            api_url: api_url.trim_end_matches('/').to_string(),
            timeout: parse_timeout(optional_trimmed(&lookup, ENV_TIMEOUT_SECS))?,
        })
    }
}

fn optional_trimmed(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name).and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

fn parse_timeout(raw: Option<String>) -> Result<Option<Duration>, ConfigError> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    match raw.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Some(Duration::from_secs(secs))),
        _ => Err(ConfigError::Invalid(format!(
            "{ENV_TIMEOUT_SECS} must be a positive number of seconds, got '{raw}'"
        ))),
    }
}
