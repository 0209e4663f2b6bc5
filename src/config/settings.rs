use serde::Deserialize;
use std::env;
use tracing::warn;

use crate::error::{AccountError, Result};
use crate::provisioning::X509Credentials;

pub const ENV_CONNECTION_STRING: &str = "IOTHUB_CONNECTION_STRING";
pub const ENV_EVENTHUB_CONNECTION_STRING: &str = "IOTHUB_EVENTHUB_CONNECTION_STRING";
pub const ENV_X509_CERT: &str = "IOTHUB_E2E_X509_CERT";
pub const ENV_X509_PRIVATE_KEY: &str = "IOTHUB_E2E_X509_PRIVATE_KEY";
pub const ENV_X509_THUMBPRINT: &str = "IOTHUB_E2E_X509_THUMBPRINT";
pub const ENV_EVENTHUB_LISTEN_NAME: &str = "IOTHUB_EVENTHUB_LISTEN_NAME";
pub const ENV_EVENTHUB_CONSUMER_GROUP: &str = "IOTHUB_EVENTHUB_CONSUMER_GROUP";
pub const ENV_PARTITION_COUNT: &str = "IOTHUB_PARTITION_COUNT";

pub const DEFAULT_CONSUMER_GROUP: &str = "$Default";
pub const DEFAULT_PARTITION_COUNT: usize = 16;

/// ================================
/// Account settings
/// ================================
#[derive(Clone, Deserialize)]
pub struct AccountConfig {
    pub connection_string: String,
    pub eventhub_connection_string: String,
    pub x509_certificate: String,
    pub x509_private_key: String,
    pub x509_thumbprint: String,
    /// falls back to the hub name
    #[serde(default)]
    pub eventhub_listen_name: Option<String>,
    /// falls back to `$Default`
    #[serde(default)]
    pub eventhub_consumer_group: Option<String>,
    /// kept raw, unparsable values fall back to 16
    #[serde(default)]
    pub partition_count: Option<String>,
    #[serde(default)]
    pub logging: Option<LoggingConfig>,
}

impl AccountConfig {
    /// Read every setting from the process environment.
    pub fn from_env() -> Result<Self> {
        let config = Self {
            connection_string: required_env(ENV_CONNECTION_STRING)?,
            eventhub_connection_string: required_env(ENV_EVENTHUB_CONNECTION_STRING)?,
            x509_certificate: required_env(ENV_X509_CERT)?,
            x509_private_key: required_env(ENV_X509_PRIVATE_KEY)?,
            x509_thumbprint: required_env(ENV_X509_THUMBPRINT)?,
            eventhub_listen_name: env::var(ENV_EVENTHUB_LISTEN_NAME).ok(),
            eventhub_consumer_group: env::var(ENV_EVENTHUB_CONSUMER_GROUP).ok(),
            partition_count: env::var(ENV_PARTITION_COUNT).ok(),
            logging: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// Required settings must be present and non-empty.
    pub fn validate(&self) -> Result<()> {
        let required = [
            (ENV_CONNECTION_STRING, &self.connection_string),
            (ENV_EVENTHUB_CONNECTION_STRING, &self.eventhub_connection_string),
            (ENV_X509_CERT, &self.x509_certificate),
            (ENV_X509_PRIVATE_KEY, &self.x509_private_key),
            (ENV_X509_THUMBPRINT, &self.x509_thumbprint),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(AccountError::Configuration(format!("{name} is empty")));
            }
        }
        Ok(())
    }

    pub fn x509_credentials(&self) -> X509Credentials {
        X509Credentials {
            certificate: self.x509_certificate.clone(),
            private_key: self.x509_private_key.clone(),
            thumbprint: self.x509_thumbprint.clone(),
        }
    }

    pub fn consumer_group(&self) -> String {
        self.eventhub_consumer_group
            .clone()
            .unwrap_or_else(|| DEFAULT_CONSUMER_GROUP.to_owned())
    }

    pub fn partition_count(&self) -> usize {
        match self.partition_count.as_deref().map(str::trim) {
            None => DEFAULT_PARTITION_COUNT,
            Some(raw) => raw.parse::<usize>().unwrap_or_else(|e| {
                warn!(value = %raw, error = %e, "invalid partition count, using default");
                DEFAULT_PARTITION_COUNT
            }),
        }
    }
}

// secrets stay out of logs
impl std::fmt::Debug for AccountConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountConfig")
            .field("eventhub_listen_name", &self.eventhub_listen_name)
            .field("eventhub_consumer_group", &self.eventhub_consumer_group)
            .field("partition_count", &self.partition_count)
            .field("x509_thumbprint", &self.x509_thumbprint)
            .field("logging", &self.logging)
            .finish_non_exhaustive()
    }
}

fn required_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| {
        AccountError::Configuration(format!("failure retrieving {name} from the environment"))
    })
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String, // allowed: trace, debug, info, warn, error
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new(level: String, format: LogFormat) -> Self {
        Self { level, format }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new("info".to_owned(), LogFormat::from_env())
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
}

impl LogFormat {
    pub fn from_env() -> Self {
        match std::env::var("LOG_FORMAT")
            .unwrap_or_else(|_| "compact".to_string())
            .to_lowercase()
            .as_str()
        {
            "json" => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}
