use std::{fs, path::Path};

use regex::{Captures, Regex};
use tracing::{debug, error};

use crate::config::settings::AccountConfig;
use crate::error::{AccountError, Result};

/// Load and validate config from YAML file
///
/// `${VAR}` and `${VAR:default}` references are expanded from the environment
/// before parsing.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AccountConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        AccountError::Configuration(format!("cannot read config '{}': {e}", path.display()))
    })?;
    debug!(path = %path.display(), "loading account config");
    parse_config(&expand_env_vars(&content))
}

pub fn parse_config(content: &str) -> Result<AccountConfig> {
    let config: AccountConfig = serde_yaml::from_str(content)
        .inspect_err(|e| error!("parse config error: {}", e))
        .map_err(|e| AccountError::Configuration(format!("invalid config format: {e}")))?;
    config.validate()?;
    Ok(config)
}

pub fn expand_env_vars(input: &str) -> String {
    let re = Regex::new(r"\$\{(\w+)(?::([^\}]*))?\}").expect("static pattern");
    re.replace_all(input, |caps: &Captures| {
        let var = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        std::env::var(var).unwrap_or_else(|_| default.to_string())
    })
    .to_string()
}
