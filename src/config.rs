use worker::Env;

use crate::error::ConfigError;

// Environment variable names
pub const ENV_ZONE_ID: &str = "ZONE_ID";
pub const ENV_AUTH_KEY: &str = "AUTH_KEY";
pub const ENV_AUTH_EMAIL: &str = "AUTH_EMAIL";
pub const ENV_DOMAIN_NAME: &str = "DOMAIN_NAME";

/// Application configuration extracted from environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Cloudflare zone ID where DNS records are created
    pub zone_id: String,
    /// Cloudflare global API key, sent as `X-Auth-Key`
    pub auth_key: String,
    /// Account email paired with the API key, sent as `X-Auth-Email`
    pub auth_email: String,
    /// Public domain name that new records live under
    pub domain_name: String,
}

impl Config {
    /// Extract configuration from Worker vars and secrets
    pub fn from_env(env: &Env) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| {
            env.secret(key)
                .map(|s| s.to_string())
                .or_else(|_| env.var(key).map(|v| v.to_string()))
                .ok()
        })
    }

    /// Builds the configuration from any key lookup, reporting every missing or blank key
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut read = |key: &'static str| match lookup(key) {
            Some(value) if !value.trim().is_empty() => value,
            _ => {
                missing.push(key);
                String::new()
            }
        };

        let config = Self {
            zone_id: read(ENV_ZONE_ID),
            auth_key: read(ENV_AUTH_KEY),
            auth_email: read(ENV_AUTH_EMAIL),
            domain_name: read(ENV_DOMAIN_NAME),
        };

        if missing.is_empty() {
            Ok(config)
        } else {
            Err(ConfigError::Missing(missing))
        }
    }
}
