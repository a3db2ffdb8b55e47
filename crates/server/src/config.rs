use std::env;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("environment variable {0} must be set")]
    Missing(&'static str),
}

/// Runtime settings read from the environment
#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub oidc_issuer_url: String,
    pub bind_address: String,
}

impl Config {
    /// Load settings, reading a `.env` file first if one exists
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: required(database::db::DATABASE_URL_VAR)?,
            oidc_issuer_url: required("OIDC_ISSUER_URL")?,
            bind_address: env::var("BIND_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string()),
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::Missing(name))
}
