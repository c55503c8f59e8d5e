use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Database used when `MONGODB_DATABASE` is not set.
pub const DEFAULT_DATABASE: &str = "testdb";

#[derive(Debug, Clone, Deserialize)]
pub struct PeopleConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub http: HttpConfig,
    pub mongodb: MongoConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HttpConfig {
    /// Render client errors as 400/404 instead of a uniform 500.
    #[serde(default)]
    pub strict_errors: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

impl PeopleConfig {
    pub fn load() -> Result<Self, AppError> {
        // Common settings and the HTTP section share the APP__ layered source.
        let layered = core_config::layered()?;
        let common: core_config::Config = layered.clone().try_deserialize()?;
        let http: HttpConfig = layered.try_deserialize()?;

        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(PeopleConfig {
            common,
            http,
            mongodb: MongoConfig::resolve(|key| env::var(key).ok(), is_prod)?,
        })
    }
}

impl MongoConfig {
    /// `MONGODB_URI` wins; the legacy `URI` variable is accepted when it is
    /// unset. Empty values count as unset.
    pub fn resolve(
        lookup: impl Fn(&str) -> Option<String>,
        is_prod: bool,
    ) -> Result<Self, AppError> {
        let uri = get_env(&lookup, "MONGODB_URI", None, is_prod)
            .or_else(|e| get_env(&lookup, "URI", None, is_prod).map_err(|_| e))?;
        let database = get_env(&lookup, "MONGODB_DATABASE", Some(DEFAULT_DATABASE), is_prod)?;

        Ok(MongoConfig { uri, database })
    }
}

fn get_env(
    lookup: impl Fn(&str) -> Option<String>,
    key: &str,
    default: Option<&str>,
    is_prod: bool,
) -> Result<String, AppError> {
    match lookup(key) {
        Some(val) if !val.is_empty() => Ok(val),
        _ => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
