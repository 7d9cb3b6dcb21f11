use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub store: StoreSettings,
}

/// Connection settings for the backing document store.
#[derive(Debug, Deserialize, Clone)]
pub struct StoreSettings {
    #[serde(default = "default_store_uri")]
    pub uri: String,
    #[serde(default = "default_store_database")]
    pub database: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_store_uri() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_store_database() -> String {
    "shopbook".to_string()
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            uri: default_store_uri(),
            database: default_store_database(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
