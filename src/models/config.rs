//! Configuration model loaded from external sources.

use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Page size used when neither the query nor the config names one.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

fn default_items_per_page() -> usize {
    DEFAULT_ITEMS_PER_PAGE
}

#[derive(Clone, Debug, Deserialize)]
/// Settings shared by the record source and the list services.
pub struct PortalConfig {
    /// Directory holding the JSON list responses of the API.
    pub data_dir: String,
    #[serde(default = "default_items_per_page")]
    pub items_per_page: usize,
}

impl PortalConfig {
    /// Loads `{dir}/default.yaml`, then the optional `{dir}/{app_env}.yaml`,
    /// then `APP_*` environment variables.
    pub fn load(config_dir: impl AsRef<Path>, app_env: &str) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let settings = Config::builder()
            .add_source(File::from(config_dir.join("default")))
            .add_source(File::from(config_dir.join(app_env)).required(false))
            .add_source(Environment::with_prefix("APP"))
            .build()?;

        let config = settings.try_deserialize::<PortalConfig>()?;
        if config.items_per_page == 0 {
            return Err(ConfigError::Message(
                "items_per_page must be greater than zero".to_string(),
            ));
        }
        Ok(config)
    }
}
