//! CLI configuration.

use anyhow::{Context, Result};
use rocketshoes_commerce::Currency;
use rocketshoes_data::ApiConfig;
use rocketshoes_observability::LoggingConfig;
use rocketshoes_store::{AddStockRule, StoreConfig, DEFAULT_STORAGE_KEY};
use serde::{Deserialize, Serialize};

/// File names searched for, in order, from the working directory upward.
pub const CONFIG_FILE_NAMES: &[&str] = &["rocketshoes.toml", ".rocketshoes.toml", "rocketshoes.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Storefront API.
    #[serde(default)]
    pub api: ApiConfig,

    /// Where the cart is persisted.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Cart behavior.
    #[serde(default)]
    pub cart: CartConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Settings for the cart store.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::default()
            .with_storage_key(self.storage.key.clone())
            .with_add_stock_rule(self.cart.add_stock_rule)
            .with_currency(self.cart.currency)
    }
}

/// Storage configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON file holding the store, relative to the working directory.
    #[serde(default = "default_storage_path")]
    pub path: String,

    /// Key the cart is stored under.
    #[serde(default = "default_storage_key")]
    pub key: String,
}

fn default_storage_path() -> String {
    ".rocketshoes/storage.json".to_string()
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
            key: default_storage_key(),
        }
    }
}

/// Cart configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Stock rule for `add`.
    #[serde(default)]
    pub add_stock_rule: AddStockRule,

    /// Currency catalog prices are quoted in.
    #[serde(default)]
    pub currency: Currency,
}

/// Generate a default rocketshoes.toml config file.
pub fn generate_default_config(base_url: &str) -> String {
    format!(
        r#"# RocketShoes cart configuration

[api]
base_url = "{base_url}"
# timeout_ms = 2000
max_retries = 0

[storage]
path = ".rocketshoes/storage.json"
key = "{key}"

[cart]
# "strict" or "at_least_next_amount"
add_stock_rule = "strict"
currency = "BRL"

[logging]
level = "info"
format = "human"
"#,
        base_url = base_url,
        key = DEFAULT_STORAGE_KEY,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rocketshoes_data::DEFAULT_BASE_URL;
    use rocketshoes_observability::{LogFormat, LogLevel};

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.storage.key, "@RocketShoes:cart");
        assert_eq!(config.cart.add_stock_rule, AddStockRule::Strict);
    }

    #[test]
    fn test_generated_config_parses() {
        let config: CliConfig =
            toml::from_str(&generate_default_config("http://shop.test:3333")).unwrap();
        assert_eq!(config.api.base_url, "http://shop.test:3333");
        assert_eq!(config.api.timeout_ms, None);
        assert_eq!(config.storage, StorageConfig::default());
        assert_eq!(config.logging.level, LogLevel::Info);
        assert_eq!(config.logging.format, LogFormat::Human);
    }

    #[test]
    fn test_partial_sections() {
        let config: CliConfig = toml::from_str(
            r#"
            [cart]
            add_stock_rule = "at_least_next_amount"

            [logging]
            format = "json"
            "#,
        )
        .unwrap();

        let store = config.store_config();
        assert_eq!(store.add_stock_rule, AddStockRule::AtLeastNextAmount);
        assert_eq!(store.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn test_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rocketshoes.json");
        std::fs::write(
            &path,
            r#"{"api": {"base_url": "http://api.test"}, "storage": {"key": "cart"}}"#,
        )
        .unwrap();

        let config = CliConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.api.base_url, "http://api.test");
        assert_eq!(config.store_config().storage_key, "cart");
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rocketshoes.toml");
        std::fs::write(&path, "[cart]\nadd_stock_rule = \"sometimes\"\n").unwrap();

        let err = CliConfig::load(path.to_str().unwrap()).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse TOML config"));
    }

    #[test]
    fn test_load_rejects_zero_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rocketshoes.toml");
        std::fs::write(&path, "[api]\ntimeout_ms = 0\n").unwrap();

        let err = CliConfig::load(path.to_str().unwrap()).unwrap_err();
        assert!(format!("{err:#}").contains("timeout_ms must be greater than zero"));
    }
}
