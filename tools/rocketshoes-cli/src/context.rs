//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use rocketshoes_cache::Cache;
use rocketshoes_data::ApiClient;
use rocketshoes_observability::{LogLevel, LoggingConfig};
use rocketshoes_store::{CartStore, RecordingNotifier};

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

/// A loaded cart store plus the notices it has raised.
pub struct Session {
    pub store: CartStore,
    pub notices: Arc<RecordingNotifier>,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Logging settings, raised to debug by `--verbose`.
    pub fn logging(&self) -> LoggingConfig {
        let logging = self.config.logging.clone();
        if self.output.is_verbose() && logging.level > LogLevel::Debug {
            logging.with_level(LogLevel::Debug)
        } else {
            logging
        }
    }

    /// Path of the storage file.
    pub fn storage_path(&self) -> PathBuf {
        self.resolve_path(&self.config.storage.path)
    }

    /// Open the storage file and restore the cart from it.
    pub fn open_store(&self) -> Result<Session> {
        let path = self.storage_path();
        self.output.debug(&format!("Storage: {}", path.display()));
        let cache = Cache::open_file(&path)
            .with_context(|| format!("Failed to open storage: {}", path.display()))?;

        self.output.debug(&format!("API: {}", self.config.api.base_url));
        let api = Arc::new(
            ApiClient::from_config(&self.config.api).context("Failed to create API client")?,
        );

        let notices = Arc::new(RecordingNotifier::new());
        let store = CartStore::load(cache, api.clone(), api, self.config.store_config())
            .with_notifier(notices.clone());

        Ok(Session { store, notices })
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}

impl Session {
    /// Print the notices raised since the last call.
    pub fn flush_notices(&self, output: &Output) {
        for notice in self.notices.take() {
            output.notice(notice);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context_in(dir: &Path, config: CliConfig) -> Context {
        Context {
            config,
            config_path: None,
            output: Output::new(false, true),
            cwd: dir.to_path_buf(),
        }
    }

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("rocketshoes.toml"),
            "[storage]\nkey = \"walked\"\n",
        )
        .unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let (config, path) = Context::find_config(&nested).unwrap();
        assert_eq!(config.storage.key, "walked");
        assert_eq!(path, dir.path().join("rocketshoes.toml"));
    }

    #[test]
    fn test_storage_path_is_relative_to_cwd() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(dir.path(), CliConfig::default());
        assert_eq!(
            ctx.storage_path(),
            dir.path().join(".rocketshoes/storage.json")
        );
    }

    #[test]
    fn test_verbose_raises_log_level() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context_in(dir.path(), CliConfig::default());
        assert_eq!(ctx.logging().level, LogLevel::Info);

        ctx.output = Output::new(true, false);
        assert_eq!(ctx.logging().level, LogLevel::Debug);

        ctx.config.logging.level = LogLevel::Trace;
        assert_eq!(ctx.logging().level, LogLevel::Trace);
    }

    #[test]
    fn test_open_store_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(dir.path(), CliConfig::default());

        let session = ctx.open_store().unwrap();
        assert!(session.store.cart().is_empty());
        assert!(session.notices.notices().is_empty());
    }
}
