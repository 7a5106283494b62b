use kindred::KindredError;
use kindred::config::{ConfigLoader, KindredConfig, LogLevel, LoggingConfig};
use kindred::logging::Console;
use kindred::store::InMemoryStore;
use std::path::{Path, PathBuf};

/// Environment variable naming the store snapshot when --store is not given
pub const STORE_ENV_VAR: &str = "KINDRED_STORE";

pub struct KindredCliContext {
    pub config: KindredConfig,
    store: Option<InMemoryStore>,
    store_path: Option<PathBuf>,
}

impl KindredCliContext {
    /// Load configuration and, when a snapshot path is known, the document store
    pub fn new(store_path: Option<PathBuf>, config_path: Option<&Path>) -> kindred::Result<Self> {
        let config = load_config(config_path)?;
        Self::load(config, store_path)
    }

    /// Load the document store for an already loaded configuration
    pub fn load(config: KindredConfig, store_path: Option<PathBuf>) -> kindred::Result<Self> {
        let store_path = store_path.or_else(|| std::env::var_os(STORE_ENV_VAR).map(PathBuf::from));
        let store = match &store_path {
            Some(path) => {
                let store = InMemoryStore::load_path(path).map_err(|e| {
                    KindredError::Store(format!("{}: {}", path.display(), e))
                })?;
                tracing::debug!(path = %path.display(), documents = store.len(), "Loaded store");
                Some(store)
            }
            None => None,
        };

        Ok(Self {
            config,
            store,
            store_path,
        })
    }

    /// Build a context around an already loaded store
    pub fn with_store(config: KindredConfig, store: InMemoryStore) -> Self {
        Self {
            config,
            store: Some(store),
            store_path: None,
        }
    }

    pub fn store(&self) -> kindred::Result<&InMemoryStore> {
        self.store.as_ref().ok_or_else(|| {
            KindredError::Other(format!(
                "No document store given. Pass --store <FILE> or set {}",
                STORE_ENV_VAR
            ))
        })
    }

    pub fn store_path(&self) -> Option<&Path> {
        self.store_path.as_deref()
    }
}

/// Layer the default config files, an explicit file and the environment
pub fn load_config(config_path: Option<&Path>) -> kindred::Result<KindredConfig> {
    let mut loader = ConfigLoader::new();
    loader.load_default_files();
    if let Some(path) = config_path {
        loader.load_file(path)?;
    }
    loader.load_env();
    Ok(loader.extract()?)
}

/// Apply the command-line verbosity flags to the configured logging
pub fn cli_logging_config(base: &LoggingConfig, quiet: bool, verbose: bool) -> LoggingConfig {
    let mut config = base.clone();
    if quiet {
        config.level = LogLevel::Error;
    } else if verbose {
        config.level = LogLevel::Debug;
    }
    config
}

/// Install the global subscriber, keeping stdout free for command output
pub fn init_cli_logging(config: &LoggingConfig, quiet: bool, verbose: bool) -> kindred::Result<()> {
    let config = cli_logging_config(config, quiet, verbose);
    kindred::logging::init_with_console(&config, Console::Stderr)?;
    Ok(())
}
