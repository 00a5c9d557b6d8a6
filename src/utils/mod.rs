use std::{
    fs,
    path::{Path, PathBuf},
    sync::Once,
};

use crate::errors::Result;

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("reimburse_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
    });
}

/// Creates the directory (and parents) when missing.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Resolves the on-disk locations used by storage and configuration.
pub struct PathResolver;

impl PathResolver {
    const APP_DIR: &'static str = "reimburse_core";

    /// Application base directory, overridable for tests and portable setups.
    pub fn resolve_base(root: Option<PathBuf>) -> PathBuf {
        root.unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(Self::APP_DIR)
        })
    }

    pub fn ledger_dir_in(base: &Path) -> PathBuf {
        base.join("ledgers")
    }

    pub fn backup_dir_in(base: &Path) -> PathBuf {
        base.join("backups")
    }

    pub fn state_file_in(base: &Path) -> PathBuf {
        base.join("state.json")
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        base.join("config.json")
    }
}
