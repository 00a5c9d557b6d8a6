use std::path::{Path, PathBuf};

use crate::errors::{LedgerError, Result};
use crate::ledger::{Ledger, CURRENT_SCHEMA_VERSION};

/// Trait that abstracts interaction with the persistence layer.
pub trait StorageBackend: Send + Sync {
    fn load_named(&self, name: &str) -> Result<(Ledger, PathBuf)>;
    fn load_from_path(&self, path: &Path) -> Result<Ledger>;
    fn save_named(&self, ledger: &Ledger, name: &str) -> Result<PathBuf>;
    fn save_to_path(&self, ledger: &Ledger, path: &Path) -> Result<()>;
    fn ledger_path(&self, name: &str) -> PathBuf;
    fn last_ledger(&self) -> Result<Option<String>>;
    fn record_last_ledger(&self, name: Option<&str>) -> Result<()>;
    fn backup_named(&self, name: &str, note: Option<&str>) -> Result<PathBuf>;
    fn list_backups(&self, name: &str) -> Result<Vec<PathBuf>>;
}

/// Facade that coordinates ledger state, persistence, and backups.
pub struct LedgerManager {
    pub current: Option<Ledger>,
    current_name: Option<String>,
    storage: Box<dyn StorageBackend>,
}

impl LedgerManager {
    pub fn new(storage: Box<dyn StorageBackend>) -> Self {
        Self {
            current: None,
            current_name: None,
            storage,
        }
    }

    pub fn load(&mut self, name: &str) -> Result<()> {
        let (ledger, _path) = self.storage.load_named(name)?;
        ensure_schema_support(ledger.schema_version)?;
        self.current = Some(ledger);
        self.current_name = Some(name.to_string());
        self.storage.record_last_ledger(Some(name))?;
        Ok(())
    }

    /// Loads the most recently opened ledger, or creates a fresh one under
    /// the given name when nothing has been saved yet.
    pub fn load_last_or_create(&mut self, default_name: &str) -> Result<()> {
        match self.storage.last_ledger()? {
            Some(name) if self.storage.ledger_path(&name).exists() => self.load(&name),
            _ => {
                self.current = Some(Ledger::new(default_name));
                self.current_name = Some(default_name.to_string());
                Ok(())
            }
        }
    }

    pub fn save(&mut self) -> Result<PathBuf> {
        let name = self
            .current_name
            .clone()
            .ok_or_else(|| LedgerError::Persistence("current ledger is unnamed".into()))?;
        let ledger = self
            .current
            .as_ref()
            .ok_or_else(|| LedgerError::Persistence("no ledger loaded".into()))?;
        let path = self.storage.save_named(ledger, &name)?;
        self.storage.record_last_ledger(Some(&name))?;
        Ok(path)
    }

    pub fn save_as(&mut self, name: &str) -> Result<PathBuf> {
        self.current_name = Some(name.to_string());
        self.save()
    }

    pub fn backup(&self, note: Option<&str>) -> Result<PathBuf> {
        let name = self
            .current_name
            .as_deref()
            .ok_or_else(|| LedgerError::Persistence("current ledger is unnamed".into()))?;
        self.storage.backup_named(name, note)
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current_name.as_deref()
    }

    /// Borrows the loaded ledger mutably for a service call.
    pub fn current_mut(&mut self) -> Result<&mut Ledger> {
        self.current
            .as_mut()
            .ok_or_else(|| LedgerError::Persistence("no ledger loaded".into()))
    }

    pub fn current_ref(&self) -> Result<&Ledger> {
        self.current
            .as_ref()
            .ok_or_else(|| LedgerError::Persistence("no ledger loaded".into()))
    }

    pub fn set_current(&mut self, ledger: Ledger, name: Option<String>) {
        self.current = Some(ledger);
        self.current_name = name;
    }
}

fn ensure_schema_support(schema_version: u8) -> Result<()> {
    if schema_version > CURRENT_SCHEMA_VERSION {
        return Err(LedgerError::Persistence(format!(
            "ledger schema v{} is newer than supported v{}",
            schema_version, CURRENT_SCHEMA_VERSION
        )));
    }
    Ok(())
}
