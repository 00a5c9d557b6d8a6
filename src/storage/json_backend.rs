use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    core::StorageBackend,
    errors::{LedgerError, Result},
    ledger::Ledger,
    utils::{ensure_dir, PathResolver},
};

const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const DEFAULT_RETENTION: usize = 5;

/// JSON-file persistence under a resolved application directory.
///
/// Every write stages to a temporary sibling and renames into place, so a
/// reader can never observe a half-written ledger.
#[derive(Clone)]
pub struct JsonStorage {
    ledgers_dir: PathBuf,
    backups_dir: PathBuf,
    state_file: PathBuf,
    retention: usize,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>, retention: Option<usize>) -> Result<Self> {
        let base = PathResolver::resolve_base(root);
        ensure_dir(&base)?;
        let ledgers_dir = PathResolver::ledger_dir_in(&base);
        let backups_dir = PathResolver::backup_dir_in(&base);
        ensure_dir(&ledgers_dir)?;
        ensure_dir(&backups_dir)?;
        Ok(Self {
            ledgers_dir,
            backups_dir,
            state_file: PathResolver::state_file_in(&base),
            retention: retention.unwrap_or(DEFAULT_RETENTION).max(1),
        })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None, None)
    }

    fn backup_dir(&self, name: &str) -> PathBuf {
        self.backups_dir.join(canonical_name(name))
    }

    fn read_state(&self) -> Result<StoreState> {
        if self.state_file.exists() {
            let data = fs::read_to_string(&self.state_file)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(StoreState::default())
        }
    }

    fn prune_backups(&self, name: &str) -> Result<()> {
        let mut backups = self.list_backups(name)?;
        while backups.len() > self.retention {
            // list_backups returns newest first.
            if let Some(oldest) = backups.pop() {
                fs::remove_file(oldest)?;
            }
        }
        Ok(())
    }
}

impl StorageBackend for JsonStorage {
    fn load_named(&self, name: &str) -> Result<(Ledger, PathBuf)> {
        let path = self.ledger_path(name);
        if !path.exists() {
            return Err(LedgerError::Persistence(format!(
                "ledger `{}` not found at {}",
                name,
                path.display()
            )));
        }
        let ledger = load_ledger_from_path(&path)?;
        Ok((ledger, path))
    }

    fn load_from_path(&self, path: &Path) -> Result<Ledger> {
        load_ledger_from_path(path)
    }

    fn save_named(&self, ledger: &Ledger, name: &str) -> Result<PathBuf> {
        let path = self.ledger_path(name);
        save_ledger_to_path(ledger, &path)?;
        Ok(path)
    }

    fn save_to_path(&self, ledger: &Ledger, path: &Path) -> Result<()> {
        save_ledger_to_path(ledger, path)
    }

    fn ledger_path(&self, name: &str) -> PathBuf {
        self.ledgers_dir
            .join(format!("{}.json", canonical_name(name)))
    }

    fn last_ledger(&self) -> Result<Option<String>> {
        Ok(self.read_state()?.last_ledger)
    }

    fn record_last_ledger(&self, name: Option<&str>) -> Result<()> {
        let mut state = self.read_state()?;
        state.last_ledger = name.map(canonical_name);
        let data = serde_json::to_string_pretty(&state)?;
        write_atomic(&self.state_file, &data)
    }

    fn backup_named(&self, name: &str, note: Option<&str>) -> Result<PathBuf> {
        let (ledger, _path) = self.load_named(name)?;
        let dir = self.backup_dir(name);
        ensure_dir(&dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT);
        let mut file_name = format!("{}_{}", canonical_name(name), timestamp);
        if let Some(label) = sanitize_note(note) {
            file_name.push('_');
            file_name.push_str(&label);
        }
        file_name.push_str(".json");
        let path = dir.join(file_name);
        save_ledger_to_path(&ledger, &path)?;
        self.prune_backups(name)?;
        Ok(path)
    }

    fn list_backups(&self, name: &str) -> Result<Vec<PathBuf>> {
        let dir = self.backup_dir(name);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
                entries.push(path);
            }
        }
        // Timestamped names sort chronologically; newest first.
        entries.sort();
        entries.reverse();
        Ok(entries)
    }
}

/// Writes the provided ledger to disk atomically by staging to a temporary file.
pub fn save_ledger_to_path(ledger: &Ledger, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let json = serde_json::to_string_pretty(ledger)?;
    write_atomic(path, &json)
}

/// Loads a ledger snapshot from disk, returning structured errors on failure.
pub fn load_ledger_from_path(path: &Path) -> Result<Ledger> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let tmp = tmp_path(path);
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.tmp"),
        None => String::from("tmp"),
    };
    tmp.set_extension(ext);
    tmp
}

fn canonical_name(name: &str) -> String {
    name.trim()
        .to_ascii_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

fn sanitize_note(note: Option<&str>) -> Option<String> {
    let note = note?.trim();
    if note.is_empty() {
        return None;
    }
    Some(
        note.to_ascii_lowercase()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
            .collect(),
    )
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreState {
    #[serde(default)]
    last_ledger: Option<String>,
}
