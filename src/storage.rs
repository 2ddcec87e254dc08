use crate::model::{DayMarks, RosterState, Schedule};
use anyhow::Context;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

pub const SCHEDULE_KEY: &str = "monthly_roster";
pub const HOLIDAYS_KEY: &str = "shift_holidays";
pub const CLOSED_KEY: &str = "shift_closed";

/// Stockage clé → chaîne fourni par l'hôte.
pub trait KeyValueStore {
    /// `Ok(None)` si la clé n'existe pas.
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()>;
    /// Supprimer une clé absente n'est pas une erreur.
    fn remove(&mut self, key: &str) -> anyhow::Result<()>;
}

/// Un fichier `<clé>.json` par clé, écrit de manière atomique.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn open<P: AsRef<Path>>(dir: P) -> anyhow::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).with_context(|| format!("reading {}", path.display())),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        let path = self.path_for(key);
        let mut tmp = NamedTempFile::new_in(&self.dir).with_context(|| "creating temp file")?;
        tmp.write_all(value.as_bytes())?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).with_context(|| "atomic rename")?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> anyhow::Result<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).with_context(|| format!("removing {}", path.display())),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> anyhow::Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Charge et sauvegarde le planning, les jours fériés et les jours fermés.
///
/// Une valeur illisible est remplacée par une valeur vide : on repart de zéro
/// plutôt que d'échouer.
#[derive(Debug, Clone)]
pub struct RosterStore<S> {
    store: S,
}

impl<S: KeyValueStore> RosterStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    pub fn load(&self) -> anyhow::Result<RosterState> {
        let schedule: Schedule = self.load_value(SCHEDULE_KEY)?;
        let holidays: Vec<NaiveDate> = self.load_value(HOLIDAYS_KEY)?;
        let closed: Vec<NaiveDate> = self.load_value(CLOSED_KEY)?;
        debug!(
            days = schedule.len(),
            holidays = holidays.len(),
            closed = closed.len(),
            "roster state loaded"
        );
        Ok(RosterState {
            schedule,
            marks: DayMarks::from_sets(holidays, closed),
        })
    }

    pub fn save(&mut self, state: &RosterState) -> anyhow::Result<()> {
        let schedule = serde_json::to_string(&state.schedule)?;
        let holidays = serde_json::to_string(state.marks.holidays())?;
        let closed = serde_json::to_string(state.marks.closed())?;
        self.store.set(SCHEDULE_KEY, &schedule)?;
        self.store.set(HOLIDAYS_KEY, &holidays)?;
        self.store.set(CLOSED_KEY, &closed)?;
        Ok(())
    }

    /// Efface le planning persisté ; les marques de jours sont conservées.
    pub fn reset_schedule(&mut self) -> anyhow::Result<()> {
        self.store.remove(SCHEDULE_KEY)
    }

    fn load_value<T: DeserializeOwned + Default>(&self, key: &str) -> anyhow::Result<T> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(T::default());
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(err) => {
                warn!(key, %err, "malformed stored value, starting empty");
                Ok(T::default())
            }
        }
    }
}
