use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use atomic_write_file::AtomicWriteFile;
use serde_json::Value;
use tracing::{info, warn};

use super::{OverrideError, RuleSet};

/// Durable storage for the rules document.
pub trait RulePersistence: Send + Sync {
    /// `Ok(None)` means nothing has been stored yet.
    fn load(&self) -> Result<Option<Value>, PersistenceError>;
    fn save(&self, rules: &RuleSet) -> Result<(), PersistenceError>;
}

/// Error enumeration for rule storage failures.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("rules file {path} unavailable: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("rules file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("rule storage unavailable: {0}")]
    Unavailable(String),
}

/// Pretty-printed JSON document on disk, replaced atomically on save.
#[derive(Debug, Clone)]
pub struct JsonFileRules {
    path: PathBuf,
}

impl JsonFileRules {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> PersistenceError {
        PersistenceError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl RulePersistence for JsonFileRules {
    fn load(&self) -> Result<Option<Value>, PersistenceError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(self.io_error(err)),
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| PersistenceError::Parse {
                path: self.path.clone(),
                source,
            })
    }

    fn save(&self, rules: &RuleSet) -> Result<(), PersistenceError> {
        let mut file = AtomicWriteFile::open(&self.path).map_err(|err| self.io_error(err))?;
        serde_json::to_writer_pretty(&mut file, rules).map_err(|source| {
            PersistenceError::Parse {
                path: self.path.clone(),
                source,
            }
        })?;
        file.write_all(b"\n").map_err(|err| self.io_error(err))?;
        file.commit().map_err(|err| self.io_error(err))
    }
}

impl<T> RulePersistence for Box<T>
where
    T: RulePersistence + ?Sized,
{
    fn load(&self) -> Result<Option<Value>, PersistenceError> {
        (**self).load()
    }

    fn save(&self, rules: &RuleSet) -> Result<(), PersistenceError> {
        (**self).save(rules)
    }
}

/// Keeps the last saved document in memory; used when file persistence is disabled.
#[derive(Debug, Default)]
pub struct MemoryRules {
    document: Mutex<Option<Value>>,
}

impl MemoryRules {
    pub fn with_document(document: Value) -> Self {
        Self {
            document: Mutex::new(Some(document)),
        }
    }

    pub fn document(&self) -> Option<Value> {
        self.document
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl RulePersistence for MemoryRules {
    fn load(&self) -> Result<Option<Value>, PersistenceError> {
        Ok(self.document())
    }

    fn save(&self, rules: &RuleSet) -> Result<(), PersistenceError> {
        let document = rules
            .to_document()
            .map_err(|err| PersistenceError::Unavailable(err.to_string()))?;
        *self
            .document
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(document);
        Ok(())
    }
}

/// Holder of the current rule snapshot.
///
/// Readers clone the `Arc` and keep evaluating against it; writers build a whole new
/// [`RuleSet`] and swap the pointer, so nobody observes a partially edited rule set.
pub struct RuleStore<P> {
    current: RwLock<Arc<RuleSet>>,
    persistence: P,
}

impl<P> RuleStore<P>
where
    P: RulePersistence,
{
    /// Loads the stored document, seeding storage with defaults when nothing is stored.
    pub fn open(persistence: P) -> Self {
        let rules = match persistence.load() {
            Ok(Some(document)) => {
                info!("business rules loaded from storage");
                RuleSet::load(Some(&document))
            }
            Ok(None) => {
                let rules = RuleSet::default();
                persist(&persistence, &rules);
                rules
            }
            Err(err) => {
                warn!(error = %err, "rule storage unreadable; using default business rules");
                RuleSet::default()
            }
        };

        Self {
            current: RwLock::new(Arc::new(rules)),
            persistence,
        }
    }

    pub fn snapshot(&self) -> Arc<RuleSet> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Swaps in `rules` wholesale and persists them best-effort.
    pub fn replace(&self, rules: RuleSet) -> Arc<RuleSet> {
        let rules = Arc::new(rules);
        {
            let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
            *current = Arc::clone(&rules);
        }
        persist(&self.persistence, &rules);
        rules
    }

    /// Merges `overrides` onto the current snapshot; the current rules stay in place on error.
    pub fn apply_overrides(&self, overrides: &Value) -> Result<Arc<RuleSet>, OverrideError> {
        let updated = self.snapshot().merged(overrides)?;
        Ok(self.replace(updated))
    }

    pub fn reset(&self) -> Arc<RuleSet> {
        self.replace(RuleSet::default())
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }
}

impl RuleStore<MemoryRules> {
    pub fn in_memory() -> Self {
        Self::open(MemoryRules::default())
    }
}

fn persist<P: RulePersistence>(persistence: &P, rules: &RuleSet) {
    match persistence.save(rules) {
        Ok(()) => info!("business rules saved"),
        Err(err) => warn!(error = %err, "failed to persist business rules; keeping them in memory"),
    }
}
