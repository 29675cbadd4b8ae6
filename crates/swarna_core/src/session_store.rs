//! Tab-scoped persistence of [`SessionState`] with a one-shot restore flag.
//!
//! The flag separates "coming back from a detail view" from "arriving anew":
//! only the former rehydrates the persisted session.
use std::collections::BTreeMap;

use swarna_logging::{swarna_debug, swarna_error, swarna_warn};
use thiserror::Error;

use crate::{pager, AlgorithmMode, IssuedSeqs, RequestSeq, SearchRecord, SessionState};

/// Storage key names, shared with anything that inspects the tab storage.
pub mod keys {
    pub const QUERY: &str = "query";
    pub const RESULTS: &str = "results";
    pub const HAS_SEARCHED: &str = "hasSearched";
    pub const ACTIVE_MODE: &str = "activeMode";
    pub const PAGE_INDEX: &str = "pageIndex";
    pub const RESTORE_FLAG: &str = "restoreFlag";
    pub const SEARCH_SEQ: &str = "searchSeq";
    pub const EVALUATION_SEQ: &str = "evaluationSeq";

    /// Keys that make up a saved session. The restore flag and the request
    /// counters are kept apart and survive a reset.
    pub const SESSION: [&str; 5] = [QUERY, RESULTS, HAS_SEARCHED, ACTIVE_MODE, PAGE_INDEX];
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode {key}: {message}")]
    Encode { key: String, message: String },
}

/// String key/value storage that lives as long as one tab.
pub trait TabStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;

    /// Writes several keys. Implementations that can should apply the batch
    /// all-or-nothing; the default writes in order and stops at the first error.
    fn set_many(&mut self, entries: Vec<(&str, String)>) -> Result<(), StorageError> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryTabStorage {
    entries: BTreeMap<String, String>,
}

impl MemoryTabStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TabStorage for MemoryTabStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[derive(Debug, Error)]
#[error("persisted {key} is corrupt: {detail}")]
struct CorruptField {
    key: &'static str,
    detail: String,
}

impl CorruptField {
    fn new(key: &'static str, detail: impl ToString) -> Self {
        Self {
            key,
            detail: detail.to_string(),
        }
    }
}

/// Reads and writes the session through an injected [`TabStorage`].
#[derive(Debug)]
pub struct SessionStore<S> {
    storage: S,
}

impl<S: TabStorage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Writes all five session fields as one batch. The query goes last, so a
    /// storage that fails halfway never pairs a new query with old results.
    pub fn save(&mut self, state: &SessionState) -> Result<(), StorageError> {
        let results =
            serde_json::to_string(&state.results).map_err(|err| StorageError::Encode {
                key: keys::RESULTS.to_string(),
                message: err.to_string(),
            })?;
        self.storage.set_many(vec![
            (keys::RESULTS, results),
            (keys::HAS_SEARCHED, state.has_searched.to_string()),
            (keys::ACTIVE_MODE, state.active_mode.as_str().to_string()),
            (keys::PAGE_INDEX, state.page_index.to_string()),
            (keys::QUERY, state.query.clone()),
        ])?;
        swarna_debug!(
            "Saved session query={:?} results={} page={}",
            state.query,
            state.results.len(),
            state.page_index
        );
        Ok(())
    }

    /// Request counters recorded by earlier mounts of this tab. Unreadable
    /// values count as zero.
    pub fn load_issued(&self) -> IssuedSeqs {
        IssuedSeqs {
            search: self.read_seq(keys::SEARCH_SEQ),
            evaluation: self.read_seq(keys::EVALUATION_SEQ),
        }
    }

    pub fn save_issued(&mut self, issued: IssuedSeqs) -> Result<(), StorageError> {
        self.storage.set_many(vec![
            (keys::SEARCH_SEQ, issued.search.to_string()),
            (keys::EVALUATION_SEQ, issued.evaluation.to_string()),
        ])
    }

    fn read_seq(&self, key: &'static str) -> RequestSeq {
        let Some(raw) = self.storage.get(key) else {
            return 0;
        };
        raw.trim().parse().unwrap_or_else(|err| {
            swarna_warn!("Ignoring unreadable {}: {}", key, err);
            0
        })
    }

    pub fn arm_restore(&mut self) -> Result<(), StorageError> {
        self.storage.set(keys::RESTORE_FLAG, "true".to_string())
    }

    /// Reads the restore flag and clears it in the same step.
    pub fn consume_restore_flag(&mut self) -> bool {
        let armed = self.storage.get(keys::RESTORE_FLAG).as_deref() == Some("true");
        if let Err(err) = self.storage.remove(keys::RESTORE_FLAG) {
            swarna_error!("Failed to clear restore flag: {}", err);
        }
        armed
    }

    /// Loads the persisted session. Corrupt data is discarded and an empty
    /// session is returned instead.
    pub fn load(&mut self) -> SessionState {
        match self.try_load() {
            Ok(state) => state,
            Err(err) => {
                swarna_warn!("Discarding persisted session: {}", err);
                if let Err(err) = self.clear() {
                    swarna_error!("Failed to clear corrupt session: {}", err);
                }
                SessionState::default()
            }
        }
    }

    /// Removes the five session keys; the restore flag is left alone.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        for key in keys::SESSION {
            self.storage.remove(key)?;
        }
        Ok(())
    }

    fn try_load(&self) -> Result<SessionState, CorruptField> {
        let query = self.storage.get(keys::QUERY).unwrap_or_default();

        let results: Vec<SearchRecord> = match self.storage.get(keys::RESULTS) {
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|err| CorruptField::new(keys::RESULTS, err))?,
            None => Vec::new(),
        };

        let has_searched = match self.storage.get(keys::HAS_SEARCHED).as_deref() {
            None => false,
            Some("true") => true,
            Some("false") => false,
            Some(other) => return Err(CorruptField::new(keys::HAS_SEARCHED, other)),
        };

        let active_mode = match self.storage.get(keys::ACTIVE_MODE) {
            Some(raw) => raw
                .parse::<AlgorithmMode>()
                .map_err(|err| CorruptField::new(keys::ACTIVE_MODE, err))?,
            None => AlgorithmMode::default(),
        };

        let page_index = match self.storage.get(keys::PAGE_INDEX) {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|err| CorruptField::new(keys::PAGE_INDEX, err))?,
            None => 0,
        };

        Ok(SessionState {
            page_index: pager::clamp_index(page_index, results.len()),
            query,
            active_mode,
            results,
            has_searched,
        })
    }
}
