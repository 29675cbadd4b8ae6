use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use swarna_core::{StorageError, TabStorage};
use swarna_logging::{swarna_info, swarna_warn};
use tempfile::NamedTempFile;

/// Tab storage backed by one RON file per tab.
///
/// Every write rewrites the whole file through a temp file and a rename, so a
/// crash never leaves a half-written session behind. The file belongs to one
/// tab only: opening never adopts what an earlier tab left behind, and the
/// file is meant to be discarded when the tab ends.
#[derive(Debug)]
pub struct FileTabStorage {
    dir: PathBuf,
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileTabStorage {
    /// Opens empty storage for `tab_id` under `dir`.
    ///
    /// A file already at the tab's path was left by a tab that did not shut
    /// down cleanly (tab ids are process ids and get reused); it is deleted.
    pub fn open(dir: &Path, tab_id: &str) -> Result<Self, StorageError> {
        ensure_dir(dir)?;
        let path = dir.join(format!("tab-{tab_id}.ron"));
        match fs::remove_file(&path) {
            Ok(()) => swarna_warn!("Discarding leftover tab storage {:?}", path),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }
        Ok(Self {
            dir: dir.to_path_buf(),
            path,
            entries: BTreeMap::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ends the tab: the backing file is deleted.
    pub fn discard(self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                swarna_info!("Discarded tab storage {:?}", self.path);
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Writes `entries` to disk and adopts them once the rename succeeded.
    fn commit(&mut self, entries: BTreeMap<String, String>) -> Result<(), StorageError> {
        let content = ron::ser::to_string_pretty(&entries, ron::ser::PrettyConfig::new())
            .map_err(|err| StorageError::Encode {
                key: self.path.display().to_string(),
                message: err.to_string(),
            })?;

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;
        tmp.persist(&self.path).map_err(|err| StorageError::Io(err.error))?;
        self.entries = entries;
        Ok(())
    }
}

impl TabStorage for FileTabStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.set_many(vec![(key, value)])
    }

    /// One file write for the whole batch; on failure nothing changes.
    fn set_many(&mut self, entries: Vec<(&str, String)>) -> Result<(), StorageError> {
        let mut next = self.entries.clone();
        for (key, value) in entries {
            next.insert(key.to_string(), value);
        }
        if next == self.entries {
            return Ok(());
        }
        self.commit(next)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if !self.entries.contains_key(key) {
            return Ok(());
        }
        let mut next = self.entries.clone();
        next.remove(key);
        self.commit(next)
    }
}

fn ensure_dir(dir: &Path) -> Result<(), StorageError> {
    if dir.exists() {
        if !fs::metadata(dir)?.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a directory", dir.display()),
            )
            .into());
        }
    } else {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}
