//! The persistence boundary: where verified levels' reproduction data goes.

use std::collections::HashMap;
use std::fs::{create_dir_all, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::PathBuf;

use log::debug;
use thiserror::Error;

use crate::level::StoredGeneratedLevel;

/// Ways a [`LevelStore`] operation can fail.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record with this `level_id` already exists. Stores never overwrite.
    #[error("a level with id {0} is already stored")]
    Conflict(String),
    /// The underlying storage failed.
    #[error("level store I/O failure: {0}")]
    Io(#[from] std::io::Error),
    /// A record could not be encoded or decoded.
    #[error("level record codec failure: {0}")]
    Codec(#[from] serde_json::Error),
}

/// The persistence collaborator's contract.
///
/// `save` must guarantee at most one stored record per `level_id`, failing with
/// [`StoreError::Conflict`] rather than overwriting. Deleting records is outside this crate's
/// concern entirely.
pub trait LevelStore {
    /// Persist one level record.
    fn save(&mut self, level: &StoredGeneratedLevel) -> Result<(), StoreError>;
    /// Retrieve a level's reproduction data by id, for replay and support.
    fn find_by_level_id(&self, level_id: &str) -> Result<Option<StoredGeneratedLevel>, StoreError>;
}

/// An in-memory [`LevelStore`], mainly for tests and single-process use.
#[derive(Clone, Debug, Default)]
pub struct MemoryLevelStore {
    levels: HashMap<String, StoredGeneratedLevel>,
}

impl MemoryLevelStore {
    /// Construct an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// How many records are stored.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Whether no records are stored.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl LevelStore for MemoryLevelStore {
    fn save(&mut self, level: &StoredGeneratedLevel) -> Result<(), StoreError> {
        if self.levels.contains_key(&level.level_id) {
            return Err(StoreError::Conflict(level.level_id.clone()));
        }

        self.levels.insert(level.level_id.clone(), level.clone());
        Ok(())
    }

    fn find_by_level_id(&self, level_id: &str) -> Result<Option<StoredGeneratedLevel>, StoreError> {
        Ok(self.levels.get(level_id).cloned())
    }
}

/// A [`LevelStore`] writing one JSON document per level under a root directory.
///
/// The file name is `<level_id>.json`; an existing file is a conflict, never overwritten.
#[derive(Clone, Debug)]
pub struct JsonFileLevelStore {
    root: PathBuf,
}

impl JsonFileLevelStore {
    /// Construct a store rooted at `root`. The directory is created on first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn record_path(&self, level_id: &str) -> PathBuf {
        self.root.join(format!("{level_id}.json"))
    }
}

impl LevelStore for JsonFileLevelStore {
    fn save(&mut self, level: &StoredGeneratedLevel) -> Result<(), StoreError> {
        let path = self.record_path(&level.level_id);
        if path.exists() {
            return Err(StoreError::Conflict(level.level_id.clone()));
        }

        create_dir_all(&self.root)?;
        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut writer, level)?;
        writer.flush()?;

        debug!("stored level {} at {}", level.level_id, path.display());
        Ok(())
    }

    fn find_by_level_id(&self, level_id: &str) -> Result<Option<StoredGeneratedLevel>, StoreError> {
        let file = match File::open(self.record_path(level_id)) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        Ok(Some(serde_json::from_reader(BufReader::new(file))?))
    }
}
