//! Flat-file save store: one JSON array of save records.
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use amazonia_game::{GameError, GameRecord, SaveStore};
use log::info;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{path} must hold a JSON array of saves")]
    NotAnArray { path: PathBuf },
    #[error("bad save in {path}: {source}")]
    Record {
        path: PathBuf,
        #[source]
        source: GameError,
    },
}

/// Saves kept in a single JSON file. A missing or empty file holds no saves;
/// saving rewrites the whole file, replacing the entry with the same name.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Vec<GameRecord>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        let value: Value = serde_json::from_str(&text).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        let Value::Array(entries) = value else {
            return Err(StoreError::NotAnArray {
                path: self.path.clone(),
            });
        };
        entries
            .iter()
            .map(|entry| {
                GameRecord::from_value(entry).map_err(|source| StoreError::Record {
                    path: self.path.clone(),
                    source,
                })
            })
            .collect()
    }

    fn write_all(&self, records: &[GameRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(records).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, json).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl SaveStore for JsonFileStore {
    type Error = StoreError;

    fn load(&self, name: &str) -> Result<Option<GameRecord>, Self::Error> {
        Ok(self
            .read_all()?
            .into_iter()
            .find(|record| record.name() == name))
    }

    fn save(&self, record: &GameRecord) -> Result<(), Self::Error> {
        let mut records = self.read_all()?;
        if let Some(existing) = records.iter_mut().find(|r| r.name() == record.name()) {
            *existing = record.clone();
        } else {
            records.push(record.clone());
        }
        self.write_all(&records)?;
        info!("wrote {:?} to {}", record.name(), self.path.display());
        Ok(())
    }

    fn list_names(&self) -> Result<Vec<String>, Self::Error> {
        Ok(self
            .read_all()?
            .iter()
            .map(|record| record.name().to_string())
            .collect())
    }
}
