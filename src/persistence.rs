use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Local;
use thiserror::Error;

use crate::models::Workout;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{path} does not contain a valid workout list: {source}")]
    Deserialization {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to serialize workouts: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The JSON document holding every logged workout.
#[derive(Clone, Debug)]
pub struct WorkoutFile {
    path: PathBuf,
}

impl WorkoutFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        WorkoutFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored workouts. A missing file means nothing has been logged yet.
    pub fn load(&self) -> Result<Vec<Workout>, PersistenceError> {
        // Raw bytes: a file cut off mid-character is corrupt data, not an I/O failure.
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "No workout file yet, starting empty");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(PersistenceError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let workouts: Vec<Workout> =
            serde_json::from_slice(&bytes).map_err(|source| PersistenceError::Deserialization {
                path: self.path.clone(),
                source,
            })?;
        tracing::debug!(path = %self.path.display(), count = workouts.len(), "Loaded workouts");
        Ok(workouts)
    }

    /// Overwrites the file with the full list.
    pub fn save(&self, workouts: &[Workout]) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(workouts)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| PersistenceError::Write {
                path: self.path.clone(),
                source,
            })?;
        }
        fs::write(&self.path, json).map_err(|source| PersistenceError::Write {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!(path = %self.path.display(), count = workouts.len(), "Saved workouts");
        Ok(())
    }

    /// Moves an unreadable file out of the way so the next save can't clobber it.
    /// Returns where it went. Earlier backups are never replaced.
    pub fn quarantine(&self) -> Result<PathBuf, PersistenceError> {
        let stamp = Local::now().format("%Y%m%d-%H%M%S%.3f");
        let base = self.path.file_name().unwrap_or_default().to_os_string();

        let mut suffix = 0u32;
        let backup = loop {
            let mut name = base.clone();
            if suffix == 0 {
                name.push(format!(".corrupt-{stamp}"));
            } else {
                name.push(format!(".corrupt-{stamp}-{suffix}"));
            }
            let candidate = self.path.with_file_name(name);
            if !candidate.exists() {
                break candidate;
            }
            suffix += 1;
        };

        fs::rename(&self.path, &backup).map_err(|source| PersistenceError::Write {
            path: backup.clone(),
            source,
        })?;
        tracing::warn!(
            from = %self.path.display(),
            to = %backup.display(),
            "Moved unreadable workout file aside"
        );
        Ok(backup)
    }
}
