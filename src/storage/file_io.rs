//! File I/O utilities with atomic writes

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::SplitbookError;

/// Read JSON from a file, returning a default value if the file doesn't exist
pub fn read_json<T, P>(path: P) -> Result<T, SplitbookError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path).map_err(|e| {
        SplitbookError::Storage(format!("Failed to open {}: {}", path.display(), e))
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        SplitbookError::Storage(format!("Failed to parse {}: {}", path.display(), e))
    })
}

/// A JSON document written and synced to a temp file next to its target,
/// not yet moved into place
#[derive(Debug)]
#[must_use = "a staged write does nothing until it is committed or discarded"]
pub struct StagedWrite {
    temp_path: PathBuf,
    path: PathBuf,
}

impl StagedWrite {
    /// Rename the temp file over the target
    pub fn commit(self) -> Result<(), SplitbookError> {
        fs::rename(&self.temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&self.temp_path);
            SplitbookError::Storage(format!(
                "Failed to replace {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    /// Remove the temp file, leaving the target untouched
    pub fn discard(self) {
        let _ = fs::remove_file(&self.temp_path);
    }
}

/// Serialize data into a temp file beside `path` without replacing it
pub fn stage_json<T, P>(path: P, data: &T) -> Result<StagedWrite, SplitbookError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            SplitbookError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file must live in the same directory for the rename to be atomic
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| SplitbookError::Storage(format!("Failed to create temp file: {}", e)))?;

    let staged = StagedWrite {
        temp_path,
        path: path.to_path_buf(),
    };

    let mut writer = BufWriter::new(file);
    let written = serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| SplitbookError::Storage(format!("Failed to serialize data: {}", e)))
        .and_then(|_| {
            writer
                .flush()
                .map_err(|e| SplitbookError::Storage(format!("Failed to flush data: {}", e)))
        })
        .and_then(|_| {
            writer
                .get_ref()
                .sync_all()
                .map_err(|e| SplitbookError::Storage(format!("Failed to sync data: {}", e)))
        });
    drop(writer);

    match written {
        Ok(()) => Ok(staged),
        Err(e) => {
            staged.discard();
            Err(e)
        }
    }
}

/// Write JSON to a file atomically (write to temp, then rename)
///
/// The target is either completely replaced or left untouched.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), SplitbookError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    stage_json(path, data)?.commit()
}
