//! File I/O utilities with atomic writes
//!
//! Writes go to a sibling temp file which is flushed and synced before being
//! renamed over the live file. Several staged writes can be committed
//! together: if any of them fails to stage, no live file is touched.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::ClearSpendError;

/// Read JSON from a file, returning a default value if file doesn't exist
pub fn read_json<T, P>(path: P) -> Result<T, ClearSpendError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path).map_err(|e| {
        ClearSpendError::Storage(format!("Failed to open {}: {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| {
        ClearSpendError::Storage(format!("Failed to parse {}: {}", path.display(), e))
    })
}

/// A serialized file waiting in its temp location
#[derive(Debug)]
pub struct StagedWrite {
    temp_path: PathBuf,
    target: PathBuf,
}

impl StagedWrite {
    /// Rename the temp file into place
    pub fn commit(self) -> Result<(), ClearSpendError> {
        fs::rename(&self.temp_path, &self.target).map_err(|e| {
            let _ = fs::remove_file(&self.temp_path);
            ClearSpendError::Storage(format!(
                "Failed to replace {}: {}",
                self.target.display(),
                e
            ))
        })
    }

    /// Throw the staged data away
    pub fn discard(self) {
        let _ = fs::remove_file(&self.temp_path);
    }
}

/// Serialize `data` to a temp file next to `path` without touching `path`
pub fn stage_json<T, P>(path: P, data: &T) -> Result<StagedWrite, ClearSpendError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            ClearSpendError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file in the same directory so the rename stays atomic
    let temp_path = path.with_extension("json.tmp");

    let result = (|| {
        let file = File::create(&temp_path)
            .map_err(|e| ClearSpendError::Storage(format!("Failed to create temp file: {}", e)))?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, data)
            .map_err(|e| ClearSpendError::Storage(format!("Failed to serialize data: {}", e)))?;

        writer
            .flush()
            .map_err(|e| ClearSpendError::Storage(format!("Failed to flush data: {}", e)))?;

        writer
            .get_ref()
            .sync_all()
            .map_err(|e| ClearSpendError::Storage(format!("Failed to sync data: {}", e)))
    })();

    match result {
        Ok(()) => Ok(StagedWrite {
            temp_path,
            target: path.to_path_buf(),
        }),
        Err(e) => {
            let _ = fs::remove_file(&temp_path);
            Err(e)
        }
    }
}

/// Write JSON to a file atomically (write to temp, then rename)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), ClearSpendError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    stage_json(path, data)?.commit()
}

/// Commit staged writes together; if staging failed for any, none are applied
///
/// The renames run one after another, so a rename failure part way through
/// leaves the earlier files replaced.
pub fn commit_all(
    staged: Vec<Result<StagedWrite, ClearSpendError>>,
) -> Result<(), ClearSpendError> {
    let mut ready = Vec::with_capacity(staged.len());
    let mut failure = None;

    for item in staged {
        match item {
            Ok(write) => ready.push(write),
            Err(e) => {
                failure.get_or_insert(e);
            }
        }
    }

    if let Some(e) = failure {
        for write in ready {
            write.discard();
        }
        return Err(e);
    }

    for write in ready {
        write.commit()?;
    }

    Ok(())
}
