use std::{
    fs, io,
    path::{Path, PathBuf},
};

use chrono::{Local, NaiveDateTime};

use crate::render::{Artifact, RenderError};

/// Upper bound on `_N` suffixes tried for one file name.
const MAX_NAME_ATTEMPTS: usize = 1000;

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("Failed to prepare output directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("Failed to create temporary file in {path}: {source}")]
    TempFile { path: PathBuf, source: io::Error },
    #[error("Failed to store artifact at {path}: {source}")]
    Persist { path: PathBuf, source: io::Error },
    #[error("No free file name for {0}")]
    NameExhausted(String),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Composes `document_{caller}_{YYYYMMDD_HHMMSS}.{ext}`.
///
/// Characters of the caller id that are not safe in a file name are
/// replaced by `_`.
pub fn artifact_file_name(caller_id: &str, at: NaiveDateTime, ext: &str) -> String {
    let caller: String = caller_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("document_{caller}_{}.{ext}", at.format("%Y%m%d_%H%M%S"))
}

fn with_suffix(name: &str, n: usize) -> String {
    if n == 0 {
        return name.to_string();
    }
    match name.rsplit_once('.') {
        Some((stem, ext)) => format!("{stem}_{n}.{ext}"),
        None => format!("{name}_{n}"),
    }
}

/// Writes rendered artifacts into one destination directory.
#[derive(Debug, Clone)]
pub struct OutputFinalizer {
    dir: PathBuf,
}

impl OutputFinalizer {
    /// Creates the destination directory if it does not exist yet.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, OutputError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| OutputError::CreateDir {
            path: dir.clone(),
            source,
        })?;
        log::info!("Output directory ready: {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn finalize(
        &self,
        artifact: Box<dyn Artifact>,
        caller_id: &str,
    ) -> Result<PathBuf, OutputError> {
        self.finalize_at(artifact, caller_id, Local::now().naive_local())
    }

    /// Serializes into a temporary file next to the destination and renames
    /// it into place only once serialization succeeded. On failure the
    /// temporary file is removed and nothing appears under the final name.
    pub fn finalize_at(
        &self,
        artifact: Box<dyn Artifact>,
        caller_id: &str,
        at: NaiveDateTime,
    ) -> Result<PathBuf, OutputError> {
        let ext = artifact.extension();
        let mut tmp = tempfile::Builder::new()
            .prefix(".document_")
            .suffix(".part")
            .tempfile_in(&self.dir)
            .map_err(|source| OutputError::TempFile {
                path: self.dir.clone(),
                source,
            })?;

        artifact.write_to(tmp.as_file_mut())?;

        let name = artifact_file_name(caller_id, at, ext);
        for n in 0..MAX_NAME_ATTEMPTS {
            let path = self.dir.join(with_suffix(&name, n));
            match tmp.persist_noclobber(&path) {
                Ok(_) => {
                    log::info!("Artifact written: {}", path.display());
                    return Ok(path);
                }
                Err(err) if err.error.kind() == io::ErrorKind::AlreadyExists => {
                    tmp = err.file;
                }
                Err(err) => {
                    return Err(OutputError::Persist {
                        path,
                        source: err.error,
                    });
                }
            }
        }
        Err(OutputError::NameExhausted(name))
    }
}

/// Deletes `path`. Returns `false` when there was nothing to delete or the
/// delete failed; never errors.
pub fn cleanup(path: &Path) -> bool {
    match fs::remove_file(path) {
        Ok(()) => {
            log::info!("File removed: {}", path.display());
            true
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => false,
        Err(e) => {
            log::error!("Failed to remove {}: {e}", path.display());
            false
        }
    }
}
