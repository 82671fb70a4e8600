use crate::error::SourceError;
use crate::types::TripRecord;
use std::fs;
use std::path::{Path, PathBuf};

/// Supplies trip records to the batch driver, one result per input.
pub trait TripSource {
    fn load_all(&self) -> Result<Vec<(String, Result<TripRecord, SourceError>)>, SourceError>;
}

/// Trip files in a single directory, matched by name prefix and extension.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
    prefix: String,
    extension: String,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            extension: extension.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn matches(&self, name: &str) -> bool {
        let suffix = format!(".{}", self.extension);
        name.starts_with(&self.prefix) && name.ends_with(&suffix)
    }

    /// Matching files, sorted by path so the report order is stable.
    pub fn discover(&self) -> Result<Vec<PathBuf>, SourceError> {
        let discover_err = |source| SourceError::Discover {
            path: self.dir.clone(),
            source,
        };

        let mut files = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(discover_err)? {
            let entry = entry.map_err(discover_err)?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if self.matches(name) {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }
}

impl TripSource for DirectorySource {
    fn load_all(&self) -> Result<Vec<(String, Result<TripRecord, SourceError>)>, SourceError> {
        Ok(self
            .discover()?
            .into_iter()
            .map(|path| (display_name(&path), read_trip(&path)))
            .collect())
    }
}

/// Read and decode a single trip file.
pub fn read_trip(path: &Path) -> Result<TripRecord, SourceError> {
    let data = fs::read_to_string(path).map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| SourceError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
