//! JSON file handling for input datasets and the report artifact.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::errors::{Result, ValidationError};

/// Reads and writes JSON documents relative to a working directory.
///
/// Absolute file names bypass the directory, so configured paths can point
/// anywhere on disk.
#[derive(Debug, Clone)]
pub struct FileHandler {
    /// Directory that relative file names resolve against.
    pub directory: PathBuf,
}

impl FileHandler {
    /// Create a new `FileHandler` for the given directory.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Resolve a file name against the handler's directory.
    pub fn resolve(&self, filename: impl AsRef<Path>) -> PathBuf {
        self.directory.join(filename)
    }

    /// Load and deserialize a JSON document.
    ///
    /// A missing or malformed file is an error; callers treat it as fatal.
    pub fn load<T: DeserializeOwned>(&self, filename: impl AsRef<Path>) -> Result<T> {
        let path = self.resolve(filename);
        let content = fs::read_to_string(&path).map_err(|source| ValidationError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ValidationError::Json { path, source })
    }

    /// Serialize `data` as pretty-printed JSON and write it out.
    ///
    /// Creates parent directories if they do not exist.
    pub fn save<T: Serialize>(&self, filename: impl AsRef<Path>, data: &T) -> Result<PathBuf> {
        let path = self.resolve(filename);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|source| ValidationError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }
        let content = serde_json::to_string_pretty(data).map_err(|source| {
            ValidationError::Json {
                path: path.clone(),
                source,
            }
        })?;
        fs::write(&path, content).map_err(|source| ValidationError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    /// Check if a file exists relative to the handler's directory.
    pub fn exists(&self, filename: impl AsRef<Path>) -> bool {
        self.resolve(filename).exists()
    }
}

impl Default for FileHandler {
    fn default() -> Self {
        Self::new(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_save_then_load_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let handler = FileHandler::new(dir.path());

        let mut data = BTreeMap::new();
        data.insert("cluster_0".to_string(), 120u64);
        let written = handler.save("out/nested/report.json", &data).unwrap();
        assert!(written.exists());
        assert!(handler.exists("out/nested/report.json"));

        let loaded: BTreeMap<String, u64> = handler.load("out/nested/report.json").unwrap();
        assert_eq!(loaded, data);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let handler = FileHandler::new(dir.path());
        let err = handler.load::<serde_json::Value>("absent.json").unwrap_err();
        assert!(matches!(err, ValidationError::Io { .. }));
    }

    #[test]
    fn test_load_malformed_file_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.json"), "{ not json").unwrap();
        let handler = FileHandler::new(dir.path());
        let err = handler.load::<serde_json::Value>("bad.json").unwrap_err();
        assert!(matches!(err, ValidationError::Json { .. }));
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn test_save_pretty_prints_with_two_space_indent() {
        let dir = tempfile::tempdir().unwrap();
        let handler = FileHandler::new(dir.path());
        let path = handler
            .save("r.json", &serde_json::json!({"metadata": {"total_personas": 4}}))
            .unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.contains("\n  \"metadata\": {\n    \"total_personas\": 4"));
    }
}
