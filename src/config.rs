//! Locations of the dataset, its archive and the cached split.
//!
//! The defaults are relative to the directory the scripts run from. A TOML
//! file can override any of them:
//!
//! ```toml
//! dataset_dir = "data/interim/PatternNet/images"
//! split_file = "data/processed/split_definition.json"
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::datasets::DEFAULT_SPLIT_FILE;

pub const DEFAULT_ARCHIVE: &str = "../../data/raw/PatternNet.zip";
pub const DEFAULT_EXTRACT_DIR: &str = "../../data/interim";
pub const DEFAULT_DATASET_DIR: &str = "../data/interim/PatternNet/images";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataPaths {
    /// Root holding one directory per class.
    pub dataset_dir: PathBuf,
    pub split_file: PathBuf,
    /// Raw archive as downloaded.
    pub archive: PathBuf,
    pub extract_dir: PathBuf,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            dataset_dir: DEFAULT_DATASET_DIR.into(),
            split_file: DEFAULT_SPLIT_FILE.into(),
            archive: DEFAULT_ARCHIVE.into(),
            extract_dir: DEFAULT_EXTRACT_DIR.into(),
        }
    }
}

impl DataPaths {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Class labels, taken from the subdirectory names of `dataset_dir`, sorted.
    pub fn class_names(&self) -> Result<Vec<String>, ConfigError> {
        let read_err = |source| ConfigError::Io {
            path: self.dataset_dir.clone(),
            source,
        };
        let mut classes = Vec::new();
        for entry in fs::read_dir(&self.dataset_dir).map_err(read_err)? {
            let entry = entry.map_err(read_err)?;
            if entry.path().is_dir() {
                let name = entry
                    .file_name()
                    .into_string()
                    .map_err(ConfigError::NonUtf8ClassName)?;
                classes.push(name);
            }
        }
        classes.sort();
        Ok(classes)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("class directory {0:?} is not valid UTF-8")]
    NonUtf8ClassName(std::ffi::OsString),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn empty_config_uses_defaults() {
        assert_eq!(DataPaths::from_toml("").unwrap(), DataPaths::default());
        assert_eq!(
            DataPaths::default().split_file,
            PathBuf::from("../data/processed/split_definition.json")
        );
    }

    #[test]
    fn partial_config_overrides_given_keys() {
        let paths = DataPaths::from_toml("split_file = \"cache/split.json\"\n").unwrap();
        assert_eq!(paths.split_file, PathBuf::from("cache/split.json"));
        assert_eq!(paths.archive, PathBuf::from(DEFAULT_ARCHIVE));
    }

    #[test]
    fn malformed_config_is_rejected() {
        let err = DataPaths::from_toml("split_file = [1, 2").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn class_names_lists_only_directories() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("river")).unwrap();
        fs::create_dir_all(temp.path().join("airplane")).unwrap();
        fs::write(temp.path().join("README.txt"), b"").unwrap();
        let paths = DataPaths {
            dataset_dir: temp.path().to_path_buf(),
            ..DataPaths::default()
        };

        assert_eq!(paths.class_names().unwrap(), vec!["airplane", "river"]);
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_class_directory_is_rejected() {
        use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("river")).unwrap();
        fs::create_dir_all(temp.path().join(OsStr::from_bytes(b"harbor\xff"))).unwrap();
        let paths = DataPaths {
            dataset_dir: temp.path().to_path_buf(),
            ..DataPaths::default()
        };

        let err = paths.class_names().unwrap_err();
        assert!(matches!(err, ConfigError::NonUtf8ClassName(ref name) if name.as_bytes() == b"harbor\xff"));
    }

    #[test]
    fn missing_config_file_is_io_error() {
        let temp = tempdir().unwrap();
        let err = DataPaths::load_from_file(temp.path().join("paths.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
