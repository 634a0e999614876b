//! Dataset completeness contracts.
//!
//! A [`DatasetValidationConfig`] states what a complete download of one
//! dataset family looks like. Built-in families construct theirs in code
//! (see [`crate::datasets`]); custom families can be loaded from TOML:
//!
//! ```toml
//! name = "ds000001"
//! description = "Balloon analog risk task"
//! required_files = ["dataset_description.json", "participants.tsv"]
//! expected_subjects = 16
//!
//! [[expectations]]
//! name = "t1w_series"
//! pattern = "anat/*_T1w.nii.gz"
//! expected_count = 16
//!
//! [archive]
//! path = "../ds000001.tar"
//! md5 = "0123456789abcdef0123456789abcdef"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::checksum::is_md5_hex;
use crate::error::{Result, ValidateError};
use crate::pattern::FilePattern;

/// Completeness contract for one dataset family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetValidationConfig {
    /// Family identifier (e.g., "arc").
    pub name: String,
    /// One-line human description.
    #[serde(default)]
    pub description: String,
    /// Files that must exist directly under the dataset root.
    #[serde(default)]
    pub required_files: Vec<String>,
    /// Expected number of `sub-*` directories under the root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_subjects: Option<usize>,
    /// Per-pattern file counts.
    #[serde(default)]
    pub expectations: Vec<FileExpectation>,
    /// Source archive to verify, if the family is distributed as one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archive: Option<ArchiveSpec>,
}

/// Expected number of files matching a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileExpectation {
    /// Check name shown in the report.
    pub name: String,
    /// Directory to search, relative to the dataset root.
    #[serde(default = "default_search_dir")]
    pub search_dir: PathBuf,
    /// Glob matched against trailing path components.
    pub pattern: String,
    /// Exact number of files expected.
    pub expected_count: usize,
}

/// Archive integrity expectations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveSpec {
    /// Archive location; relative paths resolve against the dataset root.
    pub path: PathBuf,
    /// Expected MD5 hex digest.
    pub md5: String,
    /// Expected size in bytes, if published.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
}

fn default_search_dir() -> PathBuf {
    PathBuf::from(".")
}

impl FileExpectation {
    pub fn new(name: &str, pattern: &str, expected_count: usize) -> Self {
        Self {
            name: name.to_string(),
            search_dir: default_search_dir(),
            pattern: pattern.to_string(),
            expected_count,
        }
    }

    /// Restrict the search to a subdirectory of the root.
    #[must_use]
    pub fn in_dir(mut self, search_dir: impl Into<PathBuf>) -> Self {
        self.search_dir = search_dir.into();
        self
    }

    /// Directory searched for this expectation under `root`.
    pub fn search_path(&self, root: &Path) -> PathBuf {
        if self.search_dir == Path::new(".") {
            root.to_path_buf()
        } else {
            root.join(&self.search_dir)
        }
    }
}

impl ArchiveSpec {
    /// Archive location for a dataset rooted at `root`.
    pub fn resolve(&self, root: &Path) -> PathBuf {
        root.join(&self.path)
    }
}

impl DatasetValidationConfig {
    /// Parse a config from TOML text and check it.
    ///
    /// # Errors
    ///
    /// Returns [`ValidateError::ConfigParse`] for malformed TOML and any
    /// error from [`DatasetValidationConfig::check`].
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| ValidateError::ConfigParse {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;
        config.check()?;
        Ok(config)
    }

    /// Load and check a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or checked.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ValidateError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, path)
    }

    /// Verify the config is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`ValidateError::InvalidConfig`] for empty names or a
    /// malformed digest, and [`ValidateError::InvalidPattern`] for a pattern
    /// that does not compile.
    pub fn check(&self) -> Result<()> {
        let invalid = |reason: String| ValidateError::InvalidConfig {
            dataset: self.name.clone(),
            reason,
        };

        if self.name.trim().is_empty() {
            return Err(invalid("dataset name is empty".to_string()));
        }
        for file in &self.required_files {
            if file.trim().is_empty() {
                return Err(invalid("required file name is empty".to_string()));
            }
        }
        for expectation in &self.expectations {
            if expectation.name.trim().is_empty() {
                return Err(invalid(format!(
                    "expectation for pattern '{}' has no name",
                    expectation.pattern
                )));
            }
            FilePattern::new(&expectation.pattern)?;
        }
        if let Some(archive) = &self.archive
            && !is_md5_hex(&archive.md5)
        {
            return Err(invalid(format!(
                "archive md5 '{}' is not a 32-character hex digest",
                archive.md5
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
name = "ds000001"
description = "Balloon analog risk task"
required_files = ["dataset_description.json", "participants.tsv"]
expected_subjects = 16

[[expectations]]
name = "t1w_series"
pattern = "anat/*_T1w.nii.gz"
expected_count = 16

[[expectations]]
name = "lesion_masks"
search_dir = "derivatives/lesion_masks"
pattern = "*_mask.nii.gz"
expected_count = 4

[archive]
path = "../ds000001.tar"
md5 = "0123456789ABCDEF0123456789abcdef"
size_bytes = 2048
"#;

    #[test]
    fn test_parse_toml_config() {
        let config = DatasetValidationConfig::from_toml_str(SAMPLE, Path::new("ds.toml")).unwrap();

        assert_eq!(config.name, "ds000001");
        assert_eq!(config.required_files.len(), 2);
        assert_eq!(config.expected_subjects, Some(16));
        assert_eq!(config.expectations[0].search_dir, PathBuf::from("."));
        assert_eq!(
            config.expectations[1].search_dir,
            PathBuf::from("derivatives/lesion_masks")
        );
        let archive = config.archive.as_ref().unwrap();
        assert_eq!(archive.size_bytes, Some(2048));
        assert_eq!(
            archive.resolve(Path::new("/data/ds000001")),
            PathBuf::from("/data/ds000001/../ds000001.tar")
        );
    }

    #[test]
    fn test_absolute_archive_path_is_kept() {
        let archive = ArchiveSpec {
            path: PathBuf::from("/downloads/train.7z"),
            md5: "0123456789abcdef0123456789abcdef".to_string(),
            size_bytes: None,
        };
        assert_eq!(
            archive.resolve(Path::new("/data/isles24")),
            PathBuf::from("/downloads/train.7z")
        );
    }

    #[test]
    fn test_search_path() {
        let root = Path::new("/data/ds");
        assert_eq!(FileExpectation::new("a", "*.nii", 1).search_path(root), root);
        assert_eq!(
            FileExpectation::new("a", "*.nii", 1)
                .in_dir("derivatives")
                .search_path(root),
            root.join("derivatives")
        );
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = DatasetValidationConfig::from_toml_str("name = ", Path::new("bad.toml"))
            .unwrap_err();
        assert!(matches!(err, ValidateError::ConfigParse { .. }));
    }

    #[test]
    fn test_missing_expected_count_is_parse_error() {
        let content = "name = \"x\"\n[[expectations]]\nname = \"t1w\"\npattern = \"*.nii\"\n";
        let err = DatasetValidationConfig::from_toml_str(content, Path::new("bad.toml"))
            .unwrap_err();
        assert!(matches!(err, ValidateError::ConfigParse { .. }));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let content = "name = \"x\"\n[[expectations]]\nname = \"t1w\"\npattern = \"[T1w\"\nexpected_count = 1\n";
        let err = DatasetValidationConfig::from_toml_str(content, Path::new("bad.toml"))
            .unwrap_err();
        assert!(matches!(err, ValidateError::InvalidPattern { .. }));
    }

    #[test]
    fn test_invalid_digest_rejected() {
        let content = "name = \"x\"\n[archive]\npath = \"a.7z\"\nmd5 = \"abc\"\n";
        let err = DatasetValidationConfig::from_toml_str(content, Path::new("bad.toml"))
            .unwrap_err();
        assert!(matches!(err, ValidateError::InvalidConfig { .. }));
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = DatasetValidationConfig::from_toml_str("name = \" \"", Path::new("bad.toml"))
            .unwrap_err();
        assert!(matches!(err, ValidateError::InvalidConfig { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = DatasetValidationConfig::load(Path::new("/nonexistent/bids.toml")).unwrap_err();
        assert!(matches!(err, ValidateError::ConfigRead { .. }));
    }
}
