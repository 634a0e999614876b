//! File discovery under a BIDS dataset root.
//!
//! Every call walks the tree again; nothing is cached. Matches are ordered by
//! file name so that reports do not depend on directory iteration order.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::Result;
use crate::pattern::FilePattern;

/// Find the single NIfTI file matching `pattern` under `dir`.
///
/// Returns the absolute path only when exactly one file matches. Zero
/// matches, several matches, or a missing `dir` all return `None`; an
/// ambiguous match is never resolved by picking one of the candidates.
///
/// # Errors
///
/// Returns an error if `pattern` is not a valid glob.
pub fn find_single_nifti(dir: &Path, pattern: &str) -> Result<Option<PathBuf>> {
    let mut matches = find_files(dir, pattern)?;
    if matches.len() != 1 {
        debug!(
            "Expected one match for {} under {}, found {}",
            pattern,
            dir.display(),
            matches.len()
        );
        return Ok(None);
    }
    Ok(matches.pop())
}

/// Find every NIfTI file matching `pattern` under `dir`.
///
/// Returns absolute paths sorted by file name; empty if `dir` is missing.
///
/// # Errors
///
/// Returns an error if `pattern` is not a valid glob.
pub fn find_all_niftis(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    find_files(dir, pattern)
}

/// Recursively collect regular files under `dir` matching `pattern`.
///
/// The pattern is compiled before the directory is inspected, so an invalid
/// pattern fails even when `dir` does not exist.
///
/// # Errors
///
/// Returns an error if `pattern` is not a valid glob.
pub fn find_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let pattern = FilePattern::new(pattern)?;
    if !dir.is_dir() {
        debug!("Search directory does not exist: {}", dir.display());
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    walk(dir, dir, &pattern, &mut files);

    // Sort by filename, full path breaks ties between sessions
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()).then_with(|| a.cmp(b)));

    let files = files.into_iter().map(|path| absolute(&path)).collect();
    Ok(files)
}

/// List `sub-*` directories directly under `root`, sorted by name.
pub fn list_subject_dirs(root: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(root) else {
        return Vec::new();
    };

    let mut subjects: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_dir())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with("sub-"))
        })
        .collect();
    subjects.sort();
    subjects
}

fn walk(base: &Path, dir: &Path, pattern: &FilePattern, out: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(error) => {
            warn!("Skipping unreadable directory {}: {}", dir.display(), error);
            return;
        }
    };

    for entry_result in entries {
        let entry = match entry_result {
            Ok(entry) => entry,
            Err(error) => {
                warn!("Skipping unreadable entry in {}: {}", dir.display(), error);
                continue;
            }
        };

        let path = entry.path();
        // Symlinked directories are not followed
        if entry.file_type().is_ok_and(|kind| kind.is_dir()) {
            walk(base, &path, pattern, out);
            continue;
        }
        if !path.is_file() {
            continue;
        }

        let relative = path.strip_prefix(base).unwrap_or(&path);
        if pattern.matches(relative) {
            out.push(path);
        }
    }
}

/// Resolve symlinks where possible; fall back to a lexically absolute path.
pub(crate) fn absolute(path: &Path) -> PathBuf {
    std::fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, relative: &str) -> PathBuf {
        let path = dir.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, b"nifti").unwrap();
        path
    }

    #[test]
    fn test_find_all_niftis_sorted_by_file_name() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "b.nii.gz");
        touch(dir.path(), "a.nii.gz");

        let files = find_all_niftis(dir.path(), "*.nii.gz").unwrap();

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].file_name().unwrap(), "a.nii.gz");
        assert_eq!(files[1].file_name().unwrap(), "b.nii.gz");
        assert!(files.iter().all(|p| p.is_absolute()));
    }

    #[test]
    fn test_find_all_niftis_orders_by_name_not_path() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "sub-01/anat/z_T1w.nii.gz");
        touch(dir.path(), "sub-02/anat/a_T1w.nii.gz");

        let files = find_all_niftis(dir.path(), "*_T1w.nii.gz").unwrap();

        assert_eq!(files[0].file_name().unwrap(), "a_T1w.nii.gz");
        assert_eq!(files[1].file_name().unwrap(), "z_T1w.nii.gz");
    }

    #[test]
    fn test_find_all_niftis_missing_dir() {
        let dir = TempDir::new().unwrap();
        let files = find_all_niftis(&dir.path().join("absent"), "*.nii.gz").unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_find_single_nifti_exactly_one() {
        let dir = TempDir::new().unwrap();
        let expected = touch(dir.path(), "sub-01/ses-1/anat/sub-01_ses-1_T1w.nii.gz");
        touch(dir.path(), "sub-01/ses-1/anat/sub-01_ses-1_T2w.nii.gz");

        let found = find_single_nifti(dir.path(), "*_T1w.nii.gz").unwrap().unwrap();

        assert!(found.is_absolute());
        assert_eq!(found, std::fs::canonicalize(expected).unwrap());
    }

    #[test]
    fn test_find_single_nifti_ambiguous_or_empty() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "sub-01/anat/sub-01_run-1_T1w.nii.gz");
        touch(dir.path(), "sub-01/anat/sub-01_run-2_T1w.nii.gz");

        assert!(find_single_nifti(dir.path(), "*_T1w.nii.gz").unwrap().is_none());
        assert!(find_single_nifti(dir.path(), "*_FLAIR.nii.gz").unwrap().is_none());
    }

    #[test]
    fn test_find_single_nifti_missing_dir() {
        let dir = TempDir::new().unwrap();
        let found = find_single_nifti(&dir.path().join("absent"), "*.nii.gz").unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn test_file_is_not_a_search_dir() {
        let dir = TempDir::new().unwrap();
        let file = touch(dir.path(), "a.nii.gz");
        assert!(find_all_niftis(&file, "*.nii.gz").unwrap().is_empty());
    }

    #[test]
    fn test_directories_never_match() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("fake.nii.gz")).unwrap();
        assert!(find_all_niftis(dir.path(), "*.nii.gz").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_pattern_is_an_error_even_without_dir() {
        let dir = TempDir::new().unwrap();
        assert!(find_all_niftis(&dir.path().join("absent"), "[abc").is_err());
    }

    #[test]
    fn test_list_subject_dirs() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("sub-02")).unwrap();
        std::fs::create_dir_all(dir.path().join("sub-01")).unwrap();
        std::fs::create_dir_all(dir.path().join("derivatives")).unwrap();
        touch(dir.path(), "sub-03.txt");

        let subjects = list_subject_dirs(dir.path());

        assert_eq!(subjects.len(), 2);
        assert!(subjects[0].ends_with("sub-01"));
        assert!(subjects[1].ends_with("sub-02"));
        assert!(list_subject_dirs(&dir.path().join("absent")).is_empty());
    }
}
