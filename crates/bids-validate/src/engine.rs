//! Generic validation driver.

use std::path::{Path, PathBuf};

use tracing::{info, info_span};

use crate::checks::{check_count, check_file_size, check_zero_byte_files, verify_md5};
use crate::config::DatasetValidationConfig;
use crate::discovery::{absolute, find_all_niftis, list_subject_dirs};
use crate::error::Result;
use crate::result::ValidationResult;

/// Run every check described by `config` against the dataset at `root`.
///
/// Checks run in a fixed order: required files, subject directories,
/// per-pattern counts, zero-byte files, then archive size and checksum. A
/// failed check never stops the run.
///
/// # Errors
///
/// Returns an error only for setup bugs: any error from
/// [`DatasetValidationConfig::check`], such as a pattern that does not
/// compile or a malformed digest. A missing `root` produces failed checks,
/// not an error.
pub fn validate_dataset(root: &Path, config: &DatasetValidationConfig) -> Result<ValidationResult> {
    config.check()?;
    let _span = info_span!("validate_dataset", dataset = %config.name).entered();
    info!("Validating {} download at {}", config.name, root.display());

    let mut result = ValidationResult::new(root);
    let mut discovered = Vec::new();

    for file_name in &config.required_files {
        let path = root.join(file_name);
        let found: Vec<PathBuf> = if path.is_file() { vec![absolute(&path)] } else { Vec::new() };
        result.add(check_count(file_name, 1, &found, ""));
        discovered.extend(found);
    }

    if let Some(expected) = config.expected_subjects {
        let subjects = list_subject_dirs(root);
        result.add(check_count("subjects", expected, &subjects, ""));
    }

    for expectation in &config.expectations {
        let search_dir = expectation.search_path(root);
        let files = find_all_niftis(&search_dir, &expectation.pattern)?;
        let details = format!("{} under {}", expectation.pattern, expectation.search_dir.display());
        result.add(check_count(
            &expectation.name,
            expectation.expected_count,
            &files,
            &details,
        ));
        discovered.extend(files);
    }
    // Overlapping patterns must not report the same file twice
    discovered.sort();
    discovered.dedup();

    result.add(check_zero_byte_files(&discovered));

    if let Some(archive) = &config.archive {
        let archive_path = archive.resolve(root);
        if let Some(size_bytes) = archive.size_bytes {
            result.add(check_file_size(&archive_path, size_bytes));
        }
        result.add(verify_md5(&archive_path, &archive.md5));
    }

    info!(
        "{} checks run: {} passed, {} failed",
        result.len(),
        result.passed_count(),
        result.failed_count()
    );
    Ok(result)
}
