//! ISLES'24 stroke lesion segmentation challenge, training release.
//!
//! Distributed from Zenodo as a single `train.7z` archive that is extracted
//! next to itself, so the archive resolves to `../train.7z` from the root.

use std::path::{Path, PathBuf};

use tracing::warn;

use super::count_tsv_rows;
use crate::checks::verify_md5;
use crate::config::{ArchiveSpec, DatasetValidationConfig, FileExpectation};
use crate::discovery::find_files;
use crate::engine::validate_dataset;
use crate::error::Result;
use crate::result::{ValidationCheck, ValidationResult};

/// MD5 of `train.7z` as published on Zenodo.
pub const ISLES24_ARCHIVE_MD5: &str = "4959a5dd2438d53e3c86d6858484e781";

/// Number of training subjects.
pub const ISLES24_EXPECTED_SUBJECTS: usize = 149;

/// Completeness contract for an ISLES'24 download.
#[must_use]
pub fn isles24_validation_config() -> DatasetValidationConfig {
    let n = ISLES24_EXPECTED_SUBJECTS;
    DatasetValidationConfig {
        name: "isles24".to_string(),
        description: "ISLES'24 acute stroke CT training set (Zenodo train.7z)".to_string(),
        required_files: vec![
            "dataset_description.json".to_string(),
            "participants.tsv".to_string(),
        ],
        expected_subjects: Some(n),
        expectations: vec![
            FileExpectation::new("ncct_images", "*_ncct.nii.gz", n),
            FileExpectation::new("cta_images", "*_cta.nii.gz", n),
            FileExpectation::new("ctp_images", "*_ctp.nii.gz", n),
            FileExpectation::new("tmax_maps", "*_tmax.nii.gz", n).in_dir("derivatives"),
            FileExpectation::new("mtt_maps", "*_mtt.nii.gz", n).in_dir("derivatives"),
            FileExpectation::new("cbf_maps", "*_cbf.nii.gz", n).in_dir("derivatives"),
            FileExpectation::new("cbv_maps", "*_cbv.nii.gz", n).in_dir("derivatives"),
            FileExpectation::new("lesion_masks", "*_lesion-msk.nii.gz", n).in_dir("derivatives"),
        ],
        archive: Some(ArchiveSpec {
            path: PathBuf::from("../train.7z"),
            md5: ISLES24_ARCHIVE_MD5.to_string(),
            size_bytes: None,
        }),
    }
}

/// Validate an extracted ISLES'24 download rooted at `root`.
///
/// # Errors
///
/// Propagates setup errors from [`validate_dataset`].
pub fn validate_isles24_download(root: &Path) -> Result<ValidationResult> {
    validate_isles24_with_config(root, &isles24_validation_config())
}

/// Validate an ISLES'24 download against an adjusted contract.
///
/// # Errors
///
/// Propagates setup errors from [`validate_dataset`].
pub fn validate_isles24_with_config(
    root: &Path,
    config: &DatasetValidationConfig,
) -> Result<ValidationResult> {
    let mut result = validate_dataset(root, config)?;
    result.add(check_phenotype_readable(root)?);
    Ok(result)
}

/// Verify a downloaded `train.7z` wherever it lives.
pub fn verify_isles24_archive(path: &Path) -> ValidationResult {
    let mut result = ValidationResult::new(path);
    result.add(verify_md5(path, ISLES24_ARCHIVE_MD5));
    result
}

/// Check that every phenotype table under `phenotype/` parses.
///
/// Fails when no table is present or when any table lacks a header, has no
/// rows, or has ragged rows. Every unreadable table is listed.
///
/// # Errors
///
/// Returns an error only if the built-in table pattern fails to compile.
pub fn check_phenotype_readable(root: &Path) -> Result<ValidationCheck> {
    let tables = find_files(&root.join("phenotype"), "*.tsv")?;

    let mut failures = Vec::new();
    for table in &tables {
        match count_tsv_rows(table) {
            Ok(0) => failures.push(format!("{} (no rows)", table.display())),
            Ok(_) => {}
            Err(error) => {
                warn!("Phenotype table {} is unreadable: {}", table.display(), error);
                failures.push(format!("{} ({error})", table.display()));
            }
        }
    }

    let readable = tables.len() - failures.len();
    let check = ValidationCheck::new(
        "phenotype_readable",
        "all phenotype tables parse (at least one)",
        format!("{readable}/{} tables readable", tables.len()),
        !tables.is_empty() && failures.is_empty(),
    );
    let check = if tables.is_empty() {
        check.with_details(format!("no *.tsv found under {}", root.join("phenotype").display()))
    } else {
        check.with_details(failures.join(", "))
    };
    Ok(check)
}
