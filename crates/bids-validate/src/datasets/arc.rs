//! Aphasia Recovery Cohort (ARC), OpenNeuro ds004884.
//!
//! The dataset is mirrored from OpenNeuro with `aws s3 sync`, so there is no
//! archive to checksum. Completeness is judged by series counts per modality
//! and by the participants table covering every subject.

use std::path::Path;

use tracing::warn;

use super::count_tsv_rows;
use crate::config::{DatasetValidationConfig, FileExpectation};
use crate::engine::validate_dataset;
use crate::error::Result;
use crate::result::{ValidationCheck, ValidationResult};

/// Number of subjects in the ds004884 release.
pub const ARC_EXPECTED_SUBJECTS: usize = 230;

/// Top-level BIDS files the release ships.
pub const ARC_REQUIRED_FILES: [&str; 3] = [
    "dataset_description.json",
    "participants.tsv",
    "participants.json",
];

/// Completeness contract for an ARC download.
#[must_use]
pub fn arc_validation_config() -> DatasetValidationConfig {
    DatasetValidationConfig {
        name: "arc".to_string(),
        description: "Aphasia Recovery Cohort (OpenNeuro ds004884)".to_string(),
        required_files: ARC_REQUIRED_FILES.iter().map(ToString::to_string).collect(),
        expected_subjects: Some(ARC_EXPECTED_SUBJECTS),
        expectations: vec![
            FileExpectation::new("t1w_series", "anat/*_T1w.nii.gz", 441),
            FileExpectation::new("t2w_series", "anat/*_T2w.nii.gz", 447),
            FileExpectation::new("flair_series", "anat/*_FLAIR.nii.gz", 235),
            FileExpectation::new("bold_series", "func/*_bold.nii.gz", 850),
            FileExpectation::new("sbref_series", "func/*_sbref.nii.gz", 88),
            FileExpectation::new("dwi_series", "dwi/*_dwi.nii.gz", 613),
            FileExpectation::new("lesion_masks", "anat/*_desc-lesion_mask.nii.gz", 228)
                .in_dir("derivatives/lesion_masks"),
        ],
        archive: None,
    }
}

/// Validate an ARC download rooted at `root`.
///
/// # Errors
///
/// Propagates setup errors from [`validate_dataset`].
pub fn validate_arc_download(root: &Path) -> Result<ValidationResult> {
    validate_arc_with_config(root, &arc_validation_config())
}

/// Validate an ARC download against an adjusted contract.
///
/// # Errors
///
/// Propagates setup errors from [`validate_dataset`].
pub fn validate_arc_with_config(
    root: &Path,
    config: &DatasetValidationConfig,
) -> Result<ValidationResult> {
    let mut result = validate_dataset(root, config)?;
    result.add(check_participants_table(
        root,
        config.expected_subjects.unwrap_or(ARC_EXPECTED_SUBJECTS),
    ));
    Ok(result)
}

/// Check that `participants.tsv` parses and lists `expected_subjects` rows.
pub fn check_participants_table(root: &Path, expected_subjects: usize) -> ValidationCheck {
    let path = root.join("participants.tsv");
    let expected = format!("{expected_subjects} participant rows");
    match count_tsv_rows(&path) {
        Ok(rows) => ValidationCheck::new(
            "participants_table",
            expected,
            format!("{rows} participant rows"),
            rows == expected_subjects,
        ),
        Err(error) => {
            warn!("Could not parse {}: {}", path.display(), error);
            ValidationCheck::new("participants_table", expected, format!("read error: {error}"), false)
                .with_details(format!("could not parse {}", path.display()))
        }
    }
}
