//! Integration tests for dataset validation against on-disk BIDS fixtures.

use std::path::{Path, PathBuf};

use bids_validate::datasets::arc::validate_arc_download;
use bids_validate::datasets::isles24::{
    ISLES24_EXPECTED_SUBJECTS, isles24_validation_config, validate_isles24_download,
};
use bids_validate::{
    ArchiveSpec, DatasetValidationConfig, FileExpectation, compute_file_md5, validate_dataset,
};
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &[u8]) -> PathBuf {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, content).unwrap();
    path
}

fn t1w_config(expected: usize) -> DatasetValidationConfig {
    DatasetValidationConfig {
        name: "mini".to_string(),
        description: "two-subject fixture".to_string(),
        required_files: vec![
            "dataset_description.json".to_string(),
            "participants.tsv".to_string(),
        ],
        expected_subjects: Some(2),
        expectations: vec![
            FileExpectation::new("t1w_series", "anat/*_T1w.nii.gz", expected),
            FileExpectation::new("bold_series", "func/*_bold.nii.gz", 1),
        ],
        archive: None,
    }
}

fn mini_dataset(root: &Path) {
    write(root, "dataset_description.json", br#"{"Name": "mini", "BIDSVersion": "1.8.0"}"#);
    write(root, "participants.tsv", b"participant_id\nsub-01\nsub-02\n");
    write(root, "sub-01/ses-1/anat/sub-01_ses-1_T1w.nii.gz", b"nifti");
    write(root, "sub-02/ses-1/anat/sub-02_ses-1_T1w.nii.gz", b"nifti");
    write(root, "sub-02/ses-1/func/sub-02_ses-1_task-rest_bold.nii.gz", b"nifti");
}

#[test]
fn test_count_shortfall_fails_one_check_and_runs_the_rest() {
    let dir = TempDir::new().unwrap();
    mini_dataset(dir.path());

    let result = validate_dataset(dir.path(), &t1w_config(3)).unwrap();

    let failed: Vec<_> = result.failures().collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].name(), "t1w_series");
    assert_eq!(failed[0].expected(), "3");
    assert_eq!(failed[0].actual(), "2");

    let names: Vec<&str> = result.checks().iter().map(|c| c.name()).collect();
    assert_eq!(
        names,
        vec![
            "dataset_description.json",
            "participants.tsv",
            "subjects",
            "t1w_series",
            "bold_series",
            "zero_byte_files"
        ]
    );
    assert_eq!(result.passed_count() + result.failed_count(), result.len());
}

#[test]
fn test_complete_dataset_passes() {
    let dir = TempDir::new().unwrap();
    mini_dataset(dir.path());

    let result = validate_dataset(dir.path(), &t1w_config(2)).unwrap();

    assert!(result.all_passed(), "{}", result.summary());
    assert!(result.summary().ends_with("Data is ready for HF push."));
}

#[test]
fn test_zero_byte_series_reported_with_counts_intact() {
    let dir = TempDir::new().unwrap();
    mini_dataset(dir.path());
    write(dir.path(), "sub-01/ses-1/anat/sub-01_ses-1_T1w.nii.gz", b"");

    let result = validate_dataset(dir.path(), &t1w_config(2)).unwrap();

    assert_eq!(result.failed_count(), 1);
    let zero = result.failures().next().unwrap();
    assert_eq!(zero.name(), "zero_byte_files");
    assert!(zero.details().contains("sub-01_ses-1_T1w.nii.gz"));
}

#[test]
fn test_truncated_required_file_is_zero_byte() {
    let dir = TempDir::new().unwrap();
    mini_dataset(dir.path());
    write(dir.path(), "dataset_description.json", b"");

    let result = validate_dataset(dir.path(), &t1w_config(2)).unwrap();

    assert_eq!(result.failed_count(), 1);
    let zero = result.failures().next().unwrap();
    assert_eq!(zero.name(), "zero_byte_files");
    assert!(zero.actual().starts_with("1 zero-byte files (of 5 checked)"));
    assert!(zero.details().contains("dataset_description.json"));
}

#[test]
fn test_missing_root_fails_every_required_check() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("ds-not-downloaded");

    let result = validate_dataset(&root, &t1w_config(2)).unwrap();

    for check in result.checks().iter().filter(|c| c.name() != "zero_byte_files") {
        assert!(!check.passed(), "{} should fail", check.name());
        assert_eq!(check.actual(), "0");
    }
    assert!(result.summary().contains("checks failed"));
}

#[test]
fn test_archive_checksum_against_custom_config() {
    let dir = TempDir::new().unwrap();
    mini_dataset(dir.path());
    let archive = write(dir.path(), "mini.tar", b"archive bytes");

    let mut config = t1w_config(2);
    config.archive = Some(ArchiveSpec {
        path: PathBuf::from("mini.tar"),
        md5: compute_file_md5(&archive).unwrap().to_uppercase(),
        size_bytes: Some(13),
    });

    let result = validate_dataset(dir.path(), &config).unwrap();
    assert!(result.all_passed(), "{}", result.summary());

    std::fs::write(&archive, b"archive bytez").unwrap();
    let result = validate_dataset(dir.path(), &config).unwrap();
    let failed: Vec<_> = result.failures().map(|c| c.name()).collect();
    assert_eq!(failed, vec!["md5:mini.tar"]);
}

#[test]
fn test_arc_missing_root() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("ds004884");

    let result = validate_arc_download(&root).unwrap();

    assert!(!result.all_passed());
    let required = &result.checks()[..3];
    assert!(required.iter().all(|c| !c.passed() && c.actual() == "0"));
    assert_eq!(result.checks().last().unwrap().name(), "participants_table");
}

/// Build a complete ISLES'24 tree with tiny placeholder images.
fn isles24_dataset(root: &Path) {
    write(root, "dataset_description.json", br#"{"Name": "ISLES 2024"}"#);
    let mut participants = String::from("participant_id\n");
    for i in 1..=ISLES24_EXPECTED_SUBJECTS {
        let sub = format!("sub-stroke{i:04}");
        participants.push_str(&sub);
        participants.push('\n');
        for modality in ["ncct", "cta", "ctp"] {
            write(
                root,
                &format!("{sub}/ses-01/{sub}_ses-01_{modality}.nii.gz"),
                b"nifti",
            );
        }
        for map in ["tmax", "mtt", "cbf", "cbv"] {
            write(
                root,
                &format!("derivatives/{sub}/ses-01/perfusion-maps/{sub}_ses-01_{map}.nii.gz"),
                b"nifti",
            );
        }
        write(
            root,
            &format!("derivatives/{sub}/ses-02/{sub}_ses-02_lesion-msk.nii.gz"),
            b"nifti",
        );
    }
    write(root, "participants.tsv", participants.as_bytes());
    write(
        root,
        "phenotype/clinical_baseline.tsv",
        b"participant_id\tnihss_admission\nsub-stroke0001\t12\n",
    );
}

#[test]
fn test_isles24_complete_tree_fails_only_on_archive() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("train");
    isles24_dataset(&root);
    write(dir.path(), "train.7z", b"not the published archive");

    let result = validate_isles24_download(&root).unwrap();

    let failed: Vec<_> = result.failures().map(|c| c.name()).collect();
    assert_eq!(failed, vec!["md5:train.7z"], "{}", result.summary());
    assert_eq!(result.checks().last().unwrap().name(), "phenotype_readable");
    // required files, subjects, 8 expectations, zero-byte, md5, phenotype
    assert_eq!(result.len(), 2 + 1 + 8 + 1 + 1 + 1);
    assert_eq!(isles24_validation_config().expectations.len(), 8);
}
