//! Integrity validation for downloaded BIDS datasets.
//!
//! Before a local copy of a neuroimaging dataset is pushed to a dataset hub,
//! this crate checks that it is complete and uncorrupted: expected file
//! counts per modality, no zero-byte files, and a matching archive checksum.
//!
//! # Features
//!
//! - **File Discovery**: glob search under a BIDS tree with a strict
//!   "exactly one match" helper
//! - **Check Primitives**: count, zero-byte and MD5 checks that report
//!   failures as data, never as errors
//! - **Validation Result**: ordered outcomes with a fixed-format summary
//! - **Dataset Families**: built-in contracts for ARC and ISLES'24, plus
//!   TOML-defined custom families
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use bids_validate::datasets::arc::validate_arc_download;
//!
//! let result = validate_arc_download(Path::new("data/openneuro/ds004884"))?;
//! println!("{}", result.summary());
//! if !result.all_passed() {
//!     std::process::exit(1);
//! }
//! ```

mod checks;
mod checksum;
mod config;
pub mod datasets;
mod discovery;
mod engine;
mod error;
mod pattern;
mod result;

// === Error Types ===
pub use error::{Result, ValidateError};

// === Result Model ===
pub use result::{ValidationCheck, ValidationResult};

// === Check Primitives ===
pub use checks::{check_count, check_file_size, check_zero_byte_files, verify_md5};
pub use checksum::{compute_file_md5, is_md5_hex};

// === File Discovery ===
pub use discovery::{find_all_niftis, find_files, find_single_nifti, list_subject_dirs};
pub use pattern::FilePattern;

// === Configuration ===
pub use config::{ArchiveSpec, DatasetValidationConfig, FileExpectation};

// === Validation Driver ===
pub use engine::validate_dataset;

// === Dataset Families ===
pub use datasets::DatasetFamily;
