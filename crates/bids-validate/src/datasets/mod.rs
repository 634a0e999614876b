//! Built-in dataset families.
//!
//! Each family contributes a [`DatasetValidationConfig`] and a thin entry
//! point that runs [`validate_dataset`](crate::validate_dataset) plus at most
//! one family-specific check.

pub mod arc;
pub mod isles24;

use std::fmt;
use std::path::Path;

use crate::config::DatasetValidationConfig;
use crate::error::{Result, ValidateError};
use crate::result::ValidationResult;

/// A dataset family with a built-in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFamily {
    /// Aphasia Recovery Cohort (OpenNeuro ds004884).
    Arc,
    /// ISLES'24 stroke lesion segmentation challenge.
    Isles24,
}

impl DatasetFamily {
    /// All built-in families.
    pub const ALL: [DatasetFamily; 2] = [DatasetFamily::Arc, DatasetFamily::Isles24];

    /// Short identifier used on the command line.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Arc => "arc",
            Self::Isles24 => "isles24",
        }
    }

    /// The family's completeness contract.
    #[must_use]
    pub fn config(&self) -> DatasetValidationConfig {
        match self {
            Self::Arc => arc::arc_validation_config(),
            Self::Isles24 => isles24::isles24_validation_config(),
        }
    }

    /// Run the family's validator, including its bespoke check.
    ///
    /// # Errors
    ///
    /// Propagates setup errors from [`crate::validate_dataset`].
    pub fn validate(&self, root: &Path) -> Result<ValidationResult> {
        match self {
            Self::Arc => arc::validate_arc_download(root),
            Self::Isles24 => isles24::validate_isles24_download(root),
        }
    }

    /// Run the family's validator with an adjusted contract, such as an
    /// archive stored somewhere else.
    ///
    /// # Errors
    ///
    /// Propagates setup errors from [`crate::validate_dataset`].
    pub fn validate_with(
        &self,
        root: &Path,
        config: &DatasetValidationConfig,
    ) -> Result<ValidationResult> {
        match self {
            Self::Arc => arc::validate_arc_with_config(root, config),
            Self::Isles24 => isles24::validate_isles24_with_config(root, config),
        }
    }
}

impl fmt::Display for DatasetFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse a BIDS tabular file and return its data row count.
///
/// The file must have a header row and consistent field counts.
pub(crate) fn count_tsv_rows(path: &Path) -> Result<usize> {
    let parse_error = |source| ValidateError::TableParse {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_path(path)
        .map_err(parse_error)?;

    let headers = reader.headers().map_err(parse_error)?;
    if headers.iter().all(str::is_empty) {
        return Err(ValidateError::TableHeader {
            path: path.to_path_buf(),
        });
    }

    let mut rows = 0;
    for record in reader.records() {
        record.map_err(parse_error)?;
        rows += 1;
    }
    Ok(rows)
}
