//! Reusable check primitives.
//!
//! Every primitive returns a [`ValidationCheck`]; filesystem problems are
//! reported as failed checks and never propagated.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::checksum::{compute_file_md5, normalize_digest};
use crate::result::ValidationCheck;

/// Compare the number of discovered items to an expected count.
pub fn check_count<T>(
    name: &str,
    expected_count: usize,
    actual_items: &[T],
    details: &str,
) -> ValidationCheck {
    let actual = actual_items.len();
    let passed = actual == expected_count;
    if !passed {
        warn!("{name}: expected {expected_count}, found {actual}");
    }
    ValidationCheck::new(name, expected_count.to_string(), actual.to_string(), passed)
        .with_details(details)
}

/// Fail if any of `paths` is an empty file, listing every offender.
pub fn check_zero_byte_files(paths: &[PathBuf]) -> ValidationCheck {
    let mut zero_byte = Vec::new();
    let mut unreadable = Vec::new();

    for path in paths {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() == 0 => zero_byte.push(path.display().to_string()),
            Ok(_) => {}
            Err(error) => {
                warn!("Could not stat {}: {}", path.display(), error);
                unreadable.push(format!("{} ({error})", path.display()));
            }
        }
    }

    let mut details = Vec::new();
    if !zero_byte.is_empty() {
        details.push(zero_byte.join(", "));
    }
    if !unreadable.is_empty() {
        details.push(format!("unreadable: {}", unreadable.join(", ")));
    }

    let passed = zero_byte.is_empty();
    if !passed {
        warn!("{} zero-byte file(s) found", zero_byte.len());
    }
    ValidationCheck::new(
        "zero_byte_files",
        "0 zero-byte files",
        format!("{} zero-byte files (of {} checked)", zero_byte.len(), paths.len()),
        passed,
    )
    .with_details(details.join("; "))
}

/// Verify a file's MD5 digest against `expected_hex_digest`.
///
/// The comparison is case-insensitive. A missing or unreadable file yields a
/// failed check whose `actual` describes the read error.
pub fn verify_md5(path: &Path, expected_hex_digest: &str) -> ValidationCheck {
    let name = format!("md5:{}", display_name(path));
    let expected = normalize_digest(expected_hex_digest);

    match compute_file_md5(path) {
        Ok(actual) => {
            let passed = actual == expected;
            if passed {
                debug!("MD5 verified for {}", path.display());
            } else {
                warn!("MD5 mismatch for {}: expected {expected}, got {actual}", path.display());
            }
            let check = ValidationCheck::new(name, expected, actual, passed);
            if passed {
                check
            } else {
                check.with_details(format!("checksum mismatch for {}", path.display()))
            }
        }
        Err(error) => {
            warn!("Could not read {} for MD5: {}", path.display(), error);
            ValidationCheck::new(name, expected, format!("read error: {error}"), false)
                .with_details(format!("could not read {}", path.display()))
        }
    }
}

/// Compare a file's size in bytes to `expected_bytes`.
pub fn check_file_size(path: &Path, expected_bytes: u64) -> ValidationCheck {
    let name = format!("size:{}", display_name(path));
    match std::fs::metadata(path) {
        Ok(meta) => {
            let actual = meta.len();
            let check = ValidationCheck::new(
                name,
                format!("{expected_bytes} bytes"),
                format!("{actual} bytes"),
                actual == expected_bytes,
            );
            if actual < expected_bytes {
                check.with_details("file is smaller than expected; download may be incomplete")
            } else {
                check
            }
        }
        Err(error) => ValidationCheck::new(
            name,
            format!("{expected_bytes} bytes"),
            format!("read error: {error}"),
            false,
        )
        .with_details(format!("could not read {}", path.display())),
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}
