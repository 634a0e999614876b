//! Check outcomes and the per-run validation result.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

const RULE: &str = "============================================================";

/// Outcome of a single evaluated rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationCheck {
    name: String,
    expected: String,
    actual: String,
    passed: bool,
    details: String,
}

impl ValidationCheck {
    /// Create a check outcome with no details.
    pub fn new(
        name: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
        passed: bool,
    ) -> Self {
        let name = name.into();
        debug_assert!(!name.is_empty(), "check name must not be empty");
        Self {
            name,
            expected: expected.into(),
            actual: actual.into(),
            passed,
            details: String::new(),
        }
    }

    /// Attach free-text details.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn expected(&self) -> &str {
        &self.expected
    }

    pub fn actual(&self) -> &str {
        &self.actual
    }

    pub fn passed(&self) -> bool {
        self.passed
    }

    /// Details text; empty when there is nothing to add.
    pub fn details(&self) -> &str {
        &self.details
    }
}

/// All check outcomes for one validation run, in evaluation order.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    root: PathBuf,
    checks: Vec<ValidationCheck>,
}

impl ValidationResult {
    /// Start an empty result for `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            checks: Vec::new(),
        }
    }

    /// Append a check outcome.
    pub fn add(&mut self, check: ValidationCheck) {
        self.checks.push(check);
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn checks(&self) -> &[ValidationCheck] {
        &self.checks
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// True when every check passed (vacuously true for no checks).
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(ValidationCheck::passed)
    }

    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|check| check.passed).count()
    }

    pub fn failed_count(&self) -> usize {
        self.checks.iter().filter(|check| !check.passed).count()
    }

    /// Failed checks, in evaluation order.
    pub fn failures(&self) -> impl Iterator<Item = &ValidationCheck> {
        self.checks.iter().filter(|check| !check.passed)
    }

    /// Render the human-readable report.
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("Validation Results for: {}", self.root.display()),
            RULE.to_string(),
        ];
        for check in &self.checks {
            let status = if check.passed { "✅ PASS" } else { "❌ FAIL" };
            lines.push(format!("{status} {}", check.name));
            lines.push(format!("       Expected: {}", check.expected));
            lines.push(format!("       Actual:   {}", check.actual));
            if !check.details.is_empty() {
                lines.push(format!("       Details:  {}", check.details));
            }
        }

        lines.push(RULE.to_string());
        if self.all_passed() {
            lines.push("✅ All validations passed! Data is ready for HF push.".to_string());
        } else {
            lines.push(format!(
                "❌ {}/{} checks failed. Check download or wait for completion.",
                self.failed_count(),
                self.checks.len()
            ));
        }
        lines.join("\n")
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}
