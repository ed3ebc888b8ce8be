//! Key-validation outcomes and the vendor's reason constants.

use serde::{Deserialize, Serialize};

/// Reason constant attached to an invalid key-validation result.
///
/// The vendor reports a machine-readable constant alongside the
/// human-readable detail. Constants the relay does not recognize are
/// preserved verbatim in [`ValidationCode::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ValidationCode {
    /// Key is valid for a different fingerprint scope.
    FingerprintScopeMismatch,
    /// License has no machine activations yet.
    NoMachines,
    /// License has no machine activation matching the scope.
    NoMachine,
    /// Any other vendor constant, e.g. `EXPIRED` or `SUSPENDED`.
    Other(String),
}

impl ValidationCode {
    /// Whether an invalid result with this constant should still be allowed
    /// to activate a machine.
    ///
    /// A license with no activations yet, or one that is not node-locked,
    /// reports one of these constants; activation is the step that resolves
    /// them, so they must not block it.
    #[must_use]
    pub fn allows_activation(&self) -> bool {
        matches!(
            self,
            Self::FingerprintScopeMismatch | Self::NoMachines | Self::NoMachine
        )
    }

    /// The vendor's wire spelling of this constant.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::FingerprintScopeMismatch => "FINGERPRINT_SCOPE_MISMATCH",
            Self::NoMachines => "NO_MACHINES",
            Self::NoMachine => "NO_MACHINE",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for ValidationCode {
    fn from(s: String) -> Self {
        match s.as_str() {
            "FINGERPRINT_SCOPE_MISMATCH" => Self::FingerprintScopeMismatch,
            "NO_MACHINES" => Self::NoMachines,
            "NO_MACHINE" => Self::NoMachine,
            _ => Self::Other(s),
        }
    }
}

impl From<ValidationCode> for String {
    fn from(code: ValidationCode) -> Self {
        code.as_str().to_owned()
    }
}

/// Result bundle from a single key-validation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct ValidationOutcome {
    /// Whether the vendor considers the key valid in the requested scope.
    pub valid: bool,
    /// Reason constant; typically absent when `valid` is true.
    pub code: Option<ValidationCode>,
    /// Human-readable detail, e.g. `is valid` or `is expired`.
    pub detail: String,
}

impl ValidationOutcome {
    #[must_use]
    pub fn new(valid: bool, code: Option<ValidationCode>, detail: impl Into<String>) -> Self {
        Self { valid, code, detail: detail.into() }
    }

    /// True when the result is invalid for a reason that must block
    /// activation. Soft failures (see [`ValidationCode::allows_activation`])
    /// do not count.
    #[must_use]
    pub fn blocks_activation(&self) -> bool {
        if self.valid {
            return false;
        }
        match &self.code {
            Some(code) => !code.allows_activation(),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn soft_failure_constants_allow_activation() {
        for raw in ["FINGERPRINT_SCOPE_MISMATCH", "NO_MACHINES", "NO_MACHINE"] {
            let code = ValidationCode::from(raw.to_owned());
            assert!(code.allows_activation(), "{raw} must be a soft failure");
        }
    }

    #[test]
    fn unknown_constants_are_hard_failures() {
        for raw in ["EXPIRED", "SUSPENDED", "NOT_FOUND", "OVERDUE"] {
            let code = ValidationCode::from(raw.to_owned());
            assert!(!code.allows_activation(), "{raw} must be a hard failure");
            assert_eq!(code.as_str(), raw, "unknown constants must round-trip verbatim");
        }
    }

    #[test]
    fn valid_outcome_never_blocks_activation() {
        let outcome = ValidationOutcome::new(true, None, "is valid");
        assert!(!outcome.blocks_activation());
    }

    #[test]
    fn invalid_outcome_with_soft_code_does_not_block() {
        let outcome = ValidationOutcome::new(
            false,
            Some(ValidationCode::NoMachines),
            "must have at least 1 associated machine",
        );
        assert!(!outcome.blocks_activation());
    }

    #[test]
    fn invalid_outcome_with_hard_code_blocks() {
        let outcome = ValidationOutcome::new(
            false,
            Some(ValidationCode::Other("EXPIRED".to_owned())),
            "is expired",
        );
        assert!(outcome.blocks_activation());
    }

    #[test]
    fn invalid_outcome_without_code_blocks() {
        let outcome = ValidationOutcome::new(false, None, "does not exist");
        assert!(outcome.blocks_activation());
    }
}
