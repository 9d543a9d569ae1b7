//! Guard failures.

use thiserror::Error;

/// A single guard check that did not hold.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct GuardViolation {
    message: String,
}

impl GuardViolation {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors raised by guard managers.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GuardError {
    #[error("cannot leave \"{place}\" through \"{transition}\": {}", render(.violations))]
    LeaveDenied {
        transition: String,
        place: String,
        violations: Vec<GuardViolation>,
    },

    #[error("cannot enter \"{place}\" through \"{transition}\": {}", render(.violations))]
    EnterDenied {
        transition: String,
        place: String,
        violations: Vec<GuardViolation>,
    },

    #[error("guard evaluation failed: {0}")]
    Evaluation(String),
}

impl GuardError {
    /// Violations carried by a leave or enter denial.
    pub fn violations(&self) -> &[GuardViolation] {
        match self {
            Self::LeaveDenied { violations, .. } | Self::EnterDenied { violations, .. } => {
                violations
            }
            Self::Evaluation(_) => &[],
        }
    }
}

fn render(violations: &[GuardViolation]) -> String {
    violations
        .iter()
        .map(GuardViolation::message)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denial_message_lists_every_violation() {
        let error = GuardError::EnterDenied {
            transition: "publish".into(),
            place: "published".into(),
            violations: vec![
                GuardViolation::new("title is missing"),
                GuardViolation::new("body is empty"),
            ],
        };

        assert_eq!(
            error.to_string(),
            "cannot enter \"published\" through \"publish\": title is missing, body is empty"
        );
        assert_eq!(error.violations().len(), 2);
    }

    #[test]
    fn evaluation_error_has_no_violations() {
        let error = GuardError::Evaluation("unknown variable".into());
        assert!(error.violations().is_empty());
    }
}
