//! Error types for AssertForge

use thiserror::Error;

use crate::expression::{BuilderState, Step};

/// Signals raised by an assertion.
///
/// Every variant unwinds the current test; none of them is recovered inside
/// this crate. Only `AssertionFailed` means the actual value was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssertError {
    /// The actual value did not satisfy the resolved constraint.
    #[error("{0}")]
    AssertionFailed(String),

    /// The test asked to stop early with a passing result.
    #[error("Test passed: {0}")]
    PassedEarly(String),

    /// The test asked to be reported as ignored.
    #[error("Test ignored: {0}")]
    Ignored(String),

    /// The test could not reach a verdict.
    #[error("Test inconclusive: {0}")]
    Inconclusive(String),

    /// The expression could not be turned into a single constraint.
    #[error("Malformed constraint expression: {0}")]
    BuilderMalformed(#[from] BuildError),

    /// The user message template could not be formatted.
    #[error("Message format error: {0}")]
    Format(#[from] FormatError),
}

impl AssertError {
    /// Returns the message carried by the signal.
    pub fn message(&self) -> String {
        match self {
            AssertError::AssertionFailed(m)
            | AssertError::PassedEarly(m)
            | AssertError::Ignored(m)
            | AssertError::Inconclusive(m) => m.clone(),
            AssertError::BuilderMalformed(e) => e.to_string(),
            AssertError::Format(e) => e.to_string(),
        }
    }

    /// Returns true for the `AssertionFailed` variant.
    pub fn is_failure(&self) -> bool {
        matches!(self, AssertError::AssertionFailed(_))
    }
}

/// A token stream that cannot be reduced to exactly one constraint.
///
/// These indicate a bug in the code building the expression, not a rejected
/// actual value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("expression has no tokens")]
    EmptyExpression,

    #[error("a partial expression may not be resolved")]
    Incomplete,

    #[error("`{step}` is not allowed {state} (token {position})")]
    IllegalStep {
        step: Step,
        state: BuilderState,
        position: usize,
    },

    #[error("operator `{operator}` found no operand to reduce")]
    OperandUnderflow { operator: &'static str },

    #[error("reduction left {operands} constraints instead of one")]
    Unreduced { operands: usize },
}

/// Failure to format a user message template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("placeholder {{{index}}} has no matching argument ({available} supplied)")]
    MissingArgument { index: usize, available: usize },

    #[error("invalid placeholder `{{{placeholder}}}` at byte {offset}")]
    InvalidPlaceholder { placeholder: String, offset: usize },

    #[error("unmatched `{brace}` at byte {offset}")]
    UnmatchedBrace { brace: char, offset: usize },
}

/// Result type alias for assertion operations
pub type Result<T> = std::result::Result<T, AssertError>;
