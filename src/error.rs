use thiserror::Error;

/// Errors produced by the optimization core
///
/// The variants separate problems the caller can fix by changing arguments
/// or settings from numerical degeneracies of the problem data itself.
#[derive(Debug, Error)]
pub enum SgCoreError {
    /// The requested budget or settings are inconsistent
    #[error("invalid configuration: {0}")]
    Config(String),
    /// The problem instance is numerically degenerate
    #[error("numerical degeneracy: {0}")]
    Degenerate(String),
    /// Malformed input data
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
