use std::fmt;

/// Error types for the keylog engine.
///
/// Validation errors stop processing for the affected item and are returned
/// to the caller as-is. Compute errors are failures inside the numeric path
/// (linear solve, eigenvalue extraction) that have been caught and converted
/// into a value; nothing in the engine panics on bad input.
#[derive(Debug, Clone, PartialEq)]
pub enum KeylogError {
    /// Missing required field, unknown operation/shape, or an
    /// operation/shape combination the catalog does not allow.
    Validation(String),

    /// Fewer equation rows were supplied than the declared variable count.
    InsufficientEquations { needed: usize, got: usize },

    /// The polynomial degree key is absent from the degree catalog.
    UnsupportedDegree(String),

    /// A numeric computation failed beyond the rank-based classification.
    Compute(String),

    /// A configuration value could not be applied.
    Config(String),

    /// An expression failed to evaluate. Only surfaced in strict mode;
    /// the lenient evaluator falls back to `0.0` instead.
    Eval(String),
}

impl KeylogError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn compute(message: impl Into<String>) -> Self {
        Self::Compute(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn eval(message: impl Into<String>) -> Self {
        Self::Eval(message.into())
    }
}

impl fmt::Display for KeylogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeylogError::Validation(msg) => write!(f, "Validation error: {}", msg),
            KeylogError::InsufficientEquations { needed, got } => write!(
                f,
                "Validation error: need at least {} equations, got {}",
                needed, got
            ),
            KeylogError::UnsupportedDegree(degree) => {
                write!(f, "Validation error: unsupported polynomial degree '{}'", degree)
            }
            KeylogError::Compute(msg) => write!(f, "Compute error: {}", msg),
            KeylogError::Config(msg) => write!(f, "Config error: {}", msg),
            KeylogError::Eval(msg) => write!(f, "Evaluation error: {}", msg),
        }
    }
}

impl std::error::Error for KeylogError {}
