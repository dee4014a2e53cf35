//! # Keylog Engine
//!
//! Converts symbolic mathematical objects — points, lines, planes, circles,
//! spheres, linear-equation systems, and polynomials expressed as LaTeX-like
//! coefficient strings — into calculator keystroke sequences ("keylogs"),
//! and independently solves the same inputs so callers can display the
//! answer alongside the keylog.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use keylog::{Engine, EquationRequest};
//!
//! let engine = Engine::new();
//! let report = engine.process_equation(&EquationRequest {
//!     operation: "Giải hệ 2 ẩn".to_string(),
//!     equations: vec!["1,0,5".to_string(), "0,1,3".to_string()],
//!     version: None,
//! })?;
//! assert_eq!(report.solution, "x = 5; y = 3");
//! # Ok::<(), keylog::KeylogError>(())
//! ```
//!
//! ## Core Concepts
//!
//! ### Keylogs
//! A keylog is a literal keystroke string that reproduces a computation on
//! a target calculator model. The token grammar (`C`, `R`, `=` separators,
//! mode prefixes) is an opaque but load-bearing wire format.
//!
//! ### Rewrite rules
//! Ordered find/replace rules (literal or regex) translate LaTeX-like
//! notation into keystroke tokens. Order matters and is never changed by
//! the engine.
//!
//! ### Solving vs. encoding
//! Encoding stays purely textual; solving evaluates coefficients
//! numerically in a restricted sandbox. The two paths never contaminate
//! each other's output.

pub mod batch;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod equation;
pub mod error;
pub mod eval;
pub mod geometry;
pub mod linalg;
pub mod polynomial;
pub mod rewrite;
pub mod rows;
pub mod template;

pub use batch::{BatchError, BatchOutcome};
pub use catalog::{Catalog, CoefficientOrder, OperationInfo, ShapeInfo, VersionInfo};
pub use config::ConfigLoader;
pub use engine::{Domain, Engine};
pub use equation::{EquationReport, EquationRequest, SolutionKind};
pub use error::KeylogError;
pub use eval::Evaluator;
pub use geometry::{GeometryRequest, GeometryResult, ValidationReport};
pub use polynomial::{PolynomialReport, PolynomialRequest, RootValue};
pub use rewrite::{encode, EncodeOptions, RewriteRule, RuleKind};
pub use template::{EquationTemplate, ShapeTemplate};

/// Result type for keylog operations
pub type KeylogResult<T> = Result<T, KeylogError>;

#[cfg(test)]
mod tests;
