//! Linear-system solving and keylog assembly
//!
//! Parses N comma-joined coefficient rows (N in {2,3,4}), classifies the
//! system via rank and determinant, and independently encodes the raw
//! coefficient strings into a keylog. Solving and encoding are separate
//! passes over the same raw strings so neither can contaminate the other.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::eval::Evaluator;
use crate::rewrite;
use crate::{linalg, KeylogError, KeylogResult};

const DET_TOL: f64 = 1.0e-10;
const INTEGER_TOL: f64 = 1.0e-10;
const VARIABLE_NAMES: [&str; 4] = ["x", "y", "z", "t"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquationRequest {
    /// Operation label carrying the variable count as a substring,
    /// e.g. "Giải hệ 3 ẩn".
    #[serde(alias = "operationLabel")]
    pub operation: String,
    pub equations: Vec<String>,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SolutionKind {
    Unique,
    Infinite,
    None,
}

#[derive(Debug, Clone, Serialize)]
pub struct EquationReport {
    pub keylog: String,
    pub solution: String,
    pub encoded_coefficients: Vec<String>,
    pub rank_a: usize,
    pub rank_augmented: usize,
    pub determinant: f64,
    pub kind: SolutionKind,
    /// (variable name, value) pairs, present only for unique solutions.
    pub values: Vec<(String, f64)>,
    pub variables: usize,
    pub version: String,
    pub timestamp: String,
}

/// Variable count extracted from the operation label by substring match
/// ("2 ẩn", "3 ẩn", "4 ẩn"). No match defaults to 2.
pub fn variable_count(label: &str) -> usize {
    for n in [4usize, 3, 2] {
        if label.contains(&format!("{} ẩn", n)) {
            return n;
        }
    }
    2
}

pub fn process(
    catalog: &Catalog,
    evaluator: &Evaluator,
    request: &EquationRequest,
) -> KeylogResult<EquationReport> {
    let variables = variable_count(&request.operation);
    if request.equations.len() < variables {
        return Err(KeylogError::InsufficientEquations {
            needed: variables,
            got: request.equations.len(),
        });
    }
    let version = request
        .version
        .clone()
        .unwrap_or_else(|| catalog.default_version.clone());

    // Raw strings padded to variables+1 entries per row; the solver and the
    // encoder both consume these.
    let mut rows: Vec<Vec<String>> = Vec::with_capacity(variables);
    for equation in request.equations.iter().take(variables) {
        let mut entries: Vec<String> = equation.split(',').map(|e| e.trim().to_string()).collect();
        while entries.len() < variables + 1 {
            entries.push("0".to_string());
        }
        entries.truncate(variables + 1);
        rows.push(entries);
    }

    let a = DMatrix::from_fn(variables, variables, |r, c| evaluator.evaluate(&rows[r][c]));
    let b = DVector::from_fn(variables, |r, _| evaluator.evaluate(&rows[r][variables]));

    let rank_a = linalg::rank(&a);
    let augmented = {
        let mut m = DMatrix::zeros(variables, variables + 1);
        m.view_mut((0, 0), (variables, variables)).copy_from(&a);
        m.set_column(variables, &b);
        m
    };
    let rank_augmented = linalg::rank(&augmented);
    let determinant = linalg::determinant(&a);

    let (kind, solution, values) = if determinant.abs() > DET_TOL {
        let x = linalg::solve(&a, &b)?;
        let values: Vec<(String, f64)> = x
            .iter()
            .enumerate()
            .map(|(i, &v)| (VARIABLE_NAMES[i].to_string(), v))
            .collect();
        let rendered = values
            .iter()
            .map(|(name, v)| format!("{} = {}", name, render_value(*v)))
            .collect::<Vec<_>>()
            .join("; ");
        (SolutionKind::Unique, rendered, values)
    } else if rank_a == rank_augmented {
        (
            SolutionKind::Infinite,
            "Infinitely many solutions".to_string(),
            Vec::new(),
        )
    } else {
        (
            SolutionKind::None,
            "No solution (inconsistent)".to_string(),
            Vec::new(),
        )
    };

    let encoded_coefficients: Vec<String> = rows
        .iter()
        .flat_map(|row| row.iter())
        .map(|raw| encode_coefficient(catalog, raw))
        .collect();
    let prefix = catalog.equation_prefix(variables, &version);
    let keylog = format!("{}{}=", prefix, encoded_coefficients.join("="));

    Ok(EquationReport {
        keylog,
        solution,
        encoded_coefficients,
        rank_a,
        rank_augmented,
        determinant,
        kind,
        values,
        variables,
        version,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Solution components within `INTEGER_TOL` of an integer render as that
/// integer, everything else with 4 decimal places.
fn render_value(v: f64) -> String {
    let rounded = v.round();
    if (v - rounded).abs() <= INTEGER_TOL {
        format!("{}", rounded as i64)
    } else {
        format!("{:.4}", v)
    }
}

/// Empty coefficient strings encode as the `0` keystroke, keeping the keylog
/// slot count aligned with the matrix. The sqrt collapse pre-pass is a
/// geometry-only normalization; here the rule table alone decides.
fn encode_coefficient(catalog: &Catalog, raw: &str) -> String {
    if raw.trim().is_empty() {
        return "0".to_string();
    }
    let options = rewrite::EncodeOptions {
        support_sqrt_paren: false,
        ..catalog.encoding.clone()
    };
    rewrite::encode(raw, &catalog.equation_rules, &options)
}
