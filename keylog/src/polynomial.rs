//! Polynomial keylog assembly and root finding

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, CoefficientOrder};
use crate::eval::Evaluator;
use crate::rewrite;
use crate::{linalg, KeylogError, KeylogResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolynomialRequest {
    /// Degree key into the catalog's degree table, e.g. "2".
    pub degree: String,
    pub coefficients: Vec<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub solve: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RootValue {
    pub re: f64,
    pub im: f64,
    pub display: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PolynomialReport {
    pub keylog: String,
    pub encoded_coefficients: Vec<String>,
    pub degree: String,
    pub version: String,
    /// Present only when solving was requested.
    pub roots: Option<Vec<RootValue>>,
    pub timestamp: String,
}

pub fn process(
    catalog: &Catalog,
    evaluator: &Evaluator,
    request: &PolynomialRequest,
) -> KeylogResult<PolynomialReport> {
    let degree = catalog
        .degree(&request.degree)
        .ok_or_else(|| KeylogError::UnsupportedDegree(request.degree.clone()))?;
    let version = request
        .version
        .clone()
        .unwrap_or_else(|| catalog.default_version.clone());

    let mut coefficients = request.coefficients.clone();
    while coefficients.len() < degree.coefficients {
        coefficients.push("0".to_string());
    }
    coefficients.truncate(degree.coefficients);

    // No sqrt collapse pre-pass outside geometry; the rule table alone
    // decides the encoding.
    let options = rewrite::EncodeOptions {
        support_sqrt_paren: false,
        ..catalog.encoding.clone()
    };
    let encoded_coefficients: Vec<String> = coefficients
        .iter()
        .map(|raw| {
            if raw.trim().is_empty() {
                "0".to_string()
            } else {
                rewrite::encode(raw, &catalog.polynomial_rules, &options)
            }
        })
        .collect();
    let prefix = catalog.polynomial_prefix(&request.degree, &version);
    let keylog = format!(
        "{}{}{}=",
        prefix,
        encoded_coefficients.join("="),
        catalog.polynomial.suffix
    );

    let roots = if request.solve {
        let mut numeric: Vec<f64> = coefficients.iter().map(|c| evaluator.evaluate(c)).collect();
        // The root finder wants highest-degree-first.
        if degree.order == CoefficientOrder::LowestFirst {
            numeric.reverse();
        }
        let computed = linalg::polynomial_roots(&numeric)?;
        Some(computed.iter().map(format_root).collect())
    } else {
        None
    };

    Ok(PolynomialReport {
        keylog,
        encoded_coefficients,
        degree: request.degree.clone(),
        version,
        roots,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

fn format_root(z: &num_complex::Complex64) -> RootValue {
    let display = if linalg::is_real(z) {
        format!("{:.6}", z.re)
    } else if z.im < 0.0 {
        format!("{:.6} - {:.6}i", z.re, z.im.abs())
    } else {
        format!("{:.6} + {:.6}i", z.re, z.im)
    };
    RootValue {
        re: z.re,
        im: if linalg::is_real(z) { 0.0 } else { z.im },
        display,
    }
}
