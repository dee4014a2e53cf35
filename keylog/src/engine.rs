use std::path::Path;

use crate::batch::{self, BatchOutcome};
use crate::catalog::Catalog;
use crate::config::ConfigLoader;
use crate::equation::{self, EquationReport, EquationRequest};
use crate::eval::Evaluator;
use crate::geometry::{self, GeometryRequest, GeometryResult, ValidationReport};
use crate::polynomial::{self, PolynomialReport, PolynomialRequest};
use crate::rewrite;
use crate::template::{self, EquationTemplate, ShapeTemplate};
use crate::KeylogResult;

/// Which mapping-rule table an encode call runs through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    Geometry,
    Equation,
    Polynomial,
}

/// The keylog encoding engine.
///
/// Holds the read-only configuration snapshot and the numeric evaluator
/// derived from it. Every processing call is a pure function of the
/// request; the engine itself is never mutated and is safe to share
/// across threads.
pub struct Engine {
    catalog: Catalog,
    evaluator: Evaluator,
}

impl Default for Engine {
    fn default() -> Self {
        Self::with_catalog(Catalog::default())
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(catalog: Catalog) -> Self {
        let evaluator = Evaluator::from_catalog(&catalog);
        Self { catalog, evaluator }
    }

    /// Load configuration from a directory of JSON files; missing files
    /// keep their compiled-in defaults.
    pub fn from_config_dir(dir: impl AsRef<Path>) -> Self {
        Self::with_catalog(ConfigLoader::new(dir.as_ref()).load())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Encode a single expression through one domain's rule table. The
    /// sqrt collapse pre-pass applies to the geometry domain only.
    pub fn encode(&self, input: &str, domain: Domain) -> String {
        let rules = match domain {
            Domain::Geometry => &self.catalog.geometry_rules,
            Domain::Equation => &self.catalog.equation_rules,
            Domain::Polynomial => &self.catalog.polynomial_rules,
        };
        let mut options = self.catalog.encoding.clone();
        if domain != Domain::Geometry {
            options.support_sqrt_paren = false;
        }
        rewrite::encode(input, rules, &options)
    }

    /// Evaluate a coefficient expression numerically (lenient mode).
    pub fn evaluate_number(&self, expr: &str) -> f64 {
        self.evaluator.evaluate(expr)
    }

    /// Evaluate a coefficient expression, surfacing failures.
    pub fn evaluate_number_strict(&self, expr: &str) -> KeylogResult<f64> {
        self.evaluator.evaluate_strict(expr)
    }

    pub fn validate_geometry(&self, request: &GeometryRequest) -> ValidationReport {
        geometry::validate(&self.catalog, request)
    }

    pub fn process_geometry(&self, request: &GeometryRequest) -> KeylogResult<GeometryResult> {
        geometry::process(&self.catalog, request)
    }

    pub fn process_geometry_batch(&self, requests: &[GeometryRequest]) -> BatchOutcome<GeometryResult> {
        batch::run(requests, |request| geometry::process(&self.catalog, request))
    }

    pub fn process_equation(&self, request: &EquationRequest) -> KeylogResult<EquationReport> {
        equation::process(&self.catalog, &self.evaluator, request)
    }

    pub fn process_equation_batch(&self, requests: &[EquationRequest]) -> BatchOutcome<EquationReport> {
        batch::run(requests, |request| {
            equation::process(&self.catalog, &self.evaluator, request)
        })
    }

    pub fn process_polynomial(&self, request: &PolynomialRequest) -> KeylogResult<PolynomialReport> {
        polynomial::process(&self.catalog, &self.evaluator, request)
    }

    pub fn process_polynomial_batch(
        &self,
        requests: &[PolynomialRequest],
    ) -> BatchOutcome<PolynomialReport> {
        batch::run(requests, |request| {
            polynomial::process(&self.catalog, &self.evaluator, request)
        })
    }

    pub fn shapes(&self) -> Vec<String> {
        self.catalog.shape_names()
    }

    pub fn operations(&self) -> Vec<String> {
        self.catalog.operation_names()
    }

    pub fn shapes_for_operation(&self, operation: &str) -> Vec<String> {
        self.catalog.shapes_for_operation(operation)
    }

    pub fn shape_templates(&self) -> Vec<ShapeTemplate> {
        template::shape_templates(&self.catalog)
    }

    pub fn equation_templates(&self) -> Vec<EquationTemplate> {
        template::equation_templates()
    }
}
