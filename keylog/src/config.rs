//! External configuration loading
//!
//! Overlays JSON files from a config directory onto the compiled-in
//! catalog defaults. Every missing or malformed file falls back to the
//! default for that section with a warning; configuration problems are
//! never fatal.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::catalog::{
    Catalog, EquationPrefixes, EvalRewrites, OperationInfo, PolynomialTables, ShapeInfo,
    VersionInfo,
};
use crate::rewrite::{EncodeOptions, RewriteRule};

/// `versions.json` payload.
#[derive(Debug, Deserialize)]
struct VersionsFile {
    versions: Vec<VersionInfo>,
    #[serde(default)]
    default_version: Option<String>,
}

/// `mapping_rules.json` payload: one rule table per domain.
#[derive(Debug, Deserialize)]
struct MappingRulesFile {
    #[serde(default)]
    geometry: Option<Vec<RewriteRule>>,
    #[serde(default)]
    equation: Option<Vec<RewriteRule>>,
    #[serde(default)]
    polynomial: Option<Vec<RewriteRule>>,
    #[serde(default)]
    encoding: Option<EncodeOptions>,
}

pub struct ConfigLoader {
    dir: PathBuf,
}

impl ConfigLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Build a catalog from the config directory, section by section.
    pub fn load(&self) -> Catalog {
        let mut catalog = Catalog::default();

        if let Some(shapes) = self.section::<Vec<ShapeInfo>>("shapes.json") {
            catalog.shapes = shapes;
        }
        if let Some(operations) = self.section::<Vec<OperationInfo>>("operations.json") {
            catalog.operations = operations;
        }
        if let Some(versions) = self.section::<VersionsFile>("versions.json") {
            catalog.versions = versions.versions;
            if let Some(default) = versions.default_version {
                catalog.default_version = default;
            }
        }
        if let Some(rules) = self.section::<MappingRulesFile>("mapping_rules.json") {
            if let Some(geometry) = rules.geometry {
                catalog.geometry_rules = geometry;
            }
            if let Some(equation) = rules.equation {
                catalog.equation_rules = equation;
            }
            if let Some(polynomial) = rules.polynomial {
                catalog.polynomial_rules = polynomial;
            }
            if let Some(encoding) = rules.encoding {
                catalog.encoding = encoding;
            }
        }
        if let Some(prefixes) = self.section::<EquationPrefixes>("equation_prefixes.json") {
            catalog.equation_prefixes = prefixes;
        }
        if let Some(polynomial) = self.section::<PolynomialTables>("polynomial.json") {
            catalog.polynomial = polynomial;
        }
        if let Some(rewrites) = self.section::<EvalRewrites>("eval_rewrites.json") {
            catalog.eval_rewrites = rewrites;
        }

        catalog
    }

    fn section<T: serde::de::DeserializeOwned>(&self, file: &str) -> Option<T> {
        let path = self.dir.join(file);
        if !path.exists() {
            return None;
        }
        match read_json(&path) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(file = %path.display(), error = %err, "config file ignored, using defaults");
                None
            }
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, String> {
    let text = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    serde_json::from_str(&text).map_err(|e| e.to_string())
}
