//! Static shape/operation/version lookup tables
//!
//! All tables are read-only after load. The compiled-in defaults mirror the
//! shipped configuration files; [`crate::config::ConfigLoader`] overlays
//! externally supplied JSON on top of them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::rewrite::{EncodeOptions, RewriteRule};

/// Which slot of a dual-shape operation a shape occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    A,
    B,
}

/// Structural family of a shape. Drives how many numeric components each
/// raw field contributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Point,
    Line,
    Plane,
    Circle,
    Sphere,
}

/// A shape's data-entry mode code. Point is dimension-dependent; every
/// other shape uses a fixed per-group code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShapeCode {
    Fixed(String),
    PerDimension(HashMap<String, String>),
}

impl ShapeCode {
    pub fn resolve(&self, dimension: &str) -> String {
        match self {
            ShapeCode::Fixed(code) => code.clone(),
            ShapeCode::PerDimension(map) => map
                .get(dimension)
                .or_else(|| map.get("3"))
                .cloned()
                .unwrap_or_else(|| "00".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeInfo {
    pub name: String,
    pub kind: ShapeKind,
    /// Type codes: the shape's algebraic role in an operation.
    pub code_a: String,
    pub code_b: String,
    /// Data-entry mode codes.
    pub shape_code_a: ShapeCode,
    pub shape_code_b: ShapeCode,
    /// Required raw fields, in encoding order, per group.
    pub fields_a: Vec<String>,
    pub fields_b: Vec<String>,
}

impl ShapeInfo {
    pub fn type_code(&self, group: Group) -> &str {
        match group {
            Group::A => &self.code_a,
            Group::B => &self.code_b,
        }
    }

    pub fn shape_code(&self, group: Group) -> &ShapeCode {
        match group {
            Group::A => &self.shape_code_a,
            Group::B => &self.shape_code_b,
        }
    }

    pub fn fields(&self, group: Group) -> &[String] {
        match group {
            Group::A => &self.fields_a,
            Group::B => &self.fields_b,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationInfo {
    pub name: String,
    /// Operator keystroke code.
    pub code: String,
    #[serde(default)]
    pub requires_two_shapes: bool,
    /// Compatible shape names. `None` means every shape is allowed.
    #[serde(default)]
    pub compatible: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionInfo {
    pub name: String,
    /// Geometry mode prefix.
    pub prefix: String,
}

/// Equation mode prefixes: per-version tables with a global fallback,
/// both keyed by variable count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquationPrefixes {
    #[serde(default)]
    pub global_defaults: HashMap<String, String>,
    #[serde(default)]
    pub versions: HashMap<String, HashMap<String, String>>,
}

/// Order in which a degree entry's coefficients are supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoefficientOrder {
    #[default]
    HighestFirst,
    LowestFirst,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegreeInfo {
    /// Number of coefficients the calculator expects for this degree.
    pub coefficients: usize,
    #[serde(default)]
    pub order: CoefficientOrder,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolynomialTables {
    /// version -> degree -> prefix
    #[serde(default)]
    pub prefixes: HashMap<String, HashMap<String, String>>,
    /// degree -> prefix, used when the version table misses.
    #[serde(default)]
    pub default_prefixes: HashMap<String, String>,
    /// Appended after the joined coefficients; typically `"="`, which makes
    /// the keylog tail double-terminated. Preserved literally for
    /// compatibility with target hardware.
    pub suffix: String,
    pub degrees: HashMap<String, DegreeInfo>,
}

/// One word-boundary token translation for the numeric evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenRewrite {
    pub find: String,
    pub replace: String,
}

/// Rewrites feeding the numeric evaluator (not the keylog encoders).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalRewrites {
    /// Regex pre-pass for LaTeX forms, applied before token translation.
    pub latex: Vec<RewriteRule>,
    /// Token translations into evaluable syntax.
    pub tokens: Vec<TokenRewrite>,
}

impl Default for EvalRewrites {
    fn default() -> Self {
        Self {
            latex: vec![
                RewriteRule::regex(
                    r"\\?frac\{([^{}]+)\}\{([^{}]+)\}",
                    "((${1})/(${2}))",
                    "LaTeX fraction to division",
                ),
                RewriteRule::regex(r"\\sqrt\{([^{}]+)\}", "sqrt(${1})", "brace sqrt to call form"),
                RewriteRule::literal("\\pi", "pi", "LaTeX pi to bare constant"),
            ],
            tokens: vec![
                TokenRewrite {
                    find: "sqrt".into(),
                    replace: "math::sqrt".into(),
                },
                TokenRewrite {
                    find: "sin".into(),
                    replace: "math::sin".into(),
                },
                TokenRewrite {
                    find: "cos".into(),
                    replace: "math::cos".into(),
                },
                TokenRewrite {
                    find: "tan".into(),
                    replace: "math::tan".into(),
                },
                TokenRewrite {
                    find: "log".into(),
                    replace: "math::log10".into(),
                },
                TokenRewrite {
                    find: "ln".into(),
                    replace: "math::ln".into(),
                },
                TokenRewrite {
                    find: "pi".into(),
                    replace: "math::PI".into(),
                },
            ],
        }
    }
}

/// The full configuration snapshot. Loaded once, shared read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub shapes: Vec<ShapeInfo>,
    pub operations: Vec<OperationInfo>,
    pub versions: Vec<VersionInfo>,
    pub default_version: String,
    pub encoding: EncodeOptions,
    pub geometry_rules: Vec<RewriteRule>,
    pub equation_rules: Vec<RewriteRule>,
    pub polynomial_rules: Vec<RewriteRule>,
    pub equation_prefixes: EquationPrefixes,
    pub polynomial: PolynomialTables,
    pub eval_rewrites: EvalRewrites,
}

impl Catalog {
    pub fn shape(&self, name: &str) -> Option<&ShapeInfo> {
        self.shapes.iter().find(|s| s.name == name)
    }

    pub fn operation(&self, name: &str) -> Option<&OperationInfo> {
        self.operations.iter().find(|o| o.name == name)
    }

    pub fn shape_names(&self) -> Vec<String> {
        self.shapes.iter().map(|s| s.name.clone()).collect()
    }

    pub fn operation_names(&self) -> Vec<String> {
        self.operations.iter().map(|o| o.name.clone()).collect()
    }

    /// Compatible shapes for an operation; every shape when the operation
    /// has no filter or is unknown.
    pub fn shapes_for_operation(&self, operation: &str) -> Vec<String> {
        match self.operation(operation).and_then(|o| o.compatible.clone()) {
            Some(filter) => filter,
            None => self.shape_names(),
        }
    }

    /// Geometry prefix for a version; unknown versions fall back to the
    /// default version's prefix.
    pub fn version_prefix(&self, version: &str) -> String {
        self.versions
            .iter()
            .find(|v| v.name == version)
            .or_else(|| self.versions.iter().find(|v| v.name == self.default_version))
            .map(|v| v.prefix.clone())
            .unwrap_or_else(|| "wj".to_string())
    }

    /// Equation prefix: version table, then global defaults, then a
    /// synthesized `w91{n}` token.
    pub fn equation_prefix(&self, variables: usize, version: &str) -> String {
        let key = variables.to_string();
        self.equation_prefixes
            .versions
            .get(version)
            .and_then(|table| table.get(&key))
            .or_else(|| self.equation_prefixes.global_defaults.get(&key))
            .cloned()
            .unwrap_or_else(|| format!("w91{}", variables))
    }

    /// Polynomial prefix: version table, then per-degree defaults, then a
    /// synthesized `w5{degree}` token.
    pub fn polynomial_prefix(&self, degree: &str, version: &str) -> String {
        self.polynomial
            .prefixes
            .get(version)
            .and_then(|table| table.get(degree))
            .or_else(|| self.polynomial.default_prefixes.get(degree))
            .cloned()
            .unwrap_or_else(|| format!("w5{}", degree))
    }

    pub fn degree(&self, key: &str) -> Option<&DegreeInfo> {
        self.polynomial.degrees.get(key)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            shapes: default_shapes(),
            operations: default_operations(),
            versions: default_versions(),
            default_version: "fx799".to_string(),
            encoding: EncodeOptions::default(),
            geometry_rules: default_mapping_rules(),
            equation_rules: default_mapping_rules(),
            polynomial_rules: default_mapping_rules(),
            equation_prefixes: default_equation_prefixes(),
            polynomial: default_polynomial_tables(),
            eval_rewrites: EvalRewrites::default(),
        }
    }
}

fn per_dimension(two: &str, three: &str) -> ShapeCode {
    let mut map = HashMap::new();
    map.insert("2".to_string(), two.to_string());
    map.insert("3".to_string(), three.to_string());
    ShapeCode::PerDimension(map)
}

fn default_shapes() -> Vec<ShapeInfo> {
    vec![
        ShapeInfo {
            name: "Point".into(),
            kind: ShapeKind::Point,
            code_a: "T1".into(),
            code_b: "T1".into(),
            shape_code_a: per_dimension("112", "113"),
            shape_code_b: per_dimension("212", "213"),
            fields_a: vec!["point_input".into()],
            fields_b: vec!["point_input".into()],
        },
        ShapeInfo {
            name: "Line".into(),
            kind: ShapeKind::Line,
            code_a: "T2".into(),
            code_b: "T2".into(),
            shape_code_a: ShapeCode::Fixed("121".into()),
            shape_code_b: ShapeCode::Fixed("221".into()),
            fields_a: vec!["line_A1".into(), "line_X1".into()],
            fields_b: vec!["line_A2".into(), "line_X2".into()],
        },
        ShapeInfo {
            name: "Plane".into(),
            kind: ShapeKind::Plane,
            code_a: "T3".into(),
            code_b: "T3".into(),
            shape_code_a: ShapeCode::Fixed("131".into()),
            shape_code_b: ShapeCode::Fixed("231".into()),
            fields_a: vec![
                "plane_a".into(),
                "plane_b".into(),
                "plane_c".into(),
                "plane_d".into(),
            ],
            fields_b: vec![
                "plane_a".into(),
                "plane_b".into(),
                "plane_c".into(),
                "plane_d".into(),
            ],
        },
        ShapeInfo {
            name: "Circle".into(),
            kind: ShapeKind::Circle,
            code_a: "T4".into(),
            code_b: "T4".into(),
            shape_code_a: ShapeCode::Fixed("141".into()),
            shape_code_b: ShapeCode::Fixed("241".into()),
            fields_a: vec!["circle_center".into(), "circle_radius".into()],
            fields_b: vec!["circle_center".into(), "circle_radius".into()],
        },
        ShapeInfo {
            name: "Sphere".into(),
            kind: ShapeKind::Sphere,
            code_a: "T5".into(),
            code_b: "T5".into(),
            shape_code_a: ShapeCode::Fixed("151".into()),
            shape_code_b: ShapeCode::Fixed("251".into()),
            fields_a: vec!["sphere_center".into(), "sphere_radius".into()],
            fields_b: vec!["sphere_center".into(), "sphere_radius".into()],
        },
    ]
}

fn default_operations() -> Vec<OperationInfo> {
    vec![
        OperationInfo {
            name: "Distance".into(),
            code: "qT1".into(),
            requires_two_shapes: true,
            compatible: None,
        },
        OperationInfo {
            name: "Angle".into(),
            code: "qT2".into(),
            requires_two_shapes: true,
            compatible: Some(vec!["Line".into(), "Plane".into()]),
        },
        OperationInfo {
            name: "Area".into(),
            code: "qT3".into(),
            requires_two_shapes: false,
            compatible: Some(vec!["Circle".into(), "Sphere".into()]),
        },
        OperationInfo {
            name: "Volume".into(),
            code: "qT4".into(),
            requires_two_shapes: false,
            compatible: Some(vec!["Sphere".into()]),
        },
        OperationInfo {
            name: "Intersection".into(),
            code: "qT5".into(),
            requires_two_shapes: true,
            compatible: None,
        },
    ]
}

fn default_versions() -> Vec<VersionInfo> {
    [
        ("fx799", "wj"),
        ("fx800", "wp"),
        ("fx801", "wq"),
        ("fx802", "wr"),
        ("fx803", "ws"),
    ]
    .into_iter()
    .map(|(name, prefix)| VersionInfo {
        name: name.to_string(),
        prefix: prefix.to_string(),
    })
    .collect()
}

fn default_mapping_rules() -> Vec<RewriteRule> {
    vec![
        RewriteRule::regex(
            r"\\?frac\{([^{}]+)\}\{([^{}]+)\}",
            "${1}a${2}",
            "fraction to the a keystroke",
        ),
        RewriteRule::regex(r"\\?sqrt\{([^{}]+)\}", "s${1})", "brace sqrt to the s keystroke"),
        RewriteRule::literal("\\pi", "qK", "LaTeX pi to the pi key"),
        RewriteRule::literal("pi", "qK", "bare pi to the pi key"),
        RewriteRule::literal("*", "O", "multiply to the O key"),
    ]
}

fn default_equation_prefixes() -> EquationPrefixes {
    let global: HashMap<String, String> = [("2", "w912"), ("3", "w913"), ("4", "w914")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let mut versions = HashMap::new();
    versions.insert("fx799".to_string(), global.clone());
    EquationPrefixes {
        global_defaults: global,
        versions,
    }
}

fn default_polynomial_tables() -> PolynomialTables {
    let defaults: HashMap<String, String> = [("2", "w52"), ("3", "w53"), ("4", "w54")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let mut prefixes = HashMap::new();
    prefixes.insert("fx799".to_string(), defaults.clone());
    let degrees: HashMap<String, DegreeInfo> = [("2", 3usize), ("3", 4), ("4", 5)]
        .into_iter()
        .map(|(k, count)| {
            (
                k.to_string(),
                DegreeInfo {
                    coefficients: count,
                    order: CoefficientOrder::HighestFirst,
                },
            )
        })
        .collect();
    PolynomialTables {
        prefixes,
        default_prefixes: defaults,
        suffix: "=".to_string(),
        degrees,
    }
}
