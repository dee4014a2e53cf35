//! Geometry keylog assembly
//!
//! Turns one or two shape descriptors into the final keystroke string.
//! Validation is callable on its own; processing validates first, encodes
//! every numeric component through the rewrite engine, then serializes the
//! token sequence per the keylog grammar. All state is request-scoped.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Group, OperationInfo, ShapeInfo, ShapeKind};
use crate::rewrite;
use crate::{KeylogError, KeylogResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeometryRequest {
    pub operation: String,
    #[serde(alias = "shape_A")]
    pub shape_a: String,
    #[serde(alias = "data_A")]
    pub data_a: HashMap<String, String>,
    #[serde(default, alias = "shape_B")]
    pub shape_b: Option<String>,
    #[serde(default, alias = "data_B")]
    pub data_b: Option<HashMap<String, String>>,
    #[serde(default = "default_dimension", alias = "dimension_A")]
    pub dimension_a: String,
    #[serde(default = "default_dimension", alias = "dimension_B")]
    pub dimension_b: String,
    #[serde(default)]
    pub version: Option<String>,
}

fn default_dimension() -> String {
    "3".to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct GeometryResult {
    pub operation: String,
    pub shape_a: String,
    pub shape_b: Option<String>,
    pub dimension_a: String,
    pub dimension_b: String,
    pub version: String,
    pub encoded_a: Vec<String>,
    pub encoded_b: Vec<String>,
    pub keylog: String,
    pub timestamp: String,
}

/// Outcome of validating a request without processing it.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Validate a request against the catalog. Missing required fields are
/// errors here, even though missing numeric components within a present
/// field default to `"0"` at processing time.
pub fn validate(catalog: &Catalog, request: &GeometryRequest) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if request.operation.is_empty() {
        errors.push("Missing required field: operation".to_string());
    }
    if request.shape_a.is_empty() {
        errors.push("Missing required field: shape_A".to_string());
    }
    if !errors.is_empty() {
        return ValidationReport {
            valid: false,
            errors,
            warnings,
        };
    }

    let operation = catalog.operation(&request.operation);
    if operation.is_none() {
        errors.push(format!("Invalid operation: {}", request.operation));
    }
    let shape_a = catalog.shape(&request.shape_a);
    if shape_a.is_none() {
        errors.push(format!("Invalid shape A: {}", request.shape_a));
    }

    if let Some(op) = operation {
        if op.requires_two_shapes && request.shape_b.is_none() {
            errors.push(format!("Operation '{}' requires shape_B", op.name));
        }
        if !op.requires_two_shapes && request.shape_b.is_some() {
            warnings.push(format!(
                "Operation '{}' does not require shape_B, it will be ignored",
                op.name
            ));
        }

        let allowed = catalog.shapes_for_operation(&op.name);
        if !allowed.contains(&request.shape_a) {
            errors.push(format!(
                "Shape '{}' is not compatible with operation '{}'",
                request.shape_a, op.name
            ));
        }
        // A supplied shape B must be compatible even when the operation
        // ignores it.
        if let Some(shape_b) = &request.shape_b {
            if !allowed.contains(shape_b) {
                errors.push(format!(
                    "Shape '{}' is not compatible with operation '{}'",
                    shape_b, op.name
                ));
            }
        }
    }

    if let Some(shape) = shape_a {
        errors.extend(missing_fields(shape, &request.data_a, Group::A));
    }
    if let (Some(name), Some(data)) = (&request.shape_b, &request.data_b) {
        if let Some(shape) = catalog.shape(name) {
            errors.extend(missing_fields(shape, data, Group::B));
        }
    } else if let Some(name) = &request.shape_b {
        if request.data_b.is_none() && catalog.shape(name).is_some() {
            if let Some(op) = catalog.operation(&request.operation) {
                if op.requires_two_shapes {
                    errors.push(format!("Missing data_B for shape '{}'", name));
                }
            }
        }
    }

    ValidationReport {
        valid: errors.is_empty(),
        errors,
        warnings,
    }
}

fn missing_fields(shape: &ShapeInfo, data: &HashMap<String, String>, group: Group) -> Vec<String> {
    let group_name = match group {
        Group::A => "A",
        Group::B => "B",
    };
    shape
        .fields(group)
        .iter()
        .filter(|field| !data.contains_key(*field))
        .map(|field| format!("Missing '{}' for {} in group {}", field, shape.name, group_name))
        .collect()
}

/// Request-scoped assembly state, threaded explicitly through the internal
/// calls instead of living on a shared instance.
struct Job<'a> {
    catalog: &'a Catalog,
    version: String,
    dimension_a: &'a str,
    dimension_b: &'a str,
}

/// Validate and process a request into encoded operands plus the keylog.
pub fn process(catalog: &Catalog, request: &GeometryRequest) -> KeylogResult<GeometryResult> {
    let report = validate(catalog, request);
    if !report.valid {
        return Err(KeylogError::Validation(report.errors.join("; ")));
    }

    let operation = catalog
        .operation(&request.operation)
        .ok_or_else(|| KeylogError::validation(format!("Invalid operation: {}", request.operation)))?;
    let shape_a = catalog
        .shape(&request.shape_a)
        .ok_or_else(|| KeylogError::validation(format!("Invalid shape A: {}", request.shape_a)))?;

    let job = Job {
        catalog,
        version: request
            .version
            .clone()
            .unwrap_or_else(|| catalog.default_version.clone()),
        dimension_a: &request.dimension_a,
        dimension_b: &request.dimension_b,
    };

    let encoded_a = encode_shape(&job, shape_a, &request.data_a, Group::A);

    let shape_b = if operation.requires_two_shapes {
        match (&request.shape_b, &request.data_b) {
            (Some(name), Some(data)) => {
                let shape = catalog
                    .shape(name)
                    .ok_or_else(|| KeylogError::validation(format!("Invalid shape B: {}", name)))?;
                Some((shape, encode_shape(&job, shape, data, Group::B)))
            }
            _ => None,
        }
    } else {
        None
    };

    let keylog = assemble_keylog(&job, operation, shape_a, &encoded_a, shape_b.as_ref());

    Ok(GeometryResult {
        operation: request.operation.clone(),
        shape_a: request.shape_a.clone(),
        shape_b: if operation.requires_two_shapes {
            request.shape_b.clone()
        } else {
            None
        },
        dimension_a: request.dimension_a.clone(),
        dimension_b: request.dimension_b.clone(),
        version: job.version.clone(),
        encoded_a,
        encoded_b: shape_b.as_ref().map(|(_, e)| e.clone()).unwrap_or_default(),
        keylog,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// (field, component count) pairs in the shape's fixed encoding order.
fn field_arities<'a>(shape: &'a ShapeInfo, group: Group, dimension: &str) -> Vec<(&'a str, usize)> {
    let fields = shape.fields(group);
    let field = |idx: usize| fields.get(idx).map(String::as_str).unwrap_or("");
    let dim = dimension.parse::<usize>().unwrap_or(3).clamp(2, 3);
    match shape.kind {
        ShapeKind::Point => vec![(field(0), dim)],
        ShapeKind::Line => vec![(field(0), 3), (field(1), 3)],
        ShapeKind::Plane => fields.iter().map(|f| (f.as_str(), 1)).collect(),
        ShapeKind::Circle => vec![(field(0), 2), (field(1), 1)],
        ShapeKind::Sphere => vec![(field(0), 3), (field(1), 1)],
    }
}

/// Extract, pad, truncate, and encode every numeric component of a shape.
fn encode_shape(
    job: &Job<'_>,
    shape: &ShapeInfo,
    data: &HashMap<String, String>,
    group: Group,
) -> Vec<String> {
    let dimension = match group {
        Group::A => job.dimension_a,
        Group::B => job.dimension_b,
    };
    let mut encoded = Vec::new();
    for (field, arity) in field_arities(shape, group, dimension) {
        let raw = data.get(field).map(String::as_str).unwrap_or("");
        let mut components: Vec<String> = if raw.trim().is_empty() {
            Vec::new()
        } else {
            raw.split(',').map(|c| c.trim().to_string()).collect()
        };
        while components.len() < arity {
            components.push("0".to_string());
        }
        components.truncate(arity);
        encoded.extend(components.iter().map(|component| {
            rewrite::encode(component, &job.catalog.geometry_rules, &job.catalog.encoding)
        }));
    }
    encoded
}

/// `=`-joined values with a trailing `=`, or empty when there are none.
fn values_str(values: &[String]) -> String {
    if values.is_empty() {
        String::new()
    } else {
        format!("{}=", values.join("="))
    }
}

fn assemble_keylog(
    job: &Job<'_>,
    operation: &OperationInfo,
    shape_a: &ShapeInfo,
    encoded_a: &[String],
    shape_b: Option<&(&ShapeInfo, Vec<String>)>,
) -> String {
    let prefix = job.catalog.version_prefix(&job.version);
    let shape_code_a = shape_a.shape_code(Group::A).resolve(job.dimension_a);
    let type_a = shape_a.type_code(Group::A);
    let vals_a = values_str(encoded_a);

    if !operation.requires_two_shapes {
        return format!("{prefix}{shape_code_a}{vals_a}C{}{type_a}=", operation.code);
    }

    let (type_b, shape_code_b, vals_b) = match shape_b {
        Some((shape, encoded)) => (
            shape.type_code(Group::B).to_string(),
            shape.shape_code(Group::B).resolve(job.dimension_b),
            values_str(encoded),
        ),
        None => (String::new(), String::new(), String::new()),
    };
    format!(
        "{prefix}{shape_code_a}{vals_a}C{shape_code_b}{vals_b}C{}{type_a}R{type_b}=",
        operation.code
    )
}
