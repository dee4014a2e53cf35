use std::collections::HashMap;

use crate::catalog::{Catalog, OperationInfo, ShapeCode, ShapeInfo, ShapeKind};
use crate::geometry::{process, validate, GeometryRequest};

fn data(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn request(operation: &str, shape: &str, fields: &[(&str, &str)]) -> GeometryRequest {
    GeometryRequest {
        operation: operation.to_string(),
        shape_a: shape.to_string(),
        data_a: data(fields),
        shape_b: None,
        data_b: None,
        dimension_a: "3".to_string(),
        dimension_b: "3".to_string(),
        version: None,
    }
}

/// Minimal catalog pinning the literal single-shape grammar: prefix "wj",
/// shape code "113", operator "qT3", type code "T1".
fn fixture_catalog() -> Catalog {
    let mut catalog = Catalog::default();
    // Plane kind: one component per field, so a single field yields exactly
    // one encoded value.
    catalog.shapes = vec![ShapeInfo {
        name: "Point".into(),
        kind: ShapeKind::Plane,
        code_a: "T1".into(),
        code_b: "T1".into(),
        shape_code_a: ShapeCode::Fixed("113".into()),
        shape_code_b: ShapeCode::Fixed("213".into()),
        fields_a: vec!["point_input".into()],
        fields_b: vec!["point_input".into()],
    }];
    catalog.operations = vec![OperationInfo {
        name: "Area".into(),
        code: "qT3".into(),
        requires_two_shapes: false,
        compatible: None,
    }];
    catalog.geometry_rules = Vec::new();
    catalog
}

#[test]
fn test_single_shape_keylog_grammar_literal() {
    let catalog = fixture_catalog();
    let result = process(&catalog, &request("Area", "Point", &[("point_input", "5")])).unwrap();
    assert_eq!(result.encoded_a, vec!["5".to_string()]);
    assert_eq!(result.keylog, "wj1135=CqT3T1=");
}

#[test]
fn test_zero_point_round_trip_with_empty_rules() {
    let mut catalog = Catalog::default();
    catalog.geometry_rules = Vec::new();
    let result = process(&catalog, &request("Area", "Sphere", &[
        ("sphere_center", "0,0,0"),
        ("sphere_radius", "0"),
    ]))
    .unwrap();
    assert_eq!(result.encoded_a[..3], ["0", "0", "0"]);
}

#[test]
fn test_padding_invariant() {
    let catalog = Catalog::default();
    let short = process(&catalog, &request("Volume", "Sphere", &[
        ("sphere_center", "1"),
        ("sphere_radius", "2"),
    ]))
    .unwrap();
    let full = process(&catalog, &request("Volume", "Sphere", &[
        ("sphere_center", "1,0,0"),
        ("sphere_radius", "2"),
    ]))
    .unwrap();
    assert_eq!(short.encoded_a.len(), full.encoded_a.len());
    assert_eq!(short.encoded_a, full.encoded_a);
}

#[test]
fn test_extra_components_truncated() {
    let catalog = Catalog::default();
    let result = process(&catalog, &request("Area", "Circle", &[
        ("circle_center", "1,2,99,100"),
        ("circle_radius", "5"),
    ]))
    .unwrap();
    assert_eq!(result.encoded_a, vec!["1", "2", "5"]);
}

#[test]
fn test_point_dimension_two_uses_two_components() {
    let catalog = Catalog::default();
    let mut req = request("Distance", "Point", &[("point_input", "1,2")]);
    req.dimension_a = "2".to_string();
    req.shape_b = Some("Point".to_string());
    req.data_b = Some(data(&[("point_input", "3,4")]));
    req.dimension_b = "2".to_string();
    let result = process(&catalog, &req).unwrap();
    assert_eq!(result.encoded_a, vec!["1", "2"]);
    // Per-dimension shape codes resolve with the 2D entry.
    assert!(result.keylog.starts_with("wj112"));
    assert!(result.keylog.contains("C212"));
}

#[test]
fn test_dual_shape_keylog_grammar() {
    let catalog = Catalog::default();
    let mut req = request("Distance", "Point", &[("point_input", "1,2,3")]);
    req.shape_b = Some("Point".to_string());
    req.data_b = Some(data(&[("point_input", "4,5,6")]));
    let result = process(&catalog, &req).unwrap();
    assert_eq!(result.keylog, "wj1131=2=3=C2134=5=6=CqT1T1RT1=");
}

#[test]
fn test_unknown_version_falls_back_to_default_prefix() {
    let catalog = Catalog::default();
    let mut req = request("Volume", "Sphere", &[
        ("sphere_center", "0,0,0"),
        ("sphere_radius", "1"),
    ]);
    req.version = Some("fx999".to_string());
    let result = process(&catalog, &req).unwrap();
    assert!(result.keylog.starts_with("wj"));
}

#[test]
fn test_unknown_operation_is_validation_error() {
    let catalog = Catalog::default();
    let report = validate(&catalog, &request("Teleport", "Point", &[("point_input", "1")]));
    assert!(!report.valid);
    assert!(report.errors.iter().any(|e| e.contains("Teleport")));
}

#[test]
fn test_missing_required_field_is_validation_error() {
    let catalog = Catalog::default();
    let report = validate(&catalog, &request("Volume", "Sphere", &[("sphere_center", "1,2,3")]));
    assert!(!report.valid);
    assert!(report.errors.iter().any(|e| e.contains("sphere_radius")));
}

#[test]
fn test_dual_operation_without_shape_b_is_error() {
    let catalog = Catalog::default();
    let report = validate(&catalog, &request("Distance", "Point", &[("point_input", "1,2,3")]));
    assert!(!report.valid);
    assert!(report.errors.iter().any(|e| e.contains("shape_B")));
}

#[test]
fn test_single_operation_with_shape_b_warns_and_ignores() {
    let catalog = Catalog::default();
    let mut req = request("Volume", "Sphere", &[
        ("sphere_center", "0,0,0"),
        ("sphere_radius", "2"),
    ]);
    req.shape_b = Some("Sphere".to_string());
    let report = validate(&catalog, &req);
    assert!(report.valid);
    assert_eq!(report.warnings.len(), 1);
    let result = process(&catalog, &req).unwrap();
    assert!(result.shape_b.is_none());
    assert!(result.encoded_b.is_empty());
}

#[test]
fn test_incompatible_shape_b_rejected_even_when_ignored() {
    // Volume only allows Sphere; a Point in the B slot is an error even
    // though the operation would never read it.
    let catalog = Catalog::default();
    let mut req = request("Volume", "Sphere", &[
        ("sphere_center", "0,0,0"),
        ("sphere_radius", "2"),
    ]);
    req.shape_b = Some("Point".to_string());
    let report = validate(&catalog, &req);
    assert!(!report.valid);
    assert!(report
        .errors
        .iter()
        .any(|e| e.contains("Point") && e.contains("not compatible")));
}

#[test]
fn test_incompatible_shape_rejected() {
    let catalog = Catalog::default();
    let report = validate(&catalog, &request("Volume", "Point", &[("point_input", "1,2,3")]));
    assert!(!report.valid);
    assert!(report.errors.iter().any(|e| e.contains("not compatible")));
}

#[test]
fn test_components_encoded_through_rules() {
    let catalog = Catalog::default();
    let result = process(&catalog, &request("Area", "Circle", &[
        ("circle_center", "0,0"),
        ("circle_radius", r"\frac{1}{2}"),
    ]))
    .unwrap();
    assert_eq!(result.encoded_a[2], "1a2");
}
