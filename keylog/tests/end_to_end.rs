use std::collections::HashMap;

use keylog::{
    Domain, Engine, EquationRequest, GeometryRequest, PolynomialRequest, SolutionKind,
};

fn point_data(value: &str) -> HashMap<String, String> {
    let mut data = HashMap::new();
    data.insert("point_input".to_string(), value.to_string());
    data
}

#[test]
fn test_geometry_distance_flow() {
    let engine = Engine::new();
    let request = GeometryRequest {
        operation: "Distance".to_string(),
        shape_a: "Point".to_string(),
        data_a: point_data("1,2,3"),
        shape_b: Some("Point".to_string()),
        data_b: Some(point_data("4,5,6")),
        dimension_a: "3".to_string(),
        dimension_b: "3".to_string(),
        version: None,
    };

    let report = engine.validate_geometry(&request);
    assert!(report.valid, "unexpected errors: {:?}", report.errors);

    let result = engine.process_geometry(&request).unwrap();
    assert_eq!(result.version, "fx799");
    assert_eq!(result.encoded_a.len(), 3);
    assert_eq!(result.encoded_b.len(), 3);
    assert_eq!(result.keylog, "wj1131=2=3=C2134=5=6=CqT1T1RT1=");
    assert!(!result.timestamp.is_empty());
}

#[test]
fn test_geometry_json_request_with_original_field_names() {
    let engine = Engine::new();
    let request: GeometryRequest = serde_json::from_str(
        r#"{
            "operation": "Volume",
            "shape_A": "Sphere",
            "data_A": {"sphere_center": "0,0,0", "sphere_radius": "2"}
        }"#,
    )
    .unwrap();
    let result = engine.process_geometry(&request).unwrap();
    assert_eq!(result.dimension_a, "3");
    assert!(result.keylog.starts_with("wj151"));
    assert!(result.keylog.ends_with("CqT4T1="));
}

#[test]
fn test_equation_flow() {
    let engine = Engine::new();
    let report = engine
        .process_equation(&EquationRequest {
            operation: "Giải hệ 2 ẩn".to_string(),
            equations: vec!["1,0,5".to_string(), "0,1,3".to_string()],
            version: None,
        })
        .unwrap();
    assert_eq!(report.kind, SolutionKind::Unique);
    assert_eq!(report.solution, "x = 5; y = 3");
    assert_eq!(report.keylog, "w9121=0=5=0=1=3=");
}

#[test]
fn test_polynomial_flow_with_roots() {
    let engine = Engine::new();
    let report = engine
        .process_polynomial(&PolynomialRequest {
            degree: "2".to_string(),
            coefficients: vec!["1".to_string(), "-5".to_string(), "6".to_string()],
            version: None,
            solve: true,
        })
        .unwrap();
    assert_eq!(report.keylog, "w521=-5=6==");
    let displays: Vec<String> = report
        .roots
        .unwrap()
        .into_iter()
        .map(|r| r.display)
        .collect();
    assert!(displays.contains(&"2.000000".to_string()));
    assert!(displays.contains(&"3.000000".to_string()));
}

#[test]
fn test_encode_per_domain() {
    let engine = Engine::new();
    assert_eq!(engine.encode(r"\frac{1}{2}", Domain::Geometry), "1a2");
    assert_eq!(engine.encode("2*pi", Domain::Polynomial), "2OqK");
    // The sqrt collapse normalization is geometry-only; the other domains
    // leave paren sqrt to their rule tables.
    assert_eq!(engine.encode("sqrt(2)", Domain::Geometry), "s2)");
    assert_eq!(engine.encode("sqrt(2)", Domain::Equation), "sqrt(2)");
    assert_eq!(engine.encode("sqrt(2)", Domain::Polynomial), "sqrt(2)");
}

#[test]
fn test_metadata_queries() {
    let engine = Engine::new();
    assert!(engine.shapes().contains(&"Plane".to_string()));
    assert!(engine.operations().contains(&"Intersection".to_string()));
    assert_eq!(
        engine.shapes_for_operation("Angle"),
        vec!["Line".to_string(), "Plane".to_string()]
    );
    assert_eq!(engine.shape_templates().len(), engine.shapes().len());
    assert_eq!(engine.equation_templates().len(), 3);
}

#[test]
fn test_evaluate_number_fallback_and_strict() {
    let engine = Engine::new();
    assert_eq!(engine.evaluate_number("garbage"), 0.0);
    assert!(engine.evaluate_number_strict("garbage").is_err());
    assert!((engine.evaluate_number("sqrt(2)^2") - 2.0).abs() < 1e-9);
}

#[test]
fn test_equation_batch_isolation() {
    let engine = Engine::new();
    let requests = vec![
        EquationRequest {
            operation: "Giải hệ 2 ẩn".to_string(),
            equations: vec!["1,0,5".to_string(), "0,1,3".to_string()],
            version: None,
        },
        EquationRequest {
            operation: "Giải hệ 3 ẩn".to_string(),
            equations: vec!["1,0,0,1".to_string()],
            version: None,
        },
        EquationRequest {
            operation: "Giải hệ 2 ẩn".to_string(),
            equations: vec!["1,1,2".to_string(), "1,1,5".to_string()],
            version: None,
        },
    ];
    let outcome = engine.process_equation_batch(&requests);
    assert_eq!(outcome.successful, 2);
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].index, 1);
    assert!(outcome.results[2]
        .as_ref()
        .is_some_and(|r| r.kind == SolutionKind::None));
}
