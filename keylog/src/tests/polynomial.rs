use crate::catalog::Catalog;
use crate::eval::Evaluator;
use crate::polynomial::{process, PolynomialRequest};
use crate::KeylogError;

fn run(degree: &str, coefficients: &[&str], solve: bool) -> crate::KeylogResult<crate::PolynomialReport> {
    let catalog = Catalog::default();
    let evaluator = Evaluator::from_catalog(&catalog);
    process(
        &catalog,
        &evaluator,
        &PolynomialRequest {
            degree: degree.to_string(),
            coefficients: coefficients.iter().map(|s| s.to_string()).collect(),
            version: None,
            solve,
        },
    )
}

#[test]
fn test_keylog_is_double_terminated() {
    let report = run("2", &["1", "-5", "6"], false).unwrap();
    assert_eq!(report.keylog, "w521=-5=6==");
    assert!(report.roots.is_none());
}

#[test]
fn test_unsupported_degree_is_hard_error() {
    let err = run("7", &["1", "0", "0"], false).unwrap_err();
    assert!(matches!(err, KeylogError::UnsupportedDegree(ref d) if d == "7"));
}

#[test]
fn test_quadratic_real_roots_as_set() {
    let report = run("2", &["1", "0", "-4"], true).unwrap();
    let roots = report.roots.unwrap();
    assert_eq!(roots.len(), 2);
    let mut reals: Vec<f64> = roots.iter().map(|r| r.re).collect();
    reals.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert!((reals[0] + 2.0).abs() < 1e-6);
    assert!((reals[1] - 2.0).abs() < 1e-6);
    assert!(roots.iter().all(|r| r.im == 0.0));
}

#[test]
fn test_complex_roots_formatted_with_imaginary_unit() {
    // x^2 + 1 = 0 → ±i.
    let report = run("2", &["1", "0", "1"], true).unwrap();
    let roots = report.roots.unwrap();
    assert_eq!(roots.len(), 2);
    assert!(roots.iter().any(|r| r.display.contains("+ 1.000000i")));
    assert!(roots.iter().any(|r| r.display.contains("- 1.000000i")));
}

#[test]
fn test_real_roots_formatted_six_decimals() {
    let report = run("2", &["1", "-5", "6"], true).unwrap();
    let roots = report.roots.unwrap();
    let displays: Vec<&str> = roots.iter().map(|r| r.display.as_str()).collect();
    assert!(displays.contains(&"2.000000"));
    assert!(displays.contains(&"3.000000"));
}

#[test]
fn test_cubic_via_companion_matrix() {
    // (x-1)(x-2)(x-3) = x^3 - 6x^2 + 11x - 6.
    let report = run("3", &["1", "-6", "11", "-6"], true).unwrap();
    let mut reals: Vec<f64> = report.roots.unwrap().iter().map(|r| r.re).collect();
    reals.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert!((reals[0] - 1.0).abs() < 1e-6);
    assert!((reals[1] - 2.0).abs() < 1e-6);
    assert!((reals[2] - 3.0).abs() < 1e-6);
}

#[test]
fn test_missing_coefficients_padded() {
    let report = run("2", &["1"], false).unwrap();
    assert_eq!(report.encoded_coefficients, vec!["1", "0", "0"]);
}

#[test]
fn test_paren_sqrt_left_to_the_rule_table() {
    // Geometry's sqrt collapse must not fire here.
    let report = run("2", &["1", "sqrt(2)", "0"], false).unwrap();
    assert_eq!(report.encoded_coefficients[1], "sqrt(2)");
}

#[test]
fn test_latex_coefficient_encodes_and_solves() {
    // \frac{1}{2}x^2 - 2 = 0 → x = ±2.
    let report = run("2", &[r"\frac{1}{2}", "0", "-2"], true).unwrap();
    assert!(report.encoded_coefficients[0].contains("1a2"));
    let mut reals: Vec<f64> = report.roots.unwrap().iter().map(|r| r.re).collect();
    reals.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert!((reals[0] + 2.0).abs() < 1e-6);
    assert!((reals[1] - 2.0).abs() < 1e-6);
}
