use std::collections::HashMap;

use crate::engine::Engine;
use crate::polynomial::PolynomialRequest;
use crate::rows;
use crate::{batch, KeylogError};

#[test]
fn test_batch_isolation_preserves_order() {
    let engine = Engine::new();
    let requests: Vec<PolynomialRequest> = [("2", vec!["1", "0", "-4"]), ("9", vec!["1"]), ("2", vec!["1", "-5", "6"])]
        .into_iter()
        .map(|(degree, coefficients)| PolynomialRequest {
            degree: degree.to_string(),
            coefficients: coefficients.into_iter().map(String::from).collect(),
            version: None,
            solve: false,
        })
        .collect();

    let outcome = engine.process_polynomial_batch(&requests);
    assert_eq!(outcome.total, 3);
    assert_eq!(outcome.successful, 2);
    assert_eq!(outcome.results.len(), 3);
    assert!(outcome.results[0].is_some());
    assert!(outcome.results[1].is_none());
    assert!(outcome.results[2].is_some());
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].index, 1);
    assert!(outcome.errors[0].error.contains("degree"));
}

#[test]
fn test_empty_batch() {
    let outcome = batch::run(&[] as &[u32], |_| Ok::<u32, KeylogError>(0));
    assert_eq!(outcome.total, 0);
    assert_eq!(outcome.successful, 0);
    assert!(outcome.results.is_empty());
    assert!(outcome.errors.is_empty());
}

#[test]
fn test_all_failures_still_complete() {
    let outcome = batch::run(&[1u32, 2, 3], |n| {
        Err::<u32, _>(KeylogError::validation(format!("bad item {}", n)))
    });
    assert_eq!(outcome.successful, 0);
    assert_eq!(outcome.errors.len(), 3);
    assert_eq!(outcome.errors[2].index, 2);
}

#[test]
fn test_row_extraction_builds_equation_strings() {
    let mut row = HashMap::new();
    row.insert("a11".to_string(), "1".to_string());
    row.insert("a12".to_string(), "0".to_string());
    row.insert("a21".to_string(), "0".to_string());
    row.insert("a22".to_string(), "1".to_string());
    row.insert("c1".to_string(), "5".to_string());
    row.insert("c2".to_string(), "3".to_string());
    assert_eq!(rows::equation_rows(&row, 2), vec!["1,0,5", "0,1,3"]);
}

#[test]
fn test_row_extraction_defaults_blank_cells_to_zero() {
    let mut row = HashMap::new();
    row.insert("a11".to_string(), "2".to_string());
    row.insert("c1".to_string(), "NA".to_string());
    assert_eq!(rows::equation_rows(&row, 2), vec!["2,0,0", "0,0,0"]);
}

#[test]
fn test_row_has_data() {
    let mut row = HashMap::new();
    assert!(!rows::row_has_data(&row, 2));
    row.insert("a21".to_string(), "7".to_string());
    assert!(rows::row_has_data(&row, 2));
    row.insert("a21".to_string(), "nan".to_string());
    assert!(!rows::row_has_data(&row, 2));
}

#[test]
fn test_required_columns_layout() {
    assert_eq!(
        rows::required_columns(2),
        vec!["a11", "a12", "a21", "a22", "c1", "c2"]
    );
}
