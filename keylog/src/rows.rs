//! Row-oriented extraction for spreadsheet-shaped batch input
//!
//! A row supplies one linear system as flat columns `a11..ann` plus
//! `c1..cn`. This module only maps such a row into the comma-joined
//! equation strings the solver expects; workbook I/O lives with the
//! caller.

use std::collections::HashMap;

/// Column names a row must carry for `variables` unknowns, matrix entries
/// row-major first, then the constants.
pub fn required_columns(variables: usize) -> Vec<String> {
    let mut columns = Vec::with_capacity(variables * (variables + 1));
    for row in 1..=variables {
        for col in 1..=variables {
            columns.push(format!("a{}{}", row, col));
        }
    }
    for row in 1..=variables {
        columns.push(format!("c{}", row));
    }
    columns
}

/// Build the solver's equation row strings from a flat column map. Missing
/// or blank cells become `"0"`.
pub fn equation_rows(row: &HashMap<String, String>, variables: usize) -> Vec<String> {
    (1..=variables)
        .map(|r| {
            let mut entries: Vec<String> = (1..=variables)
                .map(|c| cell(row, &format!("a{}{}", r, c)))
                .collect();
            entries.push(cell(row, &format!("c{}", r)));
            entries.join(",")
        })
        .collect()
}

/// True when at least one relevant cell holds data; used to skip trailing
/// blank rows in a sheet.
pub fn row_has_data(row: &HashMap<String, String>, variables: usize) -> bool {
    required_columns(variables)
        .iter()
        .any(|name| row.get(name).map(|v| !is_blank(v)).unwrap_or(false))
}

fn cell(row: &HashMap<String, String>, name: &str) -> String {
    match row.get(name) {
        Some(value) if !is_blank(value) => value.trim().to_string(),
        _ => "0".to_string(),
    }
}

fn is_blank(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("na") || trimmed.eq_ignore_ascii_case("nan")
}
