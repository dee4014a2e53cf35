use anyhow::Result;
use keylog::{Engine, EquationReport, GeometryResult, PolynomialReport, ValidationReport};

pub fn format_validation(report: &ValidationReport, json: bool) -> Result<String> {
    if json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(report)?));
    }
    let mut out = String::new();
    if report.valid {
        out.push_str("Request is valid\n");
    } else {
        out.push_str("Request is invalid\n");
        for error in &report.errors {
            out.push_str(&format!("  error: {}\n", error));
        }
    }
    for warning in &report.warnings {
        out.push_str(&format!("  warning: {}\n", warning));
    }
    Ok(out)
}

pub fn format_geometry(result: &GeometryResult, json: bool) -> Result<String> {
    if json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(result)?));
    }
    let mut out = String::new();
    out.push_str(&format!(
        "{} on {}{} ({})\n",
        result.operation,
        result.shape_a,
        result
            .shape_b
            .as_ref()
            .map(|b| format!(" and {}", b))
            .unwrap_or_default(),
        result.version
    ));
    out.push_str(&format!("  encoded A: {}\n", result.encoded_a.join(", ")));
    if !result.encoded_b.is_empty() {
        out.push_str(&format!("  encoded B: {}\n", result.encoded_b.join(", ")));
    }
    out.push_str(&format!("  keylog:    {}\n", result.keylog));
    Ok(out)
}

pub fn format_equation(report: &EquationReport, json: bool) -> Result<String> {
    if json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(report)?));
    }
    let mut out = String::new();
    out.push_str(&format!(
        "{} unknowns, rank(A) = {}, rank([A|b]) = {}, det = {}\n",
        report.variables, report.rank_a, report.rank_augmented, report.determinant
    ));
    out.push_str(&format!("  solution: {}\n", report.solution));
    out.push_str(&format!("  keylog:   {}\n", report.keylog));
    Ok(out)
}

pub fn format_polynomial(report: &PolynomialReport, json: bool) -> Result<String> {
    if json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(report)?));
    }
    let mut out = String::new();
    out.push_str(&format!("degree {} ({})\n", report.degree, report.version));
    out.push_str(&format!("  keylog: {}\n", report.keylog));
    if let Some(roots) = &report.roots {
        let displays: Vec<&str> = roots.iter().map(|r| r.display.as_str()).collect();
        out.push_str(&format!("  roots:  {}\n", displays.join(", ")));
    }
    Ok(out)
}

pub fn format_catalog(engine: &Engine) -> String {
    let mut out = String::new();
    out.push_str("Shapes:\n");
    for template in engine.shape_templates() {
        let fields: Vec<String> = template
            .fields
            .iter()
            .map(|f| format!("{} ({})", f.name, f.components))
            .collect();
        out.push_str(&format!("  {:<8} {}\n", template.shape, fields.join(", ")));
    }
    out.push_str("Operations:\n");
    for operation in engine.operations() {
        out.push_str(&format!(
            "  {:<14} shapes: {}\n",
            operation,
            engine.shapes_for_operation(&operation).join(", ")
        ));
    }
    out.push_str("Versions:\n");
    for version in &engine.catalog().versions {
        out.push_str(&format!("  {:<8} prefix {}\n", version.name, version.prefix));
    }
    out
}
