//! Input templates for client UIs
//!
//! Describes what each shape or equation mode expects as input, derived
//! from the catalog so templates never drift from validation.

use serde::Serialize;

use crate::catalog::{Catalog, Group, ShapeKind};

#[derive(Debug, Clone, Serialize)]
pub struct FieldTemplate {
    pub name: String,
    pub components: usize,
    pub example: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShapeTemplate {
    pub shape: String,
    pub fields: Vec<FieldTemplate>,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EquationTemplate {
    pub operation: String,
    pub variables: usize,
    pub rows: usize,
    pub row_format: String,
    pub example: Vec<String>,
}

pub fn shape_templates(catalog: &Catalog) -> Vec<ShapeTemplate> {
    catalog
        .shapes
        .iter()
        .map(|shape| {
            let (fields, notes) = match shape.kind {
                ShapeKind::Point => (
                    vec![field(shape.fields(Group::A), 0, 3, "1,2,3")],
                    "Comma-separated coordinates; component count follows the dimension",
                ),
                ShapeKind::Line => (
                    vec![
                        field(shape.fields(Group::A), 0, 3, "0,0,0"),
                        field(shape.fields(Group::A), 1, 3, "1,1,1"),
                    ],
                    "A point on the line, then its direction vector",
                ),
                ShapeKind::Plane => (
                    shape
                        .fields(Group::A)
                        .iter()
                        .map(|name| FieldTemplate {
                            name: name.clone(),
                            components: 1,
                            example: "1".to_string(),
                        })
                        .collect(),
                    "Coefficients of ax + by + cz + d = 0",
                ),
                ShapeKind::Circle => (
                    vec![
                        field(shape.fields(Group::A), 0, 2, "0,0"),
                        field(shape.fields(Group::A), 1, 1, "5"),
                    ],
                    "Center coordinates, then the radius",
                ),
                ShapeKind::Sphere => (
                    vec![
                        field(shape.fields(Group::A), 0, 3, "0,0,0"),
                        field(shape.fields(Group::A), 1, 1, "5"),
                    ],
                    "Center coordinates, then the radius",
                ),
            };
            ShapeTemplate {
                shape: shape.name.clone(),
                fields,
                notes: notes.to_string(),
            }
        })
        .collect()
}

pub fn equation_templates() -> Vec<EquationTemplate> {
    [2usize, 3, 4]
        .into_iter()
        .map(|variables| {
            let row_format = format!(
                "{},const",
                (1..=variables)
                    .map(|i| format!("c{}", i))
                    .collect::<Vec<_>>()
                    .join(",")
            );
            let example = (0..variables)
                .map(|row| {
                    (0..=variables)
                        .map(|col| if col == row { "1" } else { "0" })
                        .collect::<Vec<_>>()
                        .join(",")
                })
                .collect();
            EquationTemplate {
                operation: format!("Giải hệ {} ẩn", variables),
                variables,
                rows: variables,
                row_format,
                example,
            }
        })
        .collect()
}

fn field(fields: &[String], idx: usize, components: usize, example: &str) -> FieldTemplate {
    FieldTemplate {
        name: fields.get(idx).cloned().unwrap_or_default(),
        components,
        example: example.to_string(),
    }
}
