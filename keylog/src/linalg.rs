//! Dense linear algebra helpers for the solvers
//!
//! Rank via SVD with the conventional `max(rows, cols) * eps * sigma_max`
//! tolerance, determinant and solve via LU, polynomial roots via the
//! eigenvalues of the companion matrix.

use nalgebra::{DMatrix, DVector};
use num_complex::Complex64;

use crate::{KeylogError, KeylogResult};

const LEADING_ZERO_TOL: f64 = 1.0e-12;
const RESULT_ZERO_TOL: f64 = 1.0e-10;

pub fn rank(matrix: &DMatrix<f64>) -> usize {
    let (rows, cols) = matrix.shape();
    if rows == 0 || cols == 0 {
        return 0;
    }
    let svd = nalgebra::linalg::SVD::new(matrix.clone(), false, false);
    let tol = default_tolerance(svd.singular_values.as_slice(), rows, cols);
    svd.singular_values.iter().filter(|s| **s > tol).count()
}

fn default_tolerance(singular_values: &[f64], rows: usize, cols: usize) -> f64 {
    let largest = singular_values.iter().cloned().fold(0.0_f64, f64::max);
    largest * rows.max(cols) as f64 * f64::EPSILON
}

pub fn determinant(matrix: &DMatrix<f64>) -> f64 {
    matrix.determinant()
}

pub fn solve(a: &DMatrix<f64>, b: &DVector<f64>) -> KeylogResult<DVector<f64>> {
    a.clone()
        .lu()
        .solve(b)
        .ok_or_else(|| KeylogError::compute("linear system could not be solved"))
}

/// Roots of a real-coefficient polynomial, highest-degree coefficient
/// first. Constant polynomials have no roots; linear and quadratic cases
/// are solved in closed form, higher degrees through the companion matrix.
pub fn polynomial_roots(coefficients: &[f64]) -> KeylogResult<Vec<Complex64>> {
    let trimmed = trim_leading_zeros(coefficients);
    if trimmed.len() <= 1 {
        return Ok(Vec::new());
    }
    if trimmed.len() == 2 {
        return Ok(vec![canonicalize_root(Complex64::new(
            -trimmed[1] / trimmed[0],
            0.0,
        ))]);
    }
    if trimmed.len() == 3 {
        return Ok(quadratic_roots(trimmed[0], trimmed[1], trimmed[2]));
    }

    let degree = trimmed.len() - 1;
    let leading = Complex64::new(trimmed[0], 0.0);
    let mut companion = DMatrix::<Complex64>::zeros(degree, degree);
    for row in 1..degree {
        companion[(row, row - 1)] = Complex64::new(1.0, 0.0);
    }
    for (idx, &coefficient) in trimmed.iter().enumerate().skip(1) {
        companion[(0, idx - 1)] = -Complex64::new(coefficient, 0.0) / leading;
    }

    let eigenvalues = companion.clone().eigenvalues().ok_or_else(|| {
        KeylogError::compute("companion matrix eigenvalues did not converge")
    })?;
    Ok(eigenvalues.iter().map(|&z| canonicalize_root(z)).collect())
}

fn quadratic_roots(a: f64, b: f64, c: f64) -> Vec<Complex64> {
    let disc = Complex64::new(b * b - 4.0 * a * c, 0.0);
    let sqrt_disc = disc.sqrt();
    let two_a = Complex64::new(2.0 * a, 0.0);
    let minus_b = Complex64::new(-b, 0.0);
    vec![
        canonicalize_root((minus_b + sqrt_disc) / two_a),
        canonicalize_root((minus_b - sqrt_disc) / two_a),
    ]
}

fn trim_leading_zeros(coefficients: &[f64]) -> Vec<f64> {
    if coefficients.is_empty() {
        return Vec::new();
    }
    let scale = coefficients.iter().map(|c| c.abs()).fold(0.0_f64, f64::max);
    let tol = if scale == 0.0 {
        LEADING_ZERO_TOL
    } else {
        LEADING_ZERO_TOL * scale
    };
    let first_nonzero = coefficients
        .iter()
        .position(|c| c.abs() > tol)
        .unwrap_or(coefficients.len());
    coefficients[first_nonzero..].to_vec()
}

/// Snap near-zero real/imaginary parts so downstream formatting reports
/// clean real roots.
fn canonicalize_root(z: Complex64) -> Complex64 {
    if !z.re.is_finite() || !z.im.is_finite() {
        return z;
    }
    let mut real = z.re;
    let mut imag = z.im;
    let scale = 1.0 + real.abs();
    if imag.abs() <= RESULT_ZERO_TOL * scale {
        imag = 0.0;
    }
    if real.abs() <= RESULT_ZERO_TOL {
        real = 0.0;
    }
    Complex64::new(real, imag)
}

/// True when the imaginary part is negligible relative to the real part.
pub fn is_real(z: &Complex64) -> bool {
    z.im.abs() <= RESULT_ZERO_TOL * (1.0 + z.re.abs())
}
