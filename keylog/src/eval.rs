//! Numeric evaluation of LaTeX-like coefficient expressions
//!
//! Used by the equation and polynomial solvers; keylog encoding never goes
//! through here. Expressions are translated into evaluable syntax by a
//! config-driven rewrite pass and then run in a restricted arithmetic
//! sandbox exposing only math functions and constants.

use evalexpr::{ContextWithMutableFunctions, ContextWithMutableVariables, Function, HashMapContext, Value};

use crate::catalog::{Catalog, EvalRewrites, TokenRewrite};
use crate::rewrite::{self, EncodeOptions, RewriteRule};
use crate::{KeylogError, KeylogResult};

pub struct Evaluator {
    latex: Vec<RewriteRule>,
    /// Sorted longest-first so e.g. `sqrt` wins over shorter tokens.
    tokens: Vec<TokenRewrite>,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::from_rewrites(EvalRewrites::default())
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self::from_rewrites(catalog.eval_rewrites.clone())
    }

    pub fn from_rewrites(rewrites: EvalRewrites) -> Self {
        let mut tokens = rewrites.tokens;
        tokens.sort_by(|a, b| b.find.len().cmp(&a.find.len()));
        Self {
            latex: rewrites.latex,
            tokens,
        }
    }

    /// Evaluate leniently: on failure, fall back to a direct numeric parse
    /// of the original string, then to `0.0`. Callers relying on
    /// correctness must validate inputs upstream; batch processing expects
    /// a numeric fallback rather than a row failure.
    pub fn evaluate(&self, expr: &str) -> f64 {
        match self.evaluate_strict(expr) {
            Ok(value) => value,
            Err(_) => 0.0,
        }
    }

    /// Evaluate, surfacing the failure instead of defaulting to `0.0`.
    pub fn evaluate_strict(&self, expr: &str) -> KeylogResult<f64> {
        let trimmed = expr.trim();
        if trimmed.is_empty() {
            return Ok(0.0);
        }
        let prepared = self.prepare(trimmed);
        match evalexpr::eval_with_context(&prepared, &sandbox_context()) {
            Ok(value) => value
                .as_number()
                .map_err(|err| KeylogError::eval(format!("'{}': {}", expr, err))),
            Err(err) => trimmed
                .parse::<f64>()
                .map_err(|_| KeylogError::eval(format!("'{}': {}", expr, err))),
        }
    }

    /// Rewrite an expression into sandbox syntax without evaluating it.
    pub fn prepare(&self, expr: &str) -> String {
        let mut text: String = expr.chars().filter(|c| !c.is_whitespace()).collect();
        text = rewrite::encode(
            &text,
            &self.latex,
            &EncodeOptions {
                trim_spaces: false,
                support_sqrt_paren: false,
            },
        );
        text = self.rewrite_tokens(&text);
        float_literals(&text)
    }

    /// Single left-to-right scan at word boundaries; replacement text is
    /// never re-scanned, so inserted function names cannot be corrupted by
    /// later tokens.
    fn rewrite_tokens(&self, text: &str) -> String {
        let bytes = text.as_bytes();
        let mut out = String::with_capacity(text.len());
        let mut i = 0;
        while i < text.len() {
            let rest = &text[i..];
            let boundary_before = i == 0 || !is_word_byte(bytes[i - 1]);
            if boundary_before {
                if let Some(token) = self.tokens.iter().find(|t| {
                    rest.starts_with(&t.find)
                        && !bytes
                            .get(i + t.find.len())
                            .copied()
                            .map(is_word_byte)
                            .unwrap_or(false)
                }) {
                    out.push_str(&token.replace);
                    i += token.find.len();
                    continue;
                }
            }
            match rest.chars().next() {
                Some(ch) => {
                    out.push(ch);
                    i += ch.len_utf8();
                }
                None => break,
            }
        }
        out
    }
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Rewrite standalone integer literals as floats so division keeps real
/// semantics (`1/2` must be `0.5`, not integer division).
fn float_literals(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 8);
    let mut i = 0;
    while i < chars.len() {
        if chars[i].is_ascii_digit() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            let prev_blocks = start > 0 && {
                let p = chars[start - 1];
                p.is_alphanumeric() || p == '_' || p == '.'
            };
            let next_blocks = i < chars.len() && {
                let n = chars[i];
                n.is_alphabetic() || n == '_' || n == '.'
            };
            out.extend(&chars[start..i]);
            if !prev_blocks && !next_blocks {
                out.push_str(".0");
            }
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}

/// The evaluation context: math constants plus a base-10 log. Nothing else
/// is reachable; evalexpr's builtin `math::` functions cover the rest.
fn sandbox_context() -> HashMapContext {
    let mut context = HashMapContext::new();
    let _ = context.set_value(
        "math::PI".to_string(),
        Value::Float(std::f64::consts::PI),
    );
    let _ = context.set_value("math::E".to_string(), Value::Float(std::f64::consts::E));
    let _ = context.set_function(
        "math::log10".to_string(),
        Function::new(|argument| {
            let number = argument.as_number()?;
            Ok(Value::Float(number.log10()))
        }),
    );
    context
}
