//! Rule-based text rewriting
//!
//! Maps LaTeX-like coefficient notation to calculator keystroke tokens by
//! applying an ordered list of find/replace rules. Rules are applied
//! sequentially: each rule's output becomes the next rule's input, and the
//! engine never skips or reorders them on its own. A malformed rule is
//! skipped with a warning so one bad pattern cannot abort encoding.

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// How a rule's `find` field is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    /// Verbatim substring replacement of all occurrences.
    #[default]
    Literal,
    /// Pattern substitution with back-reference support.
    Regex,
}

/// One find/replace transformation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewriteRule {
    pub find: String,
    pub replace: String,
    #[serde(rename = "type", default)]
    pub kind: RuleKind,
    #[serde(default)]
    pub description: String,
}

impl RewriteRule {
    pub fn literal(
        find: impl Into<String>,
        replace: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            find: find.into(),
            replace: replace.into(),
            kind: RuleKind::Literal,
            description: description.into(),
        }
    }

    pub fn regex(
        find: impl Into<String>,
        replace: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            find: find.into(),
            replace: replace.into(),
            kind: RuleKind::Regex,
            description: description.into(),
        }
    }
}

/// Knobs for the normalization passes that run before the rule list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodeOptions {
    /// Strip all whitespace from the input before encoding.
    #[serde(default = "default_true")]
    pub trim_spaces: bool,
    /// Collapse `sqrt(...)` / `\sqrt(...)` into the `s...)` keystroke form
    /// before generic rules run. Geometry only; the generic regex rules
    /// assume this normalized form.
    #[serde(default = "default_true")]
    pub support_sqrt_paren: bool,
}

fn default_true() -> bool {
    true
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            trim_spaces: true,
            support_sqrt_paren: true,
        }
    }
}

/// Encode an input string through the given rule list.
///
/// Pure and order-sensitive: identical inputs always produce identical
/// output, and reordering rules changes the result. Empty input encodes to
/// the empty string.
pub fn encode(input: &str, rules: &[RewriteRule], options: &EncodeOptions) -> String {
    if input.is_empty() {
        return String::new();
    }

    let mut text = input.to_string();
    if options.trim_spaces {
        text.retain(|c| !c.is_whitespace());
    }
    if options.support_sqrt_paren {
        text = collapse_sqrt(&text);
    }

    for rule in rules {
        if rule.find.is_empty() {
            continue;
        }
        match apply_rule(&text, rule) {
            Ok(next) => text = next,
            Err(err) => warn!(rule = %rule.description, error = %err, "rewrite rule skipped"),
        }
    }

    text
}

/// Apply one rule. Fails only when a regex pattern does not compile.
fn apply_rule(text: &str, rule: &RewriteRule) -> Result<String, regex::Error> {
    match rule.kind {
        RuleKind::Literal => Ok(text.replace(&rule.find, &rule.replace)),
        RuleKind::Regex => {
            let re = Regex::new(&rule.find)?;
            let template = convert_backrefs(&rule.replace);
            Ok(re.replace_all(text, template.as_str()).into_owned())
        }
    }
}

/// Translate `\1`-style back-references (used by the original engine's
/// config files) into the `${1}` form the regex crate expects. Templates
/// already written with `$` pass through untouched.
fn convert_backrefs(template: &str) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(d) = chars.peek().copied() {
                if d.is_ascii_digit() {
                    chars.next();
                    out.push_str("${");
                    out.push(d);
                    out.push('}');
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

/// Collapse `sqrt(...)` / `\sqrt(...)` with balanced parenthesised contents
/// into the `s<contents>)` keystroke form. Nested calls collapse innermost
/// contents first.
pub(crate) fn collapse_sqrt(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < text.len() {
        let rest = &text[i..];
        let skip = if rest.starts_with("\\sqrt(") {
            6
        } else if rest.starts_with("sqrt(") {
            5
        } else {
            0
        };
        if skip > 0 {
            if let Some(inner_len) = balanced_len(&text[i + skip..]) {
                let inner = &text[i + skip..i + skip + inner_len];
                out.push('s');
                out.push_str(&collapse_sqrt(inner));
                out.push(')');
                i += skip + inner_len + 1;
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

/// Byte length of the contents up to the parenthesis matching an
/// already-consumed `(`. `None` when the input is unbalanced.
fn balanced_len(s: &str) -> Option<usize> {
    let mut depth = 1usize;
    for (idx, ch) in s.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}
