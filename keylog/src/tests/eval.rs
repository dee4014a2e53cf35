use crate::eval::Evaluator;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_plain_number() {
    let eval = Evaluator::new();
    assert!(close(eval.evaluate("42"), 42.0));
    assert!(close(eval.evaluate("-3.5"), -3.5));
}

#[test]
fn test_division_keeps_real_semantics() {
    let eval = Evaluator::new();
    assert!(close(eval.evaluate("1/2"), 0.5));
    assert!(close(eval.evaluate("7/2"), 3.5));
}

#[test]
fn test_power_operator() {
    let eval = Evaluator::new();
    assert!(close(eval.evaluate("2^10"), 1024.0));
}

#[test]
fn test_sqrt_and_trig() {
    let eval = Evaluator::new();
    assert!(close(eval.evaluate("sqrt(9)"), 3.0));
    assert!(close(eval.evaluate("sin(0)"), 0.0));
    assert!(close(eval.evaluate("cos(0)"), 1.0));
    assert!(close(eval.evaluate("tan(0)"), 0.0));
}

#[test]
fn test_log_is_base_ten_and_ln_natural() {
    let eval = Evaluator::new();
    assert!(close(eval.evaluate("log(1000)"), 3.0));
    assert!(close(eval.evaluate("ln(1)"), 0.0));
}

#[test]
fn test_pi_constant() {
    let eval = Evaluator::new();
    assert!(close(eval.evaluate("pi"), std::f64::consts::PI));
    assert!(close(eval.evaluate("2*pi"), 2.0 * std::f64::consts::PI));
}

#[test]
fn test_latex_fraction_and_sqrt() {
    let eval = Evaluator::new();
    assert!(close(eval.evaluate(r"\frac{1}{4}"), 0.25));
    assert!(close(eval.evaluate(r"\sqrt{16}"), 4.0));
    assert!(close(eval.evaluate(r"\pi"), std::f64::consts::PI));
}

#[test]
fn test_whitespace_ignored() {
    let eval = Evaluator::new();
    assert!(close(eval.evaluate(" 1 + 2 "), 3.0));
}

#[test]
fn test_failure_defaults_to_zero() {
    let eval = Evaluator::new();
    assert!(close(eval.evaluate("not a number"), 0.0));
}

#[test]
fn test_empty_input_is_zero() {
    let eval = Evaluator::new();
    assert!(close(eval.evaluate(""), 0.0));
    assert!(close(eval.evaluate("   "), 0.0));
}

#[test]
fn test_strict_mode_surfaces_failure() {
    let eval = Evaluator::new();
    assert!(eval.evaluate_strict("not a number").is_err());
    assert!(close(eval.evaluate_strict("1+1").unwrap(), 2.0));
}

#[test]
fn test_token_rewrite_does_not_touch_identifier_tails() {
    let eval = Evaluator::new();
    // "pi" inside a longer rewritten name must not be replaced again.
    assert_eq!(eval.prepare("sin(1)"), "math::sin(1.0)");
    assert_eq!(eval.prepare("pi"), "math::PI");
}

#[test]
fn test_prepare_appends_float_suffix_to_integers() {
    let eval = Evaluator::new();
    assert_eq!(eval.prepare("1/2"), "1.0/2.0");
    // Decimals are left alone.
    assert_eq!(eval.prepare("1.5/2"), "1.5/2.0");
}
