
// Numeric evaluator tests
mod eval;

mod geometry;
mod polynomial;

// Batch and config tests
mod batch;
