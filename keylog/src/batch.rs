//! Sequential batch processing with per-item error isolation
//!
//! One bad item yields one error entry and a `None` placeholder at its
//! index; the rest of the batch proceeds. Ordering is preserved.

use serde::Serialize;

use crate::KeylogResult;

#[derive(Debug, Clone, Serialize)]
pub struct BatchError {
    pub index: usize,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome<T> {
    pub total: usize,
    pub successful: usize,
    /// One slot per input item; failed items hold `None`.
    pub results: Vec<Option<T>>,
    pub errors: Vec<BatchError>,
}

pub fn run<I, T, F>(items: &[I], mut process: F) -> BatchOutcome<T>
where
    F: FnMut(&I) -> KeylogResult<T>,
{
    let mut results = Vec::with_capacity(items.len());
    let mut errors = Vec::new();
    for (index, item) in items.iter().enumerate() {
        match process(item) {
            Ok(value) => results.push(Some(value)),
            Err(err) => {
                results.push(None);
                errors.push(BatchError {
                    index,
                    error: err.to_string(),
                });
            }
        }
    }
    BatchOutcome {
        total: items.len(),
        successful: items.len() - errors.len(),
        results,
        errors,
    }
}
