use crate::error::LinkError;

/// Marks a call site as non-fatal: failures are logged at `debug` and discarded.
pub fn best_effort<T>(operation: &'static str, result: Result<T, LinkError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::debug!(operation, error = %err, "discarding non-fatal serial link failure");
            None
        }
    }
}
