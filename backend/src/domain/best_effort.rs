//! Explicit marker for fallible side effects whose failure must not fail the
//! caller.
//!
//! Calling `.best_effort("operation")` on a `Result` logs any error at `warn`
//! and discards it. Use it only where dropping the error is intended, so the
//! call site reads as a decision rather than a forgotten check.

use std::fmt::Display;

use tracing::warn;

/// Extension for results whose error is logged and swallowed.
pub trait BestEffort {
    /// Log the error, if any, under `operation` and discard it.
    fn best_effort(self, operation: &'static str);
}

impl<E: Display> BestEffort for Result<(), E> {
    fn best_effort(self, operation: &'static str) {
        if let Err(error) = self {
            warn!(operation, error = %error, "best-effort operation failed");
        }
    }
}
