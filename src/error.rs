//! Error type for the fallible operations of this crate.
//!
//! Allocation is the only thing that can fail here. A failed match is not an
//! error (the matching functions return `false` and leave the cursor alone),
//! and malformed numeric text produces a best-effort value rather than a
//! failure (see [`crate::value`]). Every operation that returns [`AllocError`]
//! guarantees that the argument vector is left exactly as it was before the
//! call; a partially applied splice is never observable.

use std::collections::TryReserveError;

use thiserror::Error;

/// Failure while growing the argument vector or expanding a response buffer.
#[derive(Debug, Error)]
pub enum AllocError {
    /// The backing store refused to reserve room for the new entries.
    #[error("argument vector allocation failed: {0}")]
    Reserve(#[from] TryReserveError),

    /// Growing would push the vector past its configured entry limit.
    ///
    /// The limit is opt-in (see [`crate::ArgVec::with_limit`]) and acts as a
    /// backstop against runaway response-file expansion. It is also the
    /// deterministic way to exercise the failure path in tests.
    #[error("argument vector limit exceeded: {requested} entries requested, limit is {limit}")]
    LimitExceeded {
        /// Total entry count the operation would have produced.
        requested: usize,
        /// Configured maximum entry count.
        limit: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_exceeded_message_names_both_counts() {
        let e = AllocError::LimitExceeded {
            requested: 12,
            limit: 8,
        };
        let msg = e.to_string();
        assert!(msg.contains("12"));
        assert!(msg.contains("8"));
    }
}
