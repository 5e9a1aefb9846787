//! Error classification, recovery guidance, and graceful degradation for
//! worker-tool failures (§4.3).
//!
//! The four pattern tables below are kept as data, not code, per the
//! "Error classification as pattern table" design note (§9) — tuning or
//! testing a category means editing one array, not a branch of `if`s.

mod degradation;
mod guide;
mod patterns;

pub use degradation::{handle_degradation, DegradedResponse};
pub use guide::{classify_error_detail, recovery_guide};
pub use patterns::{classify_error, retry_delay_ms};

#[cfg(test)]
mod tests {
    use super::*;
    use kernel_types::ErrorType;

    #[test]
    fn classification_priority_is_auth_first() {
        // "unauthorized" would also loosely read as a permanent/validation
        // issue; auth must win per the priority order in §4.3.
        assert_eq!(classify_error("401 unauthorized"), ErrorType::AuthRequired);
    }

    #[test]
    fn unmatched_message_defaults_retryable() {
        assert_eq!(classify_error("something weird happened"), ErrorType::Retryable);
    }
}
