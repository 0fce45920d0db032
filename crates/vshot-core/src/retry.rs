//! Bounded fixed-delay retry for cross-context message delivery.
//!
//! Delivery failures between the capture side and the background service
//! are transient (the receiving end may not exist yet while the service is
//! starting), so the policy is a small fixed number of attempts with a
//! constant delay rather than exponential backoff.

use std::time::Duration;

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Do not retry.
    NoRetry,
    /// Retry after the given delay.
    RetryAfter(Duration),
}

/// Fixed-delay retry policy.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first).
    pub max_attempts: u32,
    /// Delay between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_millis(250),
        }
    }
}

impl RetryPolicy {
    /// `attempt` is 1-based (1 = first attempt). Returns `NoRetry` once the
    /// attempt budget is spent.
    pub fn decide(&self, attempt: u32) -> RetryDecision {
        if attempt >= self.max_attempts {
            RetryDecision::NoRetry
        } else {
            RetryDecision::RetryAfter(self.delay)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_is_constant_across_attempts() {
        let policy = RetryPolicy::default();
        assert_eq!(
            policy.decide(1),
            RetryDecision::RetryAfter(Duration::from_millis(250))
        );
        assert_eq!(policy.decide(1), policy.decide(2));
    }

    #[test]
    fn respects_max_attempts() {
        let policy = RetryPolicy {
            max_attempts: 3,
            delay: Duration::from_millis(1),
        };
        assert!(matches!(policy.decide(1), RetryDecision::RetryAfter(_)));
        assert!(matches!(policy.decide(2), RetryDecision::RetryAfter(_)));
        assert_eq!(policy.decide(3), RetryDecision::NoRetry);
        assert_eq!(policy.decide(4), RetryDecision::NoRetry);
    }
}
