use crate::error::ReservationNotifierError;
use reqwest::{Method, StatusCode};
use std::time::Duration;

/// Exponential backoff clamped to `[min, max]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Backoff {
    pub base: Duration,
    pub min: Duration,
    pub max: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            base: Duration::from_millis(500),
            min: Duration::from_millis(500),
            max: Duration::from_secs(4),
        }
    }
}

impl Backoff {
    pub fn new(
        base: Duration,
        min: Duration,
        max: Duration,
    ) -> Self {
        Self { base, min, max }
    }

    /// Delay to wait after the given 1-based attempt failed.
    pub fn delay(
        &self,
        attempt: u32,
    ) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        let delay = self.base.saturating_mul(1u32 << exponent);

        delay.max(self.min).min(self.max)
    }

    fn validate(
        &self,
        name: &str,
    ) -> Result<(), ReservationNotifierError> {
        if self.min > self.max {
            return Err(ReservationNotifierError::configuration(&format!(
                "{name} backoff min ({:?}) is greater than max ({:?})",
                self.min, self.max
            )));
        }

        Ok(())
    }
}

/// Status based retry performed by the HTTP client underneath every attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRetry {
    pub max_attempts: u32,
    pub backoff: Backoff,
    pub statuses: Vec<StatusCode>,
    pub methods: Vec<Method>,
}

impl Default for TransportRetry {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Backoff::default(),
            statuses: vec![
                StatusCode::TOO_MANY_REQUESTS,
                StatusCode::INTERNAL_SERVER_ERROR,
                StatusCode::BAD_GATEWAY,
                StatusCode::SERVICE_UNAVAILABLE,
                StatusCode::GATEWAY_TIMEOUT,
            ],
            // POST is repeated on the assumption that the endpoint is idempotent per notification.
            methods: vec![Method::GET, Method::POST, Method::PUT],
        }
    }
}

impl TransportRetry {
    pub fn disabled() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    pub fn should_retry(
        &self,
        method: &Method,
        status: StatusCode,
        attempt: u32,
    ) -> bool {
        attempt < self.max_attempts && self.methods.contains(method) && self.statuses.contains(&status)
    }
}

/// Both retry layers of a delivery in one place.
///
/// The transport layer runs underneath every application attempt, so a single
/// record can reach the endpoint at most [`RetryPolicy::max_calls_per_record`]
/// times. Use [`TransportRetry::disabled`] to collapse the bound to
/// `max_attempts`.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Backoff,
    pub transport: TransportRetry,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Backoff::default(),
            transport: TransportRetry::default(),
        }
    }
}

impl RetryPolicy {
    pub fn max_calls_per_record(&self) -> u32 {
        self.max_attempts.saturating_mul(self.transport.max_attempts)
    }

    pub fn validate(&self) -> Result<(), ReservationNotifierError> {
        if self.max_attempts == 0 {
            return Err(ReservationNotifierError::configuration("max attempts must be at least 1"));
        }

        if self.transport.max_attempts == 0 {
            return Err(ReservationNotifierError::configuration("transport max attempts must be at least 1"));
        }

        self.backoff.validate("application")?;
        self.transport.backoff.validate("transport")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_doubles_from_base_until_max() {
        let backoff = Backoff::default();

        assert_eq!(Duration::from_millis(500), backoff.delay(1));
        assert_eq!(Duration::from_secs(1), backoff.delay(2));
        assert_eq!(Duration::from_secs(2), backoff.delay(3));
        assert_eq!(Duration::from_secs(4), backoff.delay(4));
        assert_eq!(Duration::from_secs(4), backoff.delay(10));
        assert_eq!(Duration::from_secs(4), backoff.delay(u32::MAX));
    }

    #[test]
    fn delay_never_goes_below_min() {
        let backoff = Backoff::new(Duration::from_millis(10), Duration::from_millis(100), Duration::from_secs(1));

        assert_eq!(Duration::from_millis(100), backoff.delay(1));
        assert_eq!(Duration::from_millis(160), backoff.delay(5));
    }

    #[test]
    fn transport_retries_only_allowed_statuses_and_methods() {
        let transport = TransportRetry::default();

        assert!(transport.should_retry(&Method::POST, StatusCode::SERVICE_UNAVAILABLE, 1));
        assert!(transport.should_retry(&Method::POST, StatusCode::TOO_MANY_REQUESTS, 2));
        assert!(!transport.should_retry(&Method::POST, StatusCode::SERVICE_UNAVAILABLE, 3));
        assert!(!transport.should_retry(&Method::POST, StatusCode::NOT_IMPLEMENTED, 1));
        assert!(!transport.should_retry(&Method::PATCH, StatusCode::SERVICE_UNAVAILABLE, 1));
        assert!(!TransportRetry::disabled().should_retry(&Method::POST, StatusCode::SERVICE_UNAVAILABLE, 1));
    }

    #[test]
    fn max_calls_multiplies_both_layers() {
        assert_eq!(9, RetryPolicy::default().max_calls_per_record());

        let policy = RetryPolicy {
            transport: TransportRetry::disabled(),
            ..RetryPolicy::default()
        };
        assert_eq!(3, policy.max_calls_per_record());
    }

    #[test]
    fn validate_rejects_zero_attempts_and_inverted_bounds() {
        let zero_attempts = RetryPolicy {
            max_attempts: 0,
            ..RetryPolicy::default()
        };
        assert!(zero_attempts.validate().is_err_and(|error| error.is_configuration()));

        let inverted = RetryPolicy {
            backoff: Backoff::new(Duration::from_millis(1), Duration::from_secs(2), Duration::from_secs(1)),
            ..RetryPolicy::default()
        };
        assert!(inverted.validate().is_err());

        assert!(RetryPolicy::default().validate().is_ok());
    }
}
