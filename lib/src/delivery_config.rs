use crate::environment::Environment;
use crate::error::ReservationNotifierError;
use crate::retry_policy::{Backoff, RetryPolicy, TransportRetry};
use reqwest::Url;
use std::time::Duration;
use tokio::sync::Semaphore;

pub const DEFAULT_API_URL: &str = "https://example.com/api/send-confirmation";
pub const DEFAULT_API_KEY: &str = "DEMO_KEY";

#[derive(Debug, Clone)]
pub struct DeliveryConfig {
    pub endpoint: String,
    pub api_key: String,
    pub dry_run: bool,
    pub batch_size: usize,
    pub max_workers: usize,
    pub retry_policy: RetryPolicy,
    pub request_timeout: Duration,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_API_URL.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            dry_run: true,
            batch_size: 25,
            max_workers: 8,
            retry_policy: RetryPolicy::default(),
            request_timeout: Duration::from_secs(8),
        }
    }
}

impl DeliveryConfig {
    pub fn from_env() -> Result<Self, ReservationNotifierError> {
        let defaults = Self::default();

        let backoff = Backoff::new(
            Duration::from_millis(Environment::u64("BACKOFF_BASE_IN_MILLIS", 500)?),
            Duration::from_millis(Environment::u64("BACKOFF_MIN_IN_MILLIS", 500)?),
            Duration::from_millis(Environment::u64("BACKOFF_MAX_IN_MILLIS", 4000)?),
        );

        let max_attempts = Environment::usize("MAX_ATTEMPTS", 3)?;
        let transport_max_attempts = Environment::usize("TRANSPORT_MAX_ATTEMPTS", 3)?;

        let retry_policy = RetryPolicy {
            max_attempts: Self::attempts("MAX_ATTEMPTS", max_attempts)?,
            backoff: backoff.clone(),
            transport: TransportRetry {
                max_attempts: Self::attempts("TRANSPORT_MAX_ATTEMPTS", transport_max_attempts)?,
                backoff,
                ..TransportRetry::default()
            },
        };

        Ok(Self {
            endpoint: Environment::string("API_URL", &defaults.endpoint),
            api_key: Environment::string("API_KEY", &defaults.api_key),
            dry_run: Environment::boolean("DRY_RUN", defaults.dry_run),
            batch_size: Environment::usize("BATCH_SIZE", defaults.batch_size)?,
            max_workers: Environment::usize("WORKERS", defaults.max_workers)?,
            retry_policy,
            request_timeout: Duration::from_millis(Environment::u64("REQUEST_TIMEOUT_IN_MILLIS", 8000)?),
        })
    }

    pub fn with_endpoint(
        self,
        endpoint: &str,
    ) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            ..self
        }
    }

    pub fn with_api_key(
        self,
        api_key: &str,
    ) -> Self {
        Self {
            api_key: api_key.to_string(),
            ..self
        }
    }

    pub fn with_dry_run(
        self,
        dry_run: bool,
    ) -> Self {
        Self { dry_run, ..self }
    }

    pub fn with_batch_size(
        self,
        batch_size: usize,
    ) -> Self {
        Self { batch_size, ..self }
    }

    pub fn with_max_workers(
        self,
        max_workers: usize,
    ) -> Self {
        Self { max_workers, ..self }
    }

    pub fn with_retry_policy(
        self,
        retry_policy: RetryPolicy,
    ) -> Self {
        Self { retry_policy, ..self }
    }

    pub fn with_request_timeout(
        self,
        request_timeout: Duration,
    ) -> Self {
        Self { request_timeout, ..self }
    }

    pub fn validate(&self) -> Result<(), ReservationNotifierError> {
        if self.batch_size == 0 {
            return Err(ReservationNotifierError::configuration("batch size must be a positive integer"));
        }

        if self.max_workers == 0 {
            return Err(ReservationNotifierError::configuration("workers must be a positive integer"));
        }

        if self.max_workers > Semaphore::MAX_PERMITS {
            return Err(ReservationNotifierError::configuration(&format!("workers must not exceed {}", Semaphore::MAX_PERMITS)));
        }

        self.retry_policy.validate()?;

        if self.dry_run {
            return Ok(());
        }

        if self.endpoint.trim().is_empty() {
            return Err(ReservationNotifierError::configuration("API_URL is required when not in dry-run"));
        }

        Url::parse(&self.endpoint).map_err(|error| ReservationNotifierError::configuration(&format!("API_URL '{}' is not a valid url: {error}", self.endpoint)))?;

        if self.api_key.trim().is_empty() {
            return Err(ReservationNotifierError::configuration("API_KEY is required when not in dry-run"));
        }

        Ok(())
    }

    fn attempts(
        env_name: &str,
        value: usize,
    ) -> Result<u32, ReservationNotifierError> {
        u32::try_from(value).map_err(|_| ReservationNotifierError::configuration(&format!("{env_name} is too large")))
    }
}
