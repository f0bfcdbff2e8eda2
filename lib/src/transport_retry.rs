use crate::retry_policy::TransportRetry;
use http::Extensions;
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next};
use tracing::debug;

/// Repeats a request while the endpoint answers with a retryable status.
///
/// Network errors are returned untouched; they are classified by the caller.
pub struct TransportRetryMiddleware {
    policy: TransportRetry,
}

impl TransportRetryMiddleware {
    pub fn new(policy: TransportRetry) -> Self {
        Self { policy }
    }
}

#[async_trait::async_trait]
impl Middleware for TransportRetryMiddleware {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        let mut attempt = 1;

        loop {
            // Streaming bodies cannot be replayed.
            let Some(duplicate) = req.try_clone() else {
                return next.run(req, extensions).await;
            };

            let response = next.clone().run(duplicate, extensions).await?;
            let status = response.status();

            if !self.policy.should_retry(req.method(), status, attempt) {
                return Ok(response);
            }

            let delay = self.policy.backoff.delay(attempt);
            debug!("Transport retry {} of {} for {} after status {} in {:?}", attempt, self.policy.max_attempts, req.url(), status, delay);

            drop(response);
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}
