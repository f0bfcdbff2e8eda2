use crate::app_state::AppState;
use crate::dispatch_outcome::{DeliveryError, DispatchOutcome};
use crate::notification_record::NotificationRecord;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Response, StatusCode};
use serde_json::{json, Value};
use tracing::{instrument, warn};

pub struct NotificationService;

impl NotificationService {
    /// Delivers one record, retrying transient failures with backoff.
    ///
    /// Never fails: exhausted retries and permanent errors become a
    /// [`DispatchOutcome::Failure`].
    #[instrument(skip_all, name = "dispatch", fields(pnr = %record.pnr))]
    pub async fn dispatch(
        app_state: &AppState,
        record: &NotificationRecord,
    ) -> DispatchOutcome {
        if app_state.config.dry_run {
            return DispatchOutcome::dry_run(&record.pnr);
        }

        let retry_policy = &app_state.config.retry_policy;
        let mut attempt = 1;

        loop {
            match Self::send(app_state, record).await {
                Ok(response_body) => return DispatchOutcome::Success { response_body },
                Err(error) if error.is_transient() && attempt < retry_policy.max_attempts => {
                    let delay = retry_policy.backoff.delay(attempt);
                    warn!("Attempt {} of {} failed: {}; retrying in {:?}", attempt, retry_policy.max_attempts, error, delay);

                    tokio::time::sleep(delay).await;
                    attempt += 1;
                },
                Err(error) => {
                    warn!("Giving up after {} attempt(s): {}", attempt, error);
                    return DispatchOutcome::from(error);
                },
            }
        }
    }

    async fn send(
        app_state: &AppState,
        record: &NotificationRecord,
    ) -> Result<Value, DeliveryError> {
        let config = &app_state.config;
        let payload = serde_json::to_vec(record).map_err(|error| DeliveryError::Permanent(format!("Failed to serialize notification: {error}")))?;

        let response = app_state
            .http_gateway
            .client
            .post(&config.endpoint)
            .header(AUTHORIZATION, format!("Bearer {}", config.api_key))
            .header(CONTENT_TYPE, "application/json")
            .header("x-idempotent-key", record.pnr.as_str())
            .timeout(config.request_timeout)
            .body(payload)
            .send()
            .await
            .map_err(Self::classify_error)?;

        Self::classify_response(response).await
    }

    async fn classify_response(response: Response) -> Result<Value, DeliveryError> {
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(DeliveryError::Transient(format!("Rate limited {status}")));
        }

        if status.is_server_error() {
            return Err(DeliveryError::Transient(format!("Server error {status}")));
        }

        if status.is_client_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(DeliveryError::Permanent(format!("Client error {status}: {body}")));
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/json"));

        if !is_json {
            return Ok(json!({"status": "ok"}));
        }

        let body = response.bytes().await.map_err(|error| DeliveryError::Transient(error.to_string()))?;

        serde_json::from_slice::<Value>(&body).map_err(|error| DeliveryError::Permanent(format!("Malformed response body: {error}")))
    }

    fn classify_error(error: reqwest_middleware::Error) -> DeliveryError {
        match error {
            reqwest_middleware::Error::Reqwest(error) if error.is_timeout() || error.is_connect() || error.is_request() || error.is_body() => {
                DeliveryError::Transient(error.to_string())
            },
            other => DeliveryError::Permanent(other.to_string()),
        }
    }
}
