use std::time::Duration;

use crate::error::{ErrorKind, ReservationNotifierError};
use crate::retry_policy::TransportRetry;
use crate::transport_retry::TransportRetryMiddleware;
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};

/// Connection pooled client shared by every dispatch of a run.
#[derive(Clone)]
pub struct HttpGateway {
    pub client: ClientWithMiddleware,
}

impl HttpGateway {
    pub fn new(
        request_timeout: Duration,
        transport_retry: TransportRetry,
    ) -> Result<Self, ReservationNotifierError> {
        let client = ClientBuilder::new(
            Client::builder()
                .timeout(request_timeout)
                .build()
                .map_err(|error| ReservationNotifierError::new(ErrorKind::Transport, &error.to_string(), "Failed to create http gateway client"))?,
        )
        .with(TransportRetryMiddleware::new(transport_retry))
        .build();

        Ok(Self { client })
    }
}
