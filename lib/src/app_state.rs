use crate::delivery_config::DeliveryConfig;
use crate::error::ReservationNotifierError;
use crate::http_gateway::HttpGateway;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<DeliveryConfig>,
    pub http_gateway: HttpGateway,
}

impl AppState {
    pub fn new(config: DeliveryConfig) -> Result<Self, ReservationNotifierError> {
        config.validate()?;

        let http_gateway = HttpGateway::new(config.request_timeout, config.retry_policy.transport.clone())?;

        Ok(Self {
            config: Arc::new(config),
            http_gateway,
        })
    }
}
