pub mod app_state;
pub mod batch_executor;
pub mod batching;
pub mod delivery_config;
pub mod dispatch_outcome;
pub mod environment;
pub mod error;
pub mod http_gateway;
pub mod metrics;
pub mod notification_dispatcher;
pub mod notification_record;
pub mod notification_service;
pub mod reservation;
pub mod reservation_loader;
pub mod reservation_pipeline;
pub mod reservation_processor;
pub mod reservation_validator;
pub mod result_sink;
pub mod retry_policy;
pub mod shutdown;
pub mod transport_retry;
