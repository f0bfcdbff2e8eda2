use crate::app_state::AppState;
use crate::batch_executor::BatchExecutor;
use crate::batching::Batches;
use crate::delivery_config::DeliveryConfig;
use crate::dispatch_outcome::RunSummary;
use crate::error::ReservationNotifierError;
use crate::notification_record::NotificationRecord;
use crate::result_sink::{ResultSink, NOTHING_TO_SEND};
use std::future::Future;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

pub struct NotificationDispatcher {
    config: DeliveryConfig,
    signal: Option<Box<dyn Future<Output = ()> + Send>>,
}

impl NotificationDispatcher {
    pub fn new(config: DeliveryConfig) -> Self {
        Self { config, signal: None }
    }

    /// Stops admitting batches once `signal` completes. The batch in flight
    /// is drained and recorded before the run returns.
    pub fn with_graceful_shutdown(
        self,
        signal: impl Future<Output = ()> + Send + 'static,
    ) -> Self {
        Self {
            config: self.config,
            signal: Some(Box::new(signal)),
        }
    }

    pub fn config(&self) -> &DeliveryConfig {
        &self.config
    }

    pub async fn run<I>(
        self,
        records: I,
        log_path: &Path,
    ) -> Result<RunSummary, ReservationNotifierError>
    where
        I: IntoIterator<Item = NotificationRecord>,
    {
        let run_id = Uuid::now_v7();
        let app_state = AppState::new(self.config)?;
        let batches = Batches::new(records, app_state.config.batch_size)?;
        let sink = ResultSink::create(log_path, app_state.config.dry_run).await?;
        let executor = BatchExecutor::new(app_state.clone());

        let stopping = Arc::new(AtomicBool::new(false));
        let watcher = self.signal.map(|box_signal| {
            let shutdown_signal = Box::into_pin(box_signal);
            let stopping = stopping.clone();
            tokio::spawn(async move {
                shutdown_signal.await;
                stopping.store(true, Ordering::SeqCst);
            })
        });

        info!(
            "Dispatching notifications run_id={} batch_size={} workers={} dry_run={} max_calls_per_record={}",
            run_id,
            app_state.config.batch_size,
            executor.max_workers(),
            app_state.config.dry_run,
            app_state.config.retry_policy.max_calls_per_record()
        );

        let mut interrupted = false;
        let mut batch_number = 0;

        for batch in batches {
            if stopping.load(Ordering::SeqCst) {
                warn!("Shutdown requested, not admitting batch {} of run {}", batch_number + 1, run_id);
                interrupted = true;
                break;
            }

            batch_number += 1;
            let batch_len = batch.len();
            let outcomes = executor.run_batch(batch, &sink).await?;
            let succeeded = outcomes.iter().filter(|outcome| outcome.is_success()).count();

            info!("Batch {} drained: {} record(s), {} succeeded, {} failed", batch_number, batch_len, succeeded, batch_len - succeeded);
        }

        if let Some(watcher) = watcher {
            watcher.abort();
        }

        let mut summary = sink.summary().await;
        summary.interrupted = interrupted;

        if summary.total() == 0 && !interrupted {
            sink.record_nothing_to_send().await?;
            info!("{}", NOTHING_TO_SEND);
        }

        info!("notifications: success={} failed={} dry_run={}", summary.success_count, summary.failure_count, summary.dry_run);

        Ok(summary)
    }
}
