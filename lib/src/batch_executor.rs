use crate::app_state::AppState;
use crate::dispatch_outcome::DispatchOutcome;
use crate::error::ReservationNotifierError;
use crate::notification_record::NotificationRecord;
use crate::notification_service::NotificationService;
use crate::result_sink::ResultSink;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, instrument};

/// Runs every record of a batch concurrently and waits for all of them.
///
/// The semaphore is created once per run and shared by all batches, so at
/// most `max_workers` deliveries are in flight at any time.
#[derive(Clone)]
pub struct BatchExecutor {
    app_state: AppState,
    workers: Arc<Semaphore>,
}

impl BatchExecutor {
    pub fn new(app_state: AppState) -> Self {
        let workers = Arc::new(Semaphore::new(app_state.config.max_workers));

        Self { app_state, workers }
    }

    /// Outcomes come back in completion order and are recorded in `sink` as
    /// each delivery finishes. Only a sink failure aborts the batch.
    #[instrument(skip_all, name = "run_batch", fields(batch_len = records.len()))]
    pub async fn run_batch(
        &self,
        records: Vec<NotificationRecord>,
        sink: &ResultSink,
    ) -> Result<Vec<DispatchOutcome>, ReservationNotifierError> {
        let mut tasks = JoinSet::new();

        for record in records {
            let app_state = self.app_state.clone();
            let workers = self.workers.clone();

            tasks.spawn(async move {
                let _permit = workers.acquire_owned().await;
                NotificationService::dispatch(&app_state, &record).await
            });
        }

        let mut outcomes = Vec::with_capacity(tasks.len());

        while let Some(joined) = tasks.join_next().await {
            let outcome = match joined {
                Ok(outcome) => outcome,
                Err(join_error) => {
                    error!("Dispatch task did not complete: {}", join_error);
                    DispatchOutcome::Failure {
                        error_message: join_error.to_string(),
                    }
                },
            };

            if let Err(sink_error) = sink.record(&outcome).await {
                tasks.abort_all();
                while tasks.join_next().await.is_some() {}
                return Err(sink_error);
            }

            outcomes.push(outcome);
        }

        Ok(outcomes)
    }

    pub fn max_workers(&self) -> usize {
        self.app_state.config.max_workers
    }
}
