use crate::dispatch_outcome::{DispatchOutcome, RunSummary};
use crate::error::ReservationNotifierError;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

pub const NOTHING_TO_SEND: &str = "No confirmations to send.";

struct SinkState {
    file: File,
    summary: RunSummary,
}

/// Append-only JSON lines log of dispatch outcomes plus the run counters.
///
/// Clones share the same file; every append happens under one lock so lines
/// from concurrent completions never interleave.
#[derive(Clone)]
pub struct ResultSink {
    path: PathBuf,
    state: Arc<Mutex<SinkState>>,
}

impl ResultSink {
    /// Creates (or truncates) the log at `path`.
    pub async fn create(
        path: &Path,
        dry_run: bool,
    ) -> Result<Self, ReservationNotifierError> {
        let file = File::create(path)
            .await
            .map_err(|error| ReservationNotifierError::storage(&error.to_string(), &format!("Failed to create notification log {}", path.display())))?;

        Ok(Self {
            path: path.to_path_buf(),
            state: Arc::new(Mutex::new(SinkState {
                file,
                summary: RunSummary {
                    dry_run,
                    ..RunSummary::default()
                },
            })),
        })
    }

    pub async fn record(
        &self,
        outcome: &DispatchOutcome,
    ) -> Result<(), ReservationNotifierError> {
        let mut line = outcome.to_log_entry().to_string();
        line.push('\n');

        let mut state = self.state.lock().await;
        Self::append(&mut state.file, &line, &self.path).await?;

        if outcome.is_success() {
            state.summary.success_count += 1;
        } else {
            state.summary.failure_count += 1;
        }

        Ok(())
    }

    pub async fn record_nothing_to_send(&self) -> Result<(), ReservationNotifierError> {
        let mut state = self.state.lock().await;
        Self::append(&mut state.file, &format!("{NOTHING_TO_SEND}\n"), &self.path).await
    }

    pub async fn summary(&self) -> RunSummary {
        self.state.lock().await.summary
    }

    async fn append(
        file: &mut File,
        line: &str,
        path: &Path,
    ) -> Result<(), ReservationNotifierError> {
        file.write_all(line.as_bytes()).await.map_err(|error| Self::write_error(&error, path))?;
        file.flush().await.map_err(|error| Self::write_error(&error, path))
    }

    fn write_error(
        error: &std::io::Error,
        path: &Path,
    ) -> ReservationNotifierError {
        ReservationNotifierError::storage(&error.to_string(), &format!("Failed to append to notification log {}", path.display()))
    }
}
