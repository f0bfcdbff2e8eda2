use crate::dispatch_outcome::RunSummary;
use crate::error::ReservationNotifierError;
use crate::metrics::Timer;
use crate::notification_dispatcher::NotificationDispatcher;
use crate::reservation::RESERVATION_COLUMNS;
use crate::reservation_loader::ReservationLoader;
use crate::reservation_processor::{ProcessedReservation, ReservationProcessor};
use crate::reservation_validator::{InvalidReservation, ReservationValidator};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

pub const INVALID_ROWS_FILE: &str = "invalid_rows.csv";
pub const PROCESSED_FILE: &str = "processed.csv";
pub const NOTIFICATIONS_LOG_FILE: &str = "notifications.log";

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineReport {
    pub invalid_count: usize,
    pub processed_count: usize,
    pub confirmation_count: usize,
    pub summary: RunSummary,
    pub notifications_log: PathBuf,
}

/// Load, validate, enrich, then notify every confirmed reservation.
pub struct ReservationPipeline;

impl ReservationPipeline {
    #[instrument(skip_all, name = "reservation_pipeline")]
    pub async fn run(
        input: &Path,
        output_dir: &Path,
        dispatcher: NotificationDispatcher,
    ) -> Result<PipelineReport, ReservationNotifierError> {
        let _timer = Timer::start("main_run");

        dispatcher.config().validate()?;

        tokio::fs::create_dir_all(output_dir)
            .await
            .map_err(|error| ReservationNotifierError::storage(&error.to_string(), &format!("Failed to create output directory {}", output_dir.display())))?;

        let rows = ReservationLoader::load(input)?;
        let (valid, invalid) = ReservationValidator::new()?.validate(rows);

        let invalid_path = output_dir.join(INVALID_ROWS_FILE);
        Self::write_invalid(&invalid_path, &invalid)?;
        info!("Saved invalid rows: {} ({})", invalid_path.display(), invalid.len());

        let processed = ReservationProcessor::process(valid);
        let processed_path = output_dir.join(PROCESSED_FILE);
        Self::write_processed(&processed_path, &processed)?;
        info!("Saved processed rows: {} ({})", processed_path.display(), processed.len());

        let confirmations = ReservationProcessor::confirmations(&processed);
        let confirmation_count = confirmations.len();

        let notifications_log = output_dir.join(NOTIFICATIONS_LOG_FILE);
        let summary = dispatcher.run(confirmations, &notifications_log).await?;

        Ok(PipelineReport {
            invalid_count: invalid.len(),
            processed_count: processed.len(),
            confirmation_count,
            summary,
            notifications_log,
        })
    }

    fn write_invalid(
        path: &Path,
        invalid: &[InvalidReservation],
    ) -> Result<(), ReservationNotifierError> {
        let mut header = RESERVATION_COLUMNS.to_vec();
        header.push("Reason");

        Self::write_csv(path, &header, invalid.iter().map(InvalidReservation::to_record))
    }

    fn write_processed(
        path: &Path,
        processed: &[ProcessedReservation],
    ) -> Result<(), ReservationNotifierError> {
        let mut header = RESERVATION_COLUMNS.to_vec();
        header.extend(["Tax", "Total"]);

        Self::write_csv(path, &header, processed.iter())
    }

    /// Writes the header explicitly so an empty file still carries its columns.
    fn write_csv<T: Serialize>(
        path: &Path,
        header: &[&str],
        records: impl Iterator<Item = T>,
    ) -> Result<(), ReservationNotifierError> {
        let storage_error = |error: csv::Error| ReservationNotifierError::storage(&error.to_string(), &format!("Failed to write {}", path.display()));

        let mut writer = csv::WriterBuilder::new().has_headers(false).from_path(path).map_err(storage_error)?;

        writer.write_record(header).map_err(storage_error)?;
        for record in records {
            writer.serialize(record).map_err(storage_error)?;
        }

        writer
            .flush()
            .map_err(|error| ReservationNotifierError::storage(&error.to_string(), &format!("Failed to write {}", path.display())))
    }
}
