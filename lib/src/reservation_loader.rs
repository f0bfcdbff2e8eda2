use crate::error::ReservationNotifierError;
use crate::reservation::{ReservationRow, RESERVATION_COLUMNS};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::info;

pub struct ReservationLoader;

impl ReservationLoader {
    pub fn load(path: &Path) -> Result<Vec<ReservationRow>, ReservationNotifierError> {
        if !path.exists() {
            return Err(ReservationNotifierError::input(
                &format!("Input file not found: {}", path.display()),
                "Failed to load reservations",
            ));
        }

        let rows = Self::from_reader(
            std::fs::File::open(path).map_err(|error| ReservationNotifierError::input(&error.to_string(), "Failed to open reservations file"))?,
        )?;

        info!("Loaded {} reservation(s) from {}", rows.len(), path.display());

        Ok(rows)
    }

    /// Reads, normalizes and de-duplicates reservations, keeping the last row seen for a PNR.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ReservationRow>, ReservationNotifierError> {
        let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let missing = RESERVATION_COLUMNS
            .iter()
            .filter(|column| !headers.iter().any(|header| header.trim() == **column))
            .collect::<Vec<_>>();

        if !missing.is_empty() {
            return Err(ReservationNotifierError::input(&format!("Missing columns: {missing:?}"), "Invalid reservations file"));
        }

        let trimmed_headers = headers.iter().map(str::trim).collect::<csv::StringRecord>();
        csv_reader.set_headers(trimmed_headers);

        let mut rows = vec![];
        for record in csv_reader.deserialize::<ReservationRow>() {
            let row = record?.normalized();
            if !row.is_blank() {
                rows.push(row);
            }
        }

        Ok(Self::deduplicate(rows))
    }

    fn deduplicate(rows: Vec<ReservationRow>) -> Vec<ReservationRow> {
        let last_position = rows.iter().enumerate().map(|(index, row)| (row.pnr.clone(), index)).collect::<HashMap<String, usize>>();

        rows.into_iter()
            .enumerate()
            .filter(|(index, row)| last_position.get(&row.pnr) == Some(index))
            .map(|(_, row)| row)
            .collect()
    }
}
