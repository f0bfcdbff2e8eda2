use crate::notification_record::NotificationRecord;
use crate::reservation::{Reservation, ReservationStatus};
use rust_decimal::Decimal;
use serde::Serialize;

/// 8% tax applied on top of the fare.
pub const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// Row of `processed.csv`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ProcessedReservation {
    #[serde(rename = "PNR")]
    pub pnr: String,
    #[serde(rename = "Passenger")]
    pub passenger: String,
    #[serde(rename = "Origin")]
    pub origin: String,
    #[serde(rename = "Destination")]
    pub destination: String,
    #[serde(rename = "Fare")]
    pub fare: Decimal,
    #[serde(rename = "Status")]
    pub status: ReservationStatus,
    #[serde(rename = "Tax")]
    pub tax: Decimal,
    #[serde(rename = "Total")]
    pub total: Decimal,
}

impl ProcessedReservation {
    pub fn to_notification(&self) -> Option<NotificationRecord> {
        match self.status {
            ReservationStatus::Confirmed => Some(NotificationRecord::confirmed(&self.pnr, &self.passenger, &self.origin, &self.destination, self.total)),
            ReservationStatus::Cancelled | ReservationStatus::Pending => None,
        }
    }
}

pub struct ReservationProcessor;

impl ReservationProcessor {
    pub fn process(reservations: Vec<Reservation>) -> Vec<ProcessedReservation> {
        reservations
            .into_iter()
            .map(|reservation| {
                let tax = (reservation.fare * TAX_RATE).round_dp(2);
                let total = (reservation.fare + tax).round_dp(2);

                ProcessedReservation {
                    pnr: reservation.pnr,
                    passenger: reservation.passenger,
                    origin: reservation.origin,
                    destination: reservation.destination,
                    fare: reservation.fare,
                    status: reservation.status,
                    tax,
                    total,
                }
            })
            .collect()
    }

    pub fn confirmations(processed: &[ProcessedReservation]) -> Vec<NotificationRecord> {
        processed.iter().filter_map(ProcessedReservation::to_notification).collect()
    }
}
