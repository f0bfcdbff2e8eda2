use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationStatus {
    #[serde(rename = "CONFIRMED")]
    Confirmed,
}

/// A confirmed reservation ready to be notified. The serialized form is the request body.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct NotificationRecord {
    pub pnr: String,
    pub passenger: String,
    pub origin: String,
    pub destination: String,
    pub total: Decimal,
    pub status: NotificationStatus,
}

impl NotificationRecord {
    pub fn confirmed(
        pnr: &str,
        passenger: &str,
        origin: &str,
        destination: &str,
        total: Decimal,
    ) -> Self {
        Self {
            pnr: pnr.to_string(),
            passenger: passenger.to_string(),
            origin: origin.to_string(),
            destination: destination.to_string(),
            total,
            status: NotificationStatus::Confirmed,
        }
    }
}
