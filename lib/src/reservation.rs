use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const RESERVATION_COLUMNS: [&str; 6] = ["PNR", "Passenger", "Origin", "Destination", "Fare", "Status"];

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationStatus {
    #[serde(rename = "CONFIRMED")]
    Confirmed,
    #[serde(rename = "CANCELLED")]
    Cancelled,
    #[serde(rename = "PENDING")]
    Pending,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Confirmed => "CONFIRMED",
            ReservationStatus::Cancelled => "CANCELLED",
            ReservationStatus::Pending => "PENDING",
        }
    }
}

impl FromStr for ReservationStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "CONFIRMED" => Ok(ReservationStatus::Confirmed),
            "CANCELLED" => Ok(ReservationStatus::Cancelled),
            "PENDING" => Ok(ReservationStatus::Pending),
            other => Err(format!("unknown reservation status '{other}'")),
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reservation as read from the input file, after normalization.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct ReservationRow {
    #[serde(rename = "PNR", default)]
    pub pnr: String,
    #[serde(rename = "Passenger", default)]
    pub passenger: String,
    #[serde(rename = "Origin", default)]
    pub origin: String,
    #[serde(rename = "Destination", default)]
    pub destination: String,
    #[serde(rename = "Fare", default)]
    pub fare: String,
    #[serde(rename = "Status", default)]
    pub status: String,
}

impl ReservationRow {
    pub fn normalized(self) -> Self {
        Self {
            pnr: self.pnr.trim().to_string(),
            passenger: self.passenger.trim().to_string(),
            origin: self.origin.trim().to_uppercase(),
            destination: self.destination.trim().to_uppercase(),
            fare: self.fare.trim().to_string(),
            status: self.status.trim().to_uppercase(),
        }
    }

    pub fn is_blank(&self) -> bool {
        [&self.pnr, &self.passenger, &self.origin, &self.destination, &self.fare, &self.status].iter().all(|field| field.is_empty())
    }

    pub fn fare_amount(&self) -> Option<Decimal> {
        Decimal::from_str(&self.fare).ok()
    }
}

/// A reservation that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    pub pnr: String,
    pub passenger: String,
    pub origin: String,
    pub destination: String,
    pub fare: Decimal,
    pub status: ReservationStatus,
}
