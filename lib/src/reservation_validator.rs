use crate::error::ReservationNotifierError;
use crate::reservation::{Reservation, ReservationRow, ReservationStatus};
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Violation {
    BlankPnr,
    BlankPassenger,
    InvalidOrigin,
    InvalidDestination,
    SameOriginDestination,
    InvalidFare,
    NegativeFare,
    InvalidStatus,
}

impl Violation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Violation::BlankPnr => "blank PNR",
            Violation::BlankPassenger => "blank Passenger",
            Violation::InvalidOrigin => "invalid Origin",
            Violation::InvalidDestination => "invalid Destination",
            Violation::SameOriginDestination => "same Origin/Destination",
            Violation::InvalidFare => "invalid Fare",
            Violation::NegativeFare => "negative Fare",
            Violation::InvalidStatus => "invalid Status",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvalidReservation {
    pub row: ReservationRow,
    pub violations: BTreeSet<Violation>,
}

impl InvalidReservation {
    pub fn reason(&self) -> String {
        self.violations.iter().map(Violation::as_str).collect::<Vec<&str>>().join("|")
    }

    pub fn to_record(&self) -> InvalidReservationRecord<'_> {
        InvalidReservationRecord {
            pnr: &self.row.pnr,
            passenger: &self.row.passenger,
            origin: &self.row.origin,
            destination: &self.row.destination,
            fare: &self.row.fare,
            status: &self.row.status,
            reason: self.reason(),
        }
    }
}

/// Row of `invalid_rows.csv`.
#[derive(Serialize, Debug)]
pub struct InvalidReservationRecord<'a> {
    #[serde(rename = "PNR")]
    pub pnr: &'a str,
    #[serde(rename = "Passenger")]
    pub passenger: &'a str,
    #[serde(rename = "Origin")]
    pub origin: &'a str,
    #[serde(rename = "Destination")]
    pub destination: &'a str,
    #[serde(rename = "Fare")]
    pub fare: &'a str,
    #[serde(rename = "Status")]
    pub status: &'a str,
    #[serde(rename = "Reason")]
    pub reason: String,
}

pub struct ReservationValidator {
    iata: Regex,
}

impl ReservationValidator {
    pub fn new() -> Result<Self, ReservationNotifierError> {
        let iata = Regex::new("^[A-Z]{3}$").map_err(|error| ReservationNotifierError::input(&error.to_string(), "Failed to build airport code matcher"))?;

        Ok(Self { iata })
    }

    pub fn validate(
        &self,
        rows: Vec<ReservationRow>,
    ) -> (Vec<Reservation>, Vec<InvalidReservation>) {
        let mut valid = vec![];
        let mut invalid = vec![];

        for row in rows {
            match self.check(&row) {
                Ok((fare, status)) => valid.push(Reservation {
                    pnr: row.pnr,
                    passenger: row.passenger,
                    origin: row.origin,
                    destination: row.destination,
                    fare,
                    status,
                }),
                Err(violations) => invalid.push(InvalidReservation { row, violations }),
            }
        }

        (valid, invalid)
    }

    fn check(
        &self,
        row: &ReservationRow,
    ) -> Result<(Decimal, ReservationStatus), BTreeSet<Violation>> {
        let mut violations = BTreeSet::new();

        if row.pnr.is_empty() {
            violations.insert(Violation::BlankPnr);
        }
        if row.passenger.is_empty() {
            violations.insert(Violation::BlankPassenger);
        }
        if !self.iata.is_match(&row.origin) {
            violations.insert(Violation::InvalidOrigin);
        }
        if !self.iata.is_match(&row.destination) {
            violations.insert(Violation::InvalidDestination);
        }
        if row.origin == row.destination {
            violations.insert(Violation::SameOriginDestination);
        }

        let fare = row.fare_amount();
        match fare {
            None => {
                violations.insert(Violation::InvalidFare);
            },
            Some(amount) if amount < Decimal::ZERO => {
                violations.insert(Violation::NegativeFare);
            },
            Some(_) => {},
        }

        let status = row.status.parse::<ReservationStatus>().ok();
        if status.is_none() {
            violations.insert(Violation::InvalidStatus);
        }

        match (fare, status) {
            (Some(fare), Some(status)) if violations.is_empty() => Ok((fare, status)),
            _ => Err(violations),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(
        pnr: &str,
        passenger: &str,
        origin: &str,
        destination: &str,
        fare: &str,
        status: &str,
    ) -> ReservationRow {
        ReservationRow {
            pnr: pnr.to_string(),
            passenger: passenger.to_string(),
            origin: origin.to_string(),
            destination: destination.to_string(),
            fare: fare.to_string(),
            status: status.to_string(),
        }
    }

    #[test]
    fn should_split_valid_and_invalid_rows() {
        let validator = ReservationValidator::new().unwrap();

        let (valid, invalid) = validator.validate(vec![
            row("ABC123", "John", "DEL", "BOM", "100.0", "CONFIRMED"),
            row("XYZ789", "", "DEL", "DEL", "-5", "BAD"),
        ]);

        assert_eq!(1, valid.len());
        assert_eq!(ReservationStatus::Confirmed, valid[0].status);
        assert_eq!(Decimal::new(100, 0), valid[0].fare);

        assert_eq!(1, invalid.len());
        assert_eq!(
            BTreeSet::from([Violation::BlankPassenger, Violation::SameOriginDestination, Violation::NegativeFare, Violation::InvalidStatus]),
            invalid[0].violations
        );
        assert_eq!("blank Passenger|same Origin/Destination|negative Fare|invalid Status", invalid[0].reason());
    }

    #[test]
    fn should_reject_malformed_airport_codes_and_fares() {
        let validator = ReservationValidator::new().unwrap();

        let (valid, invalid) = validator.validate(vec![
            row("AAA111", "Ann", "A1B", "LONG", "12.5", "PENDING"),
            row("BBB222", "Bob", "LHR", "JFK", "", "CANCELLED"),
            row("", "Cid", "LHR", "JFK", "0", "PENDING"),
        ]);

        assert!(valid.is_empty());
        assert_eq!(BTreeSet::from([Violation::InvalidOrigin, Violation::InvalidDestination]), invalid[0].violations);
        assert_eq!(BTreeSet::from([Violation::InvalidFare]), invalid[1].violations);
        assert_eq!(BTreeSet::from([Violation::BlankPnr]), invalid[2].violations);
    }

    #[test]
    fn should_accept_zero_fare() {
        let validator = ReservationValidator::new().unwrap();

        let (valid, invalid) = validator.validate(vec![row("ZER000", "Zoe", "SYD", "MEL", "0.00", "PENDING")]);

        assert_eq!(1, valid.len());
        assert!(invalid.is_empty());
    }
}
