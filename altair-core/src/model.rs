use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Cabin class of a seat or ticket. Persisted as the `first_class` boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CabinClass {
    First,
    Economy,
}

impl CabinClass {
    pub fn from_first_flag(first_class: bool) -> Self {
        if first_class {
            CabinClass::First
        } else {
            CabinClass::Economy
        }
    }

    pub fn is_first(self) -> bool {
        matches!(self, CabinClass::First)
    }
}

impl fmt::Display for CabinClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CabinClass::First => write!(f, "first class"),
            CabinClass::Economy => write!(f, "economy"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Airport {
    pub code: String,
    pub name: String,
    pub city: String,
    pub country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aircraft {
    pub serial: String,
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seat {
    pub aircraft: String,
    pub label: String,
    pub first_class: bool,
}

impl Seat {
    pub fn class(&self) -> CabinClass {
        CabinClass::from_first_flag(self.first_class)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flight {
    pub id: Uuid,
    pub aircraft: String,
    pub departure: DateTime<Utc>,
    pub arrival: DateTime<Utc>,
    pub origin: String,
    pub destination: String,
}

impl Flight {
    /// A flight counts as departed the moment its scheduled departure passes.
    /// Departed flights accept no purchases and no check-ins.
    pub fn has_departed(&self, now: DateTime<Utc>) -> bool {
        self.departure <= now
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub code: Uuid,
    pub payer_tax_id: String,
    pub counter: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: Uuid,
    pub flight_id: Uuid,
    pub reservation_code: Uuid,
    pub passenger_name: String,
    pub price: i32,
    pub first_class: bool,
    pub seat_label: Option<String>,
    pub seat_aircraft: Option<String>,
}

impl Ticket {
    pub fn class(&self) -> CabinClass {
        CabinClass::from_first_flag(self.first_class)
    }

    pub fn is_checked_in(&self) -> bool {
        self.seat_label.is_some()
    }
}

/// Remaining seats per class on a flight. Advisory outside a transaction;
/// authoritative only when re-derived inside one (see the purchase engine).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FlightAvailability {
    pub remaining_first: i64,
    pub remaining_economy: i64,
}

impl FlightAvailability {
    pub fn remaining(&self, class: CabinClass) -> i64 {
        match class {
            CabinClass::First => self.remaining_first,
            CabinClass::Economy => self.remaining_economy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn departed_is_inclusive_of_departure_instant() {
        let now = Utc::now();
        let flight = Flight {
            id: Uuid::new_v4(),
            aircraft: "Boeing-001".to_string(),
            departure: now,
            arrival: now + Duration::hours(2),
            origin: "LIS".to_string(),
            destination: "CDG".to_string(),
        };

        assert!(flight.has_departed(now));
        assert!(flight.has_departed(now + Duration::seconds(1)));
        assert!(!flight.has_departed(now - Duration::seconds(1)));
    }

    #[test]
    fn cabin_class_round_trips_through_flag() {
        assert_eq!(CabinClass::from_first_flag(true), CabinClass::First);
        assert_eq!(CabinClass::from_first_flag(false), CabinClass::Economy);
        assert!(CabinClass::First.is_first());
        assert!(!CabinClass::Economy.is_first());
    }
}
