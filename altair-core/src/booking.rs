use crate::model::CabinClass;
use crate::BookingError;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// Price bands per class, whole currency units. Business parameter, not an
/// invariant: tests assert the band, never an exact value.
pub const FIRST_PRICE_BAND: (i32, i32) = (300, 600);
pub const ECONOMY_PRICE_BAND: (i32, i32) = (100, 300);

pub fn price_band(class: CabinClass) -> (i32, i32) {
    match class {
        CabinClass::First => FIRST_PRICE_BAND,
        CabinClass::Economy => ECONOMY_PRICE_BAND,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassengerSpec {
    pub name: String,
    #[serde(default)]
    pub first_class: bool,
}

impl PassengerSpec {
    pub fn class(&self) -> CabinClass {
        CabinClass::from_first_flag(self.first_class)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseRequest {
    pub payer_tax_id: String,
    pub passengers: Vec<PassengerSpec>,
}

impl PurchaseRequest {
    /// Fail-fast input validation. Runs before any transaction opens, so a
    /// rejected request never touches the store.
    pub fn validate(&self) -> Result<(), BookingError> {
        if self.payer_tax_id.trim().is_empty() {
            debug!("rejecting purchase request with no payer tax id");
            return Err(BookingError::InvalidInput(
                "payer tax id is required".to_string(),
            ));
        }
        if self.passengers.is_empty() {
            debug!("rejecting purchase request with no passengers");
            return Err(BookingError::InvalidInput(
                "at least one passenger is required".to_string(),
            ));
        }
        if self.passengers.iter().any(|p| p.name.trim().is_empty()) {
            debug!("rejecting purchase request with an unnamed passenger");
            return Err(BookingError::InvalidInput(
                "every passenger needs a name".to_string(),
            ));
        }
        Ok(())
    }

    pub fn seats_requested(&self) -> SeatCounts {
        let first = self.passengers.iter().filter(|p| p.first_class).count() as i64;
        SeatCounts {
            first,
            economy: self.passengers.len() as i64 - first,
        }
    }
}

/// Per-class seat tally of a purchase request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatCounts {
    pub first: i64,
    pub economy: i64,
}

impl SeatCounts {
    pub fn of(&self, class: CabinClass) -> i64 {
        match class {
            CabinClass::First => self.first,
            CabinClass::Economy => self.economy,
        }
    }
}

/// Capacity precondition for a purchase. `remaining_first` / `remaining_economy`
/// must come from a snapshot taken inside the protecting transaction; this
/// function only decides, it does not observe.
pub fn ensure_capacity(
    requested: SeatCounts,
    remaining_first: i64,
    remaining_economy: i64,
) -> Result<(), BookingError> {
    if requested.first > remaining_first {
        return Err(BookingError::InsufficientCapacity(CabinClass::First));
    }
    if requested.economy > remaining_economy {
        return Err(BookingError::InsufficientCapacity(CabinClass::Economy));
    }
    Ok(())
}

/// Deterministic seat choice: lowest label wins, lexicographically. The same
/// set of free seats always yields the same assignment.
pub fn pick_seat(mut free_labels: Vec<String>) -> Option<String> {
    free_labels.sort();
    free_labels.into_iter().next()
}

#[derive(Debug, Clone, Serialize)]
pub struct PurchaseReceipt {
    pub reservation_code: Uuid,
    pub ticket_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckinReceipt {
    pub ticket_id: Uuid,
    pub seat_label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(payer: &str, names: &[(&str, bool)]) -> PurchaseRequest {
        PurchaseRequest {
            payer_tax_id: payer.to_string(),
            passengers: names
                .iter()
                .map(|(name, first_class)| PassengerSpec {
                    name: name.to_string(),
                    first_class: *first_class,
                })
                .collect(),
        }
    }

    #[test]
    fn validate_rejects_missing_payer() {
        let err = request("  ", &[("Alice", false)]).validate().unwrap_err();
        assert!(matches!(err, BookingError::InvalidInput(_)));
    }

    #[test]
    fn validate_rejects_empty_passenger_list() {
        let err = request("123456789", &[]).validate().unwrap_err();
        assert!(matches!(err, BookingError::InvalidInput(_)));
    }

    #[test]
    fn validate_rejects_unnamed_passenger() {
        let err = request("123456789", &[("Alice", false), ("", true)])
            .validate()
            .unwrap_err();
        assert!(matches!(err, BookingError::InvalidInput(_)));
    }

    #[test]
    fn validate_accepts_well_formed_request() {
        assert!(request("123456789", &[("Alice", true), ("Bob", false)])
            .validate()
            .is_ok());
    }

    #[test]
    fn seat_tally_splits_by_class() {
        let counts = request("123456789", &[("A", true), ("B", false), ("C", false)])
            .seats_requested();
        assert_eq!(counts, SeatCounts { first: 1, economy: 2 });
        assert_eq!(counts.of(CabinClass::First), 1);
        assert_eq!(counts.of(CabinClass::Economy), 2);
    }

    #[test]
    fn capacity_check_flags_the_oversold_class() {
        let counts = SeatCounts { first: 2, economy: 1 };

        assert!(ensure_capacity(counts, 2, 1).is_ok());
        assert!(matches!(
            ensure_capacity(counts, 1, 5),
            Err(BookingError::InsufficientCapacity(CabinClass::First))
        ));
        assert!(matches!(
            ensure_capacity(counts, 5, 0),
            Err(BookingError::InsufficientCapacity(CabinClass::Economy))
        ));
    }

    #[test]
    fn capacity_check_allows_exact_fit() {
        let counts = SeatCounts { first: 0, economy: 2 };
        assert!(ensure_capacity(counts, 0, 2).is_ok());
    }

    #[test]
    fn seat_pick_is_lowest_label() {
        let free = vec!["1B".to_string(), "2A".to_string(), "1A".to_string()];
        assert_eq!(pick_seat(free), Some("1A".to_string()));
    }

    #[test]
    fn seat_pick_on_empty_set_is_none() {
        assert_eq!(pick_seat(vec![]), None);
    }

    #[test]
    fn price_bands_do_not_overlap_downwards() {
        let (first_min, first_max) = price_band(CabinClass::First);
        let (eco_min, eco_max) = price_band(CabinClass::Economy);
        assert!(first_min >= eco_max);
        assert!(first_min < first_max);
        assert!(eco_min < eco_max);
    }
}
