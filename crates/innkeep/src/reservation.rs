//! Reservations - the link entity coupling customers to hotel availability.
//!
//! This is the only repository that touches more than one store. Creating a
//! reservation consumes one unit of the hotel's availability; cancelling it
//! gives the unit back. The two store writes in each operation are
//! sequential, not transactional.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::customer::{CUSTOMERS_FILE, Customer};
use crate::error::{InnkeepError, Result};
use crate::hotel::{HOTELS_FILE, Hotel};
use crate::store::{StorageBackend, Store};

pub(crate) const RESERVATIONS_FILE: &str = "reservations.json";

/// An active reservation linking a customer to a hotel.
///
/// Keyed by reservation id in the store; its existence accounts for exactly
/// one decremented room on the referenced hotel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub customer_id: String,
    pub hotel_id: String,
}

/// Booking operations spanning the reservation, hotel, and customer stores.
pub struct ReservationRepository<B: StorageBackend> {
    store: Store<B, Reservation>,
    hotels: Store<B, Hotel>,
    customers: Store<B, Customer>,
}

impl<B: StorageBackend> ReservationRepository<B> {
    pub fn new(backend: B) -> Self {
        Self {
            store: Store::new(backend.clone(), RESERVATIONS_FILE),
            hotels: Store::new(backend.clone(), HOTELS_FILE),
            customers: Store::new(backend, CUSTOMERS_FILE),
        }
    }

    /// Link a customer to a hotel, consuming one room.
    ///
    /// Both referenced entities must exist and the hotel must have a room
    /// free. All checks run before either store is written, so a rejected
    /// create changes nothing. The reservation store is written before the
    /// hotel store; a crash between the two leaves them inconsistent, and
    /// there is no repair pass.
    pub fn create(&self, id: &str, customer_id: &str, hotel_id: &str) -> Result<()> {
        let mut reservations = self.store.load()?;
        let mut hotels = self.hotels.load()?;
        let customers = self.customers.load()?;

        if reservations.contains_key(id) {
            return Err(InnkeepError::duplicate_key("reservation", id));
        }
        if !customers.contains_key(customer_id) {
            return Err(InnkeepError::invalid_reference("customer", customer_id));
        }
        let hotel = hotels
            .get_mut(hotel_id)
            .ok_or_else(|| InnkeepError::invalid_reference("hotel", hotel_id))?;

        if !hotel.take_room() {
            return Err(InnkeepError::no_availability(hotel_id));
        }

        reservations.insert(
            id.to_string(),
            Reservation {
                customer_id: customer_id.to_string(),
                hotel_id: hotel_id.to_string(),
            },
        );
        self.store.save(&reservations)?;
        self.hotels.save(&hotels)
    }

    /// Cancel a reservation and give the room back to its hotel.
    ///
    /// A hotel that has vanished from its store (only possible by editing
    /// the files by hand, the delete guard forbids it through the API) is
    /// skipped: the reservation is still removed, there is just nothing to
    /// re-credit.
    pub fn cancel(&self, id: &str) -> Result<()> {
        let mut reservations = self.store.load()?;
        let mut hotels = self.hotels.load()?;

        let Some(reservation) = reservations.shift_remove(id) else {
            return Err(InnkeepError::not_found("reservation", id));
        };

        if let Some(hotel) = hotels.get_mut(&reservation.hotel_id) {
            hotel.release_room();
        }

        self.store.save(&reservations)?;
        self.hotels.save(&hotels)
    }

    /// Full snapshot of the reservation store.
    pub fn display(&self) -> Result<IndexMap<String, Reservation>> {
        self.store.load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::CustomerRepository;
    use crate::hotel::HotelRepository;
    use crate::store::MemoryBackend;

    struct Fixture {
        hotels: HotelRepository<MemoryBackend>,
        customers: CustomerRepository<MemoryBackend>,
        reservations: ReservationRepository<MemoryBackend>,
    }

    fn fixture() -> Fixture {
        let backend = MemoryBackend::new();
        Fixture {
            hotels: HotelRepository::new(backend.clone()),
            customers: CustomerRepository::new(backend.clone()),
            reservations: ReservationRepository::new(backend),
        }
    }

    #[test]
    fn test_create_decrements_hotel_availability() {
        let f = fixture();
        f.hotels.create("H1", "Luxury Inn", "New York", 5).unwrap();
        f.customers
            .create("C1", "Alice Johnson", "alice@example.com")
            .unwrap();

        f.reservations.create("R1", "C1", "H1").unwrap();

        assert!(f.reservations.display().unwrap().contains_key("R1"));
        assert_eq!(f.hotels.display().unwrap()["H1"].rooms_available, 4);
    }

    #[test]
    fn test_create_with_unknown_customer_changes_nothing() {
        let f = fixture();
        f.hotels.create("H1", "Luxury Inn", "New York", 5).unwrap();

        let result = f.reservations.create("R1", "C9", "H1");
        assert!(matches!(result, Err(InnkeepError::InvalidReference { .. })));

        assert!(f.reservations.display().unwrap().is_empty());
        assert_eq!(f.hotels.display().unwrap()["H1"].rooms_available, 5);
    }

    #[test]
    fn test_create_with_unknown_hotel_changes_nothing() {
        let f = fixture();
        f.customers
            .create("C1", "Alice Johnson", "alice@example.com")
            .unwrap();

        let result = f.reservations.create("R1", "C1", "H9");
        assert!(matches!(result, Err(InnkeepError::InvalidReference { .. })));
        assert!(f.reservations.display().unwrap().is_empty());
    }

    #[test]
    fn test_create_duplicate_reservation_id() {
        let f = fixture();
        f.hotels.create("H1", "Luxury Inn", "New York", 5).unwrap();
        f.customers
            .create("C1", "Alice Johnson", "alice@example.com")
            .unwrap();
        f.reservations.create("R1", "C1", "H1").unwrap();

        let result = f.reservations.create("R1", "C1", "H1");
        assert!(matches!(result, Err(InnkeepError::DuplicateKey { .. })));
        assert_eq!(f.hotels.display().unwrap()["H1"].rooms_available, 4);
    }

    #[test]
    fn test_create_without_availability_changes_nothing() {
        let f = fixture();
        f.hotels.create("H2", "Tiny Inn", "Boston", 1).unwrap();
        f.customers
            .create("C1", "Alice Johnson", "alice@example.com")
            .unwrap();
        f.reservations.create("RA", "C1", "H2").unwrap();

        let result = f.reservations.create("RB", "C1", "H2");
        assert!(matches!(result, Err(InnkeepError::NoAvailability { .. })));

        assert!(!f.reservations.display().unwrap().contains_key("RB"));
        assert_eq!(f.hotels.display().unwrap()["H2"].rooms_available, 0);
    }

    #[test]
    fn test_cancel_restores_availability() {
        let f = fixture();
        f.hotels.create("H1", "Luxury Inn", "New York", 5).unwrap();
        f.customers
            .create("C1", "Alice Johnson", "alice@example.com")
            .unwrap();
        f.reservations.create("R1", "C1", "H1").unwrap();

        f.reservations.cancel("R1").unwrap();

        assert!(!f.reservations.display().unwrap().contains_key("R1"));
        assert_eq!(f.hotels.display().unwrap()["H1"].rooms_available, 5);
    }

    #[test]
    fn test_cancel_missing_reservation() {
        let f = fixture();
        let result = f.reservations.cancel("R9");
        assert!(matches!(result, Err(InnkeepError::NotFound { .. })));
    }

    #[test]
    fn test_delete_hotel_with_live_reservation_is_refused() {
        let f = fixture();
        f.hotels.create("H1", "Luxury Inn", "New York", 5).unwrap();
        f.customers
            .create("C1", "Alice Johnson", "alice@example.com")
            .unwrap();
        f.reservations.create("R1", "C1", "H1").unwrap();

        let result = f.hotels.delete("H1");
        assert!(matches!(
            result,
            Err(InnkeepError::ReferencedByActiveReservation { .. })
        ));
        assert!(f.hotels.display().unwrap().contains_key("H1"));
    }

    #[test]
    fn test_delete_customer_with_live_reservation_is_refused() {
        let f = fixture();
        f.hotels.create("H1", "Luxury Inn", "New York", 5).unwrap();
        f.customers
            .create("C1", "Alice Johnson", "alice@example.com")
            .unwrap();
        f.reservations.create("R1", "C1", "H1").unwrap();

        let result = f.customers.delete("C1");
        assert!(matches!(
            result,
            Err(InnkeepError::ReferencedByActiveReservation { .. })
        ));
    }

    #[test]
    fn test_delete_allowed_after_cancel() {
        let f = fixture();
        f.hotels.create("H1", "Luxury Inn", "New York", 5).unwrap();
        f.customers
            .create("C1", "Alice Johnson", "alice@example.com")
            .unwrap();
        f.reservations.create("R1", "C1", "H1").unwrap();
        f.reservations.cancel("R1").unwrap();

        f.hotels.delete("H1").unwrap();
        f.customers.delete("C1").unwrap();
    }
}
