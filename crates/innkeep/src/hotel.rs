//! Hotel records and their repository.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{InnkeepError, Result};
use crate::reservation::{RESERVATIONS_FILE, Reservation};
use crate::store::{StorageBackend, Store};

pub(crate) const HOTELS_FILE: &str = "hotels.json";

/// A hotel with bounded room availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotel {
    pub hotel_id: String,
    pub name: String,
    pub location: String,
    /// Capacity bound; `rooms_available` never exceeds it.
    pub total_rooms: u32,
    pub rooms_available: u32,
}

impl Hotel {
    /// Consume one room. Returns false when nothing is free.
    pub fn take_room(&mut self) -> bool {
        if self.rooms_available == 0 {
            return false;
        }
        self.rooms_available -= 1;
        true
    }

    /// Free one room, clamped to capacity.
    pub fn release_room(&mut self) {
        if self.rooms_available < self.total_rooms {
            self.rooms_available += 1;
        }
    }
}

/// CRUD and room-counter operations over the hotel store.
///
/// Every method re-reads the store, mutates in memory, and writes back;
/// there is no cached state between calls.
pub struct HotelRepository<B: StorageBackend> {
    store: Store<B, Hotel>,
    reservations: Store<B, Reservation>,
}

impl<B: StorageBackend> HotelRepository<B> {
    pub fn new(backend: B) -> Self {
        Self {
            store: Store::new(backend.clone(), HOTELS_FILE),
            reservations: Store::new(backend, RESERVATIONS_FILE),
        }
    }

    /// Insert a new hotel with all rooms available.
    pub fn create(&self, id: &str, name: &str, location: &str, rooms: u32) -> Result<()> {
        let mut hotels = self.store.load()?;
        if hotels.contains_key(id) {
            return Err(InnkeepError::duplicate_key("hotel", id));
        }

        hotels.insert(
            id.to_string(),
            Hotel {
                hotel_id: id.to_string(),
                name: name.to_string(),
                location: location.to_string(),
                total_rooms: rooms,
                rooms_available: rooms,
            },
        );
        self.store.save(&hotels)
    }

    /// Update selected fields; `None` keeps the current value.
    ///
    /// A rooms update resets `rooms_available` and raises `total_rooms` when
    /// the new availability exceeds the old capacity.
    pub fn modify(
        &self,
        id: &str,
        name: Option<&str>,
        location: Option<&str>,
        rooms: Option<u32>,
    ) -> Result<()> {
        let mut hotels = self.store.load()?;
        let hotel = hotels
            .get_mut(id)
            .ok_or_else(|| InnkeepError::not_found("hotel", id))?;

        if let Some(name) = name {
            hotel.name = name.to_string();
        }
        if let Some(location) = location {
            hotel.location = location.to_string();
        }
        if let Some(rooms) = rooms {
            hotel.rooms_available = rooms;
            if rooms > hotel.total_rooms {
                hotel.total_rooms = rooms;
            }
        }
        self.store.save(&hotels)
    }

    /// Remove a hotel. Refused while any reservation still points at it.
    pub fn delete(&self, id: &str) -> Result<()> {
        let mut hotels = self.store.load()?;
        if !hotels.contains_key(id) {
            return Err(InnkeepError::not_found("hotel", id));
        }

        let reservations = self.reservations.load()?;
        if reservations.values().any(|r| r.hotel_id == id) {
            return Err(InnkeepError::referenced("hotel", id));
        }

        hotels.shift_remove(id);
        self.store.save(&hotels)
    }

    /// Full snapshot of the hotel store.
    pub fn display(&self) -> Result<IndexMap<String, Hotel>> {
        self.store.load()
    }

    /// Take one room directly at the hotel.
    ///
    /// Standalone counter operation; the reservation repository's booking
    /// flow applies the same non-negative rule through [`Hotel::take_room`].
    pub fn reserve_room(&self, id: &str) -> Result<()> {
        let mut hotels = self.store.load()?;
        let hotel = hotels
            .get_mut(id)
            .ok_or_else(|| InnkeepError::not_found("hotel", id))?;

        if !hotel.take_room() {
            return Err(InnkeepError::no_availability(id));
        }
        self.store.save(&hotels)
    }

    /// Give one room back, clamped to the hotel's capacity.
    pub fn cancel_reservation(&self, id: &str) -> Result<()> {
        let mut hotels = self.store.load()?;
        let hotel = hotels
            .get_mut(id)
            .ok_or_else(|| InnkeepError::not_found("hotel", id))?;

        hotel.release_room();
        self.store.save(&hotels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryBackend;

    fn repository() -> HotelRepository<MemoryBackend> {
        HotelRepository::new(MemoryBackend::new())
    }

    #[test]
    fn test_create_and_read_back() {
        let repo = repository();
        repo.create("H1", "Luxury Inn", "New York", 5).unwrap();

        let hotels = repo.display().unwrap();
        let hotel = &hotels["H1"];
        assert_eq!(hotel.name, "Luxury Inn");
        assert_eq!(hotel.location, "New York");
        assert_eq!(hotel.total_rooms, 5);
        assert_eq!(hotel.rooms_available, 5);
    }

    #[test]
    fn test_create_duplicate_leaves_existing_record() {
        let repo = repository();
        repo.create("H1", "Luxury Inn", "New York", 5).unwrap();

        let result = repo.create("H1", "Imposter Inn", "Boston", 2);
        assert!(matches!(result, Err(InnkeepError::DuplicateKey { .. })));

        let hotels = repo.display().unwrap();
        assert_eq!(hotels["H1"].name, "Luxury Inn");
        assert_eq!(hotels["H1"].rooms_available, 5);
    }

    #[test]
    fn test_modify_partial_fields() {
        let repo = repository();
        repo.create("H1", "Luxury Inn", "New York", 5).unwrap();

        repo.modify("H1", None, Some("Chicago"), None).unwrap();

        let hotels = repo.display().unwrap();
        assert_eq!(hotels["H1"].name, "Luxury Inn");
        assert_eq!(hotels["H1"].location, "Chicago");
    }

    #[test]
    fn test_modify_all_none_is_a_no_op() {
        let repo = repository();
        repo.create("H1", "Luxury Inn", "New York", 5).unwrap();
        let before = repo.display().unwrap();

        repo.modify("H1", None, None, None).unwrap();

        assert_eq!(repo.display().unwrap(), before);
    }

    #[test]
    fn test_modify_can_set_blank_name() {
        let repo = repository();
        repo.create("H1", "Luxury Inn", "New York", 5).unwrap();

        repo.modify("H1", Some(""), None, None).unwrap();

        assert_eq!(repo.display().unwrap()["H1"].name, "");
    }

    #[test]
    fn test_modify_rooms_above_capacity_raises_capacity() {
        let repo = repository();
        repo.create("H1", "Luxury Inn", "New York", 5).unwrap();

        repo.modify("H1", None, None, Some(8)).unwrap();

        let hotels = repo.display().unwrap();
        assert_eq!(hotels["H1"].rooms_available, 8);
        assert_eq!(hotels["H1"].total_rooms, 8);
    }

    #[test]
    fn test_modify_missing_hotel() {
        let repo = repository();
        let result = repo.modify("H9", Some("Ghost"), None, None);
        assert!(matches!(result, Err(InnkeepError::NotFound { .. })));
    }

    #[test]
    fn test_reserve_room_decrements() {
        let repo = repository();
        repo.create("H1", "Luxury Inn", "New York", 2).unwrap();

        repo.reserve_room("H1").unwrap();

        assert_eq!(repo.display().unwrap()["H1"].rooms_available, 1);
    }

    #[test]
    fn test_reserve_room_at_zero_is_rejected() {
        let repo = repository();
        repo.create("H1", "Luxury Inn", "New York", 0).unwrap();

        let result = repo.reserve_room("H1");
        assert!(matches!(result, Err(InnkeepError::NoAvailability { .. })));
        assert_eq!(repo.display().unwrap()["H1"].rooms_available, 0);
    }

    #[test]
    fn test_cancel_reservation_clamps_to_capacity() {
        let repo = repository();
        repo.create("H1", "Luxury Inn", "New York", 3).unwrap();

        repo.cancel_reservation("H1").unwrap();

        // Already at full capacity, the increment has nowhere to go
        assert_eq!(repo.display().unwrap()["H1"].rooms_available, 3);
    }

    #[test]
    fn test_reserve_then_cancel_is_identity() {
        let repo = repository();
        repo.create("H1", "Luxury Inn", "New York", 4).unwrap();

        repo.reserve_room("H1").unwrap();
        repo.cancel_reservation("H1").unwrap();

        assert_eq!(repo.display().unwrap()["H1"].rooms_available, 4);
    }

    #[test]
    fn test_delete_missing_hotel_leaves_store_unchanged() {
        let repo = repository();
        repo.create("H1", "Luxury Inn", "New York", 5).unwrap();
        let before = repo.display().unwrap();

        let result = repo.delete("H9");
        assert!(matches!(result, Err(InnkeepError::NotFound { .. })));
        assert_eq!(repo.display().unwrap(), before);
    }
}
