//! Innkeep: hotels, customers, and reservations over flat JSON stores.
//!
//! Three keyed stores (one JSON document each) hold the entities; a
//! repository per entity exposes CRUD plus the room-availability operations
//! that keep reservations and hotel counters in lockstep.
//!
//! # Core Principles
//!
//! - **Storage is truth**: no repository caches anything; every operation
//!   re-reads its store(s), mutates in memory, and writes back whole.
//! - **Availability is bounded**: `rooms_available` never goes negative and
//!   never exceeds a hotel's capacity.
//! - **Errors stay local**: a failed operation is a no-op on its store and
//!   never takes the process down.
//!
//! # Example
//!
//! ```no_run
//! use innkeep::ReservationSystem;
//!
//! # fn example() -> innkeep::Result<()> {
//! let system = ReservationSystem::open("data");
//! system.hotels.create("H1", "Luxury Inn", "New York", 5)?;
//! system.customers.create("C1", "Alice Johnson", "alice@example.com")?;
//! system.reservations.create("R1", "C1", "H1")?;
//! # Ok(())
//! # }
//! ```

pub mod customer;
pub mod error;
pub mod hotel;
pub mod reservation;
pub mod store;

mod system;

pub use customer::{Customer, CustomerRepository};
pub use error::{InnkeepError, Result};
pub use hotel::{Hotel, HotelRepository};
pub use reservation::{Reservation, ReservationRepository};
pub use store::{FileBackend, MemoryBackend, StorageBackend, Store};
pub use system::ReservationSystem;
