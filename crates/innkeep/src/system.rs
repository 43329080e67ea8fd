//! Facade bundling the three repositories over one shared backend.

use std::path::PathBuf;

use crate::customer::CustomerRepository;
use crate::hotel::HotelRepository;
use crate::reservation::ReservationRepository;
use crate::store::{FileBackend, MemoryBackend, StorageBackend};

/// The full reservation system: hotels, customers, and the reservations
/// linking them, all persisted through one backend.
pub struct ReservationSystem<B: StorageBackend> {
    pub hotels: HotelRepository<B>,
    pub customers: CustomerRepository<B>,
    pub reservations: ReservationRepository<B>,
}

impl ReservationSystem<FileBackend> {
    /// Open a system over JSON stores under `data_dir`.
    ///
    /// The directory is created on first write; opening alone touches
    /// nothing on disk.
    pub fn open(data_dir: impl Into<PathBuf>) -> Self {
        Self::with_backend(FileBackend::new(data_dir))
    }
}

impl ReservationSystem<MemoryBackend> {
    /// A system over a fresh in-memory backend, for tests.
    pub fn in_memory() -> Self {
        Self::with_backend(MemoryBackend::new())
    }
}

impl<B: StorageBackend> ReservationSystem<B> {
    pub fn with_backend(backend: B) -> Self {
        Self {
            hotels: HotelRepository::new(backend.clone()),
            customers: CustomerRepository::new(backend.clone()),
            reservations: ReservationRepository::new(backend),
        }
    }
}
