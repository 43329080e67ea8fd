//! Error types for the innkeep library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for innkeep operations.
///
/// Every variant is local to a single operation: the caller reports it and
/// carries on. Malformed store files are not represented here at all; the
/// store recovers them in place by substituting an empty mapping.
#[derive(Debug, Error)]
pub enum InnkeepError {
    /// Error reading or writing a store document.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Create called with an identifier that is already taken.
    #[error("{entity} '{id}' already exists")]
    DuplicateKey { entity: &'static str, id: String },

    /// Operation on an identifier that is not in the store.
    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },

    /// Reservation create naming a hotel or customer that does not exist.
    #[error("invalid reference: {entity} '{id}' does not exist")]
    InvalidReference { entity: &'static str, id: String },

    /// Room requested at a hotel with nothing free.
    #[error("no rooms available at hotel '{hotel_id}'")]
    NoAvailability { hotel_id: String },

    /// Delete refused because a live reservation still points here.
    #[error("{entity} '{id}' is referenced by an active reservation")]
    ReferencedByActiveReservation { entity: &'static str, id: String },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl InnkeepError {
    pub fn duplicate_key(entity: &'static str, id: &str) -> Self {
        InnkeepError::DuplicateKey {
            entity,
            id: id.to_string(),
        }
    }

    pub fn not_found(entity: &'static str, id: &str) -> Self {
        InnkeepError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn invalid_reference(entity: &'static str, id: &str) -> Self {
        InnkeepError::InvalidReference {
            entity,
            id: id.to_string(),
        }
    }

    pub fn no_availability(hotel_id: &str) -> Self {
        InnkeepError::NoAvailability {
            hotel_id: hotel_id.to_string(),
        }
    }

    pub fn referenced(entity: &'static str, id: &str) -> Self {
        InnkeepError::ReferencedByActiveReservation {
            entity,
            id: id.to_string(),
        }
    }
}

/// Result type alias for innkeep operations.
pub type Result<T> = std::result::Result<T, InnkeepError>;
