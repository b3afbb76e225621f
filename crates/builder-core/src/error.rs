//! Recoverable failures surfaced by the editor core.
//!
//! Missing persisted state is not an error (it restores as empty/default) and
//! selection/registry desynchronization is not recoverable (it panics), so
//! neither appears here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("unknown catalog asset `{0}`")]
    UnknownAsset(String),

    #[error("failed to load asset `{asset}`: {reason}")]
    AssetLoad { asset: String, reason: String },

    #[error("unknown vehicle type `{0}`")]
    UnknownVehicle(String),

    #[error("vehicle already chosen for this session: {chosen}, requested {requested}")]
    VehicleAlreadyChosen { chosen: String, requested: String },

    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T, E = EditorError> = std::result::Result<T, E>;
