//! JSON codec for encounter snapshots.
//!
//! The wagering front end polls `SimWorld::snapshot_json`, which encodes
//! through here. Decoding exists for replay tooling and tests; a decoded
//! snapshot is inert data and cannot be fed back into a running encounter.

use crate::world::Snapshot;

/// Compact JSON, one line per frame.
pub fn snapshot_to_json(snapshot: &Snapshot) -> Result<String, serde_json::Error> {
    serde_json::to_string(snapshot)
}

/// Indented JSON for logs and the demo dump.
pub fn snapshot_to_json_pretty(snapshot: &Snapshot) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(snapshot)
}

/// Compact JSON as bytes, for writing straight to a socket or file.
pub fn snapshot_to_json_bytes(snapshot: &Snapshot) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(snapshot)
}

pub fn snapshot_from_json(data: &str) -> Result<Snapshot, serde_json::Error> {
    serde_json::from_str(data)
}

pub fn snapshot_from_json_bytes(data: &[u8]) -> Result<Snapshot, serde_json::Error> {
    serde_json::from_slice(data)
}
