//! Save states of the flag animation.
//!
//! The frame buffers are fully determined by the shown image and the frame
//! counter, so only those two are saved. Restoring rebuilds the buffers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bumped whenever the encoded layout changes.
pub const SNAPSHOT_VERSION: u16 = 1;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot encoding failed: {0}")]
    Encoding(#[from] bincode::Error),

    #[error(
        "snapshot version {found} is not supported, expected {expected}",
        expected = SNAPSHOT_VERSION
    )]
    Version { found: u16 },

    #[error("snapshot shows image `{0}` which is not in the catalog")]
    UnknownImage(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u16,
    pub frame: u32,
    pub image: String,
}

impl Snapshot {
    #[must_use]
    pub fn new(frame: u32, image: impl Into<String>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            frame,
            image: image.into(),
        }
    }

    /// # Errors
    /// If bincode fails to encode the snapshot.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// # Errors
    /// If `bytes` is not a snapshot or was written by another version.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self = bincode::deserialize(bytes)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::Version {
                found: snapshot.version,
            });
        }
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn bytes() {
        let snapshot = Snapshot::new(1234, "br");
        let bytes = snapshot.to_bytes().unwrap();
        assert_eq!(Snapshot::from_bytes(&bytes).unwrap(), snapshot);
    }

    #[test]
    fn rejects_other_versions() {
        let mut snapshot = Snapshot::new(1, "us");
        snapshot.version = SNAPSHOT_VERSION + 1;
        let bytes = snapshot.to_bytes().unwrap();

        assert!(matches!(
            Snapshot::from_bytes(&bytes),
            Err(SnapshotError::Version { found }) if found == SNAPSHOT_VERSION + 1
        ));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            Snapshot::from_bytes(&[0xFF]),
            Err(SnapshotError::Encoding(_))
        ));
    }
}
