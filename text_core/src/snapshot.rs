//! Session snapshot for deterministic replay testing

use crate::DisplayMode;
use alloc::string::String;
use serde::{Deserialize, Serialize};

/// Complete session state snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub mode: DisplayMode,
    pub buffer: String,
    pub summary: String,
}

impl SessionSnapshot {
    /// Compute a deterministic hash of the snapshot state
    /// This is used for fast comparison in replay tests
    #[cfg(test)]
    pub fn hash(&self) -> u64 {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();

        hasher.update([self.mode as u8]);

        // Length prefixes keep buffer/summary boundaries unambiguous
        hasher.update((self.buffer.len() as u64).to_le_bytes());
        hasher.update(self.buffer.as_bytes());
        hasher.update((self.summary.len() as u64).to_le_bytes());
        hasher.update(self.summary.as_bytes());

        let result = hasher.finalize();
        let bytes: [u8; 8] = result[..8].try_into().unwrap();
        u64::from_le_bytes(bytes)
    }
}
