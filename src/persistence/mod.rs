//! The "has won" flag
//!
//! The only thing the game remembers between visits. Stored as a versioned
//! JSON envelope; anything unreadable counts as "never won".

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current envelope version
pub const FLAG_VERSION: u32 = 1;

/// LocalStorage key (used only in wasm32)
pub const STORAGE_KEY: &str = "mouth_possible_has_won";

/// Durable boolean read by the title screen, written on the win
pub trait WinFlagStore {
    fn has_won(&self) -> bool;
    fn set_has_won(&mut self);
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,

    #[error("could not encode flag: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("storage write failed: {0}")]
    Write(String),
}

/// Versioned on-disk form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagEnvelope {
    pub version: u32,
    pub has_won: bool,
}

impl FlagEnvelope {
    pub fn won() -> Self {
        Self {
            version: FLAG_VERSION,
            has_won: true,
        }
    }

    pub fn encode(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a stored value. Unknown versions and garbage read as not won.
    pub fn decode(raw: &str) -> bool {
        match serde_json::from_str::<FlagEnvelope>(raw) {
            Ok(env) if env.version == FLAG_VERSION => env.has_won,
            Ok(env) => {
                log::warn!("Ignoring win flag with unknown version {}", env.version);
                false
            }
            Err(e) => {
                log::warn!("Ignoring corrupt win flag: {}", e);
                false
            }
        }
    }
}

/// In-memory flag for native runs and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryWinFlag {
    won: bool,
}

impl MemoryWinFlag {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WinFlagStore for MemoryWinFlag {
    fn has_won(&self) -> bool {
        self.won
    }

    fn set_has_won(&mut self) {
        self.won = true;
    }
}

/// Flag kept in the browser's LocalStorage
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageWinFlag;

#[cfg(target_arch = "wasm32")]
impl LocalStorageWinFlag {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }

    fn write(&self) -> Result<(), StorageError> {
        let storage = Self::storage().ok_or(StorageError::Unavailable)?;
        let json = FlagEnvelope::won().encode()?;
        storage
            .set_item(STORAGE_KEY, &json)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }
}

#[cfg(target_arch = "wasm32")]
impl WinFlagStore for LocalStorageWinFlag {
    fn has_won(&self) -> bool {
        Self::storage()
            .and_then(|s| s.get_item(STORAGE_KEY).ok().flatten())
            .map(|raw| FlagEnvelope::decode(&raw))
            .unwrap_or(false)
    }

    fn set_has_won(&mut self) {
        match self.write() {
            Ok(()) => log::info!("Win flag saved"),
            Err(e) => log::warn!("Win flag not saved: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_format() {
        let json = FlagEnvelope::won().encode().unwrap();
        assert_eq!(json, r#"{"version":1,"has_won":true}"#);
        assert!(FlagEnvelope::decode(&json));
    }

    #[test]
    fn test_decode_rejects_unknown_and_corrupt() {
        assert!(!FlagEnvelope::decode(r#"{"version":2,"has_won":true}"#));
        assert!(!FlagEnvelope::decode("true"));
        assert!(!FlagEnvelope::decode(""));
        assert!(!FlagEnvelope::decode(r#"{"version":1,"has_won":false}"#));
    }

    #[test]
    fn test_memory_flag() {
        let mut flag = MemoryWinFlag::new();
        assert!(!flag.has_won());
        flag.set_has_won();
        assert!(flag.has_won());
    }
}
