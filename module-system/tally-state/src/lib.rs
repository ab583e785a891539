//! Storage and state management interfaces for tally modules.

#![deny(missing_docs)]

pub mod codec;
mod containers;
mod events;
mod scratchpad;
/// Trait and type definitions related to the [`Storage`] trait.
pub mod storage;


use std::fmt::Display;
use std::str;

pub use containers::{map, value, vec, StateMap, StateValue, StateVec};
pub use events::{Event, EventKey, EventValue};
pub use scratchpad::{StateCheckpoint, WorkingSet};
pub use storage::{MemoryStorage, OrderedWrites, Storage, StorageKey, StorageValue};

/// A prefix prepended to each key before insertion and retrieval from the storage.
///
/// All state containers of all modules share the same working set, so every container
/// gets its own prefix to keep keys from colliding.
#[derive(
    borsh::BorshDeserialize,
    borsh::BorshSerialize,
    Debug,
    PartialEq,
    Eq,
    Clone,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Prefix {
    prefix: Vec<u8>,
}

impl Display for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let buf = self.prefix.as_slice();
        match str::from_utf8(buf) {
            Ok(s) => {
                write!(f, "{:?}", s)
            }
            Err(_) => {
                write!(f, "0x{}", hex::encode(buf))
            }
        }
    }
}

impl Prefix {
    /// Creates a new prefix from a byte vector.
    pub fn new(prefix: Vec<u8>) -> Self {
        Self { prefix }
    }

    /// Returns the raw bytes of the prefix.
    pub fn as_bytes(&self) -> &[u8] {
        &self.prefix
    }

    /// Returns the length in bytes of the prefix.
    pub fn len(&self) -> usize {
        self.prefix.len()
    }

    /// Returns `true` if the prefix is empty, `false` otherwise.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prefix.is_empty()
    }
}
