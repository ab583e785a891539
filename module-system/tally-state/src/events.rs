use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// An event recorded by a module while executing a call.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct Event {
    key: EventKey,
    value: EventValue,
}

impl Event {
    /// Creates an event whose value is the borsh encoding of `value`.
    pub fn typed<E: BorshSerialize>(key: &str, value: &E) -> Self {
        Self {
            key: EventKey(key.as_bytes().to_vec()),
            value: EventValue(value.try_to_vec().expect("Failed to serialize event")),
        }
    }

    /// The event key.
    pub fn key(&self) -> &EventKey {
        &self.key
    }

    /// The event value.
    pub fn value(&self) -> &EventValue {
        &self.value
    }

    /// Decodes the value of an event created with [`Event::typed`].
    pub fn decode<E: BorshDeserialize>(&self) -> std::io::Result<E> {
        E::try_from_slice(&self.value.0)
    }
}

/// Raw bytes of an event key.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
pub struct EventKey(Vec<u8>);

impl EventKey {
    /// Returns the raw key bytes.
    pub fn inner(&self) -> &Vec<u8> {
        &self.0
    }
}

/// Raw bytes of an event value.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct EventValue(Vec<u8>);

impl EventValue {
    /// Returns the raw value bytes.
    pub fn inner(&self) -> &Vec<u8> {
        &self.0
    }
}
