//! The [`Context`] used by native deployments and tests.

use serde::{Deserialize, Serialize};
use tally_state::MemoryStorage;

use crate::{Address, Context, Spec};

/// A context whose state lives in a [`MemoryStorage`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DefaultContext {
    /// The caller, as authenticated by whoever built the context.
    pub sender: Address,
}

impl Spec for DefaultContext {
    type Address = Address;
    type Storage = MemoryStorage;
    type Hasher = sha2::Sha256;
}

impl Context for DefaultContext {
    fn sender(&self) -> &Self::Address {
        &self.sender
    }

    fn new(sender: Self::Address) -> Self {
        Self { sender }
    }
}
