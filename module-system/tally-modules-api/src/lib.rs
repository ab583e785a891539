//! The interface every tally module implements: addresses, execution contexts,
//! the [`Module`] trait and the response and error types shared by all modules.

#![deny(missing_docs)]

mod address;
pub mod default_context;
mod error;
mod prefix;
mod response;
#[cfg(test)]
mod tests;
pub mod utils;

use core::fmt::Debug;

pub use address::{Address, AddressTrait};
use borsh::{BorshDeserialize, BorshSerialize};
pub use error::Error;
pub use prefix::ModulePrefix;
pub use response::CallResponse;
pub use sha2::digest::Digest;
pub use tally_state::{
    Event, MemoryStorage, Prefix, StateCheckpoint, StateMap, StateValue, StateVec, Storage,
    WorkingSet,
};

/// The `Spec` trait configures the primitives used by a particular deployment of the
/// module system. `Spec` is almost always implemented on a [`Context`] object; since all
/// modules are generic over a `Context`, swapping the context swaps the address type,
/// the storage backend and the hasher without touching module code.
pub trait Spec {
    /// The address type used to identify callers and modules.
    type Address: AddressTrait + BorshSerialize + BorshDeserialize;

    /// The state storage backing every [`WorkingSet`].
    type Storage: Storage + Send + Sync;

    /// The hasher used to derive module addresses and prefixes.
    type Hasher: Digest<OutputSize = sha2::digest::typenum::U32>;
}

/// A context contains information which is passed to modules during
/// call execution. Currently, context includes the sender of the call, as
/// authenticated by whoever constructed the context.
pub trait Context: Spec + Clone + Debug + PartialEq + Send + Sync + 'static {
    /// Sender of the call.
    fn sender(&self) -> &Self::Address;

    /// Constructor for the Context.
    fn new(sender: Self::Address) -> Self;
}

/// The core trait implemented by all modules. This trait defines how a module is initialized
/// at genesis, and how it handles calls.
pub trait Module {
    /// Execution context.
    type Context: Context;

    /// Configuration for the genesis method.
    type Config;

    /// Module defined argument to the call method.
    type CallMessage: Debug + BorshSerialize + BorshDeserialize;

    /// Module defined event resulting from a call method.
    type Event: Debug + BorshSerialize + BorshDeserialize;

    /// Genesis is called once, when the module is deployed, and can be used to set initial
    /// state values in the module.
    fn genesis(
        &self,
        _config: &Self::Config,
        _working_set: &mut WorkingSet<<Self::Context as Spec>::Storage>,
    ) -> Result<(), Error> {
        Ok(())
    }

    /// Call allows interaction with the module and invokes state changes.
    /// It takes a module defined type and a context as parameters.
    fn call(
        &self,
        message: Self::CallMessage,
        context: &Self::Context,
        working_set: &mut WorkingSet<<Self::Context as Spec>::Storage>,
    ) -> Result<CallResponse, Error>;
}

/// Every module has to implement this trait.
pub trait ModuleInfo {
    /// Execution context.
    type Context: Context;

    /// Returns address of the module.
    fn address(&self) -> &<Self::Context as Spec>::Address;

    /// Returns the prefix of the module.
    fn prefix(&self) -> ModulePrefix;
}
