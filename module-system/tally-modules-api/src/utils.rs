//! Helpers shared by modules, nodes and tests.

use sha2::digest::Digest;

use crate::{Context, Spec};

/// Derives a deterministic address from a human readable key name.
pub fn generate_address<C: Context>(key: &str) -> <C as Spec>::Address {
    let hash: [u8; 32] = <C as Spec>::Hasher::digest(key.as_bytes()).into();
    C::Address::from(hash)
}
