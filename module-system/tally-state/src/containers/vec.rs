//! An append-friendly vector stored element by element.

use std::marker::PhantomData;

use borsh::{BorshDeserialize, BorshSerialize};
use thiserror::Error;

use crate::codec::{BorshCodec, StateKeyCodec, StateValueCodec};
use crate::{Prefix, Storage, WorkingSet};

/// A vector whose elements are stored under separate keys. The length lives
/// under the bare prefix and element `i` under the prefix followed by `i`.
#[derive(Debug, PartialEq, Eq, Clone, BorshDeserialize, BorshSerialize)]
pub struct StateVec<V, C = BorshCodec> {
    _phantom: PhantomData<V>,
    codec: C,
    prefix: Prefix,
}

/// Error type for `StateVec` get method.
#[derive(Debug, Error)]
pub enum Error {
    /// The index is not smaller than the length of the vector.
    #[error("Index out of bounds for index: {0}")]
    IndexOutOfBounds(u64),
    /// The index is in bounds but nothing is stored there.
    #[error("Value not found for prefix: {0} and index: {1}")]
    MissingValue(Prefix, u64),
}

impl<V> StateVec<V>
where
    BorshCodec: StateValueCodec<V>,
{
    /// Creates a new [`StateVec`] with the given prefix and the default
    /// [`BorshCodec`].
    pub fn new(prefix: Prefix) -> Self {
        Self::with_codec(prefix, BorshCodec)
    }
}

impl<V, C> StateVec<V, C>
where
    C: StateValueCodec<V> + StateValueCodec<u64> + StateKeyCodec<u64>,
{
    /// Creates a new [`StateVec`] with the given prefix and codec.
    pub fn with_codec(prefix: Prefix, codec: C) -> Self {
        Self {
            _phantom: PhantomData,
            codec,
            prefix,
        }
    }

    /// Returns the prefix used when this [`StateVec`] was created.
    pub fn prefix(&self) -> &Prefix {
        &self.prefix
    }

    fn set_len<S: Storage>(&self, length: u64, working_set: &mut WorkingSet<S>) {
        working_set.set_singleton(self.prefix(), &self.codec, &length);
    }

    /// Returns the length of the [`StateVec`].
    pub fn len<S: Storage>(&self, working_set: &mut WorkingSet<S>) -> u64 {
        working_set
            .get_singleton::<u64, _>(self.prefix(), &self.codec)
            .unwrap_or_default()
    }

    /// Returns `true` if the [`StateVec`] has no elements.
    pub fn is_empty<S: Storage>(&self, working_set: &mut WorkingSet<S>) -> bool {
        self.len(working_set) == 0
    }

    /// Sets a value in the [`StateVec`].
    /// If the index is out of bounds, returns an error.
    /// To push a value to the end of the StateVec, use [`StateVec::push`].
    pub fn set<S: Storage>(
        &self,
        index: u64,
        value: &V,
        working_set: &mut WorkingSet<S>,
    ) -> Result<(), Error> {
        let len = self.len(working_set);

        if index < len {
            working_set.set_value(self.prefix(), &self.codec, &index, value);
            Ok(())
        } else {
            Err(Error::IndexOutOfBounds(index))
        }
    }

    /// Returns the value for the given index, or None if the index is out of bounds.
    pub fn get<S: Storage>(&self, index: u64, working_set: &mut WorkingSet<S>) -> Option<V> {
        if index < self.len(working_set) {
            working_set.get_value(self.prefix(), &self.codec, &index)
        } else {
            None
        }
    }

    /// Returns the value for the given index.
    /// If the index is out of bounds, returns an error.
    /// If the value is absent, returns an error.
    pub fn get_or_err<S: Storage>(
        &self,
        index: u64,
        working_set: &mut WorkingSet<S>,
    ) -> Result<V, Error> {
        let len = self.len(working_set);

        if index < len {
            working_set
                .get_value(self.prefix(), &self.codec, &index)
                .ok_or_else(|| Error::MissingValue(self.prefix().clone(), index))
        } else {
            Err(Error::IndexOutOfBounds(index))
        }
    }

    /// Pushes a value to the end of the [`StateVec`].
    pub fn push<S: Storage>(&self, value: &V, working_set: &mut WorkingSet<S>) {
        let len = self.len(working_set);

        working_set.set_value(self.prefix(), &self.codec, &len, value);
        self.set_len(len + 1, working_set);
    }

    /// Returns every element in index order.
    pub fn iter<S: Storage>(&self, working_set: &mut WorkingSet<S>) -> Vec<V> {
        let len = self.len(working_set);

        (0..len)
            .filter_map(|index| {
                working_set.get_value::<u64, V, C>(self.prefix(), &self.codec, &index)
            })
            .collect()
    }
}
