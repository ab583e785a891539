use tally_election::{CallMessage, Election, ElectionConfig, ElectionError};
use tally_modules_api::default_context::DefaultContext;
use tally_modules_api::{Address, Error, MemoryStorage, Module, Spec, Storage, WorkingSet};

pub type C = DefaultContext;

pub fn generate_address(key: &str) -> <C as Spec>::Address {
    tally_modules_api::utils::generate_address::<C>(key)
}

/// Runs genesis for `admin` on fresh storage and commits it.
pub fn setup(admin: Address) -> (Election<C>, MemoryStorage) {
    let election = Election::<C>::default();
    let storage = MemoryStorage::new();
    let mut working_set = WorkingSet::new(storage.clone());
    election
        .genesis(&ElectionConfig { admin }, &mut working_set)
        .unwrap();
    storage.commit(&working_set.checkpoint().freeze());
    (election, storage)
}

/// Executes one call in its own working set and commits it only if it succeeds.
pub fn execute(
    election: &Election<C>,
    storage: &MemoryStorage,
    sender: Address,
    msg: CallMessage,
) -> Result<(), ElectionError> {
    let mut working_set = WorkingSet::new(storage.clone());
    match election.call(msg, &C { sender }, &mut working_set) {
        Ok(_) => {
            storage.commit(&working_set.checkpoint().freeze());
            Ok(())
        }
        Err(err) => {
            working_set.revert();
            Err(election_error(err))
        }
    }
}

pub fn election_error(err: Error) -> ElectionError {
    let Error::ModuleError(err) = err;
    err.downcast_ref::<ElectionError>()
        .cloned()
        .unwrap_or_else(|| panic!("not an election error: {err}"))
}

#[allow(dead_code)]
pub fn read<T>(storage: &MemoryStorage, f: impl FnOnce(&mut WorkingSet<MemoryStorage>) -> T) -> T {
    f(&mut WorkingSet::new(storage.clone()))
}
