#![deny(missing_docs)]
//! The `tally-election` module runs one election: the admin registers candidates and
//! opens and closes voting, every address votes at most once, and anyone can read the
//! tally and the current winner.

mod call;
mod event;
mod genesis;
mod query;


mod types;

pub use call::{CallMessage, ElectionError};
pub use event::Event;
pub use query::*;
use tally_modules_api::{
    CallResponse, Context, Error, ModuleInfo, ModulePrefix, Prefix, StateMap, StateValue,
    StateVec, WorkingSet,
};
pub use types::Candidate;

const MODULE_NAME: &str = "Election";

/// Initial configuration for the tally-election module.
#[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq, Clone)]
pub struct ElectionConfig<C: Context> {
    /// The identity allowed to register candidates and open or close voting.
    pub admin: C::Address,
}

/// The election state machine.
///
/// `Created` and `Closed` both map onto `voting_open == false`, so the machine can be
/// reopened any number of times.
#[derive(Clone)]
pub struct Election<C: Context> {
    /// Address of the module.
    pub address: C::Address,

    /// The administrator, fixed at genesis.
    pub(crate) admin: StateValue<C::Address>,

    /// Whether `vote` is currently accepted.
    pub(crate) voting_open: StateValue<bool>,

    /// Registered candidates. An index never changes once assigned.
    pub(crate) candidates: StateVec<Candidate>,

    /// Every address that has voted.
    pub(crate) has_voted: StateMap<C::Address, bool>,

    /// The size of `has_voted`, which always equals the sum of the candidate tallies.
    pub(crate) number_of_votes: StateValue<u64>,
}

impl<C: Context> Default for Election<C> {
    fn default() -> Self {
        let storage = |name: &'static str| -> Prefix {
            ModulePrefix::new_storage(module_path!(), MODULE_NAME, name).into()
        };

        Self {
            address: C::Address::from(
                ModulePrefix::new_module(module_path!(), MODULE_NAME).hash::<C>(),
            ),
            admin: StateValue::new(storage("admin")),
            voting_open: StateValue::new(storage("voting_open")),
            candidates: StateVec::new(storage("candidates")),
            has_voted: StateMap::new(storage("has_voted")),
            number_of_votes: StateValue::new(storage("number_of_votes")),
        }
    }
}

impl<C: Context> ModuleInfo for Election<C> {
    type Context = C;

    fn address(&self) -> &C::Address {
        &self.address
    }

    fn prefix(&self) -> ModulePrefix {
        ModulePrefix::new_module(module_path!(), MODULE_NAME)
    }
}

impl<C: Context> tally_modules_api::Module for Election<C> {
    type Context = C;

    type Config = ElectionConfig<C>;

    type CallMessage = call::CallMessage;

    type Event = Event<C::Address>;

    fn genesis(
        &self,
        config: &Self::Config,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<(), Error> {
        Ok(self.init_module(config, working_set)?)
    }

    fn call(
        &self,
        msg: Self::CallMessage,
        context: &Self::Context,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse, Error> {
        match msg {
            CallMessage::AddCandidate { name } => {
                Ok(self.add_candidate(name, context, working_set)?)
            }

            CallMessage::StartVoting => Ok(self.set_voting_status(true, context, working_set)?),

            CallMessage::EndVoting => Ok(self.set_voting_status(false, context, working_set)?),

            CallMessage::Vote { candidate_index } => {
                Ok(self.make_vote(candidate_index, context, working_set)?)
            }
        }
    }
}
