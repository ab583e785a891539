use anyhow::{anyhow, ensure, Result};
use tally_modules_api::{CallResponse, Context, WorkingSet};
use thiserror::Error;

use super::types::Candidate;
use super::{Election, Event};

/// Call actions supported by the module.
#[derive(
    borsh::BorshDeserialize,
    borsh::BorshSerialize,
    serde::Serialize,
    serde::Deserialize,
    Debug,
    PartialEq,
    Eq,
    Clone,
)]
#[serde(rename_all = "snake_case")]
pub enum CallMessage {
    /// Registers a new candidate with zero votes. Admin only.
    AddCandidate {
        /// Display name; duplicates and the empty string are accepted.
        name: String,
    },
    /// Opens voting. Admin only.
    StartVoting,
    /// Closes voting. Admin only.
    EndVoting,
    /// Casts the sender's single vote.
    Vote {
        /// Index of the candidate, in registration order.
        candidate_index: u64,
    },
}

/// The reasons an election operation is rejected. A rejected call leaves the state untouched.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ElectionError {
    /// An admin-only call came from someone else.
    #[error("Only the admin can call this function.")]
    Unauthorized,
    /// A vote was cast while voting is not open.
    #[error("Voting is not open.")]
    VotingClosed,
    /// The sender has already voted.
    #[error("You have already voted.")]
    AlreadyVoted,
    /// The index does not name a registered candidate.
    #[error("Invalid candidate index: {index}, {candidate_count} candidates are registered.")]
    InvalidCandidate {
        /// The requested index.
        index: u64,
        /// The number of registered candidates.
        candidate_count: u64,
    },
    /// The winner was requested before any candidate was registered.
    #[error("No candidates registered.")]
    NoCandidates,
}

impl<C: Context> Election<C> {
    /// Registers a candidate at the next free index. Must be called by the admin.
    pub(crate) fn add_candidate(
        &self,
        name: String,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse> {
        self.exit_if_not_admin(context, working_set)?;

        self.candidates.push(&Candidate::new(name.clone()), working_set);
        self.emit(Event::CandidateAdded { name }, working_set);

        Ok(CallResponse::default())
    }

    /// Opens or closes voting. Setting the current status again is accepted and still
    /// emits an event. Must be called by the admin.
    pub(crate) fn set_voting_status(
        &self,
        is_open: bool,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse> {
        self.exit_if_not_admin(context, working_set)?;

        self.voting_open.set(&is_open, working_set);
        self.emit(Event::VotingStatusChanged { is_open }, working_set);

        Ok(CallResponse::default())
    }

    /// Records the sender's vote. Must be called while voting is open.
    pub(crate) fn make_vote(
        &self,
        candidate_index: u64,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse> {
        let voter = context.sender();

        self.exit_if_voting_closed(working_set)?;
        self.exit_if_already_voted(voter, working_set)?;
        let mut candidate = self.candidate(candidate_index, working_set)?;

        candidate.vote_count = candidate
            .vote_count
            .checked_add(1)
            .ok_or(anyhow!("Vote count overflow"))?;

        let new_number_of_votes = self
            .number_of_votes
            .get(working_set)
            .unwrap_or_default()
            .checked_add(1)
            .ok_or(anyhow!("Vote count overflow"))?;

        self.candidates.set(candidate_index, &candidate, working_set)?;
        self.has_voted.set(voter, &true, working_set);
        self.number_of_votes.set(&new_number_of_votes, working_set);

        self.emit(
            Event::Voted {
                voter: voter.clone(),
                candidate_index,
            },
            working_set,
        );

        Ok(CallResponse::default())
    }

    fn emit(&self, event: Event<C::Address>, working_set: &mut WorkingSet<C::Storage>) {
        working_set.add_typed_event(event.key(), &event);
    }

    fn exit_if_not_admin(
        &self,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<()> {
        let admin = self.admin.get_or_err(working_set)?;

        ensure!(&admin == context.sender(), ElectionError::Unauthorized);
        Ok(())
    }

    fn exit_if_voting_closed(&self, working_set: &mut WorkingSet<C::Storage>) -> Result<()> {
        ensure!(
            self.voting_open.get(working_set).unwrap_or_default(),
            ElectionError::VotingClosed
        );
        Ok(())
    }

    fn exit_if_already_voted(
        &self,
        voter: &C::Address,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<()> {
        ensure!(
            !self.has_voted.contains(voter, working_set),
            ElectionError::AlreadyVoted
        );
        Ok(())
    }
}
