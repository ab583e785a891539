use tally_modules_api::{Context, WorkingSet};

use super::types::Candidate;
use super::{Election, ElectionError};

/// A snapshot of the whole election, in registration order.
#[derive(Debug, Eq, PartialEq, Clone, serde::Deserialize, serde::Serialize)]
pub struct ResultsResponse {
    /// Whether votes are currently accepted.
    pub voting_open: bool,
    /// Every candidate with its tally.
    pub candidates: Vec<Candidate>,
    /// Total number of accepted votes.
    pub total_votes: u64,
    /// The current leader, `None` when no candidate is registered.
    pub winner: Option<String>,
}

impl<C: Context> Election<C> {
    /// Number of registered candidates.
    pub fn candidate_count(&self, working_set: &mut WorkingSet<C::Storage>) -> u64 {
        self.candidates.len(working_set)
    }

    /// The candidate registered at `index`.
    pub fn candidate(
        &self,
        index: u64,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<Candidate, ElectionError> {
        self.candidates
            .get(index, working_set)
            .ok_or_else(|| ElectionError::InvalidCandidate {
                index,
                candidate_count: self.candidates.len(working_set),
            })
    }

    /// All candidates, in registration order.
    pub fn candidates(&self, working_set: &mut WorkingSet<C::Storage>) -> Vec<Candidate> {
        self.candidates.iter(working_set)
    }

    /// The index and record of the candidate with the most votes. A tie goes to the
    /// candidate registered first. Answers in every phase.
    pub fn winner(
        &self,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<(u64, Candidate), ElectionError> {
        let mut winner: Option<(u64, Candidate)> = None;

        for (index, candidate) in (0u64..).zip(self.candidates(working_set)) {
            let leads = winner
                .as_ref()
                .map_or(true, |(_, best)| candidate.vote_count > best.vote_count);
            if leads {
                winner = Some((index, candidate));
            }
        }

        winner.ok_or(ElectionError::NoCandidates)
    }

    /// Name of the candidate returned by [`Election::winner`].
    pub fn winner_name(
        &self,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<String, ElectionError> {
        self.winner(working_set).map(|(_, candidate)| candidate.name)
    }

    /// Whether votes are currently accepted.
    pub fn voting_open(&self, working_set: &mut WorkingSet<C::Storage>) -> bool {
        self.voting_open.get(working_set).unwrap_or_default()
    }

    /// The admin set at genesis.
    pub fn admin(&self, working_set: &mut WorkingSet<C::Storage>) -> Option<C::Address> {
        self.admin.get(working_set)
    }

    /// Whether `voter` has cast its vote.
    pub fn has_voted(
        &self,
        voter: &C::Address,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> bool {
        self.has_voted.contains(voter, working_set)
    }

    /// Total number of accepted votes.
    pub fn total_votes(&self, working_set: &mut WorkingSet<C::Storage>) -> u64 {
        self.number_of_votes.get(working_set).unwrap_or_default()
    }

    /// Everything above in one response.
    pub fn results(&self, working_set: &mut WorkingSet<C::Storage>) -> ResultsResponse {
        ResultsResponse {
            voting_open: self.voting_open(working_set),
            candidates: self.candidates(working_set),
            total_votes: self.total_votes(working_set),
            winner: self.winner_name(working_set).ok(),
        }
    }
}
