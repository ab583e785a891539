use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// A registered candidate and its tally.
#[derive(BorshDeserialize, BorshSerialize, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The name given at registration.
    pub name: String,
    /// Accepted votes for this candidate.
    pub vote_count: u64,
}

impl Candidate {
    /// A candidate with no votes.
    pub fn new(name: String) -> Self {
        Self {
            name,
            vote_count: 0,
        }
    }
}
