/// Events emitted by the election. Each one is stored under [`Event::key`] with its
/// borsh encoding as the value.
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
pub enum Event<A> {
    /// A candidate was registered.
    CandidateAdded {
        /// The candidate's name.
        name: String,
    },
    /// Voting was opened or closed.
    VotingStatusChanged {
        /// The new status.
        is_open: bool,
    },
    /// A vote was accepted.
    Voted {
        /// The address that voted.
        voter: A,
        /// The candidate that received the vote.
        candidate_index: u64,
    },
}

impl<A> Event<A> {
    /// The key the event is recorded under.
    pub fn key(&self) -> &'static str {
        match self {
            Event::CandidateAdded { .. } => "CandidateAdded",
            Event::VotingStatusChanged { .. } => "VotingStatusChanged",
            Event::Voted { .. } => "Voted",
        }
    }
}
