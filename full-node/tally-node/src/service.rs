use std::fmt::Debug;

use anyhow::Context as _;
use tally_election::{
    CallMessage, Candidate, Election, ElectionConfig, ElectionError, ResultsResponse,
};
use tally_modules_api::{Context, Module, Storage, WorkingSet};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

/// Event type published by [`ElectionService`].
pub type ElectionEvent<C> = tally_election::Event<<C as tally_modules_api::Spec>::Address>;

const EVENTS_CHANNEL_CAPACITY: usize = 100;

/// A call together with the identity that sent it.
#[derive(Debug, Clone)]
pub struct Transaction<C: Context> {
    /// Authenticated sender of the call.
    pub sender: C::Address,
    /// The call to execute.
    pub message: CallMessage,
}

/// The outcome of a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxEffect {
    /// The call succeeded and its writes were committed.
    Successful,
    /// The call failed and its writes were discarded.
    Reverted {
        /// Why the call was rejected.
        reason: String,
    },
}

/// The receipt returned for every submitted transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct TxReceipt<C: Context> {
    /// Position of the transaction in submission order, starting at 0.
    pub sequence: u64,
    /// Whether the transaction was applied.
    pub effect: TxEffect,
    /// Events emitted by the transaction. Empty when reverted.
    pub events: Vec<ElectionEvent<C>>,
}

/// Logs every received event until all senders are dropped. Events missed by a lagging
/// receiver are reported and skipped. Returns how many events were logged.
pub async fn log_events<A: Debug + Clone>(
    mut events: broadcast::Receiver<tally_election::Event<A>>,
) -> u64 {
    let mut logged = 0;
    loop {
        match events.recv().await {
            Ok(event) => {
                info!(?event, "Election event");
                logged += 1;
            }
            Err(RecvError::Lagged(skipped)) => warn!(skipped, "Event listener lagged behind"),
            Err(RecvError::Closed) => break,
        }
    }
    logged
}

struct Inner<C: Context> {
    election: Election<C>,
    storage: C::Storage,
    next_sequence: u64,
}

/// Serializes transactions against a single election. Each transaction runs in its own
/// working set, so a rejected call never leaves a partial write behind.
pub struct ElectionService<C: Context> {
    inner: Mutex<Inner<C>>,
    events_sender: broadcast::Sender<ElectionEvent<C>>,
}

impl<C: Context> ElectionService<C> {
    /// Runs genesis on `storage` and commits it.
    pub fn genesis(storage: C::Storage, config: &ElectionConfig<C>) -> anyhow::Result<Self> {
        let election = Election::<C>::default();
        let mut working_set = WorkingSet::new(storage.clone());
        election
            .genesis(config, &mut working_set)
            .context("Election genesis failed")?;
        storage.commit(&working_set.checkpoint().freeze());
        info!(admin = %config.admin, "Election genesis committed");

        let (events_sender, _) = broadcast::channel(EVENTS_CHANNEL_CAPACITY);

        Ok(Self {
            inner: Mutex::new(Inner {
                election,
                storage,
                next_sequence: 0,
            }),
            events_sender,
        })
    }

    /// Receives every event of every committed transaction from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<ElectionEvent<C>> {
        self.events_sender.subscribe()
    }

    /// Executes a transaction. Only internal failures are returned as `Err`; a rejected
    /// call yields a [`TxEffect::Reverted`] receipt.
    pub async fn submit(&self, tx: Transaction<C>) -> anyhow::Result<TxReceipt<C>> {
        let mut inner = self.inner.lock().await;
        let sequence = inner.next_sequence;
        inner.next_sequence += 1;

        debug!(sequence, sender = %tx.sender, message = ?tx.message, "Executing transaction");

        let context = C::new(tx.sender);
        let mut working_set = WorkingSet::new(inner.storage.clone());

        match inner.election.call(tx.message, &context, &mut working_set) {
            Ok(_) => {
                let events = working_set
                    .take_events()
                    .iter()
                    .map(|event| event.decode())
                    .collect::<Result<Vec<ElectionEvent<C>>, _>>()
                    .context("Failed to decode election event")?;

                let writes = working_set.checkpoint().freeze();
                inner.storage.commit(&writes);
                info!(
                    sequence,
                    writes = writes.ordered_writes.len(),
                    "Transaction committed"
                );

                for event in &events {
                    // Sending only fails when nobody is subscribed.
                    let _ = self.events_sender.send(event.clone());
                }

                Ok(TxReceipt {
                    sequence,
                    effect: TxEffect::Successful,
                    events,
                })
            }
            Err(err) => {
                working_set.revert();
                warn!(sequence, error = %err, "Transaction reverted");

                Ok(TxReceipt {
                    sequence,
                    effect: TxEffect::Reverted {
                        reason: err.to_string(),
                    },
                    events: Vec::new(),
                })
            }
        }
    }

    /// Runs a read-only closure against the committed state.
    pub async fn query<T>(
        &self,
        f: impl FnOnce(&Election<C>, &mut WorkingSet<C::Storage>) -> T,
    ) -> T {
        let inner = self.inner.lock().await;
        let mut working_set = WorkingSet::new(inner.storage.clone());
        f(&inner.election, &mut working_set)
    }

    /// Number of registered candidates.
    pub async fn candidate_count(&self) -> u64 {
        self.query(|election, ws| election.candidate_count(ws)).await
    }

    /// The candidate registered at `index`.
    pub async fn candidate(&self, index: u64) -> Result<Candidate, ElectionError> {
        self.query(|election, ws| election.candidate(index, ws)).await
    }

    /// Name of the current leader.
    pub async fn winner_name(&self) -> Result<String, ElectionError> {
        self.query(|election, ws| election.winner_name(ws)).await
    }

    /// Whether votes are currently accepted.
    pub async fn voting_open(&self) -> bool {
        self.query(|election, ws| election.voting_open(ws)).await
    }

    /// The election admin.
    pub async fn admin(&self) -> Option<C::Address> {
        self.query(|election, ws| election.admin(ws)).await
    }

    /// Whether `voter` has voted.
    pub async fn has_voted(&self, voter: &C::Address) -> bool {
        self.query(|election, ws| election.has_voted(voter, ws)).await
    }

    /// Total number of accepted votes.
    pub async fn total_votes(&self) -> u64 {
        self.query(|election, ws| election.total_votes(ws)).await
    }

    /// Candidates, tallies and winner in one snapshot.
    pub async fn results(&self) -> ResultsResponse {
        self.query(|election, ws| election.results(ws)).await
    }
}
