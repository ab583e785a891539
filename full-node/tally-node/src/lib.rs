#![deny(missing_docs)]
//! An in-process node for the tally election: it owns the state, serializes
//! transactions, commits or reverts each one and publishes the emitted events.

pub mod config;
mod service;

pub use config::{from_toml_path, scenario_from_json_path, NodeConfig, ScenarioStep};
pub use service::{
    log_events, ElectionEvent, ElectionService, Transaction, TxEffect, TxReceipt,
};
