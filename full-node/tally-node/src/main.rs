//! Replays a scenario of election transactions against an in-process node.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tally_modules_api::default_context::DefaultContext;
use tally_modules_api::utils::generate_address;
use tally_modules_api::MemoryStorage;
use tally_node::{
    from_toml_path, log_events, scenario_from_json_path, ElectionService, NodeConfig,
    Transaction, TxEffect,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

type C = DefaultContext;

/// Runs an election from genesis through a scenario file and prints the final tally.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to the node configuration.
    #[arg(long, default_value = "demo_data/election_config.toml")]
    config: PathBuf,

    /// Path to the JSON scenario to replay.
    #[arg(long, default_value = "demo_data/scenario.json")]
    scenario: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();

    let node_config: NodeConfig = from_toml_path(&args.config)
        .with_context(|| format!("Failed to read node configuration {:?}", args.config))?;

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&node_config.logging.filter)),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Unable to set global default subscriber")?;

    info!("Reading scenario from {:?}", args.scenario);
    let scenario = scenario_from_json_path(&args.scenario).context("Failed to read scenario")?;

    let service = ElectionService::<C>::genesis(
        MemoryStorage::new(),
        &node_config.election_config::<C>(),
    )?;

    let listener = tokio::spawn(log_events(service.subscribe()));

    for step in scenario {
        let sender = generate_address::<C>(&step.sender);
        let receipt = service
            .submit(Transaction {
                sender,
                message: step.message,
            })
            .await?;

        match receipt.effect {
            TxEffect::Successful => {
                info!(sequence = receipt.sequence, key = %step.sender, "Accepted")
            }
            TxEffect::Reverted { reason } => {
                info!(sequence = receipt.sequence, key = %step.sender, %reason, "Rejected")
            }
        }
    }

    let results = service.results().await;
    println!("{}", serde_json::to_string_pretty(&results)?);
    match results.winner {
        Some(winner) => println!("Winner is: {winner}"),
        None => println!("No candidates registered."),
    }

    drop(service);
    let logged = listener.await?;
    info!(logged, "Event listener stopped");

    Ok(())
}
