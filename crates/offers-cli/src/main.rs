//! Offers CLI entry point
//!
//! Loads the persisted client state named by `--client-location`, runs one
//! subcommand against the facade, and writes the (possibly renewed) state
//! back to the same file so later invocations reuse the access token.
//!
//! Single-item commands exit non-zero on failure. Batch commands report
//! per-item outcomes and exit zero as long as the batch itself ran.

mod args;
mod commands;
mod input;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use offers_client::{Client, Product};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use args::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr so stdout stays machine-readable.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let client = Client::load_from_file(&cli.client_location)
        .await
        .with_context(|| {
            format!(
                "failed to load client state from {}",
                cli.client_location.display()
            )
        })?;
    let client = Arc::new(client);

    match cli.command {
        Commands::Register {
            id,
            name,
            description,
        } => {
            commands::register(&client, Product::new(id, name, description)).await?;
        }
        Commands::GetOffers { id } => {
            commands::get_offers(&client, id).await?;
        }
        Commands::RegisterBatch { file } => {
            let products = input::parse_products(&file)?;
            let outcomes = commands::register_batch(Arc::clone(&client), products).await;
            commands::report_registrations(&outcomes);
        }
        Commands::GetOffersBatch { file } => {
            let ids = input::parse_ids(&file)?;
            let outcomes = commands::get_offers_batch(Arc::clone(&client), ids).await;
            commands::report_offers(&outcomes);
        }
    }

    // Persist renewed tokens for the next invocation.
    client
        .save_to_file(&cli.client_location)
        .await
        .with_context(|| {
            format!(
                "failed to save client state to {}",
                cli.client_location.display()
            )
        })?;

    Ok(())
}
