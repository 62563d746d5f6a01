//! Command-line argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use uuid::Uuid;

/// Command line interface for the Offers API client.
#[derive(Debug, Parser)]
#[command(
    name = "offers-cli",
    about = "Register products and fetch offers from the Offers API"
)]
pub struct Cli {
    /// Path to the persisted client state file.
    #[arg(long = "client-location")]
    pub client_location: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Register a single product.
    Register {
        /// UUID of the product.
        #[arg(long)]
        id: Uuid,
        /// Name of the product.
        #[arg(long)]
        name: String,
        /// Description of the product.
        #[arg(long)]
        description: String,
    },

    /// Register every product listed in a JSON file, concurrently.
    #[command(name = "register_batch")]
    RegisterBatch {
        /// Path to a JSON array of product records.
        #[arg(long)]
        file: PathBuf,
    },

    /// Fetch offers for one product id.
    #[command(name = "get_offers")]
    GetOffers {
        /// UUID of the product.
        #[arg(long)]
        id: Uuid,
    },

    /// Fetch offers for every id listed in a JSON file, concurrently.
    #[command(name = "get_offers_batch")]
    GetOffersBatch {
        /// Path to a JSON array of product UUIDs.
        #[arg(long)]
        file: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_register() {
        let cli = Cli::try_parse_from([
            "offers-cli",
            "--client-location",
            "client.json",
            "register",
            "--id",
            "ad4c8529-0804-4053-a8d7-5e8b972422c7",
            "--name",
            "Widget",
            "--description",
            "A widget",
        ])
        .unwrap();

        assert_eq!(cli.client_location, PathBuf::from("client.json"));
        match cli.command {
            Commands::Register { id, name, description } => {
                assert_eq!(id.to_string(), "ad4c8529-0804-4053-a8d7-5e8b972422c7");
                assert_eq!(name, "Widget");
                assert_eq!(description, "A widget");
            }
            other => panic!("expected register, got {other:?}"),
        }
    }

    #[test]
    fn batch_commands_keep_their_underscore_names() {
        let cli = Cli::try_parse_from([
            "offers-cli",
            "--client-location",
            "client.json",
            "get_offers_batch",
            "--file",
            "ids.json",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::GetOffersBatch { .. }));

        let cli = Cli::try_parse_from([
            "offers-cli",
            "--client-location",
            "client.json",
            "register_batch",
            "--file",
            "products.json",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::RegisterBatch { .. }));
    }

    #[test]
    fn client_location_is_required() {
        let result = Cli::try_parse_from([
            "offers-cli",
            "get_offers",
            "--id",
            "ad4c8529-0804-4053-a8d7-5e8b972422c7",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn malformed_uuid_is_rejected_at_parse_time() {
        let result = Cli::try_parse_from([
            "offers-cli",
            "--client-location",
            "client.json",
            "get_offers",
            "--id",
            "not-a-uuid",
        ]);
        assert!(result.is_err());
    }
}
