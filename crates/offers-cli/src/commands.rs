//! Subcommand handlers
//!
//! Single-item commands propagate the first error to the caller. Batch
//! commands dispatch one facade call per item concurrently and report every
//! item's outcome; one bad id never aborts the rest.

use std::sync::Arc;

use offers_client::{Client, Offer, Product};
use tokio::task::JoinSet;
use tracing::error;
use uuid::Uuid;

pub async fn register(client: &Client, product: Product) -> anyhow::Result<()> {
    let id = client.register_product(&product).await?;
    println!("registered product {id}");
    Ok(())
}

pub async fn get_offers(client: &Client, id: Uuid) -> anyhow::Result<()> {
    let offers = client.get_offers(id).await?;
    print_offers(id, &offers);
    Ok(())
}

/// Outcome of one batch item, keyed by the product id it was issued for.
pub struct BatchOutcome<T> {
    pub id: Uuid,
    pub result: offers_client::Result<T>,
}

/// Register every product concurrently. No cross-item ordering guarantee.
pub async fn register_batch(
    client: Arc<Client>,
    products: Vec<Product>,
) -> Vec<BatchOutcome<Uuid>> {
    let mut tasks = JoinSet::new();
    for product in products {
        let client = Arc::clone(&client);
        tasks.spawn(async move {
            let result = client.register_product(&product).await;
            BatchOutcome {
                id: product.id,
                result,
            }
        });
    }
    collect(tasks).await
}

/// Fetch offers for every id concurrently. No cross-item ordering guarantee.
pub async fn get_offers_batch(
    client: Arc<Client>,
    ids: Vec<Uuid>,
) -> Vec<BatchOutcome<Vec<Offer>>> {
    let mut tasks = JoinSet::new();
    for id in ids {
        let client = Arc::clone(&client);
        tasks.spawn(async move {
            let result = client.get_offers(id).await;
            BatchOutcome { id, result }
        });
    }
    collect(tasks).await
}

async fn collect<T: Send + 'static>(mut tasks: JoinSet<BatchOutcome<T>>) -> Vec<BatchOutcome<T>> {
    let mut outcomes = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(outcome) => outcomes.push(outcome),
            // A panicked item is reported and skipped; the rest of the
            // batch keeps going.
            Err(e) => error!(error = %e, "batch task failed to run"),
        }
    }
    outcomes
}

pub fn report_registrations(outcomes: &[BatchOutcome<Uuid>]) {
    for outcome in outcomes {
        match &outcome.result {
            Ok(_) => println!("product {}: registered", outcome.id),
            Err(e) => println!("product {}: {e}", outcome.id),
        }
    }
}

pub fn report_offers(outcomes: &[BatchOutcome<Vec<Offer>>]) {
    for outcome in outcomes {
        match &outcome.result {
            Ok(offers) => print_offers(outcome.id, offers),
            Err(e) => println!("product {}: {e}", outcome.id),
        }
    }
}

fn print_offers(id: Uuid, offers: &[Offer]) {
    if offers.is_empty() {
        println!("product {id}: no offers");
        return;
    }
    println!("product {id}:");
    for offer in offers {
        println!("  {offer}");
    }
}
