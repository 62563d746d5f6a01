//! Offers API client library
//!
//! Client SDK for a remote product/offer catalog service: exchanges a
//! long-lived refresh token for short-lived access tokens, registers
//! products, and retrieves offers per product id. The transport underneath
//! is pluggable (`offers-transport`); this crate owns the credential
//! lifecycle and the mapping of raw responses onto a typed error taxonomy.
//!
//! Typical flow:
//! 1. `ClientState::load()` reads the persisted configuration (refresh
//!    token, held access token, transport discriminator).
//! 2. `Client::new()` builds the facade with the configured transport.
//! 3. `Client::register_product()` / `Client::get_offers()` renew the
//!    access token lazily when it is missing or expired.
//! 4. `Client::save_to_file()` persists the (possibly renewed) state for
//!    the next run.

pub mod client;
pub mod error;
pub mod log;
pub mod models;
pub mod state;

pub use client::Client;
pub use error::{Error, Result};
pub use log::{CallLog, CallRecord};
pub use models::{Offer, Product};
pub use state::{ClientState, DEFAULT_BASE_URL};
