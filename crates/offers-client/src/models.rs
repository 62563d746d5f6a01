//! Value records exchanged with the Offers API

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A product to register with the catalog.
///
/// Immutable value constructed by the caller before registration; the id is
/// caller-assigned and echoed back by the registration endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

impl Product {
    pub fn new(id: Uuid, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
        }
    }
}

/// One offer for a registered product. Created from API responses only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub id: Uuid,
    /// Price in the smallest currency unit.
    pub price: i64,
    pub items_in_stock: u32,
}

impl fmt::Display for Offer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "offer {}: price {}, {} in stock",
            self.id, self.price, self.items_in_stock
        )
    }
}
