//! Items resource module
//!
//! The service exposes a fixed two-item resource set. The set is a
//! process-lifetime constant; handlers are pure functions of their input.

use serde::{Deserialize, Serialize};

use super::error::ApiError;

/// Names of the items known to the service, in response order
pub const ITEM_NAMES: [&str; 2] = ["item1", "item2"];

/// A single named item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub name: String,
}

/// Single-item response wrapper, serialized as `{"item":{"name":"..."}}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemEnvelope {
    pub item: Item,
}

/// List all item names in fixed order
pub const fn list() -> &'static [&'static str] {
    &ITEM_NAMES
}

/// Look up a single item by name
///
/// Unknown names produce a structured 404, never a panic or an empty
/// success.
pub fn fetch(name: &str) -> Result<ItemEnvelope, ApiError> {
    if !ITEM_NAMES.contains(&name) {
        return Err(ApiError::not_found(format!("Item [{name}] not found")));
    }

    Ok(ItemEnvelope {
        item: Item {
            name: name.to_string(),
        },
    })
}
