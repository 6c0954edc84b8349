//! Typed RPC contracts for the backend services.
//!
//! These mirror the wire shapes of the backend RPC surfaces: camelCase field
//! names, optional fields omitted when unset, paged results as `items` plus
//! `totalCount`.

pub mod catalog;
pub mod customer;
pub mod inventory;
pub mod refdata;
pub mod review;
pub mod store;
pub mod telegram;

use serde::{Deserialize, Serialize};

/// Paged result returned by all search-style RPCs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub total_count: u64,
}

impl<T> Default for PagedResult<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
        }
    }
}

/// Result of a bulk delete RPC.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedResult {
    pub deleted_count: u64,
}
