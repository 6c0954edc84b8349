//! RPC contracts and clients for the storegate backend services.
//!
//! Each backend microservice (customer, catalog, inventory, reference data,
//! reviews, stores, Telegram bot) exposes a JSON-over-HTTP RPC surface. This
//! crate holds the typed request/response contracts and a thin client per
//! service. No retries, no caching: remote errors pass through as
//! [`Error::Remote`].

pub mod client;
pub mod contracts;
pub mod error;
pub mod services;

pub use client::RpcClient;
pub use error::{Error, Result};
pub use services::{
    CatalogClient, CustomerClient, InventoryClient, RefDataClient, ReviewClient, StoreClient,
    TelegramClient,
};
