//! Storegate MCP library
//!
//! Model Context Protocol server exposing the storegate backend services
//! (customers, catalog, inventory, reference data, reviews, storefronts,
//! Telegram bot) as callable tools.

pub mod config;
pub mod error;
pub mod gateway;
pub mod mcp;
pub mod resources;
pub mod tools;
