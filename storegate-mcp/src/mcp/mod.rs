//! Model Context Protocol implementation for storegate

pub mod protocol;
pub mod server;
pub mod transport;

pub use protocol::*;
pub use server::McpServer;
pub use transport::*;
