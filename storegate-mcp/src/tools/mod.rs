//! Storegate MCP tools implementation
//!
//! One tool per backend domain. Every tool takes an `action` string plus the
//! fields that action needs, builds one typed RPC request and returns the
//! response as pretty-printed JSON text. Failures (unknown action, missing
//! field, permission denial, remote error) come back as in-band error text
//! so callers never see a transport failure for a bad call.

mod catalog_tools;
mod customer_tools;
mod inventory_tools;
mod refdata_tools;
mod review_tools;
mod schema;
mod store_tools;
mod telegram_tools;

use crate::error::{Error, Result};
use crate::gateway::{Domain, ServiceGateway};
use crate::mcp::protocol::{CallToolResult, Tool, ToolContent};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error};

pub use catalog_tools::CatalogTool;
pub use customer_tools::CustomerTool;
pub use inventory_tools::InventoryTool;
pub use refdata_tools::RefDataTool;
pub use review_tools::ReviewTool;
pub use store_tools::StoreTool;
pub use telegram_tools::TelegramTool;

/// Registry for all available tools
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn ToolHandler>>,
}

/// Trait for handling tool calls
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync {
    async fn handle(&self, arguments: Option<Value>) -> Result<CallToolResult>;
    fn get_definition(&self) -> Tool;
}

impl ToolRegistry {
    /// Create a new tool registry with one tool per backend domain
    pub fn new(gateway: Arc<ServiceGateway>) -> Self {
        let mut tools: HashMap<String, Box<dyn ToolHandler>> = HashMap::new();

        tools.insert(
            "storegate_customer".to_string(),
            Box::new(CustomerTool::new(gateway.clone())),
        );
        tools.insert(
            "storegate_catalog".to_string(),
            Box::new(CatalogTool::new(gateway.clone())),
        );
        tools.insert(
            "storegate_inventory".to_string(),
            Box::new(InventoryTool::new(gateway.clone())),
        );
        tools.insert(
            "storegate_refdata".to_string(),
            Box::new(RefDataTool::new(gateway.clone())),
        );
        tools.insert(
            "storegate_reviews".to_string(),
            Box::new(ReviewTool::new(gateway.clone())),
        );
        tools.insert(
            "storegate_store".to_string(),
            Box::new(StoreTool::new(gateway.clone())),
        );
        tools.insert(
            "storegate_telegram".to_string(),
            Box::new(TelegramTool::new(gateway)),
        );

        debug!("Initialized tool registry with {} tools", tools.len());

        Self { tools }
    }

    /// List all available tools
    pub fn list_tools(&self) -> Vec<Tool> {
        let mut tools: Vec<Tool> = self
            .tools
            .values()
            .map(|handler| handler.get_definition())
            .collect();
        tools.sort_by(|a, b| a.name.cmp(&b.name));
        tools
    }

    /// Call a tool by name
    pub async fn call_tool(&self, name: &str, arguments: Option<Value>) -> Result<CallToolResult> {
        match self.tools.get(name) {
            Some(handler) => {
                debug!("Calling tool: {}", name);
                handler.handle(arguments).await
            }
            None => {
                error!("Tool not found: {}", name);
                Err(Error::tool_execution(format!("Tool not found: {}", name)))
            }
        }
    }
}

/// Helper function to create success text response
pub fn success_text_response(text: String) -> CallToolResult {
    CallToolResult {
        content: vec![ToolContent::Text { text }],
        is_error: Some(false),
    }
}

/// Helper function to create error text response
pub fn error_text_response(text: String) -> CallToolResult {
    CallToolResult {
        content: vec![ToolContent::Text { text }],
        is_error: Some(true),
    }
}

/// Default page size for search actions
pub(crate) fn default_take() -> u64 {
    20
}

/// Clamp a requested page size to the allowed range
pub(crate) fn clamp_take(take: u64) -> u64 {
    take.clamp(1, 200)
}

/// Extract a required field for the given action
pub(crate) fn required<T>(value: Option<T>, field: &str, action: &str) -> Result<T> {
    value.ok_or_else(|| {
        Error::invalid_parameter(format!("'{}' is required for action '{}'", field, action))
    })
}

/// Error result for a write action against a write-disabled domain
pub(crate) fn writes_disabled_response(domain: Domain) -> CallToolResult {
    error_text_response(format!(
        "Write actions are disabled for the '{}' domain",
        domain.as_str()
    ))
}

/// Serialize a tool response payload as pretty JSON text
pub(crate) fn to_pretty_response<T: serde::Serialize>(payload: &T) -> Result<CallToolResult> {
    let text = serde_json::to_string_pretty(payload)
        .map_err(|e| Error::tool_execution(format!("Failed to serialize response: {}", e)))?;
    Ok(success_text_response(text))
}
