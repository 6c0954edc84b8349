//! MCP resources for read-only gateway introspection

use crate::error::{Error, Result};
use crate::gateway::ServiceGateway;
use crate::mcp::protocol::{Resource, ResourceContent, Tool};
use crate::tools::ToolRegistry;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Registry for all available resources
pub struct ResourceRegistry {
    gateway: Arc<ServiceGateway>,
    tool_definitions: Vec<Tool>,
}

impl ResourceRegistry {
    /// Create a new resource registry
    pub fn new(gateway: Arc<ServiceGateway>, tools: &ToolRegistry) -> Self {
        Self {
            gateway,
            tool_definitions: tools.list_tools(),
        }
    }

    /// List all available resources
    pub fn list_resources(&self) -> Vec<Resource> {
        vec![
            Resource {
                uri: "storegate://services".to_string(),
                name: "Backend services".to_string(),
                description: "Configured backend service endpoints and request timeout"
                    .to_string(),
                mime_type: Some("application/json".to_string()),
            },
            Resource {
                uri: "storegate://permissions".to_string(),
                name: "Write permissions".to_string(),
                description: "Per-domain write permission flags".to_string(),
                mime_type: Some("application/json".to_string()),
            },
            Resource {
                uri: "storegate://schemas".to_string(),
                name: "Tool schemas".to_string(),
                description: "Input schemas of all registered tools".to_string(),
                mime_type: Some("application/json".to_string()),
            },
        ]
    }

    /// Read a resource by URI
    pub async fn read_resource(&self, uri: &str) -> Result<Vec<ResourceContent>> {
        debug!("Reading resource: {}", uri);

        let url = Url::parse(uri)
            .map_err(|e| Error::resource_not_found(format!("Invalid URI: {}", e)))?;

        if url.scheme() != "storegate" {
            return Err(Error::resource_not_found(
                "Only storegate:// URIs are supported",
            ));
        }

        match url.host_str() {
            Some("services") => self.read_services_resource(),
            Some("permissions") => self.read_permissions_resource(),
            Some("schemas") => self.read_schemas_resource(),
            _ => Err(Error::resource_not_found(format!(
                "Unknown resource: {}",
                uri
            ))),
        }
    }

    fn read_services_resource(&self) -> Result<Vec<ResourceContent>> {
        let config = self.gateway.config();
        let content = json!({
            "endpoints": config.endpoints,
            "requestTimeoutSecs": config.request_timeout_secs,
        });

        Ok(vec![ResourceContent {
            uri: "storegate://services".to_string(),
            mime_type: Some("application/json".to_string()),
            text: Some(serde_json::to_string_pretty(&content)?),
        }])
    }

    fn read_permissions_resource(&self) -> Result<Vec<ResourceContent>> {
        let content = serde_json::to_string_pretty(&self.gateway.config().permissions)?;

        Ok(vec![ResourceContent {
            uri: "storegate://permissions".to_string(),
            mime_type: Some("application/json".to_string()),
            text: Some(content),
        }])
    }

    fn read_schemas_resource(&self) -> Result<Vec<ResourceContent>> {
        let schemas: Vec<_> = self
            .tool_definitions
            .iter()
            .map(|tool| {
                json!({
                    "name": tool.name,
                    "description": tool.description,
                    "inputSchema": tool.input_schema,
                })
            })
            .collect();

        let content = json!({
            "tools": schemas,
            "total": self.tool_definitions.len(),
        });

        Ok(vec![ResourceContent {
            uri: "storegate://schemas".to_string(),
            mime_type: Some("application/json".to_string()),
            text: Some(serde_json::to_string_pretty(&content)?),
        }])
    }
}
