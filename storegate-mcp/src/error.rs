use thiserror::Error;

/// Result type for storegate MCP operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for storegate MCP
#[derive(Error, Debug)]
pub enum Error {
    #[error("RPC error: {0}")]
    Rpc(#[from] storegate_rpc::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid tool parameter: {0}")]
    InvalidParameter(String),

    #[error("Tool execution failed: {0}")]
    ToolExecution(String),

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl Error {
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    pub fn tool_execution(msg: impl Into<String>) -> Self {
        Self::ToolExecution(msg.into())
    }

    pub fn resource_not_found(msg: impl Into<String>) -> Self {
        Self::ResourceNotFound(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}
