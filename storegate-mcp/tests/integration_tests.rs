//! Integration tests for storegate-mcp
//!
//! These drive the complete MCP request surface against mock backend
//! services.

use assert_matches::assert_matches;
use serde_json::{json, Value};

use storegate_mcp::config::GatewayConfig;
use storegate_mcp::error::Result;
use storegate_mcp::gateway::ServiceGateway;
use storegate_mcp::mcp::protocol::*;
use storegate_mcp::mcp::McpServer;

/// Test helper that points every backend service at one mock server
struct TestEnvironment {
    server: mockito::ServerGuard,
}

impl TestEnvironment {
    async fn new() -> Self {
        let server = mockito::Server::new_async().await;
        Self { server }
    }

    fn config(&self) -> GatewayConfig {
        let mut config = GatewayConfig::default();
        let url = self.server.url();
        config.endpoints.customer = url.clone();
        config.endpoints.catalog = url.clone();
        config.endpoints.inventory = url.clone();
        config.endpoints.refdata = url.clone();
        config.endpoints.reviews = url.clone();
        config.endpoints.store = url.clone();
        config.endpoints.telegram = url;
        config
    }

    fn create_server(&self) -> Result<McpServer> {
        self.create_server_with(self.config())
    }

    fn create_server_with(&self, config: GatewayConfig) -> Result<McpServer> {
        let gateway = ServiceGateway::new(config)?;
        Ok(McpServer::new(gateway))
    }
}

/// Test helper for MCP protocol messages
struct McpTestClient {
    next_id: i64,
}

impl McpTestClient {
    fn new() -> Self {
        Self { next_id: 1 }
    }

    fn next_id(&mut self) -> Value {
        let id = self.next_id;
        self.next_id += 1;
        json!(id)
    }

    fn create_initialize_request(&mut self) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            method: "initialize".to_string(),
            id: Some(self.next_id()),
            params: Some(json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {},
                "clientInfo": {
                    "name": "test-client",
                    "version": "1.0.0"
                }
            })),
        }
    }

    fn create_list_tools_request(&mut self) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            method: "tools/list".to_string(),
            id: Some(self.next_id()),
            params: None,
        }
    }

    fn create_call_tool_request(&mut self, name: &str, arguments: Value) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            method: "tools/call".to_string(),
            id: Some(self.next_id()),
            params: Some(json!({
                "name": name,
                "arguments": arguments
            })),
        }
    }

    fn create_list_resources_request(&mut self) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            method: "resources/list".to_string(),
            id: Some(self.next_id()),
            params: None,
        }
    }

    fn create_read_resource_request(&mut self, uri: &str) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            method: "resources/read".to_string(),
            id: Some(self.next_id()),
            params: Some(json!({
                "uri": uri
            })),
        }
    }
}

/// Extract the text of the first content item of a tools/call result
fn tool_text(result: &Value) -> &str {
    result["content"][0]["text"].as_str().unwrap()
}

#[tokio::test]
async fn test_mcp_initialization() -> Result<()> {
    let env = TestEnvironment::new().await;
    let mut server = env.create_server()?;
    let mut client = McpTestClient::new();

    let init_request = client.create_initialize_request();
    let response = server.handle_request_direct(init_request).await?;

    assert_matches!(
        response,
        JsonRpcResponse {
            result: Some(_),
            error: None,
            ..
        }
    );

    if let Some(result) = response.result {
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert!(result["capabilities"]["tools"].is_object());
        assert!(result["capabilities"]["resources"].is_object());
        assert_eq!(result["serverInfo"]["name"], "storegate-mcp");
    }

    Ok(())
}

#[tokio::test]
async fn test_requests_rejected_before_initialization() -> Result<()> {
    let env = TestEnvironment::new().await;
    let mut server = env.create_server()?;
    let mut client = McpTestClient::new();

    let response = server
        .handle_request_direct(client.create_list_tools_request())
        .await?;

    let error = response.error.expect("expected error");
    assert_eq!(error.code, -32600);

    Ok(())
}

#[tokio::test]
async fn test_list_tools() -> Result<()> {
    let env = TestEnvironment::new().await;
    let mut server = env.create_server()?;
    let mut client = McpTestClient::new();

    server
        .handle_request_direct(client.create_initialize_request())
        .await?;

    let response = server
        .handle_request_direct(client.create_list_tools_request())
        .await?;

    let result = response.result.expect("expected result");
    let tools = result["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 7);

    let tool_names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert_eq!(
        tool_names,
        vec![
            "storegate_catalog",
            "storegate_customer",
            "storegate_inventory",
            "storegate_refdata",
            "storegate_reviews",
            "storegate_store",
            "storegate_telegram",
        ]
    );

    for tool in tools {
        assert!(tool["inputSchema"]["properties"]["action"].is_object());
    }

    Ok(())
}

#[tokio::test]
async fn test_unknown_method() -> Result<()> {
    let env = TestEnvironment::new().await;
    let mut server = env.create_server()?;

    let request = JsonRpcRequest {
        jsonrpc: "2.0".to_string(),
        method: "bogus/method".to_string(),
        id: Some(json!(1)),
        params: None,
    };

    let response = server.handle_request_direct(request).await?;
    let error = response.error.expect("expected error");
    assert_eq!(error.code, -32601);

    Ok(())
}

#[tokio::test]
async fn test_call_unknown_tool_returns_in_band_error() -> Result<()> {
    let env = TestEnvironment::new().await;
    let mut server = env.create_server()?;
    let mut client = McpTestClient::new();

    server
        .handle_request_direct(client.create_initialize_request())
        .await?;

    let response = server
        .handle_request_direct(client.create_call_tool_request("no_such_tool", json!({})))
        .await?;

    let result = response.result.expect("expected result");
    assert_eq!(result["isError"], true);
    assert!(tool_text(&result).contains("Tool not found"));

    Ok(())
}

#[tokio::test]
async fn test_customer_get_end_to_end() -> Result<()> {
    let mut env = TestEnvironment::new().await;
    let mock = env
        .server
        .mock("POST", "/rpc/MemberService/GetMember")
        .match_body(mockito::Matcher::Json(json!({"memberId": "m-1"})))
        .with_status(200)
        .with_body(
            r#"{"result": {"id": "m-1", "memberType": "Contact", "name": "Jane Smith", "email": "jane@example.com"}}"#,
        )
        .create_async()
        .await;

    let mut server = env.create_server()?;
    let mut client = McpTestClient::new();
    server
        .handle_request_direct(client.create_initialize_request())
        .await?;

    let response = server
        .handle_request_direct(client.create_call_tool_request(
            "storegate_customer",
            json!({"action": "get", "member_id": "m-1"}),
        ))
        .await?;

    let result = response.result.expect("expected result");
    assert_eq!(result["isError"], false);
    let text = tool_text(&result);
    assert!(text.contains("Jane Smith"));
    assert!(text.contains("jane@example.com"));
    mock.assert_async().await;

    Ok(())
}

#[tokio::test]
async fn test_missing_required_field_is_in_band_error() -> Result<()> {
    let env = TestEnvironment::new().await;
    let mut server = env.create_server()?;
    let mut client = McpTestClient::new();

    server
        .handle_request_direct(client.create_initialize_request())
        .await?;

    // 'get' without member_id
    let response = server
        .handle_request_direct(
            client.create_call_tool_request("storegate_customer", json!({"action": "get"})),
        )
        .await?;

    let result = response.result.expect("expected result");
    assert_eq!(result["isError"], true);
    assert!(tool_text(&result).contains("'member_id' is required"));

    Ok(())
}

#[tokio::test]
async fn test_remote_error_passes_through() -> Result<()> {
    let mut env = TestEnvironment::new().await;
    env.server
        .mock("POST", "/rpc/ProductService/GetProduct")
        .with_status(200)
        .with_body(r#"{"error": {"code": 404, "message": "product not found"}}"#)
        .create_async()
        .await;

    let mut server = env.create_server()?;
    let mut client = McpTestClient::new();
    server
        .handle_request_direct(client.create_initialize_request())
        .await?;

    let response = server
        .handle_request_direct(client.create_call_tool_request(
            "storegate_catalog",
            json!({"action": "get_product", "product_id": "missing"}),
        ))
        .await?;

    let result = response.result.expect("expected result");
    assert_eq!(result["isError"], true);
    let text = tool_text(&result);
    assert!(text.contains("404"));
    assert!(text.contains("product not found"));

    Ok(())
}

#[tokio::test]
async fn test_write_action_blocked_by_permissions() -> Result<()> {
    let env = TestEnvironment::new().await;
    let mut config = env.config();
    config.permissions.catalog_writes = false;

    let mut server = env.create_server_with(config)?;
    let mut client = McpTestClient::new();
    server
        .handle_request_direct(client.create_initialize_request())
        .await?;

    let response = server
        .handle_request_direct(client.create_call_tool_request(
            "storegate_catalog",
            json!({
                "action": "delete_products",
                "product_ids": ["p-1"]
            }),
        ))
        .await?;

    let result = response.result.expect("expected result");
    assert_eq!(result["isError"], true);
    assert!(tool_text(&result).contains("disabled"));

    Ok(())
}

#[tokio::test]
async fn test_list_and_read_resources() -> Result<()> {
    let env = TestEnvironment::new().await;
    let mut server = env.create_server()?;
    let mut client = McpTestClient::new();

    server
        .handle_request_direct(client.create_initialize_request())
        .await?;

    let response = server
        .handle_request_direct(client.create_list_resources_request())
        .await?;
    let result = response.result.expect("expected result");
    let resources = result["resources"].as_array().unwrap();
    assert_eq!(resources.len(), 3);

    let response = server
        .handle_request_direct(client.create_read_resource_request("storegate://permissions"))
        .await?;
    let result = response.result.expect("expected result");
    let text = result["contents"][0]["text"].as_str().unwrap();
    let permissions: Value = serde_json::from_str(text).unwrap();
    assert_eq!(permissions["catalog_writes"], true);

    let response = server
        .handle_request_direct(client.create_read_resource_request("storegate://schemas"))
        .await?;
    let result = response.result.expect("expected result");
    let text = result["contents"][0]["text"].as_str().unwrap();
    let schemas: Value = serde_json::from_str(text).unwrap();
    assert_eq!(schemas["total"], 7);

    Ok(())
}

#[tokio::test]
async fn test_read_unknown_resource() -> Result<()> {
    let env = TestEnvironment::new().await;
    let mut server = env.create_server()?;
    let mut client = McpTestClient::new();

    server
        .handle_request_direct(client.create_initialize_request())
        .await?;

    let response = server
        .handle_request_direct(client.create_read_resource_request("storegate://nope"))
        .await?;
    assert!(response.error.is_some());

    let response = server
        .handle_request_direct(client.create_read_resource_request("other://services"))
        .await?;
    assert!(response.error.is_some());

    Ok(())
}
