//! Per-tool behavior tests: action dispatch, pagination clamping, parallel
//! fan-outs and review analytics, all against mock backends.

use serde_json::{json, Value};
use std::sync::Arc;

use storegate_mcp::config::GatewayConfig;
use storegate_mcp::error::Result;
use storegate_mcp::gateway::ServiceGateway;
use storegate_mcp::mcp::protocol::ToolContent;
use storegate_mcp::tools::ToolRegistry;

/// Test helper: a tool registry whose every backend is one mock server
struct ToolTestEnvironment {
    server: mockito::ServerGuard,
}

impl ToolTestEnvironment {
    async fn new() -> Self {
        Self {
            server: mockito::Server::new_async().await,
        }
    }

    fn registry(&self) -> Result<ToolRegistry> {
        let mut config = GatewayConfig::default();
        let url = self.server.url();
        config.endpoints.customer = url.clone();
        config.endpoints.catalog = url.clone();
        config.endpoints.inventory = url.clone();
        config.endpoints.refdata = url.clone();
        config.endpoints.reviews = url.clone();
        config.endpoints.store = url.clone();
        config.endpoints.telegram = url;

        Ok(ToolRegistry::new(Arc::new(ServiceGateway::new(config)?)))
    }
}

/// Extract the text payload of a tool result and parse it as JSON
fn parse_tool_json(result: &storegate_mcp::mcp::protocol::CallToolResult) -> Value {
    let ToolContent::Text { text } = &result.content[0];
    serde_json::from_str(text).unwrap()
}

#[tokio::test]
async fn test_unknown_action_lists_valid_actions() -> Result<()> {
    let env = ToolTestEnvironment::new().await;
    let registry = env.registry()?;

    let result = registry
        .call_tool("storegate_inventory", Some(json!({"action": "explode"})))
        .await?;

    assert_eq!(result.is_error, Some(true));
    let ToolContent::Text { text } = &result.content[0];
    assert!(text.contains("Unknown action 'explode'"));
    assert!(text.contains("get_stock"));

    Ok(())
}

#[tokio::test]
async fn test_search_take_is_clamped() -> Result<()> {
    let mut env = ToolTestEnvironment::new().await;
    let mock = env
        .server
        .mock("POST", "/rpc/ProductService/SearchProducts")
        .match_body(mockito::Matcher::Json(json!({
            "skip": 0,
            "take": 200
        })))
        .with_status(200)
        .with_body(r#"{"result": {"items": [], "totalCount": 0}}"#)
        .create_async()
        .await;

    let registry = env.registry()?;
    let result = registry
        .call_tool(
            "storegate_catalog",
            Some(json!({"action": "search_products", "take": 5000})),
        )
        .await?;

    assert_eq!(result.is_error, Some(false));
    mock.assert_async().await;

    Ok(())
}

#[tokio::test]
async fn test_refdata_all_fans_out_to_four_calls() -> Result<()> {
    let mut env = ToolTestEnvironment::new().await;

    let currencies = env
        .server
        .mock("POST", "/rpc/ReferenceDataService/ListCurrencies")
        .with_status(200)
        .with_body(r#"{"result": [{"code": "USD", "name": "US Dollar"}]}"#)
        .create_async()
        .await;
    let languages = env
        .server
        .mock("POST", "/rpc/ReferenceDataService/ListLanguages")
        .with_status(200)
        .with_body(r#"{"result": [{"code": "en-US", "name": "English (US)"}]}"#)
        .create_async()
        .await;
    let countries = env
        .server
        .mock("POST", "/rpc/ReferenceDataService/ListCountries")
        .with_status(200)
        .with_body(r#"{"result": [{"code": "US", "name": "United States"}]}"#)
        .create_async()
        .await;
    let units = env
        .server
        .mock("POST", "/rpc/ReferenceDataService/ListMeasureUnits")
        .with_status(200)
        .with_body(r#"{"result": [{"code": "kg", "name": "Kilogram"}]}"#)
        .create_async()
        .await;

    let registry = env.registry()?;
    let result = registry
        .call_tool("storegate_refdata", Some(json!({"action": "all"})))
        .await?;

    assert_eq!(result.is_error, Some(false));
    let payload = parse_tool_json(&result);
    assert_eq!(payload["currencies"][0]["code"], "USD");
    assert_eq!(payload["languages"][0]["code"], "en-US");
    assert_eq!(payload["countries"][0]["code"], "US");
    assert_eq!(payload["measure_units"][0]["code"], "kg");

    currencies.assert_async().await;
    languages.assert_async().await;
    countries.assert_async().await;
    units.assert_async().await;

    Ok(())
}

#[tokio::test]
async fn test_refdata_all_surfaces_partial_failure() -> Result<()> {
    let mut env = ToolTestEnvironment::new().await;

    for method in ["ListCurrencies", "ListLanguages", "ListCountries"] {
        env.server
            .mock("POST", format!("/rpc/ReferenceDataService/{}", method).as_str())
            .with_status(200)
            .with_body(r#"{"result": []}"#)
            .create_async()
            .await;
    }
    env.server
        .mock("POST", "/rpc/ReferenceDataService/ListMeasureUnits")
        .with_status(200)
        .with_body(r#"{"error": {"code": 500, "message": "unit registry offline"}}"#)
        .create_async()
        .await;

    let registry = env.registry()?;
    let result = registry
        .call_tool("storegate_refdata", Some(json!({"action": "all"})))
        .await?;

    assert_eq!(result.is_error, Some(true));
    let ToolContent::Text { text } = &result.content[0];
    assert!(text.contains("unit registry offline"));

    Ok(())
}

#[tokio::test]
async fn test_store_overview_scopes_counts_to_the_store() -> Result<()> {
    let mut env = ToolTestEnvironment::new().await;

    env.server
        .mock("POST", "/rpc/StoreService/GetStore")
        .match_body(mockito::Matcher::Json(json!({"storeId": "electronics"})))
        .with_status(200)
        .with_body(
            r#"{"result": {"id": "electronics", "name": "Electronics", "catalogId": "cat-1", "state": "Open"}}"#,
        )
        .create_async()
        .await;
    // The product count inherits the store's catalog
    let products = env
        .server
        .mock("POST", "/rpc/ProductService/SearchProducts")
        .match_body(mockito::Matcher::Json(json!({
            "catalogId": "cat-1",
            "skip": 0,
            "take": 1
        })))
        .with_status(200)
        .with_body(r#"{"result": {"items": [], "totalCount": 1250}}"#)
        .create_async()
        .await;
    // The review count is restricted to this storefront
    let reviews = env
        .server
        .mock("POST", "/rpc/ReviewService/SearchReviews")
        .match_body(mockito::Matcher::Json(json!({
            "storeId": "electronics",
            "skip": 0,
            "take": 1
        })))
        .with_status(200)
        .with_body(r#"{"result": {"items": [], "totalCount": 314}}"#)
        .create_async()
        .await;

    let registry = env.registry()?;
    let result = registry
        .call_tool(
            "storegate_store",
            Some(json!({"action": "overview", "store_id": "electronics"})),
        )
        .await?;

    assert_eq!(result.is_error, Some(false));
    let payload = parse_tool_json(&result);
    assert_eq!(payload["store"]["name"], "Electronics");
    assert_eq!(payload["productCount"], 1250);
    assert_eq!(payload["reviewCount"], 314);

    products.assert_async().await;
    reviews.assert_async().await;

    Ok(())
}

#[tokio::test]
async fn test_store_overview_honors_explicit_catalog() -> Result<()> {
    let mut env = ToolTestEnvironment::new().await;

    env.server
        .mock("POST", "/rpc/StoreService/GetStore")
        .with_status(200)
        .with_body(
            r#"{"result": {"id": "outlet", "name": "Outlet", "catalogId": "cat-1", "state": "Open"}}"#,
        )
        .create_async()
        .await;
    let products = env
        .server
        .mock("POST", "/rpc/ProductService/SearchProducts")
        .match_body(mockito::Matcher::PartialJson(json!({
            "catalogId": "cat-clearance"
        })))
        .with_status(200)
        .with_body(r#"{"result": {"items": [], "totalCount": 42}}"#)
        .create_async()
        .await;
    env.server
        .mock("POST", "/rpc/ReviewService/SearchReviews")
        .with_status(200)
        .with_body(r#"{"result": {"items": [], "totalCount": 7}}"#)
        .create_async()
        .await;

    let registry = env.registry()?;
    let result = registry
        .call_tool(
            "storegate_store",
            Some(json!({
                "action": "overview",
                "store_id": "outlet",
                "catalog_id": "cat-clearance"
            })),
        )
        .await?;

    assert_eq!(result.is_error, Some(false));
    let payload = parse_tool_json(&result);
    assert_eq!(payload["productCount"], 42);

    products.assert_async().await;

    Ok(())
}

#[tokio::test]
async fn test_review_analytics_over_the_wire() -> Result<()> {
    let mut env = ToolTestEnvironment::new().await;

    env.server
        .mock("POST", "/rpc/ReviewService/SearchReviews")
        .match_body(mockito::Matcher::PartialJson(json!({
            "productId": "p-1",
            "take": 200
        })))
        .with_status(200)
        .with_body(
            r#"{"result": {"items": [
                {"id": "r1", "productId": "p-1", "rating": 5, "status": "Approved"},
                {"id": "r2", "productId": "p-1", "rating": 5, "status": "Approved"},
                {"id": "r3", "productId": "p-1", "rating": 4, "status": "Approved"},
                {"id": "r4", "productId": "p-1", "rating": 3, "status": "Approved"},
                {"id": "r5", "productId": "p-1", "rating": 1, "status": "Approved"}
            ], "totalCount": 437}}"#,
        )
        .create_async()
        .await;

    let registry = env.registry()?;
    let result = registry
        .call_tool(
            "storegate_reviews",
            Some(json!({"action": "analytics", "product_id": "p-1"})),
        )
        .await?;

    assert_eq!(result.is_error, Some(false));
    let payload = parse_tool_json(&result);
    // The backend total is reported alongside the analyzed page size
    assert_eq!(payload["totalReviews"], 437);
    assert_eq!(payload["sampledReviews"], 5);
    assert_eq!(payload["averageRating"], 3.6);
    assert_eq!(payload["sentiment"]["positivePercent"], 60.0);
    assert_eq!(payload["sentiment"]["neutralPercent"], 20.0);
    assert_eq!(payload["sentiment"]["negativePercent"], 20.0);
    assert_eq!(payload["distribution"][4]["percent"], 40.0);

    Ok(())
}

#[tokio::test]
async fn test_telegram_send_message_round_trip() -> Result<()> {
    let mut env = ToolTestEnvironment::new().await;

    let mock = env
        .server
        .mock("POST", "/rpc/TelegramService/SendMessage")
        .match_body(mockito::Matcher::Json(json!({
            "chatId": 99,
            "text": "back in stock",
            "parseMode": "HTML"
        })))
        .with_status(200)
        .with_body(r#"{"result": {"messageId": 12, "chatId": 99}}"#)
        .create_async()
        .await;

    let registry = env.registry()?;
    let result = registry
        .call_tool(
            "storegate_telegram",
            Some(json!({
                "action": "send_message",
                "chat_id": 99,
                "text": "back in stock",
                "parse_mode": "HTML"
            })),
        )
        .await?;

    assert_eq!(result.is_error, Some(false));
    let payload = parse_tool_json(&result);
    assert_eq!(payload["messageId"], 12);
    mock.assert_async().await;

    Ok(())
}
