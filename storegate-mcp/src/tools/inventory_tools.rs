//! Inventory tool for storegate MCP

use super::schema;
use super::{
    clamp_take, default_take, error_text_response, required, to_pretty_response,
    writes_disabled_response, ToolHandler,
};
use crate::error::{Error, Result};
use crate::gateway::{Domain, ServiceGateway};
use crate::mcp::protocol::{CallToolResult, Tool};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use storegate_rpc::contracts::inventory::{
    ListFulfillmentCentersRequest, SearchStocksRequest, Stock,
};
use tracing::debug;

/// Tool exposing the inventory service: stock levels and fulfillment centers.
pub struct InventoryTool {
    gateway: Arc<ServiceGateway>,
}

#[derive(Debug, Deserialize)]
struct InventoryToolParams {
    action: String,
    product_id: Option<String>,
    #[serde(default)]
    product_ids: Vec<String>,
    fulfillment_center_id: Option<String>,
    stock: Option<Stock>,
    #[serde(default)]
    skip: u64,
    #[serde(default = "default_take")]
    take: u64,
}

impl InventoryTool {
    pub fn new(gateway: Arc<ServiceGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait::async_trait]
impl ToolHandler for InventoryTool {
    async fn handle(&self, arguments: Option<Value>) -> Result<CallToolResult> {
        let params: InventoryToolParams = match arguments {
            Some(args) => serde_json::from_value(args)
                .map_err(|e| Error::invalid_parameter(format!("Invalid parameters: {}", e)))?,
            None => {
                return Ok(error_text_response(
                    "Missing required parameters".to_string(),
                ))
            }
        };

        debug!("Inventory tool action: {}", params.action);

        let client = self.gateway.inventory();
        let result = match params.action.as_str() {
            "get_stock" => {
                let product_id = required(params.product_id, "product_id", "get_stock")?;
                client
                    .get_stock(&product_id, params.fulfillment_center_id)
                    .await
                    .map(|s| to_pretty_response(&s))
            }
            "search_stocks" => {
                let request = SearchStocksRequest {
                    product_ids: params.product_ids,
                    fulfillment_center_id: params.fulfillment_center_id,
                    skip: params.skip,
                    take: clamp_take(params.take),
                };
                client
                    .search_stocks(&request)
                    .await
                    .map(|page| to_pretty_response(&page))
            }
            "update_stock" => {
                if !self.gateway.writes_enabled(Domain::Inventory) {
                    return Ok(writes_disabled_response(Domain::Inventory));
                }
                let stock = required(params.stock, "stock", "update_stock")?;
                client
                    .update_stock(stock)
                    .await
                    .map(|s| to_pretty_response(&s))
            }
            "list_fulfillment_centers" => {
                let request = ListFulfillmentCentersRequest {
                    skip: params.skip,
                    take: clamp_take(params.take),
                };
                client
                    .list_fulfillment_centers(&request)
                    .await
                    .map(|page| to_pretty_response(&page))
            }
            other => {
                return Ok(error_text_response(format!(
                    "Unknown action '{}'. Valid actions: get_stock, search_stocks, \
                     update_stock, list_fulfillment_centers",
                    other
                )))
            }
        };

        match result {
            Ok(response) => response,
            Err(e) => Ok(error_text_response(format!(
                "Inventory service error: {}",
                e
            ))),
        }
    }

    fn get_definition(&self) -> Tool {
        Tool {
            name: "storegate_inventory".to_string(),
            description: "Reads and updates stock levels. Actions: get stock for \
                a product, search stocks across products or a fulfillment center, \
                update a stock record, list fulfillment centers."
                .to_string(),
            input_schema: schema::inventory_schema(),
        }
    }
}
