//! Product catalog tool for storegate MCP

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
use storegate_rpc::contracts::catalog::{Product, SearchCategoriesRequest, SearchProductsRequest};
use tracing::debug;

/// Tool exposing the product catalog service: products and categories.
pub struct CatalogTool {
    gateway: Arc<ServiceGateway>,
}

#[derive(Debug, Deserialize)]
struct CatalogToolParams {
    action: String,
    product_id: Option<String>,
    product_ids: Option<Vec<String>>,
    category_id: Option<String>,
    catalog_id: Option<String>,
    keyword: Option<String>,
    response_group: Option<String>,
    product: Option<Product>,
    #[serde(default)]
    skip: u64,
    #[serde(default = "default_take")]
    take: u64,
}

impl CatalogTool {
    pub fn new(gateway: Arc<ServiceGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait::async_trait]
impl ToolHandler for CatalogTool {
    async fn handle(&self, arguments: Option<Value>) -> Result<CallToolResult> {
        let params: CatalogToolParams = match arguments {
            Some(args) => serde_json::from_value(args)
                .map_err(|e| Error::invalid_parameter(format!("Invalid parameters: {}", e)))?,
            None => {
                return Ok(error_text_response(
                    "Missing required parameters".to_string(),
                ))
            }
        };

        debug!("Catalog tool action: {}", params.action);

        let client = self.gateway.catalog();
        let result = match params.action.as_str() {
            "get_product" => {
                let product_id = required(params.product_id, "product_id", "get_product")?;
                client
                    .get_product(&product_id, params.response_group)
                    .await
                    .map(|p| to_pretty_response(&p))
            }
            "search_products" => {
                let request = SearchProductsRequest {
                    keyword: params.keyword,
                    category_id: params.category_id,
                    catalog_id: params.catalog_id,
                    skip: params.skip,
                    take: clamp_take(params.take),
                };
                client
                    .search_products(&request)
                    .await
                    .map(|page| to_pretty_response(&page))
            }
            "create_product" => {
                if !self.gateway.writes_enabled(Domain::Catalog) {
                    return Ok(writes_disabled_response(Domain::Catalog));
                }
                let product = required(params.product, "product", "create_product")?;
                client
                    .create_product(product)
                    .await
                    .map(|p| to_pretty_response(&p))
            }
            "update_product" => {
                if !self.gateway.writes_enabled(Domain::Catalog) {
                    return Ok(writes_disabled_response(Domain::Catalog));
                }
                let product = required(params.product, "product", "update_product")?;
                client
                    .update_product(product)
                    .await
                    .map(|p| to_pretty_response(&p))
            }
            "delete_products" => {
                if !self.gateway.writes_enabled(Domain::Catalog) {
                    return Ok(writes_disabled_response(Domain::Catalog));
                }
                let product_ids = required(params.product_ids, "product_ids", "delete_products")?;
                if product_ids.is_empty() {
                    return Err(Error::invalid_parameter(
                        "'product_ids' must not be empty for action 'delete_products'",
                    ));
                }
                client
                    .delete_products(product_ids)
                    .await
                    .map(|d| to_pretty_response(&d))
            }
            "get_category" => {
                let category_id = required(params.category_id, "category_id", "get_category")?;
                client
                    .get_category(&category_id)
                    .await
                    .map(|c| to_pretty_response(&c))
            }
            "search_categories" => {
                let request = SearchCategoriesRequest {
                    catalog_id: params.catalog_id,
                    skip: params.skip,
                    take: clamp_take(params.take),
                };
                client
                    .search_categories(&request)
                    .await
                    .map(|page| to_pretty_response(&page))
            }
            other => {
                return Ok(error_text_response(format!(
                    "Unknown action '{}'. Valid actions: get_product, search_products, \
                     create_product, update_product, delete_products, get_category, \
                     search_categories",
                    other
                )))
            }
        };

        match result {
            Ok(response) => response,
            Err(e) => Ok(error_text_response(format!("Catalog service error: {}", e))),
        }
    }

    fn get_definition(&self) -> Tool {
        Tool {
            name: "storegate_catalog".to_string(),
            description: "Manages the product catalog. Actions: get or search \
                products, create/update/delete products, get a category or search \
                categories of a catalog."
                .to_string(),
            input_schema: schema::catalog_schema(),
        }
    }
}
