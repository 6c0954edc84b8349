//! Storefront tool for storegate MCP

use super::schema;
use super::{
    clamp_take, default_take, error_text_response, required, to_pretty_response,
    writes_disabled_response, ToolHandler,
};
use crate::error::{Error, Result};
use crate::gateway::{Domain, ServiceGateway};
use crate::mcp::protocol::{CallToolResult, Tool};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use storegate_rpc::contracts::catalog::SearchProductsRequest;
use storegate_rpc::contracts::review::SearchReviewsRequest;
use storegate_rpc::contracts::store::{SearchStoresRequest, Store};
use tracing::debug;

/// Tool exposing the storefront service.
pub struct StoreTool {
    gateway: Arc<ServiceGateway>,
}

#[derive(Debug, Deserialize)]
struct StoreToolParams {
    action: String,
    store_id: Option<String>,
    catalog_id: Option<String>,
    keyword: Option<String>,
    store: Option<Store>,
    #[serde(default)]
    skip: u64,
    #[serde(default = "default_take")]
    take: u64,
}

/// Combined response for the `overview` action.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StoreOverview {
    store: Store,
    product_count: u64,
    review_count: u64,
}

impl StoreTool {
    pub fn new(gateway: Arc<ServiceGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait::async_trait]
impl ToolHandler for StoreTool {
    async fn handle(&self, arguments: Option<Value>) -> Result<CallToolResult> {
        let params: StoreToolParams = match arguments {
            Some(args) => serde_json::from_value(args)
                .map_err(|e| Error::invalid_parameter(format!("Invalid parameters: {}", e)))?,
            None => {
                return Ok(error_text_response(
                    "Missing required parameters".to_string(),
                ))
            }
        };

        debug!("Store tool action: {}", params.action);

        let client = self.gateway.store();
        let result = match params.action.as_str() {
            "get" => {
                let store_id = required(params.store_id, "store_id", "get")?;
                client
                    .get_store(&store_id)
                    .await
                    .map(|s| to_pretty_response(&s))
            }
            "search" => {
                let request = SearchStoresRequest {
                    keyword: params.keyword,
                    skip: params.skip,
                    take: clamp_take(params.take),
                };
                client
                    .search_stores(&request)
                    .await
                    .map(|page| to_pretty_response(&page))
            }
            "update" => {
                if !self.gateway.writes_enabled(Domain::Store) {
                    return Ok(writes_disabled_response(Domain::Store));
                }
                let store = required(params.store, "store", "update")?;
                client
                    .update_store(store)
                    .await
                    .map(|s| to_pretty_response(&s))
            }
            "overview" => {
                let store_id = required(params.store_id, "store_id", "overview")?;

                // The store record comes first so both counts can be scoped
                // to it: products to its catalog, reviews to the store. The
                // two count searches then run in parallel; counts come from
                // single-item pages where only totalCount is used.
                match client.get_store(&store_id).await {
                    Err(e) => Err(e),
                    Ok(store) => {
                        let products_request = SearchProductsRequest {
                            keyword: None,
                            category_id: None,
                            catalog_id: params.catalog_id.or_else(|| store.catalog_id.clone()),
                            skip: 0,
                            take: 1,
                        };
                        let reviews_request = SearchReviewsRequest {
                            product_id: None,
                            store_id: Some(store_id.clone()),
                            status: None,
                            skip: 0,
                            take: 1,
                        };

                        let (products, reviews) = tokio::join!(
                            self.gateway.catalog().search_products(&products_request),
                            self.gateway.reviews().search_reviews(&reviews_request),
                        );

                        match (products, reviews) {
                            (Ok(products), Ok(reviews)) => {
                                Ok(to_pretty_response(&StoreOverview {
                                    store,
                                    product_count: products.total_count,
                                    review_count: reviews.total_count,
                                }))
                            }
                            (Err(e), _) | (_, Err(e)) => Err(e),
                        }
                    }
                }
            }
            other => {
                return Ok(error_text_response(format!(
                    "Unknown action '{}'. Valid actions: get, search, update, overview",
                    other
                )))
            }
        };

        match result {
            Ok(response) => response,
            Err(e) => Ok(error_text_response(format!("Store service error: {}", e))),
        }
    }

    fn get_definition(&self) -> Tool {
        Tool {
            name: "storegate_store".to_string(),
            description: "Manages storefronts. Actions: get a store, search \
                stores, update a store, and overview (store details plus product \
                and review counts fetched in parallel)."
                .to_string(),
            input_schema: schema::store_schema(),
        }
    }
}
