//! Contracts for the inventory service.

use serde::{Deserialize, Serialize};

/// Stock level of one product at one fulfillment center.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    pub product_id: String,
    pub fulfillment_center_id: String,
    pub in_stock_quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserved_quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_backorder: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentCenter {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetStockRequest {
    pub product_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fulfillment_center_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStocksRequest {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub product_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fulfillment_center_id: Option<String>,
    pub skip: u64,
    pub take: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStockRequest {
    pub stock: Stock,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFulfillmentCentersRequest {
    pub skip: u64,
    pub take: u64,
}
