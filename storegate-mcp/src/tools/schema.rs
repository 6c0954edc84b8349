//! JSON schemas for tool parameters

use serde_json::{json, Value};

/// Pagination fields shared by the search actions.
fn paging_properties() -> Value {
    json!({
        "skip": {
            "type": "number",
            "description": "Number of items to skip for pagination",
            "default": 0,
            "minimum": 0
        },
        "take": {
            "type": "number",
            "description": "Maximum number of items to return",
            "default": 20,
            "minimum": 1,
            "maximum": 200
        }
    })
}

/// Schema for the storegate_customer tool
pub fn customer_schema() -> Value {
    let paging = paging_properties();
    json!({
        "type": "object",
        "properties": {
            "action": {
                "type": "string",
                "enum": ["get", "search", "create", "update", "delete"],
                "description": "Customer service action to perform"
            },
            "member_id": {
                "type": "string",
                "description": "Member id, required for 'get'"
            },
            "member_ids": {
                "type": "array",
                "items": { "type": "string" },
                "description": "Member ids to delete, required for 'delete'"
            },
            "keyword": {
                "type": "string",
                "description": "Free-text filter for 'search'"
            },
            "group": {
                "type": "string",
                "description": "Member group filter for 'search'"
            },
            "contact": {
                "type": "object",
                "description": "Contact payload for 'create'/'update'; fields follow the service contract",
                "properties": {
                    "id": { "type": "string", "description": "Required for 'update'" },
                    "firstName": { "type": "string" },
                    "lastName": { "type": "string" },
                    "email": { "type": "string" },
                    "phone": { "type": "string" },
                    "groups": { "type": "array", "items": { "type": "string" } }
                },
                "required": ["firstName", "lastName"]
            },
            "skip": paging["skip"],
            "take": paging["take"]
        },
        "required": ["action"],
        "additionalProperties": false
    })
}

/// Schema for the storegate_catalog tool
pub fn catalog_schema() -> Value {
    let paging = paging_properties();
    json!({
        "type": "object",
        "properties": {
            "action": {
                "type": "string",
                "enum": [
                    "get_product", "search_products", "create_product",
                    "update_product", "delete_products", "get_category",
                    "search_categories"
                ],
                "description": "Catalog service action to perform"
            },
            "product_id": {
                "type": "string",
                "description": "Product id, required for 'get_product'"
            },
            "product_ids": {
                "type": "array",
                "items": { "type": "string" },
                "description": "Product ids, required for 'delete_products'"
            },
            "category_id": {
                "type": "string",
                "description": "Category id; required for 'get_category', optional filter for 'search_products'"
            },
            "catalog_id": {
                "type": "string",
                "description": "Catalog filter for product and category searches"
            },
            "keyword": {
                "type": "string",
                "description": "Free-text filter for 'search_products'"
            },
            "response_group": {
                "type": "string",
                "description": "How much of the product graph to load, e.g. 'ItemInfo' or 'Full'"
            },
            "product": {
                "type": "object",
                "description": "Product payload for 'create_product'/'update_product'; fields follow the service contract",
                "properties": {
                    "id": { "type": "string" },
                    "name": { "type": "string" },
                    "sku": { "type": "string" },
                    "categoryId": { "type": "string" },
                    "description": { "type": "string" },
                    "vendor": { "type": "string" },
                    "status": {
                        "type": "string",
                        "enum": ["Active", "Draft", "Archived"]
                    },
                    "variants": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "id": { "type": "string" },
                                "sku": { "type": "string" },
                                "price": { "type": "string" },
                                "barcode": { "type": "string" }
                            },
                            "required": ["sku", "price"]
                        }
                    }
                },
                "required": ["id", "name"]
            },
            "skip": paging["skip"],
            "take": paging["take"]
        },
        "required": ["action"],
        "additionalProperties": false
    })
}

/// Schema for the storegate_inventory tool
pub fn inventory_schema() -> Value {
    let paging = paging_properties();
    json!({
        "type": "object",
        "properties": {
            "action": {
                "type": "string",
                "enum": ["get_stock", "search_stocks", "update_stock", "list_fulfillment_centers"],
                "description": "Inventory service action to perform"
            },
            "product_id": {
                "type": "string",
                "description": "Product id, required for 'get_stock'"
            },
            "product_ids": {
                "type": "array",
                "items": { "type": "string" },
                "description": "Product filter for 'search_stocks'"
            },
            "fulfillment_center_id": {
                "type": "string",
                "description": "Restricts stock lookups to one fulfillment center"
            },
            "stock": {
                "type": "object",
                "description": "Stock payload for 'update_stock'; fields follow the service contract",
                "properties": {
                    "productId": { "type": "string" },
                    "fulfillmentCenterId": { "type": "string" },
                    "inStockQuantity": { "type": "integer" },
                    "reservedQuantity": { "type": "integer" },
                    "allowBackorder": { "type": "boolean" }
                },
                "required": ["productId", "fulfillmentCenterId", "inStockQuantity"]
            },
            "skip": paging["skip"],
            "take": paging["take"]
        },
        "required": ["action"],
        "additionalProperties": false
    })
}

/// Schema for the storegate_refdata tool
pub fn refdata_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "action": {
                "type": "string",
                "enum": ["currencies", "languages", "countries", "measure_units", "all"],
                "description": "Reference data list to fetch; 'all' fetches every list in parallel"
            }
        },
        "required": ["action"],
        "additionalProperties": false
    })
}

/// Schema for the storegate_reviews tool
pub fn reviews_schema() -> Value {
    let paging = paging_properties();
    json!({
        "type": "object",
        "properties": {
            "action": {
                "type": "string",
                "enum": ["search", "get", "approve", "reject", "analytics"],
                "description": "Review service action to perform"
            },
            "review_id": {
                "type": "string",
                "description": "Review id, required for 'get', 'approve' and 'reject'"
            },
            "product_id": {
                "type": "string",
                "description": "Product id; required for 'analytics', optional filter for 'search'"
            },
            "store_id": {
                "type": "string",
                "description": "Store id; restricts 'search' and 'analytics' to one storefront"
            },
            "status": {
                "type": "string",
                "enum": ["New", "Approved", "Rejected"],
                "description": "Status filter for 'search' and 'analytics'"
            },
            "reason": {
                "type": "string",
                "description": "Optional rejection reason for 'reject'"
            },
            "skip": paging["skip"],
            "take": paging["take"]
        },
        "required": ["action"],
        "additionalProperties": false
    })
}

/// Schema for the storegate_store tool
pub fn store_schema() -> Value {
    let paging = paging_properties();
    json!({
        "type": "object",
        "properties": {
            "action": {
                "type": "string",
                "enum": ["get", "search", "update", "overview"],
                "description": "Storefront service action to perform"
            },
            "store_id": {
                "type": "string",
                "description": "Store id, required for 'get' and 'overview'"
            },
            "catalog_id": {
                "type": "string",
                "description": "Overrides the catalog used for the product count of 'overview'; defaults to the store's own catalog"
            },
            "keyword": {
                "type": "string",
                "description": "Free-text filter for 'search'"
            },
            "store": {
                "type": "object",
                "description": "Store payload for 'update'; fields follow the service contract",
                "properties": {
                    "id": { "type": "string" },
                    "name": { "type": "string" },
                    "url": { "type": "string" },
                    "catalogId": { "type": "string" },
                    "defaultCurrency": { "type": "string" },
                    "defaultLanguage": { "type": "string" },
                    "state": {
                        "type": "string",
                        "enum": ["Open", "Closed", "RestrictedAccess"]
                    }
                },
                "required": ["id", "name"]
            },
            "skip": paging["skip"],
            "take": paging["take"]
        },
        "required": ["action"],
        "additionalProperties": false
    })
}

/// Schema for the storegate_telegram tool
pub fn telegram_schema() -> Value {
    let paging = paging_properties();
    json!({
        "type": "object",
        "properties": {
            "action": {
                "type": "string",
                "enum": ["bot_info", "send_message", "broadcast", "subscribers"],
                "description": "Telegram integration action to perform"
            },
            "chat_id": {
                "type": "integer",
                "description": "Chat id, required for 'send_message'"
            },
            "text": {
                "type": "string",
                "description": "Message text, required for 'send_message' and 'broadcast'"
            },
            "parse_mode": {
                "type": "string",
                "enum": ["MarkdownV2", "HTML"],
                "description": "Formatting of the message text; plain text when omitted"
            },
            "store_id": {
                "type": "string",
                "description": "Restricts 'broadcast' to subscribers of one store"
            },
            "skip": paging["skip"],
            "take": paging["take"]
        },
        "required": ["action"],
        "additionalProperties": false
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_schema_requires_action() {
        for schema in [
            customer_schema(),
            catalog_schema(),
            inventory_schema(),
            refdata_schema(),
            reviews_schema(),
            store_schema(),
            telegram_schema(),
        ] {
            assert_eq!(schema["type"], "object");
            assert_eq!(schema["required"][0], "action");
            assert!(schema["properties"]["action"]["enum"].is_array());
        }
    }
}
