//! Typed facades over [`RpcClient`], one per backend service.
//!
//! Each method builds the contract request and issues exactly one RPC call.

use crate::client::RpcClient;
use crate::contracts::catalog::*;
use crate::contracts::customer::*;
use crate::contracts::inventory::*;
use crate::contracts::refdata::*;
use crate::contracts::review::*;
use crate::contracts::store::*;
use crate::contracts::telegram::*;
use crate::contracts::{DeletedResult, PagedResult};
use crate::error::Result;

/// Client for the customer (member) service.
#[derive(Debug, Clone)]
pub struct CustomerClient {
    rpc: RpcClient,
}

impl CustomerClient {
    pub fn new(rpc: RpcClient) -> Self {
        Self { rpc }
    }

    pub async fn get_member(&self, member_id: &str) -> Result<Member> {
        let request = GetMemberRequest {
            member_id: member_id.to_string(),
        };
        self.rpc.call("MemberService", "GetMember", &request).await
    }

    pub async fn search_members(
        &self,
        request: &SearchMembersRequest,
    ) -> Result<PagedResult<Member>> {
        self.rpc
            .call("MemberService", "SearchMembers", request)
            .await
    }

    pub async fn create_contact(&self, contact: Contact) -> Result<Member> {
        let request = CreateContactRequest { contact };
        self.rpc
            .call("MemberService", "CreateContact", &request)
            .await
    }

    pub async fn update_contact(&self, contact: Contact) -> Result<Member> {
        let request = UpdateContactRequest { contact };
        self.rpc
            .call("MemberService", "UpdateContact", &request)
            .await
    }

    pub async fn delete_members(&self, member_ids: Vec<String>) -> Result<DeletedResult> {
        let request = DeleteMembersRequest { member_ids };
        self.rpc
            .call("MemberService", "DeleteMembers", &request)
            .await
    }
}

/// Client for the product catalog service.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    rpc: RpcClient,
}

impl CatalogClient {
    pub fn new(rpc: RpcClient) -> Self {
        Self { rpc }
    }

    pub async fn get_product(
        &self,
        product_id: &str,
        response_group: Option<String>,
    ) -> Result<Product> {
        let request = GetProductRequest {
            product_id: product_id.to_string(),
            response_group,
        };
        self.rpc.call("ProductService", "GetProduct", &request).await
    }

    pub async fn search_products(
        &self,
        request: &SearchProductsRequest,
    ) -> Result<PagedResult<Product>> {
        self.rpc
            .call("ProductService", "SearchProducts", request)
            .await
    }

    pub async fn create_product(&self, product: Product) -> Result<Product> {
        let request = CreateProductRequest { product };
        self.rpc
            .call("ProductService", "CreateProduct", &request)
            .await
    }

    pub async fn update_product(&self, product: Product) -> Result<Product> {
        let request = UpdateProductRequest { product };
        self.rpc
            .call("ProductService", "UpdateProduct", &request)
            .await
    }

    pub async fn delete_products(&self, product_ids: Vec<String>) -> Result<DeletedResult> {
        let request = DeleteProductsRequest { product_ids };
        self.rpc
            .call("ProductService", "DeleteProducts", &request)
            .await
    }

    pub async fn get_category(&self, category_id: &str) -> Result<Category> {
        let request = GetCategoryRequest {
            category_id: category_id.to_string(),
        };
        self.rpc
            .call("CategoryService", "GetCategory", &request)
            .await
    }

    pub async fn search_categories(
        &self,
        request: &SearchCategoriesRequest,
    ) -> Result<PagedResult<Category>> {
        self.rpc
            .call("CategoryService", "SearchCategories", request)
            .await
    }
}

/// Client for the inventory service.
#[derive(Debug, Clone)]
pub struct InventoryClient {
    rpc: RpcClient,
}

impl InventoryClient {
    pub fn new(rpc: RpcClient) -> Self {
        Self { rpc }
    }

    pub async fn get_stock(
        &self,
        product_id: &str,
        fulfillment_center_id: Option<String>,
    ) -> Result<Stock> {
        let request = GetStockRequest {
            product_id: product_id.to_string(),
            fulfillment_center_id,
        };
        self.rpc
            .call("InventoryService", "GetStock", &request)
            .await
    }

    pub async fn search_stocks(
        &self,
        request: &SearchStocksRequest,
    ) -> Result<PagedResult<Stock>> {
        self.rpc
            .call("InventoryService", "SearchStocks", request)
            .await
    }

    pub async fn update_stock(&self, stock: Stock) -> Result<Stock> {
        let request = UpdateStockRequest { stock };
        self.rpc
            .call("InventoryService", "UpdateStock", &request)
            .await
    }

    pub async fn list_fulfillment_centers(
        &self,
        request: &ListFulfillmentCentersRequest,
    ) -> Result<PagedResult<FulfillmentCenter>> {
        self.rpc
            .call("InventoryService", "ListFulfillmentCenters", request)
            .await
    }
}

/// Client for the read-only reference data service.
#[derive(Debug, Clone)]
pub struct RefDataClient {
    rpc: RpcClient,
}

impl RefDataClient {
    pub fn new(rpc: RpcClient) -> Self {
        Self { rpc }
    }

    pub async fn list_currencies(&self) -> Result<Vec<Currency>> {
        self.rpc
            .call("ReferenceDataService", "ListCurrencies", &ListRequest {})
            .await
    }

    pub async fn list_languages(&self) -> Result<Vec<Language>> {
        self.rpc
            .call("ReferenceDataService", "ListLanguages", &ListRequest {})
            .await
    }

    pub async fn list_countries(&self) -> Result<Vec<Country>> {
        self.rpc
            .call("ReferenceDataService", "ListCountries", &ListRequest {})
            .await
    }

    pub async fn list_measure_units(&self) -> Result<Vec<MeasureUnit>> {
        self.rpc
            .call("ReferenceDataService", "ListMeasureUnits", &ListRequest {})
            .await
    }
}

/// Client for the product review service.
#[derive(Debug, Clone)]
pub struct ReviewClient {
    rpc: RpcClient,
}

impl ReviewClient {
    pub fn new(rpc: RpcClient) -> Self {
        Self { rpc }
    }

    pub async fn search_reviews(
        &self,
        request: &SearchReviewsRequest,
    ) -> Result<PagedResult<Review>> {
        self.rpc
            .call("ReviewService", "SearchReviews", request)
            .await
    }

    pub async fn get_review(&self, review_id: &str) -> Result<Review> {
        let request = GetReviewRequest {
            review_id: review_id.to_string(),
        };
        self.rpc.call("ReviewService", "GetReview", &request).await
    }

    pub async fn approve_review(&self, review_id: &str) -> Result<Review> {
        let request = ApproveReviewRequest {
            review_id: review_id.to_string(),
        };
        self.rpc
            .call("ReviewService", "ApproveReview", &request)
            .await
    }

    pub async fn reject_review(&self, review_id: &str, reason: Option<String>) -> Result<Review> {
        let request = RejectReviewRequest {
            review_id: review_id.to_string(),
            reason,
        };
        self.rpc
            .call("ReviewService", "RejectReview", &request)
            .await
    }
}

/// Client for the storefront service.
#[derive(Debug, Clone)]
pub struct StoreClient {
    rpc: RpcClient,
}

impl StoreClient {
    pub fn new(rpc: RpcClient) -> Self {
        Self { rpc }
    }

    pub async fn get_store(&self, store_id: &str) -> Result<Store> {
        let request = GetStoreRequest {
            store_id: store_id.to_string(),
        };
        self.rpc.call("StoreService", "GetStore", &request).await
    }

    pub async fn search_stores(&self, request: &SearchStoresRequest) -> Result<PagedResult<Store>> {
        self.rpc
            .call("StoreService", "SearchStores", request)
            .await
    }

    pub async fn update_store(&self, store: Store) -> Result<Store> {
        let request = UpdateStoreRequest { store };
        self.rpc.call("StoreService", "UpdateStore", &request).await
    }
}

/// Client for the Telegram bot integration service.
#[derive(Debug, Clone)]
pub struct TelegramClient {
    rpc: RpcClient,
}

impl TelegramClient {
    pub fn new(rpc: RpcClient) -> Self {
        Self { rpc }
    }

    pub async fn get_bot_info(&self) -> Result<BotInfo> {
        self.rpc
            .call("TelegramService", "GetBotInfo", &GetBotInfoRequest {})
            .await
    }

    pub async fn send_message(&self, request: &SendMessageRequest) -> Result<SentMessage> {
        self.rpc
            .call("TelegramService", "SendMessage", request)
            .await
    }

    pub async fn broadcast_message(
        &self,
        request: &BroadcastMessageRequest,
    ) -> Result<BroadcastResult> {
        self.rpc
            .call("TelegramService", "BroadcastMessage", request)
            .await
    }

    pub async fn list_subscribers(
        &self,
        request: &ListSubscribersRequest,
    ) -> Result<PagedResult<Subscriber>> {
        self.rpc
            .call("TelegramService", "ListSubscribers", request)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_customer_client_wire_shape() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/rpc/MemberService/SearchMembers")
            .match_body(mockito::Matcher::Json(json!({
                "keyword": "smith",
                "skip": 0,
                "take": 20
            })))
            .with_status(200)
            .with_body(
                r#"{"result": {"items": [{"id": "m-1", "memberType": "Contact", "name": "Jane Smith"}], "totalCount": 1}}"#,
            )
            .create_async()
            .await;

        let client = CustomerClient::new(RpcClient::new(&server.url()).unwrap());
        let page = client
            .search_members(&SearchMembersRequest {
                keyword: Some("smith".to_string()),
                group: None,
                skip: 0,
                take: 20,
            })
            .await
            .unwrap();

        assert_eq!(page.total_count, 1);
        assert_eq!(page.items[0].name, "Jane Smith");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_refdata_client_lists_currencies() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/rpc/ReferenceDataService/ListCurrencies")
            .with_status(200)
            .with_body(r#"{"result": [{"code": "USD", "name": "US Dollar", "symbol": "$"}]}"#)
            .create_async()
            .await;

        let client = RefDataClient::new(RpcClient::new(&server.url()).unwrap());
        let currencies = client.list_currencies().await.unwrap();
        assert_eq!(currencies.len(), 1);
        assert_eq!(currencies[0].code, "USD");
    }

    #[tokio::test]
    async fn test_telegram_client_sends_message() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/rpc/TelegramService/SendMessage")
            .match_body(mockito::Matcher::Json(json!({
                "chatId": 42,
                "text": "order shipped"
            })))
            .with_status(200)
            .with_body(r#"{"result": {"messageId": 7, "chatId": 42}}"#)
            .create_async()
            .await;

        let client = TelegramClient::new(RpcClient::new(&server.url()).unwrap());
        let sent = client
            .send_message(&SendMessageRequest {
                chat_id: 42,
                text: "order shipped".to_string(),
                parse_mode: None,
            })
            .await
            .unwrap();

        assert_eq!(sent.message_id, 7);
        mock.assert_async().await;
    }
}
