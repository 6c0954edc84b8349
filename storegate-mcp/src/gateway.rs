//! Integration layer with the backend RPC services.

use crate::config::GatewayConfig;
use crate::error::Result;
use storegate_rpc::{
    CatalogClient, CustomerClient, InventoryClient, RefDataClient, ReviewClient, RpcClient,
    StoreClient, TelegramClient,
};
use tracing::info;

/// Tool domains with a write-permission flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    Customer,
    Catalog,
    Inventory,
    Reviews,
    Store,
    Telegram,
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Customer => "customer",
            Domain::Catalog => "catalog",
            Domain::Inventory => "inventory",
            Domain::Reviews => "reviews",
            Domain::Store => "store",
            Domain::Telegram => "telegram",
        }
    }
}

/// Holds the typed RPC clients and the permission flags for all tools.
pub struct ServiceGateway {
    config: GatewayConfig,
    customer: CustomerClient,
    catalog: CatalogClient,
    inventory: InventoryClient,
    refdata: RefDataClient,
    reviews: ReviewClient,
    store: StoreClient,
    telegram: TelegramClient,
}

impl ServiceGateway {
    /// Build clients for every backend service from the config.
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let timeout = config.request_timeout_secs;
        let client = |url: &str| -> Result<RpcClient> {
            Ok(RpcClient::new(url)?.with_timeout(timeout))
        };

        let gateway = Self {
            customer: CustomerClient::new(client(&config.endpoints.customer)?),
            catalog: CatalogClient::new(client(&config.endpoints.catalog)?),
            inventory: InventoryClient::new(client(&config.endpoints.inventory)?),
            refdata: RefDataClient::new(client(&config.endpoints.refdata)?),
            reviews: ReviewClient::new(client(&config.endpoints.reviews)?),
            store: StoreClient::new(client(&config.endpoints.store)?),
            telegram: TelegramClient::new(client(&config.endpoints.telegram)?),
            config,
        };

        info!("Service gateway initialized for 7 backend services");
        Ok(gateway)
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn customer(&self) -> &CustomerClient {
        &self.customer
    }

    pub fn catalog(&self) -> &CatalogClient {
        &self.catalog
    }

    pub fn inventory(&self) -> &InventoryClient {
        &self.inventory
    }

    pub fn refdata(&self) -> &RefDataClient {
        &self.refdata
    }

    pub fn reviews(&self) -> &ReviewClient {
        &self.reviews
    }

    pub fn store(&self) -> &StoreClient {
        &self.store
    }

    pub fn telegram(&self) -> &TelegramClient {
        &self.telegram
    }

    /// Whether mutating actions are permitted for the given domain.
    pub fn writes_enabled(&self, domain: Domain) -> bool {
        let permissions = &self.config.permissions;
        match domain {
            Domain::Customer => permissions.customer_writes,
            Domain::Catalog => permissions.catalog_writes,
            Domain::Inventory => permissions.inventory_writes,
            Domain::Reviews => permissions.review_writes,
            Domain::Store => permissions.store_writes,
            Domain::Telegram => permissions.telegram_writes,
        }
    }
}
