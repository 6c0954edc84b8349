//! Customer (member) tool for storegate MCP

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
use storegate_rpc::contracts::customer::{Contact, SearchMembersRequest};
use tracing::debug;

/// Tool exposing the customer service: get, search, create, update and
/// delete members.
pub struct CustomerTool {
    gateway: Arc<ServiceGateway>,
}

#[derive(Debug, Deserialize)]
struct CustomerToolParams {
    action: String,
    member_id: Option<String>,
    member_ids: Option<Vec<String>>,
    keyword: Option<String>,
    group: Option<String>,
    contact: Option<Contact>,
    #[serde(default)]
    skip: u64,
    #[serde(default = "default_take")]
    take: u64,
}

impl CustomerTool {
    pub fn new(gateway: Arc<ServiceGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait::async_trait]
impl ToolHandler for CustomerTool {
    async fn handle(&self, arguments: Option<Value>) -> Result<CallToolResult> {
        let params: CustomerToolParams = match arguments {
            Some(args) => serde_json::from_value(args)
                .map_err(|e| Error::invalid_parameter(format!("Invalid parameters: {}", e)))?,
            None => {
                return Ok(error_text_response(
                    "Missing required parameters".to_string(),
                ))
            }
        };

        debug!("Customer tool action: {}", params.action);

        let client = self.gateway.customer();
        let result = match params.action.as_str() {
            "get" => {
                let member_id = required(params.member_id, "member_id", "get")?;
                client.get_member(&member_id).await.map(|m| to_pretty_response(&m))
            }
            "search" => {
                let request = SearchMembersRequest {
                    keyword: params.keyword,
                    group: params.group,
                    skip: params.skip,
                    take: clamp_take(params.take),
                };
                client
                    .search_members(&request)
                    .await
                    .map(|page| to_pretty_response(&page))
            }
            "create" => {
                if !self.gateway.writes_enabled(Domain::Customer) {
                    return Ok(writes_disabled_response(Domain::Customer));
                }
                let contact = required(params.contact, "contact", "create")?;
                client
                    .create_contact(contact)
                    .await
                    .map(|m| to_pretty_response(&m))
            }
            "update" => {
                if !self.gateway.writes_enabled(Domain::Customer) {
                    return Ok(writes_disabled_response(Domain::Customer));
                }
                let contact = required(params.contact, "contact", "update")?;
                if contact.id.is_none() {
                    return Err(Error::invalid_parameter(
                        "'contact.id' is required for action 'update'",
                    ));
                }
                client
                    .update_contact(contact)
                    .await
                    .map(|m| to_pretty_response(&m))
            }
            "delete" => {
                if !self.gateway.writes_enabled(Domain::Customer) {
                    return Ok(writes_disabled_response(Domain::Customer));
                }
                let member_ids = required(params.member_ids, "member_ids", "delete")?;
                if member_ids.is_empty() {
                    return Err(Error::invalid_parameter(
                        "'member_ids' must not be empty for action 'delete'",
                    ));
                }
                client
                    .delete_members(member_ids)
                    .await
                    .map(|d| to_pretty_response(&d))
            }
            other => {
                return Ok(error_text_response(format!(
                    "Unknown action '{}'. Valid actions: get, search, create, update, delete",
                    other
                )))
            }
        };

        match result {
            Ok(response) => response,
            Err(e) => Ok(error_text_response(format!("Customer service error: {}", e))),
        }
    }

    fn get_definition(&self) -> Tool {
        Tool {
            name: "storegate_customer".to_string(),
            description: "Manages customers (members) of the commerce platform. \
                Actions: get a member by id, search members by keyword or group, \
                create/update a contact, delete members by ids."
                .to_string(),
            input_schema: schema::customer_schema(),
        }
    }
}
