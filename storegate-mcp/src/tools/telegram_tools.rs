//! Telegram bot tool for storegate MCP

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
use storegate_rpc::contracts::telegram::{
    BroadcastMessageRequest, ListSubscribersRequest, SendMessageRequest,
};
use tracing::debug;

/// Tool exposing the Telegram bot integration service.
pub struct TelegramTool {
    gateway: Arc<ServiceGateway>,
}

#[derive(Debug, Deserialize)]
struct TelegramToolParams {
    action: String,
    chat_id: Option<i64>,
    text: Option<String>,
    parse_mode: Option<String>,
    store_id: Option<String>,
    #[serde(default)]
    skip: u64,
    #[serde(default = "default_take")]
    take: u64,
}

impl TelegramTool {
    pub fn new(gateway: Arc<ServiceGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait::async_trait]
impl ToolHandler for TelegramTool {
    async fn handle(&self, arguments: Option<Value>) -> Result<CallToolResult> {
        let params: TelegramToolParams = match arguments {
            Some(args) => serde_json::from_value(args)
                .map_err(|e| Error::invalid_parameter(format!("Invalid parameters: {}", e)))?,
            None => {
                return Ok(error_text_response(
                    "Missing required parameters".to_string(),
                ))
            }
        };

        debug!("Telegram tool action: {}", params.action);

        let client = self.gateway.telegram();
        let result = match params.action.as_str() {
            "bot_info" => client.get_bot_info().await.map(|b| to_pretty_response(&b)),
            "send_message" => {
                if !self.gateway.writes_enabled(Domain::Telegram) {
                    return Ok(writes_disabled_response(Domain::Telegram));
                }
                let chat_id = required(params.chat_id, "chat_id", "send_message")?;
                let text = required(params.text, "text", "send_message")?;
                let request = SendMessageRequest {
                    chat_id,
                    text,
                    parse_mode: params.parse_mode,
                };
                client
                    .send_message(&request)
                    .await
                    .map(|sent| to_pretty_response(&sent))
            }
            "broadcast" => {
                if !self.gateway.writes_enabled(Domain::Telegram) {
                    return Ok(writes_disabled_response(Domain::Telegram));
                }
                let text = required(params.text, "text", "broadcast")?;
                let request = BroadcastMessageRequest {
                    text,
                    store_id: params.store_id,
                };
                client
                    .broadcast_message(&request)
                    .await
                    .map(|outcome| to_pretty_response(&outcome))
            }
            "subscribers" => {
                let request = ListSubscribersRequest {
                    skip: params.skip,
                    take: clamp_take(params.take),
                };
                client
                    .list_subscribers(&request)
                    .await
                    .map(|page| to_pretty_response(&page))
            }
            other => {
                return Ok(error_text_response(format!(
                    "Unknown action '{}'. Valid actions: bot_info, send_message, \
                     broadcast, subscribers",
                    other
                )))
            }
        };

        match result {
            Ok(response) => response,
            Err(e) => Ok(error_text_response(format!(
                "Telegram service error: {}",
                e
            ))),
        }
    }

    fn get_definition(&self) -> Tool {
        Tool {
            name: "storegate_telegram".to_string(),
            description: "Interacts with the Telegram bot integration. Actions: \
                bot_info, send_message to one chat, broadcast to subscribers \
                (optionally scoped to a store), list subscribers."
                .to_string(),
            input_schema: schema::telegram_schema(),
        }
    }
}
