//! Reference data tool for storegate MCP

use super::schema;
use super::{error_text_response, to_pretty_response, ToolHandler};
use crate::error::{Error, Result};
use crate::gateway::ServiceGateway;
use crate::mcp::protocol::{CallToolResult, Tool};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use storegate_rpc::contracts::refdata::{Country, Currency, Language, MeasureUnit};
use tracing::debug;

/// Tool exposing the read-only reference data service.
pub struct RefDataTool {
    gateway: Arc<ServiceGateway>,
}

#[derive(Debug, Deserialize)]
struct RefDataToolParams {
    action: String,
}

/// Combined response for the `all` action.
#[derive(Debug, Serialize)]
struct AllReferenceData {
    currencies: Vec<Currency>,
    languages: Vec<Language>,
    countries: Vec<Country>,
    measure_units: Vec<MeasureUnit>,
}

impl RefDataTool {
    pub fn new(gateway: Arc<ServiceGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait::async_trait]
impl ToolHandler for RefDataTool {
    async fn handle(&self, arguments: Option<Value>) -> Result<CallToolResult> {
        let params: RefDataToolParams = match arguments {
            Some(args) => serde_json::from_value(args)
                .map_err(|e| Error::invalid_parameter(format!("Invalid parameters: {}", e)))?,
            None => {
                return Ok(error_text_response(
                    "Missing required parameters".to_string(),
                ))
            }
        };

        debug!("Reference data tool action: {}", params.action);

        let client = self.gateway.refdata();
        let result = match params.action.as_str() {
            "currencies" => client
                .list_currencies()
                .await
                .map(|items| to_pretty_response(&items)),
            "languages" => client
                .list_languages()
                .await
                .map(|items| to_pretty_response(&items)),
            "countries" => client
                .list_countries()
                .await
                .map(|items| to_pretty_response(&items)),
            "measure_units" => client
                .list_measure_units()
                .await
                .map(|items| to_pretty_response(&items)),
            "all" => {
                // The four lists are independent, fetch them in parallel.
                let (currencies, languages, countries, measure_units) = tokio::join!(
                    client.list_currencies(),
                    client.list_languages(),
                    client.list_countries(),
                    client.list_measure_units(),
                );

                match (currencies, languages, countries, measure_units) {
                    (Ok(currencies), Ok(languages), Ok(countries), Ok(measure_units)) => {
                        Ok(to_pretty_response(&AllReferenceData {
                            currencies,
                            languages,
                            countries,
                            measure_units,
                        }))
                    }
                    (Err(e), _, _, _) | (_, Err(e), _, _) | (_, _, Err(e), _) | (_, _, _, Err(e)) => {
                        Err(e)
                    }
                }
            }
            other => {
                return Ok(error_text_response(format!(
                    "Unknown action '{}'. Valid actions: currencies, languages, \
                     countries, measure_units, all",
                    other
                )))
            }
        };

        match result {
            Ok(response) => response,
            Err(e) => Ok(error_text_response(format!(
                "Reference data service error: {}",
                e
            ))),
        }
    }

    fn get_definition(&self) -> Tool {
        Tool {
            name: "storegate_refdata".to_string(),
            description: "Lists platform reference data: currencies, languages, \
                countries and measure units. The 'all' action fetches all four \
                lists at once. Read-only."
                .to_string(),
            input_schema: schema::refdata_schema(),
        }
    }
}
