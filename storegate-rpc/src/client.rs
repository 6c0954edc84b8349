//! HTTP client for calling backend RPC services.

use crate::error::{Error, Result};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, error, trace};
use url::Url;

/// Default timeout for RPC requests in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Response envelope used by all backend services.
///
/// A successful call carries `result`, a failed one carries `error`. A
/// response with neither is treated as a malformed reply.
#[derive(Debug, Deserialize)]
struct RpcEnvelope<T> {
    result: Option<T>,
    error: Option<RemoteError>,
}

/// Error body returned by a backend service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteError {
    pub code: i64,
    pub message: String,
}

/// JSON-over-HTTP RPC client for a single backend service.
///
/// Calls are `POST {base_url}/rpc/{Service}/{Method}` with a JSON body.
#[derive(Debug, Clone)]
pub struct RpcClient {
    client: Client,
    base_url: Url,
    timeout_secs: u64,
}

impl RpcClient {
    /// Creates a new RPC client for the given service base URL.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::invalid_endpoint(format!("{}: {}", base_url, e)))?;

        Ok(Self {
            client: Client::new(),
            base_url,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Sets the request timeout in seconds.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Invokes `service.method` with the given request body.
    pub async fn call<Req, Resp>(&self, service: &str, method: &str, request: &Req) -> Result<Resp>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let url = self
            .base_url
            .join(&format!("rpc/{}/{}", service, method))
            .map_err(|e| Error::invalid_endpoint(e.to_string()))?;

        debug!("Calling {} {}.{}", url, service, method);

        let request_timeout = Duration::from_secs(self.timeout_secs);
        let pending = self.client.post(url).json(request).send();

        let response = match timeout(request_timeout, pending).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                error!("RPC call {}.{} failed: {}", service, method, e);
                return Err(Error::http(format!("{}.{}: {}", service, method, e)));
            }
            Err(_) => return Err(Error::Timeout(self.timeout_secs)),
        };

        let status = response.status();
        if status != StatusCode::OK {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read error response>".to_string());
            error!(
                "RPC call {}.{} returned status {}: {}",
                service, method, status, body
            );
            return Err(Error::http(format!(
                "{}.{} returned status {}: {}",
                service, method, status, body
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::http(format!("failed to read response body: {}", e)))?;
        trace!("Response body: {}", body);

        let envelope: RpcEnvelope<Resp> = serde_json::from_str(&body)?;
        match (envelope.result, envelope.error) {
            (_, Some(remote)) => Err(Error::Remote {
                code: remote.code,
                message: remote.message,
            }),
            (Some(result), None) => Ok(result),
            (None, None) => Err(Error::http(format!(
                "{}.{} returned an envelope with neither result nor error",
                service, method
            ))),
        }
    }
}
