//! HTTP client for the Zipkin trace API.

use super::types::{RawTraceData, TraceSource};
use crate::utils::config::{DEFAULT_HTTP_TIMEOUT, TRACE_API_PATH};
use crate::utils::error::RpcError;
use log::{debug, info};
use reqwest::blocking::Client;
use reqwest::StatusCode;

/// Blocking client for `GET {base}/api/v2/trace/{id}`
pub struct ZipkinClient {
    client: Client,
    base_url: String,
}

impl ZipkinClient {
    /// Create a new client for a backend root such as `http://zipkin:9411`
    pub fn new(base_url: impl Into<String>) -> Result<Self, RpcError> {
        let client = Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(RpcError::RequestFailed)?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Use a preconfigured reqwest client
    pub fn with_http_client(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

impl TraceSource for ZipkinClient {
    fn fetch_trace(&self, trace_id: &str) -> Result<RawTraceData, RpcError> {
        let url = trace_url(&self.base_url, trace_id);

        info!("Fetching trace: {}", trace_id);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(RpcError::RequestFailed)?;

        // Only a plain 200 counts; other 2xx codes are failures too
        if response.status() != StatusCode::OK {
            return Err(RpcError::UnexpectedStatus {
                trace_id: trace_id.to_string(),
                status: response.status().as_u16(),
            });
        }

        let body: RawTraceData = response.json().map_err(RpcError::RequestFailed)?;

        if !body.is_array() {
            return Err(RpcError::InvalidResponse(format!(
                "trace {} body is not a JSON array",
                trace_id
            )));
        }

        Ok(body)
    }
}

/// Build the trace endpoint URL
pub fn trace_url(base_url: &str, trace_id: &str) -> String {
    format!(
        "{}{}/{}",
        base_url.trim_end_matches('/'),
        TRACE_API_PATH,
        trace_id
    )
}
