use anyhow::Context;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde_json::Value;

/// The JSON-RPC protocol version every request is tagged with.
pub const JSONRPC_VERSION: &str = "2.0";

/// Used to correlate request with response over socket connections.
/// Not needed over our single HTTP request, so it's always 1.
pub const REQUEST_ID: u64 = 1;

/// A JSON-RPC 2.0 request envelope. Fully built before anything is sent.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Request<Params> {
    pub jsonrpc: String,
    pub id: u64,
    pub method: String,
    pub params: Params,
}

impl<Params> Request<Params> {
    pub fn new(method: &str, params: Params) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: REQUEST_ID,
            method: method.to_string(),
            params,
        }
    }
}

/// Make an RPC request to some URL, handing back the whole parsed response body.
///
/// The HTTP status is not looked at, and neither is the JSON-RPC `result`/`error`
/// split: anything that arrives and parses as JSON is `Ok`. Exactly one POST is made.
pub async fn rpc<Params: Serialize>(
    url: &str,
    method: &str,
    params: Params,
) -> anyhow::Result<Value> {
    send(url, method, params, false).await
}

/// Like [`rpc`], but a non-2xx HTTP status is an error too.
pub async fn rpc_checked<Params: Serialize>(
    url: &str,
    method: &str,
    params: Params,
) -> anyhow::Result<Value> {
    send(url, method, params, true).await
}

async fn send<Params: Serialize>(
    url: &str,
    method: &str,
    params: Params,
    check_status: bool,
) -> anyhow::Result<Value> {
    let request = Request::new(method, params);
    let body = serde_json::to_string(&request).context("serializing JSON-RPC request")?;
    tracing::debug!("POST {} {}", url, body);

    let client = reqwest::Client::new();
    let mut response = client
        .post(url)
        .header(CONTENT_TYPE, "application/json")
        .body(body)
        .send()
        .await
        .with_context(|| format!("sending {} request to {}", method, url))?;

    tracing::debug!("{} responded with HTTP {}", url, response.status());

    if check_status {
        response = response
            .error_for_status()
            .with_context(|| format!("{} request to {} was rejected", method, url))?;
    }

    let body: Value = response
        .json()
        .await
        .with_context(|| format!("parsing {} response", method))?;

    Ok(body)
}
