use crate::logging::describe;
use crate::rpc::rpc;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// The remote method that returns details of the account owning the access token.
pub const GET_ACCOUNT: &str = "get.account";

/// The `params` of a `get.account` request. The credential travels in the body,
/// not in an auth header.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AccountParams {
    pub access_token: String,
}

/// Ask the endpoint at `url` for the account info belonging to `access_token`.
pub async fn get_account(url: &str, access_token: &str) -> anyhow::Result<Value> {
    let params = AccountParams {
        access_token: access_token.to_string(),
    };
    rpc(url, GET_ACCOUNT, params).await
}

/// Where a single request ended up. Exactly one of these is produced per request,
/// and it's logged exactly once.
#[derive(Debug)]
pub enum Outcome {
    /// The response body parsed as JSON. A JSON-RPC `error` member in here
    /// still counts; it's the remote side's answer and is logged as-is.
    AccountInfo(Value),
    /// The request couldn't be sent, or what came back wasn't JSON.
    Error(anyhow::Error),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::AccountInfo(_))
    }

    /// Emit the one log line for this outcome.
    pub fn log(&self) {
        match self {
            Outcome::AccountInfo(_) => tracing::info!("{}", self),
            Outcome::Error(_) => tracing::error!("{}", self),
        }
    }
}

impl From<anyhow::Result<Value>> for Outcome {
    fn from(res: anyhow::Result<Value>) -> Self {
        match res {
            Ok(body) => Outcome::AccountInfo(body),
            Err(e) => Outcome::Error(e),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::AccountInfo(body) => write!(f, "Account Info: {}", body),
            Outcome::Error(e) => write!(f, "Error: {}", describe(e)),
        }
    }
}

/// Request the account info and log whichever way it went. Never fails; the
/// failure is the log line.
pub async fn fetch_and_log_account(url: &str, access_token: &str) -> Outcome {
    let outcome = Outcome::from(get_account(url, access_token).await);
    outcome.log();
    outcome
}
