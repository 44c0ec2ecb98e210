//! Helpers shared by the example binaries in `src/bin`.

pub mod account;
pub mod config;
pub mod logging;
pub mod reports;
pub mod rpc;

pub use account::{fetch_and_log_account, get_account, AccountParams, Outcome, GET_ACCOUNT};
pub use config::{Config, DateRange};
pub use rpc::{rpc, rpc_checked, Request};
