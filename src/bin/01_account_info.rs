/*!
Ask the CallGear data API who we are. One `get.account` JSON-RPC request goes out over HTTP,
and we log either the parsed response or whatever went wrong. Nothing is retried.

The access token is sent in the request body (`params.access_token`), not as a header, and
is read from the environment or the command line rather than living in the source:

```
CALLGEAR_API_KEY=... cargo run --bin 01_account_info
cargo run --bin 01_account_info -- --api-key ... --log-level debug
```
*/

use clap::Parser;
use utils::{config::AccountCli, fetch_and_log_account, logging};

#[tokio::main]
async fn main() {
    let config = AccountCli::parse().config;
    logging::init(&config.log_level);

    if !config.has_api_key() {
        // We still send it; the API will tell us what it thinks of an empty token.
        tracing::warn!("No API key set (use --api-key or CALLGEAR_API_KEY)");
    }

    let endpoint = config.endpoint();
    tracing::debug!("Requesting account info from {}", endpoint);

    // Success or not, the outcome has been logged by now and there's nothing more to do.
    fetch_and_log_account(&endpoint, &config.api_key).await;
}
