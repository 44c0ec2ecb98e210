/*!
Fetch the chat messages report for a period with `get.chat_messages_report` and log it.

```
CALLGEAR_API_KEY=... cargo run --bin 03_chat_messages_report -- \
    --date-from "2025-07-01 00:00:00" \
    --date-till "2025-07-29 05:00:00"
```
*/

use clap::Parser;
use utils::{
    config::ChatMessagesReportCli,
    logging::{self, describe},
    reports::get_chat_messages_report,
};

#[tokio::main]
async fn main() {
    let cli = ChatMessagesReportCli::parse();
    logging::init(&cli.config.log_level);

    if !cli.config.has_api_key() {
        tracing::warn!("No API key set (use --api-key or CALLGEAR_API_KEY)");
    }

    let range = match cli.range.resolve() {
        Ok(range) => range,
        Err(e) => {
            tracing::error!("Error: {}", describe(&e));
            return;
        }
    };

    match get_chat_messages_report(&cli.config.endpoint(), &cli.config.api_key, &range).await {
        Ok(report) => tracing::info!("Chat Messages Report: {}", report),
        Err(e) => tracing::error!("Error: {}", describe(&e)),
    }
}
