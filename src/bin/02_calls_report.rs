/*!
Fetch the calls report for a period with `get.calls_report` and export it as CSV, one row per
call. Each row gets an extra `call_records_url` column linking the call's recordings in the web
app (several links are joined with `**`).

Without dates, the report covers the whole of yesterday:

```
CALLGEAR_API_KEY=... cargo run --bin 02_calls_report
cargo run --bin 02_calls_report -- \
    --date-from "2025-07-01 00:00:00" \
    --date-till "2025-07-29 05:00:00" \
    --out-dir reports
```

The file is named `Calls_Report_<from>__To__<till>.csv`.
*/

use clap::Parser;
use utils::{
    config::CallsReportCli,
    logging::{self, describe},
    reports::{get_calls_report, write_calls_csv},
};

#[tokio::main]
async fn main() {
    let cli = CallsReportCli::parse();
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
    tracing::info!("Calls report from {} to {}", range.from, range.till);

    let records = match get_calls_report(&cli.config.endpoint(), &cli.config.api_key, &range).await {
        Ok(Some(records)) => records,
        Ok(None) => {
            tracing::info!("No call data found in the response to generate a CSV file.");
            return;
        }
        Err(e) => {
            tracing::error!("Error: {}", describe(&e));
            return;
        }
    };
    tracing::debug!("Got {} call records", records.len());

    match write_calls_csv(&cli.out_dir, &range, &records) {
        Ok(path) => tracing::info!("Successfully generated CSV file: {}", path.display()),
        Err(e) => tracing::error!("Error: {}", describe(&e)),
    }
}
