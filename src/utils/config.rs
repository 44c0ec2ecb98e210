use anyhow::{bail, Context};
use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use clap::{Args, Parser};
use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "https://dataapi.callgear.com";
pub const DEFAULT_API_VERSION: &str = "2.0";

/// The format the data API expects `date_from`/`date_till` in.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Settings every binary shares. Everything can come from the environment,
/// so the API key never has to live in the source.
#[derive(Args, Debug, Clone)]
pub struct Config {
    /// Access token sent as `params.access_token`
    #[arg(long, env = "CALLGEAR_API_KEY", default_value = "", hide_env_values = true)]
    pub api_key: String,

    /// Base URL of the data API
    #[arg(long, env = "CALLGEAR_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// API version, appended to the base URL as a path segment
    #[arg(long, env = "CALLGEAR_API_VERSION", default_value = DEFAULT_API_VERSION)]
    pub api_version: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Config {
    /// The URL requests are POSTed to: base URL and version joined by one `/`.
    pub fn endpoint(&self) -> String {
        let base = self.api_url.trim_end_matches('/');
        let version = self.api_version.trim_matches('/');
        if version.is_empty() {
            return base.to_string();
        }
        format!("{}/{}", base, version)
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

/// `01_account_info` arguments.
#[derive(Parser, Debug, Clone)]
#[command(name = "01_account_info")]
#[command(about = "Ask the CallGear data API for the account behind an access token")]
pub struct AccountCli {
    #[command(flatten)]
    pub config: Config,
}

/// A reporting period. Leave both ends out to get the whole of yesterday.
#[derive(Args, Debug, Clone, Default)]
pub struct DateRangeArgs {
    /// Start of the period, "YYYY-MM-DD HH:MM:SS"
    #[arg(long, requires = "date_till")]
    pub date_from: Option<String>,

    /// End of the period, "YYYY-MM-DD HH:MM:SS"
    #[arg(long, requires = "date_from")]
    pub date_till: Option<String>,
}

/// A validated reporting period, both ends formatted with [`DATE_FORMAT`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub from: String,
    pub till: String,
}

impl DateRange {
    /// 00:00:00 to 23:59:59 of the day before `today`.
    pub fn day_before(today: NaiveDate) -> Self {
        let day = today - Duration::days(1);
        Self {
            from: format!("{} 00:00:00", day.format("%Y-%m-%d")),
            till: format!("{} 23:59:59", day.format("%Y-%m-%d")),
        }
    }
}

impl DateRangeArgs {
    pub fn resolve(&self) -> anyhow::Result<DateRange> {
        self.resolve_from(Local::now().date_naive())
    }

    fn resolve_from(&self, today: NaiveDate) -> anyhow::Result<DateRange> {
        let (from, till) = match (&self.date_from, &self.date_till) {
            (Some(from), Some(till)) => (from, till),
            (None, None) => return Ok(DateRange::day_before(today)),
            _ => bail!("--date-from and --date-till must be given together"),
        };

        let parse = |s: &str, which: &str| {
            NaiveDateTime::parse_from_str(s.trim(), DATE_FORMAT)
                .with_context(|| format!("{} {:?} isn't \"YYYY-MM-DD HH:MM:SS\"", which, s))
        };
        let start = parse(from.as_str(), "--date-from")?;
        let end = parse(till.as_str(), "--date-till")?;
        if start > end {
            bail!("--date-from {} is after --date-till {}", from, till);
        }

        Ok(DateRange {
            from: start.format(DATE_FORMAT).to_string(),
            till: end.format(DATE_FORMAT).to_string(),
        })
    }
}

/// `02_calls_report` arguments.
#[derive(Parser, Debug, Clone)]
#[command(name = "02_calls_report")]
#[command(about = "Fetch the calls report for a period and export it as CSV")]
pub struct CallsReportCli {
    #[command(flatten)]
    pub config: Config,

    #[command(flatten)]
    pub range: DateRangeArgs,

    /// Directory the CSV file is written to
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,
}

/// `03_chat_messages_report` arguments.
#[derive(Parser, Debug, Clone)]
#[command(name = "03_chat_messages_report")]
#[command(about = "Fetch the chat messages report for a period")]
pub struct ChatMessagesReportCli {
    #[command(flatten)]
    pub config: Config,

    #[command(flatten)]
    pub range: DateRangeArgs,
}
