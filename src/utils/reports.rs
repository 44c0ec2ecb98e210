//! Period reports: calls and chat messages between two dates.
//!
//! Unlike `get.account`, these treat a non-2xx HTTP status as a failure.

use crate::config::DateRange;
use crate::rpc::rpc_checked;
use anyhow::Context;
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

pub const GET_CALLS_REPORT: &str = "get.calls_report";
pub const GET_CHAT_MESSAGES_REPORT: &str = "get.chat_messages_report";

/// Where call recordings can be listened to in the web app.
pub const CALL_RECORDS_BASE_URL: &str = "https://app.callgear.ae/system/media/talk";

/// Column added to every calls report record, holding its recording links.
pub const CALL_RECORDS_URL_FIELD: &str = "call_records_url";

/// Separator between recording links in [`CALL_RECORDS_URL_FIELD`].
pub const CALL_RECORDS_URL_SEPARATOR: &str = "**";

/// The `params` of a report request.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ReportParams {
    pub access_token: String,
    pub date_from: String,
    pub date_till: String,
}

impl ReportParams {
    pub fn new(access_token: &str, range: &DateRange) -> Self {
        Self {
            access_token: access_token.to_string(),
            date_from: range.from.clone(),
            date_till: range.till.clone(),
        }
    }
}

/// One row of the calls report, fields in the order the API sent them.
pub type CallRecord = Map<String, Value>;

/// Fetch the calls report for `range`. `Ok(None)` means the API answered but had
/// no call data for the period; every returned record has [`CALL_RECORDS_URL_FIELD`] set.
pub async fn get_calls_report(
    url: &str,
    access_token: &str,
    range: &DateRange,
) -> anyhow::Result<Option<Vec<CallRecord>>> {
    let body = rpc_checked(url, GET_CALLS_REPORT, ReportParams::new(access_token, range)).await?;
    let mut records = match call_data(body)? {
        Some(records) => records,
        None => return Ok(None),
    };
    for record in records.iter_mut() {
        add_call_records_url(record);
    }
    Ok(Some(records))
}

/// Pull `result.data` out of a calls report response. Missing or empty data is `None`.
pub fn call_data(mut body: Value) -> anyhow::Result<Option<Vec<CallRecord>>> {
    let data = match body.pointer_mut("/result/data") {
        Some(data) => data.take(),
        None => return Ok(None),
    };
    let rows = match data {
        Value::Array(rows) if !rows.is_empty() => rows,
        Value::Array(_) | Value::Null => return Ok(None),
        other => anyhow::bail!("calls report data isn't a list: {}", other),
    };

    rows.into_iter()
        .enumerate()
        .map(|(i, row)| match row {
            Value::Object(record) => Ok(record),
            other => anyhow::bail!("calls report row {} isn't an object: {}", i, other),
        })
        .collect::<anyhow::Result<Vec<_>>>()
        .map(Some)
}

/// Link every recording of a call, or set an empty string if there's nothing to link.
pub fn add_call_records_url(record: &mut CallRecord) {
    let links = call_records_links(record);
    record.insert(
        CALL_RECORDS_URL_FIELD.to_string(),
        Value::String(links.join(CALL_RECORDS_URL_SEPARATOR)),
    );
}

fn call_records_links(record: &CallRecord) -> Vec<String> {
    let communication_id = match record.get("communication_id").and_then(id_text) {
        Some(id) => id,
        None => return Vec::new(),
    };
    let rec_ids = match record.get("call_records") {
        Some(Value::Array(ids)) => ids,
        _ => return Vec::new(),
    };

    rec_ids
        .iter()
        .filter_map(id_text)
        .map(|rec_id| format!("{}/{}/{}/", CALL_RECORDS_BASE_URL, communication_id, rec_id))
        .collect()
}

/// An id as it goes into a URL. Null, zero and empty ids don't count.
fn id_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

/// `Calls_Report_<from>__To__<till>.csv`
pub fn calls_report_file_name(range: &DateRange) -> String {
    format!("Calls_Report_{}__To__{}.csv", range.from, range.till)
}

/// Write the records as CSV into `dir`, returning the file's path.
///
/// The header is the first record's fields. A later record missing one of them gets
/// an empty cell; a later record with a field not in the header is an error.
pub fn write_calls_csv(
    dir: &Path,
    range: &DateRange,
    records: &[CallRecord],
) -> anyhow::Result<PathBuf> {
    let headers: Vec<&String> = match records.first() {
        Some(first) => first.keys().collect(),
        None => anyhow::bail!("no call records to write"),
    };

    let path = dir.join(calls_report_file_name(range));
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("creating {}", path.display()))?;

    writer.write_record(&headers)?;
    for (i, record) in records.iter().enumerate() {
        if let Some(extra) = record.keys().find(|key| !headers.contains(key)) {
            anyhow::bail!("call record {} has field {:?} that isn't in the header", i, extra);
        }
        let row = headers
            .iter()
            .map(|field| record.get(*field).map(cell).unwrap_or_default());
        writer.write_record(row)?;
    }
    writer
        .flush()
        .with_context(|| format!("writing {}", path.display()))?;

    Ok(path)
}

/// Strings go in as they are, null as an empty cell, anything else as JSON.
fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Fetch the chat messages report for `range`, handing back the whole response body.
pub async fn get_chat_messages_report(
    url: &str,
    access_token: &str,
    range: &DateRange,
) -> anyhow::Result<Value> {
    rpc_checked(
        url,
        GET_CHAT_MESSAGES_REPORT,
        ReportParams::new(access_token, range),
    )
    .await
}
