// Decode raw `cf curl` output into listing pages and instance stats.

use crate::error::FetchError;
use crate::models::{AppInstanceStat, AppSearchResource, AppSearchResults, InstanceRuntimeStat};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

/// The channel hands back output lines; the body is their concatenation without separators.
pub(crate) fn join_output(lines: &[String]) -> String {
    lines.concat()
}

/// Cloud Controller v2 error envelope, e.g. stats requested for a stopped app.
fn api_error(value: &Value) -> Option<FetchError> {
    let obj = value.as_object()?;
    let error_code = obj.get("error_code")?.as_str()?;
    Some(FetchError::Api {
        code: obj.get("code").and_then(Value::as_i64).unwrap_or(0),
        error_code: error_code.to_string(),
        description: obj
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    })
}

fn parse_value(path: &str, body: &str) -> Result<Value, FetchError> {
    let value: Value = serde_json::from_str(body).map_err(|source| FetchError::Parse {
        path: path.to_string(),
        source,
    })?;
    match api_error(&value) {
        Some(e) => Err(e),
        None => Ok(value),
    }
}

#[derive(Deserialize)]
struct RawAppPage {
    next_url: Option<String>,
    resources: Option<Vec<Value>>,
}

/// Parse one `/v2/apps` page. Missing or `null` fields become zero values; a resource that
/// still fails to decode is logged and left out so the rest of the page survives.
pub(crate) fn parse_app_page(path: &str, body: &str) -> Result<AppSearchResults, FetchError> {
    let value = parse_value(path, body)?;
    let raw: RawAppPage = serde_json::from_value(value).map_err(|source| FetchError::Parse {
        path: path.to_string(),
        source,
    })?;

    let mut page = AppSearchResults {
        next_url: raw.next_url,
        ..AppSearchResults::default()
    };
    for (index, resource) in raw.resources.unwrap_or_default().into_iter().enumerate() {
        match serde_json::from_value::<AppSearchResource>(resource) {
            Ok(r) => page.resources.push(r),
            Err(e) => {
                warn!(error = %e, path = %path, index, "skipping undecodable app resource");
                page.skipped += 1;
            }
        }
    }
    Ok(page)
}

/// Parse `/v2/apps/{guid}/stats` into instance index -> runtime stat.
pub(crate) fn parse_stats(
    path: &str,
    body: &str,
) -> Result<BTreeMap<String, InstanceRuntimeStat>, FetchError> {
    let value = parse_value(path, body)?;
    let raw: BTreeMap<String, AppInstanceStat> =
        serde_json::from_value(value).map_err(|source| FetchError::Parse {
            path: path.to_string(),
            source,
        })?;
    Ok(raw
        .iter()
        .map(|(index, stat)| (index.clone(), InstanceRuntimeStat::from(stat)))
        .collect())
}
