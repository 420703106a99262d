// Shared test helpers: scripted command channel and counting progress sink

#![allow(dead_code)]

use hall_of_shame::cf_channel::CommandChannel;
use hall_of_shame::error::ChannelError;
use hall_of_shame::models::WorkloadDescriptor;
use hall_of_shame::progress::Progress;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum Reply {
    Body(String),
    Fail,
    Hang,
}

/// Answers `curl <path>` from a fixed table; unknown paths fail.
/// Tracks how many calls are in flight at once.
#[derive(Default)]
pub struct ScriptedChannel {
    replies: HashMap<String, Reply>,
    delay: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    calls: Mutex<Vec<String>>,
}

struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl ScriptedChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn reply(mut self, path: &str, reply: Reply) -> Self {
        self.replies.insert(path.to_string(), reply);
        self
    }

    pub fn body(self, path: &str, body: impl Into<String>) -> Self {
        self.reply(path, Reply::Body(body.into()))
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandChannel for ScriptedChannel {
    async fn execute(&self, args: &[&str]) -> Result<Vec<String>, ChannelError> {
        assert_eq!(args.first(), Some(&"curl"));
        let path = args.get(1).copied().unwrap_or_default().to_string();
        self.calls.lock().unwrap().push(path.clone());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let _guard = InFlight(&self.in_flight);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match self.replies.get(&path) {
            Some(Reply::Body(b)) => Ok(b.lines().map(str::to_owned).collect()),
            Some(Reply::Hang) => std::future::pending().await,
            Some(Reply::Fail) | None => Err(ChannelError::Exit {
                binary: "cf".into(),
                status: Some(1),
                stderr: format!("FAILED: {path}"),
            }),
        }
    }
}

#[derive(Default)]
pub struct CountingProgress {
    pub total: AtomicU64,
    pub increments: AtomicU64,
    pub finished: Mutex<Option<String>>,
}

impl Progress for CountingProgress {
    fn start(&self, total: u64) {
        self.total.store(total, Ordering::SeqCst);
    }

    fn increment(&self) {
        self.increments.fetch_add(1, Ordering::SeqCst);
    }

    fn finish(&self, message: &str) {
        *self.finished.lock().unwrap() = Some(message.to_string());
    }
}

pub fn workload(guid: &str, name: &str) -> WorkloadDescriptor {
    WorkloadDescriptor {
        guid: guid.into(),
        name: name.into(),
        space_guid: format!("space-{name}"),
        instances: 1,
    }
}

/// `/v2/apps` page body, pretty-printed across lines like `cf curl` output.
pub fn apps_page(apps: &[(&str, &str, u32)], next_url: Option<&str>) -> String {
    let resources: Vec<serde_json::Value> = apps
        .iter()
        .map(|(guid, name, instances)| {
            serde_json::json!({
                "metadata": {"guid": guid, "url": format!("/v2/apps/{guid}")},
                "entity": {"name": name, "instances": instances, "space_guid": format!("space-{name}")}
            })
        })
        .collect();
    serde_json::to_string_pretty(&serde_json::json!({
        "total_results": apps.len(),
        "total_pages": 1,
        "next_url": next_url,
        "resources": resources,
    }))
    .unwrap()
}

/// Stats body: one entry per (state, mem_quota, mem_usage), indexed from "0".
pub fn stats_body(instances: &[(&str, u64, u64)]) -> String {
    let map: serde_json::Map<String, serde_json::Value> = instances
        .iter()
        .enumerate()
        .map(|(i, (state, quota, mem))| {
            (
                i.to_string(),
                serde_json::json!({
                    "state": state,
                    "stats": {"mem_quota": quota, "usage": {"mem": mem, "cpu": 0.0}}
                }),
            )
        })
        .collect();
    serde_json::to_string_pretty(&serde_json::Value::Object(map)).unwrap()
}

pub const STOPPED_APP_ERROR: &str = r#"{
  "code": 200003,
  "description": "Could not fetch stats for stopped app: batch",
  "error_code": "CF-AppStoppedStatsError"
}"#;
