//! Stat event model for asynchronous access logging.

use axum::http::HeaderMap;
use serde_json::{Map, Value};

use crate::domain::entities::NewStat;

/// An in-flight stat record, handed from the redirect handler to the
/// background worker over a channel so that the response never waits on
/// the write.
///
/// # Usage Flow
///
/// 1. Created in the redirect handler from the request headers
/// 2. Queued with [`crate::domain::stat_worker::enqueue`]
/// 3. Persisted by [`crate::domain::stat_worker::run_stat_worker`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatEvent {
    pub id: String,
    pub status_code: u16,
    pub headers: String,
}

impl StatEvent {
    /// Creates an event, snapshotting `headers` as a JSON object.
    ///
    /// Repeated headers are joined with `", "`. Values that are not valid
    /// UTF-8 are stored lossily.
    pub fn new(id: impl Into<String>, status_code: u16, headers: &HeaderMap) -> Self {
        Self {
            id: id.into(),
            status_code,
            headers: serialize_headers(headers),
        }
    }

    pub fn into_new_stat(self) -> NewStat {
        NewStat {
            id: self.id,
            status_code: self.status_code,
            headers: self.headers,
        }
    }
}

fn serialize_headers(headers: &HeaderMap) -> String {
    let mut map = Map::new();

    for name in headers.keys() {
        let joined = headers
            .get_all(name)
            .iter()
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .collect::<Vec<_>>()
            .join(", ");

        map.insert(name.as_str().to_string(), Value::String(joined));
    }

    Value::Object(map).to_string()
}
