//! DTOs for per-link statistics.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::domain::entities::StatRecord;

/// All stat records for one id.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub id: String,
    pub total: usize,
    pub items: Vec<StatItem>,
}

#[derive(Debug, Serialize)]
pub struct StatItem {
    pub status_code: u16,
    /// Request headers as recorded. Falls back to the raw string if the
    /// stored value is not JSON.
    pub headers: Value,
    pub recorded_at: DateTime<Utc>,
}

impl From<StatRecord> for StatItem {
    fn from(record: StatRecord) -> Self {
        let headers = serde_json::from_str(&record.headers)
            .unwrap_or_else(|_| Value::String(record.headers));

        Self {
            status_code: record.status_code,
            headers,
            recorded_at: record.recorded_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::NewStat;
    use serde_json::json;

    fn record(headers: &str) -> StatRecord {
        NewStat {
            id: "abc".to_string(),
            status_code: 200,
            headers: headers.to_string(),
        }
        .into_record(Utc::now())
    }

    #[test]
    fn test_headers_are_parsed() {
        let item = StatItem::from(record(r#"{"host":"localhost"}"#));
        assert_eq!(item.headers, json!({ "host": "localhost" }));
    }

    #[test]
    fn test_unparsable_headers_kept_as_string() {
        let item = StatItem::from(record("not json"));
        assert_eq!(item.headers, json!("not json"));
    }
}
