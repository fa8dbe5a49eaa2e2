//! Stat entity representing a single resolve attempt.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Status recorded when a resolve found its link.
pub const STAT_HIT: u16 = 200;

/// Status recorded when a resolve missed. Matches the status sent to the client.
pub const STAT_MISS: u16 = 404;

/// An append-only access record written for every `GET /{id}`.
///
/// `id` is whatever the client asked for and may not correspond to an
/// existing link.
#[derive(Debug, Clone, Serialize)]
pub struct StatRecord {
    pub id: String,
    pub status_code: u16,
    /// JSON object of the request headers at lookup time.
    pub headers: String,
    pub recorded_at: DateTime<Utc>,
}

/// Input data for appending a stat record.
///
/// The timestamp is assigned by the backend on append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStat {
    pub id: String,
    pub status_code: u16,
    pub headers: String,
}

impl NewStat {
    pub fn into_record(self, recorded_at: DateTime<Utc>) -> StatRecord {
        StatRecord {
            id: self.id,
            status_code: self.status_code,
            headers: self.headers,
            recorded_at,
        }
    }
}
