//! Time values used in responses.

use chrono::{DateTime, Utc};

/// A timestamp returned by Steam.
pub type ServerTime = DateTime<Utc>;

/// Converts a unix timestamp in seconds to a [`ServerTime`]. Returns `None` if the timestamp is
/// out of range.
pub fn timestamp_to_server_time(timestamp: i64) -> Option<ServerTime> {
    DateTime::from_timestamp(timestamp, 0)
}
