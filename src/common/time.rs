//! Time display utilities.
//!
//! All timestamps exchanged with the backend are Unix epoch milliseconds in
//! UTC; the client only formats them for display and never generates its
//! own (messages are stamped server-side).

use chrono::{DateTime, TimeZone, Utc};

/// Convert Unix timestamp (milliseconds) to a short "HH:MM" display form,
/// as shown next to chat messages
pub fn timestamp_to_clock_time(timestamp_millis: i64) -> String {
    to_datetime(timestamp_millis).format("%H:%M").to_string()
}

fn to_datetime(timestamp_millis: i64) -> DateTime<Utc> {
    let seconds = timestamp_millis.div_euclid(1000);
    let nanos = (timestamp_millis.rem_euclid(1000) * 1_000_000) as u32;
    // Epoch seconds derived this way are always in range for chrono
    Utc.timestamp_opt(seconds, nanos).unwrap()
}
