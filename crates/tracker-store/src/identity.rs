//! Record identities and timestamps
//!
//! Ids are a base36 millisecond clock followed by ten base36 random
//! characters. The clock part never goes backwards within a process, but ids
//! are not ordered: two ids from the same millisecond compare by their
//! random suffix. Uniqueness is best effort, which is enough for one editor
//! at a time.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{SecondsFormat, Utc};
use uuid::Uuid;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Width of the random suffix.
pub const RANDOM_LEN: usize = 10;

/// Shortest id `generate_id` can produce (one clock digit plus the suffix).
pub const MIN_ID_LEN: usize = RANDOM_LEN + 1;

static LAST_MILLIS: AtomicU64 = AtomicU64::new(0);

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}

fn random_suffix() -> String {
    // 36^10 fits comfortably in u64
    let modulus = 36u64.pow(RANDOM_LEN as u32);
    let (_, low) = Uuid::new_v4().as_u64_pair();
    format!("{:0>width$}", to_base36(low % modulus), width = RANDOM_LEN)
}

fn monotonic_millis() -> u64 {
    let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
    let previous = LAST_MILLIS.fetch_max(now, Ordering::SeqCst);
    previous.max(now)
}

/// Generate a new record id.
pub fn generate_id() -> String {
    format!("{}{}", to_base36(monotonic_millis()), random_suffix())
}

/// Whether `id` has the shape `generate_id` produces.
pub fn is_generated_id(id: &str) -> bool {
    id.len() >= MIN_ID_LEN
        && id
            .bytes()
            .all(|b| b.is_ascii_digit() || b.is_ascii_lowercase())
}

/// Current UTC time as ISO 8601 with milliseconds, e.g.
/// `2026-02-10T05:00:00.000Z`.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
