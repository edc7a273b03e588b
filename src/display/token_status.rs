//! Token status display for temporal claims.
//!
//! Renders human-readable status information for the `iat` and `exp`
//! claims of an entry token.

use chrono::{DateTime, TimeDelta, Utc};
use serde_json::Value;

/// Print the temporal status of an entry's claims, evaluated against now.
pub fn display_token_status(payload: &Value) {
    for line in status_lines(payload, Utc::now()) {
        println!("{line}");
    }
}

/// Build the status lines for `payload` as seen at `now`.
///
/// - Issued at / Expires at as RFC 3339 timestamps
/// - `EXPIRED (X ago)` or `VALID (expires in X)`
pub fn status_lines(payload: &Value, now: DateTime<Utc>) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(iat) = timestamp_claim(payload, "iat") {
        lines.push(format!("Issued at:  {}", iat.to_rfc3339()));
    }

    match timestamp_claim(payload, "exp") {
        Some(exp) => {
            lines.push(format!("Expires at: {}", exp.to_rfc3339()));
            if exp <= now {
                lines.push(format!("Status:     EXPIRED ({} ago)", humanize(now - exp)));
            } else {
                lines.push(format!("Status:     VALID (expires in {})", humanize(exp - now)));
            }
        }
        None => lines.push("Status:     NO EXPIRY".to_string()),
    }

    lines
}

fn timestamp_claim(payload: &Value, claim: &str) -> Option<DateTime<Utc>> {
    payload
        .get(claim)
        .and_then(Value::as_i64)
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
}

/// Render a duration as its two most significant units, e.g. `4m 30s`.
fn humanize(delta: TimeDelta) -> String {
    let total = delta.num_seconds().abs();
    let (days, hours, minutes, seconds) = (
        total / 86_400,
        (total % 86_400) / 3_600,
        (total % 3_600) / 60,
        total % 60,
    );
    match (days, hours, minutes) {
        (0, 0, 0) => format!("{seconds}s"),
        (0, 0, _) => format!("{minutes}m {seconds}s"),
        (0, _, _) => format!("{hours}h {minutes}m"),
        _ => format!("{days}d {hours}h"),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn test_valid_entry_shows_time_remaining() {
        let payload = json!({ "iat": 1_700_000_000, "exp": 1_700_000_300 });
        let lines = status_lines(&payload, at(1_700_000_030));
        assert_eq!(lines[0], "Issued at:  2023-11-14T22:13:20+00:00");
        assert_eq!(lines[2], "Status:     VALID (expires in 4m 30s)");
    }

    #[test]
    fn test_expired_entry_shows_time_since_expiry() {
        let payload = json!({ "iat": 1_700_000_000, "exp": 1_700_000_300 });
        let lines = status_lines(&payload, at(1_700_007_500));
        assert_eq!(lines[2], "Status:     EXPIRED (2h 0m ago)");
    }

    #[test]
    fn test_missing_expiry() {
        let lines = status_lines(&json!({}), at(0));
        assert_eq!(lines, vec!["Status:     NO EXPIRY".to_string()]);
    }

    #[test]
    fn test_humanize_days() {
        assert_eq!(humanize(TimeDelta::seconds(90_061)), "1d 1h");
        assert_eq!(humanize(TimeDelta::seconds(-5)), "5s");
    }
}
