use chrono::{DateTime, NaiveDate, Utc};

/// Parse a client-supplied instant.
///
/// Accepts RFC 3339 (`2024-01-05T10:00:00Z`, offsets allowed), a naive
/// `YYYY-MM-DDTHH:MM[:SS]` taken as UTC, or a bare `YYYY-MM-DD` meaning
/// midnight UTC.
pub fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.contains('T') {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Utc));
        }
        let normalized = if s.len() == 16 {
            format!("{s}:00Z")
        } else {
            format!("{s}Z")
        };
        DateTime::parse_from_rfc3339(&normalized)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    } else {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
    }
}
