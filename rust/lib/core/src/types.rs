use chrono::{SecondsFormat, Utc};

/// Random document id: a UUIDv4 without dashes.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Current UTC time, e.g. `2026-01-02T03:04:05.678Z`.
///
/// Stored timestamps all use this form so they sort as strings.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_hex() {
        let id = new_id();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(id, new_id());
    }

    #[test]
    fn timestamp_is_utc_millis() {
        let ts = now_rfc3339();
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
        assert!(ts.ends_with('Z'));
        // 2026-01-02T03:04:05.678Z
        assert_eq!(ts.len(), 24);
    }
}
