//! Stream key redaction.

/// Truncates a stream key to its first eight characters plus an ellipsis
/// marker.
///
/// This is the only form in which a key may appear in a response body or
/// a log line.
pub fn redact_key(key: &str) -> String {
    let prefix: String = key.chars().take(8).collect();
    format!("{}...", prefix)
}
