//! Small helpers shared by the payload builders.

use serde_json::{Map, Value};

/// Insert `key` only when the string is present and non-empty.
///
/// Discord treats an empty placeholder the same as a missing one, so the
/// payloads never carry empty optional strings.
pub(crate) fn insert_non_empty(payload: &mut Map<String, Value>, key: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        payload.insert(key.to_owned(), Value::from(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_non_empty_skips_empty_and_missing() {
        let mut payload = Map::new();
        insert_non_empty(&mut payload, "a", None);
        insert_non_empty(&mut payload, "b", Some(""));
        insert_non_empty(&mut payload, "c", Some("x"));
        assert_eq!(Value::Object(payload), serde_json::json!({ "c": "x" }));
    }
}
