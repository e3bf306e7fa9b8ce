// ABOUTME: Security header table injected into every response at the edge.
// ABOUTME: Built from a fixed base table minus a removal set, then serialized.

use serde_json::{Map, Value};

/// Headers added to responses unless the origin already set them.
pub const DEFAULT_SECURITY_HEADERS: [(&str, &str); 4] = [
    ("x-frame-options", "SAMEORIGIN"),
    ("x-content-type-options", "nosniff"),
    ("x-xss-protection", "1; mode=block"),
    ("strict-transport-security", "max-age=63072000"),
];

/// An ordered set of header name/value pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityHeaders {
    headers: Vec<(&'static str, &'static str)>,
}

impl SecurityHeaders {
    /// The default table without the headers named in `removed`.
    pub fn without(removed: &[&str]) -> Self {
        Self {
            headers: DEFAULT_SECURITY_HEADERS
                .iter()
                .filter(|(name, _)| !removed.contains(name))
                .copied()
                .collect(),
        }
    }

    /// Headers for a site, dropping `x-frame-options` when iframes are allowed.
    pub fn for_site(allow_iframe: bool) -> Self {
        if allow_iframe {
            Self::without(&["x-frame-options"])
        } else {
            Self::without(&[])
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Serialize in the edge runtime's header shape: `{"name": {"value": "..."}}`.
    pub fn to_object_literal(&self) -> String {
        let object: Map<String, Value> = self
            .headers
            .iter()
            .map(|(name, value)| {
                let mut entry = Map::new();
                entry.insert("value".to_string(), Value::from(*value));
                (name.to_string(), Value::Object(entry))
            })
            .collect();
        Value::Object(object).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_include_frame_options() {
        let headers = SecurityHeaders::for_site(false);
        assert_eq!(headers.len(), 4);
        assert_eq!(headers.get("x-frame-options"), Some("SAMEORIGIN"));
    }

    #[test]
    fn allow_iframe_removes_frame_options_only() {
        let headers = SecurityHeaders::for_site(true);
        assert_eq!(headers.len(), 3);
        assert!(!headers.contains("x-frame-options"));
        assert_eq!(headers.get("x-content-type-options"), Some("nosniff"));
    }

    #[test]
    fn removal_does_not_touch_the_base_table() {
        let _ = SecurityHeaders::without(&["x-xss-protection"]);
        assert_eq!(DEFAULT_SECURITY_HEADERS.len(), 4);
        assert!(SecurityHeaders::for_site(false).contains("x-xss-protection"));
    }

    #[test]
    fn object_literal_is_valid_json_in_edge_shape() {
        let literal = SecurityHeaders::for_site(false).to_object_literal();
        let parsed: Value = serde_json::from_str(&literal).unwrap();
        assert_eq!(
            parsed["strict-transport-security"]["value"],
            "max-age=63072000"
        );
        assert_eq!(parsed["x-xss-protection"]["value"], "1; mode=block");
    }
}
