//! Structured path elements.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Key value meaning "any instance".
pub const WILDCARD: &str = "*";

/// One segment of a structured path.
///
/// Serializes as `{"name": "...", "key": {...}}`, with `key` omitted when
/// the element has no keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathElem {
    pub name: String,
    #[serde(rename = "key", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub keys: BTreeMap<String, String>,
}

impl PathElem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            keys: BTreeMap::new(),
        }
    }

    pub fn with_keys<K, V>(name: impl Into<String>, keys: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            name: name.into(),
            keys: keys.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    pub fn has_keys(&self) -> bool {
        !self.keys.is_empty()
    }
}

/// Prefixes `\` and every char in `special` with `\`.
fn escape(text: &str, special: &[char]) -> String {
    if !text.contains(|c: char| c == '\\' || special.contains(&c)) {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len() + 2);
    for c in text.chars() {
        if c == '\\' || special.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Renders a path as `/a/b[k1=v1][k2=v2]`. The empty path renders as `/`.
///
/// `\` escapes `/` and `[` in names, `=` and `]` in key names and `]` in key
/// values, so two different paths never render to the same string.
///
/// # Example
///
/// ```
/// use path_translate::{format_path, PathElem};
///
/// assert_eq!(format_path(&[]), "/");
/// let path = vec![
///     PathElem::new("a"),
///     PathElem::with_keys("list", [("k1", "x"), ("k2", "y]")]),
/// ];
/// assert_eq!(format_path(&path), r"/a/list[k1=x][k2=y\]]");
/// ```
pub fn format_path(path: &[PathElem]) -> String {
    if path.is_empty() {
        return "/".to_string();
    }
    let mut out = String::new();
    for elem in path {
        out.push('/');
        out.push_str(&escape(&elem.name, &['/', '[']));
        for (k, v) in &elem.keys {
            out.push('[');
            out.push_str(&escape(k, &['=', ']']));
            out.push('=');
            out.push_str(&escape(v, &[']']));
            out.push(']');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize_omits_empty_key() {
        let elem = PathElem::new("a");
        assert_eq!(serde_json::to_value(&elem).unwrap(), json!({"name": "a"}));

        let keyed = PathElem::with_keys("l", [("k1", "v1")]);
        assert_eq!(
            serde_json::to_value(&keyed).unwrap(),
            json!({"name": "l", "key": {"k1": "v1"}})
        );
    }

    #[test]
    fn test_deserialize_without_key() {
        let elem: PathElem = serde_json::from_value(json!({"name": "a"})).unwrap();
        assert_eq!(elem, PathElem::new("a"));
        assert!(!elem.has_keys());
    }

    #[test]
    fn test_format_path_escapes() {
        let path = vec![PathElem::with_keys("l", [("k", r"a\b")])];
        assert_eq!(format_path(&path), r"/l[k=a\\b]");

        let path = vec![PathElem::with_keys("x/y[z", [("k=1]", "v")])];
        assert_eq!(format_path(&path), r"/x\/y\[z[k\=1\]=v]");
    }

    #[test]
    fn test_format_path_keeps_distinct_paths_distinct() {
        let nested = vec![PathElem::new("a"), PathElem::new("b")];
        let slash_in_name = vec![PathElem::new("a/b")];
        assert_ne!(format_path(&nested), format_path(&slash_in_name));

        let key_with_eq = vec![PathElem::with_keys("l", [("a=b", "c")])];
        let value_with_eq = vec![PathElem::with_keys("l", [("a", "b=c")])];
        assert_ne!(format_path(&key_with_eq), format_path(&value_with_eq));

        let bracket_in_name = vec![PathElem::new("l[k=v]")];
        let keyed = vec![PathElem::with_keys("l", [("k", "v")])];
        assert_ne!(format_path(&bracket_in_name), format_path(&keyed));
    }
}
