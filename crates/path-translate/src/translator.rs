//! Flat ↔ structured path translation driven by a [`RuleTable`].
//!
//! Both directions walk the path left to right and extend a structural path
//! accumulator with element names only. Key values never extend it, so a
//! keyed list is recognised only when every name before it lines up with the
//! schema from the top.

use schema_tree::{EntryId, SchemaTree};
use tracing::trace;

use crate::elem::{PathElem, WILDCARD};
use crate::rules::RuleTable;
use crate::TranslateError;

/// Read-only translator; cheap to share across threads once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathTranslator {
    rules: RuleTable,
}

impl PathTranslator {
    /// Builds a translator from every keyed list in `tree`.
    pub fn new(tree: &SchemaTree) -> Result<Self, TranslateError> {
        RuleTable::from_tree(tree).map(Self::from_rules)
    }

    /// Builds a translator from an explicit set of schema entries.
    pub fn with_entries(
        tree: &SchemaTree,
        entries: impl IntoIterator<Item = EntryId>,
    ) -> Result<Self, TranslateError> {
        RuleTable::build(tree, entries).map(Self::from_rules)
    }

    pub fn from_rules(rules: RuleTable) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Converts flat segments into path elements, consuming the strings that
    /// follow a keyed list's name as its key values.
    ///
    /// # Errors
    ///
    /// [`TranslateError::InsufficientKeys`] when fewer strings remain than the
    /// matched list has keys. No partial path is returned.
    ///
    /// # Example
    ///
    /// ```
    /// use path_translate::{PathElem, PathTranslator};
    /// use schema_tree::SchemaTree;
    ///
    /// let mut tree = SchemaTree::new();
    /// let root = tree.add_root("root");
    /// tree.add_child(root, "list", Some("k1 k2")).unwrap();
    /// let translator = PathTranslator::new(&tree).unwrap();
    ///
    /// let path = translator.path_elem(&["list", "x", "y", "leaf"]).unwrap();
    /// assert_eq!(path, vec![
    ///     PathElem::with_keys("list", [("k1", "x"), ("k2", "y")]),
    ///     PathElem::new("leaf"),
    /// ]);
    /// assert!(translator.path_elem(&["list", "x"]).is_err());
    /// ```
    pub fn path_elem<S: AsRef<str>>(&self, segments: &[S]) -> Result<Vec<PathElem>, TranslateError> {
        let mut out = Vec::with_capacity(segments.len());
        let mut schema_path = String::new();
        let mut i = 0;
        while i < segments.len() {
            let name: &str = segments[i].as_ref();
            i += 1;
            schema_path.push('/');
            schema_path.push_str(name);

            let Some(key_names) = self.rules.get(&schema_path) else {
                out.push(PathElem::new(name));
                continue;
            };
            let have = segments.len() - i;
            if have < key_names.len() {
                return Err(TranslateError::InsufficientKeys {
                    have,
                    want: key_names.len(),
                    path: schema_path,
                });
            }
            let values = segments[i..i + key_names.len()].iter().map(<S as AsRef<str>>::as_ref);
            out.push(PathElem::with_keys(name, key_names.iter().map(String::as_str).zip(values)));
            i += key_names.len();
        }
        Ok(out)
    }

    /// Sets every key of each keyed-list element in `path` to [`WILDCARD`].
    ///
    /// Returns whether any element was updated. Elements that match no rule
    /// are left alone.
    ///
    /// # Errors
    ///
    /// [`TranslateError::AlreadyHasKeys`] when a matching element already
    /// carries keys. That element keeps its keys; elements before it have
    /// already been annotated.
    pub fn set_wildcard_keys(&self, path: &mut [PathElem]) -> Result<bool, TranslateError> {
        let mut schema_path = String::new();
        let mut updated = false;
        for elem in path.iter_mut() {
            schema_path.push('/');
            schema_path.push_str(&elem.name);

            let Some(key_names) = self.rules.get(&schema_path) else {
                continue;
            };
            if elem.has_keys() {
                return Err(TranslateError::AlreadyHasKeys {
                    path: schema_path,
                });
            }
            elem.keys = key_names
                .iter()
                .map(|k| (k.clone(), WILDCARD.to_string()))
                .collect();
            trace!(path = %schema_path, "wildcard keys set");
            updated = true;
        }
        Ok(updated)
    }

    /// Inverse of [`path_elem`](Self::path_elem): each name followed by its key
    /// values, in rule order for keyed lists known to the table.
    pub fn flatten(&self, path: &[PathElem]) -> Vec<String> {
        let mut out = Vec::with_capacity(path.len());
        let mut schema_path = String::new();
        for elem in path {
            schema_path.push('/');
            schema_path.push_str(&elem.name);
            out.push(elem.name.clone());

            match self.rules.get(&schema_path) {
                Some(key_names) => {
                    out.extend(key_names.iter().filter_map(|k| elem.keys.get(k).cloned()));
                    out.extend(
                        elem.keys
                            .iter()
                            .filter(|(k, _)| !key_names.contains(*k))
                            .map(|(_, v)| v.clone()),
                    );
                }
                None => out.extend(elem.keys.values().cloned()),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translator() -> PathTranslator {
        let mut tree = SchemaTree::new();
        let root = tree.add_root("root");
        let list = tree.add_child(root, "list", Some("b a")).unwrap();
        tree.add_child(list, "inner", Some("x")).unwrap();
        PathTranslator::new(&tree).unwrap()
    }

    #[test]
    fn test_key_values_do_not_extend_schema_path() {
        let t = translator();
        let path = t.path_elem(&["list", "1", "2", "inner", "9"]).unwrap();
        assert_eq!(
            path,
            vec![
                PathElem::with_keys("list", [("b", "1"), ("a", "2")]),
                PathElem::with_keys("inner", [("x", "9")]),
            ]
        );
    }

    #[test]
    fn test_zero_keys_left() {
        let t = translator();
        let err = t.path_elem(&["list"]).unwrap_err();
        assert_eq!(
            err,
            TranslateError::InsufficientKeys {
                have: 0,
                want: 2,
                path: "/list".to_string()
            }
        );
    }

    #[test]
    fn test_flatten_uses_rule_order() {
        let t = translator();
        let path = vec![
            PathElem::with_keys("list", [("a", "2"), ("b", "1")]),
            PathElem::new("leaf"),
        ];
        assert_eq!(t.flatten(&path), vec!["list", "1", "2", "leaf"]);
    }

    #[test]
    fn test_wildcard_stops_at_keyed_element() {
        let t = translator();
        let mut path = vec![
            PathElem::new("list"),
            PathElem::with_keys("inner", [("x", "5")]),
        ];
        let err = t.set_wildcard_keys(&mut path).unwrap_err();
        assert_eq!(err.to_string(), "/list/inner already has keys");
        assert_eq!(path[0], PathElem::with_keys("list", [("a", "*"), ("b", "*")]));
        assert_eq!(path[1], PathElem::with_keys("inner", [("x", "5")]));
    }
}
