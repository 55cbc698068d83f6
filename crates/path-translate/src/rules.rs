//! Rule table: structural path of each keyed list → its key names.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use schema_tree::{EntryId, SchemaTree};
use tracing::{debug, trace};

use crate::TranslateError;

/// Immutable lookup from structural path (`/a/b/list`) to ordered key names.
///
/// Every stored key list is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleTable {
    rules: HashMap<String, Vec<String>>,
}

impl RuleTable {
    /// Builds the table from the given entries of `tree`.
    ///
    /// Entries without key names are skipped. Two keyed entries (or the same
    /// entry listed twice) resolving to one structural path is an error, as
    /// is an id that does not belong to `tree`.
    pub fn build(
        tree: &SchemaTree,
        entries: impl IntoIterator<Item = EntryId>,
    ) -> Result<Self, TranslateError> {
        let mut rules = HashMap::new();
        for id in entries {
            let entry = tree
                .get(id)
                .ok_or(TranslateError::UnknownEntry { id: id.0 })?;
            let keys = entry.key_names();
            if keys.is_empty() {
                continue;
            }
            let path = tree.structural_path(id);
            match rules.entry(path) {
                Entry::Occupied(occupied) => {
                    return Err(TranslateError::DuplicatePath {
                        path: occupied.key().clone(),
                    });
                }
                Entry::Vacant(vacant) => {
                    trace!(path = %vacant.key(), ?keys, "keyed list rule");
                    vacant.insert(keys);
                }
            }
        }
        debug!(rules = rules.len(), "built rule table");
        Ok(Self { rules })
    }

    /// Builds the table from every entry of `tree`.
    pub fn from_tree(tree: &SchemaTree) -> Result<Self, TranslateError> {
        Self::build(tree, tree.iter().map(|(id, _)| id))
    }

    pub fn get(&self, path: &str) -> Option<&[String]> {
        self.rules.get(path).map(Vec::as_slice)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.rules.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Paths in lexical order.
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }
}
