//! Schema trees for keyed-list path translation.
//!
//! A schema is a forest of named entries. Each entry points at its parent by
//! arena index, and entries describing a keyed list carry a whitespace
//! separated key specification (`"k1 k2 k3"`).
//!
//! # Example
//!
//! ```
//! use schema_tree::SchemaTree;
//!
//! let mut tree = SchemaTree::new();
//! let root = tree.add_root("root");
//! let a = tree.add_child(root, "a", None).unwrap();
//! let list = tree.add_child(a, "list", Some("k1 k2")).unwrap();
//!
//! assert_eq!(tree.structural_path(list), "/a/list");
//! assert_eq!(tree.key_names(list), vec!["k1", "k2"]);
//! assert_eq!(tree.structural_path(root), "");
//! ```

use thiserror::Error;

pub mod load;
pub mod tree;

pub use load::SchemaNodeDef;
pub use tree::{Ancestors, EntryId, SchemaEntry, SchemaTree};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("unknown parent entry #{0}")]
    UnknownParent(u32),
    #[error("entry under {parent} has an empty name")]
    EmptyName { parent: String },
    #[error("invalid schema document: {0}")]
    Json(String),
}

impl From<serde_json::Error> for SchemaError {
    fn from(e: serde_json::Error) -> Self {
        SchemaError::Json(e.to_string())
    }
}
