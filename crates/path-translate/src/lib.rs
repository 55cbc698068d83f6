//! Keyed-list path translation.
//!
//! A [`RuleTable`] maps the structural path of every keyed list in a schema
//! to its ordered key names. A [`PathTranslator`] uses the table to turn a
//! flat list of strings into [`PathElem`]s with their keys filled in, or to
//! put wildcard keys on an already structured path.
//!
//! # Example
//!
//! ```
//! use path_translate::{format_path, PathTranslator};
//! use schema_tree::SchemaTree;
//!
//! let schema = SchemaTree::from_json(r#"
//!     {"name": "root", "children": [
//!         {"name": "interfaces", "children": [
//!             {"name": "interface", "key": "name"}
//!         ]}
//!     ]}
//! "#).unwrap();
//! let translator = PathTranslator::new(&schema).unwrap();
//!
//! let path = translator
//!     .path_elem(&["interfaces", "interface", "eth0", "state"])
//!     .unwrap();
//! assert_eq!(format_path(&path), "/interfaces/interface[name=eth0]/state");
//! ```

use thiserror::Error;

pub mod cli;
pub mod elem;
pub mod rules;
pub mod translator;

pub use elem::{format_path, PathElem, WILDCARD};
pub use rules::RuleTable;
pub use translator::PathTranslator;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TranslateError {
    #[error("got {path} path multiple times")]
    DuplicatePath { path: String },
    #[error("got {have}, want {want} keys for {path}")]
    InsufficientKeys {
        have: usize,
        want: usize,
        path: String,
    },
    #[error("{path} already has keys")]
    AlreadyHasKeys { path: String },
    #[error("schema entry #{id} is not in the tree")]
    UnknownEntry { id: u32 },
}
