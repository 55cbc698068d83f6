//! Loading a [`SchemaTree`] from its nested JSON description.
//!
//! ```json
//! {"name": "root", "children": [
//!   {"name": "a", "children": [
//!     {"name": "list", "key": "k1 k2"}
//!   ]}
//! ]}
//! ```
//!
//! A document is either one root node or an array of root nodes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::tree::{EntryId, SchemaTree};
use crate::SchemaError;

/// Nested, owned form of a schema node as it appears in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaNodeDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SchemaNodeDef>,
}

impl SchemaTree {
    pub fn from_json(src: &str) -> Result<Self, SchemaError> {
        let value: Value = serde_json::from_str(src)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, SchemaError> {
        let roots = match value {
            Value::Array(_) => serde_json::from_value::<Vec<SchemaNodeDef>>(value)?,
            _ => vec![serde_json::from_value::<SchemaNodeDef>(value)?],
        };
        Self::from_defs(roots)
    }

    pub fn from_defs(roots: Vec<SchemaNodeDef>) -> Result<Self, SchemaError> {
        let mut tree = SchemaTree::new();
        for root in roots {
            let id = tree.add_root(root.name);
            let mut stack: Vec<(EntryId, SchemaNodeDef)> =
                root.children.into_iter().rev().map(|c| (id, c)).collect();
            while let Some((parent, node)) = stack.pop() {
                if node.name.is_empty() {
                    return Err(SchemaError::EmptyName {
                        parent: tree.entry(parent).name.clone(),
                    });
                }
                let child = tree.add_child(parent, node.name, node.key.as_deref())?;
                stack.extend(node.children.into_iter().rev().map(|c| (child, c)));
            }
        }
        Ok(tree)
    }

    /// Rebuilds the nested form, one definition per root in arena order.
    pub fn to_defs(&self) -> Vec<SchemaNodeDef> {
        let mut kids: Vec<Vec<EntryId>> = vec![Vec::new(); self.len()];
        for (id, entry) in self.iter() {
            if let Some(parent) = entry.parent {
                kids[parent.index()].push(id);
            }
        }
        // Children sit after their parent in the arena, so a reverse sweep
        // finishes every child before its parent is assembled.
        let mut defs: Vec<Option<SchemaNodeDef>> = vec![None; self.len()];
        for idx in (0..self.len()).rev() {
            let id = EntryId(idx as u32);
            let entry = self.entry(id);
            let children = kids[id.index()]
                .iter()
                .filter_map(|c| defs[c.index()].take())
                .collect();
            defs[id.index()] = Some(SchemaNodeDef {
                name: entry.name.clone(),
                key: entry.key.clone(),
                children,
            });
        }
        self.roots()
            .filter_map(|root| defs[root.index()].take())
            .collect()
    }

    pub fn to_value(&self) -> Value {
        // Plain structs with string fields always serialize.
        serde_json::to_value(self.to_defs()).unwrap_or(Value::Null)
    }
}
