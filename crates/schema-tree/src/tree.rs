//! Arena storage for schema entries.
//!
//! Entries never own their parent. The `parent` field is an index into the
//! same arena, and a child is always pushed after its parent, so walking
//! `parent` links terminates at a root.

use crate::SchemaError;

/// Index of an entry in a [`SchemaTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(pub u32);

impl EntryId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One node of the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaEntry {
    pub name: String,
    /// Whitespace separated key names. Present only on keyed lists.
    pub key: Option<String>,
    pub parent: Option<EntryId>,
}

impl SchemaEntry {
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Key names in declaration order. Empty for entries that are not keyed lists.
    pub fn key_names(&self) -> Vec<String> {
        match &self.key {
            Some(spec) => spec.split_whitespace().map(str::to_string).collect(),
            None => Vec::new(),
        }
    }

    pub fn is_keyed(&self) -> bool {
        self.key
            .as_deref()
            .is_some_and(|spec| spec.split_whitespace().next().is_some())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaTree {
    entries: Vec<SchemaEntry>,
}

impl SchemaTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Adds a root entry. Its name never appears in structural paths.
    pub fn add_root(&mut self, name: impl Into<String>) -> EntryId {
        self.push(SchemaEntry {
            name: name.into(),
            key: None,
            parent: None,
        })
    }

    pub fn add_child(
        &mut self,
        parent: EntryId,
        name: impl Into<String>,
        key: Option<&str>,
    ) -> Result<EntryId, SchemaError> {
        if parent.index() >= self.entries.len() {
            return Err(SchemaError::UnknownParent(parent.0));
        }
        Ok(self.push(SchemaEntry {
            name: name.into(),
            key: key.map(str::to_string),
            parent: Some(parent),
        }))
    }

    fn push(&mut self, entry: SchemaEntry) -> EntryId {
        let id = EntryId(self.entries.len() as u32);
        self.entries.push(entry);
        id
    }

    /// Panics if `id` was not produced by this tree.
    pub fn entry(&self, id: EntryId) -> &SchemaEntry {
        &self.entries[id.index()]
    }

    pub fn get(&self, id: EntryId) -> Option<&SchemaEntry> {
        self.entries.get(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntryId, &SchemaEntry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| (EntryId(i as u32), e))
    }

    pub fn roots(&self) -> impl Iterator<Item = EntryId> + '_ {
        self.iter().filter(|(_, e)| e.is_root()).map(|(id, _)| id)
    }

    /// Scans the whole arena.
    pub fn children(&self, id: EntryId) -> impl Iterator<Item = EntryId> + '_ {
        self.iter()
            .filter(move |(_, e)| e.parent == Some(id))
            .map(|(child, _)| child)
    }

    /// Walks from `id` up to its root, `id` first.
    pub fn ancestors(&self, id: EntryId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: Some(id),
        }
    }

    /// `/`-joined names from just below the root down to `id`.
    ///
    /// The root's own name is excluded, so a root entry has the empty path.
    pub fn structural_path(&self, id: EntryId) -> String {
        let mut names: Vec<&str> = self
            .ancestors(id)
            .filter(|&a| !self.entry(a).is_root())
            .map(|a| self.entry(a).name.as_str())
            .collect();
        names.reverse();
        let mut out = String::new();
        for name in names {
            out.push('/');
            out.push_str(name);
        }
        out
    }

    pub fn key_names(&self, id: EntryId) -> Vec<String> {
        self.entry(id).key_names()
    }

    /// Entries declaring at least one key name, in arena order.
    pub fn keyed_entries(&self) -> impl Iterator<Item = EntryId> + '_ {
        self.iter().filter(|(_, e)| e.is_keyed()).map(|(id, _)| id)
    }
}

/// Upward iterator returned by [`SchemaTree::ancestors`].
pub struct Ancestors<'a> {
    tree: &'a SchemaTree,
    next: Option<EntryId>,
}

impl Iterator for Ancestors<'_> {
    type Item = EntryId;

    fn next(&mut self) -> Option<EntryId> {
        let curr = self.next?;
        self.next = self.tree.get(curr).and_then(|e| e.parent);
        Some(curr)
    }
}
