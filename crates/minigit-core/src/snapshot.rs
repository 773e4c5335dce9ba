//! File snapshots.
//!
//! A snapshot maps filenames to content while remembering insertion order,
//! which is the order files are displayed in and the order their contents
//! feed into a commit id. Cloning a snapshot produces a fully independent
//! copy.

use serde::{Deserialize, Serialize};

/// A single named file inside a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileEntry {
    pub name: String,
    pub content: String,
}

/// Ordered mapping of filename -> content.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    entries: Vec<FileEntry>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update or insert a file.
    ///
    /// An existing file keeps its position; a new one is appended.
    pub fn set(&mut self, name: &str, content: &str) {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => entry.content = content.to_string(),
            None => self.entries.push(FileEntry {
                name: name.to_string(),
                content: content.to_string(),
            }),
        }
    }

    /// Remove a file, preserving the order of the rest.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(idx) => {
                self.entries.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Get the content of a file.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.content.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Deep copy with no aliasing to `self`.
    pub fn copy(&self) -> Snapshot {
        self.clone()
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterate files in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &FileEntry> {
        self.entries.iter()
    }

    /// File names in insertion order.
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name.clone()).collect()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name)
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a FileEntry;
    type IntoIter = std::slice::Iter<'a, FileEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_snapshot() {
        let snap = Snapshot::new();
        assert!(snap.is_empty());
        assert_eq!(snap.count(), 0);
        assert_eq!(snap.get("foo.rs"), None);
    }

    #[test]
    fn test_set_and_lookup() {
        let mut snap = Snapshot::new();
        snap.set("main.cpp", "#include <iostream>");
        snap.set("readme.txt", "Hello");

        assert_eq!(snap.count(), 2);
        assert_eq!(snap.get("main.cpp"), Some("#include <iostream>"));
        assert!(snap.get("missing.txt").is_none());
    }

    #[test]
    fn test_set_existing_updates_in_place() {
        let mut snap = Snapshot::new();
        snap.set("a.txt", "1");
        snap.set("b.txt", "2");
        snap.set("a.txt", "3");

        assert_eq!(snap.count(), 2);
        assert_eq!(snap.get("a.txt"), Some("3"));
        assert_eq!(snap.names(), vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_remove() {
        let mut snap = Snapshot::new();
        snap.set("a.txt", "1");
        snap.set("b.txt", "2");
        snap.set("c.txt", "3");

        assert!(snap.remove("b.txt"));
        assert!(!snap.remove("b.txt"));
        assert_eq!(snap.names(), vec!["a.txt", "c.txt"]);
    }

    #[test]
    fn test_copy_unaffected_by_remove() {
        let mut snap = Snapshot::new();
        snap.set("main.cpp", "int main() {}");
        snap.set("readme.txt", "Hello");

        let copy = snap.copy();
        snap.remove("readme.txt");

        assert_eq!(snap.count(), 1);
        assert_eq!(copy.count(), 2);
    }

    #[test]
    fn test_serializes_as_ordered_list() {
        let mut snap = Snapshot::new();
        snap.set("z.txt", "last");
        snap.set("a.txt", "first");

        let json = serde_json::to_string(&snap).unwrap();
        assert_eq!(
            json,
            r#"[{"name":"z.txt","content":"last"},{"name":"a.txt","content":"first"}]"#
        );
    }

    proptest! {
        #[test]
        fn prop_copy_is_independent(
            files in proptest::collection::vec(("[a-z]{1,6}", ".*"), 0..12),
            extra in ".*",
        ) {
            let mut original = Snapshot::new();
            for (name, content) in &files {
                original.set(name, content);
            }
            let before = original.clone();

            let mut copy = original.copy();
            copy.set("extra-file", &extra);
            if let Some((name, _)) = files.first() {
                copy.remove(name);
            }
            prop_assert_eq!(&original, &before);

            let frozen = copy.clone();
            original.clear();
            prop_assert_eq!(&copy, &frozen);
        }
    }
}
