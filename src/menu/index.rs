use super::tree::Container;
use crate::models::MenuItem;
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexEntry {
    pub path: Vec<usize>,
    pub parent_id: Option<String>,
}

impl IndexEntry {
    pub fn container(&self) -> Container {
        Container::of_parent(self.parent_id.as_deref())
    }

    /// Position among its siblings.
    pub fn position(&self) -> usize {
        self.path.last().copied().unwrap_or_default()
    }
}

/// id -> location lookup, rebuilt whenever the tree is replaced.
///
/// Drag handlers resolve nodes through this instead of reading addresses back
/// out of the DOM. On duplicate ids the first occurrence in pre-order wins.
#[derive(Clone, Debug, Default)]
pub struct MenuIndex {
    entries: HashMap<String, IndexEntry>,
}

impl MenuIndex {
    pub fn build(items: &[MenuItem]) -> Self {
        fn walk(
            items: &[MenuItem],
            parent_id: Option<&str>,
            prefix: &mut Vec<usize>,
            out: &mut HashMap<String, IndexEntry>,
        ) {
            for (i, item) in items.iter().enumerate() {
                prefix.push(i);
                out.entry(item.id.clone()).or_insert_with(|| IndexEntry {
                    path: prefix.clone(),
                    parent_id: parent_id.map(str::to_string),
                });
                walk(&item.children, Some(item.id.as_str()), prefix, out);
                prefix.pop();
            }
        }

        let mut entries = HashMap::new();
        walk(items, None, &mut vec![], &mut entries);
        Self { entries }
    }

    pub fn get(&self, id: &str) -> Option<&IndexEntry> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }
}
