//! Lookup from item identifier to corpus row

use std::collections::HashMap;

/// Maps each distinct item id to the first row where it appears
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemIndex {
    positions: HashMap<String, usize>,
}

impl ItemIndex {
    /// Build from item ids in corpus order; the first occurrence wins
    pub fn build<'a, I>(item_ids: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut positions = HashMap::new();
        for (position, id) in item_ids.into_iter().enumerate() {
            positions.entry(id.to_string()).or_insert(position);
        }
        ItemIndex { positions }
    }

    /// Row of an item, or `None` if it is not in the corpus
    pub fn resolve(&self, item_id: &str) -> Option<usize> {
        self.positions.get(item_id).copied()
    }

    pub fn contains(&self, item_id: &str) -> bool {
        self.positions.contains_key(item_id)
    }

    /// Number of distinct item ids
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
