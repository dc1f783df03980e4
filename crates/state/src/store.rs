use crate::meta::FileMeta;

/// Uploaded files keyed by filename, iterated in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MetadataStore {
    entries: Vec<FileMeta>,
}

impl MetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&FileMeta> {
        self.entries.iter().find(|m| m.name == name)
    }

    /// Replaces an existing entry in place, so its row keeps its position.
    pub fn insert(&mut self, meta: FileMeta) -> Option<FileMeta> {
        match self.position(&meta.name) {
            Some(idx) => Some(std::mem::replace(&mut self.entries[idx], meta)),
            None => {
                self.entries.push(meta);
                None
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<FileMeta> {
        let idx = self.position(name)?;
        Some(self.entries.remove(idx))
    }

    pub fn set_range(&mut self, name: &str, start_time: i64, end_time: i64) -> bool {
        let Some(idx) = self.position(name) else {
            return false;
        };
        self.entries[idx].set_range(start_time, end_time);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileMeta> {
        self.entries.iter()
    }

    /// Start and end of every item, item by item in store order.
    pub fn boundaries<'a>(&'a self, exclude: Option<&'a str>) -> impl Iterator<Item = i64> + 'a {
        self.entries
            .iter()
            .filter(move |m| !matches!(exclude, Some(name) if m.name == name))
            .flat_map(|m| [m.start_time, m.end_time])
    }

    pub fn extent(&self) -> Option<(i64, i64)> {
        let start = self.entries.iter().map(|m| m.start_time).min()?;
        let end = self.entries.iter().map(|m| m.end_time).max()?;
        Some((start, end))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|m| m.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_of(items: &[(&str, i64, i64)]) -> MetadataStore {
        let mut store = MetadataStore::new();
        for (name, start, end) in items {
            store.insert(FileMeta::new(*name, *start, *end));
        }
        store
    }

    #[test]
    fn remove_leaves_other_entries_untouched() {
        let mut store = store_of(&[("a.tc", 0, 10), ("b.mp4", 5, 20), ("c.tc", 30, 40)]);
        let before_a = store.get("a.tc").cloned();
        let before_c = store.get("c.tc").cloned();

        let removed = store.remove("b.mp4");

        assert_eq!(removed, Some(FileMeta::new("b.mp4", 5, 20)));
        assert_eq!(store.len(), 2);
        assert!(!store.contains("b.mp4"));
        assert_eq!(store.get("a.tc").cloned(), before_a);
        assert_eq!(store.get("c.tc").cloned(), before_c);
        let names: Vec<_> = store.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["a.tc", "c.tc"]);
    }

    #[test]
    fn remove_unknown_name_is_noop() {
        let mut store = store_of(&[("a.tc", 0, 10)]);
        assert_eq!(store.remove("missing"), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn insert_existing_name_overwrites_in_place() {
        let mut store = store_of(&[("a.tc", 0, 10), ("b.tc", 20, 30)]);
        let previous = store.insert(FileMeta::new("a.tc", 100, 200));
        assert_eq!(previous, Some(FileMeta::new("a.tc", 0, 10)));
        let names: Vec<_> = store.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["a.tc", "b.tc"]);
        assert_eq!(store.get("a.tc").map(|m| m.start_time), Some(100));
    }

    #[test]
    fn boundaries_skip_excluded_item() {
        let store = store_of(&[("a.tc", 0, 5_000), ("b.tc", 4_800, 9_000)]);
        let all: Vec<_> = store.boundaries(None).collect();
        assert_eq!(all, [0, 5_000, 4_800, 9_000]);
        let without_b: Vec<_> = store.boundaries(Some("b.tc")).collect();
        assert_eq!(without_b, [0, 5_000]);
    }

    #[test]
    fn extent_spans_all_items() {
        assert_eq!(MetadataStore::new().extent(), None);
        let store = store_of(&[("a.tc", 3_000, 5_000), ("b.tc", 1_000, 4_000)]);
        assert_eq!(store.extent(), Some((1_000, 5_000)));
    }
}
