//! Insertion-ordered multimap used for satellite fetch results.

use std::hash::Hash;

use indexmap::IndexMap;
use indexmap::map::Entry;

/// Map from key to every value collected for it.
///
/// Keys iterate in first-insertion order; values of one key keep the order
/// in which they were added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Multimap<K: Hash + Eq, V> {
    entries: IndexMap<K, Vec<V>>,
}

impl<K: Hash + Eq, V> Default for Multimap<K, V> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<K: Hash + Eq, V> Multimap<K, V> {
    /// Create an empty multimap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` to the values of `key`.
    pub fn put(&mut self, key: K, value: V) {
        match self.entries.entry(key) {
            Entry::Occupied(mut entry) => entry.get_mut().push(value),
            Entry::Vacant(entry) => {
                entry.insert(vec![value]);
            }
        }
    }

    /// Values of `key`; empty when the key is absent.
    pub fn get(&self, key: &K) -> &[V] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Whether at least one value was added for `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys in first-insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }

    /// Number of distinct keys.
    pub fn key_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of values across all keys.
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Whether no value was added at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for Multimap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), |mut acc, (key, value)| {
            acc.put(key, value);
            acc
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn keys_keep_first_insertion_order() {
        let map: Multimap<&str, u8> = [("b", 1), ("a", 2), ("b", 3)].into_iter().collect();

        assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(map.get(&"b"), &[1, 3]);
        assert_eq!(map.len(), 3);
        assert_eq!(map.key_count(), 2);
    }

    #[rstest]
    fn put_appends_to_existing_keys() {
        let mut map: Multimap<&str, u8> = [("a", 1)].into_iter().collect();

        map.put("c", 4);
        map.put("a", 2);

        assert_eq!(map.get(&"a"), &[1, 2]);
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec!["a", "c"]);
    }

    #[rstest]
    fn absent_keys_yield_no_values() {
        let map: Multimap<&str, u8> = Multimap::new();

        assert!(map.get(&"missing").is_empty());
        assert!(!map.contains_key(&"missing"));
        assert!(map.is_empty());
    }
}
