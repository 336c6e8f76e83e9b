use std::hash::Hash;

use indexmap::IndexSet;

/// Deduplicating set that remembers first-seen order.
#[derive(Debug, Clone)]
pub struct ReferenceSet<T>(IndexSet<T>);

impl<T> Default for ReferenceSet<T> {
    fn default() -> Self {
        Self(IndexSet::new())
    }
}

impl<T: Eq + Hash + Clone> ReferenceSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `key` unless already present. Returns true when it was new.
    pub fn add(&mut self, key: T) -> bool {
        let (_, inserted) = self.0.insert_full(key);
        inserted
    }

    pub fn contains(&self, key: &T) -> bool {
        self.0.contains(key)
    }

    /// First-seen position of `key`.
    pub fn position(&self, key: &T) -> Option<usize> {
        self.0.get_index_of(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.0.iter().cloned().collect()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.0.into_iter().collect()
    }
}

impl ReferenceSet<String> {
    /// Adds a string identifier, ignoring blanks.
    pub fn add_id(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if id.trim().is_empty() {
            return false;
        }
        self.add(id)
    }
}

impl<T: Eq + Hash + Clone> Extend<T> for ReferenceSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl<T: Eq + Hash + Clone> FromIterator<T> for ReferenceSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_seen_order_wins() {
        let mut set = ReferenceSet::new();
        assert!(set.add("b".to_string()));
        assert!(set.add("a".to_string()));
        assert!(!set.add("b".to_string()));
        assert!(set.add("c".to_string()));

        assert_eq!(set.to_vec(), ["b", "a", "c"]);
        assert_eq!(set.position(&"a".to_string()), Some(1));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn blank_ids_are_ignored() {
        let mut set = ReferenceSet::new();
        assert!(!set.add_id(""));
        assert!(!set.add_id("  "));
        assert!(set.add_id("42"));
        assert_eq!(set.into_vec(), vec!["42".to_string()]);
    }

    #[test]
    fn collects_from_iterator() {
        let set: ReferenceSet<i64> = [3, 1, 3, 2, 1].into_iter().collect();
        assert_eq!(set.to_vec(), [3, 1, 2]);
    }
}
