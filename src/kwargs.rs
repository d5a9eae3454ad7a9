//! Insertion-ordered keyword arguments.

use indexmap::IndexMap;

/// Keyword arguments that keep the order they were given in.
///
/// Inserting an existing key replaces its value in place, so the key keeps its
/// original position.
#[derive(Debug, Clone, PartialEq)]
pub struct Kwargs<T> {
    entries: IndexMap<String, T>,
}

impl<T> Default for Kwargs<T> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<T> Kwargs<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Kwargs::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<T>) -> Self {
        self.insert(key, value.into());
        self
    }

    /// Inserts a value, returning the one it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: T) -> Option<T> {
        self.entries.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Removes a key; later keys move up one position.
    pub fn remove(&mut self, key: &str) -> Option<T> {
        self.entries.shift_remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Clone> Kwargs<T> {
    /// Returns `self` overlaid with `other`; keys in `other` win.
    pub fn merged(&self, other: &Kwargs<T>) -> Kwargs<T> {
        let mut out = self.clone();
        out.entries
            .extend(other.entries.iter().map(|(k, v)| (k.clone(), v.clone())));
        out
    }
}

impl<T, K: Into<String>> FromIterator<(K, T)> for Kwargs<T> {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl<T> IntoIterator for Kwargs<T> {
    type Item = (String, T);
    type IntoIter = indexmap::map::IntoIter<String, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_position() {
        let mut kwargs: Kwargs<i32> = Kwargs::new().with("a", 1).with("b", 2);
        assert_eq!(kwargs.insert("a", 3), Some(1));
        assert_eq!(kwargs.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(kwargs.get("a"), Some(&3));
    }

    #[test]
    fn test_merged_prefers_other() {
        let base: Kwargs<i32> = Kwargs::new().with("a", 1).with("b", 2);
        let over: Kwargs<i32> = Kwargs::new().with("b", 5).with("c", 6);
        let merged = base.merged(&over);
        assert_eq!(merged.keys().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(merged.get("b"), Some(&5));
    }

    #[test]
    fn test_remove_keeps_remaining_order() {
        let mut kwargs: Kwargs<i32> = Kwargs::new().with("a", 1).with("b", 2).with("c", 3);
        assert_eq!(kwargs.remove("a"), Some(1));
        assert_eq!(kwargs.remove("a"), None);
        assert_eq!(kwargs.keys().collect::<Vec<_>>(), vec!["b", "c"]);
        assert!(!kwargs.contains("a"));
    }

    #[test]
    fn test_collect_and_into_iter_keep_order() {
        let kwargs: Kwargs<i32> = vec![("z", 1), ("y", 2), ("z", 3)].into_iter().collect();
        let pairs: Vec<(String, i32)> = kwargs.into_iter().collect();
        assert_eq!(pairs, vec![("z".to_string(), 3), ("y".to_string(), 2)]);
    }
}
