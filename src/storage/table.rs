//! Insertion-ordered in-memory table shared by the JSON repositories
//!
//! Settlement suggestions and analytics tie-breaks depend on the order in
//! which members and expenses were recorded, so every table remembers that
//! order and persists records in it.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::SplitbookError;

/// A record that can be stored in a [`Table`]
pub trait Keyed {
    type Key: Copy + Eq + Hash;

    fn key(&self) -> Self::Key;
}

struct Rows<K, V> {
    by_key: HashMap<K, V>,
    order: Vec<K>,
}

/// Keyed rows kept in insertion order
pub struct Table<V: Keyed> {
    rows: RwLock<Rows<V::Key, V>>,
}

impl<V: Keyed + Clone> Table<V> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Rows {
                by_key: HashMap::new(),
                order: Vec::new(),
            }),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Rows<V::Key, V>>, SplitbookError> {
        self.rows
            .read()
            .map_err(|e| SplitbookError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Rows<V::Key, V>>, SplitbookError> {
        self.rows
            .write()
            .map_err(|e| SplitbookError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Replace all rows, keeping the given order
    pub fn replace_all(&self, values: Vec<V>) -> Result<(), SplitbookError> {
        let mut rows = self.write()?;
        rows.by_key.clear();
        rows.order.clear();
        for value in values {
            let key = value.key();
            if rows.by_key.insert(key, value).is_none() {
                rows.order.push(key);
            }
        }
        Ok(())
    }

    pub fn get(&self, key: V::Key) -> Result<Option<V>, SplitbookError> {
        Ok(self.read()?.by_key.get(&key).cloned())
    }

    /// All rows in insertion order
    pub fn all(&self) -> Result<Vec<V>, SplitbookError> {
        self.filter(|_| true)
    }

    /// Rows matching a predicate, in insertion order
    pub fn filter<F>(&self, mut predicate: F) -> Result<Vec<V>, SplitbookError>
    where
        F: FnMut(&V) -> bool,
    {
        let rows = self.read()?;
        Ok(rows
            .order
            .iter()
            .filter_map(|key| rows.by_key.get(key))
            .filter(|value| predicate(value))
            .cloned()
            .collect())
    }

    /// Insert a new row at the end, or replace an existing row in place
    pub fn upsert(&self, value: V) -> Result<(), SplitbookError> {
        let mut rows = self.write()?;
        let key = value.key();
        if rows.by_key.insert(key, value).is_none() {
            rows.order.push(key);
        }
        Ok(())
    }

    /// Remove a row, returning it if it existed
    pub fn remove(&self, key: V::Key) -> Result<Option<V>, SplitbookError> {
        let mut rows = self.write()?;
        let removed = rows.by_key.remove(&key);
        if removed.is_some() {
            rows.order.retain(|k| *k != key);
        }
        Ok(removed)
    }

    /// Remove every row matching a predicate, returning the removed rows
    pub fn remove_where<F>(&self, mut predicate: F) -> Result<Vec<V>, SplitbookError>
    where
        F: FnMut(&V) -> bool,
    {
        let mut rows = self.write()?;
        let Rows { by_key, order } = &mut *rows;

        let mut removed = Vec::new();
        order.retain(|key| {
            let matches = by_key.get(key).is_some_and(|value| predicate(value));
            if matches {
                if let Some(value) = by_key.remove(key) {
                    removed.push(value);
                }
            }
            !matches
        });
        Ok(removed)
    }

    pub fn len(&self) -> Result<usize, SplitbookError> {
        Ok(self.read()?.order.len())
    }
}

impl<V: Keyed + Clone> Default for Table<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row(u32, &'static str);

    impl Keyed for Row {
        type Key = u32;

        fn key(&self) -> u32 {
            self.0
        }
    }

    fn names(rows: Vec<Row>) -> Vec<&'static str> {
        rows.into_iter().map(|r| r.1).collect()
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let table = Table::new();
        table.upsert(Row(3, "c")).unwrap();
        table.upsert(Row(1, "a")).unwrap();
        table.upsert(Row(2, "b")).unwrap();

        assert_eq!(names(table.all().unwrap()), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let table = Table::new();
        table.upsert(Row(1, "a")).unwrap();
        table.upsert(Row(2, "b")).unwrap();
        table.upsert(Row(1, "A")).unwrap();

        assert_eq!(names(table.all().unwrap()), vec!["A", "b"]);
        assert_eq!(table.len().unwrap(), 2);
    }

    #[test]
    fn test_remove_where() {
        let table = Table::new();
        table
            .replace_all(vec![Row(1, "a"), Row(2, "b"), Row(3, "c")])
            .unwrap();

        let removed = table.remove_where(|r| r.0 != 2).unwrap();
        assert_eq!(names(removed), vec!["a", "c"]);
        assert_eq!(names(table.all().unwrap()), vec!["b"]);
        assert!(table.get(1).unwrap().is_none());
    }

    #[test]
    fn test_remove() {
        let table = Table::new();
        table.upsert(Row(1, "a")).unwrap();
        assert_eq!(table.remove(1).unwrap(), Some(Row(1, "a")));
        assert_eq!(table.remove(1).unwrap(), None);
        assert_eq!(table.len().unwrap(), 0);
    }
}
