//! Variable values for extraction and reversion
//!
//! A [`ValueBag`] maps a key (a group name, or the empty string for
//! positional groups) to a queue of values. Extraction appends to the queues
//! in group order; reversion consumes from their fronts and leaves unused
//! values in place, so one bag can be reverted against several patterns in
//! turn.

use std::collections::{BTreeMap, VecDeque};

/// Key → queue of values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueBag {
    values: BTreeMap<String, VecDeque<String>>,
}

impl ValueBag {
    /// Create an empty bag
    pub fn new() -> Self {
        ValueBag::default()
    }

    /// Append a value to the back of `key`'s queue
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values
            .entry(key.into())
            .or_default()
            .push_back(value.into());
    }

    /// The next value for `key`, if any
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .and_then(|queue| queue.front())
            .map(String::as_str)
    }

    /// All remaining values for `key`, front first
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.values
            .get(key)
            .map(|queue| queue.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Number of values left for `key`
    pub fn remaining(&self, key: &str) -> usize {
        self.values.get(key).map_or(0, VecDeque::len)
    }

    /// Remove and return the front value for `key`
    ///
    /// A key whose queue becomes empty is removed from the bag.
    pub fn pop_front(&mut self, key: &str) -> Option<String> {
        let queue = self.values.get_mut(key)?;
        let value = queue.pop_front();
        if queue.is_empty() {
            self.values.remove(key);
        }
        value
    }

    /// Append every queue of `other` to the matching queue of this bag
    pub fn merge(&mut self, other: ValueBag) {
        for (key, queue) in other.values {
            self.values.entry(key).or_default().extend(queue);
        }
    }

    /// Keys with at least one value, in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Iterate over each key and its remaining values
    pub fn iter(&self) -> impl Iterator<Item = (&str, &VecDeque<String>)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of keys with at least one value
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no values are left
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for ValueBag
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bag = ValueBag::new();
        bag.extend(iter);
        bag
    }
}

impl<K, V> Extend<(K, V)> for ValueBag
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.add(key, value);
        }
    }
}
