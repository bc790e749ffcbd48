// Copyright 2025 Cameron Swords
// SPDX-License-Identifier: Apache-2.0

use std::hash::Hash;

use indexmap::IndexMap;

use crate::types::Referent;

/// The ambient name map carried by printer chunks: referent to printed name.
pub type NameMap = PriorityMap<Referent, String>;

/// A map from key to an ordered stack of values.
///
/// `get` sees only the top of each stack, so pushing a value shadows the
/// previous binding and popping restores it. Nested scopes rely on this to
/// override names on entry and fall back automatically afterwards. Iteration
/// follows first-insertion order of the keys.
///
/// # Example
/// ```rust
/// use java_notation::PriorityMap;
///
/// let mut map = PriorityMap::new();
/// map.put("key", 1);
/// map.put("key", 2);
/// assert_eq!(map.get(&"key"), Some(&2));
/// map.remove(&"key");
/// assert_eq!(map.get(&"key"), Some(&1));
/// ```
#[derive(Debug, Clone)]
pub struct PriorityMap<K, V> {
    entries: IndexMap<K, Vec<V>>,
}

impl<K: Hash + Eq, V: PartialEq> PriorityMap<K, V> {
    pub fn new() -> PriorityMap<K, V> {
        PriorityMap {
            entries: IndexMap::new(),
        }
    }

    /// The top of `key`'s stack.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key).and_then(|stack| stack.last())
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// True when the top of any key's stack equals `value`. Shadowed values
    /// deeper in a stack do not count: only printed names are visible.
    pub fn contains_value(&self, value: &V) -> bool {
        self.values().any(|v| v == value)
    }

    /// Push `value` onto `key`'s stack, shadowing the current binding.
    pub fn put(&mut self, key: K, value: V) {
        self.entries.entry(key).or_default().push(value);
    }

    /// Pop the top of `key`'s stack, restoring the binding underneath.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let stack = self.entries.get_mut(key)?;
        let value = stack.pop();
        if stack.is_empty() {
            self.entries.shift_remove(key);
        }
        value
    }

    /// Remove every occurrence of `value` from `key`'s stack.
    pub fn remove_value(&mut self, key: &K, value: &V) {
        if let Some(stack) = self.entries.get_mut(key) {
            stack.retain(|v| v != value);
            if stack.is_empty() {
                self.entries.shift_remove(key);
            }
        }
    }

    /// Keys with at least one binding.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }

    /// Top-of-stack values, one per key.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.values().filter_map(|stack| stack.last())
    }

    /// Key plus top-of-stack value, one per key.
    pub fn entries(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries
            .iter()
            .filter_map(|(key, stack)| stack.last().map(|value| (key, value)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Hash + Eq, V: PartialEq> Default for PriorityMap<K, V> {
    fn default() -> PriorityMap<K, V> {
        PriorityMap::new()
    }
}
