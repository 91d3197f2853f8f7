//! Insertion-ordered, name-keyed collections.
//!
//! Groups, repositories, users and group members are all looked up by name
//! but regenerated in the order they were first seen, so every table in the
//! data model is a `Registry`.

use std::collections::HashMap;
use std::fmt::{Debug, Formatter, Result as FmtResult};

use serde::de::Deserializer;
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};

/// Anything that is identified by its name.
pub trait Named {
    fn name(&self) -> &str;
}

/// A name-keyed table that remembers insertion order.
#[derive(Clone)]
pub struct Registry<T> {
    entries: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Registry {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Named> Registry<T> {
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
        self.index.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        match self.index.get(name) {
            Some(&i) => Some(&mut self.entries[i]),
            None => None,
        }
    }

    /// Insert `entry` unless an entry with the same name exists.
    ///
    /// Returns `false` (and drops `entry`) when the name is already taken.
    pub fn insert(&mut self, entry: T) -> bool {
        if self.index.contains_key(entry.name()) {
            return false;
        }
        self.index
            .insert(entry.name().to_string(), self.entries.len());
        self.entries.push(entry);
        true
    }

    /// Return the entry called `name`, creating it with `make` first if needed.
    pub fn get_or_insert_with<F>(&mut self, name: &str, make: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        let i = match self.index.get(name) {
            Some(&i) => i,
            None => {
                let i = self.entries.len();
                self.entries.push(make());
                self.index.insert(name.to_string(), i);
                i
            }
        };
        &mut self.entries[i]
    }

    /// Remove the entry called `name`, keeping the order of the rest.
    pub fn remove(&mut self, name: &str) -> Option<T> {
        let i = self.index.remove(name)?;
        let removed = self.entries.remove(i);
        for slot in self.index.values_mut() {
            if *slot > i {
                *slot -= 1;
            }
        }
        Some(removed)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.entries.iter_mut()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(Named::name)
    }
}

impl<T: PartialEq> PartialEq for Registry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<T: Eq> Eq for Registry<T> {}

impl<T: Debug> Debug for Registry<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_list().entries(self.entries.iter()).finish()
    }
}

impl<'a, T: Named> IntoIterator for &'a Registry<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Named> FromIterator<T> for Registry<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut registry = Registry::new();
        for entry in iter {
            registry.insert(entry);
        }
        registry
    }
}

impl<T: Serialize> Serialize for Registry<T> {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = ser.serialize_seq(Some(self.entries.len()))?;
        for entry in &self.entries {
            seq.serialize_element(entry)?;
        }
        seq.end()
    }
}

impl<'de, T: Named + Deserialize<'de>> Deserialize<'de> for Registry<T> {
    fn deserialize<D>(de: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = Vec::<T>::deserialize(de)?;
        Ok(entries.into_iter().collect())
    }
}
