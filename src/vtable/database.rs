// Mon Oct 19 2026 - Alex

use crate::vtable::slot::slot_width;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// `[absolute_index, name, is_destructor]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotEntry(pub usize, pub String, pub bool);

impl SlotEntry {
    pub fn new(index: usize, name: &str, is_destructor: bool) -> Self {
        Self(index, name.to_string(), is_destructor)
    }

    pub fn index(&self) -> usize {
        self.0
    }

    pub fn name(&self) -> &str {
        &self.1
    }

    pub fn is_destructor(&self) -> bool {
        self.2
    }

    pub fn width(&self) -> usize {
        slot_width(self.2)
    }

    pub fn covers(&self, index: usize) -> bool {
        index >= self.0 && index < self.0 + self.width()
    }
}

impl fmt::Display for SlotEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_destructor() {
            write!(f, "[{}-{}] {}", self.0, self.0 + self.width() - 1, self.1)
        } else {
            write!(f, "[{}] {}", self.0, self.1)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRecord {
    pub parent: Option<String>,
    pub base_index: usize,
    pub own_count: usize,
    pub total_slots: usize,
    pub functions: Vec<SlotEntry>,
}

/// A slot found by a lookup, with the class that introduced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotLookup<'a> {
    pub class_name: &'a str,
    pub entry: &'a SlotEntry,
}

/// Name to vtable index database for one engine version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VTableDatabase {
    #[serde(rename = "ue_version")]
    pub version: String,
    pub generator: String,
    pub classes: IndexMap<String, ClassRecord>,
}

impl VTableDatabase {
    pub fn new(version: &str, generator: &str) -> Self {
        Self {
            version: version.to_string(),
            generator: generator.to_string(),
            classes: IndexMap::new(),
        }
    }

    pub fn get(&self, class_name: &str) -> Option<&ClassRecord> {
        self.classes.get(class_name)
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn function_count(&self) -> usize {
        self.classes.values().map(|c| c.functions.len()).sum()
    }

    /// The class itself followed by its recorded ancestors, nearest first
    pub fn lineage(&self, class_name: &str) -> Vec<(&str, &ClassRecord)> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut current = self.classes.get_key_value(class_name);

        while let Some((name, record)) = current {
            if !seen.insert(name.as_str()) {
                break;
            }
            chain.push((name.as_str(), record));
            current = record
                .parent
                .as_deref()
                .and_then(|parent| self.classes.get_key_value(parent));
        }

        chain
    }

    /// Function occupying absolute slot `index` in `class_name`'s vtable.
    /// Both entries of a destructor resolve to the destructor.
    pub fn slot_name(&self, class_name: &str, index: usize) -> Option<SlotLookup<'_>> {
        self.lineage(class_name).into_iter().find_map(|(owner, record)| {
            record
                .functions
                .iter()
                .find(|entry| entry.covers(index))
                .map(|entry| SlotLookup { class_name: owner, entry })
        })
    }

    /// Slot of a function visible from `class_name`, own or inherited
    pub fn find_function(&self, class_name: &str, function: &str) -> Option<SlotLookup<'_>> {
        self.lineage(class_name).into_iter().find_map(|(owner, record)| {
            record
                .functions
                .iter()
                .find(|entry| entry.name() == function)
                .map(|entry| SlotLookup { class_name: owner, entry })
        })
    }
}
