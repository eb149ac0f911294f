// Mon Oct 19 2026 - Alex

use crate::vtable::{ClassRecord, VTableDatabase};
use itertools::Itertools;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SlotChangeKind {
    Added,
    Removed,
    Moved,
}

/// A function whose slot differs between two databases
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotChange {
    pub class_name: String,
    pub function: String,
    pub old_index: Option<usize>,
    pub new_index: Option<usize>,
    pub kind: SlotChangeKind,
}

impl SlotChange {
    pub fn delta(&self) -> i64 {
        match (self.old_index, self.new_index) {
            (Some(old), Some(new)) => new as i64 - old as i64,
            _ => 0,
        }
    }
}

impl fmt::Display for SlotChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            SlotChangeKind::Added => write!(f, "+ {}::{} @ {}", self.class_name, self.function, self.new_index.unwrap_or(0)),
            SlotChangeKind::Removed => write!(f, "- {}::{} @ {}", self.class_name, self.function, self.old_index.unwrap_or(0)),
            SlotChangeKind::Moved => write!(
                f,
                "~ {}::{} {} -> {} ({:+})",
                self.class_name,
                self.function,
                self.old_index.unwrap_or(0),
                self.new_index.unwrap_or(0),
                self.delta()
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeChange {
    pub class_name: String,
    pub old_total: usize,
    pub new_total: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatabaseDiffStats {
    pub added: usize,
    pub removed: usize,
    pub moved: usize,
    pub unchanged: usize,
}

/// Differences between two vtable databases, usually two engine versions
#[derive(Debug, Clone)]
pub struct DatabaseDiff {
    pub old_version: String,
    pub new_version: String,
    pub added_classes: Vec<String>,
    pub removed_classes: Vec<String>,
    pub size_changes: Vec<SizeChange>,
    pub changes: Vec<SlotChange>,
    pub unchanged: usize,
}

impl DatabaseDiff {
    pub fn between(old: &VTableDatabase, new: &VTableDatabase) -> Self {
        let mut diff = Self {
            old_version: old.version.clone(),
            new_version: new.version.clone(),
            added_classes: Vec::new(),
            removed_classes: Vec::new(),
            size_changes: Vec::new(),
            changes: Vec::new(),
            unchanged: 0,
        };

        for (name, old_class) in &old.classes {
            match new.get(name) {
                Some(new_class) => diff.compare_class(name, old_class, new_class),
                None => diff.removed_classes.push(name.clone()),
            }
        }
        diff.added_classes = new
            .classes
            .keys()
            .filter(|name| !old.classes.contains_key(*name))
            .cloned()
            .collect();

        diff.changes = std::mem::take(&mut diff.changes)
            .into_iter()
            .sorted_by(|a, b| {
                (&a.class_name, a.kind, &a.function).cmp(&(&b.class_name, b.kind, &b.function))
            })
            .collect();

        diff
    }

    fn compare_class(&mut self, name: &str, old: &ClassRecord, new: &ClassRecord) {
        if old.total_slots != new.total_slots {
            self.size_changes.push(SizeChange {
                class_name: name.to_string(),
                old_total: old.total_slots,
                new_total: new.total_slots,
            });
        }

        let old_slots = slot_map(old);
        let new_slots = slot_map(new);

        for (function, &old_index) in &old_slots {
            let (new_index, kind) = match new_slots.get(function) {
                Some(&new_index) if new_index == old_index => {
                    self.unchanged += 1;
                    continue;
                }
                Some(&new_index) => (Some(new_index), SlotChangeKind::Moved),
                None => (None, SlotChangeKind::Removed),
            };
            self.changes.push(SlotChange {
                class_name: name.to_string(),
                function: display_name(*function),
                old_index: Some(old_index),
                new_index,
                kind,
            });
        }

        for (function, &new_index) in &new_slots {
            if !old_slots.contains_key(function) {
                self.changes.push(SlotChange {
                    class_name: name.to_string(),
                    function: display_name(*function),
                    old_index: None,
                    new_index: Some(new_index),
                    kind: SlotChangeKind::Added,
                });
            }
        }
    }

    pub fn changes_of_kind(&self, kind: SlotChangeKind) -> Vec<&SlotChange> {
        self.changes.iter().filter(|c| c.kind == kind).collect()
    }

    pub fn statistics(&self) -> DatabaseDiffStats {
        let counts = self.changes.iter().counts_by(|c| c.kind);
        DatabaseDiffStats {
            added: counts.get(&SlotChangeKind::Added).copied().unwrap_or(0),
            removed: counts.get(&SlotChangeKind::Removed).copied().unwrap_or(0),
            moved: counts.get(&SlotChangeKind::Moved).copied().unwrap_or(0),
            unchanged: self.unchanged,
        }
    }

    pub fn is_identical(&self) -> bool {
        self.changes.is_empty()
            && self.added_classes.is_empty()
            && self.removed_classes.is_empty()
            && self.size_changes.is_empty()
    }
}

/// Overloads share a name, so slots are keyed by name and occurrence
fn slot_map(record: &ClassRecord) -> HashMap<(&str, usize), usize> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    record
        .functions
        .iter()
        .map(|entry| {
            let occurrence = seen.entry(entry.name()).or_insert(0);
            let key = (entry.name(), *occurrence);
            *occurrence += 1;
            (key, entry.index())
        })
        .collect()
}

fn display_name((name, occurrence): (&str, usize)) -> String {
    if occurrence == 0 {
        name.to_string()
    } else {
        format!("{}#{}", name, occurrence + 1)
    }
}

impl fmt::Display for DatabaseDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "VTable Diff: {} -> {}", self.old_version, self.new_version)?;

        let stats = self.statistics();
        writeln!(
            f,
            "  Unchanged: {}, Moved: {}, Added: {}, Removed: {}",
            stats.unchanged, stats.moved, stats.added, stats.removed
        )?;

        if !self.added_classes.is_empty() {
            writeln!(f, "  New classes: {}", self.added_classes.join(", "))?;
        }
        if !self.removed_classes.is_empty() {
            writeln!(f, "  Removed classes: {}", self.removed_classes.join(", "))?;
        }
        for size in &self.size_changes {
            writeln!(f, "  {}: total slots {} -> {}", size.class_name, size.old_total, size.new_total)?;
        }
        for change in &self.changes {
            writeln!(f, "  {}", change)?;
        }
        Ok(())
    }
}
