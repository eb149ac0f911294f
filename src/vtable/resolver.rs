// Mon Oct 19 2026 - Alex

use crate::vtable::error::VTableError;
use crate::vtable::registry::Registry;
use std::collections::HashMap;

/// Computes absolute base indices by resolving parents on demand, so the
/// registry can be in any order. Cyclic parent chains are rejected.
#[derive(Debug, Default)]
pub struct IndexResolver {
    /// class name -> total slot count, inherited slots included
    totals: HashMap<String, usize>,
    visiting: Vec<String>,
}

impl IndexResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve_all(&mut self, registry: &mut Registry) -> Result<(), VTableError> {
        for name in registry.names() {
            self.resolve(registry, &name)?;
        }
        Ok(())
    }

    /// Total slot count of `class_name`. Classes outside the registry count as 0.
    pub fn resolve(&mut self, registry: &mut Registry, class_name: &str) -> Result<usize, VTableError> {
        if let Some(&total) = self.totals.get(class_name) {
            return Ok(total);
        }

        let (parent, own_width) = match registry.get(class_name) {
            Some(decl) => (decl.parent_name().map(str::to_string), decl.own_width()),
            None => return Ok(0),
        };

        if let Some(pos) = self.visiting.iter().position(|v| v == class_name) {
            let mut cycle = self.visiting[pos..].to_vec();
            cycle.push(class_name.to_string());
            return Err(VTableError::CyclicInheritance(cycle));
        }

        self.visiting.push(class_name.to_string());
        let parent_total = match parent.as_deref() {
            Some(parent) => self.resolve(registry, parent),
            None => Ok(0),
        };
        self.visiting.pop();
        let parent_total = parent_total?;

        if let Some(decl) = registry.get_mut(class_name) {
            decl.assign_base_index(parent_total);
        }

        let total = parent_total + own_width;
        log::debug!("{}: base index {}, total slots {}", class_name, parent_total, total);
        self.totals.insert(class_name.to_string(), total);
        Ok(total)
    }

    pub fn total(&self, class_name: &str) -> Option<usize> {
        self.totals.get(class_name).copied()
    }
}
