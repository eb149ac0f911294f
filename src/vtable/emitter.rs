// Mon Oct 19 2026 - Alex

use crate::vtable::database::{ClassRecord, SlotEntry, VTableDatabase};
use crate::vtable::error::VTableError;
use crate::vtable::registry::{ClassDecl, Registry};

/// Turns a resolved registry into the per-class slot tables
pub struct Emitter;

impl Emitter {
    pub fn emit(registry: &Registry, version: &str, generator: &str) -> Result<VTableDatabase, VTableError> {
        let mut database = VTableDatabase::new(version, generator);
        for decl in registry.iter() {
            database.classes.insert(decl.class_name.clone(), Self::emit_class(decl)?);
        }
        Ok(database)
    }

    pub fn emit_class(decl: &ClassDecl) -> Result<ClassRecord, VTableError> {
        let base_index = decl
            .base_index()
            .ok_or_else(|| VTableError::Unresolved(decl.class_name.clone()))?;

        let mut index = base_index;
        let mut functions = Vec::with_capacity(decl.own_functions.len());
        for slot in &decl.own_functions {
            functions.push(SlotEntry::new(index, &slot.name, slot.is_destructor));
            index += slot.width();
        }

        Ok(ClassRecord {
            parent: decl.parent_name().map(str::to_string),
            base_index,
            own_count: decl.own_count(),
            total_slots: index,
            functions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vtable::registry::ParentLink;
    use crate::vtable::resolver::IndexResolver;
    use crate::vtable::slot::VirtualFunctionSlot;

    #[test]
    fn test_emit_assigns_running_indices() {
        let mut registry = Registry::new();
        registry.insert(
            ClassDecl::new("UObject", ParentLink::from_config(Some("UObjectBase")), "Object.h").with_functions(vec![
                VirtualFunctionSlot::destructor("~UObject", 10),
                VirtualFunctionSlot::function("PostInitProperties", 11),
                VirtualFunctionSlot::destructor("~Odd", 12),
                VirtualFunctionSlot::function("ProcessEvent", 13),
            ]),
        );
        IndexResolver::new().resolve_all(&mut registry).unwrap();

        let db = Emitter::emit(&registry, "4.26", "test").unwrap();
        let record = db.get("UObject").unwrap();

        assert_eq!(record.parent.as_deref(), Some("UObjectBase"));
        assert_eq!(record.base_index, 0);
        assert_eq!(record.own_count, 4);
        assert_eq!(record.total_slots, 6);
        assert_eq!(
            record.functions,
            vec![
                SlotEntry::new(0, "~UObject", true),
                SlotEntry::new(2, "PostInitProperties", false),
                SlotEntry::new(3, "~Odd", true),
                SlotEntry::new(5, "ProcessEvent", false),
            ]
        );
    }

    #[test]
    fn test_unresolved_class_is_an_error() {
        let decl = ClassDecl::new("Lonely", ParentLink::NoParent, "Lonely.h");
        assert!(matches!(Emitter::emit_class(&decl), Err(VTableError::Unresolved(name)) if name == "Lonely"));
    }
}
