// Mon Oct 19 2026 - Alex

use crate::config::Config;
use crate::header::{EditorGuardMatcher, HeaderSource};
use crate::vtable::database::VTableDatabase;
use crate::vtable::diagnostics::Diagnostics;
use crate::vtable::emitter::Emitter;
use crate::vtable::error::VTableError;
use crate::vtable::registry::{Registry, RegistryBuilder};
use crate::vtable::resolver::IndexResolver;

pub const GENERATOR_NAME: &str = concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"));

/// Output of one generation run
#[derive(Debug)]
pub struct Generation {
    pub database: VTableDatabase,
    pub registry: Registry,
    pub diagnostics: Diagnostics,
}

pub struct VTableDbGenerator {
    config: Config,
    guards: EditorGuardMatcher,
}

impl VTableDbGenerator {
    pub fn new(config: Config) -> Result<Self, VTableError> {
        config.validate()?;
        let guards = EditorGuardMatcher::new(config.editor_macros.as_slice())?;
        log::debug!("Editor-only guards: {}", guards.macros().join(", "));
        Ok(Self { config, guards })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Scan every configured header, then resolve and emit. The registry is
    /// complete before resolution starts.
    pub fn generate(&self, source: &dyn HeaderSource) -> Result<Generation, VTableError> {
        log::info!(
            "Generating vtable database {} for {} classes",
            self.config.version,
            self.config.classes.len()
        );

        let (mut registry, diagnostics) = RegistryBuilder::new(&self.guards)
            .with_parallel(self.config.parallel_scan, self.config.max_threads)
            .build(&self.config.classes, source)?;

        IndexResolver::new().resolve_all(&mut registry)?;
        let database = Emitter::emit(&registry, &self.config.version, GENERATOR_NAME)?;

        log::info!(
            "Resolved {} classes, {} virtual functions, {} diagnostics",
            database.class_count(),
            database.function_count(),
            diagnostics.len()
        );

        Ok(Generation {
            database,
            registry,
            diagnostics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClassDefinition;
    use crate::header::MemoryHeaderSource;
    use crate::vtable::database::SlotEntry;

    const ROOT_H: &str = "\
#pragma once

class CORE_API Root
{
public:
\tvirtual void funcA();
\tvirtual void funcB() const = 0;
#if WITH_EDITOR
\tvirtual void EditorOnly();
#endif
};
";

    const MID_H: &str = "\
class CORE_API Mid : public Root
{
public:
\tvirtual void funcC();
\tvirtual ~Mid();
\tvirtual void funcA() override;
};
";

    const LEAF_H: &str = "\
class Leaf : public Mid
{
\tvirtual void funcC() override;
};
";

    fn source() -> MemoryHeaderSource {
        MemoryHeaderSource::new()
            .with_header("Root.h", ROOT_H)
            .with_header("Mid.h", MID_H)
            .with_header("Leaf.h", LEAF_H)
    }

    fn definitions() -> Vec<ClassDefinition> {
        vec![
            ClassDefinition::new("Root", None, "Root.h"),
            ClassDefinition::new("Mid", Some("Root"), "Mid.h"),
            ClassDefinition::new("Leaf", Some("Mid"), "Leaf.h"),
        ]
    }

    fn generate(definitions: Vec<ClassDefinition>, source: &MemoryHeaderSource) -> Generation {
        let config = Config::new().with_version("test").with_classes(definitions);
        VTableDbGenerator::new(config).unwrap().generate(source).unwrap()
    }

    #[test]
    fn test_root_mid_leaf_scenario() {
        let generation = generate(definitions(), &source());
        let db = &generation.database;

        let root = db.get("Root").unwrap();
        assert_eq!(root.base_index, 0);
        assert_eq!(root.total_slots, 2);

        let mid = db.get("Mid").unwrap();
        assert_eq!(mid.base_index, 2);
        assert_eq!(mid.functions, vec![SlotEntry::new(2, "funcC", false), SlotEntry::new(3, "~Mid", true)]);
        assert_eq!(mid.total_slots, 5);

        let leaf = db.get("Leaf").unwrap();
        assert_eq!(leaf.base_index, 5);
        assert_eq!(leaf.total_slots, 5);
        assert!(leaf.functions.is_empty());

        assert!(generation.diagnostics.is_empty());
        assert_eq!(db.version, "test");
    }

    #[test]
    fn test_parent_child_invariants() {
        let db = generate(definitions(), &source()).database;

        for (name, record) in &db.classes {
            let own_width: usize = record.functions.iter().map(SlotEntry::width).sum();
            assert_eq!(record.total_slots, record.base_index + own_width, "{}", name);

            if let Some(parent) = record.parent.as_deref().and_then(|p| db.get(p)) {
                assert_eq!(record.base_index, parent.total_slots, "{}", name);
            } else {
                assert_eq!(record.base_index, 0, "{}", name);
            }

            for pair in record.functions.windows(2) {
                assert_eq!(pair[1].index(), pair[0].index() + pair[0].width());
            }
        }
    }

    #[test]
    fn test_configuration_order_does_not_matter() {
        let expected = generate(definitions(), &source()).database;

        let mut reversed = definitions();
        reversed.reverse();
        let db = generate(reversed, &source()).database;

        for (name, record) in &expected.classes {
            let other = db.get(name).unwrap();
            assert_eq!(other.base_index, record.base_index);
            assert_eq!(other.total_slots, record.total_slots);
        }
        assert_eq!(db.classes.keys().next().map(String::as_str), Some("Leaf"));
    }

    #[test]
    fn test_multi_line_declaration_matches_single_line() {
        let split = MemoryHeaderSource::new().with_header(
            "Root.h",
            "class Root\n{\n\tvirtual void\n\t\tfuncA(int32 Value,\n\t\tfloat Scale);\n\tvirtual ~Root();\n};\n",
        );
        let joined = MemoryHeaderSource::new().with_header(
            "Root.h",
            "class Root\n{\n\tvirtual void funcA(int32 Value, float Scale);\n\tvirtual ~Root();\n};\n",
        );
        let defs = vec![ClassDefinition::new("Root", None, "Root.h")];

        let split_db = generate(defs.clone(), &split).database;
        let joined_db = generate(defs, &joined).database;

        assert_eq!(split_db.get("Root"), joined_db.get("Root"));
        assert_eq!(split_db.get("Root").unwrap().functions[0].name(), "funcA");
    }

    #[test]
    fn test_missing_header_does_not_disturb_other_classes() {
        let expected = generate(definitions(), &source()).database;

        let mut defs = definitions();
        defs.push(ClassDefinition::new("Extra", Some("Leaf"), "Missing.h"));
        let generation = generate(defs, &source());
        let db = &generation.database;

        for (name, record) in &expected.classes {
            assert_eq!(db.get(name), Some(record));
        }

        let extra = db.get("Extra").unwrap();
        assert_eq!(extra.own_count, 0);
        assert_eq!(extra.base_index, 5);
        assert_eq!(generation.diagnostics.iter().filter(|d| d.is_missing_header()).count(), 1);
    }

    #[test]
    fn test_cyclic_configuration_fails() {
        let defs = vec![
            ClassDefinition::new("Root", Some("Leaf"), "Root.h"),
            ClassDefinition::new("Mid", Some("Root"), "Mid.h"),
            ClassDefinition::new("Leaf", Some("Mid"), "Leaf.h"),
        ];
        let config = Config::new().with_classes(defs);
        let result = VTableDbGenerator::new(config).unwrap().generate(&source());

        assert!(matches!(result, Err(VTableError::CyclicInheritance(_))));
    }

    #[test]
    fn test_custom_editor_macros() {
        let header = "\
class Root
{
#if WITH_HOT_RELOAD
\tvirtual void ReloadOnly();
#endif
#if WITH_EDITOR
\tvirtual void NowShipped();
#endif
};
";
        let source = MemoryHeaderSource::new().with_header("Root.h", header);
        let config = Config::new()
            .with_classes(vec![ClassDefinition::new("Root", None, "Root.h")])
            .with_editor_macros(vec!["WITH_HOT_RELOAD".to_string()]);
        let generation = VTableDbGenerator::new(config).unwrap().generate(&source).unwrap();

        let root = generation.database.get("Root").unwrap();
        assert_eq!(root.functions, vec![SlotEntry(0, "NowShipped".to_string(), false)]);
    }

    #[test]
    fn test_invalid_configuration_is_rejected() {
        let config = Config::new().with_classes(vec![]);
        assert!(matches!(VTableDbGenerator::new(config), Err(VTableError::Config(_))));
    }
}
