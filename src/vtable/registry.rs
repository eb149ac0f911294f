// Mon Oct 19 2026 - Alex

use crate::config::ClassDefinition;
use crate::header::{DeclarationClassifier, DeclarationScanner, EditorGuardMatcher, HeaderSource};
use crate::vtable::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::vtable::error::VTableError;
use crate::vtable::slot::{total_width, VirtualFunctionSlot};
use indexmap::IndexMap;
use rayon::prelude::*;
use std::fmt;

/// How a class relates to its configured parent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParentLink {
    /// Hierarchy root
    NoParent,
    Parent(String),
    /// Parent named by configuration but absent from the registry
    UnresolvedParent(String),
}

impl ParentLink {
    pub fn from_config(parent: Option<&str>) -> Self {
        match parent.map(str::trim).filter(|p| !p.is_empty()) {
            Some(name) => ParentLink::Parent(name.to_string()),
            None => ParentLink::NoParent,
        }
    }

    /// Configured parent name, resolved or not
    pub fn name(&self) -> Option<&str> {
        match self {
            ParentLink::NoParent => None,
            ParentLink::Parent(name) | ParentLink::UnresolvedParent(name) => Some(name),
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self, ParentLink::NoParent)
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, ParentLink::UnresolvedParent(_))
    }
}

/// A configured class and the virtual functions it introduces
#[derive(Debug, Clone)]
pub struct ClassDecl {
    pub class_name: String,
    pub parent: ParentLink,
    /// Non-override virtuals declared in the class body, in source order
    pub own_functions: Vec<VirtualFunctionSlot>,
    pub header: String,
    base_index: Option<usize>,
}

impl ClassDecl {
    pub fn new(class_name: &str, parent: ParentLink, header: &str) -> Self {
        Self {
            class_name: class_name.to_string(),
            parent,
            own_functions: Vec::new(),
            header: header.to_string(),
            base_index: None,
        }
    }

    pub fn with_functions(mut self, functions: Vec<VirtualFunctionSlot>) -> Self {
        self.own_functions = functions;
        self
    }

    pub fn parent_name(&self) -> Option<&str> {
        self.parent.name()
    }

    pub fn own_count(&self) -> usize {
        self.own_functions.len()
    }

    pub fn own_width(&self) -> usize {
        total_width(&self.own_functions)
    }

    pub fn base_index(&self) -> Option<usize> {
        self.base_index
    }

    pub(crate) fn assign_base_index(&mut self, index: usize) {
        debug_assert!(self.base_index.is_none(), "base index of {} assigned twice", self.class_name);
        self.base_index = Some(index);
    }
}

impl fmt::Display for ClassDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.class_name)?;
        if let Some(parent) = self.parent_name() {
            write!(f, " : {}", parent)?;
        }
        write!(f, " ({} own virtuals)", self.own_count())
    }
}

/// Configured classes keyed by name, in configuration order
#[derive(Debug, Clone, Default)]
pub struct Registry {
    classes: IndexMap<String, ClassDecl>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries are never replaced; returns false for a name already present
    pub fn insert(&mut self, decl: ClassDecl) -> bool {
        if self.classes.contains_key(&decl.class_name) {
            return false;
        }
        self.classes.insert(decl.class_name.clone(), decl);
        true
    }

    pub fn get(&self, class_name: &str) -> Option<&ClassDecl> {
        self.classes.get(class_name)
    }

    pub(crate) fn get_mut(&mut self, class_name: &str) -> Option<&mut ClassDecl> {
        self.classes.get_mut(class_name)
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.classes.contains_key(class_name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassDecl> {
        self.classes.values()
    }

    pub fn names(&self) -> Vec<String> {
        self.classes.keys().cloned().collect()
    }

    /// Mark parents that are not registered, once every class is in
    pub fn link_parents(&mut self, diagnostics: &mut Diagnostics) {
        let known: Vec<String> = self.names();
        for decl in self.classes.values_mut() {
            if let ParentLink::Parent(parent) = &decl.parent {
                if !known.contains(parent) {
                    diagnostics.push(Diagnostic::new(
                        &decl.class_name,
                        DiagnosticKind::UnknownParent { parent: parent.clone() },
                    ));
                    decl.parent = ParentLink::UnresolvedParent(parent.clone());
                }
            }
        }
    }
}

/// Result of scanning one configured class
#[derive(Debug, Clone)]
pub struct ClassScan {
    pub decl: ClassDecl,
    pub diagnostics: Vec<Diagnostic>,
}

/// Scans configured headers and assembles the registry
pub struct RegistryBuilder<'a> {
    guards: &'a EditorGuardMatcher,
    parallel: bool,
    threads: usize,
}

impl<'a> RegistryBuilder<'a> {
    pub fn new(guards: &'a EditorGuardMatcher) -> Self {
        Self {
            guards,
            parallel: false,
            threads: 1,
        }
    }

    pub fn with_parallel(mut self, parallel: bool, threads: usize) -> Self {
        self.parallel = parallel;
        self.threads = threads.max(1);
        self
    }

    pub fn build(
        &self,
        definitions: &[ClassDefinition],
        source: &dyn HeaderSource,
    ) -> Result<(Registry, Diagnostics), VTableError> {
        let scans: Vec<ClassScan> = if self.parallel && definitions.len() > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.threads)
                .build()
                .map_err(|e| VTableError::ThreadPool(e.to_string()))?;
            pool.install(|| {
                definitions
                    .par_iter()
                    .map(|def| self.scan_class(def, source))
                    .collect()
            })
        } else {
            definitions.iter().map(|def| self.scan_class(def, source)).collect()
        };

        let mut registry = Registry::new();
        let mut diagnostics = Diagnostics::new();

        for scan in scans {
            log::info!(
                "  {}: found {} new virtual functions",
                scan.decl.class_name,
                scan.decl.own_count()
            );
            diagnostics.extend(scan.diagnostics);
            let name = scan.decl.class_name.clone();
            if !registry.insert(scan.decl) {
                log::warn!("Ignoring duplicate configuration for {}", name);
            }
        }

        registry.link_parents(&mut diagnostics);
        Ok((registry, diagnostics))
    }

    /// Never fails: problems become diagnostics on an empty declaration
    pub fn scan_class(&self, definition: &ClassDefinition, source: &dyn HeaderSource) -> ClassScan {
        log::info!("Parsing {} from {}...", definition.name, definition.header);

        let mut decl = ClassDecl::new(
            &definition.name,
            ParentLink::from_config(definition.parent.as_deref()),
            &definition.header,
        );
        let mut diagnostics = Vec::new();
        let path = source.describe(&definition.header);

        let text = match source.read(&definition.header) {
            Ok(Some(text)) => text,
            Ok(None) => {
                diagnostics.push(Diagnostic::new(&definition.name, DiagnosticKind::MissingHeaderFile { path }));
                return ClassScan { decl, diagnostics };
            }
            Err(e) => {
                diagnostics.push(Diagnostic::new(
                    &definition.name,
                    DiagnosticKind::ScanFailed { path, message: e.to_string() },
                ));
                return ClassScan { decl, diagnostics };
            }
        };

        let scanner = match DeclarationScanner::new(&definition.name, self.guards) {
            Ok(scanner) => scanner,
            Err(e) => {
                diagnostics.push(Diagnostic::new(
                    &definition.name,
                    DiagnosticKind::ScanFailed { path, message: e.to_string() },
                ));
                return ClassScan { decl, diagnostics };
            }
        };

        let result = scanner.scan(&text);
        if !result.class_found {
            diagnostics.push(Diagnostic::new(&definition.name, DiagnosticKind::ClassNotFound { path }));
            return ClassScan { decl, diagnostics };
        }

        if let Some(declared) = &result.declared_parent {
            if decl.parent_name() != Some(declared.as_str()) {
                diagnostics.push(Diagnostic::new(
                    &definition.name,
                    DiagnosticKind::ParentMismatch {
                        configured: decl.parent_name().map(str::to_string),
                        declared: declared.clone(),
                    },
                ));
            }
        }

        for declaration in &result.declarations {
            if let Some(slot) = DeclarationClassifier::classify_slot(declaration) {
                if slot.is_unknown() {
                    diagnostics.push(Diagnostic::new(
                        &definition.name,
                        DiagnosticKind::UnresolvableDeclarationName { line: slot.source_line },
                    ));
                }
                decl.own_functions.push(slot);
            }
        }

        ClassScan { decl, diagnostics }
    }
}
