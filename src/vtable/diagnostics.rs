// Mon Oct 19 2026 - Alex

use std::fmt;

/// Recoverable problems found while building the database. None of them stop
/// other classes from being processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    MissingHeaderFile { path: String },
    ScanFailed { path: String, message: String },
    ClassNotFound { path: String },
    /// The header's base clause disagrees with the configured parent
    ParentMismatch { configured: Option<String>, declared: String },
    UnresolvableDeclarationName { line: usize },
    UnknownParent { parent: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub class_name: String,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn new(class_name: &str, kind: DiagnosticKind) -> Self {
        Self {
            class_name: class_name.to_string(),
            kind,
        }
    }

    pub fn is_missing_header(&self) -> bool {
        matches!(self.kind, DiagnosticKind::MissingHeaderFile { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.class_name)?;
        match &self.kind {
            DiagnosticKind::MissingHeaderFile { path } => write!(f, "header not found: {}", path),
            DiagnosticKind::ScanFailed { path, message } => write!(f, "failed to scan {}: {}", path, message),
            DiagnosticKind::ClassNotFound { path } => write!(f, "class declaration not found in {}", path),
            DiagnosticKind::ParentMismatch { configured, declared } => write!(
                f,
                "header declares parent {} but configuration says {}",
                declared,
                configured.as_deref().unwrap_or("<none>")
            ),
            DiagnosticKind::UnresolvableDeclarationName { line } => {
                write!(f, "could not extract function name at line {}", line)
            }
            DiagnosticKind::UnknownParent { parent } => {
                write!(f, "parent {} is not configured, treated as 0 slots", parent)
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        log::warn!("{}", diagnostic);
        self.entries.push(diagnostic);
    }

    pub fn extend<I: IntoIterator<Item = Diagnostic>>(&mut self, diagnostics: I) {
        for diagnostic in diagnostics {
            self.push(diagnostic);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn for_class<'a>(&'a self, class_name: &'a str) -> impl Iterator<Item = &'a Diagnostic> + 'a {
        self.entries.iter().filter(move |d| d.class_name == class_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
