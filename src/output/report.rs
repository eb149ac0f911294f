// Mon Oct 19 2026 - Alex

use crate::vtable::{Diagnostics, VTableDatabase};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Markdown,
}

pub struct ReportGenerator {
    format: ReportFormat,
    include_functions: bool,
}

impl ReportGenerator {
    pub fn new(format: ReportFormat) -> Self {
        Self {
            format,
            include_functions: false,
        }
    }

    pub fn with_functions(mut self, include: bool) -> Self {
        self.include_functions = include;
        self
    }

    pub fn generate(&self, database: &VTableDatabase, diagnostics: &Diagnostics) -> String {
        match self.format {
            ReportFormat::Text => self.generate_text(database, diagnostics),
            ReportFormat::Markdown => self.generate_markdown(database, diagnostics),
        }
    }

    fn generate_text(&self, database: &VTableDatabase, diagnostics: &Diagnostics) -> String {
        let mut report = String::new();

        let _ = writeln!(report, "VTable database {} ({})", database.version, database.generator);
        for (name, class) in &database.classes {
            let _ = writeln!(report, "  {}: {} own, total slots={}", name, class.own_count, class.total_slots);
            if self.include_functions {
                for entry in &class.functions {
                    let _ = writeln!(report, "    {}", entry);
                }
            }
        }

        if !diagnostics.is_empty() {
            let _ = writeln!(report, "\nDiagnostics ({}):", diagnostics.len());
            for diagnostic in diagnostics.iter() {
                let _ = writeln!(report, "  {}", diagnostic);
            }
        }

        report
    }

    fn generate_markdown(&self, database: &VTableDatabase, diagnostics: &Diagnostics) -> String {
        let mut md = String::new();

        let _ = writeln!(md, "# VTable Database {}\n", database.version);
        md.push_str("| Class | Parent | Base Index | Own | Total Slots |\n");
        md.push_str("|-------|--------|------------|-----|-------------|\n");
        for (name, class) in &database.classes {
            let _ = writeln!(
                md,
                "| {} | {} | {} | {} | {} |",
                name,
                class.parent.as_deref().unwrap_or("-"),
                class.base_index,
                class.own_count,
                class.total_slots
            );
        }

        if self.include_functions {
            for (name, class) in database.classes.iter().filter(|(_, c)| !c.functions.is_empty()) {
                let _ = writeln!(md, "\n## {}\n", name);
                md.push_str("| Index | Function |\n");
                md.push_str("|-------|----------|\n");
                for entry in &class.functions {
                    let _ = writeln!(md, "| {} | `{}` |", entry.index(), entry.name());
                }
            }
        }

        if !diagnostics.is_empty() {
            md.push_str("\n## Diagnostics\n\n");
            for diagnostic in diagnostics.iter() {
                let _ = writeln!(md, "- {}", diagnostic);
            }
        }

        md
    }
}

pub fn generate_text_report(database: &VTableDatabase, diagnostics: &Diagnostics) -> String {
    ReportGenerator::new(ReportFormat::Text).generate(database, diagnostics)
}
