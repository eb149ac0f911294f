// Mon Oct 19 2026 - Alex

use super::cli::Command;
use colored::*;

/// Boxed run header: tool name and version, then what the command works on
pub struct Banner {
    title: String,
    details: Vec<String>,
}

impl Banner {
    pub fn new() -> Self {
        Self {
            title: format!("{} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            details: Vec::new(),
        }
    }

    pub fn for_command(command: &Command) -> Self {
        let banner = Self::new();
        match command {
            Command::Generate(args) => banner
                .with_detail(format!("UE {}", args.version))
                .with_detail(format!("source: {}", args.source_root.display())),
            Command::Diff(args) => {
                banner.with_detail(format!("{} -> {}", args.old.display(), args.new.display()))
            }
            Command::Lookup(args) => banner.with_detail(format!("{} in {}", args.class, args.db.display())),
        }
    }

    pub fn with_detail(mut self, detail: String) -> Self {
        self.details.push(detail);
        self
    }

    pub fn render(&self) -> String {
        let width = std::iter::once(&self.title)
            .chain(&self.details)
            .map(|s| s.chars().count())
            .max()
            .unwrap_or(0);
        let rule = "─".repeat(width + 2);

        let mut lines = Vec::with_capacity(self.details.len() + 3);
        lines.push(format!("┌{}┐", rule));
        let title = format!("{:<width$}", self.title, width = width);
        lines.push(format!("│ {} │", title.cyan().bold()));
        for detail in &self.details {
            lines.push(format!("│ {:<width$} │", detail, width = width));
        }
        lines.push(format!("└{}┘", rule));

        lines.join("\n")
    }

    pub fn print(&self) {
        println!("{}", self.render());
    }
}

impl Default for Banner {
    fn default() -> Self {
        Self::new()
    }
}
