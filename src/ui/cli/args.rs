// Mon Oct 19 2026 - Alex

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "vtable-db-generator")]
#[command(author = "Alex")]
#[command(version)]
#[command(about = "Builds Unreal Engine vtable index databases from engine headers", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan engine headers and write the vtable database
    Generate(GenerateArgs),
    /// Compare two vtable databases
    Diff(DiffArgs),
    /// Look up a slot in a vtable database
    Lookup(LookupArgs),
}

#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Engine source root, e.g. D:/UE/UnrealEngine-4.26
    pub source_root: PathBuf,

    #[arg(long, default_value = "4.26")]
    pub version: String,

    /// Defaults to vtable_db/<version>.json
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// JSON class list replacing the built-in one
    #[arg(long)]
    pub classes: Option<PathBuf>,

    #[arg(long)]
    pub parallel: bool,

    #[arg(long)]
    pub threads: Option<usize>,

    #[arg(long)]
    pub markdown_output: Option<PathBuf>,

    #[arg(long)]
    pub show_functions: bool,

    /// Editor-only guard macro, repeatable; replaces the built-in set
    #[arg(long = "editor-macro", value_name = "MACRO")]
    pub editor_macros: Vec<String>,

    /// Write single-line JSON
    #[arg(long)]
    pub compact: bool,
}

impl GenerateArgs {
    pub fn validate(&self) -> Result<(), String> {
        if !self.source_root.is_dir() {
            return Err(format!("Engine source root not found: {:?}", self.source_root));
        }
        if self.threads == Some(0) {
            return Err("Thread count must be at least 1".to_string());
        }
        if let Some(bad) = self
            .editor_macros
            .iter()
            .find(|m| m.is_empty() || !m.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'))
        {
            return Err(format!("Invalid editor macro name: {:?}", bad));
        }
        if let Some(classes) = &self.classes {
            if !classes.is_file() {
                return Err(format!("Class list does not exist: {:?}", classes));
            }
        }
        Ok(())
    }
}

#[derive(Parser, Debug)]
pub struct DiffArgs {
    #[arg(long)]
    pub old: PathBuf,

    #[arg(long)]
    pub new: PathBuf,

    /// Exit with an error when the databases differ
    #[arg(long)]
    pub fail_on_change: bool,
}

impl DiffArgs {
    pub fn validate(&self) -> Result<(), String> {
        if !self.old.exists() {
            return Err(format!("Old file does not exist: {:?}", self.old));
        }
        if !self.new.exists() {
            return Err(format!("New file does not exist: {:?}", self.new));
        }
        Ok(())
    }
}

#[derive(Parser, Debug)]
pub struct LookupArgs {
    #[arg(long)]
    pub db: PathBuf,

    #[arg(short, long)]
    pub class: String,

    #[arg(short, long)]
    pub index: Option<usize>,

    #[arg(short, long)]
    pub name: Option<String>,
}

impl LookupArgs {
    pub fn validate(&self) -> Result<(), String> {
        match (&self.index, &self.name) {
            (Some(_), Some(_)) => Err("Cannot specify both --index and --name".to_string()),
            (None, None) => Err("Either --index or --name must be specified".to_string()),
            _ => Ok(()),
        }
    }
}
