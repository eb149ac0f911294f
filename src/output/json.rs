// Mon Oct 19 2026 - Alex

use crate::vtable::VTableDatabase;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub struct JsonSerializer {
    pretty_print: bool,
}

impl JsonSerializer {
    pub fn new() -> Self {
        Self { pretty_print: true }
    }

    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    pub fn serialize(&self, database: &VTableDatabase) -> Result<String, OutputError> {
        let text = if self.pretty_print {
            serde_json::to_string_pretty(database)?
        } else {
            serde_json::to_string(database)?
        };
        Ok(text)
    }

    /// Creates missing parent directories
    pub fn serialize_to_file<P: AsRef<Path>>(&self, database: &VTableDatabase, path: P) -> Result<(), OutputError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let json_str = self.serialize(database)?;
        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(json_str.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    pub fn deserialize(&self, json_str: &str) -> Result<VTableDatabase, OutputError> {
        Ok(serde_json::from_str(json_str)?)
    }

    pub fn deserialize_from_file<P: AsRef<Path>>(&self, path: P) -> Result<VTableDatabase, OutputError> {
        let text = fs::read_to_string(path)?;
        self.deserialize(&text)
    }
}

impl Default for JsonSerializer {
    fn default() -> Self {
        Self::new()
    }
}

/// `vtable_db/<version>.json`
pub fn default_output_path(version: &str) -> PathBuf {
    PathBuf::from("vtable_db").join(format!("{}.json", version))
}
