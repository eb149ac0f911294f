// Mon Oct 19 2026 - Alex

use crate::config::ConfigError;
use crate::header::HeaderError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VTableError {
    #[error("Cyclic inheritance: {}", .0.join(" -> "))]
    CyclicInheritance(Vec<String>),
    #[error("Class {0} has no resolved base index")]
    Unresolved(String),
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Header error: {0}")]
    Header(#[from] HeaderError),
    #[error("Thread pool error: {0}")]
    ThreadPool(String),
}
