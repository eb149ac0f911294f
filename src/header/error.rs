// Mon Oct 19 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HeaderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("Invalid class name: {0:?}")]
    InvalidClassName(String),
}
