// Mon Oct 19 2026 - Alex

pub mod config;
pub mod header;
pub mod vtable;
pub mod output;
pub mod diff;
pub mod ui;

pub use config::{ClassDefinition, Config};
pub use header::{FsHeaderSource, HeaderSource, MemoryHeaderSource};
pub use vtable::{Generation, VTableDatabase, VTableDbGenerator};
pub use diff::DatabaseDiff;
