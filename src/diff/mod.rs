// Mon Oct 19 2026 - Alex

pub mod database;

pub use database::{DatabaseDiff, DatabaseDiffStats, SizeChange, SlotChange, SlotChangeKind};
