// Mon Oct 19 2026 - Alex

pub mod json;
pub mod report;

pub use json::{default_output_path, JsonSerializer, OutputError};
pub use report::{generate_text_report, ReportFormat, ReportGenerator};
