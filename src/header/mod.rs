// Mon Oct 19 2026 - Alex

pub mod error;
pub mod source;
pub mod preprocessor;
pub mod scanner;
pub mod classifier;

pub use error::HeaderError;
pub use source::{HeaderSource, FsHeaderSource, MemoryHeaderSource};
pub use preprocessor::{Directive, EditorGuardMatcher, GuardStack, DEFAULT_EDITOR_MACROS};
pub use scanner::{Declaration, DeclarationScanner, ScanResult, ScanState, ClassScope};
pub use classifier::{Classification, DeclarationClassifier, extract_function_name};
