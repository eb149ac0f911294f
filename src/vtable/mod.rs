// Mon Oct 19 2026 - Alex

pub mod slot;
pub mod error;
pub mod diagnostics;
pub mod registry;
pub mod resolver;
pub mod database;
pub mod emitter;
pub mod generator;

pub use slot::{VirtualFunctionSlot, DESTRUCTOR_SLOT_WIDTH, FUNCTION_SLOT_WIDTH, UNKNOWN_FUNCTION_NAME};
pub use error::VTableError;
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use registry::{ClassDecl, ClassScan, ParentLink, Registry, RegistryBuilder};
pub use resolver::IndexResolver;
pub use database::{ClassRecord, SlotEntry, SlotLookup, VTableDatabase};
pub use emitter::Emitter;
pub use generator::{Generation, VTableDbGenerator, GENERATOR_NAME};
