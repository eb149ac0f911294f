// Mon Oct 19 2026 - Alex

use std::fmt;

/// Vtable entries consumed by a virtual destructor. MSVC x64 emits the scalar
/// deleting and vector deleting destructors side by side.
pub const DESTRUCTOR_SLOT_WIDTH: usize = 2;

/// Vtable entries consumed by any other virtual function.
pub const FUNCTION_SLOT_WIDTH: usize = 1;

/// Name given to a declaration whose function name could not be extracted.
pub const UNKNOWN_FUNCTION_NAME: &str = "unknown";

/// A virtual function newly introduced by a class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualFunctionSlot {
    /// Function name, `~Class` for destructors
    pub name: String,
    pub is_destructor: bool,
    /// 1-based header line where the declaration starts
    pub source_line: usize,
}

impl VirtualFunctionSlot {
    pub fn function(name: &str, source_line: usize) -> Self {
        Self {
            name: name.to_string(),
            is_destructor: false,
            source_line,
        }
    }

    pub fn destructor(name: &str, source_line: usize) -> Self {
        Self {
            name: name.to_string(),
            is_destructor: true,
            source_line,
        }
    }

    pub fn unknown(source_line: usize) -> Self {
        Self::function(UNKNOWN_FUNCTION_NAME, source_line)
    }

    pub fn width(&self) -> usize {
        slot_width(self.is_destructor)
    }

    pub fn is_unknown(&self) -> bool {
        self.name == UNKNOWN_FUNCTION_NAME
    }
}

impl fmt::Display for VirtualFunctionSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (line {})", self.name, self.source_line)?;
        if self.is_destructor {
            write!(f, " [destructor]")?;
        }
        Ok(())
    }
}

pub fn slot_width(is_destructor: bool) -> usize {
    if is_destructor {
        DESTRUCTOR_SLOT_WIDTH
    } else {
        FUNCTION_SLOT_WIDTH
    }
}

/// Total number of vtable entries occupied by a run of slots
pub fn total_width(slots: &[VirtualFunctionSlot]) -> usize {
    slots.iter().map(VirtualFunctionSlot::width).sum()
}
