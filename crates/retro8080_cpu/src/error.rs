use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CpuError>;

/// Failure of a bounds-checked memory access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MemoryError {
    #[error("{len} byte(s) at {address:#06x} exceed memory capacity {capacity:#x}")]
    OutOfBounds {
        address: usize,
        len: usize,
        capacity: usize,
    },
}

/// Which of the two port hooks an IN/OUT needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortDirection {
    Read,
    Write,
}

impl fmt::Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortDirection::Read => f.write_str("read"),
            PortDirection::Write => f.write_str("write"),
        }
    }
}

/// Errors that abort a single [`Cpu::step`](crate::Cpu::step).
///
/// None of them are recoverable at the instruction level: the step that
/// reports one leaves the CPU exactly as it was before the step began.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CpuError {
    #[error(transparent)]
    OutOfBounds(#[from] MemoryError),
    #[error("unimplemented opcode {opcode:#04x} at {address:#06x}")]
    UnimplementedOpcode { opcode: u8, address: u16 },
    #[error("no {direction} port handler registered (port {port:#04x})")]
    MissingPortHandler { direction: PortDirection, port: u8 },
}
