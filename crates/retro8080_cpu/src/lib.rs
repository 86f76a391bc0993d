//! Instruction-level Intel 8080 core.
//!
//! The core owns its memory and talks to peripherals through two injected
//! port hooks. A host drives it by calling [`Cpu::step`] and feeding the
//! returned cycle counts into its own timing, requesting interrupts at
//! whatever cadence the target hardware uses.

pub mod cpu;
pub mod disasm;
pub mod error;
pub mod flags;
pub mod memory;
pub mod opcodes;

pub use cpu::{Cpu, Registers};
pub use disasm::disassemble;
pub use error::{CpuError, MemoryError, PortDirection, Result};
pub use flags::Flags;
pub use memory::Memory;
pub use opcodes::Instruction;
