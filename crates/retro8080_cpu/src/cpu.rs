mod alu;
mod exec;
mod helpers;
mod regs;


use std::fmt;

use crate::disasm;
use crate::error::{CpuError, Result};
use crate::flags::Flags;
use crate::memory::Memory;
use crate::opcodes;

pub use regs::Registers;

/// Host hook servicing `IN port`.
pub type ReadPort = Box<dyn FnMut(u8) -> u8>;
/// Host hook servicing `OUT port` with the accumulator value.
pub type WritePort = Box<dyn FnMut(u8, u8)>;

/// Intel 8080 CPU bound to its memory and port hooks.
///
/// One call to [`Cpu::step`] executes exactly one instruction, or dispatches
/// one pending interrupt, and reports how many clock cycles that took.
pub struct Cpu {
    pub regs: Registers,
    pub flags: Flags,
    /// Interrupt enable (INTE), set by EI and cleared by DI.
    pub inte: bool,
    /// Opcode being executed: the fetched byte or an accepted interrupt vector.
    ir: u8,
    /// Address `ir` was fetched from, or PC at interrupt acceptance.
    ir_address: u16,
    pending_interrupt: Option<u8>,
    memory: Memory,
    read_port: Option<ReadPort>,
    write_port: Option<WritePort>,
}

/// Everything a failed step has to put back.
#[derive(Clone, Copy)]
struct Checkpoint {
    regs: Registers,
    flags: Flags,
    inte: bool,
    ir: u8,
    ir_address: u16,
    pending_interrupt: Option<u8>,
}

impl Cpu {
    /// Create a CPU in reset state that owns `memory`.
    pub fn new(memory: Memory) -> Self {
        Self {
            regs: Registers::default(),
            flags: Flags::default(),
            inte: false,
            ir: 0,
            ir_address: 0,
            pending_interrupt: None,
            memory,
            read_port: None,
            write_port: None,
        }
    }

    /// Reset registers, flags and interrupt state. Memory and port hooks are
    /// kept.
    pub fn reset(&mut self) {
        self.regs = Registers::default();
        self.flags = Flags::default();
        self.inte = false;
        self.ir = 0;
        self.ir_address = 0;
        self.pending_interrupt = None;
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    /// Copy a program into memory at `address`.
    pub fn load(&mut self, program: &[u8], address: usize) -> Result<()> {
        self.memory.load(program, address)?;
        Ok(())
    }

    /// Register the hook called by `IN`. Replaces any previous hook.
    pub fn set_read_port(&mut self, hook: impl FnMut(u8) -> u8 + 'static) {
        self.read_port = Some(Box::new(hook));
    }

    /// Register the hook called by `OUT`. Replaces any previous hook.
    pub fn set_write_port(&mut self, hook: impl FnMut(u8, u8) + 'static) {
        self.write_port = Some(Box::new(hook));
    }

    /// Record an interrupt request carrying the opcode to execute, normally
    /// an `RST n`.
    ///
    /// Requests are not queued: a newer request replaces an unconsumed one.
    /// The request is only accepted by a step that starts with INTE set;
    /// until then it stays pending.
    pub fn request_interrupt(&mut self, vector: u8) {
        if let Some(dropped) = self.pending_interrupt.replace(vector) {
            log::trace!("interrupt {dropped:#04x} replaced by {vector:#04x}");
        }
    }

    pub fn pending_interrupt(&self) -> Option<u8> {
        self.pending_interrupt
    }

    /// Opcode of the instruction executed (or being executed) by the last step.
    pub fn current_opcode(&self) -> u8 {
        self.ir
    }

    /// Execute one instruction, or dispatch one pending interrupt, and return
    /// the elapsed clock cycles.
    ///
    /// On error the CPU is left exactly as it was before the call.
    pub fn step(&mut self) -> Result<u32> {
        let checkpoint = self.checkpoint();
        let result = self.step_inner();
        if result.is_err() {
            self.restore(checkpoint);
        }
        result
    }

    fn step_inner(&mut self) -> Result<u32> {
        if self.inte {
            if let Some(vector) = self.pending_interrupt.take() {
                // Accepting the interrupt leaves INTE alone; the handler is
                // expected to issue DI itself if it needs to.
                log::debug!("interrupt {vector:#04x} accepted at {:04X}", self.regs.pc);
                self.ir = vector;
                self.ir_address = self.regs.pc;
                return self.execute();
            }
        }

        self.fetch()?;
        self.execute()
    }

    /// Load IR and the operand latches, then advance PC past the instruction.
    fn fetch(&mut self) -> Result<()> {
        let pc = self.regs.pc;
        let opcode = self.memory.read(pc)?;
        let instruction = opcodes::lookup(opcode);
        if instruction.length > 1 {
            self.regs.z = self.memory.read(pc.wrapping_add(1))?;
        }
        if instruction.length > 2 {
            self.regs.w = self.memory.read(pc.wrapping_add(2))?;
        }

        self.ir = opcode;
        self.ir_address = pc;
        self.regs.pc = pc.wrapping_add(instruction.length as u16);

        if log::log_enabled!(log::Level::Trace) {
            log::trace!("{pc:04X}  {:<16} {}", self.disassemble_current(), self);
        }
        Ok(())
    }

    /// Render the current opcode with the operand bytes held in W and Z.
    pub fn disassemble_current(&self) -> String {
        disasm::render(opcodes::lookup(self.ir), self.regs.z, self.regs.w)
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            regs: self.regs,
            flags: self.flags,
            inte: self.inte,
            ir: self.ir,
            ir_address: self.ir_address,
            pending_interrupt: self.pending_interrupt,
        }
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        self.regs = checkpoint.regs;
        self.flags = checkpoint.flags;
        self.inte = checkpoint.inte;
        self.ir = checkpoint.ir;
        self.ir_address = checkpoint.ir_address;
        self.pending_interrupt = checkpoint.pending_interrupt;
    }

    fn unimplemented(&self) -> CpuError {
        CpuError::UnimplementedOpcode {
            opcode: self.ir,
            address: self.ir_address,
        }
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new(Memory::default())
    }
}

/// Register dump including the packed flags: `AF BC DE HL PC SP`.
impl fmt::Display for Cpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AF: {:02X}{:02X} BC: {:04X} DE: {:04X} HL: {:04X} PC: {:04X} SP: {:04X}",
            self.regs.a,
            self.flags.bits(),
            self.regs.bc(),
            self.regs.de(),
            self.regs.hl(),
            self.regs.pc,
            self.regs.sp
        )
    }
}

impl fmt::Debug for Cpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cpu")
            .field("regs", &self.regs)
            .field("flags", &self.flags)
            .field("inte", &self.inte)
            .field("ir", &self.ir)
            .field("pending_interrupt", &self.pending_interrupt)
            .field("memory", &self.memory)
            .field("read_port", &self.read_port.is_some())
            .field("write_port", &self.write_port.is_some())
            .finish()
    }
}
