use crate::cpu::Cpu;
use crate::error::{CpuError, PortDirection, Result};

impl Cpu {
    pub(super) fn exec_nop(&mut self) -> Result<u32> {
        Ok(0)
    }

    /// Undefined opcode slots and HLT.
    ///
    /// HLT is not modelled as a halt state; a program that reaches it stops
    /// the host with an error instead of spinning silently.
    pub(super) fn exec_unimplemented(&mut self) -> Result<u32> {
        Err(self.unimplemented())
    }

    pub(super) fn exec_di(&mut self) -> Result<u32> {
        log::debug!("DI at {:04X}", self.ir_address);
        self.inte = false;
        Ok(0)
    }

    pub(super) fn exec_ei(&mut self) -> Result<u32> {
        log::debug!("EI at {:04X}", self.ir_address);
        self.inte = true;
        Ok(0)
    }

    /// IN port: A := read_port(port), port number in Z.
    pub(super) fn exec_in(&mut self) -> Result<u32> {
        let port = self.regs.z;
        let read = self
            .read_port
            .as_mut()
            .ok_or(CpuError::MissingPortHandler {
                direction: PortDirection::Read,
                port,
            })?;
        self.regs.a = read(port);
        Ok(0)
    }

    /// OUT port: write_port(port, A), port number in Z.
    pub(super) fn exec_out(&mut self) -> Result<u32> {
        let port = self.regs.z;
        let write = self
            .write_port
            .as_mut()
            .ok_or(CpuError::MissingPortHandler {
                direction: PortDirection::Write,
                port,
            })?;
        write(port, self.regs.a);
        Ok(0)
    }
}
