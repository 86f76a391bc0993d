use super::TAKEN_PENALTY;
use crate::cpu::Cpu;
use crate::error::Result;

impl Cpu {
    pub(super) fn exec_jmp(&mut self) -> Result<u32> {
        self.regs.pc = self.regs.wz();
        Ok(0)
    }

    /// Jcc costs the same whether or not the jump is taken.
    pub(super) fn exec_jcc(&mut self) -> Result<u32> {
        if self.condition(self.ir) {
            self.regs.pc = self.regs.wz();
        }
        Ok(0)
    }

    pub(super) fn exec_call(&mut self) -> Result<u32> {
        self.call(self.regs.wz())?;
        Ok(0)
    }

    pub(super) fn exec_ccc(&mut self) -> Result<u32> {
        if self.condition(self.ir) {
            self.call(self.regs.wz())?;
            Ok(TAKEN_PENALTY)
        } else {
            Ok(0)
        }
    }

    pub(super) fn exec_ret(&mut self) -> Result<u32> {
        self.ret()?;
        Ok(0)
    }

    pub(super) fn exec_rcc(&mut self) -> Result<u32> {
        if self.condition(self.ir) {
            self.ret()?;
            Ok(TAKEN_PENALTY)
        } else {
            Ok(0)
        }
    }

    /// RST n: call to n * 8. Also the usual opcode of an accepted interrupt.
    pub(super) fn exec_rst(&mut self) -> Result<u32> {
        debug_assert!(self.ir & 0xC7 == 0xC7);
        self.call((self.ir & 0x38) as u16)?;
        Ok(0)
    }

    pub(super) fn exec_pchl(&mut self) -> Result<u32> {
        self.regs.pc = self.regs.hl();
        Ok(0)
    }
}
