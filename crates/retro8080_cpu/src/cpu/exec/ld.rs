use crate::cpu::Cpu;
use crate::error::Result;

impl Cpu {
    /// STAX/LDAX address through BC (bit 4 clear) or DE (bit 4 set).
    #[inline]
    fn indirect_address(&self) -> u16 {
        if self.ir & 0x10 == 0 {
            self.regs.bc()
        } else {
            self.regs.de()
        }
    }

    pub(super) fn exec_mov(&mut self) -> Result<u32> {
        debug_assert!(matches!(self.ir, 0x40..=0x7F) && self.ir != 0x76);
        let value = self.read_operand(self.ir)?;
        self.write_operand(self.ir >> 3, value)?;
        Ok(0)
    }

    pub(super) fn exec_mvi(&mut self) -> Result<u32> {
        self.write_operand(self.ir >> 3, self.regs.z)?;
        Ok(0)
    }

    pub(super) fn exec_lxi(&mut self) -> Result<u32> {
        self.write_pair(self.ir, self.regs.wz());
        Ok(0)
    }

    pub(super) fn exec_stax(&mut self) -> Result<u32> {
        let addr = self.indirect_address();
        self.memory.write(addr, self.regs.a)?;
        Ok(0)
    }

    pub(super) fn exec_ldax(&mut self) -> Result<u32> {
        let addr = self.indirect_address();
        self.regs.a = self.memory.read(addr)?;
        Ok(0)
    }

    pub(super) fn exec_shld(&mut self) -> Result<u32> {
        // L goes to the addressed byte, H to the next one.
        self.store_word(self.regs.wz(), self.regs.hl())?;
        Ok(0)
    }

    pub(super) fn exec_lhld(&mut self) -> Result<u32> {
        let value = self.load_word(self.regs.wz())?;
        self.regs.set_hl(value);
        Ok(0)
    }

    pub(super) fn exec_sta(&mut self) -> Result<u32> {
        self.memory.write(self.regs.wz(), self.regs.a)?;
        Ok(0)
    }

    pub(super) fn exec_lda(&mut self) -> Result<u32> {
        self.regs.a = self.memory.read(self.regs.wz())?;
        Ok(0)
    }
}
