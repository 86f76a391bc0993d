use crate::cpu::Cpu;
use crate::error::Result;

impl Cpu {
    /// PUSH B/D/H/PSW. PSW puts A in the high byte and the packed flags in
    /// the low byte, so A lands at SP-1 and the flags at SP-2.
    pub(super) fn exec_push(&mut self) -> Result<u32> {
        debug_assert!(matches!(self.ir, 0xC5 | 0xD5 | 0xE5 | 0xF5));
        let value = match (self.ir >> 4) & 0x03 {
            0 => self.regs.bc(),
            1 => self.regs.de(),
            2 => self.regs.hl(),
            _ => u16::from_be_bytes([self.regs.a, self.flags.bits()]),
        };
        self.push(value)?;
        Ok(0)
    }

    pub(super) fn exec_pop(&mut self) -> Result<u32> {
        debug_assert!(matches!(self.ir, 0xC1 | 0xD1 | 0xE1 | 0xF1));
        let value = self.pop()?;
        match (self.ir >> 4) & 0x03 {
            0 => self.regs.set_bc(value),
            1 => self.regs.set_de(value),
            2 => self.regs.set_hl(value),
            _ => {
                let [a, f] = value.to_be_bytes();
                self.flags.set_bits(f);
                self.regs.a = a;
            }
        }
        Ok(0)
    }

    /// Exchange HL with the word on top of the stack.
    pub(super) fn exec_xthl(&mut self) -> Result<u32> {
        let sp = self.regs.sp;
        let top = self.load_word(sp)?;
        self.store_word(sp, self.regs.hl())?;
        self.regs.set_hl(top);
        Ok(0)
    }

    pub(super) fn exec_xchg(&mut self) -> Result<u32> {
        std::mem::swap(&mut self.regs.d, &mut self.regs.h);
        std::mem::swap(&mut self.regs.e, &mut self.regs.l);
        Ok(0)
    }

    pub(super) fn exec_sphl(&mut self) -> Result<u32> {
        self.regs.sp = self.regs.hl();
        Ok(0)
    }
}
