use super::Cpu;
use crate::error::Result;

/// Operand index of the memory operand `M`, i.e. the byte at HL.
pub(super) const M: u8 = 6;

impl Cpu {
    /// Read an 8-bit register or M by its 3-bit encoding:
    /// 0=B, 1=C, 2=D, 3=E, 4=H, 5=L, 6=M, 7=A.
    #[inline]
    pub(super) fn read_operand(&self, index: u8) -> Result<u8> {
        let value = match index & 0x07 {
            0 => self.regs.b,
            1 => self.regs.c,
            2 => self.regs.d,
            3 => self.regs.e,
            4 => self.regs.h,
            5 => self.regs.l,
            M => self.memory.read(self.regs.hl())?,
            _ => self.regs.a,
        };
        Ok(value)
    }

    /// Write an 8-bit register or M. The encoding matches `read_operand`.
    #[inline]
    pub(super) fn write_operand(&mut self, index: u8, value: u8) -> Result<()> {
        match index & 0x07 {
            0 => self.regs.b = value,
            1 => self.regs.c = value,
            2 => self.regs.d = value,
            3 => self.regs.e = value,
            4 => self.regs.h = value,
            5 => self.regs.l = value,
            M => self.memory.write(self.regs.hl(), value)?,
            _ => self.regs.a = value,
        }
        Ok(())
    }

    /// Register pair selected by bits 4-5 of the opcode: BC, DE, HL, SP.
    #[inline]
    pub(super) fn read_pair(&self, opcode: u8) -> u16 {
        match (opcode >> 4) & 0x03 {
            0 => self.regs.bc(),
            1 => self.regs.de(),
            2 => self.regs.hl(),
            _ => self.regs.sp,
        }
    }

    #[inline]
    pub(super) fn write_pair(&mut self, opcode: u8, value: u16) {
        match (opcode >> 4) & 0x03 {
            0 => self.regs.set_bc(value),
            1 => self.regs.set_de(value),
            2 => self.regs.set_hl(value),
            _ => self.regs.sp = value,
        }
    }

    /// Branch condition selected by bits 3-5 of the opcode:
    /// NZ, Z, NC, C, PO, PE, P, M.
    #[inline]
    pub(super) fn condition(&self, opcode: u8) -> bool {
        match (opcode >> 3) & 0x07 {
            0 => !self.flags.z,
            1 => self.flags.z,
            2 => !self.flags.cy,
            3 => self.flags.cy,
            4 => !self.flags.p,
            5 => self.flags.p,
            6 => !self.flags.s,
            _ => self.flags.s,
        }
    }

    /// Read a little-endian word.
    pub(super) fn load_word(&self, address: u16) -> Result<u16> {
        let lo = self.memory.read(address)?;
        let hi = self.memory.read(address.wrapping_add(1))?;
        Ok(u16::from_le_bytes([lo, hi]))
    }

    /// Write a little-endian word. Both addresses are checked before either
    /// byte is written.
    pub(super) fn store_word(&mut self, address: u16, value: u16) -> Result<()> {
        let high_address = address.wrapping_add(1);
        self.memory.check(address)?;
        self.memory.check(high_address)?;
        let [lo, hi] = value.to_le_bytes();
        self.memory.write(address, lo)?;
        self.memory.write(high_address, hi)?;
        Ok(())
    }

    /// Push a word: high byte lands at SP-1, low byte at SP-2.
    pub(super) fn push(&mut self, value: u16) -> Result<()> {
        let sp = self.regs.sp.wrapping_sub(2);
        self.store_word(sp, value)?;
        self.regs.sp = sp;
        Ok(())
    }

    /// Pop a word: low byte from SP, high byte from SP+1.
    pub(super) fn pop(&mut self) -> Result<u16> {
        let value = self.load_word(self.regs.sp)?;
        self.regs.sp = self.regs.sp.wrapping_add(2);
        Ok(value)
    }

    /// Push the return address (PC, already past the instruction) and jump.
    pub(super) fn call(&mut self, address: u16) -> Result<()> {
        self.push(self.regs.pc)?;
        self.regs.pc = address;
        Ok(())
    }

    pub(super) fn ret(&mut self) -> Result<()> {
        self.regs.pc = self.pop()?;
        Ok(())
    }
}
