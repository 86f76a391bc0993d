use super::Cpu;

impl Cpu {
    /// Core 8-bit ADD/ADC on A.
    ///
    /// `use_carry` selects between ADD (false) and ADC (true). AC is the
    /// carry out of bit 3 of the nibble sum, carry-in included.
    pub(super) fn alu_add(&mut self, value: u8, use_carry: bool) {
        let a = self.regs.a;
        let carry_in = u8::from(use_carry && self.flags.cy);

        let half = (a & 0x0f) + (value & 0x0f) + carry_in;
        let full = a as u16 + value as u16 + carry_in as u16;
        let result = full as u8;

        self.flags.ac = half > 0x0f;
        self.flags.cy = full > 0xff;
        self.flags.set_szp(result);
        self.regs.a = result;
    }

    /// Core 8-bit SUB/SBB, returning `A - value - borrow` without storing it.
    ///
    /// CY is set when the subtrahend (plus borrow) exceeds A, AC when its low
    /// nibble (plus borrow) exceeds the low nibble of A. CMP uses this
    /// directly and discards the result.
    pub(super) fn alu_sub(&mut self, value: u8, use_borrow: bool) -> u8 {
        let a = self.regs.a;
        let borrow = u8::from(use_borrow && self.flags.cy);

        let result = a.wrapping_sub(value).wrapping_sub(borrow);

        self.flags.ac = (value & 0x0f) + borrow > a & 0x0f;
        self.flags.cy = value as u16 + borrow as u16 > a as u16;
        self.flags.set_szp(result);
        result
    }

    pub(super) fn alu_and(&mut self, value: u8) {
        self.logic_result(self.regs.a & value);
    }

    pub(super) fn alu_xor(&mut self, value: u8) {
        self.logic_result(self.regs.a ^ value);
    }

    pub(super) fn alu_or(&mut self, value: u8) {
        self.logic_result(self.regs.a | value);
    }

    /// Flag update shared by ANA/XRA/ORA: CY and AC always clear.
    #[inline]
    fn logic_result(&mut self, result: u8) {
        self.flags.cy = false;
        self.flags.ac = false;
        self.flags.set_szp(result);
        self.regs.a = result;
    }

    /// Apply one of the eight accumulator operations selected by bits 3-5 of
    /// an ALU opcode: ADD, ADC, SUB, SBB, ANA, XRA, ORA, CMP.
    pub(super) fn alu_op(&mut self, opcode: u8, value: u8) {
        match (opcode >> 3) & 0x07 {
            0 => self.alu_add(value, false),
            1 => self.alu_add(value, true),
            2 => self.regs.a = self.alu_sub(value, false),
            3 => self.regs.a = self.alu_sub(value, true),
            4 => self.alu_and(value),
            5 => self.alu_xor(value),
            6 => self.alu_or(value),
            _ => {
                self.alu_sub(value, false);
            }
        }
    }

    /// INR: carry is not affected.
    #[inline]
    pub(super) fn alu_inr(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        self.flags.ac = value & 0x0f == 0x0f;
        self.flags.set_szp(result);
        result
    }

    /// DCR: carry is not affected. AC follows the same borrow rule as SUB.
    #[inline]
    pub(super) fn alu_dcr(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        self.flags.ac = value & 0x0f == 0;
        self.flags.set_szp(result);
        result
    }

    /// DAD: HL += value, only CY is affected.
    #[inline]
    pub(super) fn alu_dad(&mut self, value: u16) {
        let (result, carry) = self.regs.hl().overflowing_add(value);
        self.flags.cy = carry;
        self.regs.set_hl(result);
    }

    /// Decimal adjust A after a BCD addition.
    ///
    /// Two corrections are applied in order: +6 on the low nibble when it is
    /// above 9 or AC is set, then +6 on the high nibble (as seen after the
    /// first correction) when it is above 9 or CY is set.
    pub(super) fn alu_daa(&mut self) {
        let mut a = self.regs.a;

        let low = a & 0x0f;
        let ac = if low > 9 || self.flags.ac {
            a = a.wrapping_add(0x06);
            low >= 9
        } else {
            false
        };

        let high = a >> 4;
        let cy = if high > 9 || self.flags.cy {
            a = (high.wrapping_add(6) << 4) | (a & 0x0f);
            true
        } else {
            false
        };

        self.flags.ac = ac;
        self.flags.cy = cy;
        self.flags.set_szp(a);
        self.regs.a = a;
    }

    /// RLC: rotate left, bit 7 goes to both CY and bit 0.
    pub(super) fn alu_rlc(&mut self) {
        let a = self.regs.a;
        self.flags.cy = a & 0x80 != 0;
        self.regs.a = a.rotate_left(1);
    }

    /// RRC: rotate right, bit 0 goes to both CY and bit 7.
    pub(super) fn alu_rrc(&mut self) {
        let a = self.regs.a;
        self.flags.cy = a & 0x01 != 0;
        self.regs.a = a.rotate_right(1);
    }

    /// RAL: rotate left through carry.
    pub(super) fn alu_ral(&mut self) {
        let a = self.regs.a;
        let carry_in = u8::from(self.flags.cy);
        self.flags.cy = a & 0x80 != 0;
        self.regs.a = (a << 1) | carry_in;
    }

    /// RAR: rotate right through carry.
    pub(super) fn alu_rar(&mut self) {
        let a = self.regs.a;
        let carry_in = if self.flags.cy { 0x80 } else { 0 };
        self.flags.cy = a & 0x01 != 0;
        self.regs.a = (a >> 1) | carry_in;
    }
}
