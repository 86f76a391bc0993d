/// The board's external 16-bit shift register.
///
/// The game writes bytes to port 4, which shifts them into the high half of
/// the register, picks a bit offset through port 2, and reads the shifted
/// window back from port 3. It exists because the 8080 has no barrel shifter.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ShiftRegister {
    value: u16,
    offset: u8,
}

impl ShiftRegister {
    /// OUT 4: the previous high byte moves to the low half.
    pub fn push(&mut self, data: u8) {
        self.value = (self.value >> 8) | ((data as u16) << 8);
    }

    /// OUT 2: only bits 0-2 are wired.
    pub fn set_offset(&mut self, offset: u8) {
        self.offset = offset & 0x07;
    }

    /// IN 3: eight bits starting `offset` bits below the top of the register.
    pub fn read(&self) -> u8 {
        (self.value >> (8 - self.offset)) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::ShiftRegister;

    #[test]
    fn zero_offset_reads_last_byte_written() {
        let mut shift = ShiftRegister::default();
        shift.push(0xab);
        shift.push(0xcd);
        assert_eq!(shift.read(), 0xcd);
    }

    #[test]
    fn offset_pulls_bits_from_older_byte() {
        let mut shift = ShiftRegister::default();
        shift.push(0xab);
        shift.push(0xcd);
        shift.set_offset(3);
        // 0xcdab << 3 -> high byte 0x6d.
        assert_eq!(shift.read(), 0x6d);
        shift.set_offset(7);
        assert_eq!(shift.read(), 0xd5);
    }

    #[test]
    fn offset_ignores_upper_bits() {
        let mut shift = ShiftRegister::default();
        shift.push(0x80);
        shift.set_offset(0xf9);
        assert_eq!(shift.read(), 0x00);
        shift.push(0x01);
        // offset 1: (0x0180 >> 7) & 0xff
        assert_eq!(shift.read(), 0x03);
    }
}
