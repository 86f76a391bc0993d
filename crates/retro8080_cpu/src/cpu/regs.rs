/// Register file of the 8080.
///
/// W and Z are the internal operand latches: instruction fetch loads the
/// first operand byte into Z and the second into W, so `wz()` is the
/// little-endian immediate word of a three-byte instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    pub a: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub w: u8,
    pub z: u8,
    pub sp: u16,
    pub pc: u16,
}

impl Registers {
    #[inline]
    pub fn bc(&self) -> u16 {
        u16::from_be_bytes([self.b, self.c])
    }

    #[inline]
    pub fn set_bc(&mut self, value: u16) {
        [self.b, self.c] = value.to_be_bytes();
    }

    #[inline]
    pub fn de(&self) -> u16 {
        u16::from_be_bytes([self.d, self.e])
    }

    #[inline]
    pub fn set_de(&mut self, value: u16) {
        [self.d, self.e] = value.to_be_bytes();
    }

    #[inline]
    pub fn hl(&self) -> u16 {
        u16::from_be_bytes([self.h, self.l])
    }

    #[inline]
    pub fn set_hl(&mut self, value: u16) {
        [self.h, self.l] = value.to_be_bytes();
    }

    #[inline]
    pub fn wz(&self) -> u16 {
        u16::from_be_bytes([self.w, self.z])
    }

    #[inline]
    pub fn set_wz(&mut self, value: u16) {
        [self.w, self.z] = value.to_be_bytes();
    }
}

#[cfg(test)]
mod tests {
    use super::Registers;

    #[test]
    fn pairs_round_trip_every_value() {
        let mut regs = Registers::default();
        for v in 0..=u16::MAX {
            regs.set_bc(v);
            regs.set_de(v);
            regs.set_hl(v);
            regs.set_wz(v);
            assert_eq!(regs.bc(), v);
            assert_eq!(regs.de(), v);
            assert_eq!(regs.hl(), v);
            assert_eq!(regs.wz(), v);

            let (hi, lo) = ((v >> 8) as u8, v as u8);
            assert_eq!((regs.b, regs.c), (hi, lo));
            assert_eq!((regs.d, regs.e), (hi, lo));
            assert_eq!((regs.h, regs.l), (hi, lo));
            assert_eq!((regs.w, regs.z), (hi, lo));
        }
    }
}
