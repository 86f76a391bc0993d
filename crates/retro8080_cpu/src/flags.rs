use bitflags::bitflags;

bitflags! {
    /// Bit layout of the packed flags byte (the low half of PSW).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FlagBits: u8 {
        const CARRY = 0x01;
        /// Hardware-fixed bit, always reads as 1.
        const FIXED = 0x02;
        const PARITY = 0x04;
        const AUX_CARRY = 0x10;
        const ZERO = 0x40;
        const SIGN = 0x80;
    }
}

/// CPU flags for Intel 8080.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Flags {
    pub s: bool,  // sign
    pub z: bool,  // zero
    pub ac: bool, // auxiliary carry
    pub p: bool,  // parity
    pub cy: bool, // carry
}

impl Flags {
    /// Pack into the PSW byte: bit 1 set, bits 3 and 5 clear.
    pub fn bits(self) -> u8 {
        let mut f = FlagBits::FIXED;
        f.set(FlagBits::SIGN, self.s);
        f.set(FlagBits::ZERO, self.z);
        f.set(FlagBits::AUX_CARRY, self.ac);
        f.set(FlagBits::PARITY, self.p);
        f.set(FlagBits::CARRY, self.cy);
        f.bits()
    }

    /// Unpack a PSW byte. The fixed bits of `value` are ignored.
    pub fn set_bits(&mut self, value: u8) {
        let f = FlagBits::from_bits_truncate(value);
        self.s = f.contains(FlagBits::SIGN);
        self.z = f.contains(FlagBits::ZERO);
        self.ac = f.contains(FlagBits::AUX_CARRY);
        self.p = f.contains(FlagBits::PARITY);
        self.cy = f.contains(FlagBits::CARRY);
    }

    /// Set zero, sign and parity from an 8-bit result.
    pub(crate) fn set_szp(&mut self, value: u8) {
        self.z = value == 0;
        self.s = value & 0x80 != 0;
        self.p = parity(value);
    }
}

impl From<u8> for Flags {
    fn from(value: u8) -> Self {
        let mut flags = Flags::default();
        flags.set_bits(value);
        flags
    }
}

impl From<Flags> for u8 {
    fn from(flags: Flags) -> Self {
        flags.bits()
    }
}

/// True when `value` has an even number of set bits.
pub fn parity(value: u8) -> bool {
    value.count_ones() % 2 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleared_flags_pack_to_fixed_bit_only() {
        assert_eq!(Flags::default().bits(), 0x02);
    }

    #[test]
    fn all_flags_pack_without_bits_3_and_5() {
        let flags = Flags {
            s: true,
            z: true,
            ac: true,
            p: true,
            cy: true,
        };
        assert_eq!(flags.bits(), 0xd7);
    }

    #[test]
    fn unpack_ignores_fixed_bits() {
        let flags = Flags::from(0xff);
        assert_eq!(flags.bits(), 0xd7);

        let flags = Flags::from(0x28);
        assert_eq!(flags, Flags::default());
        assert_eq!(flags.bits(), 0x02);
    }

    #[test]
    fn every_combination_round_trips() {
        for combo in 0u8..32 {
            let flags = Flags {
                s: combo & 0x01 != 0,
                z: combo & 0x02 != 0,
                ac: combo & 0x04 != 0,
                p: combo & 0x08 != 0,
                cy: combo & 0x10 != 0,
            };
            let packed = flags.bits();
            assert_eq!(packed & 0x02, 0x02);
            assert_eq!(packed & 0x28, 0);
            assert_eq!(Flags::from(packed), flags);
            assert_eq!(Flags::from(packed).bits(), packed);
        }
    }

    #[test]
    fn parity_matches_even_bit_count() {
        for b in 0..=255u8 {
            let mut ones = 0;
            let mut v = b;
            while v != 0 {
                ones += v & 1;
                v >>= 1;
            }
            assert_eq!(parity(b), ones % 2 == 0, "value {b:#04x}");
        }
        assert!(parity(0));
    }
}
