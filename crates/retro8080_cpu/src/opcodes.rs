//! Static opcode metadata: encoded length and mnemonic template for every
//! opcode byte.
//!
//! Templates use `{d8}` for an immediate byte, `{d16}` for an immediate word
//! and `{addr}` for an address word; see [`crate::disasm`].

/// Immutable description of one opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: u8,
    /// Encoded length in bytes, including the opcode (1..=3).
    pub length: u8,
    pub mnemonic: &'static str,
}

const fn op(opcode: u8, length: u8, mnemonic: &'static str) -> Instruction {
    Instruction {
        opcode,
        length,
        mnemonic,
    }
}

/// Undefined 8080 opcode slots. They decode as one-byte `NOP`s in the table
/// but the CPU refuses to execute them.
pub const UNDEFINED: [u8; 12] = [
    0x08, 0x10, 0x18, 0x20, 0x28, 0x30, 0x38, 0xCB, 0xD9, 0xDD, 0xED, 0xFD,
];

pub const HLT: u8 = 0x76;

/// Opcode of `RST n`, the instruction an interrupting device places on the bus.
pub const fn rst(n: u8) -> u8 {
    0xC7 | ((n & 0x07) << 3)
}

const DEFINED: &[Instruction] = &[
    // 0x
    op(0x00, 1, "NOP"),
    op(0x01, 3, "LXI B, {d16}"),
    op(0x02, 1, "STAX B"),
    op(0x03, 1, "INX B"),
    op(0x04, 1, "INR B"),
    op(0x05, 1, "DCR B"),
    op(0x06, 2, "MVI B, {d8}"),
    op(0x07, 1, "RLC"),
    op(0x09, 1, "DAD B"),
    op(0x0A, 1, "LDAX B"),
    op(0x0B, 1, "DCX B"),
    op(0x0C, 1, "INR C"),
    op(0x0D, 1, "DCR C"),
    op(0x0E, 2, "MVI C, {d8}"),
    op(0x0F, 1, "RRC"),

    // 1x
    op(0x11, 3, "LXI D, {d16}"),
    op(0x12, 1, "STAX D"),
    op(0x13, 1, "INX D"),
    op(0x14, 1, "INR D"),
    op(0x15, 1, "DCR D"),
    op(0x16, 2, "MVI D, {d8}"),
    op(0x17, 1, "RAL"),
    op(0x19, 1, "DAD D"),
    op(0x1A, 1, "LDAX D"),
    op(0x1B, 1, "DCX D"),
    op(0x1C, 1, "INR E"),
    op(0x1D, 1, "DCR E"),
    op(0x1E, 2, "MVI E, {d8}"),
    op(0x1F, 1, "RAR"),

    // 2x
    op(0x21, 3, "LXI H, {d16}"),
    op(0x22, 3, "SHLD {addr}"),
    op(0x23, 1, "INX H"),
    op(0x24, 1, "INR H"),
    op(0x25, 1, "DCR H"),
    op(0x26, 2, "MVI H, {d8}"),
    op(0x27, 1, "DAA"),
    op(0x29, 1, "DAD H"),
    op(0x2A, 3, "LHLD {addr}"),
    op(0x2B, 1, "DCX H"),
    op(0x2C, 1, "INR L"),
    op(0x2D, 1, "DCR L"),
    op(0x2E, 2, "MVI L, {d8}"),
    op(0x2F, 1, "CMA"),

    // 3x
    op(0x31, 3, "LXI SP, {d16}"),
    op(0x32, 3, "STA {addr}"),
    op(0x33, 1, "INX SP"),
    op(0x34, 1, "INR M"),
    op(0x35, 1, "DCR M"),
    op(0x36, 2, "MVI M, {d8}"),
    op(0x37, 1, "STC"),
    op(0x39, 1, "DAD SP"),
    op(0x3A, 3, "LDA {addr}"),
    op(0x3B, 1, "DCX SP"),
    op(0x3C, 1, "INR A"),
    op(0x3D, 1, "DCR A"),
    op(0x3E, 2, "MVI A, {d8}"),
    op(0x3F, 1, "CMC"),

    // 4x
    op(0x40, 1, "MOV B, B"),
    op(0x41, 1, "MOV B, C"),
    op(0x42, 1, "MOV B, D"),
    op(0x43, 1, "MOV B, E"),
    op(0x44, 1, "MOV B, H"),
    op(0x45, 1, "MOV B, L"),
    op(0x46, 1, "MOV B, M"),
    op(0x47, 1, "MOV B, A"),
    op(0x48, 1, "MOV C, B"),
    op(0x49, 1, "MOV C, C"),
    op(0x4A, 1, "MOV C, D"),
    op(0x4B, 1, "MOV C, E"),
    op(0x4C, 1, "MOV C, H"),
    op(0x4D, 1, "MOV C, L"),
    op(0x4E, 1, "MOV C, M"),
    op(0x4F, 1, "MOV C, A"),

    // 5x
    op(0x50, 1, "MOV D, B"),
    op(0x51, 1, "MOV D, C"),
    op(0x52, 1, "MOV D, D"),
    op(0x53, 1, "MOV D, E"),
    op(0x54, 1, "MOV D, H"),
    op(0x55, 1, "MOV D, L"),
    op(0x56, 1, "MOV D, M"),
    op(0x57, 1, "MOV D, A"),
    op(0x58, 1, "MOV E, B"),
    op(0x59, 1, "MOV E, C"),
    op(0x5A, 1, "MOV E, D"),
    op(0x5B, 1, "MOV E, E"),
    op(0x5C, 1, "MOV E, H"),
    op(0x5D, 1, "MOV E, L"),
    op(0x5E, 1, "MOV E, M"),
    op(0x5F, 1, "MOV E, A"),

    // 6x
    op(0x60, 1, "MOV H, B"),
    op(0x61, 1, "MOV H, C"),
    op(0x62, 1, "MOV H, D"),
    op(0x63, 1, "MOV H, E"),
    op(0x64, 1, "MOV H, H"),
    op(0x65, 1, "MOV H, L"),
    op(0x66, 1, "MOV H, M"),
    op(0x67, 1, "MOV H, A"),
    op(0x68, 1, "MOV L, B"),
    op(0x69, 1, "MOV L, C"),
    op(0x6A, 1, "MOV L, D"),
    op(0x6B, 1, "MOV L, E"),
    op(0x6C, 1, "MOV L, H"),
    op(0x6D, 1, "MOV L, L"),
    op(0x6E, 1, "MOV L, M"),
    op(0x6F, 1, "MOV L, A"),

    // 7x
    op(0x70, 1, "MOV M, B"),
    op(0x71, 1, "MOV M, C"),
    op(0x72, 1, "MOV M, D"),
    op(0x73, 1, "MOV M, E"),
    op(0x74, 1, "MOV M, H"),
    op(0x75, 1, "MOV M, L"),
    op(0x76, 1, "HLT"),
    op(0x77, 1, "MOV M, A"),
    op(0x78, 1, "MOV A, B"),
    op(0x79, 1, "MOV A, C"),
    op(0x7A, 1, "MOV A, D"),
    op(0x7B, 1, "MOV A, E"),
    op(0x7C, 1, "MOV A, H"),
    op(0x7D, 1, "MOV A, L"),
    op(0x7E, 1, "MOV A, M"),
    op(0x7F, 1, "MOV A, A"),

    // 8x
    op(0x80, 1, "ADD B"),
    op(0x81, 1, "ADD C"),
    op(0x82, 1, "ADD D"),
    op(0x83, 1, "ADD E"),
    op(0x84, 1, "ADD H"),
    op(0x85, 1, "ADD L"),
    op(0x86, 1, "ADD M"),
    op(0x87, 1, "ADD A"),
    op(0x88, 1, "ADC B"),
    op(0x89, 1, "ADC C"),
    op(0x8A, 1, "ADC D"),
    op(0x8B, 1, "ADC E"),
    op(0x8C, 1, "ADC H"),
    op(0x8D, 1, "ADC L"),
    op(0x8E, 1, "ADC M"),
    op(0x8F, 1, "ADC A"),

    // 9x
    op(0x90, 1, "SUB B"),
    op(0x91, 1, "SUB C"),
    op(0x92, 1, "SUB D"),
    op(0x93, 1, "SUB E"),
    op(0x94, 1, "SUB H"),
    op(0x95, 1, "SUB L"),
    op(0x96, 1, "SUB M"),
    op(0x97, 1, "SUB A"),
    op(0x98, 1, "SBB B"),
    op(0x99, 1, "SBB C"),
    op(0x9A, 1, "SBB D"),
    op(0x9B, 1, "SBB E"),
    op(0x9C, 1, "SBB H"),
    op(0x9D, 1, "SBB L"),
    op(0x9E, 1, "SBB M"),
    op(0x9F, 1, "SBB A"),

    // Ax
    op(0xA0, 1, "ANA B"),
    op(0xA1, 1, "ANA C"),
    op(0xA2, 1, "ANA D"),
    op(0xA3, 1, "ANA E"),
    op(0xA4, 1, "ANA H"),
    op(0xA5, 1, "ANA L"),
    op(0xA6, 1, "ANA M"),
    op(0xA7, 1, "ANA A"),
    op(0xA8, 1, "XRA B"),
    op(0xA9, 1, "XRA C"),
    op(0xAA, 1, "XRA D"),
    op(0xAB, 1, "XRA E"),
    op(0xAC, 1, "XRA H"),
    op(0xAD, 1, "XRA L"),
    op(0xAE, 1, "XRA M"),
    op(0xAF, 1, "XRA A"),

    // Bx
    op(0xB0, 1, "ORA B"),
    op(0xB1, 1, "ORA C"),
    op(0xB2, 1, "ORA D"),
    op(0xB3, 1, "ORA E"),
    op(0xB4, 1, "ORA H"),
    op(0xB5, 1, "ORA L"),
    op(0xB6, 1, "ORA M"),
    op(0xB7, 1, "ORA A"),
    op(0xB8, 1, "CMP B"),
    op(0xB9, 1, "CMP C"),
    op(0xBA, 1, "CMP D"),
    op(0xBB, 1, "CMP E"),
    op(0xBC, 1, "CMP H"),
    op(0xBD, 1, "CMP L"),
    op(0xBE, 1, "CMP M"),
    op(0xBF, 1, "CMP A"),

    // Cx
    op(0xC0, 1, "RNZ"),
    op(0xC1, 1, "POP B"),
    op(0xC2, 3, "JNZ {addr}"),
    op(0xC3, 3, "JMP {addr}"),
    op(0xC4, 3, "CNZ {addr}"),
    op(0xC5, 1, "PUSH B"),
    op(0xC6, 2, "ADI {d8}"),
    op(0xC7, 1, "RST 0"),
    op(0xC8, 1, "RZ"),
    op(0xC9, 1, "RET"),
    op(0xCA, 3, "JZ {addr}"),
    op(0xCC, 3, "CZ {addr}"),
    op(0xCD, 3, "CALL {addr}"),
    op(0xCE, 2, "ACI {d8}"),
    op(0xCF, 1, "RST 1"),

    // Dx
    op(0xD0, 1, "RNC"),
    op(0xD1, 1, "POP D"),
    op(0xD2, 3, "JNC {addr}"),
    op(0xD3, 2, "OUT {d8}"),
    op(0xD4, 3, "CNC {addr}"),
    op(0xD5, 1, "PUSH D"),
    op(0xD6, 2, "SUI {d8}"),
    op(0xD7, 1, "RST 2"),
    op(0xD8, 1, "RC"),
    op(0xDA, 3, "JC {addr}"),
    op(0xDB, 2, "IN {d8}"),
    op(0xDC, 3, "CC {addr}"),
    op(0xDE, 2, "SBI {d8}"),
    op(0xDF, 1, "RST 3"),

    // Ex
    op(0xE0, 1, "RPO"),
    op(0xE1, 1, "POP H"),
    op(0xE2, 3, "JPO {addr}"),
    op(0xE3, 1, "XTHL"),
    op(0xE4, 3, "CPO {addr}"),
    op(0xE5, 1, "PUSH H"),
    op(0xE6, 2, "ANI {d8}"),
    op(0xE7, 1, "RST 4"),
    op(0xE8, 1, "RPE"),
    op(0xE9, 1, "PCHL"),
    op(0xEA, 3, "JPE {addr}"),
    op(0xEB, 1, "XCHG"),
    op(0xEC, 3, "CPE {addr}"),
    op(0xEE, 2, "XRI {d8}"),
    op(0xEF, 1, "RST 5"),

    // Fx
    op(0xF0, 1, "RP"),
    op(0xF1, 1, "POP PSW"),
    op(0xF2, 3, "JP {addr}"),
    op(0xF3, 1, "DI"),
    op(0xF4, 3, "CP {addr}"),
    op(0xF5, 1, "PUSH PSW"),
    op(0xF6, 2, "ORI {d8}"),
    op(0xF7, 1, "RST 6"),
    op(0xF8, 1, "RM"),
    op(0xF9, 1, "SPHL"),
    op(0xFA, 3, "JM {addr}"),
    op(0xFB, 1, "EI"),
    op(0xFC, 3, "CM {addr}"),
    op(0xFE, 2, "CPI {d8}"),
    op(0xFF, 1, "RST 7"),
];

/// Every opcode byte mapped to its descriptor. Slots missing from the
/// defined list fall back to a one-byte `NOP`.
pub static INSTRUCTIONS: [Instruction; 256] = build_table();

const fn build_table() -> [Instruction; 256] {
    let mut table = [op(0x00, 1, "NOP"); 256];
    let mut i = 0;
    while i < table.len() {
        table[i].opcode = i as u8;
        i += 1;
    }
    let mut i = 0;
    while i < DEFINED.len() {
        let instruction = DEFINED[i];
        table[instruction.opcode as usize] = instruction;
        i += 1;
    }
    table
}

#[inline]
pub fn lookup(opcode: u8) -> &'static Instruction {
    &INSTRUCTIONS[opcode as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_indexed_by_opcode() {
        for (i, instruction) in INSTRUCTIONS.iter().enumerate() {
            assert_eq!(instruction.opcode as usize, i);
            assert!((1..=3).contains(&instruction.length));
        }
    }

    #[test]
    fn undefined_slots_default_to_one_byte_nop() {
        for opcode in UNDEFINED {
            let instruction = lookup(opcode);
            assert_eq!(instruction.length, 1);
            assert_eq!(instruction.mnemonic, "NOP");
        }
    }

    #[test]
    fn defined_list_has_no_duplicates() {
        let mut seen = [false; 256];
        for instruction in DEFINED {
            assert!(!seen[instruction.opcode as usize], "{:#04x}", instruction.opcode);
            seen[instruction.opcode as usize] = true;
        }
        assert_eq!(DEFINED.len() + UNDEFINED.len(), 256);
    }

    #[test]
    fn lengths_match_operand_placeholders() {
        for instruction in &INSTRUCTIONS {
            let expected = if instruction.mnemonic.contains("{d8}") {
                2
            } else if instruction.mnemonic.contains("{d16}") || instruction.mnemonic.contains("{addr}") {
                3
            } else {
                1
            };
            assert_eq!(instruction.length, expected, "{}", instruction.mnemonic);
        }
    }

    #[test]
    fn spot_check_entries() {
        assert_eq!(lookup(0xCD).mnemonic, "CALL {addr}");
        assert_eq!(lookup(0x36).mnemonic, "MVI M, {d8}");
        assert_eq!(lookup(0x76).mnemonic, "HLT");
        assert_eq!(lookup(0xF5).mnemonic, "PUSH PSW");
        assert_eq!(lookup(0x7E).mnemonic, "MOV A, M");
        assert_eq!(lookup(0xDB).length, 2);
    }

    #[test]
    fn rst_encodes_vectors() {
        assert_eq!(rst(0), 0xC7);
        assert_eq!(rst(1), 0xCF);
        assert_eq!(rst(2), 0xD7);
        assert_eq!(rst(7), 0xFF);
    }
}
