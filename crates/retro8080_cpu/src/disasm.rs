//! Render instructions as text from the opcode table's mnemonic templates.

use crate::error::MemoryError;
use crate::memory::Memory;
use crate::opcodes::{self, Instruction};

/// Substitute operand bytes into an instruction's template.
///
/// `z` is the first operand byte and `w` the second, matching the CPU's
/// operand latches.
pub fn render(instruction: &Instruction, z: u8, w: u8) -> String {
    let word = u16::from_be_bytes([w, z]);
    instruction
        .mnemonic
        .replace("{d8}", &format!("${z:02X}"))
        .replace("{d16}", &format!("${word:04X}"))
        .replace("{addr}", &format!("${word:04X}"))
}

/// Disassemble the instruction stored at `address`.
///
/// Returns the text and the instruction's length in bytes.
pub fn disassemble(memory: &Memory, address: u16) -> Result<(String, u8), MemoryError> {
    let instruction = opcodes::lookup(memory.read(address)?);
    let z = if instruction.length > 1 {
        memory.read(address.wrapping_add(1))?
    } else {
        0
    };
    let w = if instruction.length > 2 {
        memory.read(address.wrapping_add(2))?
    } else {
        0
    };
    Ok((render(instruction, z, w), instruction.length))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_each_operand_kind() {
        let mut memory = Memory::default();
        memory
            .load(&[0x3e, 0x7f, 0x21, 0x34, 0x12, 0xcd, 0x05, 0x00, 0x78], 0)
            .unwrap();

        assert_eq!(disassemble(&memory, 0).unwrap(), ("MVI A, $7F".to_string(), 2));
        assert_eq!(disassemble(&memory, 2).unwrap(), ("LXI H, $1234".to_string(), 3));
        assert_eq!(disassemble(&memory, 5).unwrap(), ("CALL $0005".to_string(), 3));
        assert_eq!(disassemble(&memory, 8).unwrap(), ("MOV A, B".to_string(), 1));
    }

    #[test]
    fn operand_past_end_of_memory_is_an_error() {
        let mut memory = Memory::new(4);
        memory.load(&[0x00, 0x00, 0x00, 0xc3], 0).unwrap();
        assert!(disassemble(&memory, 3).is_err());
    }
}
