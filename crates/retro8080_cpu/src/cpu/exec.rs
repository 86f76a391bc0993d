mod alu;
mod control;
mod incdec;
mod ld;
mod stack;
mod system;

use super::Cpu;
use crate::error::Result;

/// Instruction handler. Returns cycles spent beyond the entry's base cost,
/// which is non-zero only for a taken conditional CALL or RET.
type Exec = fn(&mut Cpu) -> Result<u32>;

/// One slot of the dispatch table.
#[derive(Clone, Copy)]
struct Handler {
    exec: Exec,
    cycles: u32,
}

const fn h(exec: Exec, cycles: u32) -> Handler {
    Handler { exec, cycles }
}

/// Extra cycles of a conditional CALL or RET whose condition holds.
const TAKEN_PENALTY: u32 = 6;

/// Dense dispatch table indexed by opcode.
static HANDLERS: [Handler; 256] = build_handlers();

const fn build_handlers() -> [Handler; 256] {
    let mut table = [h(Cpu::exec_unimplemented, 0); 256];
    let mut i = 0;
    while i < table.len() {
        table[i] = handler_for(i as u8);
        i += 1;
    }
    table
}

/// Map an opcode to its handler family and base cycle cost.
///
/// Variants that take a memory operand (M) are slower; the cost is folded in
/// here so handlers only report the taken-branch penalty.
const fn handler_for(op: u8) -> Handler {
    let src_is_m = op & 0x07 == 0x06;
    let dst_is_m = (op >> 3) & 0x07 == 0x06;
    match op {
        // Undefined slots and HLT.
        0x08 | 0x10 | 0x18 | 0x20 | 0x28 | 0x30 | 0x38 => h(Cpu::exec_unimplemented, 0),
        0xCB | 0xD9 | 0xDD | 0xED | 0xFD => h(Cpu::exec_unimplemented, 0),
        0x76 => h(Cpu::exec_unimplemented, 0),

        0x00 => h(Cpu::exec_nop, 4),

        // 16-bit loads and stores.
        op if op & 0xCF == 0x01 => h(Cpu::exec_lxi, 10),
        0x02 | 0x12 => h(Cpu::exec_stax, 7),
        0x0A | 0x1A => h(Cpu::exec_ldax, 7),
        0x22 => h(Cpu::exec_shld, 16),
        0x2A => h(Cpu::exec_lhld, 16),
        0x32 => h(Cpu::exec_sta, 13),
        0x3A => h(Cpu::exec_lda, 13),

        // 16-bit INX/DCX/DAD.
        op if op & 0xCF == 0x03 => h(Cpu::exec_inx, 5),
        op if op & 0xCF == 0x0B => h(Cpu::exec_dcx, 5),
        op if op & 0xCF == 0x09 => h(Cpu::exec_dad, 10),

        // 8-bit INR/DCR/MVI.
        op if op & 0xC7 == 0x04 => h(Cpu::exec_inr, if dst_is_m { 10 } else { 5 }),
        op if op & 0xC7 == 0x05 => h(Cpu::exec_dcr, if dst_is_m { 10 } else { 5 }),
        op if op & 0xC7 == 0x06 => h(Cpu::exec_mvi, if dst_is_m { 10 } else { 7 }),

        // Accumulator rotates and flag/BCD operations.
        0x07 => h(Cpu::exec_rlc, 4),
        0x0F => h(Cpu::exec_rrc, 4),
        0x17 => h(Cpu::exec_ral, 4),
        0x1F => h(Cpu::exec_rar, 4),
        0x27 => h(Cpu::exec_daa, 4),
        0x2F => h(Cpu::exec_cma, 4),
        0x37 => h(Cpu::exec_stc, 4),
        0x3F => h(Cpu::exec_cmc, 4),

        // MOV r1,r2 (40-7F, HLT handled above).
        0x40..=0x7F => h(Cpu::exec_mov, if src_is_m || dst_is_m { 7 } else { 5 }),

        // ADD/ADC/SUB/SBB/ANA/XRA/ORA/CMP r.
        0x80..=0xBF => h(Cpu::exec_alu_reg, if src_is_m { 7 } else { 4 }),

        // Branches.
        0xC3 => h(Cpu::exec_jmp, 10),
        0xCD => h(Cpu::exec_call, 17),
        0xC9 => h(Cpu::exec_ret, 10),
        0xE9 => h(Cpu::exec_pchl, 5),
        op if op & 0xC7 == 0xC2 => h(Cpu::exec_jcc, 10),
        op if op & 0xC7 == 0xC4 => h(Cpu::exec_ccc, 11),
        op if op & 0xC7 == 0xC0 => h(Cpu::exec_rcc, 5),
        op if op & 0xC7 == 0xC7 => h(Cpu::exec_rst, 11),

        // Immediate accumulator operations.
        op if op & 0xC7 == 0xC6 => h(Cpu::exec_alu_imm, 7),

        // Stack and exchange.
        op if op & 0xCF == 0xC5 => h(Cpu::exec_push, 11),
        op if op & 0xCF == 0xC1 => h(Cpu::exec_pop, 10),
        0xE3 => h(Cpu::exec_xthl, 18),
        0xEB => h(Cpu::exec_xchg, 4),
        0xF9 => h(Cpu::exec_sphl, 5),

        // I/O and interrupt control.
        0xD3 => h(Cpu::exec_out, 10),
        0xDB => h(Cpu::exec_in, 10),
        0xF3 => h(Cpu::exec_di, 4),
        0xFB => h(Cpu::exec_ei, 4),

        _ => h(Cpu::exec_unimplemented, 0),
    }
}

impl Cpu {
    /// Execute the instruction in IR and return its cycle count.
    pub(super) fn execute(&mut self) -> Result<u32> {
        let handler = HANDLERS[self.ir as usize];
        let extra = (handler.exec)(self)?;
        Ok(handler.cycles + extra)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opcodes::{self, HLT, UNDEFINED};

    #[test]
    fn only_undefined_slots_and_hlt_are_unimplemented() {
        for op in 0..=255u8 {
            let unimplemented = HANDLERS[op as usize].cycles == 0;
            let expected = op == HLT || UNDEFINED.contains(&op);
            assert_eq!(
                unimplemented,
                expected,
                "{:#04x} {}",
                op,
                opcodes::lookup(op).mnemonic
            );
        }
    }

    #[test]
    fn memory_operand_variants_cost_more() {
        assert_eq!(HANDLERS[0x41].cycles, 5); // MOV B,C
        assert_eq!(HANDLERS[0x46].cycles, 7); // MOV B,M
        assert_eq!(HANDLERS[0x70].cycles, 7); // MOV M,B
        assert_eq!(HANDLERS[0x80].cycles, 4); // ADD B
        assert_eq!(HANDLERS[0x86].cycles, 7); // ADD M
        assert_eq!(HANDLERS[0x04].cycles, 5); // INR B
        assert_eq!(HANDLERS[0x34].cycles, 10); // INR M
        assert_eq!(HANDLERS[0x06].cycles, 7); // MVI B
        assert_eq!(HANDLERS[0x36].cycles, 10); // MVI M
    }
}
