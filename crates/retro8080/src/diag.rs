//! Minimal CP/M environment for running 8080 diagnostic programs such as
//! `cpudiag.bin`.
//!
//! Only the two BDOS console calls the diagnostics use are provided. A
//! `CALL 0005h` is intercepted before it executes: with C = 9 the
//! `$`-terminated string at DE is printed, with C = 2 the character in E.
//! `CALL 0000h`, or reaching address 0 (warm boot), ends the program.

use anyhow::{bail, Context, Result};
use retro8080_cpu::memory::DEFAULT_CAPACITY;
use retro8080_cpu::{disassemble, Cpu, Memory};
use typed_builder::TypedBuilder;

const CALL: u8 = 0xcd;
const BDOS_ENTRY: u16 = 0x0005;
const WARM_BOOT: u16 = 0x0000;

const BDOS_PRINT_CHAR: u8 = 0x02;
const BDOS_PRINT_STRING: u8 = 0x09;
const STRING_TERMINATOR: u8 = b'$';

#[derive(Clone, Debug, TypedBuilder)]
pub struct DiagConfig {
    #[builder(default = 0x0100)]
    pub load_address: u16,
    /// Initial SP. Left at 0 when unset; most diagnostics set their own.
    #[builder(default, setter(strip_option))]
    pub stack_pointer: Option<u16>,
    /// Bytes poked into memory after loading, e.g. `(0x0170, 0x07)` to move
    /// cpudiag's stack out of the program.
    #[builder(default)]
    pub patches: Vec<(u16, u8)>,
    /// Added to DE before reading a print-string argument.
    #[builder(default = 3)]
    pub string_offset: u16,
    #[builder(default = 10_000_000)]
    pub max_steps: u64,
    #[builder(default = DEFAULT_CAPACITY)]
    pub memory_size: usize,
}

impl Default for DiagConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl DiagConfig {
    /// Settings for the classic `cpudiag.bin`.
    pub fn cpudiag() -> Self {
        Self::builder().patches(vec![(0x0170, 0x07)]).build()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiagReport {
    /// Console output produced through BDOS calls.
    pub output: String,
    pub steps: u64,
    pub cycles: u64,
}

/// Run `program` to completion under the CP/M shim.
pub fn run_diag(program: &[u8], config: &DiagConfig) -> Result<DiagReport> {
    let mut cpu = Cpu::new(Memory::new(config.memory_size));
    cpu.load(program, config.load_address as usize)
        .context("program does not fit in memory")?;
    for &(address, value) in &config.patches {
        cpu.memory_mut()
            .write(address, value)
            .with_context(|| format!("cannot patch {address:#06x}"))?;
    }
    cpu.regs.pc = config.load_address;
    if let Some(sp) = config.stack_pointer {
        cpu.regs.sp = sp;
    }
    log::info!(
        "running {} byte program at {:#06x}",
        program.len(),
        config.load_address
    );

    let mut report = DiagReport::default();
    loop {
        if report.steps >= config.max_steps {
            log::warn!("step limit reached at PC {:04X}", cpu.regs.pc);
            bail!(
                "no exit after {} steps (PC {:04X})",
                config.max_steps,
                cpu.regs.pc
            );
        }
        report.steps += 1;

        let pc = cpu.regs.pc;
        if pc == WARM_BOOT && report.steps > 1 {
            break;
        }
        match call_target(&cpu)? {
            Some(WARM_BOOT) => break,
            Some(BDOS_ENTRY) => {
                bdos(&cpu, config, &mut report.output)?;
                cpu.regs.pc = pc.wrapping_add(3);
                continue;
            }
            _ => {}
        }

        match cpu.step() {
            Ok(cycles) => report.cycles += cycles as u64,
            Err(err) => {
                let instruction = disassemble(cpu.memory(), pc)
                    .map(|(text, _)| text)
                    .unwrap_or_else(|_| "??".to_string());
                log::warn!("diagnostic stopped: {err} ({cpu})");
                return Err(err)
                    .with_context(|| format!("CPU fault at {pc:04X}: {instruction}"));
            }
        }
    }

    log::info!(
        "program exited after {} steps, {} cycles",
        report.steps,
        report.cycles
    );
    Ok(report)
}

/// Target of the `CALL` at PC, if the next instruction is one.
fn call_target(cpu: &Cpu) -> Result<Option<u16>> {
    let pc = cpu.regs.pc;
    let memory = cpu.memory();
    if memory.read(pc)? != CALL {
        return Ok(None);
    }
    let lo = memory.read(pc.wrapping_add(1))?;
    let hi = memory.read(pc.wrapping_add(2))?;
    Ok(Some(u16::from_le_bytes([lo, hi])))
}

fn bdos(cpu: &Cpu, config: &DiagConfig, output: &mut String) -> Result<()> {
    match cpu.regs.c {
        BDOS_PRINT_STRING => {
            let start = cpu.regs.de() as usize + config.string_offset as usize;
            let tail = cpu
                .memory()
                .as_slice()
                .get(start..)
                .filter(|tail| !tail.is_empty())
                .with_context(|| format!("string address {start:#06x} is outside memory"))?;
            let end = tail
                .iter()
                .position(|&b| b == STRING_TERMINATOR)
                .with_context(|| format!("unterminated string at {start:#06x}"))?;
            let text = &tail[..end];
            output.extend(text.iter().map(|&b| b as char));
        }
        BDOS_PRINT_CHAR => output.push(cpu.regs.e as char),
        function => log::debug!("ignoring BDOS function {function}"),
    }
    Ok(())
}
