use std::cell::RefCell;
use std::rc::Rc;

use retro8080_cpu::opcodes::rst;
use retro8080_cpu::{Cpu, Memory, Result};
use typed_builder::TypedBuilder;

use crate::shift_register::ShiftRegister;
use crate::{CPU_CLOCK_HZ, FRAME_RATE_HZ, VRAM_SIZE, VRAM_START};

/// Value the board returns for `IN 0` (unused by the game, but read).
const IN0_VALUE: u8 = 0x0e;

/// Bit positions for input port 1 (IN 1).
const IN1_BIT_COIN: u8 = 0;
const IN1_BIT_P2_START: u8 = 1;
const IN1_BIT_P1_START: u8 = 2;
const IN1_BIT_ALWAYS_ONE: u8 = 3;
const IN1_BIT_P1_SHOOT: u8 = 4;
const IN1_BIT_P1_LEFT: u8 = 5;
const IN1_BIT_P1_RIGHT: u8 = 6;

/// Bit positions for input port 2 (IN 2).
///
/// - bits 0–1: number of ships per credit (DIP)
/// - bit 2:    tilt input
/// - bits 4–6: player 2 controls
/// - bit 7:    "display coin info" DIP (0 = show, 1 = hide)
const IN2_BIT_TILT: u8 = 2;
const IN2_BIT_P2_SHOOT: u8 = 4;
const IN2_BIT_P2_LEFT: u8 = 5;
const IN2_BIT_P2_RIGHT: u8 = 6;
const IN2_BIT_COIN_INFO: u8 = 7;

const IN2_MASK_SHIPS_PER_CREDIT: u8 = 0x03;

/// Space Invaders DIP switches read through port 2.
///
/// - `ships_per_credit`: 3–6, encoded in bits 0–1 as `value - 3`.
/// - `show_coin_info`: the ROM treats bit 7 = 1 as "hide coin info".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DipConfig {
    pub ships_per_credit: u8,
    pub show_coin_info: bool,
}

impl Default for DipConfig {
    fn default() -> Self {
        Self {
            ships_per_credit: 3,
            show_coin_info: true,
        }
    }
}

impl DipConfig {
    fn apply_to_port2(&self, in_port2: &mut u8) {
        *in_port2 &= !IN2_MASK_SHIPS_PER_CREDIT;
        *in_port2 &= !(1 << IN2_BIT_COIN_INFO);

        let ships = self.ships_per_credit.clamp(3, 6);
        *in_port2 |= (ships - 3) & IN2_MASK_SHIPS_PER_CREDIT;

        if !self.show_coin_info {
            *in_port2 |= 1 << IN2_BIT_COIN_INFO;
        }
    }
}

/// Board timing and switches.
#[derive(Clone, Copy, Debug, TypedBuilder)]
pub struct MachineConfig {
    #[builder(default = CPU_CLOCK_HZ)]
    pub clock_hz: u32,
    #[builder(default = FRAME_RATE_HZ)]
    pub frame_rate_hz: u32,
    #[builder(default)]
    pub dip: DipConfig,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl MachineConfig {
    pub fn cycles_per_frame(&self) -> u32 {
        self.clock_hz / self.frame_rate_hz.max(1)
    }
}

/// Logical cabinet controls. Mapping host keys onto these is up to the
/// frontend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    Coin,
    P1Start,
    P2Start,
    P1Left,
    P1Right,
    P1Shoot,
    P2Left,
    P2Right,
    P2Shoot,
    /// Latched until the machine is reset.
    Tilt,
}

/// Peripheral state behind the port hooks.
#[derive(Debug)]
struct BoardIo {
    in_port1: u8,
    in_port2: u8,
    out_port3: u8,
    out_port5: u8,
    shift: ShiftRegister,
}

impl Default for BoardIo {
    fn default() -> Self {
        Self {
            in_port1: 1 << IN1_BIT_ALWAYS_ONE,
            in_port2: 0,
            out_port3: 0,
            out_port5: 0,
            shift: ShiftRegister::default(),
        }
    }
}

impl BoardIo {
    fn read(&mut self, port: u8) -> u8 {
        match port {
            0 => IN0_VALUE,
            1 => self.in_port1,
            2 => self.in_port2,
            3 => self.shift.read(),
            _ => {
                log::debug!("read from unmapped port {port}");
                0
            }
        }
    }

    fn write(&mut self, port: u8, value: u8) {
        match port {
            2 => self.shift.set_offset(value),
            3 => self.out_port3 = value,
            4 => self.shift.push(value),
            5 => self.out_port5 = value,
            6 => {
                // watchdog, ignore
            }
            _ => log::debug!("write {value:#04x} to unmapped port {port}"),
        }
    }
}

/// The Space Invaders board: an 8080, 64 KiB of address space and the
/// port-mapped peripherals the game talks to.
pub struct SpaceInvadersMachine {
    cpu: Cpu,
    io: Rc<RefCell<BoardIo>>,
    config: MachineConfig,
    /// Cycles executed into the current frame, including any overshoot
    /// carried over from the previous one.
    frame_cycles: u32,
}

impl SpaceInvadersMachine {
    pub fn new() -> Self {
        Self::with_config(MachineConfig::default())
    }

    pub fn with_config(config: MachineConfig) -> Self {
        let io = Rc::new(RefCell::new(BoardIo::default()));
        let mut cpu = Cpu::new(Memory::default());

        let read_io = Rc::clone(&io);
        cpu.set_read_port(move |port| read_io.borrow_mut().read(port));
        let write_io = Rc::clone(&io);
        cpu.set_write_port(move |port, value| write_io.borrow_mut().write(port, value));

        let mut machine = Self {
            cpu,
            io,
            config,
            frame_cycles: 0,
        };
        machine.apply_dip_config();
        machine
    }

    /// Reset the CPU and peripherals, preserving ROM and RAM contents.
    pub fn reset(&mut self) {
        log::info!("Space Invaders reset");
        self.cpu.reset();
        *self.io.borrow_mut() = BoardIo::default();
        self.frame_cycles = 0;
        self.apply_dip_config();
    }

    /// Load a combined ROM image at 0x0000, where execution starts.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<()> {
        self.cpu.load(rom, 0)?;
        self.cpu.regs.pc = 0x0000;
        log::info!("loaded {} byte ROM", rom.len());
        Ok(())
    }

    /// Run one video frame worth of cycles.
    ///
    /// The board raises RST 1 at mid-screen and RST 2 at vertical blank, so
    /// the frame is run in two halves with a request after each. Returns the
    /// cycles executed.
    pub fn step_frame(&mut self) -> Result<u32> {
        let start = self.frame_cycles;
        let per_frame = self.config.cycles_per_frame();

        self.run_until(per_frame / 2)?;
        self.cpu.request_interrupt(rst(1));

        self.run_until(per_frame)?;
        self.cpu.request_interrupt(rst(2));

        let executed = self.frame_cycles - start;
        self.frame_cycles -= per_frame;
        Ok(executed)
    }

    fn run_until(&mut self, target: u32) -> Result<()> {
        while self.frame_cycles < target {
            self.frame_cycles += self.cpu.step()?;
        }
        Ok(())
    }

    fn apply_dip_config(&mut self) {
        self.config.dip.apply_to_port2(&mut self.io.borrow_mut().in_port2);
    }

    pub fn set_input(&mut self, input: Input, pressed: bool) {
        let mut io = self.io.borrow_mut();
        match input {
            Input::Coin => set_input_bit(&mut io.in_port1, IN1_BIT_COIN, pressed),
            Input::P1Start => set_input_bit(&mut io.in_port1, IN1_BIT_P1_START, pressed),
            Input::P2Start => set_input_bit(&mut io.in_port1, IN1_BIT_P2_START, pressed),
            Input::P1Left => set_input_bit(&mut io.in_port1, IN1_BIT_P1_LEFT, pressed),
            Input::P1Right => set_input_bit(&mut io.in_port1, IN1_BIT_P1_RIGHT, pressed),
            Input::P1Shoot => set_input_bit(&mut io.in_port1, IN1_BIT_P1_SHOOT, pressed),
            Input::P2Left => set_input_bit(&mut io.in_port2, IN2_BIT_P2_LEFT, pressed),
            Input::P2Right => set_input_bit(&mut io.in_port2, IN2_BIT_P2_RIGHT, pressed),
            Input::P2Shoot => set_input_bit(&mut io.in_port2, IN2_BIT_P2_SHOOT, pressed),
            Input::Tilt if pressed => set_input_bit(&mut io.in_port2, IN2_BIT_TILT, true),
            Input::Tilt => {}
        }
    }

    /// Raw video RAM, 0x1c00 bytes starting at 0x2400.
    pub fn video_ram(&self) -> &[u8] {
        &self.cpu.memory().as_slice()[VRAM_START..VRAM_START + VRAM_SIZE]
    }

    /// Current values of the sound latches (OUT 3, OUT 5).
    pub fn outputs(&self) -> (u8, u8) {
        let io = self.io.borrow();
        (io.out_port3, io.out_port5)
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }
}

impl Default for SpaceInvadersMachine {
    fn default() -> Self {
        Self::new()
    }
}

fn set_input_bit(port: &mut u8, bit: u8, pressed: bool) {
    let mask = 1 << bit;
    if pressed {
        *port |= mask;
    } else {
        *port &= !mask;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dip_config_encodes_port2() {
        let mut port = 0xff;
        DipConfig {
            ships_per_credit: 5,
            show_coin_info: true,
        }
        .apply_to_port2(&mut port);
        assert_eq!(port, 0x7e);

        let mut port = 0;
        DipConfig {
            ships_per_credit: 9,
            show_coin_info: false,
        }
        .apply_to_port2(&mut port);
        assert_eq!(port, 0x83);
    }

    #[test]
    fn board_io_routes_ports() {
        let mut io = BoardIo::default();
        assert_eq!(io.read(0), IN0_VALUE);
        assert_eq!(io.read(1), 0x08);
        io.write(4, 0xff);
        io.write(4, 0x00);
        io.write(2, 4);
        assert_eq!(io.read(3), 0x0f);
        io.write(3, 0x12);
        io.write(5, 0x34);
        assert_eq!((io.out_port3, io.out_port5), (0x12, 0x34));
        assert_eq!(io.read(7), 0);
    }

    #[test]
    fn default_config_is_arcade_timing() {
        let config = MachineConfig::default();
        assert_eq!(config.cycles_per_frame(), 33_333);
        let config = MachineConfig::builder().frame_rate_hz(50).build();
        assert_eq!(config.cycles_per_frame(), 40_000);
        assert_eq!(config.dip, DipConfig::default());
    }
}
