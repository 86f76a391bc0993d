pub mod machine;
pub mod shift_register;

pub use machine::{DipConfig, Input, MachineConfig, SpaceInvadersMachine};
pub use shift_register::ShiftRegister;

/// Start of video RAM. The frame buffer spans 0x2400-0x3fff.
pub const VRAM_START: usize = 0x2400;
/// Size of video RAM in bytes (224x256 pixels at one bit each).
pub const VRAM_SIZE: usize = 0x1c00;

/// 8080 clock and frame timing for Space Invaders.
pub const CPU_CLOCK_HZ: u32 = 2_000_000;
pub const FRAME_RATE_HZ: u32 = 60;
