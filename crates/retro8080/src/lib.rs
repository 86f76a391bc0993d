pub mod diag;

use anyhow::{Context, Result};
use retro8080_invaders::SpaceInvadersMachine;

pub use diag::{run_diag, DiagConfig, DiagReport};

pub enum Command {
    Diag,
    SpaceInvaders { frames: u32 },
}

pub fn run(command: Command, rom_data: &[u8]) -> Result<()> {
    match command {
        Command::Diag => {
            let report = run_diag(rom_data, &DiagConfig::cpudiag())?;
            println!("{}", report.output);
            log::info!("{} steps, {} cycles", report.steps, report.cycles);
        }
        Command::SpaceInvaders { frames } => {
            let summary = run_invaders(rom_data, frames)?;
            println!(
                "ran {} frames ({} cycles), {} pixels lit",
                summary.frames, summary.cycles, summary.lit_pixels
            );
        }
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InvadersSummary {
    pub frames: u32,
    pub cycles: u64,
    pub lit_pixels: u32,
}

/// Run the Space Invaders board headless for `frames` video frames.
pub fn run_invaders(rom_data: &[u8], frames: u32) -> Result<InvadersSummary> {
    let mut machine = SpaceInvadersMachine::new();
    machine.load_rom(rom_data).context("ROM does not fit in memory")?;

    let mut summary = InvadersSummary::default();
    for frame in 0..frames {
        let cycles = machine
            .step_frame()
            .with_context(|| format!("CPU fault in frame {frame} ({})", machine.cpu()))?;
        summary.cycles += cycles as u64;
        summary.frames += 1;
    }
    summary.lit_pixels = machine.video_ram().iter().map(|b| b.count_ones()).sum();
    Ok(summary)
}
