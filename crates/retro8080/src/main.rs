use anyhow::{bail, Context, Result};
use retro8080::Command;

const DEFAULT_FRAMES: u32 = 600;

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let system = args.next().unwrap_or_default();
    let rom_path = args.next().unwrap_or_default();

    let command = match system.as_str() {
        "diag" | "cpudiag" => Command::Diag,
        "space_invaders" | "space-invaders" | "invaders" => {
            let frames = match args.next() {
                Some(frames) => frames
                    .parse()
                    .with_context(|| format!("invalid frame count '{frames}'"))?,
                None => DEFAULT_FRAMES,
            };
            Command::SpaceInvaders { frames }
        }
        other => bail!(
            "Unknown system '{other}'.\n\
             Usage: retro8080 <diag|invaders> <rom> [frames]"
        ),
    };

    if rom_path.is_empty() {
        bail!(
            "No ROM path provided.\n\
             For example: retro8080 diag assets/roms/8080_tests/cpudiag.bin"
        );
    }

    log::info!("Loading ROM path: '{}'", rom_path);
    let rom = std::fs::read(&rom_path).with_context(|| format!("Failed to read '{rom_path}'"))?;
    retro8080::run(command, &rom)
}
