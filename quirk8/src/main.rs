use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use quirk8_core::Palette;

mod keymap;
mod run;

#[derive(Parser, Debug)]
#[command(version, about = "A Chip-8 interpreter with an optional quirky streak")]
struct Args {
    /// Chip-8 rom to execute
    rom: PathBuf,

    /// Emulate the divergent historical behavior of the 8xy6, 8xyE, Fx55 and
    /// Fx65 opcodes
    #[arg(long)]
    quirky: bool,

    /// Color for enabled pixels, eight hex digits
    #[arg(long, default_value = "ff14dce6")]
    color_enabled: String,

    /// Color for disabled pixels, eight hex digits
    #[arg(long, default_value = "ff2d9bc8")]
    color_disabled: String,

    /// Window size multiplier per framebuffer pixel
    #[arg(long, default_value_t = 20)]
    scale: u32,

    /// Milliseconds to sleep between cycles
    #[arg(long, default_value_t = 1)]
    delay: u64,
}

fn parse_color(color: &str) -> Result<u32> {
    u32::from_str_radix(color.trim_start_matches("0x"), 16)
        .with_context(|| format!("invalid color {:?}, expected hex digits", color))
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let palette = Palette {
        enabled: parse_color(&args.color_enabled)?,
        disabled: parse_color(&args.color_disabled)?,
    };

    run::run(&args.rom, args.quirky, palette, args.scale, args.delay);
    Ok(())
}
