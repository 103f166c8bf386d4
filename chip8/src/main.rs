//! Desktop frontend for the CHIP-8 engine.
//!
//! ```bash
//! chip8 roms/pong.ch8 --ips 700 --scale 10
//! ```
//!
//! The keypad is on the left of the keyboard (1234/QWER/ASDF/ZXCV), Escape quits.

use std::path::PathBuf;

use clap::Parser;

use chip8_core::constants::DEFAULT_INSTRUCTIONS_PER_SECOND;
use chip8_display::DEFAULT_SCALE;

mod audio;
mod keymap;
mod run;

#[derive(Parser, Debug)]
#[command(version, about = "A CHIP-8 emulator", long_about = None)]
struct Args {
    /// Path to the ROM file to run
    rom: PathBuf,

    /// Instructions per second, 0 for the default
    #[arg(short, long, default_value_t = DEFAULT_INSTRUCTIONS_PER_SECOND)]
    ips: u32,

    /// Size multiplier for each pixel
    #[arg(short, long, default_value_t = DEFAULT_SCALE)]
    scale: u32,

    /// Don't open an audio device
    #[arg(short, long)]
    mute: bool,

    /// Log engine events
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    run::run(&run::Options {
        rom: args.rom,
        instructions_per_second: args.ips,
        scale: args.scale,
        mute: args.mute,
    })
}
