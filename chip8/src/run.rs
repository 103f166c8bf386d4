use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Context;
use log::{error, info};
use sdl2::event::Event;
use sdl2::keyboard::Scancode;
use sdl2::EventPump;

use crate::audio::Beeper;
use crate::keymap::keymap;
use chip8_core::{Audio, Chip8, Config, KeyState, Mute};
use chip8_display::Display;

/// How often the host polls input, runs the engine and presents a frame
const FRAME_RATE: u32 = 60;

pub struct Options {
    pub rom: PathBuf,
    pub instructions_per_second: u32,
    pub scale: u32,
    pub mute: bool,
}

/// Opens the window and audio device and runs the ROM until the window is closed.
/// SDL subsystems are shut down when their handles drop, on every exit path.
pub fn run(options: &Options) -> anyhow::Result<()> {
    let sdl = sdl2::init().map_err(anyhow::Error::msg)?;
    let display = Display::new(&sdl, options.scale).map_err(anyhow::Error::msg)?;
    let events = sdl.event_pump().map_err(anyhow::Error::msg)?;
    let config = Config::new(options.instructions_per_second);

    if options.mute {
        host(Chip8::new(config, Mute), &options.rom, display, events)
    } else {
        let beeper = Beeper::new(&sdl).map_err(anyhow::Error::msg)?;
        host(Chip8::new(config, beeper), &options.rom, display, events)
    }
}

fn host<A: Audio>(
    mut chip8: Chip8<A>,
    rom: &Path,
    mut display: Display,
    mut events: EventPump,
) -> anyhow::Result<()> {
    chip8
        .load_rom_file(rom)
        .with_context(|| format!("unable to load ROM {:?}", rom))?;
    info!("successfully loaded ROM {:?}", rom);

    let frame_time = Duration::from_secs(1) / FRAME_RATE;

    'event: loop {
        let frame_start = Instant::now();

        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    scancode: Some(Scancode::Escape),
                    ..
                } => break 'event,
                Event::KeyDown {
                    scancode: Some(code),
                    repeat: false,
                    ..
                } => {
                    if let Some(key) = keymap(code) {
                        chip8.set_key(key, KeyState::Down)?;
                    }
                }
                Event::KeyUp {
                    scancode: Some(code),
                    ..
                } => {
                    if let Some(key) = keymap(code) {
                        chip8.set_key(key, KeyState::Up)?;
                    }
                }
                _ => continue,
            };
        }

        // Update state
        if let Err(e) = chip8.cycle() {
            error!("halting: {}", e);
            return Err(e.into());
        }

        // If the draw flag is set, unset it and render the current frame
        if let Some(frame) = chip8.take_frame() {
            display.render(frame).map_err(anyhow::Error::msg)?;
        }

        // Handle timing
        let elapsed = frame_start.elapsed();
        if frame_time > elapsed {
            std::thread::sleep(frame_time - elapsed);
        }
    }

    info!("window closed");
    Ok(())
}
