use std::path::Path;
use std::time::Duration;

use log::{debug, info};

use crate::audio::Audio;
use crate::config::Config;
use crate::error::Result;
use crate::keypad::KeyState;
use crate::machine::Machine;
use crate::rom::read_rom;
use crate::scheduler::Scheduler;
use crate::state::{check_rom, State};
use crate::video::FrameBuffer;

/// Where the engine is in its lifecycle.
/// There is no paused state; callers stop calling `cycle` to stop execution.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Status {
    /// Nothing has run since creation or the last reset
    Idle,
    Running,
    /// The last tick ended in an error
    Halted,
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - the `machine`: registers, memory, the video surface and the keypad
///  - an `audio` gate that is open while the sound timer runs
///  - a `scheduler` pacing instructions and timers against the wall clock
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing the CPU and its timers by elapsed time
/// - inspecting its frame buffer for rendering by some display
pub struct Chip8<A: Audio> {
    machine: Machine,
    audio: A,
    scheduler: Scheduler,
    status: Status,
    playing: bool,
}

impl<A: Audio> Chip8<A> {
    pub fn new(config: Config, audio: A) -> Self {
        info!(
            "running at {} instructions per second",
            config.instructions_per_second
        );
        Chip8 {
            machine: Machine::new(),
            audio,
            scheduler: Scheduler::new(&config),
            status: Status::Idle,
            playing: false,
        }
    }

    /// Replaces the program: wipes memory, reloads the font, copies the ROM and resets.
    /// Nothing changes if the ROM can't be loaded.
    ///
    /// # Arguments
    /// * `rom` the raw program bytes
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<()> {
        check_rom(rom)?;
        self.machine.state.clear_memory();
        self.machine.state.load_rom(rom)?;
        self.machine.video.clear();
        self.reset();
        Ok(())
    }

    /// Load a rom from a file on disk
    pub fn load_rom_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let rom = read_rom(path)?;
        self.load_rom(&rom)
    }

    /// Clears registers, stack, timers and a pending key wait without touching memory
    pub fn reset(&mut self) {
        debug!("reset");
        self.machine.state.reset();
        self.machine.keypad.unlock();
        self.scheduler.reset();
        self.status = Status::Idle;
        self.set_audio(false);
    }

    /// Advances the engine by however much time passed since the previous call
    pub fn cycle(&mut self) -> Result<()> {
        let delta = self.scheduler.elapsed();
        self.tick(delta)
    }

    /// Advances the engine by `delta`
    /// - decrements the timers once per 1/60s banked
    /// - opens or closes the audio gate depending on the sound timer
    /// - runs one instruction per cycle period banked unless a register is waiting on a key
    ///
    /// Stops at the first instruction that fails and returns its error.
    pub fn tick(&mut self, delta: Duration) -> Result<()> {
        self.status = Status::Running;

        self.scheduler.bank_timer_time(delta);
        while self.scheduler.timer_due() {
            self.machine.state.decrement_timers();
        }
        self.set_audio(self.machine.state.sound_timer != 0);

        self.scheduler.bank_cycle_time(delta);
        while self.scheduler.cycle_due() {
            if self.machine.keypad.is_locked() {
                continue;
            }
            if let Err(e) = self.machine.step() {
                self.status = Status::Halted;
                return Err(e);
            }
        }
        Ok(())
    }

    /// Set the state of a key, handing it to a register waiting on the keypad
    ///
    /// # Arguments
    /// * `key` the index of the key 0..F
    /// * `state` whether it is now up or down
    pub fn set_key(&mut self, key: u8, state: KeyState) -> Result<()> {
        self.machine.set_key(key, state)
    }

    /// Returns the FrameBuffer if the display should be redrawn
    pub fn take_frame(&mut self) -> Option<&FrameBuffer> {
        self.machine.video.take_frame()
    }

    pub fn state(&self) -> &State {
        &self.machine.state
    }

    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    fn set_audio(&mut self, play: bool) {
        if play == self.playing {
            return;
        }
        self.playing = play;
        if play {
            debug!("audio on");
            self.audio.play();
        } else {
            debug!("audio off");
            self.audio.pause();
        }
    }
}
