use log::debug;

use crate::constants::{
    MAX_ROM_SIZE, MEMORY_SIZE, PROGRAM_START, REGISTER_COUNT, SPRITE_SHEET, SPRITE_SHEET_ADDR,
    STACK_SIZE,
};
use crate::error::{Error, Result};

/// The Chip8 registers and memory
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry, borrow and collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter
///
/// Pointer
/// - (sp) the number of return addresses on the stack
///
/// Timers
/// - 2 8-bit timers (delay & sound) counting down to 0 at 60Hz
///
/// ## Memory
/// - 12 return addresses of stack
/// - 4096 bytes of addressable memory
///     - 0x000..0x050 holds the sprite sheet
///     - 0x200..0xFFF holds the program
///
/// Addresses wrap at the end of memory, so reads and writes through `I` never leave it.
#[derive(Clone)]
pub struct State {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: [u16; STACK_SIZE],
    pub memory: [u8; MEMORY_SIZE],
    /// the last opcode fetched
    pub opcode: u16,
}

impl State {
    pub fn new() -> Self {
        let mut state = State {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_SIZE],
            memory: [0; MEMORY_SIZE],
            opcode: 0,
        };
        state.load_font();
        state
    }

    /// Clears registers, stack and timers and points the pc at the start of the program.
    /// Memory is left alone.
    pub fn reset(&mut self) {
        self.v = [0; REGISTER_COUNT];
        self.i = 0;
        self.pc = PROGRAM_START;
        self.sp = 0;
        self.delay_timer = 0;
        self.sound_timer = 0;
        self.stack = [0; STACK_SIZE];
        self.opcode = 0;
    }

    /// Writes the sprite sheet to the start of memory
    pub fn load_font(&mut self) {
        self.memory[SPRITE_SHEET_ADDR..SPRITE_SHEET_ADDR + SPRITE_SHEET.len()]
            .copy_from_slice(&SPRITE_SHEET);
    }

    /// Copies a ROM into memory at `PROGRAM_START`.
    /// Nothing is written unless the whole ROM fits.
    ///
    /// # Arguments
    /// * `rom` the raw program bytes
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<()> {
        check_rom(rom)?;
        let start = PROGRAM_START as usize;
        self.memory[start..start + rom.len()].copy_from_slice(rom);
        debug!("loaded {} byte ROM at {:#05X}", rom.len(), start);
        Ok(())
    }

    /// Zeroes all of memory and reloads the sprite sheet
    pub fn clear_memory(&mut self) {
        self.memory = [0; MEMORY_SIZE];
        self.load_font();
    }

    pub fn read_byte(&self, addr: u16) -> u8 {
        self.memory[addr as usize % MEMORY_SIZE]
    }

    pub fn write_byte(&mut self, addr: u16, value: u8) {
        self.memory[addr as usize % MEMORY_SIZE] = value;
    }

    /// Gets the opcode at `addr`.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    pub fn read_word(&self, addr: u16) -> u16 {
        let left = u16::from(self.read_byte(addr));
        let right = u16::from(self.read_byte(addr.wrapping_add(1)));
        left << 8 | right
    }

    /// Decrements both timers without going below 0
    pub fn decrement_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

/// Makes sure a ROM is loadable before anything is written
pub fn check_rom(rom: &[u8]) -> Result<()> {
    if rom.is_empty() {
        return Err(Error::InvalidArgument("ROM is empty"));
    }
    if rom.len() > MAX_ROM_SIZE {
        return Err(Error::RomTooLarge {
            size: rom.len(),
            max: MAX_ROM_SIZE,
        });
    }
    Ok(())
}
