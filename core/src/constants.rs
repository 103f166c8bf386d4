/// Size of the addressable memory in bytes
pub const MEMORY_SIZE: usize = 0x1000;
/// Address ROMs are loaded at and the initial program counter
pub const PROGRAM_START: u16 = 0x200;
/// Last address a ROM may occupy
pub const PROGRAM_LIMIT: u16 = 0xFFF;
/// Largest ROM that fits between `PROGRAM_START` and `PROGRAM_LIMIT`
pub const MAX_ROM_SIZE: usize = (PROGRAM_LIMIT - PROGRAM_START) as usize;

/// Number of V registers
pub const REGISTER_COUNT: usize = 16;
/// Depth of the return address stack.
/// Shallower than the 16 levels usually quoted for the Chip-8; kept at 12 on purpose.
pub const STACK_SIZE: usize = 12;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

pub const KEY_COUNT: usize = 16;

/// Countdown timers tick at 60Hz
pub const TIMER_FREQUENCY: u32 = 60;
/// Used when no instruction rate is configured
pub const DEFAULT_INSTRUCTIONS_PER_SECOND: u32 = 700;

/// Address of the built-in hexadecimal font
pub const SPRITE_SHEET_ADDR: usize = 0x000;
/// Bytes per font glyph
pub const SPRITE_HEIGHT: u16 = 5;

/// # Sprite Sheet
/// One 8x5 glyph per hexadecimal digit, only the high nibble of each row is drawn.
/// ```text
/// 0xF0  ####
/// 0x90  #  #
/// 0x90  #  #
/// 0x90  #  #
/// 0xF0  ####
/// ```
#[rustfmt::skip]
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
