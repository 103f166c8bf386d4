pub use audio::{Audio, Mute};
pub use chip8::{Chip8, Status};
pub use config::Config;
pub use error::{Error, Result};
pub use keypad::KeyState;
pub use rom::read_rom;
pub use video::FrameBuffer;

pub mod audio;
mod chip8;
pub mod config;
pub mod constants;
pub mod error;
mod instruction;
pub mod keypad;
pub mod machine;
mod opcode;
mod operations;
pub mod rom;
pub mod scheduler;
pub mod state;
pub mod video;
