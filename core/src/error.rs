use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while loading or running a program
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("unable to allocate {requested} bytes")]
    OutOfMemory { requested: usize },

    #[error("no such file {0:?}")]
    FileNotFound(PathBuf),

    #[error("ROM is too large ({size} bytes), max size is {max} bytes")]
    RomTooLarge { size: usize, max: usize },

    #[error("bad opcode {opcode:#06X} at {pc:#05X}")]
    BadOpcode { opcode: u16, pc: u16 },

    #[error("return with an empty stack at {pc:#05X}")]
    StackUnderflow { pc: u16 },

    #[error("call with a full stack at {pc:#05X}")]
    StackOverflow { pc: u16 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
