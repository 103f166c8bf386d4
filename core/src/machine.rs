use log::trace;

use crate::error::{Error, Result};
use crate::instruction::from_op;
use crate::keypad::{KeyState, Keypad};
use crate::state::State;
use crate::video::Video;

/// Everything an instruction is allowed to touch: registers and memory,
/// the video surface and the keypad.
pub struct Machine {
    pub state: State,
    pub video: Video,
    pub keypad: Keypad,
}

impl Machine {
    pub fn new() -> Self {
        Machine {
            state: State::new(),
            video: Video::new(),
            keypad: Keypad::new(),
        }
    }

    /// Runs a single fetch/decode/execute cycle.
    /// The pc is moved past the opcode before it is executed.
    pub fn step(&mut self) -> Result<()> {
        let pc = self.state.pc;
        let op = self.state.read_word(pc);
        self.state.opcode = op;
        self.state.pc = pc.wrapping_add(0x2);
        trace!(
            "{:04X} v{:02X?} i{:04X} pc{:04X}",
            op,
            self.state.v,
            self.state.i,
            pc
        );
        let instruction = from_op(&op).ok_or(Error::BadOpcode {
            opcode: op,
            pc,
        })?;
        instruction(&op, self)
    }

    /// Updates a key and hands it to the register waiting on the keypad, if any
    ///
    /// # Arguments
    /// * `key` the index of the key 0..F
    /// * `state` whether it is now up or down
    pub fn set_key(&mut self, key: u8, state: KeyState) -> Result<()> {
        if let Some(register) = self.keypad.set_key(key, state)? {
            self.state.v[register as usize] = key;
        }
        Ok(())
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}
