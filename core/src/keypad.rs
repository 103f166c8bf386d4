use log::debug;

use crate::constants::KEY_COUNT;
use crate::error::{Error, Result};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeyState {
    Up,
    Down,
}

/// # Keypad
/// The 16 keys 0..F and their pressed state.
///
/// A register can be parked on the keypad with `lock`; the next key to go down
/// releases the lock and reports which register should receive the key.
pub struct Keypad {
    keys: [KeyState; KEY_COUNT],
    lock: Option<u8>,
}

impl Keypad {
    pub fn new() -> Self {
        Keypad {
            keys: [KeyState::Up; KEY_COUNT],
            lock: None,
        }
    }

    /// Out of range keys read as up
    pub fn get_key(&self, key: u8) -> KeyState {
        self.keys
            .get(key as usize)
            .copied()
            .unwrap_or(KeyState::Up)
    }

    pub fn is_down(&self, key: u8) -> bool {
        self.get_key(key) == KeyState::Down
    }

    /// Updates the state of a key.
    /// Returns the locked register if this key going down released the lock.
    ///
    /// # Arguments
    /// * `key` the index of the key 0..F
    /// * `state` whether it is now up or down
    pub fn set_key(&mut self, key: u8, state: KeyState) -> Result<Option<u8>> {
        let slot = self
            .keys
            .get_mut(key as usize)
            .ok_or(Error::InvalidArgument("key index out of range"))?;
        let was_up = *slot == KeyState::Up;
        *slot = state;

        if state == KeyState::Down && was_up {
            if let Some(register) = self.lock.take() {
                debug!("key {:X} released lock on V{:X}", key, register);
                return Ok(Some(register));
            }
        }
        Ok(None)
    }

    /// Parks a register until the next key goes down
    pub fn lock(&mut self, register: u8) {
        debug!("V{:X} waiting for a key", register);
        self.lock = Some(register);
    }

    pub fn unlock(&mut self) {
        self.lock = None;
    }

    pub fn is_locked(&self) -> bool {
        self.lock.is_some()
    }
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}
