use std::convert::TryFrom;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use log::debug;

use crate::constants::MAX_ROM_SIZE;
use crate::error::{Error, Result};

/// Reads a ROM file into memory
///
/// # Arguments
/// * `path` the ROM file
pub fn read_rom<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::FileNotFound(path.to_path_buf()),
        _ => Error::Io(e),
    })?;

    // one byte past the limit is enough for check_rom to reject it
    let limit = MAX_ROM_SIZE + 1;
    let len = file.metadata()?.len();
    let size = usize::try_from(len)
        .map_err(|_| Error::OutOfMemory {
            requested: usize::MAX,
        })?
        .min(limit);
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(size)
        .map_err(|_| Error::OutOfMemory { requested: size })?;
    file.take(limit as u64).read_to_end(&mut buffer)?;

    debug!("read {} bytes from {:?}", buffer.len(), path);
    Ok(buffer)
}
