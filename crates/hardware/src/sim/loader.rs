//! Program Loader.
//!
//! This module builds the initial memory image of a run. It performs:
//! 1. **Binary loading:** Reads a flat binary from disk.
//! 2. **Placement:** Copies the bytes into a fresh memory store at the configured base.
//! 3. **Init image:** Applies the optional `address value` file on top.

use std::fs;
use std::path::Path;

use crate::common::error::SimError;
use crate::config::Config;
use crate::soc::memory::MemoryStore;
use crate::soc::memory::image::{apply_init_image, parse_dump_range};

/// Loads a binary file from disk into a byte vector.
///
/// # Arguments
///
/// * `path` - Path to the binary file.
///
/// # Returns
///
/// The raw bytes of the file.
///
/// # Errors
///
/// [`SimError::Io`] if the file cannot be read.
pub fn load_binary(path: &Path) -> Result<Vec<u8>, SimError> {
    fs::read(path).map_err(|e| SimError::io(path.display().to_string(), e))
}

/// Builds the memory store for a run from an in-memory image.
///
/// The configuration is validated before the store is allocated. The image is
/// placed at `config.memory.base`; if an init image is configured it is read
/// and applied afterwards.
///
/// # Errors
///
/// [`SimError::Config`] for an invalid configuration, [`SimError::Memory`] if
/// the image does not fit, or any error from reading or applying the init image.
pub fn build_memory(config: &Config, image: &[u8]) -> Result<MemoryStore, SimError> {
    config.validate()?;
    let mut memory = MemoryStore::new(config.memory.base, config.memory.size);
    memory.load(config.memory.base, image)?;
    tracing::info!(
        bytes = image.len(),
        base = format_args!("{:#x}", config.memory.base),
        "program loaded"
    );
    if let Some(path) = &config.memory.init_image {
        let text =
            fs::read_to_string(path).map_err(|e| SimError::io(path.display().to_string(), e))?;
        let _ = apply_init_image(&mut memory, &text)?;
    }
    Ok(memory)
}

/// Reads a binary from disk and builds the memory store for it.
///
/// # Errors
///
/// See [`load_binary`] and [`build_memory`].
pub fn load_program(config: &Config, path: &Path) -> Result<MemoryStore, SimError> {
    let image = load_binary(path)?;
    build_memory(config, &image)
}

/// Reads a dump range file (`start end` in hex).
///
/// # Errors
///
/// [`SimError::Io`] if the file cannot be read, [`SimError::Config`] if it does
/// not hold a valid range.
pub fn load_dump_range(path: &Path) -> Result<(u64, u64), SimError> {
    let text = fs::read_to_string(path).map_err(|e| SimError::io(path.display().to_string(), e))?;
    Ok(parse_dump_range(&text)?)
}
