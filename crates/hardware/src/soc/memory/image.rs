//! Initial Memory Image and Dump Range Files.
//!
//! Two small text formats complement the flat binary image:
//! - an init image: whitespace-separated hex `address value` pairs, each value
//!   stored as a 32-bit word before the run starts;
//! - a dump range: a single hex `start end` pair selecting what the memory
//!   report prints.
//!
//! Hex numbers may carry an optional `0x` prefix. Lines starting with `#` are ignored.

use super::MemoryStore;
use crate::common::data::AccessSize;
use crate::common::error::{ConfigError, SimError};

fn parse_hex(token: &str, what: &'static str) -> Result<u64, ConfigError> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    u64::from_str_radix(digits, 16).map_err(|e| ConfigError::Parse {
        what,
        detail: format!("{token:?}: {e}"),
    })
}

fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .filter(|l| !l.trim_start().starts_with('#'))
        .flat_map(str::split_whitespace)
}

/// Parses an init image into `(address, word)` pairs.
///
/// # Errors
///
/// [`ConfigError::Parse`] for a malformed number, a value wider than 32 bits,
/// or an unpaired address.
///
/// # Examples
///
/// ```
/// use rvpipe_core::soc::memory::image::parse_init_image;
///
/// let pairs = parse_init_image("0x100 deadbeef\n104 0x1\n").unwrap();
/// assert_eq!(pairs, vec![(0x100, 0xDEAD_BEEF), (0x104, 1)]);
/// ```
pub fn parse_init_image(text: &str) -> Result<Vec<(u64, u32)>, ConfigError> {
    let toks: Vec<&str> = tokens(text).collect();
    if toks.len() % 2 != 0 {
        return Err(ConfigError::Parse {
            what: "init image",
            detail: format!("{} tokens, expected address/value pairs", toks.len()),
        });
    }
    toks.chunks_exact(2)
        .map(|pair| {
            let addr = parse_hex(pair[0], "init image address")?;
            let value = parse_hex(pair[1], "init image value")?;
            let word = u32::try_from(value).map_err(|_| ConfigError::Parse {
                what: "init image value",
                detail: format!("{:?} does not fit in a 32-bit word", pair[1]),
            })?;
            Ok((addr, word))
        })
        .collect()
}

/// Writes every pair of an init image into memory.
///
/// # Errors
///
/// [`SimError::Config`] for malformed text, [`SimError::Memory`] for an address
/// outside the store.
pub fn apply_init_image(memory: &mut MemoryStore, text: &str) -> Result<usize, SimError> {
    let pairs = parse_init_image(text)?;
    for &(addr, value) in &pairs {
        memory.set(addr, AccessSize::Word, u64::from(value))?;
    }
    tracing::debug!(words = pairs.len(), "applied init image");
    Ok(pairs.len())
}

/// Parses a dump range file holding `start end`.
///
/// # Errors
///
/// [`ConfigError::Parse`] for malformed text, [`ConfigError::DumpRange`] when
/// `end <= start`.
pub fn parse_dump_range(text: &str) -> Result<(u64, u64), ConfigError> {
    let toks: Vec<&str> = tokens(text).collect();
    let [start, end] = toks.as_slice() else {
        return Err(ConfigError::Parse {
            what: "dump range",
            detail: format!("expected `start end`, found {} tokens", toks.len()),
        });
    };
    let start = parse_hex(start, "dump range start")?;
    let end = parse_hex(end, "dump range end")?;
    if end <= start {
        return Err(ConfigError::DumpRange { start, end });
    }
    Ok((start, end))
}
