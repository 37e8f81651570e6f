//! Main Memory Store.
//!
//! This module implements the byte-addressable backing store. It provides:
//! 1. **Storage:** A flat little-endian byte array mapped at a base address.
//! 2. **Access:** Bounds-checked reads and writes of 1, 2, 4, or 8 bytes.
//! 3. **Initialization:** Bulk image loading and the text init-image format (see [`image`]).
//! 4. **Reporting:** The word-per-column memory dump.
//!
//! Out-of-range accesses are reported as [`MemoryError`] values; the caller
//! decides what a fault means (the pipeline raises an exception).

/// Text formats for initial memory contents and the dump range.
pub mod image;

use std::fmt::Write as _;

use crate::common::constants::DUMP_WORDS_PER_ROW;
use crate::common::data::AccessSize;
use crate::common::error::MemoryError;

/// Byte-addressable memory mapped at `[base, base + size)`.
#[derive(Clone, PartialEq, Eq)]
pub struct MemoryStore {
    base: u64,
    data: Vec<u8>,
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("base", &format_args!("{:#x}", self.base))
            .field("size", &self.data.len())
            .finish()
    }
}

impl MemoryStore {
    /// Creates a zero-filled store.
    ///
    /// # Arguments
    ///
    /// * `base` - Lowest valid address.
    /// * `size` - Size in bytes.
    pub fn new(base: u64, size: u64) -> Self {
        Self {
            base,
            data: vec![0; size as usize],
        }
    }

    /// Lowest valid address.
    pub const fn base(&self) -> u64 {
        self.base
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Translates `[addr, addr + len)` to a byte range of the backing array.
    fn range(&self, addr: u64, len: u64) -> Result<std::ops::Range<usize>, MemoryError> {
        let fault = MemoryError::OutOfBounds { addr, size: len };
        let offset = addr.checked_sub(self.base).ok_or(fault)?;
        let end = offset.checked_add(len).ok_or(fault)?;
        if end > self.size() {
            return Err(fault);
        }
        Ok(offset as usize..end as usize)
    }

    /// Reads `size` bytes at `addr`, little-endian, zero-extended to 64 bits.
    ///
    /// # Errors
    ///
    /// [`MemoryError::OutOfBounds`] if any byte lies outside the store.
    ///
    /// # Examples
    ///
    /// ```
    /// use rvpipe_core::common::AccessSize;
    /// use rvpipe_core::soc::memory::MemoryStore;
    ///
    /// let mut mem = MemoryStore::new(0, 64);
    /// mem.set(8, AccessSize::Word, 0xDEAD_BEEF).unwrap();
    /// assert_eq!(mem.get(8, AccessSize::Half).unwrap(), 0xBEEF);
    /// assert!(mem.get(62, AccessSize::Word).is_err());
    /// ```
    pub fn get(&self, addr: u64, size: AccessSize) -> Result<u64, MemoryError> {
        let range = self.range(addr, size.bytes())?;
        let mut buf = [0u8; 8];
        buf[..range.len()].copy_from_slice(&self.data[range]);
        Ok(u64::from_le_bytes(buf))
    }

    /// Writes the low `size` bytes of `value` at `addr`, little-endian.
    ///
    /// # Errors
    ///
    /// [`MemoryError::OutOfBounds`] if any byte lies outside the store; memory is
    /// left unchanged.
    pub fn set(&mut self, addr: u64, size: AccessSize, value: u64) -> Result<(), MemoryError> {
        let range = self.range(addr, size.bytes())?;
        let len = range.len();
        self.data[range].copy_from_slice(&value.to_le_bytes()[..len]);
        Ok(())
    }

    /// Reads an access whose width is given as a byte count.
    ///
    /// # Errors
    ///
    /// [`MemoryError::UnsupportedWidth`] for widths other than 1, 2, 4, 8, or
    /// [`MemoryError::OutOfBounds`].
    pub fn get_bytes(&self, addr: u64, bytes: u64) -> Result<u64, MemoryError> {
        let size = AccessSize::from_bytes(bytes).ok_or(MemoryError::UnsupportedWidth(bytes))?;
        self.get(addr, size)
    }

    /// Writes an access whose width is given as a byte count.
    ///
    /// # Errors
    ///
    /// As for [`MemoryStore::get_bytes`].
    pub fn set_bytes(&mut self, addr: u64, bytes: u64, value: u64) -> Result<(), MemoryError> {
        let size = AccessSize::from_bytes(bytes).ok_or(MemoryError::UnsupportedWidth(bytes))?;
        self.set(addr, size, value)
    }

    /// Copies `bytes` into memory starting at `addr`.
    ///
    /// # Errors
    ///
    /// [`MemoryError::OutOfBounds`] if the image does not fit; nothing is written.
    pub fn load(&mut self, addr: u64, bytes: &[u8]) -> Result<(), MemoryError> {
        let range = self.range(addr, bytes.len() as u64)?;
        self.data[range].copy_from_slice(bytes);
        Ok(())
    }

    /// Stores a sequence of 32-bit instruction words starting at `addr`.
    ///
    /// # Errors
    ///
    /// [`MemoryError::OutOfBounds`] if the program does not fit.
    pub fn load_words(&mut self, addr: u64, words: &[u32]) -> Result<(), MemoryError> {
        let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
        self.load(addr, &bytes)
    }

    /// Renders `[start, end)` as rows of five 32-bit words.
    ///
    /// Each word prints its bytes in address order (`0x01020304` is the byte
    /// `0x01` at the lowest address). Words that fall outside the store are
    /// skipped, so any range is accepted, up to the top of the address space.
    pub fn dump(&self, start: u64, end: u64) -> String {
        let mut out = String::new();
        let mut next = Some(start);
        while let Some(row) = next.filter(|&a| a < end) {
            let _ = write!(out, "0x{row:08x}:");
            let row_end = row.saturating_add(DUMP_WORDS_PER_ROW * 4).min(end);
            let mut addr = Some(row);
            while let Some(a) = addr.filter(|&a| a < row_end) {
                if let Ok(range) = self.range(a, 4) {
                    out.push_str(" 0x");
                    for byte in &self.data[range] {
                        let _ = write!(out, "{byte:02x}");
                    }
                }
                addr = a.checked_add(4);
            }
            out.push('\n');
            next = addr;
        }
        out
    }
}
