//! Memory Access Definitions.
//!
//! Describes the width of a memory access and the kind of operation presented to a
//! cache model.

use std::fmt;

/// Width of a single memory access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessSize {
    /// 1 byte.
    Byte,
    /// 2 bytes.
    Half,
    /// 4 bytes.
    Word,
    /// 8 bytes.
    Double,
}

impl AccessSize {
    /// Number of bytes covered by an access of this width.
    pub const fn bytes(self) -> u64 {
        match self {
            Self::Byte => 1,
            Self::Half => 2,
            Self::Word => 4,
            Self::Double => 8,
        }
    }

    /// Maps a byte count (1, 2, 4 or 8) to an access width.
    ///
    /// # Returns
    ///
    /// `None` for any other byte count.
    pub const fn from_bytes(bytes: u64) -> Option<Self> {
        match bytes {
            1 => Some(Self::Byte),
            2 => Some(Self::Half),
            4 => Some(Self::Word),
            8 => Some(Self::Double),
            _ => None,
        }
    }

    /// Decodes the width encoded in the low two bits of a load/store funct3.
    pub const fn from_funct3(funct3: u32) -> Self {
        match funct3 & 0b11 {
            0 => Self::Byte,
            1 => Self::Half,
            2 => Self::Word,
            _ => Self::Double,
        }
    }
}

impl fmt::Display for AccessSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-byte", self.bytes())
    }
}

/// Kind of operation presented to a cache.
///
/// The cache model does not track dirty lines, so both kinds update recency the
/// same way; the distinction is kept for tracing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheOp {
    /// Instruction fetch or data load.
    Read,
    /// Data store.
    Write,
}
