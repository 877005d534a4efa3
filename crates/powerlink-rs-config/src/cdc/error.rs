// crates/powerlink-rs-config/src/cdc/error.rs

use core::fmt;

/// Structural problems found while converting CDC text into binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CdcError {
    /// The hex digits do not pair up into bytes.
    OddNibbleCount { count: usize },
    /// Fewer than the 4 bytes of the leading `NumberOfEntries`.
    MissingEntryCount { available: usize },
    /// A record header or its data runs past the end of the stream.
    RecordOverrun {
        offset: usize,
        needed: usize,
        available: usize,
    },
    /// A record inside a `0x1F22` block runs past the end of that block.
    NestedRecordOverrun {
        record_offset: usize,
        offset: usize,
        needed: usize,
        available: usize,
    },
}

impl fmt::Display for CdcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OddNibbleCount { count } => {
                write!(f, "Odd number of hex digits ({}), bytes cannot be packed", count)
            }
            Self::MissingEntryCount { available } => write!(
                f,
                "Stream of {} bytes is too short for NumberOfEntries",
                available
            ),
            Self::RecordOverrun {
                offset,
                needed,
                available,
            } => write!(
                f,
                "Record at byte {} needs {} bytes, only {} left",
                offset, needed, available
            ),
            Self::NestedRecordOverrun {
                record_offset,
                offset,
                needed,
                available,
            } => write!(
                f,
                "Nested record at byte {} of the 1F22 record at byte {} needs {} bytes, only {} left",
                offset, record_offset, needed, available
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CdcError {}
