// crates/powerlink-rs-config/src/pdo/mapping.rs

use crate::od::utils::parse_value;

/// A single PDO mapping entry, parsed from the 64-bit value of a mapping
/// subindex (`16xx`/`1Axx`, subindices `01`..).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PdoMappingEntry {
    /// Object Dictionary index of the object to be mapped.
    pub index: u16,
    /// Object Dictionary sub-index of the object to be mapped.
    pub sub_index: u8,
    /// Offset of the object within the PDO frame, in bits.
    pub offset_bits: u16,
    /// Length of the object in bits.
    pub length_bits: u16,
}

impl PdoMappingEntry {
    /// Deserializes a UNSIGNED64 value from the OD into a mapping entry.
    pub fn from_u64(value: u64) -> Self {
        Self {
            index: (value & 0xFFFF) as u16,
            sub_index: ((value >> 16) & 0xFF) as u8,
            // 8 bits reserved (bits 24-31)
            offset_bits: ((value >> 32) & 0xFFFF) as u16,
            length_bits: ((value >> 48) & 0xFFFF) as u16,
        }
    }

    /// Serializes the mapping entry into a UNSIGNED64 value for storing in the OD.
    pub fn to_u64(&self) -> u64 {
        (self.index as u64)
            | ((self.sub_index as u64) << 16)
            | ((self.offset_bits as u64) << 32)
            | ((self.length_bits as u64) << 48)
    }

    /// Parses the textual OD value (`0x...` or decimal). `None` for values
    /// that are not numbers or do not fit 64 bits.
    pub fn parse(value: &str) -> Option<Self> {
        let raw = parse_value(value)?;
        u64::try_from(raw).ok().map(Self::from_u64)
    }

    /// An all-zero entry marks an unused slot.
    pub fn is_empty(&self) -> bool {
        self.to_u64() == 0
    }

    /// First bit after the mapped object.
    pub fn end_bits(&self) -> u32 {
        u32::from(self.offset_bits) + u32::from(self.length_bits)
    }
}
