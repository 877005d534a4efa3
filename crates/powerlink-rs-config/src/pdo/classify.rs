// crates/powerlink-rs-config/src/pdo/classify.rs

use crate::types::PdoType;

/// Classifies an index by its two leading hex digits: `14`/`16` are RPDO
/// communication/mapping objects, `18`/`1A` TPDO ones.
pub fn classify(index_id: &str) -> Option<PdoType> {
    let id = index_id.trim();
    let id = id
        .strip_prefix("0x")
        .or_else(|| id.strip_prefix("0X"))
        .unwrap_or(id);
    let lead = id.get(..2)?;
    if lead == "14" || lead == "16" {
        Some(PdoType::Rpdo)
    } else if lead == "18" || lead.eq_ignore_ascii_case("1A") {
        Some(PdoType::Tpdo)
    } else {
        None
    }
}

/// Numeric form of [`classify`] for a 4-digit index.
pub fn classify_id(index: u16) -> Option<PdoType> {
    match index >> 8 {
        0x14 | 0x16 => Some(PdoType::Rpdo),
        0x18 | 0x1A => Some(PdoType::Tpdo),
        _ => None,
    }
}

/// True for the mapping parameter objects (`16xx`, `1Axx`), as opposed to
/// the communication parameters of a channel.
pub fn is_mapping_index(index: u16) -> bool {
    matches!(index >> 8, 0x16 | 0x1A)
}
