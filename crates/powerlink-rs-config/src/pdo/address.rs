// crates/powerlink-rs-config/src/pdo/address.rs

use crate::log::my_warn;
use crate::od::constants::{IDX_PI_END, IDX_PI_START};
use crate::pi::IecDatatype;
use crate::types::{Direction, PI_SUBINDEX_SLOTS};
use core::fmt;

/// Location of a process-image variable in the MN's Object Dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PiAddress {
    pub index: u16,
    pub sub_index: u8,
}

impl fmt::Display for PiAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}/{:02X}", self.index, self.sub_index)
    }
}

/// Base index of each (datatype, direction) window, in ascending order.
const PI_INDEX_TABLE: &[(u16, IecDatatype, Direction)] = &[
    (0xA000, IecDatatype::Sint, Direction::Output),
    (0xA040, IecDatatype::Usint, Direction::Output),
    (0xA0C0, IecDatatype::Int, Direction::Output),
    (0xA100, IecDatatype::Uint, Direction::Output),
    (0xA1C0, IecDatatype::Dint, Direction::Output),
    (0xA200, IecDatatype::Udint, Direction::Output),
    (0xA240, IecDatatype::Real, Direction::Output),
    (0xA400, IecDatatype::Lint, Direction::Output),
    (0xA440, IecDatatype::Ulint, Direction::Output),
    (0xA480, IecDatatype::Sint, Direction::Input),
    (0xA4C0, IecDatatype::Usint, Direction::Input),
    (0xA540, IecDatatype::Int, Direction::Input),
    (0xA580, IecDatatype::Uint, Direction::Input),
    (0xA640, IecDatatype::Dint, Direction::Input),
    (0xA680, IecDatatype::Udint, Direction::Input),
    (0xA6C0, IecDatatype::Real, Direction::Input),
    (0xA880, IecDatatype::Lint, Direction::Input),
    (0xA8C0, IecDatatype::Ulint, Direction::Input),
];

/// Width of the last window, which has no successor to bound it.
const LAST_WINDOW_SPAN: u16 = 0x40;

/// Maps a variable to its MN object from the running byte offset of its
/// (datatype, direction) window.
///
/// Each index holds 252 variables in subindices `01`-`FC`; once a window's
/// first index is full the next index is used. Returns `None` for types
/// without a window (bit strings, 64-bit reals, ...).
pub fn assign_pi_address(
    data_type: IecDatatype,
    direction: Direction,
    linear_offset: u32,
) -> Option<PiAddress> {
    let &(base, _, _) = PI_INDEX_TABLE
        .iter()
        .find(|(_, dt, dir)| *dt == data_type && *dir == direction)?;
    let byte_size = data_type.bit_size()? / 8;
    if byte_size == 0 {
        return None;
    }
    let slot = linear_offset / byte_size;
    let index_step = slot / PI_SUBINDEX_SLOTS;
    let sub_index = (slot % PI_SUBINDEX_SLOTS) + 1;
    let index = u16::try_from(u32::from(base) + index_step).ok()?;
    Some(PiAddress {
        index,
        sub_index: sub_index as u8,
    })
}

/// The table window an index belongs to: the entry at or before it, up to
/// the next entry's base.
fn window_of(index: u16) -> Option<IecDatatype> {
    let pos = PI_INDEX_TABLE.iter().rposition(|(base, _, _)| *base <= index)?;
    let end = PI_INDEX_TABLE
        .get(pos + 1)
        .map(|(base, _, _)| *base)
        .unwrap_or(PI_INDEX_TABLE[pos].0 + LAST_WINDOW_SPAN);
    (index < end).then_some(PI_INDEX_TABLE[pos].1)
}

/// Short type tag used in MN process-image object names, e.g. `"U8"`.
pub fn pi_name(index: u16) -> &'static str {
    match window_of(index) {
        Some(IecDatatype::Sint) => "I8",
        Some(IecDatatype::Usint) => "U8",
        Some(IecDatatype::Int) => "I16",
        Some(IecDatatype::Uint) => "U16",
        Some(IecDatatype::Dint) => "I32",
        Some(IecDatatype::Udint) => "U32",
        Some(IecDatatype::Lint) => "I64",
        Some(IecDatatype::Ulint) => "U64",
        _ => {
            my_warn!("[PDO] Index {:04X} is not in a process-image window.", index);
            "Err"
        }
    }
}

/// OD datatype name of the variables stored under `index`.
pub fn pi_data_type_name(index: u16) -> &'static str {
    match window_of(index) {
        Some(IecDatatype::Sint) => "Integer8",
        Some(IecDatatype::Usint) => "Unsigned8",
        Some(IecDatatype::Int) => "Integer16",
        Some(IecDatatype::Uint) => "Unsigned16",
        Some(IecDatatype::Dint) => "Integer32",
        Some(IecDatatype::Udint) => "Unsigned32",
        Some(IecDatatype::Lint) => "Integer64",
        Some(IecDatatype::Ulint) => "Unsigned64",
        _ => "Error",
    }
}

pub fn is_process_image_index(index: u16) -> bool {
    (IDX_PI_START..=IDX_PI_END).contains(&index)
}
