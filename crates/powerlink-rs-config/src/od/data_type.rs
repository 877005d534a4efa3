// crates/powerlink-rs-config/src/od/data_type.rs

use super::utils::parse_index_id;
use alloc::string::String;
use alloc::vec::Vec;

/// A POWERLINK data type definition as listed in a device's `DataTypeList`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataType {
    /// Data type index (e.g. `0x0007` for Unsigned32).
    pub id: u16,
    pub name: String,
    /// Size in bits; `None` for variable length types such as strings or domains.
    pub bit_size: Option<u32>,
}

impl DataType {
    pub fn new(id: u16, name: impl Into<String>, bit_size: Option<u32>) -> Self {
        Self {
            id,
            name: name.into(),
            bit_size,
        }
    }

    /// Size in whole bytes, rounding bit types up.
    pub fn byte_size(&self) -> Option<usize> {
        self.bit_size.map(|bits| bits.div_ceil(8) as usize)
    }
}

// (Reference: EPSG DS 301, Table 38)
const BUILTIN: &[(u16, &str, Option<u32>)] = &[
    (0x0001, "Boolean", Some(1)),
    (0x0002, "Integer8", Some(8)),
    (0x0003, "Integer16", Some(16)),
    (0x0004, "Integer32", Some(32)),
    (0x0005, "Unsigned8", Some(8)),
    (0x0006, "Unsigned16", Some(16)),
    (0x0007, "Unsigned32", Some(32)),
    (0x0008, "Real32", Some(32)),
    (0x0009, "Visible_String", None),
    (0x000A, "Octet_String", None),
    (0x000B, "Unicode_String", None),
    (0x000C, "Time_of_Day", Some(48)),
    (0x000D, "Time_Diff", Some(48)),
    (0x000F, "Domain", None),
    (0x0010, "Integer24", Some(24)),
    (0x0011, "Real64", Some(64)),
    (0x0012, "Integer40", Some(40)),
    (0x0013, "Integer48", Some(48)),
    (0x0014, "Integer56", Some(56)),
    (0x0015, "Integer64", Some(64)),
    (0x0016, "Unsigned24", Some(24)),
    (0x0018, "Unsigned40", Some(40)),
    (0x0019, "Unsigned48", Some(48)),
    (0x001A, "Unsigned56", Some(56)),
    (0x001B, "Unsigned64", Some(64)),
    (0x0401, "MAC_ADDRESS", Some(48)),
    (0x0402, "IP_ADDRESS", Some(32)),
    (0x0403, "NETTIME", Some(64)),
];

/// The data types known to one node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataTypeCollection {
    types: Vec<DataType>,
}

impl DataTypeCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a collection holding the POWERLINK simple types.
    pub fn builtin() -> Self {
        Self {
            types: BUILTIN
                .iter()
                .map(|&(id, name, bits)| DataType::new(id, name, bits))
                .collect(),
        }
    }

    /// Adds a type, replacing any existing definition with the same id.
    pub fn add(&mut self, data_type: DataType) {
        match self.types.iter_mut().find(|t| t.id == data_type.id) {
            Some(existing) => *existing = data_type,
            None => self.types.push(data_type),
        }
    }

    pub fn get(&self, id: u16) -> Option<&DataType> {
        self.types.iter().find(|t| t.id == id)
    }

    /// Case-insensitive lookup by name.
    pub fn get_by_name(&self, name: &str) -> Option<&DataType> {
        self.types
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Resolves a `dataType` attribute, which is either a hex id or a name.
    pub fn resolve(&self, reference: &str) -> Option<&DataType> {
        parse_index_id(reference)
            .ok()
            .and_then(|id| self.get(id))
            .or_else(|| self.get_by_name(reference))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DataType> {
        self.types.iter()
    }
}
