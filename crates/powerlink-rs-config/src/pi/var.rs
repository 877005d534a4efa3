// crates/powerlink-rs-config/src/pi/var.rs

use crate::od::DataType;
use crate::pdo::PiAddress;
use crate::types::Direction;
use alloc::format;
use alloc::string::String;

/// IEC 61131-3 elementary types used in process-image descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IecDatatype {
    Bitstring,
    Bool,
    Byte,
    Char,
    Dword,
    Lword,
    Sint,
    Int,
    Dint,
    Lint,
    Usint,
    Uint,
    Udint,
    Ulint,
    Real,
    Lreal,
    String,
    Wstring,
}

impl IecDatatype {
    /// Parses an IEC type name. `WORD` is treated as `BYTE`.
    pub fn parse(s: &str) -> Option<Self> {
        let dt = match s.trim().to_ascii_uppercase().as_str() {
            "BITSTRING" => Self::Bitstring,
            "BOOL" => Self::Bool,
            "BYTE" | "WORD" => Self::Byte,
            "_CHAR" | "CHAR" => Self::Char,
            "DWORD" => Self::Dword,
            "LWORD" => Self::Lword,
            "SINT" => Self::Sint,
            "INT" => Self::Int,
            "DINT" => Self::Dint,
            "LINT" => Self::Lint,
            "USINT" => Self::Usint,
            "UINT" => Self::Uint,
            "UDINT" => Self::Udint,
            "ULINT" => Self::Ulint,
            "REAL" => Self::Real,
            "LREAL" => Self::Lreal,
            "STRING" => Self::String,
            "WSTRING" => Self::Wstring,
            _ => return None,
        };
        Some(dt)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bitstring => "BITSTRING",
            Self::Bool => "BOOL",
            Self::Byte => "BYTE",
            Self::Char => "_CHAR",
            Self::Dword => "DWORD",
            Self::Lword => "LWORD",
            Self::Sint => "SINT",
            Self::Int => "INT",
            Self::Dint => "DINT",
            Self::Lint => "LINT",
            Self::Usint => "USINT",
            Self::Uint => "UINT",
            Self::Udint => "UDINT",
            Self::Ulint => "ULINT",
            Self::Real => "REAL",
            Self::Lreal => "LREAL",
            Self::String => "STRING",
            Self::Wstring => "WSTRING",
        }
    }

    /// Fixed size in bits; `None` for bit strings and character strings.
    pub fn bit_size(&self) -> Option<u32> {
        match self {
            Self::Bool | Self::Byte | Self::Char | Self::Sint | Self::Usint => Some(8),
            Self::Int | Self::Uint => Some(16),
            Self::Dint | Self::Udint | Self::Dword | Self::Real => Some(32),
            Self::Lint | Self::Ulint | Self::Lword | Self::Lreal => Some(64),
            Self::Bitstring | Self::String | Self::Wstring => None,
        }
    }

    /// The IEC equivalent of a POWERLINK simple type.
    pub fn from_data_type(data_type: &DataType) -> Option<Self> {
        let dt = match data_type.id {
            0x0001 => Self::Bool,
            0x0002 => Self::Sint,
            0x0003 => Self::Int,
            0x0004 => Self::Dint,
            0x0005 => Self::Usint,
            0x0006 => Self::Uint,
            0x0007 => Self::Udint,
            0x0008 => Self::Real,
            0x0009 => Self::String,
            0x000B => Self::Wstring,
            0x0011 => Self::Lreal,
            0x0015 => Self::Lint,
            0x001B => Self::Ulint,
            _ => return None,
        };
        Some(dt)
    }
}

/// One variable of the network's process image, owned by the CN that
/// produces or consumes it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessImageVar {
    /// Display name `CN<id>.<moduleName>.<varName>`.
    pub name: String,
    pub direction: Direction,
    /// `None` when the source type has no IEC equivalent.
    pub data_type: Option<IecDatatype>,
    pub bit_size: u32,
    pub byte_offset: u32,
    pub bit_offset: u32,
    pub owner_node_id: u8,
    /// Mapped CN index as four uppercase hex digits.
    pub module_index: String,
    pub module_name: String,
    /// Subindex name; `None` for a mapped VAR without subindices.
    pub var_name: Option<String>,
    /// The MN object the variable was assigned to.
    pub pi_address: Option<PiAddress>,
    pub source_index: u16,
    pub source_sub_index: u8,
}

impl ProcessImageVar {
    /// Characters 2..4 of the module index, e.g. `"00"` for `"6000"`.
    pub fn module_number(&self) -> &str {
        self.module_index.get(2..4).unwrap_or("")
    }

    /// Struct field name `CN<id>_M<moduleNumber>_<moduleName>[_<varName>]`.
    pub fn field_name(&self) -> String {
        let mut field = format!(
            "CN{}_M{}_{}",
            self.owner_node_id,
            self.module_number(),
            self.module_name
        );
        if let Some(var) = &self.var_name {
            field.push('_');
            field.push_str(var);
        }
        field
    }

    /// Replaces the variable name and refreshes the display name.
    pub fn set_var_name(&mut self, var_name: String) {
        self.var_name = Some(var_name);
        self.refresh_name();
    }

    pub(crate) fn refresh_name(&mut self) {
        self.name = match &self.var_name {
            Some(var) => format!("CN{}.{}.{}", self.owner_node_id, self.module_name, var),
            None => format!("CN{}.{}", self.owner_node_id, self.module_name),
        };
    }
}
