// crates/powerlink-rs-config/src/od/entry.rs

use super::data_type::DataType;
use alloc::string::String;
use core::fmt;

/// Object code of an Object Dictionary entry.
/// (Reference: EPSG DS 301, Table 37)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjectType {
    DefType,
    DefStruct,
    Var,
    Array,
    Record,
    #[default]
    Invalid,
}

impl ObjectType {
    /// Parses the numeric (`"7"`) or symbolic (`"VAR"`) object code.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            "5" | "DEFTYPE" => Self::DefType,
            "6" | "DEFSTRUCT" => Self::DefStruct,
            "7" | "VAR" => Self::Var,
            "8" | "ARRAY" => Self::Array,
            "9" | "RECORD" => Self::Record,
            _ => Self::Invalid,
        }
    }

    /// The numeric object code used in XDC files.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DefType => "5",
            Self::DefStruct => "6",
            Self::Var => "7",
            Self::Array => "8",
            Self::Record => "9",
            Self::Invalid => "",
        }
    }

    /// True for the object types whose subindex 0 is a computed NumberOfEntries.
    pub fn is_complex(&self) -> bool {
        matches!(self, Self::Array | Self::Record)
    }
}

/// Defines the access rights for an Object Dictionary entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessType {
    /// read only access, value is constant
    Constant,
    /// read only access
    ReadOnly,
    /// write only access
    WriteOnly,
    /// read and write access
    ReadWrite,
    /// read and write access, value shall be stored
    ReadWriteStore,
    /// write only access, value shall be stored
    WriteOnlyStore,
    /// variable access controlled by the device
    Conditional,
    #[default]
    Invalid,
}

impl AccessType {
    /// Parses an object `accessType`, or the `access` of an application
    /// parameter (`read`, `write`, `readWrite`, ...).
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "const" => Self::Constant,
            "ro" | "read" => Self::ReadOnly,
            "wo" | "wr" | "write" => Self::WriteOnly,
            "rw" | "readwrite" | "readwriteinput" | "readwriteoutput" => Self::ReadWrite,
            "rws" => Self::ReadWriteStore,
            "wos" => Self::WriteOnlyStore,
            "cond" => Self::Conditional,
            _ => Self::Invalid,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Constant => "const",
            Self::ReadOnly => "ro",
            Self::WriteOnly => "wo",
            Self::ReadWrite => "rw",
            Self::ReadWriteStore => "rws",
            Self::WriteOnlyStore => "wos",
            Self::Conditional => "cond",
            Self::Invalid => "invalid",
        }
    }

    /// Access types an RPDO may write into.
    pub fn is_writable(&self) -> bool {
        matches!(
            self,
            Self::WriteOnly | Self::ReadWrite | Self::ReadWriteStore | Self::WriteOnlyStore
        )
    }

    /// Access types a TPDO may read from.
    pub fn is_readable(&self) -> bool {
        matches!(
            self,
            Self::ReadOnly
                | Self::ReadWrite
                | Self::ReadWriteStore
                | Self::Constant
                | Self::Conditional
        )
    }
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Defines the PDO mapping options for an object.
/// (Reference: EPSG DS 301, Table 39)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PdoMapping {
    #[default]
    NotDefined,
    No,
    Default,
    Optional,
    Rpdo,
    Tpdo,
}

impl PdoMapping {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEFAULT" | "DEF" => Self::Default,
            "NO" => Self::No,
            "OPTIONAL" | "OPT" => Self::Optional,
            "RPDO" => Self::Rpdo,
            "TPDO" => Self::Tpdo,
            _ => Self::NotDefined,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotDefined => "",
            Self::No => "no",
            Self::Default => "default",
            Self::Optional => "optional",
            Self::Rpdo => "RPDO",
            Self::Tpdo => "TPDO",
        }
    }
}

/// The attribute set shared by indices and subindices.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectAttributes {
    pub name: String,
    pub object_type: ObjectType,
    pub data_type: Option<DataType>,
    pub access_type: AccessType,
    pub pdo_mapping: PdoMapping,
    pub low_limit: Option<String>,
    pub high_limit: Option<String>,
    pub default_value: Option<String>,
    pub actual_value: Option<String>,
    pub unique_id_ref: Option<String>,
    /// Forces the object into the CDC even without an actual value.
    pub include_in_cdc: bool,
}

impl ObjectAttributes {
    pub fn new(name: impl Into<String>, object_type: ObjectType) -> Self {
        Self {
            name: name.into(),
            object_type,
            ..Default::default()
        }
    }

    /// The value that ends up on the wire: the actual value, else the default.
    pub fn effective_value(&self) -> Option<&str> {
        self.actual_value
            .as_deref()
            .filter(|v| !v.is_empty())
            .or_else(|| self.default_value.as_deref().filter(|v| !v.is_empty()))
    }

    pub fn has_actual_value(&self) -> bool {
        self.actual_value.as_deref().is_some_and(|v| !v.is_empty())
    }
}
