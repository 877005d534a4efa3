//! Contains model structs related to `<ApplicationProcess>`.
//!
//! (Schema: `ProfileBody_Device_Powerlink.xsd`)

use super::common::{DataTypeIDRef, Empty, Labels, Value};
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// Represents the `<ApplicationProcess>` block.
///
/// This contains the device parameters, which serve as the source of default values.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct ApplicationProcess {
    /// Contains user-defined data types (EPSG 311, 7.4.7.2).
    #[serde(
        rename = "dataTypeList",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub data_type_list: Option<AppDataTypeList>,

    /// Contains parameter definitions (EPSG 311, 7.4.7.7).
    #[serde(rename = "parameterList", default)]
    pub parameter_list: ParameterList,
}

/// Represents `<parameterList>` (EPSG 311, 7.4.7.7).
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct ParameterList {
    #[serde(rename = "parameter", default, skip_serializing_if = "Vec::is_empty")]
    pub parameter: Vec<Parameter>,
}

/// The simple (IEC 61131-3) type of a parameter or struct member, given as an
/// empty child element such as `<USINT/>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimpleType {
    pub bool: Option<Empty>,
    pub bitstring: Option<Empty>,
    pub byte: Option<Empty>,
    pub char: Option<Empty>,
    pub word: Option<Empty>,
    pub dword: Option<Empty>,
    pub lword: Option<Empty>,
    pub sint: Option<Empty>,
    pub int: Option<Empty>,
    pub dint: Option<Empty>,
    pub lint: Option<Empty>,
    pub usint: Option<Empty>,
    pub uint: Option<Empty>,
    pub udint: Option<Empty>,
    pub ulint: Option<Empty>,
    pub real: Option<Empty>,
    pub lreal: Option<Empty>,
    pub string: Option<Empty>,
    pub wstring: Option<Empty>,
}

impl SimpleType {
    /// The IEC name of the type element that is present, if any.
    pub fn iec_name(&self) -> Option<&'static str> {
        let candidates = [
            (self.bool, "BOOL"),
            (self.bitstring, "BITSTRING"),
            (self.byte, "BYTE"),
            (self.char, "CHAR"),
            (self.word, "WORD"),
            (self.dword, "DWORD"),
            (self.lword, "LWORD"),
            (self.sint, "SINT"),
            (self.int, "INT"),
            (self.dint, "DINT"),
            (self.lint, "LINT"),
            (self.usint, "USINT"),
            (self.uint, "UINT"),
            (self.udint, "UDINT"),
            (self.ulint, "ULINT"),
            (self.real, "REAL"),
            (self.lreal, "LREAL"),
            (self.string, "STRING"),
            (self.wstring, "WSTRING"),
        ];
        candidates
            .into_iter()
            .find_map(|(marker, name)| marker.map(|_| name))
    }
}

/// Represents a `<parameter>` (EPSG 311, 7.4.7.7.2).
///
/// The IEC type markers are spelled out per field because the type is an
/// `xsd:choice` of empty elements.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Parameter {
    /// The unique ID (e.g., "Param1_Vendor_Specific").
    #[serde(rename = "@uniqueID")]
    pub unique_id: String,

    /// `read`, `write`, `readWrite`, ... (EPSG 311, Table 40).
    #[serde(rename = "@access", default, skip_serializing_if = "Option::is_none")]
    pub access: Option<String>,

    #[serde(rename = "label", default, skip_serializing_if = "Vec::is_empty")]
    pub label: Labels,

    #[serde(rename = "BOOL", default, skip_serializing_if = "Option::is_none")]
    pub bool: Option<Empty>,
    #[serde(rename = "BITSTRING", default, skip_serializing_if = "Option::is_none")]
    pub bitstring: Option<Empty>,
    #[serde(rename = "BYTE", default, skip_serializing_if = "Option::is_none")]
    pub byte: Option<Empty>,
    #[serde(rename = "CHAR", default, skip_serializing_if = "Option::is_none")]
    pub char: Option<Empty>,
    #[serde(rename = "WORD", default, skip_serializing_if = "Option::is_none")]
    pub word: Option<Empty>,
    #[serde(rename = "DWORD", default, skip_serializing_if = "Option::is_none")]
    pub dword: Option<Empty>,
    #[serde(rename = "LWORD", default, skip_serializing_if = "Option::is_none")]
    pub lword: Option<Empty>,
    #[serde(rename = "SINT", default, skip_serializing_if = "Option::is_none")]
    pub sint: Option<Empty>,
    #[serde(rename = "INT", default, skip_serializing_if = "Option::is_none")]
    pub int: Option<Empty>,
    #[serde(rename = "DINT", default, skip_serializing_if = "Option::is_none")]
    pub dint: Option<Empty>,
    #[serde(rename = "LINT", default, skip_serializing_if = "Option::is_none")]
    pub lint: Option<Empty>,
    #[serde(rename = "USINT", default, skip_serializing_if = "Option::is_none")]
    pub usint: Option<Empty>,
    #[serde(rename = "UINT", default, skip_serializing_if = "Option::is_none")]
    pub uint: Option<Empty>,
    #[serde(rename = "UDINT", default, skip_serializing_if = "Option::is_none")]
    pub udint: Option<Empty>,
    #[serde(rename = "ULINT", default, skip_serializing_if = "Option::is_none")]
    pub ulint: Option<Empty>,
    #[serde(rename = "REAL", default, skip_serializing_if = "Option::is_none")]
    pub real: Option<Empty>,
    #[serde(rename = "LREAL", default, skip_serializing_if = "Option::is_none")]
    pub lreal: Option<Empty>,
    #[serde(rename = "STRING", default, skip_serializing_if = "Option::is_none")]
    pub string: Option<Empty>,
    #[serde(rename = "WSTRING", default, skip_serializing_if = "Option::is_none")]
    pub wstring: Option<Empty>,

    /// Reference to a `struct`/`array` of the `dataTypeList`.
    #[serde(
        rename = "dataTypeIDRef",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub data_type_id_ref: Option<DataTypeIDRef>,

    /// The `actualValue` element (prioritized in XDC).
    #[serde(
        rename = "actualValue",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub actual_value: Option<Value>,

    /// The `defaultValue` element (prioritized in XDD).
    #[serde(
        rename = "defaultValue",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub default_value: Option<Value>,
}

impl Parameter {
    /// The simple type of the parameter, gathered from its type markers.
    pub fn simple_type(&self) -> SimpleType {
        SimpleType {
            bool: self.bool,
            bitstring: self.bitstring,
            byte: self.byte,
            char: self.char,
            word: self.word,
            dword: self.dword,
            lword: self.lword,
            sint: self.sint,
            int: self.int,
            dint: self.dint,
            lint: self.lint,
            usint: self.usint,
            uint: self.uint,
            udint: self.udint,
            ulint: self.ulint,
            real: self.real,
            lreal: self.lreal,
            string: self.string,
            wstring: self.wstring,
        }
    }
}

// --- Structs for ApplicationProcess dataTypeList ---

/// Represents `<dataTypeList>` in ApplicationProcess (EPSG 311, 7.4.7.2).
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct AppDataTypeList {
    #[serde(rename = "$value", default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<AppDataTypeChoice>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub enum AppDataTypeChoice {
    #[serde(rename = "array")]
    Array(NamedType),
    #[serde(rename = "struct")]
    Struct(AppStruct),
    #[serde(rename = "enum")]
    Enum(NamedType),
    #[serde(rename = "derived")]
    Derived(NamedType),
}

/// An `array`, `enum` or `derived` type; only its identity is read.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct NamedType {
    #[serde(rename = "@name", default)]
    pub name: String,
    #[serde(rename = "@uniqueID", default)]
    pub unique_id: String,
}

/// Represents `<struct>` (EPSG 311, 7.4.7.2.4)
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct AppStruct {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@uniqueID")]
    pub unique_id: String,
    #[serde(rename = "varDeclaration", default, skip_serializing_if = "Vec::is_empty")]
    pub var_declaration: Vec<VarDeclaration>,
}

/// Represents `<varDeclaration>` (EPSG 311, 7.4.7.2.4.1)
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct VarDeclaration {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@uniqueID")]
    pub unique_id: String,
    /// Size in bits, used with `BITSTRING`.
    #[serde(rename = "@size", default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    #[serde(rename = "BOOL", default, skip_serializing_if = "Option::is_none")]
    pub bool: Option<Empty>,
    #[serde(rename = "BITSTRING", default, skip_serializing_if = "Option::is_none")]
    pub bitstring: Option<Empty>,
    #[serde(rename = "BYTE", default, skip_serializing_if = "Option::is_none")]
    pub byte: Option<Empty>,
    #[serde(rename = "CHAR", default, skip_serializing_if = "Option::is_none")]
    pub char: Option<Empty>,
    #[serde(rename = "WORD", default, skip_serializing_if = "Option::is_none")]
    pub word: Option<Empty>,
    #[serde(rename = "DWORD", default, skip_serializing_if = "Option::is_none")]
    pub dword: Option<Empty>,
    #[serde(rename = "LWORD", default, skip_serializing_if = "Option::is_none")]
    pub lword: Option<Empty>,
    #[serde(rename = "SINT", default, skip_serializing_if = "Option::is_none")]
    pub sint: Option<Empty>,
    #[serde(rename = "INT", default, skip_serializing_if = "Option::is_none")]
    pub int: Option<Empty>,
    #[serde(rename = "DINT", default, skip_serializing_if = "Option::is_none")]
    pub dint: Option<Empty>,
    #[serde(rename = "LINT", default, skip_serializing_if = "Option::is_none")]
    pub lint: Option<Empty>,
    #[serde(rename = "USINT", default, skip_serializing_if = "Option::is_none")]
    pub usint: Option<Empty>,
    #[serde(rename = "UINT", default, skip_serializing_if = "Option::is_none")]
    pub uint: Option<Empty>,
    #[serde(rename = "UDINT", default, skip_serializing_if = "Option::is_none")]
    pub udint: Option<Empty>,
    #[serde(rename = "ULINT", default, skip_serializing_if = "Option::is_none")]
    pub ulint: Option<Empty>,
    #[serde(rename = "REAL", default, skip_serializing_if = "Option::is_none")]
    pub real: Option<Empty>,
    #[serde(rename = "LREAL", default, skip_serializing_if = "Option::is_none")]
    pub lreal: Option<Empty>,
    #[serde(rename = "STRING", default, skip_serializing_if = "Option::is_none")]
    pub string: Option<Empty>,
    #[serde(rename = "WSTRING", default, skip_serializing_if = "Option::is_none")]
    pub wstring: Option<Empty>,
}

impl VarDeclaration {
    pub fn simple_type(&self) -> SimpleType {
        SimpleType {
            bool: self.bool,
            bitstring: self.bitstring,
            byte: self.byte,
            char: self.char,
            word: self.word,
            dword: self.dword,
            lword: self.lword,
            sint: self.sint,
            int: self.int,
            dint: self.dint,
            lint: self.lint,
            usint: self.usint,
            uint: self.uint,
            udint: self.udint,
            ulint: self.ulint,
            real: self.real,
            lreal: self.lreal,
            string: self.string,
            wstring: self.wstring,
        }
    }
}
