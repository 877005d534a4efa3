// crates/powerlink-rs-xdc/src/model/app_layers.rs

//! Contains model structs related to `<ApplicationLayers>`.
//! (Schema: `ProfileBody_CommunicationNetwork_Powerlink.xsd`)

use alloc::string::String;
use alloc::vec::Vec;
use powerlink_rs_config::od::{Attribute, ObjectSource};
use serde::{Deserialize, Serialize};

/// Contains the ObjectList and DataTypeList.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct ApplicationLayers {
    /// This optional list defines the mapping from hex ID to type name.
    /// (EPSG 311, 7.5.4.3)
    #[serde(
        rename = "DataTypeList",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub data_type_list: Option<DataTypeList>,

    #[serde(rename = "ObjectList")]
    pub object_list: ObjectList,
}

/// A list of all Object Dictionary entries.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct ObjectList {
    #[serde(rename = "Object", default)]
    pub object: Vec<Object>,
}

/// Represents an Object Dictionary index (e.g., `<Object index="1F22" ...>`).
///
/// Attributes are kept as raw strings; the configuration core parses them.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct Object {
    /// The OD index as a hex string (e.g., "1F22").
    #[serde(rename = "@index")]
    pub index: String,

    #[serde(rename = "@name", default)]
    pub name: String,

    /// The object type (e.g., "9" for RECORD).
    #[serde(rename = "@objectType", default)]
    pub object_type: String,

    /// The POWERLINK data type (e.g., "0006" for Unsigned16).
    #[serde(rename = "@dataType", default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,

    #[serde(rename = "@lowLimit", default, skip_serializing_if = "Option::is_none")]
    pub low_limit: Option<String>,

    #[serde(
        rename = "@highLimit",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub high_limit: Option<String>,

    /// The access type (e.g., "ro", "rw").
    #[serde(
        rename = "@accessType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub access_type: Option<String>,

    /// The `defaultValue` is the key data for an XDD file.
    #[serde(
        rename = "@defaultValue",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub default_value: Option<String>,

    /// The `actualValue` is the key data for an XDC file.
    #[serde(
        rename = "@actualValue",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub actual_value: Option<String>,

    /// The PDO mapping capability (`no`, `default`, `optional`, `TPDO`, `RPDO`).
    #[serde(
        rename = "@PDOmapping",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub pdo_mapping: Option<String>,

    /// References a Parameter's uniqueID in the ApplicationProcess.
    #[serde(
        rename = "@uniqueIDRef",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub unique_id_ref: Option<String>,

    /// Legacy flag forcing the object into the CDC.
    #[serde(rename = "@CDCFlag", default, skip_serializing_if = "Option::is_none")]
    pub cdc_flag: Option<String>,

    #[serde(rename = "SubObject", default, skip_serializing_if = "Vec::is_empty")]
    pub sub_object: Vec<SubObject>,
}

/// Represents an Object Dictionary sub-index.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct SubObject {
    /// The OD sub-index as a hex string (e.g., "01").
    #[serde(rename = "@subIndex")]
    pub sub_index: String,

    #[serde(rename = "@name", default)]
    pub name: String,

    #[serde(rename = "@objectType", default)]
    pub object_type: String,

    #[serde(rename = "@dataType", default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,

    #[serde(rename = "@lowLimit", default, skip_serializing_if = "Option::is_none")]
    pub low_limit: Option<String>,

    #[serde(
        rename = "@highLimit",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub high_limit: Option<String>,

    #[serde(
        rename = "@accessType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub access_type: Option<String>,

    #[serde(
        rename = "@defaultValue",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub default_value: Option<String>,

    #[serde(
        rename = "@actualValue",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub actual_value: Option<String>,

    #[serde(
        rename = "@PDOmapping",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub pdo_mapping: Option<String>,

    #[serde(
        rename = "@uniqueIDRef",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub unique_id_ref: Option<String>,

    #[serde(rename = "@CDCFlag", default, skip_serializing_if = "Option::is_none")]
    pub cdc_flag: Option<String>,
}

/// Looks up one of the `ag_Powerlink_Object` attributes shared by
/// `<Object>` and `<SubObject>`.
macro_rules! shared_attribute {
    ($self:ident, $attribute:expr) => {
        match $attribute {
            Attribute::DataType => $self.data_type.as_deref(),
            Attribute::AccessType => $self.access_type.as_deref(),
            Attribute::DefaultValue => $self.default_value.as_deref(),
            Attribute::ActualValue => $self.actual_value.as_deref(),
            Attribute::PdoMapping => $self.pdo_mapping.as_deref(),
            Attribute::LowLimit => $self.low_limit.as_deref(),
            Attribute::HighLimit => $self.high_limit.as_deref(),
            Attribute::UniqueIdRef => $self.unique_id_ref.as_deref(),
            Attribute::CdcFlag => $self.cdc_flag.as_deref(),
            Attribute::Index | Attribute::SubIndex | Attribute::Name | Attribute::ObjectType => None,
        }
    };
}

impl ObjectSource for Object {
    type Sub = SubObject;

    fn attribute(&self, attribute: Attribute) -> Option<&str> {
        match attribute {
            Attribute::Index => Some(&self.index),
            Attribute::SubIndex => None,
            Attribute::Name => Some(&self.name),
            Attribute::ObjectType => Some(&self.object_type),
            other => shared_attribute!(self, other),
        }
    }

    fn sub_objects(&self) -> &[SubObject] {
        &self.sub_object
    }
}

impl ObjectSource for SubObject {
    type Sub = SubObject;

    fn attribute(&self, attribute: Attribute) -> Option<&str> {
        match attribute {
            Attribute::Index => None,
            Attribute::SubIndex => Some(&self.sub_index),
            Attribute::Name => Some(&self.name),
            Attribute::ObjectType => Some(&self.object_type),
            other => shared_attribute!(self, other),
        }
    }

    fn sub_objects(&self) -> &[SubObject] {
        &[]
    }
}

// --- STRUCTS for DataTypeList (Comm Profile) ---

/// Represents `<DataTypeList>` (EPSG 311, 7.5.4.3).
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct DataTypeList {
    #[serde(rename = "defType", default, skip_serializing_if = "Vec::is_empty")]
    pub def_type: Vec<DefType>,
}

/// Represents `<defType>` (EPSG 311, 7.5.4.3).
#[derive(Debug, Serialize, Deserialize)]
pub struct DefType {
    /// The hex ID for the data type (e.g., "0006").
    #[serde(rename = "@dataType")]
    pub data_type: String,

    /// This captures the name of the child element (e.g., `<Unsigned16/>`).
    #[serde(rename = "$value")]
    pub type_name: DataTypeName,
}

/// Represents the tag name of the child of `<defType>`.
/// (Based on EPSG 311, Table 56).
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum DataTypeName {
    Boolean,
    Integer8,
    Integer16,
    Integer32,
    Unsigned8,
    Unsigned16,
    Unsigned32,
    Real32,
    #[serde(rename = "Visible_String")]
    VisibleString,
    Integer24,
    Real64,
    Integer40,
    Integer48,
    Integer56,
    Integer64,
    #[serde(rename = "Octet_String")]
    OctetString,
    #[serde(rename = "Unicode_String")]
    UnicodeString,
    #[serde(rename = "Time_of_Day")]
    TimeOfDay,
    #[serde(rename = "Time_Diff")]
    TimeDiff,
    Domain,
    Unsigned24,
    Unsigned40,
    Unsigned48,
    Unsigned56,
    Unsigned64,
    #[serde(rename = "MAC_ADDRESS")]
    MacAddress,
    #[serde(rename = "IP_ADDRESS")]
    IpAddress,
    NETTIME,
}

impl DataTypeName {
    /// The name as written in the XML, which is also the name the
    /// configuration core uses.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boolean => "Boolean",
            Self::Integer8 => "Integer8",
            Self::Integer16 => "Integer16",
            Self::Integer32 => "Integer32",
            Self::Unsigned8 => "Unsigned8",
            Self::Unsigned16 => "Unsigned16",
            Self::Unsigned32 => "Unsigned32",
            Self::Real32 => "Real32",
            Self::VisibleString => "Visible_String",
            Self::Integer24 => "Integer24",
            Self::Real64 => "Real64",
            Self::Integer40 => "Integer40",
            Self::Integer48 => "Integer48",
            Self::Integer56 => "Integer56",
            Self::Integer64 => "Integer64",
            Self::OctetString => "Octet_String",
            Self::UnicodeString => "Unicode_String",
            Self::TimeOfDay => "Time_of_Day",
            Self::TimeDiff => "Time_Diff",
            Self::Domain => "Domain",
            Self::Unsigned24 => "Unsigned24",
            Self::Unsigned40 => "Unsigned40",
            Self::Unsigned48 => "Unsigned48",
            Self::Unsigned56 => "Unsigned56",
            Self::Unsigned64 => "Unsigned64",
            Self::MacAddress => "MAC_ADDRESS",
            Self::IpAddress => "IP_ADDRESS",
            Self::NETTIME => "NETTIME",
        }
    }
}
