//! Internal `serde` data structures that map to the XDD/XDC XML schema.
//!
//! Only the parts of EPSG DS 311 the configurator reads are modelled; any
//! other element is skipped by the deserializer.

use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

pub mod app_layers;
pub mod app_process;
pub mod common;
pub mod identity;
pub mod net_mgmt;

pub use app_layers::{ApplicationLayers, DataTypeList, Object, ObjectList, SubObject};
pub use app_process::ApplicationProcess;
pub use identity::DeviceIdentity;
pub use net_mgmt::NetworkManagement;

/// `xsi:type` prefix of the device profile body (plain and modular variants).
pub const DEVICE_PROFILE: &str = "ProfileBody_Device_Powerlink";
/// `xsi:type` prefix of the communication profile body.
pub const COMM_PROFILE: &str = "ProfileBody_CommunicationNetwork_Powerlink";

/// Document root. A device description holds a device profile and a
/// communication profile side by side.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename = "ISO15745ProfileContainer")]
pub struct Iso15745ProfileContainer {
    #[serde(rename = "@xmlns", default)]
    pub xmlns: String,

    #[serde(rename = "@xmlns:xsi", default)]
    pub xmlns_xsi: String,

    #[serde(rename = "@xsi:schemaLocation", default)]
    pub xsi_schema_location: String,

    #[serde(rename = "ISO15745Profile", default)]
    pub profile: Vec<Iso15745Profile>,
}

impl Default for Iso15745ProfileContainer {
    fn default() -> Self {
        Self {
            xmlns: "http://www.ethernet-powerlink.org".into(),
            xmlns_xsi: "http://www.w3.org/2001/XMLSchema-instance".into(),
            xsi_schema_location: "http://www.ethernet-powerlink.org Powerlink_Main.xsd".into(),
            profile: Vec::new(),
        }
    }
}

impl Iso15745ProfileContainer {
    /// The first profile body whose `xsi:type` starts with `kind`.
    pub fn body(&self, kind: &str) -> Option<&ProfileBody> {
        self.profile
            .iter()
            .map(|p| &p.profile_body)
            .find(|b| b.xsi_type.as_deref().is_some_and(|t| t.starts_with(kind)))
    }
}

/// Wrapper around one `<ProfileBody>`; the header is not read.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Iso15745Profile {
    #[serde(rename = "ProfileBody")]
    pub profile_body: ProfileBody,
}

/// A profile body. Which of the optional children are present depends on
/// the `xsi:type`.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct ProfileBody {
    // quick-xml drops the `xsi:` prefix when reading.
    #[serde(
        rename = "@xsi:type",
        alias = "@type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub xsi_type: Option<String>,

    /// Device profile only.
    #[serde(
        rename = "DeviceIdentity",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub device_identity: Option<DeviceIdentity>,

    /// Device profile only: parameters and struct types.
    #[serde(
        rename = "ApplicationProcess",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub application_process: Option<ApplicationProcess>,

    /// Communication profile only: the object dictionary.
    #[serde(
        rename = "ApplicationLayers",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub application_layers: Option<ApplicationLayers>,

    /// Communication profile only.
    #[serde(
        rename = "NetworkManagement",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub network_management: Option<NetworkManagement>,
}
