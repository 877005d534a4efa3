// crates/powerlink-rs-xdc/src/model/net_mgmt.rs

//! Contains model structs related to `<NetworkManagement>`.
//! (Schema: `ProfileBody_CommunicationNetwork_Powerlink.xsd`)
//!
//! Feature attributes are kept as raw strings and copied into the node's
//! feature maps under their XML attribute names.

use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// Represents `<NetworkManagement>` (from XSD `t_NetworkManagement`).
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct NetworkManagement {
    #[serde(rename = "GeneralFeatures", default)]
    pub general_features: GeneralFeatures,

    #[serde(rename = "MNFeatures", default, skip_serializing_if = "Option::is_none")]
    pub mn_features: Option<MnFeatures>,

    #[serde(rename = "CNFeatures", default, skip_serializing_if = "Option::is_none")]
    pub cn_features: Option<CnFeatures>,
}

/// Collects the present attributes as `(name, value)` pairs.
fn present<'a>(pairs: &[(&'static str, &'a Option<String>)]) -> Vec<(&'static str, &'a str)> {
    pairs
        .iter()
        .filter_map(|&(name, value)| value.as_deref().map(|v| (name, v)))
        .collect()
}

/// Represents `<GeneralFeatures>` (from XSD `t_GeneralFeatures`).
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct GeneralFeatures {
    #[serde(rename = "@DLLFeatureMN", default, skip_serializing_if = "Option::is_none")]
    pub dll_feature_mn: Option<String>,
    #[serde(rename = "@NMTBootTimeNotActive", default, skip_serializing_if = "Option::is_none")]
    pub nmt_boot_time_not_active: Option<String>,
    #[serde(rename = "@NMTCycleTimeMax", default, skip_serializing_if = "Option::is_none")]
    pub nmt_cycle_time_max: Option<String>,
    #[serde(rename = "@NMTCycleTimeMin", default, skip_serializing_if = "Option::is_none")]
    pub nmt_cycle_time_min: Option<String>,
    #[serde(rename = "@NMTErrorEntries", default, skip_serializing_if = "Option::is_none")]
    pub nmt_error_entries: Option<String>,
    #[serde(rename = "@NMTIsochronous", default, skip_serializing_if = "Option::is_none")]
    pub nmt_isochronous: Option<String>,
    #[serde(rename = "@NMTMaxCNNumber", default, skip_serializing_if = "Option::is_none")]
    pub nmt_max_cn_number: Option<String>,
    #[serde(rename = "@PDODynamicMapping", default, skip_serializing_if = "Option::is_none")]
    pub pdo_dynamic_mapping: Option<String>,
    #[serde(rename = "@PDOGranularity", default, skip_serializing_if = "Option::is_none")]
    pub pdo_granularity: Option<String>,
    #[serde(rename = "@PDOMaxDescrMem", default, skip_serializing_if = "Option::is_none")]
    pub pdo_max_descr_mem: Option<String>,
    #[serde(rename = "@PDORPDOChannelObjects", default, skip_serializing_if = "Option::is_none")]
    pub pdo_rpdo_channel_objects: Option<String>,
    #[serde(rename = "@PDORPDOChannels", default, skip_serializing_if = "Option::is_none")]
    pub pdo_rpdo_channels: Option<String>,
    #[serde(rename = "@PDOTPDOChannelObjects", default, skip_serializing_if = "Option::is_none")]
    pub pdo_tpdo_channel_objects: Option<String>,
    #[serde(rename = "@PDOTPDOChannels", default, skip_serializing_if = "Option::is_none")]
    pub pdo_tpdo_channels: Option<String>,
    #[serde(rename = "@SDOServer", default, skip_serializing_if = "Option::is_none")]
    pub sdo_server: Option<String>,
}

impl GeneralFeatures {
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        present(&[
            ("DLLFeatureMN", &self.dll_feature_mn),
            ("NMTBootTimeNotActive", &self.nmt_boot_time_not_active),
            ("NMTCycleTimeMax", &self.nmt_cycle_time_max),
            ("NMTCycleTimeMin", &self.nmt_cycle_time_min),
            ("NMTErrorEntries", &self.nmt_error_entries),
            ("NMTIsochronous", &self.nmt_isochronous),
            ("NMTMaxCNNumber", &self.nmt_max_cn_number),
            ("PDODynamicMapping", &self.pdo_dynamic_mapping),
            ("PDOGranularity", &self.pdo_granularity),
            ("PDOMaxDescrMem", &self.pdo_max_descr_mem),
            ("PDORPDOChannelObjects", &self.pdo_rpdo_channel_objects),
            ("PDORPDOChannels", &self.pdo_rpdo_channels),
            ("PDOTPDOChannelObjects", &self.pdo_tpdo_channel_objects),
            ("PDOTPDOChannels", &self.pdo_tpdo_channels),
            ("SDOServer", &self.sdo_server),
        ])
    }
}

/// Represents `<MNFeatures>` (from XSD `t_MNFeatures`).
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct MnFeatures {
    #[serde(rename = "@DLLMNFeatureMultiplex", default, skip_serializing_if = "Option::is_none")]
    pub dll_mn_feature_multiplex: Option<String>,
    #[serde(rename = "@DLLMNPResChaining", default, skip_serializing_if = "Option::is_none")]
    pub dll_mn_pres_chaining: Option<String>,
    #[serde(rename = "@NMTMNMaxAsynchronousSlots", default, skip_serializing_if = "Option::is_none")]
    pub nmt_mn_max_asynchronous_slots: Option<String>,
    #[serde(rename = "@NMTMNMultiplCycMax", default, skip_serializing_if = "Option::is_none")]
    pub nmt_mn_multipl_cyc_max: Option<String>,
    #[serde(rename = "@NMTMNPResChaining", default, skip_serializing_if = "Option::is_none")]
    pub nmt_mn_pres_chaining: Option<String>,
    #[serde(rename = "@NMTMNPResTx", default, skip_serializing_if = "Option::is_none")]
    pub nmt_mn_pres_tx: Option<String>,
    #[serde(rename = "@NMTSimpleBoot", default, skip_serializing_if = "Option::is_none")]
    pub nmt_simple_boot: Option<String>,
    #[serde(rename = "@PDOTPDOChannels", default, skip_serializing_if = "Option::is_none")]
    pub pdo_tpdo_channels: Option<String>,
}

impl MnFeatures {
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        present(&[
            ("DLLMNFeatureMultiplex", &self.dll_mn_feature_multiplex),
            ("DLLMNPResChaining", &self.dll_mn_pres_chaining),
            ("NMTMNMaxAsynchronousSlots", &self.nmt_mn_max_asynchronous_slots),
            ("NMTMNMultiplCycMax", &self.nmt_mn_multipl_cyc_max),
            ("NMTMNPResChaining", &self.nmt_mn_pres_chaining),
            ("NMTMNPResTx", &self.nmt_mn_pres_tx),
            ("NMTSimpleBoot", &self.nmt_simple_boot),
            ("PDOTPDOChannels", &self.pdo_tpdo_channels),
        ])
    }
}

/// Represents `<CNFeatures>` (from XSD `t_CNFeatures`).
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct CnFeatures {
    #[serde(rename = "@DLLCNFeatureMultiplex", default, skip_serializing_if = "Option::is_none")]
    pub dll_cn_feature_multiplex: Option<String>,
    #[serde(rename = "@DLLCNPResChaining", default, skip_serializing_if = "Option::is_none")]
    pub dll_cn_pres_chaining: Option<String>,
    #[serde(rename = "@NMTCNPreOp2ToReady2Op", default, skip_serializing_if = "Option::is_none")]
    pub nmt_cn_pre_op2_to_ready2_op: Option<String>,
    #[serde(rename = "@NMTCNSoC2PReq", default, skip_serializing_if = "Option::is_none")]
    pub nmt_cn_soc2_preq: Option<String>,
}

impl CnFeatures {
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        present(&[
            ("DLLCNFeatureMultiplex", &self.dll_cn_feature_multiplex),
            ("DLLCNPResChaining", &self.dll_cn_pres_chaining),
            ("NMTCNPreOp2ToReady2Op", &self.nmt_cn_pre_op2_to_ready2_op),
            ("NMTCNSoC2PReq", &self.nmt_cn_soc2_preq),
        ])
    }
}
