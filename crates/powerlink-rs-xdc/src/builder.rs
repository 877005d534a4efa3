// crates/powerlink-rs-xdc/src/builder.rs

use crate::error::XdcError;
use crate::model::{self, ApplicationLayers, DeviceIdentity, Object, ObjectList, SubObject};
use crate::model::common::ReadOnlyString;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Write;
use log::debug;
use powerlink_rs_config::od::{AccessType, Index, ObjectAttributes};
use powerlink_rs_config::Node;
use serde::Serialize;

/// Serializes the Object Dictionary of `node` into a minimal XDC `String`.
///
/// Every value is written as `actualValue` (the value the device is
/// configured with); `defaultValue` is kept alongside. Datatypes are written
/// as their 4-digit hex id.
///
/// # Errors
/// Returns an `XdcError` if serialization fails.
pub fn save_node_to_xdc_string(node: &Node) -> Result<String, XdcError> {
    let device_profile = model::Iso15745Profile {
        profile_body: model::ProfileBody {
            xsi_type: Some(model::DEVICE_PROFILE.into()),
            device_identity: Some(DeviceIdentity {
                product_name: Some(ReadOnlyString {
                    read_only: true,
                    value: node.name.clone(),
                }),
                ..Default::default()
            }),
            ..Default::default()
        },
    };

    let objects: Vec<Object> = node.indices.iter().map(build_object).collect();
    debug!("[XDC] Writing {} objects of node {}.", objects.len(), node.node_id());
    let comm_profile = model::Iso15745Profile {
        profile_body: model::ProfileBody {
            xsi_type: Some(model::COMM_PROFILE.into()),
            application_layers: Some(ApplicationLayers {
                data_type_list: None,
                object_list: ObjectList { object: objects },
            }),
            ..Default::default()
        },
    };

    let container = model::Iso15745ProfileContainer {
        profile: vec![device_profile, comm_profile],
        ..Default::default()
    };

    let mut buffer = String::new();
    // The XML declaration is not emitted by the serializer
    write!(&mut buffer, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\r\n")?;

    let mut serializer = quick_xml::se::Serializer::new(&mut buffer);
    serializer.indent(' ', 2);
    container.serialize(serializer)?;

    Ok(buffer)
}

fn build_object(index: &Index) -> Object {
    let a = &index.attributes;
    Object {
        index: index.id_str(),
        name: a.name.clone(),
        object_type: a.object_type.code().to_string(),
        data_type: data_type_id(a),
        low_limit: a.low_limit.clone(),
        high_limit: a.high_limit.clone(),
        access_type: access_type(a),
        default_value: a.default_value.clone(),
        actual_value: a.effective_value().map(String::from),
        pdo_mapping: pdo_mapping(a),
        unique_id_ref: a.unique_id_ref.clone(),
        cdc_flag: a.include_in_cdc.then(|| String::from("TRUE")),
        sub_object: index
            .sub_indices()
            .map(|sub| {
                let a = &sub.attributes;
                SubObject {
                    sub_index: sub.id_str(),
                    name: a.name.clone(),
                    object_type: a.object_type.code().to_string(),
                    data_type: data_type_id(a),
                    low_limit: a.low_limit.clone(),
                    high_limit: a.high_limit.clone(),
                    access_type: access_type(a),
                    default_value: a.default_value.clone(),
                    actual_value: a.effective_value().map(String::from),
                    pdo_mapping: pdo_mapping(a),
                    unique_id_ref: a.unique_id_ref.clone(),
                    cdc_flag: a.include_in_cdc.then(|| String::from("TRUE")),
                }
            })
            .collect(),
    }
}

fn data_type_id(a: &ObjectAttributes) -> Option<String> {
    a.data_type.as_ref().map(|dt| format!("{:04X}", dt.id))
}

fn access_type(a: &ObjectAttributes) -> Option<String> {
    (a.access_type != AccessType::Invalid).then(|| a.access_type.as_str().to_string())
}

fn pdo_mapping(a: &ObjectAttributes) -> Option<String> {
    Some(a.pdo_mapping.as_str())
        .filter(|s| !s.is_empty())
        .map(String::from)
}
