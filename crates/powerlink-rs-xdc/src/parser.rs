// crates/powerlink-rs-xdc/src/parser.rs

use crate::error::XdcError;
use crate::model::{self, DataTypeList, Object};
use crate::model::app_process::{AppDataTypeChoice, ApplicationProcess};
use crate::model::common::preferred_label;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use log::{info, warn};
use powerlink_rs_config::node::{ComplexDataType, Parameter, VarDeclaration};
use powerlink_rs_config::od::ObjectAttributes;
use powerlink_rs_config::{DataType, Node, NodeType};

/// Parses an XDD (or XDC) string and builds the [`Node`] it describes.
///
/// The communication profile's `ObjectList` fills the Object Dictionary,
/// its `DataTypeList` is merged over the built-in types, the device
/// profile's `ApplicationProcess` provides parameters and struct types, and
/// `NetworkManagement` fills the feature maps. Parameters and data types are
/// read before the objects so that `dataType` and `uniqueIDRef` resolve.
///
/// # Errors
/// - [`XdcError::XmlParsing`] if the XML is malformed.
/// - [`XdcError::MissingElement`] if there is no communication profile.
/// - [`XdcError::InvalidAttributeFormat`] for an index or subindex that is not hex.
/// - [`XdcError::HexParsing`] for an octet-string value that is not hex.
/// - [`XdcError::Config`] if the model rejects the node or an object.
pub fn load_node_from_xdd_str(
    xml_content: &str,
    node_id: u8,
    node_type: NodeType,
) -> Result<Node, XdcError> {
    let container: model::Iso15745ProfileContainer = quick_xml::de::from_str(xml_content)?;

    let comm_profile_body =
        container
            .body(model::COMM_PROFILE)
            .ok_or(XdcError::MissingElement {
                element: "ProfileBody_CommunicationNetwork_Powerlink",
            })?;
    let app_layers =
        comm_profile_body
            .application_layers
            .as_ref()
            .ok_or(XdcError::MissingElement {
                element: "ApplicationLayers",
            })?;
    let device_profile_body = container.body(model::DEVICE_PROFILE);

    let name = device_profile_body
        .and_then(|b| b.device_identity.as_ref())
        .and_then(|i| i.product_name.as_ref())
        .map(|n| n.value.trim())
        .filter(|n| !n.is_empty())
        .map(ToString::to_string)
        .unwrap_or_else(|| default_name(node_id, node_type));
    let mut node = Node::new(node_id, node_type, name)?;

    if let Some(list) = &app_layers.data_type_list {
        merge_data_types(&mut node, list)?;
    }
    if let Some(app) = device_profile_body.and_then(|b| b.application_process.as_ref()) {
        read_application_process(&mut node, app);
    }
    if let Some(nmt) = &comm_profile_body.network_management {
        let features = &mut node.features;
        for (key, value) in nmt.general_features.entries() {
            features.general.insert(key.to_string(), value.to_string());
        }
        for (key, value) in nmt.mn_features.iter().flat_map(|f| f.entries()) {
            features.mn.insert(key.to_string(), value.to_string());
        }
        for (key, value) in nmt.cn_features.iter().flat_map(|f| f.entries()) {
            features.cn.insert(key.to_string(), value.to_string());
        }
    }

    for object in &app_layers.object_list.object {
        let index = check_ids(object)?;
        node.import_object(object)?;
        if let Some(imported) = node.indices.get(index) {
            check_octet_string(&imported.attributes)?;
            for sub in imported.sub_indices() {
                check_octet_string(&sub.attributes)?;
            }
        }
    }

    info!(
        "[XDC] Loaded node {} '{}': {} objects, {} parameters.",
        node_id,
        node.name,
        node.indices.len(),
        node.application_process.parameters.len()
    );
    Ok(node)
}

fn default_name(node_id: u8, node_type: NodeType) -> String {
    match node_type {
        NodeType::Mn => String::from("MN"),
        NodeType::Cn => format!("CN{}", node_id),
    }
}

fn merge_data_types(node: &mut Node, list: &DataTypeList) -> Result<(), XdcError> {
    for def in &list.def_type {
        let id = parse_hex_u16(&def.data_type).ok_or_else(|| XdcError::InvalidAttributeFormat {
            attribute: "dataType",
            value: def.data_type.clone(),
        })?;
        let name = def.type_name.as_str();
        let bit_size = node
            .data_types
            .get_by_name(name)
            .or_else(|| node.data_types.get(id))
            .and_then(|t| t.bit_size);
        node.data_types.add(DataType::new(id, name, bit_size));
    }
    Ok(())
}

fn read_application_process(node: &mut Node, app: &ApplicationProcess) {
    for param in &app.parameter_list.parameter {
        let data_type = match param.simple_type().iec_name() {
            Some(iec) => iec_to_powerlink(iec).map(String::from),
            None => param
                .data_type_id_ref
                .as_ref()
                .map(|r| r.unique_id_ref.clone()),
        };
        if data_type.is_none() {
            warn!(
                "[XDC] Parameter '{}' has no usable data type.",
                param.unique_id
            );
        }
        node.application_process.parameters.push(Parameter {
            unique_id: param.unique_id.clone(),
            name: preferred_label(&param.label)
                .unwrap_or(&param.unique_id)
                .to_string(),
            access: param.access.clone(),
            data_type,
            default_value: param.default_value.as_ref().map(|v| v.value.clone()),
            actual_value: param.actual_value.as_ref().map(|v| v.value.clone()),
        });
    }

    let structs = app
        .data_type_list
        .iter()
        .flat_map(|l| l.items.iter())
        .filter_map(|item| match item {
            AppDataTypeChoice::Struct(s) => Some(s),
            _ => None,
        });
    for s in structs {
        let var_declarations: Vec<VarDeclaration> = s
            .var_declaration
            .iter()
            .map(|v| VarDeclaration {
                unique_id: v.unique_id.clone(),
                name: v.name.clone(),
                data_type: v.simple_type().iec_name().map(String::from),
                size: v.size.as_deref().and_then(|s| s.trim().parse().ok()),
            })
            .collect();
        node.application_process
            .complex_data_types
            .push(ComplexDataType {
                unique_id: s.unique_id.clone(),
                name: s.name.clone(),
                var_declarations,
            });
    }
}

/// The POWERLINK data type name of an IEC 61131-3 elementary type.
fn iec_to_powerlink(iec: &str) -> Option<&'static str> {
    Some(match iec {
        "BOOL" => "Boolean",
        "SINT" => "Integer8",
        "INT" => "Integer16",
        "DINT" => "Integer32",
        "LINT" => "Integer64",
        "USINT" | "BYTE" | "CHAR" => "Unsigned8",
        "UINT" | "WORD" => "Unsigned16",
        "UDINT" | "DWORD" => "Unsigned32",
        "ULINT" | "LWORD" => "Unsigned64",
        "REAL" => "Real32",
        "LREAL" => "Real64",
        "STRING" => "Visible_String",
        "WSTRING" => "Unicode_String",
        _ => return None,
    })
}

/// Checks the `index`/`subIndex` attributes are hex before the model sees
/// them, and returns the index.
fn check_ids(object: &Object) -> Result<u16, XdcError> {
    let index = parse_hex_u16(&object.index).ok_or_else(|| XdcError::InvalidAttributeFormat {
        attribute: "index",
        value: object.index.clone(),
    })?;
    for sub in &object.sub_object {
        parse_hex_u8(&sub.sub_index).ok_or_else(|| XdcError::InvalidAttributeFormat {
            attribute: "subIndex",
            value: sub.sub_index.clone(),
        })?;
    }
    Ok(index)
}

/// `Octet_String` and `Domain` values written as `0x...` must be whole bytes of hex.
fn check_octet_string(attributes: &ObjectAttributes) -> Result<(), XdcError> {
    let is_octets = attributes
        .data_type
        .as_ref()
        .is_some_and(|dt| matches!(dt.id, 0x000A | 0x000F));
    if !is_octets {
        return Ok(());
    }
    for value in [&attributes.default_value, &attributes.actual_value]
        .into_iter()
        .flatten()
    {
        if let Some(digits) = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
            hex::decode(digits)?;
        }
    }
    Ok(())
}

// --- Helper Functions ---

/// Parses a "0x..." or "..." hex string into a u16.
pub(crate) fn parse_hex_u16(s: &str) -> Option<u16> {
    let trimmed = s.trim();
    let trimmed = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    if trimmed.is_empty() || trimmed.len() > 4 {
        return None;
    }
    u16::from_str_radix(trimmed, 16).ok()
}

/// Parses a "0x..." or "..." hex string into a u8.
pub(crate) fn parse_hex_u8(s: &str) -> Option<u8> {
    let trimmed = s.trim();
    let trimmed = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    if trimmed.is_empty() || trimmed.len() > 2 {
        return None;
    }
    u8::from_str_radix(trimmed, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_ids() {
        assert_eq!(parse_hex_u16("1F22"), Some(0x1F22));
        assert_eq!(parse_hex_u16("0x1006"), Some(0x1006));
        assert_eq!(parse_hex_u16("12345"), None);
        assert_eq!(parse_hex_u16("XYZ"), None);
        assert_eq!(parse_hex_u8("0a"), Some(0x0A));
        assert_eq!(parse_hex_u8(""), None);
    }

    #[test]
    fn test_iec_to_powerlink() {
        assert_eq!(iec_to_powerlink("USINT"), Some("Unsigned8"));
        assert_eq!(iec_to_powerlink("DWORD"), Some("Unsigned32"));
        assert_eq!(iec_to_powerlink("BITSTRING"), None);
    }

    #[test]
    fn test_octet_string_check() {
        let mut attrs = ObjectAttributes::default();
        attrs.data_type = Some(DataType::new(0x000A, "Octet_String", None));
        attrs.actual_value = Some("0x0102".into());
        assert!(check_octet_string(&attrs).is_ok());
        attrs.actual_value = Some("0x010".into());
        assert!(matches!(
            check_octet_string(&attrs),
            Err(XdcError::HexParsing(_))
        ));
        // plain text is left alone
        attrs.actual_value = Some("abc".into());
        assert!(check_octet_string(&attrs).is_ok());
    }
}
