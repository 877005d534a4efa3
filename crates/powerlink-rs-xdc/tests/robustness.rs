// crates/powerlink-rs-xdc/tests/robustness.rs

use powerlink_rs_config::{ConfigError, NodeType};
use powerlink_rs_xdc::{XdcError, load_node_from_xdd_str};

/// Wraps `objects` in a container with only a communication profile.
fn comm_only(objects: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<ISO15745ProfileContainer xmlns="http://www.ethernet-powerlink.org" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <ISO15745Profile>
    <ProfileBody xsi:type="ProfileBody_CommunicationNetwork_Powerlink">
      <ApplicationLayers>
        <ObjectList>
{}
        </ObjectList>
      </ApplicationLayers>
    </ProfileBody>
  </ISO15745Profile>
</ISO15745ProfileContainer>
"#,
        objects
    )
}

#[test]
fn test_minimal_file_uses_fallback_name() {
    let xml = comm_only(
        r#"<Object index="1006" name="NMT_CycleLen_U32" objectType="7" dataType="0007" accessType="rw" defaultValue="10000"/>"#,
    );
    let node = load_node_from_xdd_str(&xml, 7, NodeType::Cn).unwrap();
    assert_eq!(node.name, "CN7");
    assert_eq!(node.indices.len(), 1);

    let mn = load_node_from_xdd_str(&xml, 240, NodeType::Mn).unwrap();
    assert_eq!(mn.name, "MN");
}

#[test]
fn test_malformed_xml() {
    let r = load_node_from_xdd_str("<ISO15745ProfileContainer><ISO15745Profile>", 1, NodeType::Cn);
    assert!(
        matches!(r, Err(XdcError::XmlParsing(_))),
        "Expected XmlParsing, got {:?}",
        r
    );
}

#[test]
fn test_missing_communication_profile() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<ISO15745ProfileContainer xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <ISO15745Profile>
    <ProfileBody xsi:type="ProfileBody_Device_Powerlink">
      <DeviceIdentity><productName>Orphan</productName></DeviceIdentity>
    </ProfileBody>
  </ISO15745Profile>
</ISO15745ProfileContainer>"#;
    let r = load_node_from_xdd_str(xml, 1, NodeType::Cn);
    assert!(
        matches!(
            r,
            Err(XdcError::MissingElement {
                element: "ProfileBody_CommunicationNetwork_Powerlink"
            })
        ),
        "Expected MissingElement, got {:?}",
        r
    );
}

#[test]
fn test_invalid_index_attribute() {
    let xml = comm_only(r#"<Object index="10G6" name="Broken" objectType="7"/>"#);
    let r = load_node_from_xdd_str(&xml, 1, NodeType::Cn);
    assert!(
        matches!(
            &r,
            Err(XdcError::InvalidAttributeFormat { attribute: "index", value }) if value == "10G6"
        ),
        "Expected InvalidAttributeFormat, got {:?}",
        r
    );
}

#[test]
fn test_invalid_sub_index_attribute() {
    let xml = comm_only(
        r#"<Object index="1F81" name="NMT_NodeAssignment_AU32" objectType="8" dataType="0007">
  <SubObject subIndex="100" name="Too wide" objectType="7"/>
</Object>"#,
    );
    let r = load_node_from_xdd_str(&xml, 1, NodeType::Cn);
    assert!(
        matches!(
            r,
            Err(XdcError::InvalidAttributeFormat {
                attribute: "subIndex",
                ..
            })
        ),
        "Expected InvalidAttributeFormat, got {:?}",
        r
    );
}

#[test]
fn test_duplicate_index() {
    let xml = comm_only(
        r#"<Object index="1006" name="NMT_CycleLen_U32" objectType="7" dataType="0007"/>
<Object index="1006" name="NMT_CycleLen_U32" objectType="7" dataType="0007"/>"#,
    );
    let r = load_node_from_xdd_str(&xml, 1, NodeType::Cn);
    assert!(
        matches!(r, Err(XdcError::Config(ConfigError::IndexAlreadyExists(0x1006)))),
        "Expected IndexAlreadyExists, got {:?}",
        r
    );
}

#[test]
fn test_bad_octet_string_value() {
    let xml = comm_only(
        r#"<Object index="2000" name="Serial" objectType="7" dataType="000A" defaultValue="0x0A0"/>"#,
    );
    let r = load_node_from_xdd_str(&xml, 1, NodeType::Cn);
    assert!(
        matches!(r, Err(XdcError::HexParsing(_))),
        "Expected HexParsing, got {:?}",
        r
    );
}

/// Tests that the node id is validated against the station kind.
#[test]
fn test_invalid_node_id() {
    let xml = comm_only("");
    let r = load_node_from_xdd_str(&xml, 240, NodeType::Cn);
    assert!(
        matches!(r, Err(XdcError::Config(ConfigError::InvalidNodeId(240)))),
        "Expected InvalidNodeId, got {:?}",
        r
    );
}
