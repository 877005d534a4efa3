// crates/powerlink-rs-xdc/tests/parsing.rs

use powerlink_rs_config::{
    AccessType, Direction, Node, NodeType, OutputLanguage, PdoMapping, PdoType, Project,
};
use powerlink_rs_xdc::{load_node_from_xdd_str, save_node_to_xdc_string};

/// A digital I/O CN with one TPDO channel mapping two inputs, an
/// application parameter, and a struct type.
const IO_DEVICE_XDD: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ISO15745ProfileContainer xmlns="http://www.ethernet-powerlink.org" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="http://www.ethernet-powerlink.org Powerlink_Main.xsd">
  <ISO15745Profile>
    <ProfileHeader>
      <ProfileIdentification>Powerlink_Device_Profile</ProfileIdentification>
      <ProfileRevision>1</ProfileRevision>
      <ProfileName>IO Device</ProfileName>
    </ProfileHeader>
    <ProfileBody xsi:type="ProfileBody_Device_Powerlink" fileName="io.xdd" fileCreator="Test" fileCreationDate="2024-01-01" fileVersion="1">
      <DeviceIdentity>
        <vendorName>TestVendor</vendorName>
        <vendorID>0x00000001</vendorID>
        <productName>DigitalIO</productName>
      </DeviceIdentity>
      <ApplicationProcess>
        <dataTypeList>
          <struct name="Status" uniqueID="UID_DT_Status">
            <varDeclaration name="Ready" uniqueID="UID_DT_Status_Ready" size="1">
              <BITSTRING/>
            </varDeclaration>
            <varDeclaration name="Counter" uniqueID="UID_DT_Status_Counter">
              <USINT/>
            </varDeclaration>
          </struct>
        </dataTypeList>
        <parameterList>
          <parameter uniqueID="UID_Filter" access="readWrite">
            <label lang="en">InputFilter</label>
            <USINT/>
            <defaultValue value="15"/>
          </parameter>
          <parameter uniqueID="UID_Status" access="read">
            <label lang="en">Status</label>
            <dataTypeIDRef uniqueIDRef="UID_DT_Status"/>
          </parameter>
        </parameterList>
      </ApplicationProcess>
    </ProfileBody>
  </ISO15745Profile>
  <ISO15745Profile>
    <ProfileHeader>
      <ProfileIdentification>Powerlink_Communication_Profile</ProfileIdentification>
      <ProfileRevision>1</ProfileRevision>
      <ProfileName>IO Device</ProfileName>
    </ProfileHeader>
    <ProfileBody xsi:type="ProfileBody_CommunicationNetwork_Powerlink" fileName="io.xdd" fileCreator="Test" fileCreationDate="2024-01-01" fileVersion="1">
      <ApplicationLayers>
        <DataTypeList>
          <defType dataType="0005"><Unsigned8/></defType>
          <defType dataType="0007"><Unsigned32/></defType>
          <defType dataType="001B"><Unsigned64/></defType>
        </DataTypeList>
        <ObjectList>
          <Object index="1006" name="NMT_CycleLen_U32" objectType="7" dataType="0007" accessType="rw" defaultValue="10000"/>
          <Object index="1A00" name="PDO_TxMappParam_00h_AU64" objectType="8" dataType="001B">
            <SubObject subIndex="00" name="NumberOfEntries" objectType="7" dataType="0005" accessType="rw" actualValue="2"/>
            <SubObject subIndex="01" name="ObjectMapping" objectType="7" dataType="001B" accessType="rw" actualValue="0x0008000000016000"/>
            <SubObject subIndex="02" name="ObjectMapping" objectType="7" dataType="001B" accessType="rw" actualValue="0x0008000800026000"/>
          </Object>
          <Object index="2100" name="InputFilter_U8" objectType="7" uniqueIDRef="UID_Filter"/>
          <Object index="6000" name="DigitalInput" objectType="8" dataType="0005">
            <SubObject subIndex="00" name="NumberOfEntries" objectType="7" dataType="0005" accessType="const" defaultValue="2"/>
            <SubObject subIndex="01" name="Input1" objectType="7" accessType="ro" PDOmapping="TPDO"/>
            <SubObject subIndex="02" name="Input2" objectType="7" accessType="ro" PDOmapping="TPDO"/>
          </Object>
        </ObjectList>
      </ApplicationLayers>
      <NetworkManagement>
        <GeneralFeatures DLLFeatureMN="false" NMTBootTimeNotActive="9000000" NMTCycleTimeMax="4294967295" NMTCycleTimeMin="400" NMTErrorEntries="2" PDOTPDOChannels="1"/>
        <CNFeatures DLLCNFeatureMultiplex="true" NMTCNPreOp2ToReady2Op="1000"/>
      </NetworkManagement>
    </ProfileBody>
  </ISO15745Profile>
</ISO15745ProfileContainer>
"#;

fn load_io_device(node_id: u8) -> Node {
    load_node_from_xdd_str(IO_DEVICE_XDD, node_id, NodeType::Cn).expect("Failed to parse XDD")
}

#[test]
fn test_objects_imported() {
    let node = load_io_device(1);
    assert_eq!(node.name, "DigitalIO");
    assert_eq!(node.indices.len(), 4);
    assert_eq!(node.object_value(0x1006, None), Some("10000"));

    let mapping = node.indices.get(0x1A00).unwrap();
    assert_eq!(mapping.pdo_type(), Some(PdoType::Tpdo));
    assert_eq!(mapping.sub_index_count(), 3);

    let input = node.indices.get(0x6000).unwrap().sub_index(2).unwrap();
    assert_eq!(input.attributes.access_type, AccessType::ReadOnly);
    assert_eq!(input.attributes.pdo_mapping, PdoMapping::Tpdo);
    // inherited from the ARRAY
    assert_eq!(input.attributes.data_type.as_ref().map(|t| t.id), Some(0x0005));
}

/// Tests that an object with `uniqueIDRef` takes its datatype, access type
/// and default value from the referenced parameter.
#[test]
fn test_unique_id_ref_resolved() {
    let node = load_io_device(1);
    let filter = &node.indices.get(0x2100).unwrap().attributes;
    assert_eq!(filter.access_type, AccessType::ReadWrite);
    assert_eq!(filter.default_value.as_deref(), Some("15"));
    assert_eq!(filter.data_type.as_ref().map(|t| t.name.as_str()), Some("Unsigned8"));
}

#[test]
fn test_application_process_and_features() {
    let node = load_io_device(1);
    let params = &node.application_process.parameters;
    assert_eq!(params.len(), 2);
    assert_eq!(params[0].name, "InputFilter");
    assert_eq!(params[0].data_type.as_deref(), Some("Unsigned8"));
    assert_eq!(params[1].data_type.as_deref(), Some("UID_DT_Status"));

    let status = node
        .application_process
        .complex_data_type("UID_DT_Status")
        .unwrap();
    assert_eq!(status.var_declarations.len(), 2);
    assert_eq!(status.var_declarations[0].data_type.as_deref(), Some("BITSTRING"));
    assert_eq!(status.var_declarations[0].size, Some(1));

    assert_eq!(
        node.features.general.get("NMTCycleTimeMin").map(String::as_str),
        Some("400")
    );
    assert_eq!(
        node.features.cn.get("DLLCNFeatureMultiplex").map(String::as_str),
        Some("true")
    );
    assert!(node.features.mn.is_empty());
}

/// Tests the whole chain: XDD import, process-image build, and header output.
#[test]
fn test_import_then_build_process_image() {
    let mut project = Project::new();
    project
        .add_node(Node::new(240, NodeType::Mn, "MN").unwrap())
        .unwrap();
    project.add_node(load_io_device(1)).unwrap();
    project.build_process_image().unwrap();

    let vars: Vec<_> = project.process_image_vars().collect();
    assert_eq!(vars.len(), 2);
    assert!(vars.iter().all(|v| v.direction == Direction::Input));
    assert_eq!(vars[0].name, "CN1.DigitalInput.Input1");

    let mn = project.nodes.managing_node().unwrap();
    let pi = mn.indices.get(0xA4C0).unwrap();
    assert_eq!(pi.attributes.name, "PI_OUTPUTS_AU8");
    assert_eq!(pi.sub_index(2).unwrap().attributes.name, "PI_OUTPUTS_U8");

    let header = project.render_process_image(OutputLanguage::C).unwrap();
    assert!(header.contains("\tunsigned CN1_M00_DigitalInput_Input2:8;\n"));
}

/// Tests that a saved XDC loads back into the same Object Dictionary, with
/// default values carried over as actual values.
#[test]
fn test_round_trip() {
    let original = load_io_device(3);
    let xdc = save_node_to_xdc_string(&original).expect("Failed to save XDC");
    assert!(xdc.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xdc.contains("ProfileBody_CommunicationNetwork_Powerlink"));

    let reloaded = load_node_from_xdd_str(&xdc, 3, NodeType::Cn).expect("Failed to reload XDC");
    assert_eq!(reloaded.name, original.name);
    assert_eq!(reloaded.indices.len(), original.indices.len());
    for index in original.indices.iter() {
        let other = reloaded.indices.get(index.id()).unwrap();
        assert_eq!(other.attributes.name, index.attributes.name);
        assert_eq!(other.attributes.object_type, index.attributes.object_type);
        assert_eq!(other.attributes.access_type, index.attributes.access_type);
        assert_eq!(other.sub_index_count(), index.sub_index_count());
    }
    let cycle = &reloaded.indices.get(0x1006).unwrap().attributes;
    assert_eq!(cycle.actual_value.as_deref(), Some("10000"));
    assert_eq!(cycle.data_type.as_ref().map(|t| t.id), Some(0x0007));
}
