// crates/powerlink-rs-config/tests/process_image.rs

use powerlink_rs_config::{
    AccessType, ConfigError, Direction, Index, Node, NodeType, ObjectAttributes, ObjectType,
    OutputLanguage, PdoMapping, PdoMappingEntry, PiAddress, Project, SubIndex,
};

/// Builds a CN with two mapped inputs (6000/01-02) and one mapped output (6200/01).
fn io_node(node_id: u8) -> Node {
    let mut cn = Node::new(node_id, NodeType::Cn, format!("CN{}", node_id)).unwrap();
    let u8_type = cn.data_types.get(0x0005).cloned();

    let mut inputs = ObjectAttributes::new("DigitalInput", ObjectType::Array);
    inputs.data_type = u8_type.clone();
    let mut index = Index::new(0x6000, inputs);
    index
        .add_sub_index(SubIndex::new(0, ObjectAttributes::new("NumberOfEntries", ObjectType::Var)))
        .unwrap();
    for sub in 1..=2u8 {
        let mut attrs = ObjectAttributes::new(format!("Channel{}", sub), ObjectType::Var);
        attrs.access_type = AccessType::ReadOnly;
        attrs.pdo_mapping = PdoMapping::Tpdo;
        index.add_sub_index(SubIndex::new(sub, attrs)).unwrap();
    }
    index.update_array_sub_objects();
    cn.indices.add(index).unwrap();

    let mut outputs = ObjectAttributes::new("DigitalOutput", ObjectType::Array);
    outputs.data_type = u8_type;
    let mut index = Index::new(0x6200, outputs);
    let mut attrs = ObjectAttributes::new("Channel1", ObjectType::Var);
    attrs.access_type = AccessType::ReadWrite;
    attrs.pdo_mapping = PdoMapping::Rpdo;
    index.add_sub_index(SubIndex::new(1, attrs)).unwrap();
    index.update_array_sub_objects();
    cn.indices.add(index).unwrap();

    cn.indices
        .add(mapping(0x1600, &[(0x6200, 1, 0)]))
        .unwrap();
    cn.indices
        .add(mapping(0x1A00, &[(0x6000, 1, 0), (0x6000, 2, 8)]))
        .unwrap();
    cn
}

fn mapping(id: u16, entries: &[(u16, u8, u16)]) -> Index {
    let mut index = Index::new(id, ObjectAttributes::new("PDO_Mapping", ObjectType::Record));
    let mut count = ObjectAttributes::new("NumberOfEntries", ObjectType::Var);
    count.actual_value = Some(entries.len().to_string());
    index.add_sub_index(SubIndex::new(0, count)).unwrap();
    for (i, &(object, sub_index, offset_bits)) in entries.iter().enumerate() {
        let raw = PdoMappingEntry {
            index: object,
            sub_index,
            offset_bits,
            length_bits: 8,
        }
        .to_u64();
        let mut attrs = ObjectAttributes::new(format!("ObjectMapping{}", i + 1), ObjectType::Var);
        attrs.actual_value = Some(format!("0x{:016X}", raw));
        index.add_sub_index(SubIndex::new(i as u8 + 1, attrs)).unwrap();
    }
    index
}

fn network() -> Project {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut project = Project::new();
    project
        .add_node(Node::new(240, NodeType::Mn, "MN").unwrap())
        .unwrap();
    project.add_node(io_node(1)).unwrap();
    project.add_node(io_node(2)).unwrap();
    project
}

#[test]
fn test_addresses_and_mn_objects() {
    let mut project = network();
    project.build_process_image().unwrap();

    let cn2 = project.nodes.get(2).unwrap();
    let addresses: Vec<_> = cn2.process_image_vars.iter().map(|v| v.pi_address).collect();
    assert_eq!(
        addresses,
        [
            Some(PiAddress { index: 0xA040, sub_index: 2 }),
            Some(PiAddress { index: 0xA4C0, sub_index: 3 }),
            Some(PiAddress { index: 0xA4C0, sub_index: 4 }),
        ]
    );

    let mn = project.nodes.managing_node().unwrap();
    let mn_inputs = mn.indices.get(0xA040).unwrap();
    assert_eq!(mn_inputs.attributes.name, "PI_INPUTS_AU8");
    assert_eq!(mn_inputs.sub_index_count(), 3);
    let mn_outputs = mn.indices.get(0xA4C0).unwrap();
    assert_eq!(mn_outputs.attributes.name, "PI_OUTPUTS_AU8");
    assert_eq!(mn.object_value(0xA4C0, Some(0)), Some("0x04"));
    assert_eq!(
        mn_outputs.sub_index(4).unwrap().attributes.pdo_mapping,
        PdoMapping::Rpdo
    );
}

/// Tests that a second build starts from scratch instead of failing on
/// existing MN objects.
#[test]
fn test_build_is_idempotent() {
    let mut project = network();
    project.build_process_image().unwrap();
    project.build_process_image().unwrap();
    let mn = project.nodes.managing_node().unwrap();
    assert_eq!(mn.indices.get(0xA4C0).unwrap().sub_index_count(), 5);
    assert_eq!(project.process_image_vars().count(), 6);
}

/// Builds a CN whose TPDO maps `7000/01`, which it does not have.
fn broken_node(node_id: u8) -> Node {
    let mut cn = Node::new(node_id, NodeType::Cn, format!("CN{}", node_id)).unwrap();
    cn.indices.add(mapping(0x1A00, &[(0x7000, 1, 0)])).unwrap();
    cn
}

/// Tests that a failing CN leaves the previously built image untouched.
#[test]
fn test_failed_build_keeps_previous_image() {
    let mut project = network();
    project.build_process_image().unwrap();
    let header = project.render_process_image(OutputLanguage::C);
    let mn_objects = project.nodes.managing_node().unwrap().indices.len();

    project.add_node(broken_node(3)).unwrap();
    let r = project.build_process_image();
    assert!(
        matches!(
            r,
            Err(ConfigError::MappedObjectNotFound {
                node_id: 3,
                index: 0x7000,
                sub_index: None,
                ..
            })
        ),
        "Expected MappedObjectNotFound on node 3, got {:?}",
        r
    );

    assert_eq!(project.process_image_vars().count(), 6);
    let mn = project.nodes.managing_node().unwrap();
    assert_eq!(mn.indices.len(), mn_objects);
    assert_eq!(mn.indices.get(0xA4C0).unwrap().sub_index_count(), 5);
    assert_eq!(project.render_process_image(OutputLanguage::C), header);
}

/// Tests that a first build that fails stores nothing.
#[test]
fn test_failed_first_build_stores_nothing() {
    let mut project = network();
    project.add_node(broken_node(3)).unwrap();
    assert!(project.build_process_image().is_err());

    assert_eq!(project.process_image_vars().count(), 0);
    let mn = project.nodes.managing_node().unwrap();
    assert!(mn.indices.get(0xA040).is_none());
    assert!(mn.indices.get(0xA4C0).is_none());
}

#[test]
fn test_offsets_written_back() {
    let mut project = network();
    project.build_process_image().unwrap();
    let inputs: Vec<(u32, u32)> = project
        .process_image_vars()
        .filter(|v| v.direction == Direction::Input)
        .map(|v| (v.byte_offset, v.bit_offset))
        .collect();
    assert_eq!(inputs, [(0, 0), (1, 0), (2, 0), (3, 0)]);
}

#[test]
fn test_c_header_golden() {
    let mut project = network();
    project.build_process_image().unwrap();
    let header = project.render_process_image(OutputLanguage::C).unwrap();
    let expected = "/* This file was autogenerated by powerlink-rs-config */\n\
#ifndef __PI_H__\n\
#define __PI_H__\n\
\n\
# define COMPUTED_PI_OUT_SIZE 4\n\
typedef struct \n\
{\n\
\tunsigned CN1_M00_DigitalInput_Channel1:8;\n\
\tunsigned CN1_M00_DigitalInput_Channel2:8;\n\
\tunsigned CN2_M00_DigitalInput_Channel1:8;\n\
\tunsigned CN2_M00_DigitalInput_Channel2:8;\n\
} PI_OUT;\n\
\n\
# define COMPUTED_PI_IN_SIZE 4\n\
typedef struct \n\
{\n\
\tunsigned CN1_M00_DigitalOutput_Channel1:8;\n\
\tunsigned CN2_M00_DigitalOutput_Channel1:8;\n\
\tunsigned PADDING_VAR_1:16;\n\
} PI_IN;\n\
\n\
#endif\n";
    assert_eq!(header, expected);
    assert_eq!(project.render_process_image(OutputLanguage::Xml), Some(header));
}

#[test]
fn test_csharp_rendering() {
    let mut project = network();
    project.build_process_image().unwrap();
    let text = project.render_process_image(OutputLanguage::CSharp).unwrap();
    assert!(text.contains("namespace openPOWERLINK\n{\n"));
    assert!(text.contains("[StructLayout(LayoutKind.Explicit, Pack = 1, Size = 4)]\n\tpublic struct AppProcessImageOut"));
    assert!(text.contains("\t\t[FieldOffset(3)]\n\t\tpublic byte CN2_M00_DigitalInput_Channel2;\n"));
    assert!(text.contains("\t\t[FieldOffset(2)]\n\t\tpublic byte PADDING_VAR_1;\n"));
}

#[test]
fn test_generate_files() {
    let mut project = network();
    let dir = std::env::temp_dir().join(format!("powerlink-rs-config-pi-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let path = project
        .generate_process_image_description(OutputLanguage::C, &dir, "xap.xml", true)
        .unwrap()
        .unwrap();
    assert_eq!(path, dir.join("xap.h"));
    let cs = project
        .generate_process_image_description(OutputLanguage::CSharp, &dir, "", false)
        .unwrap()
        .unwrap();
    assert_eq!(cs, dir.join("PI.cs"));
    assert!(std::fs::read_to_string(&cs).unwrap().starts_with("using System;\n"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_unmappable_object_rejected() {
    let mut project = network();
    let cn = project.nodes.get_mut(1).unwrap();
    let sub = cn
        .indices
        .get_mut(0x6000)
        .unwrap()
        .sub_index_mut(2)
        .unwrap();
    sub.attributes.pdo_mapping = PdoMapping::No;

    let r = project.build_process_image();
    assert!(
        matches!(
            r,
            Err(ConfigError::InvalidMappingTypeForPdo { node_id: 1, index: 0x6000, sub_index: 2, .. })
        ),
        "Expected InvalidMappingTypeForPdo, got {:?}",
        r
    );
}
