// crates/powerlink-rs-config/src/cdc/text.rs

//! Writes the textual CDC source for a project: the MN's objects followed
//! by one `1F22` record carrying each CN's configuration.

use crate::error::ConfigError;
use crate::log::{LogContext, my_debug, my_warn};
use crate::node::Node;
use crate::od::constants::{IDX_CFM_CONCISE_DCF_LIST_ADOM, SUBIDX_NUMBER_OF_ENTRIES};
use crate::od::utils::parse_value;
use crate::od::{Index, ObjectAttributes};
use crate::pdo::is_process_image_index;
use crate::project::Project;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt::Write;

/// Bytes of a record before its data: index, subindex and size.
const RECORD_HEADER_LEN: usize = 7;

/// One `index / subindex / size / data` line.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Record {
    index: u16,
    sub_index: u8,
    size: usize,
    data: String,
}

impl Record {
    fn encoded_len(&self) -> usize {
        RECORD_HEADER_LEN + self.size
    }

    fn write_line(&self, out: &mut String) {
        let _ = writeln!(
            out,
            "{:04X}\t{:02X}\t{:08X}\t{}",
            self.index, self.sub_index, self.size, self.data
        );
    }
}

/// Renders the CDC text for all nodes of `project`.
pub fn write_configuration(project: &Project) -> Result<String, ConfigError> {
    let mn = project.nodes.managing_node()?;
    let mn_records = node_records(mn)?;
    let cns: Vec<&Node> = project.nodes.iter().filter(|n| !n.is_mn()).collect();

    let mut out = String::new();
    out.push_str("// NumberOfEntries\n");
    let _ = writeln!(out, "{:08X}", mn_records.len() + cns.len());
    for record in &mn_records {
        record.write_line(&mut out);
    }

    for cn in cns {
        let records = node_records(cn)?;
        let data_len = 4 + records.iter().map(Record::encoded_len).sum::<usize>();
        my_debug!(
            LogContext::node("cdc", cn.node_id()),
            "Writing {} records ({} bytes).",
            records.len(),
            data_len
        );
        let _ = writeln!(
            out,
            "{:04X}\t{:02X}\t{:08X}",
            IDX_CFM_CONCISE_DCF_LIST_ADOM,
            cn.node_id(),
            data_len
        );
        let _ = writeln!(out, "// Configuration Data for CN-{}", cn.node_id());
        let _ = writeln!(out, "{:08X}", records.len());
        for record in &records {
            record.write_line(&mut out);
        }
    }
    Ok(out)
}

/// The records of one node, in OD order.
///
/// A subindex goes into the CDC when it has an actual value or is flagged
/// for inclusion. Process-image objects never do. Subindex `00` of an
/// ARRAY/RECORD follows the other entries of its index, since it is the
/// count they are enabled with.
fn node_records(node: &Node) -> Result<Vec<Record>, ConfigError> {
    let mut records = Vec::new();
    for index in node.indices.iter() {
        if is_process_image_index(index.id()) {
            continue;
        }
        if !index.has_sub_indices() {
            if index.attributes.include_in_cdc || index.attributes.has_actual_value() {
                records.extend(encode(node, index.id(), 0, &index.attributes)?);
            }
            continue;
        }
        index_records(node, index, &mut records)?;
    }
    Ok(records)
}

fn index_records(node: &Node, index: &Index, records: &mut Vec<Record>) -> Result<(), ConfigError> {
    let complex = index.attributes.object_type.is_complex();
    let mut written = 0;
    for sub in index.sub_indices() {
        if complex && sub.id() == SUBIDX_NUMBER_OF_ENTRIES {
            continue;
        }
        let flagged = index.attributes.include_in_cdc || sub.attributes.include_in_cdc;
        if flagged || sub.attributes.has_actual_value() {
            if let Some(record) = encode(node, index.id(), sub.id(), &sub.attributes)? {
                records.push(record);
                written += 1;
            }
        }
    }
    if complex {
        if let Some(count) = index.sub_index(SUBIDX_NUMBER_OF_ENTRIES) {
            if written > 0 || count.attributes.include_in_cdc {
                records.extend(encode(
                    node,
                    index.id(),
                    SUBIDX_NUMBER_OF_ENTRIES,
                    &count.attributes,
                )?);
            }
        }
    }
    Ok(())
}

/// Renders a value big-endian at its datatype's size. Objects without a
/// value or without a fixed-size type produce no record.
fn encode(
    node: &Node,
    index: u16,
    sub_index: u8,
    attributes: &ObjectAttributes,
) -> Result<Option<Record>, ConfigError> {
    let Some(value) = attributes.effective_value() else {
        return Ok(None);
    };
    let Some(size) = attributes.data_type.as_ref().and_then(|dt| dt.byte_size()) else {
        my_warn!(
            LogContext::node("cdc", node.node_id()),
            "Skipping {:04X}/{:02X} '{}': datatype has no fixed size.",
            index,
            sub_index,
            attributes.name
        );
        return Ok(None);
    };
    let parsed = parse_value(value).ok_or_else(|| ConfigError::InvalidValue {
        value: value.to_string(),
        expected: "decimal or 0x-prefixed hex number",
    })?;
    let mask = if size >= 16 {
        u128::MAX
    } else {
        (1u128 << (size * 8)) - 1
    };
    Ok(Some(Record {
        index,
        sub_index,
        size,
        data: format!("{:0width$X}", (parsed as u128) & mask, width = size * 2),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::od::{DataType, ObjectType, SubIndex};
    use crate::types::NodeType;

    fn u32_type() -> DataType {
        DataType::new(0x0007, "Unsigned32", Some(32))
    }

    fn var(id: u16, value: Option<&str>) -> Index {
        let mut attrs = ObjectAttributes::new("Var", ObjectType::Var);
        attrs.data_type = Some(u32_type());
        attrs.actual_value = value.map(String::from);
        Index::new(id, attrs)
    }

    fn project() -> Project {
        let mut project = Project::new();
        let mut mn = Node::new(240, NodeType::Mn, "MN").unwrap();
        mn.indices.add(var(0x1006, Some("5000"))).unwrap();
        mn.indices.add(var(0x1020, None)).unwrap();
        project.nodes.add(mn).unwrap();
        let mut cn = Node::new(1, NodeType::Cn, "CN1").unwrap();
        cn.indices.add(var(0x1006, Some("0x1388"))).unwrap();
        project.nodes.add(cn).unwrap();
        project
    }

    #[test]
    fn test_write_configuration() {
        let text = write_configuration(&project()).unwrap();
        let expected = "// NumberOfEntries\n\
00000002\n\
1006\t00\t00000004\t00001388\n\
1F22\t01\t0000000F\n\
// Configuration Data for CN-1\n\
00000001\n\
1006\t00\t00000004\t00001388\n";
        assert_eq!(text, expected);
    }

    /// Tests that the written text converts into a well-formed binary CDC.
    #[test]
    fn test_text_converts() {
        let text = write_configuration(&project()).unwrap();
        let cdc = crate::cdc::txt_to_cdc(&text).unwrap();
        assert_eq!(&cdc[..4], &[2, 0, 0, 0]);
        assert_eq!(cdc.len(), 4 + 11 + 7 + 15);
    }

    #[test]
    fn test_array_count_follows_entries() {
        let mut attrs = ObjectAttributes::new("NMT_MNCNPResTimeout_AU32", ObjectType::Array);
        attrs.data_type = Some(u32_type());
        let mut index = Index::new(0x1F92, attrs);
        let mut count = ObjectAttributes::new("NumberOfEntries", ObjectType::Var);
        count.data_type = Some(DataType::new(0x0005, "Unsigned8", Some(8)));
        index.add_sub_index(SubIndex::new(0, count)).unwrap();
        let mut timeout = ObjectAttributes::new("CN1", ObjectType::Var);
        timeout.actual_value = Some("25000".into());
        index.add_sub_index(SubIndex::new(1, timeout)).unwrap();
        index.add_sub_index(SubIndex::new(2, ObjectAttributes::new("CN2", ObjectType::Var))).unwrap();
        index.update_array_sub_objects();
        index.update_number_of_entries();

        let mut mn = Node::new(240, NodeType::Mn, "MN").unwrap();
        mn.indices.add(index).unwrap();
        let records = node_records(&mn).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].sub_index, 1);
        assert_eq!(records[0].data, "000061A8");
        assert_eq!(records[1].sub_index, 0);
        assert_eq!(records[1].data, "02");
    }

    #[test]
    fn test_pi_objects_and_unsized_types_skipped() {
        let mut mn = Node::new(240, NodeType::Mn, "MN").unwrap();
        mn.indices.add(var(0xA040, Some("1"))).unwrap();
        let mut name = ObjectAttributes::new("DeviceName", ObjectType::Var);
        name.data_type = Some(DataType::new(0x0009, "Visible_String", None));
        name.actual_value = Some("node".into());
        mn.indices.add(Index::new(0x1008, name)).unwrap();
        assert!(node_records(&mn).unwrap().is_empty());
    }

    #[test]
    fn test_negative_value_twos_complement() {
        let mut mn = Node::new(240, NodeType::Mn, "MN").unwrap();
        let mut attrs = ObjectAttributes::new("Offset", ObjectType::Var);
        attrs.data_type = Some(DataType::new(0x0003, "Integer16", Some(16)));
        attrs.actual_value = Some("-2".into());
        mn.indices.add(Index::new(0x2000, attrs)).unwrap();
        let records = node_records(&mn).unwrap();
        assert_eq!(records[0].data, "FFFE");
    }

    #[test]
    fn test_missing_mn() {
        let project = Project::new();
        assert_eq!(write_configuration(&project), Err(ConfigError::MnNodeDoesntExist));
    }
}
