// crates/powerlink-rs-config/src/pdo/derive.rs

//! Turns the PDO mapping objects of a CN into process-image variables and
//! the matching MN objects.

use super::address::{PiAddress, assign_pi_address, pi_data_type_name, pi_name};
use super::classify::is_mapping_index;
use super::mapping::PdoMappingEntry;
use crate::error::ConfigError;
use crate::log::{LogContext, my_debug, my_warn};
use crate::node::Node;
use crate::od::constants::SUBIDX_NUMBER_OF_ENTRIES;
use crate::od::utils::format_index;
use crate::od::validation::{check_access_type_for_pdo, check_pdo_mapping, is_allowed_pdo_datatype};
use crate::od::{AccessType, Index, ObjectAttributes, ObjectType, PdoMapping, SubIndex};
use crate::pi::{IecDatatype, ProcessImageVar};
use crate::types::{C_DLL_ISOCHR_MAX_PAYL, Direction, MAX_CHANNEL_OBJECTS, PdoType};
use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

/// Running byte offset per (datatype, direction) window.
pub type LinearOffsets = BTreeMap<(IecDatatype, Direction), u32>;

/// Reads every mapping channel (`16xx`, `1Axx`) of `cn` and returns one
/// variable per mapped object, in OD order. Addresses are not assigned yet.
pub fn derive_node_vars(cn: &Node) -> Result<Vec<ProcessImageVar>, ConfigError> {
    let mut vars = Vec::new();
    for mapping in cn.indices.iter().filter(|i| is_mapping_index(i.id())) {
        let Some(pdo_type) = mapping.pdo_type() else {
            continue;
        };
        derive_channel(cn, mapping, pdo_type, &mut vars)?;
    }
    Ok(vars)
}

fn derive_channel(
    cn: &Node,
    mapping: &Index,
    pdo_type: PdoType,
    vars: &mut Vec<ProcessImageVar>,
) -> Result<(), ConfigError> {
    let node_id = cn.node_id();
    let channel = mapping.id() & 0x00FF;
    let in_use = mapping.number_of_entries();

    let mut objects = 0usize;
    let mut payload_bits = 0u32;

    for sub in mapping.sub_indices() {
        if sub.id() == SUBIDX_NUMBER_OF_ENTRIES || usize::from(sub.id()) > in_use {
            continue;
        }
        let Some(entry) = sub
            .attributes
            .effective_value()
            .and_then(PdoMappingEntry::parse)
        else {
            continue;
        };
        if entry.is_empty() {
            continue;
        }

        objects += 1;
        if objects > MAX_CHANNEL_OBJECTS {
            return Err(ConfigError::ChannelObjectLimitExceeded {
                node_id,
                channel,
                objects,
            });
        }
        payload_bits = payload_bits.max(entry.end_bits());
        let bytes = payload_bits.div_ceil(8) as usize;
        if bytes > C_DLL_ISOCHR_MAX_PAYL {
            return Err(ConfigError::ChannelPayloadLimitExceeded {
                node_id,
                channel,
                bytes,
            });
        }

        vars.push(map_entry(cn, channel, sub.id(), entry, pdo_type)?);
    }
    my_debug!(
        LogContext::node("pdo", node_id),
        "Channel {} ({:?}) maps {} objects, {} bits.",
        mapping.id_str(),
        pdo_type,
        objects,
        payload_bits
    );
    Ok(())
}

/// Resolves and validates one mapped object.
fn map_entry(
    cn: &Node,
    channel: u16,
    entry_no: u8,
    entry: PdoMappingEntry,
    pdo_type: PdoType,
) -> Result<ProcessImageVar, ConfigError> {
    let node_id = cn.node_id();
    let missing = |sub_index| ConfigError::MappedObjectNotFound {
        node_id,
        channel,
        entry: entry_no,
        index: entry.index,
        sub_index,
    };
    let index = cn.indices.get(entry.index).ok_or_else(|| missing(None))?;
    let (attributes, var_name) = if entry.sub_index == 0 && !index.has_sub_indices() {
        (&index.attributes, None)
    } else {
        let sub = index
            .sub_index(entry.sub_index)
            .ok_or_else(|| missing(Some(entry.sub_index)))?;
        (&sub.attributes, Some(sub.attributes.name.clone()))
    };

    if !check_pdo_mapping(attributes.pdo_mapping, pdo_type) {
        return Err(ConfigError::InvalidMappingTypeForPdo {
            node_id,
            channel,
            entry: entry_no,
            index: entry.index,
            sub_index: entry.sub_index,
        });
    }
    if !check_access_type_for_pdo(attributes.access_type, pdo_type) {
        return Err(ConfigError::InvalidAccessTypeForPdo {
            node_id,
            channel,
            entry: entry_no,
            index: entry.index,
            sub_index: entry.sub_index,
            access: attributes.access_type,
        });
    }
    let data_type = match &attributes.data_type {
        Some(dt) if is_allowed_pdo_datatype(dt) => dt,
        other => {
            return Err(ConfigError::InvalidDatatypeForPdo {
                node_id,
                index: entry.index,
                sub_index: entry.sub_index,
                data_type: other
                    .as_ref()
                    .map(|dt| dt.name.clone())
                    .unwrap_or_default(),
            });
        }
    };
    let expected_bits = data_type.bit_size.unwrap_or(0);
    if u32::from(entry.length_bits) != expected_bits {
        return Err(ConfigError::InvalidSizeMapped {
            node_id,
            channel,
            entry: entry_no,
            actual_bits: entry.length_bits,
            expected_bits,
        });
    }

    let mut var = ProcessImageVar {
        name: String::new(),
        direction: Direction::from(pdo_type),
        data_type: IecDatatype::from_data_type(data_type),
        bit_size: expected_bits,
        byte_offset: 0,
        bit_offset: 0,
        owner_node_id: node_id,
        module_index: format_index(entry.index),
        module_name: index.attributes.name.clone(),
        var_name,
        pi_address: None,
        source_index: entry.index,
        source_sub_index: entry.sub_index,
    };
    var.refresh_name();
    Ok(var)
}

/// Gives each variable its MN address, advancing the running offset of its
/// (datatype, direction) window by the variable's byte size.
pub fn assign_addresses(vars: &mut [ProcessImageVar], offsets: &mut LinearOffsets) {
    for var in vars.iter_mut() {
        let Some(data_type) = var.data_type else {
            my_warn!("[PDO] '{}' has no IEC datatype, no address assigned.", var.name);
            continue;
        };
        let offset = offsets.entry((data_type, var.direction)).or_insert(0);
        var.pi_address = assign_pi_address(data_type, var.direction, *offset);
        *offset += var.bit_size / 8;
    }
}

/// Creates (or extends) the MN object for one process-image variable.
///
/// Names are from the CN's network point of view: data a CN receives via
/// RPDO is an MN input (`PI_INPUTS_*`, transmitted by the MN), data a CN
/// sends via TPDO an MN output (`PI_OUTPUTS_*`, received by the MN).
pub fn add_pdo_indices_to_mn(
    mn: &mut Node,
    address: PiAddress,
    cn_pdo_type: PdoType,
) -> Result<(), ConfigError> {
    let tag = pi_name(address.index);
    let (prefix, access, pdo_mapping) = match cn_pdo_type {
        PdoType::Rpdo => ("PI_INPUTS", AccessType::ReadOnly, PdoMapping::Tpdo),
        PdoType::Tpdo => ("PI_OUTPUTS", AccessType::ReadWrite, PdoMapping::Rpdo),
    };
    let data_type = mn
        .data_types
        .get_by_name(pi_data_type_name(address.index))
        .cloned();

    if mn.indices.get(address.index).is_none() {
        let mut attributes =
            ObjectAttributes::new(format!("{}_A{}", prefix, tag), ObjectType::Array);
        attributes.data_type = data_type.clone();
        let mut index = Index::new(address.index, attributes);
        let mut count = ObjectAttributes::new("NumberOfEntries", ObjectType::Var);
        count.data_type = mn.data_types.get(0x0005).cloned();
        count.access_type = AccessType::ReadOnly;
        index.add_sub_index(SubIndex::new(SUBIDX_NUMBER_OF_ENTRIES, count))?;
        mn.indices.add(index)?;
    }

    let mut attributes = ObjectAttributes::new(format!("{}_{}", prefix, tag), ObjectType::Var);
    attributes.data_type = data_type;
    attributes.access_type = access;
    attributes.pdo_mapping = pdo_mapping;

    let index = mn.indices.index_ref_mut(address.index)?;
    index.add_sub_index(SubIndex::new(address.sub_index, attributes))?;
    index.update_number_of_entries();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::od::DataType;
    use crate::types::NodeType;

    fn u8_type() -> DataType {
        DataType::new(0x0005, "Unsigned8", Some(8))
    }

    fn mapped_object(id: u16, name: &str, access: AccessType, mapping: PdoMapping) -> Index {
        let mut attrs = ObjectAttributes::new(name, ObjectType::Array);
        attrs.data_type = Some(u8_type());
        let mut index = Index::new(id, attrs);
        index
            .add_sub_index(SubIndex::new(0, ObjectAttributes::new("NumberOfEntries", ObjectType::Var)))
            .unwrap();
        for sub in 1..=2u8 {
            let mut s = ObjectAttributes::new(format!("Channel{}", sub), ObjectType::Var);
            s.data_type = Some(u8_type());
            s.access_type = access;
            s.pdo_mapping = mapping;
            index.add_sub_index(SubIndex::new(sub, s)).unwrap();
        }
        index
    }

    fn mapping_index(id: u16, entries: &[u64]) -> Index {
        let mut index = Index::new(id, ObjectAttributes::new("PDO_Mapping", ObjectType::Record));
        let mut count = ObjectAttributes::new("NumberOfEntries", ObjectType::Var);
        count.actual_value = Some(format!("{}", entries.len()));
        index.add_sub_index(SubIndex::new(0, count)).unwrap();
        for (i, raw) in entries.iter().enumerate() {
            let mut attrs = ObjectAttributes::new(format!("ObjectMapping{}", i + 1), ObjectType::Var);
            attrs.actual_value = Some(format!("0x{:016X}", raw));
            index.add_sub_index(SubIndex::new(i as u8 + 1, attrs)).unwrap();
        }
        index
    }

    fn entry(index: u16, sub_index: u8, offset_bits: u16, length_bits: u16) -> u64 {
        PdoMappingEntry {
            index,
            sub_index,
            offset_bits,
            length_bits,
        }
        .to_u64()
    }

    fn cn_with(objects: Vec<Index>) -> Node {
        let mut cn = Node::new(1, NodeType::Cn, "CN1").unwrap();
        for index in objects {
            cn.indices.add(index).unwrap();
        }
        cn
    }

    #[test]
    fn test_derive_tpdo_and_rpdo() {
        let cn = cn_with(vec![
            mapped_object(0x6000, "DigitalInput", AccessType::ReadOnly, PdoMapping::Tpdo),
            mapped_object(0x6200, "DigitalOutput", AccessType::ReadWrite, PdoMapping::Rpdo),
            mapping_index(0x1600, &[entry(0x6200, 1, 0, 8)]),
            mapping_index(0x1A00, &[entry(0x6000, 1, 0, 8), entry(0x6000, 2, 8, 8)]),
        ]);
        let vars = derive_node_vars(&cn).unwrap();
        assert_eq!(vars.len(), 3);
        assert_eq!(vars[0].direction, Direction::Output);
        assert_eq!(vars[0].name, "CN1.DigitalOutput.Channel1");
        assert_eq!(vars[0].module_index, "6200");
        assert_eq!(vars[1].direction, Direction::Input);
        assert_eq!(vars[2].var_name.as_deref(), Some("Channel2"));
        assert_eq!(vars[2].data_type, Some(IecDatatype::Usint));
        assert_eq!(vars[2].bit_size, 8);
    }

    /// Tests that only the first NumberOfEntries slots count and zero slots are skipped.
    #[test]
    fn test_unused_slots_skipped() {
        let mut mapping = mapping_index(0x1A00, &[0, entry(0x6000, 1, 0, 8), entry(0x6000, 2, 8, 8)]);
        mapping.sub_index_mut(0).unwrap().attributes.actual_value = Some("2".into());
        let cn = cn_with(vec![
            mapped_object(0x6000, "DigitalInput", AccessType::ReadOnly, PdoMapping::Optional),
            mapping,
        ]);
        let vars = derive_node_vars(&cn).unwrap();
        assert_eq!(vars.len(), 1);
        assert_eq!(vars[0].source_sub_index, 1);
    }

    #[test]
    fn test_missing_mapped_object() {
        let cn = cn_with(vec![mapping_index(0x1A00, &[entry(0x6000, 1, 0, 8)])]);
        let r = derive_node_vars(&cn);
        assert_eq!(
            r,
            Err(ConfigError::MappedObjectNotFound {
                node_id: 1,
                channel: 0,
                entry: 1,
                index: 0x6000,
                sub_index: None
            })
        );

        let cn = cn_with(vec![
            mapped_object(0x6000, "DigitalInput", AccessType::ReadOnly, PdoMapping::Tpdo),
            mapping_index(0x1A00, &[entry(0x6000, 5, 0, 8)]),
        ]);
        let r = derive_node_vars(&cn);
        assert_eq!(
            r,
            Err(ConfigError::MappedObjectNotFound {
                node_id: 1,
                channel: 0,
                entry: 1,
                index: 0x6000,
                sub_index: Some(5)
            })
        );
    }

    #[test]
    fn test_mapping_validation_errors() {
        // TPDO-only object in an RPDO channel
        let cn = cn_with(vec![
            mapped_object(0x6000, "DigitalInput", AccessType::ReadWrite, PdoMapping::Tpdo),
            mapping_index(0x1600, &[entry(0x6000, 1, 0, 8)]),
        ]);
        let r = derive_node_vars(&cn);
        assert!(
            matches!(r, Err(ConfigError::InvalidMappingTypeForPdo { channel: 0, entry: 1, .. })),
            "Expected InvalidMappingTypeForPdo, got {:?}",
            r
        );

        // read-only object received through an RPDO
        let cn = cn_with(vec![
            mapped_object(0x6200, "DigitalOutput", AccessType::ReadOnly, PdoMapping::Optional),
            mapping_index(0x1601, &[entry(0x6200, 1, 0, 8)]),
        ]);
        let r = derive_node_vars(&cn);
        assert!(
            matches!(r, Err(ConfigError::InvalidAccessTypeForPdo { channel: 1, access: AccessType::ReadOnly, .. })),
            "Expected InvalidAccessTypeForPdo, got {:?}",
            r
        );

        // mapped length disagrees with Unsigned8
        let cn = cn_with(vec![
            mapped_object(0x6000, "DigitalInput", AccessType::ReadOnly, PdoMapping::Tpdo),
            mapping_index(0x1A00, &[entry(0x6000, 1, 0, 16)]),
        ]);
        let r = derive_node_vars(&cn);
        assert!(
            matches!(r, Err(ConfigError::InvalidSizeMapped { actual_bits: 16, expected_bits: 8, .. })),
            "Expected InvalidSizeMapped, got {:?}",
            r
        );
    }

    #[test]
    fn test_invalid_datatype_for_pdo() {
        let mut object = mapped_object(0x6000, "Text", AccessType::ReadOnly, PdoMapping::Tpdo);
        object.sub_index_mut(1).unwrap().attributes.data_type =
            Some(DataType::new(0x0009, "Visible_String", None));
        let cn = cn_with(vec![object, mapping_index(0x1A00, &[entry(0x6000, 1, 0, 8)])]);
        let r = derive_node_vars(&cn);
        assert_eq!(
            r,
            Err(ConfigError::InvalidDatatypeForPdo {
                node_id: 1,
                index: 0x6000,
                sub_index: 1,
                data_type: "Visible_String".into()
            })
        );
    }

    #[test]
    fn test_channel_payload_limit() {
        let cn = cn_with(vec![
            mapped_object(0x6000, "DigitalInput", AccessType::ReadOnly, PdoMapping::Tpdo),
            mapping_index(0x1A00, &[entry(0x6000, 1, 1490 * 8, 8)]),
        ]);
        let r = derive_node_vars(&cn);
        assert_eq!(
            r,
            Err(ConfigError::ChannelPayloadLimitExceeded {
                node_id: 1,
                channel: 0,
                bytes: 1491
            })
        );
    }

    #[test]
    fn test_assign_addresses_running_offsets() {
        let mk = |dir| crate::pi::pi_var(1, "6000", "M", Some("V"), Some(IecDatatype::Usint), 8, dir);
        let mut vars = vec![mk(Direction::Output), mk(Direction::Output), mk(Direction::Input)];
        let mut offsets = LinearOffsets::new();
        assign_addresses(&mut vars, &mut offsets);
        assert_eq!(vars[0].pi_address, Some(PiAddress { index: 0xA040, sub_index: 1 }));
        assert_eq!(vars[1].pi_address, Some(PiAddress { index: 0xA040, sub_index: 2 }));
        assert_eq!(vars[2].pi_address, Some(PiAddress { index: 0xA4C0, sub_index: 1 }));
        assert_eq!(offsets[&(IecDatatype::Usint, Direction::Output)], 2);
    }

    #[test]
    fn test_add_pdo_indices_to_mn() {
        let mut mn = Node::new(240, NodeType::Mn, "MN").unwrap();
        add_pdo_indices_to_mn(&mut mn, PiAddress { index: 0xA040, sub_index: 1 }, PdoType::Rpdo).unwrap();
        add_pdo_indices_to_mn(&mut mn, PiAddress { index: 0xA040, sub_index: 2 }, PdoType::Rpdo).unwrap();
        add_pdo_indices_to_mn(&mut mn, PiAddress { index: 0xA4C0, sub_index: 1 }, PdoType::Tpdo).unwrap();

        let inputs = mn.indices.get(0xA040).unwrap();
        assert_eq!(inputs.attributes.name, "PI_INPUTS_AU8");
        assert_eq!(inputs.attributes.object_type, ObjectType::Array);
        assert_eq!(inputs.sub_index_count(), 3);
        assert_eq!(mn.object_value(0xA040, Some(0)), Some("0x02"));
        let sub = inputs.sub_index(2).unwrap();
        assert_eq!(sub.attributes.name, "PI_INPUTS_U8");
        assert_eq!(sub.attributes.access_type, AccessType::ReadOnly);
        assert_eq!(sub.attributes.pdo_mapping, PdoMapping::Tpdo);
        assert_eq!(sub.attributes.data_type.as_ref().map(|d| d.id), Some(0x0005));

        let outputs = mn.indices.get(0xA4C0).unwrap();
        assert_eq!(outputs.attributes.name, "PI_OUTPUTS_AU8");
        assert_eq!(outputs.sub_index(1).unwrap().attributes.access_type, AccessType::ReadWrite);

        let dup = add_pdo_indices_to_mn(&mut mn, PiAddress { index: 0xA040, sub_index: 1 }, PdoType::Rpdo);
        assert_eq!(
            dup,
            Err(ConfigError::SubIndexAlreadyExists {
                index: 0xA040,
                sub_index: 1
            })
        );
    }
}
