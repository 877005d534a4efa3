// crates/powerlink-rs-config/src/od/import.rs
//! The seam between a device description reader and the Object Dictionary.
//!
//! A reader exposes each `Object`/`SubObject` element through
//! [`ObjectSource`]; [`import_object`] turns it into a validated [`Index`].

use super::data_type::DataTypeCollection;
use super::entry::{AccessType, ObjectAttributes, ObjectType, PdoMapping};
use super::index::{Index, SubIndex};
use super::utils::{parse_index_id, parse_sub_index_id};
use crate::error::ConfigError;
use crate::log::my_warn;
use crate::node::Parameter;
use alloc::string::{String, ToString};

/// Attributes of an `Object`/`SubObject` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Index,
    SubIndex,
    Name,
    ObjectType,
    DataType,
    AccessType,
    DefaultValue,
    ActualValue,
    PdoMapping,
    LowLimit,
    HighLimit,
    UniqueIdRef,
    CdcFlag,
}

/// A source of object definitions, such as a parsed XDD `Object` element.
pub trait ObjectSource {
    type Sub: ObjectSource;

    fn attribute(&self, attribute: Attribute) -> Option<&str>;

    fn sub_objects(&self) -> &[Self::Sub];
}

/// Builds an [`Index`] (with its subindices) from `source`.
///
/// Datatypes are resolved against `data_types`. An object referencing an
/// application parameter through `uniqueIDRef` takes the datatype, access
/// type and default value from that parameter where it has none of its own.
pub fn import_object<S: ObjectSource>(
    source: &S,
    data_types: &DataTypeCollection,
    parameters: &[Parameter],
) -> Result<Index, ConfigError> {
    let id = parse_index_id(source.attribute(Attribute::Index).unwrap_or(""))?;
    let attributes = read_attributes(source, data_types, parameters);
    let mut index = Index::new(id, attributes);

    for sub in source.sub_objects() {
        let sub_id = parse_sub_index_id(sub.attribute(Attribute::SubIndex).unwrap_or(""))?;
        let attributes = read_attributes(sub, data_types, parameters);
        index.add_sub_index(SubIndex::new(sub_id, attributes))?;
    }

    index.update_array_sub_objects();
    Ok(index)
}

fn read_attributes<S: ObjectSource>(
    source: &S,
    data_types: &DataTypeCollection,
    parameters: &[Parameter],
) -> ObjectAttributes {
    let text = |attribute| source.attribute(attribute).map(ToString::to_string);

    let mut attrs = ObjectAttributes {
        name: text(Attribute::Name).unwrap_or_default(),
        object_type: source
            .attribute(Attribute::ObjectType)
            .map(ObjectType::parse)
            .unwrap_or_default(),
        data_type: None,
        access_type: source
            .attribute(Attribute::AccessType)
            .map(AccessType::parse)
            .unwrap_or_default(),
        pdo_mapping: source
            .attribute(Attribute::PdoMapping)
            .map(PdoMapping::parse)
            .unwrap_or_default(),
        low_limit: text(Attribute::LowLimit),
        high_limit: text(Attribute::HighLimit),
        default_value: text(Attribute::DefaultValue),
        actual_value: text(Attribute::ActualValue),
        unique_id_ref: text(Attribute::UniqueIdRef),
        include_in_cdc: source
            .attribute(Attribute::CdcFlag)
            .is_some_and(|v| v.eq_ignore_ascii_case("TRUE")),
    };

    let mut data_type_ref: Option<String> = text(Attribute::DataType);

    if let Some(param) = attrs
        .unique_id_ref
        .as_deref()
        .and_then(|r| parameters.iter().find(|p| p.unique_id == r))
    {
        if data_type_ref.is_none() {
            data_type_ref = param.data_type.clone();
        }
        if attrs.access_type == AccessType::Invalid {
            if let Some(access) = param.access.as_deref() {
                attrs.access_type = AccessType::parse(access);
            }
        }
        if attrs.default_value.is_none() {
            attrs.default_value = param.default_value.clone();
        }
    }

    if let Some(reference) = data_type_ref.as_deref() {
        attrs.data_type = data_types.resolve(reference).cloned();
        if attrs.data_type.is_none() {
            my_warn!(
                "[OD] Object '{}': datatype '{}' not found, left unresolved.",
                attrs.name,
                reference
            );
        }
    }
    attrs
}
