// crates/powerlink-rs-config/src/od/index.rs

use super::entry::{ObjectAttributes, ObjectType};
use super::utils::{format_index, format_sub_index, parse_sub_index_id};
use crate::error::ConfigError;
use crate::types::PdoType;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

/// A subobject of an [`Index`].
#[derive(Debug, Clone)]
pub struct SubIndex {
    id: u8,
    pub attributes: ObjectAttributes,
}

impl SubIndex {
    pub fn new(id: u8, attributes: ObjectAttributes) -> Self {
        Self { id, attributes }
    }

    pub fn id(&self) -> u8 {
        self.id
    }

    /// The id as two uppercase hex digits.
    pub fn id_str(&self) -> String {
        format_sub_index(self.id)
    }
}

impl PartialEq for SubIndex {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// An Object Dictionary entry with its subobjects.
///
/// The PDO class is derived from the id when the index is added to an
/// [`IndexCollection`](super::IndexCollection) and cannot be set directly.
#[derive(Debug, Clone)]
pub struct Index {
    id: u16,
    pub attributes: ObjectAttributes,
    pub(crate) pdo_type: Option<PdoType>,
    sub_indices: Vec<SubIndex>,
}

impl PartialEq for Index {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Index {
    pub fn new(id: u16, attributes: ObjectAttributes) -> Self {
        Self {
            id,
            attributes,
            pdo_type: None,
            sub_indices: Vec::new(),
        }
    }

    pub fn id(&self) -> u16 {
        self.id
    }

    /// The id as four uppercase hex digits.
    pub fn id_str(&self) -> String {
        format_index(self.id)
    }

    /// The PDO class assigned at insertion, `None` for non-PDO objects.
    pub fn pdo_type(&self) -> Option<PdoType> {
        self.pdo_type
    }

    pub fn add_sub_index(&mut self, sub_index: SubIndex) -> Result<(), ConfigError> {
        if self.contains_sub_index(sub_index.id) {
            return Err(ConfigError::SubIndexAlreadyExists {
                index: self.id,
                sub_index: sub_index.id,
            });
        }
        self.sub_indices.push(sub_index);
        Ok(())
    }

    /// Removes the subindex at `pos` (insertion order).
    pub fn delete_sub_index(&mut self, pos: usize) -> Option<SubIndex> {
        if pos < self.sub_indices.len() {
            Some(self.sub_indices.remove(pos))
        } else {
            None
        }
    }

    pub fn sub_index_by_position(&self, pos: usize) -> Option<&SubIndex> {
        self.sub_indices.get(pos)
    }

    pub fn sub_index(&self, id: u8) -> Option<&SubIndex> {
        self.sub_indices.iter().find(|s| s.id == id)
    }

    pub fn sub_index_mut(&mut self, id: u8) -> Option<&mut SubIndex> {
        self.sub_indices.iter_mut().find(|s| s.id == id)
    }

    /// Looks a subindex up by its textual id, e.g. `"0a"` or `"0A"`.
    pub fn sub_index_by_str(&self, id: &str) -> Option<&SubIndex> {
        parse_sub_index_id(id).ok().and_then(|id| self.sub_index(id))
    }

    pub fn sub_index_ref(&self, id: u8) -> Result<&SubIndex, ConfigError> {
        self.sub_index(id).ok_or(ConfigError::SubIndexIdNotFound {
            index: self.id,
            sub_index: id,
        })
    }

    pub fn sub_index_ref_mut(&mut self, id: u8) -> Result<&mut SubIndex, ConfigError> {
        let index = self.id;
        self.sub_index_mut(id)
            .ok_or(ConfigError::SubIndexIdNotFound {
                index,
                sub_index: id,
            })
    }

    pub fn contains_sub_index(&self, id: u8) -> bool {
        self.sub_index(id).is_some()
    }

    pub fn has_sub_indices(&self) -> bool {
        !self.sub_indices.is_empty()
    }

    pub fn sub_index_count(&self) -> usize {
        self.sub_indices.len()
    }

    pub fn sub_indices(&self) -> impl Iterator<Item = &SubIndex> {
        self.sub_indices.iter()
    }

    /// Copies the datatype of an ARRAY into every subobject except `00`.
    pub fn update_array_sub_objects(&mut self) {
        if self.attributes.object_type != ObjectType::Array {
            return;
        }
        let data_type = self.attributes.data_type.clone();
        for sub in self.sub_indices.iter_mut().filter(|s| s.id != 0) {
            sub.attributes.data_type = data_type.clone();
        }
    }

    /// Writes the number of non-zero subindices into subindex `00`, if present.
    pub fn update_number_of_entries(&mut self) {
        let count = self.sub_indices.iter().filter(|s| s.id != 0).count();
        if let Some(sub0) = self.sub_index_mut(0) {
            sub0.attributes.actual_value = Some(format!("0x{:02X}", count));
        }
    }

    /// Number of entries in use: the value of subindex `00`, else the number
    /// of non-zero subindices.
    pub fn number_of_entries(&self) -> usize {
        self.sub_index(0)
            .and_then(|s| s.attributes.effective_value())
            .and_then(super::utils::parse_value)
            .and_then(|v| usize::try_from(v).ok())
            .unwrap_or_else(|| self.sub_indices.iter().filter(|s| s.id != 0).count())
    }
}
