// crates/powerlink-rs-config/src/od/collection.rs

use super::index::Index;
use super::utils::parse_index_id;
use crate::error::ConfigError;
use crate::pdo::classify_id;
use crate::pdo::is_process_image_index;
use crate::types::PdoType;
use alloc::vec::Vec;

/// The Object Dictionary of one node, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct IndexCollection {
    indices: Vec<Index>,
}

impl IndexCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an index after classifying it as RPDO/TPDO/none.
    pub fn add(&mut self, mut index: Index) -> Result<(), ConfigError> {
        if self.get(index.id()).is_some() {
            return Err(ConfigError::IndexAlreadyExists(index.id()));
        }
        index.pdo_type = classify_id(index.id());
        self.indices.push(index);
        Ok(())
    }

    pub fn remove_at(&mut self, pos: usize) -> Option<Index> {
        if pos < self.indices.len() {
            Some(self.indices.remove(pos))
        } else {
            None
        }
    }

    pub fn remove(&mut self, id: u16) -> Option<Index> {
        let pos = self.indices.iter().position(|i| i.id() == id)?;
        Some(self.indices.remove(pos))
    }

    pub fn clear(&mut self) {
        self.indices.clear();
    }

    pub fn get_by_position(&self, pos: usize) -> Option<&Index> {
        self.indices.get(pos)
    }

    pub fn get(&self, id: u16) -> Option<&Index> {
        self.indices.iter().find(|i| i.id() == id)
    }

    pub fn get_mut(&mut self, id: u16) -> Option<&mut Index> {
        self.indices.iter_mut().find(|i| i.id() == id)
    }

    /// Looks an index up by its textual id, ignoring case and `0x`.
    pub fn get_by_str(&self, id: &str) -> Option<&Index> {
        parse_index_id(id).ok().and_then(|id| self.get(id))
    }

    pub fn index_ref(&self, id: u16) -> Result<&Index, ConfigError> {
        self.get(id).ok_or(ConfigError::IndexIdNotFound { index: id })
    }

    pub fn index_ref_mut(&mut self, id: u16) -> Result<&mut Index, ConfigError> {
        self.get_mut(id)
            .ok_or(ConfigError::IndexIdNotFound { index: id })
    }

    /// True if the index exists and, when given, so does the subindex.
    ///
    /// Subindex `00` of an index without any subobjects counts as present,
    /// since a plain VAR is addressed as `<index>/00`.
    pub fn contains(&self, index: u16, sub_index: Option<u8>) -> bool {
        match (self.get(index), sub_index) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(idx), Some(0)) if !idx.has_sub_indices() => true,
            (Some(idx), Some(sub)) => idx.contains_sub_index(sub),
        }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Index> {
        self.indices.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Index> {
        self.indices.iter_mut()
    }

    /// Indices of one PDO class, in insertion order.
    pub fn pdo_indices(&self, pdo_type: PdoType) -> impl Iterator<Item = &Index> {
        self.indices
            .iter()
            .filter(move |i| i.pdo_type() == Some(pdo_type))
    }

    /// Removes every RPDO/TPDO communication and mapping index.
    pub fn delete_pdos(&mut self) {
        self.indices.retain(|i| i.pdo_type().is_none());
    }

    /// Removes every process-image object (`A000`-`AFFF`).
    pub fn delete_pi_objects(&mut self) {
        self.indices.retain(|i| !is_process_image_index(i.id()));
    }
}
