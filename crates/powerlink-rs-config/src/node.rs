// crates/powerlink-rs-config/src/node.rs

use crate::error::ConfigError;
use crate::log::{LogContext, my_debug, my_info};
use crate::od::{DataTypeCollection, IndexCollection, ObjectSource, import_object};
use crate::od::validation::validate_value;
use crate::pi::ProcessImageVar;
use crate::types::{
    C_ADR_MN_DEF_NODE_ID, MAX_TPDO_CHANNELS, NodeId, NodeType, StationType,
};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

/// An application parameter from the device's `ApplicationProcess`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameter {
    pub unique_id: String,
    pub name: String,
    /// Raw `access` attribute (`read`, `readWrite`, ...).
    pub access: Option<String>,
    /// Datatype name or id, resolvable through a [`DataTypeCollection`].
    pub data_type: Option<String>,
    pub default_value: Option<String>,
    pub actual_value: Option<String>,
}

/// One member of a [`ComplexDataType`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VarDeclaration {
    pub unique_id: String,
    pub name: String,
    pub data_type: Option<String>,
    /// Size in bits for bit strings.
    pub size: Option<u32>,
}

/// A `struct` from the `ApplicationProcess` data type list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComplexDataType {
    pub unique_id: String,
    pub name: String,
    pub var_declarations: Vec<VarDeclaration>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationProcess {
    pub parameters: Vec<Parameter>,
    pub complex_data_types: Vec<ComplexDataType>,
}

impl ApplicationProcess {
    pub fn parameter(&self, unique_id: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.unique_id == unique_id)
    }

    pub fn complex_data_type(&self, unique_id: &str) -> Option<&ComplexDataType> {
        self.complex_data_types
            .iter()
            .find(|c| c.unique_id == unique_id)
    }
}

/// Feature attributes from the device's `NetworkManagement` section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkManagementFeatures {
    pub general: BTreeMap<String, String>,
    pub mn: BTreeMap<String, String>,
    pub cn: BTreeMap<String, String>,
}

/// A POWERLINK node and everything configured on it.
#[derive(Debug, Clone)]
pub struct Node {
    node_id: u8,
    node_type: NodeType,
    pub name: String,
    station_type: StationType,
    pub indices: IndexCollection,
    pub data_types: DataTypeCollection,
    pub application_process: ApplicationProcess,
    pub features: NetworkManagementFeatures,
    pub process_image_vars: Vec<ProcessImageVar>,
    forced_cycle: Option<u8>,
    poll_response_timeout: Option<u32>,
}

impl Node {
    /// Creates an empty node. The MN must use node id 240, a CN any other id
    /// in 1-254.
    pub fn new(node_id: u8, node_type: NodeType, name: impl Into<String>) -> Result<Self, ConfigError> {
        let id = NodeId::try_from(node_id)?;
        match node_type {
            NodeType::Mn if !id.is_mn() => return Err(ConfigError::InvalidNodeId(node_id)),
            NodeType::Cn if id.is_mn() => return Err(ConfigError::InvalidNodeId(node_id)),
            _ => {}
        }
        Ok(Self {
            node_id,
            node_type,
            name: name.into(),
            station_type: StationType::Normal,
            indices: IndexCollection::new(),
            data_types: DataTypeCollection::builtin(),
            application_process: ApplicationProcess::default(),
            features: NetworkManagementFeatures::default(),
            process_image_vars: Vec::new(),
            forced_cycle: None,
            poll_response_timeout: None,
        })
    }

    pub fn node_id(&self) -> u8 {
        self.node_id
    }

    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    pub fn is_mn(&self) -> bool {
        self.node_type == NodeType::Mn
    }

    pub fn station_type(&self) -> StationType {
        self.station_type
    }

    /// Changes the station type. A chained station has to be reset to
    /// `Normal` before it can become multiplexed, and vice versa.
    pub fn set_station_type(&mut self, station_type: StationType) -> Result<(), ConfigError> {
        match (self.station_type, station_type) {
            (StationType::Chained, StationType::Multiplexed)
            | (StationType::Multiplexed, StationType::Chained) => {
                Err(ConfigError::ChainedAndMultiplexed {
                    node_id: self.node_id,
                })
            }
            (_, new) => {
                if new != StationType::Multiplexed {
                    self.forced_cycle = None;
                }
                self.station_type = new;
                Ok(())
            }
        }
    }

    pub fn forced_cycle(&self) -> Option<u8> {
        self.forced_cycle
    }

    pub(crate) fn set_forced_cycle_value(&mut self, cycle: Option<u8>) {
        self.forced_cycle = cycle;
    }

    pub fn poll_response_timeout(&self) -> Option<u32> {
        self.poll_response_timeout
    }

    pub(crate) fn set_poll_response_timeout_value(&mut self, timeout_ns: u32) {
        self.poll_response_timeout = Some(timeout_ns);
    }

    /// Imports one object definition into the Object Dictionary.
    pub fn import_object<S: ObjectSource>(&mut self, source: &S) -> Result<(), ConfigError> {
        let index = import_object(
            source,
            &self.data_types,
            &self.application_process.parameters,
        )?;
        my_debug!(
            LogContext::node("od", self.node_id),
            "Imported object {} '{}'.",
            index.id_str(),
            index.attributes.name
        );
        self.indices.add(index)
    }

    /// The effective value of `index`/`sub_index`. Use `None` for a VAR.
    pub fn object_value(&self, index: u16, sub_index: Option<u8>) -> Option<&str> {
        let idx = self.indices.get(index)?;
        match sub_index {
            None => idx.attributes.effective_value(),
            Some(sub) => idx.sub_index(sub)?.attributes.effective_value(),
        }
    }

    /// Sets the actual value of a subindex after checking it against the
    /// object's limits.
    pub fn set_sub_index_actual_value(
        &mut self,
        index: u16,
        sub_index: u8,
        value: &str,
    ) -> Result<(), ConfigError> {
        let node_id = self.node_id;
        let sub = self.indices.index_ref_mut(index)?.sub_index_ref_mut(sub_index)?;
        validate_value(&sub.attributes, value, node_id)?;
        sub.attributes.actual_value = Some(value.to_string());
        Ok(())
    }

    /// Sets the actual value of a subindex-less object.
    pub fn set_index_actual_value(&mut self, index: u16, value: &str) -> Result<(), ConfigError> {
        let node_id = self.node_id;
        let idx = self.indices.index_ref_mut(index)?;
        validate_value(&idx.attributes, value, node_id)?;
        idx.attributes.actual_value = Some(value.to_string());
        Ok(())
    }

    /// Number of TPDO channels the MN supports, from the `PDOTPDOChannels`
    /// MN feature. A missing or empty feature means 0.
    pub fn max_tpdo_channels(&self) -> Result<u32, ConfigError> {
        let raw = match self.features.mn.get("PDOTPDOChannels") {
            Some(v) if !v.trim().is_empty() => v.trim(),
            _ => return Ok(0),
        };
        let count = crate::od::utils::parse_value(raw)
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| ConfigError::InvalidValue {
                value: raw.to_string(),
                expected: "number of TPDO channels",
            })?;
        if count > MAX_TPDO_CHANNELS {
            return Err(ConfigError::ExceedsMaxTpdoChannels(count));
        }
        Ok(count)
    }
}

/// All nodes of a project, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct NodeCollection {
    nodes: Vec<Node>,
}

impl NodeCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node. Node ids must be unique and only one MN may exist.
    pub fn add(&mut self, node: Node) -> Result<(), ConfigError> {
        if self.contains(node.node_id) {
            return Err(ConfigError::NodeAlreadyExists(node.node_id));
        }
        if node.is_mn() {
            if node.node_id != C_ADR_MN_DEF_NODE_ID {
                return Err(ConfigError::InvalidNodeId(node.node_id));
            }
            if self.managing_node().is_ok() {
                return Err(ConfigError::InvalidNodeType {
                    node_id: node.node_id,
                });
            }
        }
        my_info!(
            LogContext::node("nodes", node.node_id),
            "Added {:?} '{}'.",
            node.node_type,
            node.name
        );
        self.nodes.push(node);
        Ok(())
    }

    pub fn remove_at(&mut self, pos: usize) -> Option<Node> {
        if pos < self.nodes.len() {
            Some(self.nodes.remove(pos))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub fn get_by_position(&self, pos: usize) -> Option<&Node> {
        self.nodes.get(pos)
    }

    pub fn get(&self, node_id: u8) -> Option<&Node> {
        self.nodes.iter().find(|n| n.node_id == node_id)
    }

    pub fn get_mut(&mut self, node_id: u8) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.node_id == node_id)
    }

    pub fn node_ref(&self, node_id: u8) -> Result<&Node, ConfigError> {
        self.get(node_id).ok_or(ConfigError::NodeIdNotFound(node_id))
    }

    pub fn node_ref_mut(&mut self, node_id: u8) -> Result<&mut Node, ConfigError> {
        self.get_mut(node_id)
            .ok_or(ConfigError::NodeIdNotFound(node_id))
    }

    pub fn contains(&self, node_id: u8) -> bool {
        self.get(node_id).is_some()
    }

    pub fn count_by_type(&self, node_type: NodeType) -> usize {
        self.nodes.iter().filter(|n| n.node_type == node_type).count()
    }

    pub fn managing_node(&self) -> Result<&Node, ConfigError> {
        self.nodes
            .iter()
            .find(|n| n.is_mn())
            .ok_or(ConfigError::MnNodeDoesntExist)
    }

    pub fn managing_node_mut(&mut self) -> Result<&mut Node, ConfigError> {
        self.nodes
            .iter_mut()
            .find(|n| n.is_mn())
            .ok_or(ConfigError::MnNodeDoesntExist)
    }

    /// Ids of all Controlled Nodes, in insertion order.
    pub fn cn_ids(&self) -> Vec<u8> {
        self.nodes
            .iter()
            .filter(|n| !n.is_mn())
            .map(|n| n.node_id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.iter_mut()
    }
}
