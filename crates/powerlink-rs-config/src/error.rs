// crates/powerlink-rs-config/src/error.rs

use crate::cdc::CdcError;
use crate::od::AccessType;
use crate::types::NodeIdError;
use alloc::string::String;
use core::fmt;

/// Coarse classification of a [`ConfigError`].
///
/// None of these are transient: every error describes a deterministic data
/// problem that has to be fixed in the input before re-running the step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    InvalidInput,
    Io,
    Format,
    Capacity,
}

/// Errors raised while building or serialising a network configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Node id outside 1-254, or the MN not on 240.
    InvalidNodeId(u8),
    /// A second MN was added, or a node has the wrong role for the operation.
    InvalidNodeType { node_id: u8 },
    /// An index id string that is not 1-4 hex digits.
    InvalidIndexId(String),
    /// A subindex id string that is not 1-2 hex digits.
    InvalidSubIndexId(String),
    NodeIdNotFound(u8),
    /// The project has no Managing Node.
    MnNodeDoesntExist,
    IndexIdNotFound { index: u16 },
    SubIndexIdNotFound { index: u16, sub_index: u8 },
    /// A mapping entry names an object the CN does not have. `sub_index` is
    /// `None` when the index itself is missing.
    MappedObjectNotFound {
        node_id: u8,
        channel: u16,
        entry: u8,
        index: u16,
        sub_index: Option<u8>,
    },
    DataTypeNotFound(String),
    NodeAlreadyExists(u8),
    IndexAlreadyExists(u16),
    SubIndexAlreadyExists { index: u16, sub_index: u8 },
    /// A value that cannot be parsed for its attribute.
    InvalidValue { value: String, expected: &'static str },
    ValueNotWithinRange {
        value: i128,
        name: String,
        node_id: u8,
        low: i128,
        high: i128,
    },
    InvalidUpperLowerLimits { low: i128, high: i128 },
    InvalidDatatypeForPdo {
        node_id: u8,
        index: u16,
        sub_index: u8,
        data_type: String,
    },
    InvalidMappingTypeForPdo {
        node_id: u8,
        channel: u16,
        entry: u8,
        index: u16,
        sub_index: u8,
    },
    InvalidAccessTypeForPdo {
        node_id: u8,
        channel: u16,
        entry: u8,
        index: u16,
        sub_index: u8,
        access: AccessType,
    },
    InvalidSizeMapped {
        node_id: u8,
        channel: u16,
        entry: u8,
        actual_bits: u16,
        expected_bits: u32,
    },
    ChannelPayloadLimitExceeded { node_id: u8, channel: u16, bytes: usize },
    ChannelObjectLimitExceeded { node_id: u8, channel: u16, objects: usize },
    MaxPiSizeExceeded { actual: usize, max: usize },
    ExceedsMaxTpdoChannels(u32),
    MultiplexAssignError { node_id: u8 },
    ChainedAndMultiplexed { node_id: u8 },
    CannotOpenFile { path: String, reason: String },
    FileWriteFailed { path: String, reason: String },
    TextFileFormatting(CdcError),
}

impl ConfigError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NodeIdNotFound(_)
            | Self::MnNodeDoesntExist
            | Self::IndexIdNotFound { .. }
            | Self::SubIndexIdNotFound { .. }
            | Self::MappedObjectNotFound { .. }
            | Self::DataTypeNotFound(_) => ErrorKind::NotFound,
            Self::NodeAlreadyExists(_)
            | Self::IndexAlreadyExists(_)
            | Self::SubIndexAlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::CannotOpenFile { .. } | Self::FileWriteFailed { .. } => ErrorKind::Io,
            Self::TextFileFormatting(_) => ErrorKind::Format,
            Self::ChannelPayloadLimitExceeded { .. }
            | Self::ChannelObjectLimitExceeded { .. }
            | Self::MaxPiSizeExceeded { .. }
            | Self::ExceedsMaxTpdoChannels(_) => ErrorKind::Capacity,
            _ => ErrorKind::InvalidInput,
        }
    }

    /// Stable numeric code, compatible with existing tooling that reports
    /// configurator errors by number.
    pub fn code(&self) -> u32 {
        match self {
            Self::FileWriteFailed { .. } => 2,
            Self::InvalidNodeId(_) => 3,
            Self::InvalidNodeType { .. } => 5,
            Self::InvalidIndexId(_) => 6,
            Self::InvalidSubIndexId(_) => 8,
            Self::NodeIdNotFound(_) => 14,
            Self::IndexIdNotFound { .. } => 15,
            Self::SubIndexIdNotFound { .. } => 16,
            Self::MappedObjectNotFound { sub_index: None, .. } => 15,
            Self::MappedObjectNotFound { sub_index: Some(_), .. } => 16,
            Self::NodeAlreadyExists(_) => 17,
            Self::IndexAlreadyExists(_) => 18,
            Self::SubIndexAlreadyExists { .. } => 19,
            Self::InvalidValue { .. } => 20,
            Self::CannotOpenFile { .. } => 23,
            Self::DataTypeNotFound(_) => 30,
            Self::ValueNotWithinRange { .. } => 31,
            Self::MnNodeDoesntExist => 32,
            Self::InvalidDatatypeForPdo { .. } => 41,
            Self::MaxPiSizeExceeded { .. } => 43,
            Self::MultiplexAssignError { .. } => 45,
            Self::InvalidUpperLowerLimits { .. } => 46,
            Self::TextFileFormatting(_) => 50,
            Self::ExceedsMaxTpdoChannels(_) => 52,
            Self::InvalidSizeMapped { .. } => 55,
            Self::InvalidMappingTypeForPdo { .. } => 56,
            Self::InvalidAccessTypeForPdo { .. } => 57,
            Self::ChainedAndMultiplexed { .. } => 68,
            Self::ChannelPayloadLimitExceeded { .. } => 70,
            Self::ChannelObjectLimitExceeded { .. } => 71,
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNodeId(id) => write!(f, "NodeId '{}' invalid.", id),
            Self::InvalidNodeType { node_id } => {
                write!(f, "Node {} has an invalid node type for this operation.", node_id)
            }
            Self::InvalidIndexId(s) => write!(f, "Index id '{}' invalid.", s),
            Self::InvalidSubIndexId(s) => write!(f, "SubIndex id '{}' invalid.", s),
            Self::NodeIdNotFound(id) => write!(f, "Node with id {} does not exist.", id),
            Self::MnNodeDoesntExist => {
                write!(f, "Configuration does not contain any POWERLINK-MN.")
            }
            Self::IndexIdNotFound { index } => {
                write!(f, "Index {:#X} does not exist in OD.", index)
            }
            Self::SubIndexIdNotFound { index, sub_index } => write!(
                f,
                "SubIndex {:#X}/{:#X} does not exist in OD.",
                index, sub_index
            ),
            Self::MappedObjectNotFound {
                node_id,
                channel,
                entry,
                index,
                sub_index: None,
            } => write!(
                f,
                "Mapping-Object {:#X}/{:#X}: Index {:#X} does not exist on node {}.",
                channel, entry, index, node_id
            ),
            Self::MappedObjectNotFound {
                node_id,
                channel,
                entry,
                index,
                sub_index: Some(sub_index),
            } => write!(
                f,
                "Mapping-Object {:#X}/{:#X}: SubIndex {:#X}/{:#X} does not exist on node {}.",
                channel, entry, index, sub_index, node_id
            ),
            Self::DataTypeNotFound(name) => write!(f, "Datatype '{}' not found.", name),
            Self::NodeAlreadyExists(id) => write!(f, "Node with id {} already exists.", id),
            Self::IndexAlreadyExists(index) => {
                write!(f, "Index {:#X} already exists in OD.", index)
            }
            Self::SubIndexAlreadyExists { index, sub_index } => write!(
                f,
                "SubIndex {:#X}/{:#X} already exists in OD.",
                index, sub_index
            ),
            Self::InvalidValue { value, expected } => {
                write!(f, "Value '{}' invalid. Expected value: '{}'.", value, expected)
            }
            Self::ValueNotWithinRange {
                value,
                name,
                node_id,
                low,
                high,
            } => write!(
                f,
                "Value {} of object '{}' on node {} out of range ({} - {}).",
                value, name, node_id, low, high
            ),
            Self::InvalidUpperLowerLimits { low, high } => write!(
                f,
                "Invalid object limits (high limit '{}' < low limit '{}')",
                high, low
            ),
            Self::InvalidDatatypeForPdo {
                node_id,
                index,
                sub_index,
                data_type,
            } => write!(
                f,
                "Node {}, (Sub)Index {:#X}/{:#X}: Mapping of datatype '{}' not supported. Supported data types: Integer8(16/32/64), Unsigned8(16/32/64).",
                node_id, index, sub_index, data_type
            ),
            Self::InvalidMappingTypeForPdo {
                node_id,
                channel,
                entry,
                index,
                sub_index,
            } => write!(
                f,
                "Mapping-Object {:#X}/{:#X}: (Sub)Index {:#X}/{:#X} on node {} cannot be mapped. Mismatching PDOMapping.",
                channel, entry, index, sub_index, node_id
            ),
            Self::InvalidAccessTypeForPdo {
                node_id,
                channel,
                entry,
                index,
                sub_index,
                access,
            } => write!(
                f,
                "Mapping-Object {:#X}/{:#X}: (Sub)Index {:#X}/{:#X} on node {} cannot be mapped. Invalid access type '{}' (RPDOs must be writeable, TPDOs readable).",
                channel, entry, index, sub_index, node_id, access
            ),
            Self::InvalidSizeMapped {
                node_id,
                channel,
                entry,
                actual_bits,
                expected_bits,
            } => write!(
                f,
                "Mapping-Object {:#X}/{:#X} on node {}: Mapped data-length invalid. Actual: {} bits, expected {} bits.",
                channel, entry, node_id, actual_bits, expected_bits
            ),
            Self::ChannelPayloadLimitExceeded {
                node_id,
                channel,
                bytes,
            } => write!(
                f,
                "Node {}, channel {:#X}: No. of bytes mapped ({}) exceeds limit (1490, C_DLL_ISOCHR_MAX_PAYL)",
                node_id, channel, bytes
            ),
            Self::ChannelObjectLimitExceeded {
                node_id,
                channel,
                objects,
            } => write!(
                f,
                "Node {}, channel {:#X}: No. of channel objects ({}) exceeds limit (254).",
                node_id, channel, objects
            ),
            Self::MaxPiSizeExceeded { actual, max } => write!(
                f,
                "Max. process image size exceeded: Actual: {} bytes, expected: max. {} bytes.",
                actual, max
            ),
            Self::ExceedsMaxTpdoChannels(count) => write!(
                f,
                "MN feature PDOTPDOChannels ({}) exceeds the maximum of 256 channels.",
                count
            ),
            Self::MultiplexAssignError { node_id } => write!(
                f,
                "Index 0x1F9B/{:#04X} exists neither on the MN nor on node {}. Unable to assign the multiplexing cycle.",
                node_id, node_id
            ),
            Self::ChainedAndMultiplexed { node_id } => write!(
                f,
                "Node {} cannot be chained and multiplexed at the same time.",
                node_id
            ),
            Self::CannotOpenFile { path, reason } => {
                write!(f, "Failed to read file '{}': {}", path, reason)
            }
            Self::FileWriteFailed { path, reason } => {
                write!(f, "Failed to write file '{}': {}", path, reason)
            }
            Self::TextFileFormatting(e) => write!(f, "Incorrect formatting of the text file: {}", e),
        }
    }
}

impl From<CdcError> for ConfigError {
    fn from(e: CdcError) -> Self {
        ConfigError::TextFileFormatting(e)
    }
}

impl From<NodeIdError> for ConfigError {
    fn from(e: NodeIdError) -> Self {
        match e {
            NodeIdError::InvalidRange(id) => ConfigError::InvalidNodeId(id),
        }
    }
}
