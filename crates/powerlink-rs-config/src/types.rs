use core::convert::TryFrom;
use core::fmt;

/// Represents a POWERLINK Node ID, wrapping a `u8` to ensure type safety.
///
/// Configurable Node IDs are in the range 1-254; 240 is reserved for the
/// Managing Node. This newtype pattern prevents accidental use of invalid
/// `u8` values where a `NodeId` is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u8);

// --- Protocol Constants (Appendix 3) ---

/// POWERLINK default Node ID of the Managing Node (240 or F0h)
pub const C_ADR_MN_DEF_NODE_ID: u8 = 240;

/// Highest Node ID accepted by the configurator (254 or FEh)
pub const C_ADR_MAX_NODE_ID: u8 = 254;

/// Maximum size of PReq and PRes payload data (1490 Byte)
pub const C_DLL_ISOCHR_MAX_PAYL: usize = 1490;

/// Maximum number of mapping entries in one PDO channel.
pub const MAX_CHANNEL_OBJECTS: usize = 254;

/// Number of usable subindex slots in one process-image index (subindex 0 is NumberOfEntries).
pub const PI_SUBINDEX_SLOTS: u32 = 252;

/// Maximum process-image size per direction, in bytes.
pub const MAX_PI_SIZE: usize = 4064;

/// Upper bound of the MN feature `PDOTPDOChannels`.
pub const MAX_TPDO_CHANNELS: u32 = 256;

/// Error type for invalid Node ID creation.
#[derive(Debug, PartialEq, Eq)]
pub enum NodeIdError {
    /// Node ID is outside the valid range (1-254).
    InvalidRange(u8),
}

impl fmt::Display for NodeIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeIdError::InvalidRange(value) => {
                write!(f, "NodeId '{}' invalid. Valid range is 1-254.", value)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for NodeIdError {}

impl TryFrom<u8> for NodeId {
    type Error = NodeIdError;

    /// Creates a `NodeId` from a `u8`, returning an error if the value is not a
    /// configurable POWERLINK node identifier.
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1..=C_ADR_MAX_NODE_ID => Ok(NodeId(value)),
            _ => Err(NodeIdError::InvalidRange(value)),
        }
    }
}

impl From<NodeId> for u8 {
    /// Converts a `NodeId` back into its underlying `u8` representation.
    fn from(node_id: NodeId) -> Self {
        node_id.0
    }
}

impl NodeId {
    /// The Managing Node's fixed identifier.
    pub const MN: NodeId = NodeId(C_ADR_MN_DEF_NODE_ID);

    pub fn is_mn(&self) -> bool {
        self.0 == C_ADR_MN_DEF_NODE_ID
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role of a node in the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// Managing Node
    Mn,
    /// Controlled Node
    Cn,
}

/// How a Controlled Node is served within the POWERLINK cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StationType {
    #[default]
    Normal,
    Multiplexed,
    Chained,
}

/// Process Data Object class of an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PdoType {
    /// Transmit PDO (communication 0x18xx, mapping 0x1Axx)
    Tpdo,
    /// Receive PDO (communication 0x14xx, mapping 0x16xx)
    Rpdo,
}

/// Direction of a process-image variable, seen from the application on the MN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    /// Data produced by a CN (CN TPDO).
    Input,
    /// Data consumed by a CN (CN RPDO).
    Output,
}

impl From<PdoType> for Direction {
    fn from(pdo_type: PdoType) -> Self {
        match pdo_type {
            PdoType::Tpdo => Direction::Input,
            PdoType::Rpdo => Direction::Output,
        }
    }
}
