#![cfg_attr(not(feature = "std"), no_std)]
#![doc = "Configuration core for Ethernet POWERLINK networks."]
#![doc = ""]
#![doc = "Holds the per-node Object Dictionary model, classifies PDO objects, assigns"]
#![doc = "process-image addresses, renders C/C# process-image headers and converts"]
#![doc = "textual CDC sources into binary Configuration Data files."]

// 'alloc' is used for the owned OD tree, names and rendered output
extern crate alloc;

// --- Foundation Modules ---
mod log;
pub mod error;
pub mod types;

// --- Entity Model ---
pub mod node;
pub mod od;
pub mod project;

// --- Configuration Passes ---
pub mod cdc;
pub mod pdo;
pub mod pi;

// --- Top-level Exports ---
pub use error::{ConfigError, ErrorKind};
pub use node::{ApplicationProcess, NetworkManagementFeatures, Node, NodeCollection, Parameter};
pub use od::{
    AccessType, DataType, DataTypeCollection, Index, IndexCollection, ObjectAttributes,
    ObjectType, PdoMapping, SubIndex,
};
pub use pdo::{PdoMappingEntry, PiAddress, assign_pi_address, classify};
pub use pi::{IecDatatype, OutputLanguage, ProcessImageVar};
pub use project::Project;
pub use types::{Direction, NodeId, NodeType, PdoType, StationType};
