// crates/powerlink-rs-xdc/src/lib.rs

#![no_std]
#![doc = "Reads and writes POWERLINK XDD/XDC (XML Device Description/Configuration) files."]
#![doc = ""]
#![doc = "This `no_std + alloc` library maps device description files onto the"]
#![doc = "`powerlink-rs-config` entity model."]
#![doc = ""]
#![doc = "It supports:"]
#![doc = "- `load_node_from_xdd_str`: Building a `Node` (objects, data types, parameters, features) from an XDD/XDC."]
#![doc = "- `save_node_to_xdc_string`: Serializing a node's Object Dictionary back into a minimal XDC string."]

extern crate alloc;

// --- Crate Modules ---

mod builder;
mod error;
mod model;
mod parser;

// --- Public API Re-exports ---

pub use builder::save_node_to_xdc_string;
pub use error::XdcError;
pub use parser::load_node_from_xdd_str;
