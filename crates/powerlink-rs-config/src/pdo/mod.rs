// crates/powerlink-rs-config/src/pdo/mod.rs

pub mod address;
pub mod classify;
pub mod derive;
pub mod mapping;

pub use address::{
    PiAddress, assign_pi_address, is_process_image_index, pi_data_type_name, pi_name,
};
pub use classify::{classify, classify_id};
pub use derive::{add_pdo_indices_to_mn, assign_addresses, derive_node_vars};
pub use mapping::PdoMappingEntry;
