// crates/powerlink-rs-config/src/cdc/mod.rs

//! Concise Device Configuration: the textual source the project writes
//! and its conversion into the binary file the MN loads.

mod codec;
mod error;
#[cfg(feature = "std")]
mod file;
pub mod text;

pub use codec::{fix_byte_order, pack, tokenize, txt_to_cdc};
pub use error::CdcError;
#[cfg(feature = "std")]
pub use file::convert_file;
pub use text::write_configuration;
