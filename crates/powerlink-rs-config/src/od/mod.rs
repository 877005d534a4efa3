// crates/powerlink-rs-config/src/od/mod.rs

mod collection;
pub mod constants;
mod data_type;
mod entry;
pub mod import;
mod index;
pub mod utils;
pub mod validation;

pub use collection::IndexCollection;
pub use data_type::{DataType, DataTypeCollection};
pub use entry::{AccessType, ObjectAttributes, ObjectType, PdoMapping};
pub use import::{Attribute, ObjectSource, import_object};
pub use index::{Index, SubIndex};
