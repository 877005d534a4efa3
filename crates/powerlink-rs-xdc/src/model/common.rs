// crates/powerlink-rs-xdc/src/model/common.rs

//! Small element shapes shared by both profile bodies.

use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// `readOnly` is true unless the file says otherwise.
pub(super) fn bool_true() -> bool {
    true
}

/// Represents `<label lang="en">Value</label>`
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Label {
    #[serde(rename = "@lang", default)]
    pub lang: String,
    #[serde(rename = "$text", default)]
    pub value: String,
}

/// First English label, else the first label of any language.
pub fn preferred_label(labels: &[Label]) -> Option<&str> {
    labels
        .iter()
        .find(|l| l.lang.eq_ignore_ascii_case("en"))
        .or_else(|| labels.first())
        .map(|l| l.value.as_str())
}

/// Represents `<vendorName readOnly="true">Value</vendorName>`.
/// Also used for `productName` and `productID`.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct ReadOnlyString {
    #[serde(rename = "@readOnly", default = "bool_true")]
    pub read_only: bool,
    #[serde(rename = "$text", default)]
    pub value: String,
}

/// An element that only matters by its presence, such as `<USINT/>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
pub struct Empty {}

/// Represents `<dataTypeIDRef>` (EPSG 311, 7.4.7.4.3.3).
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct DataTypeIDRef {
    #[serde(rename = "@uniqueIDRef")]
    pub unique_id_ref: String,
}

/// A value-holding element like `<defaultValue value="0x01"/>`.
/// (EPSG 311, 7.4.7.7.2.4, 7.4.7.7.2.5).
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct Value {
    #[serde(rename = "@value")]
    pub value: String,
}

/// Labels attached to an element, kept as a list since several languages
/// may follow each other.
pub type Labels = Vec<Label>;
