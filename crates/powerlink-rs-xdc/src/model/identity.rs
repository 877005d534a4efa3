// crates/powerlink-rs-xdc/src/model/identity.rs

//! Vendor and product names of the device profile. Only `productName` is
//! used, as the node's name.

use super::common::ReadOnlyString;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct DeviceIdentity {
    #[serde(rename = "vendorName", default, skip_serializing_if = "Option::is_none")]
    pub vendor_name: Option<ReadOnlyString>,

    #[serde(rename = "vendorID", default, skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<ReadOnlyString>,

    #[serde(rename = "productName", default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<ReadOnlyString>,

    #[serde(rename = "productID", default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ReadOnlyString>,
}
