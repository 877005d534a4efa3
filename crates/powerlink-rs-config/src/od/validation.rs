// crates/powerlink-rs-config/src/od/validation.rs
//! Value range checks and the rules deciding which objects may be mapped
//! into a PDO.

use super::data_type::DataType;
use super::entry::{AccessType, ObjectAttributes, PdoMapping};
use super::utils::parse_value;
use crate::error::ConfigError;
use crate::types::PdoType;
use alloc::string::ToString;

/// Checks `value` against the `low_limit`/`high_limit` of `attributes`.
///
/// Skipped when the value is empty or when neither limit is set to a
/// non-zero number. A limit that is not given is open on that side.
pub fn validate_value(
    attributes: &ObjectAttributes,
    value: &str,
    node_id: u8,
) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    let low = attributes.low_limit.as_deref().and_then(parse_value);
    let high = attributes.high_limit.as_deref().and_then(parse_value);
    if low.unwrap_or(0) == 0 && high.unwrap_or(0) == 0 {
        return Ok(());
    }
    if let (Some(low), Some(high)) = (low, high) {
        if high < low {
            return Err(ConfigError::InvalidUpperLowerLimits { low, high });
        }
    }

    let parsed = parse_value(value).ok_or_else(|| ConfigError::InvalidValue {
        value: value.to_string(),
        expected: "decimal or 0x-prefixed hex number",
    })?;
    let below = low.is_some_and(|l| parsed < l);
    let above = high.is_some_and(|h| parsed > h);
    if below || above {
        return Err(ConfigError::ValueNotWithinRange {
            value: parsed,
            name: attributes.name.clone(),
            node_id,
            low: low.unwrap_or(i128::MIN),
            high: high.unwrap_or(i128::MAX),
        });
    }
    Ok(())
}

/// True if an object with this `PDOmapping` attribute may appear in a
/// channel of the given class.
pub fn check_pdo_mapping(mapping: PdoMapping, pdo_type: PdoType) -> bool {
    match mapping {
        PdoMapping::Default | PdoMapping::Optional => true,
        PdoMapping::Rpdo => pdo_type == PdoType::Rpdo,
        PdoMapping::Tpdo => pdo_type == PdoType::Tpdo,
        PdoMapping::No | PdoMapping::NotDefined => false,
    }
}

/// RPDOs write into the object, TPDOs read from it.
pub fn check_access_type_for_pdo(access: AccessType, pdo_type: PdoType) -> bool {
    match pdo_type {
        PdoType::Rpdo => access.is_writable(),
        PdoType::Tpdo => access.is_readable(),
    }
}

/// Only the signed and unsigned 8/16/32/64-bit integers can be mapped into
/// the process image.
pub fn is_allowed_pdo_datatype(data_type: &DataType) -> bool {
    matches!(
        data_type.id,
        0x0002 | 0x0003 | 0x0004 | 0x0015 | 0x0005 | 0x0006 | 0x0007 | 0x001B
    )
}
