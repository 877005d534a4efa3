// crates/powerlink-rs-config/src/cdc/file.rs

use super::codec::txt_to_cdc;
use crate::error::ConfigError;
use crate::log::{my_error, my_info};
use std::fs;
use std::path::Path;

/// Converts the CDC text at `input` into binary CDC at `output` and returns
/// the number of bytes written.
///
/// The whole input is converted in memory first, so malformed input never
/// leaves a partial output file.
pub fn convert_file(input: &Path, output: &Path) -> Result<usize, ConfigError> {
    let text = fs::read_to_string(input).map_err(|e| ConfigError::CannotOpenFile {
        path: input.display().to_string(),
        reason: e.to_string(),
    })?;
    let cdc = txt_to_cdc(&text).map_err(|e| {
        my_error!("[CDC] {} is malformed: {}", input.display(), e);
        ConfigError::from(e)
    })?;
    fs::write(output, &cdc).map_err(|e| ConfigError::FileWriteFailed {
        path: output.display().to_string(),
        reason: e.to_string(),
    })?;
    my_info!(
        "[CDC] Wrote {} bytes to {}.",
        cdc.len(),
        output.display()
    );
    Ok(cdc.len())
}
