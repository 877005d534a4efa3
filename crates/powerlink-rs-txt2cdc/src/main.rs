//! Converts a textual CDC source into a binary Configuration Data file.
//!
//! Usage: `txt2cdc <input.txt> <output.cdc>`
//!
//! Exit codes: `0` on success, `1` when the text is malformed, `255` for
//! usage errors and files that cannot be read or written.

use log::{error, info};
use powerlink_rs_config::ConfigError;
use powerlink_rs_config::cdc::convert_file;
use std::path::Path;
use std::{env, process};

const EXIT_FORMATTING: i32 = 1;
const EXIT_FAILURE: i32 = 255;

fn exit_code(err: &ConfigError) -> i32 {
    match err {
        ConfigError::TextFileFormatting(_) => EXIT_FORMATTING,
        _ => EXIT_FAILURE,
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: txt2cdc <input.txt> <output.cdc>");
        process::exit(EXIT_FAILURE);
    }

    let (input, output) = (Path::new(&args[1]), Path::new(&args[2]));
    info!("[txt2cdc] Converting {} to {}", input.display(), output.display());
    match convert_file(input, output) {
        Ok(size) => info!("[txt2cdc] Done, {} bytes.", size),
        Err(e) => {
            error!("[txt2cdc] {}", e);
            process::exit(exit_code(&e));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use powerlink_rs_config::cdc::CdcError;

    #[test]
    fn test_exit_codes() {
        let formatting = ConfigError::TextFileFormatting(CdcError::OddNibbleCount { count: 3 });
        assert_eq!(exit_code(&formatting), EXIT_FORMATTING);
        let missing = ConfigError::CannotOpenFile {
            path: "missing.txt".into(),
            reason: "not found".into(),
        };
        assert_eq!(exit_code(&missing), EXIT_FAILURE);
    }
}
