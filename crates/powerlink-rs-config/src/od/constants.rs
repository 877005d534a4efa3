// crates/powerlink-rs-config/src/od/constants.rs
//! Well-known Object Dictionary indices used by the configurator, following
//! the `IDX_`/`SUBIDX_` naming convention.

// --- 0x1000 - 0x1FFF: Communication Profile Area ---

// 0x1Fxx: NMT Parameters
pub const IDX_CFM_CONCISE_DCF_LIST_ADOM: u16 = 0x1F22;
pub const IDX_NMT_MN_CN_PRES_TIMEOUT_AU32: u16 = 0x1F92;
pub const IDX_NMT_MULTIPLEX_ASSIGN_REC: u16 = 0x1F9B;

/// NumberOfEntries of every ARRAY/RECORD.
pub const SUBIDX_NUMBER_OF_ENTRIES: u8 = 0;

// --- 0xA000 - 0xAFFF: Process image objects on the MN ---
pub const IDX_PI_START: u16 = 0xA000;
pub const IDX_PI_END: u16 = 0xAFFF;
