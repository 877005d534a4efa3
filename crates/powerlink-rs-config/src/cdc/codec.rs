// crates/powerlink-rs-config/src/cdc/codec.rs

//! Textual CDC (hex digits, `//` comments) to binary CDC.

use super::error::CdcError;
use crate::log::{my_debug, my_trace};
use crate::od::constants::IDX_CFM_CONCISE_DCF_LIST_ADOM;
use alloc::vec::Vec;

const ENTRY_COUNT_LEN: usize = 4;
const INDEX_LEN: usize = 2;
const SUB_INDEX_LEN: usize = 1;
const SIZE_LEN: usize = 4;
const RECORD_HEADER_LEN: usize = INDEX_LEN + SUB_INDEX_LEN + SIZE_LEN;

/// Collects the hex digits of a CDC text as nibble values `0..=15`.
///
/// A `/` starts a comment running to the end of the line. Tabs, spaces
/// and line breaks are skipped; any other non-hex character is dropped.
pub fn tokenize(text: &str) -> Vec<u8> {
    let mut nibbles = Vec::with_capacity(text.len());
    let mut dropped = 0usize;
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        match c {
            '/' => {
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        break;
                    }
                }
            }
            '\t' | ' ' | '\r' | '\n' => {}
            _ => match c.to_ascii_uppercase().to_digit(16) {
                Some(nibble) => nibbles.push(nibble as u8),
                None => dropped += 1,
            },
        }
    }
    if dropped > 0 {
        my_debug!("[CDC] Dropped {} non-hex characters from the input.", dropped);
    }
    nibbles
}

/// Packs nibble pairs into bytes, high nibble first.
pub fn pack(nibbles: &[u8]) -> Result<Vec<u8>, CdcError> {
    if nibbles.len() % 2 != 0 {
        return Err(CdcError::OddNibbleCount {
            count: nibbles.len(),
        });
    }
    Ok(nibbles
        .chunks_exact(2)
        .map(|pair| (pair[0] << 4) | pair[1])
        .collect())
}

/// Converts the big-endian fields packed from the text into the
/// little-endian CDC layout:
/// `NumberOfEntries:u32 | { Index:u16 | SubIndex:u8 | Size:u32 | Data }*`.
///
/// The data of a `0x1F22` record is itself such a stream and is converted
/// field by field.
pub fn fix_byte_order(packed: &[u8]) -> Result<Vec<u8>, CdcError> {
    let mut out = packed.to_vec();
    fix_stream(&mut out).map_err(|e| match e {
        StreamError::MissingEntryCount { available } => CdcError::MissingEntryCount { available },
        StreamError::Overrun {
            offset,
            needed,
            available,
        } => CdcError::RecordOverrun {
            offset,
            needed,
            available,
        },
        StreamError::Nested(e) => e,
    })?;
    Ok(out)
}

/// Full conversion of a CDC text into the binary file contents.
pub fn txt_to_cdc(text: &str) -> Result<Vec<u8>, CdcError> {
    let packed = pack(&tokenize(text))?;
    fix_byte_order(&packed)
}

enum StreamError {
    MissingEntryCount {
        available: usize,
    },
    Overrun {
        offset: usize,
        needed: usize,
        available: usize,
    },
    Nested(CdcError),
}

fn fix_stream(buf: &mut [u8]) -> Result<(), StreamError> {
    if buf.len() < ENTRY_COUNT_LEN {
        return Err(StreamError::MissingEntryCount {
            available: buf.len(),
        });
    }
    buf[..ENTRY_COUNT_LEN].reverse();

    let mut pos = ENTRY_COUNT_LEN;
    while pos < buf.len() {
        let available = buf.len() - pos;
        if available < RECORD_HEADER_LEN {
            return Err(StreamError::Overrun {
                offset: pos,
                needed: RECORD_HEADER_LEN,
                available,
            });
        }
        buf[pos..pos + INDEX_LEN].reverse();
        let size_at = pos + INDEX_LEN + SUB_INDEX_LEN;
        buf[size_at..size_at + SIZE_LEN].reverse();

        let index = u16::from_le_bytes([buf[pos], buf[pos + 1]]);
        let size = u32::from_le_bytes([
            buf[size_at],
            buf[size_at + 1],
            buf[size_at + 2],
            buf[size_at + 3],
        ]) as usize;
        let needed = RECORD_HEADER_LEN.saturating_add(size);
        if needed > available {
            return Err(StreamError::Overrun {
                offset: pos,
                needed,
                available,
            });
        }

        let data = &mut buf[pos + RECORD_HEADER_LEN..pos + needed];
        if index == IDX_CFM_CONCISE_DCF_LIST_ADOM {
            my_trace!("[CDC] 1F22 record at byte {} with {} bytes of CN data.", pos, size);
            fix_nested(data, pos)?;
        } else {
            data.reverse();
        }
        pos += needed;
    }
    Ok(())
}

/// The CN stream inside a `0x1F22` record; its records are plain.
fn fix_nested(buf: &mut [u8], record_offset: usize) -> Result<(), StreamError> {
    let nested_error = |offset, needed, available| {
        StreamError::Nested(CdcError::NestedRecordOverrun {
            record_offset,
            offset,
            needed,
            available,
        })
    };
    if buf.len() < ENTRY_COUNT_LEN {
        return Err(nested_error(0, ENTRY_COUNT_LEN, buf.len()));
    }
    buf[..ENTRY_COUNT_LEN].reverse();

    let mut pos = ENTRY_COUNT_LEN;
    while pos < buf.len() {
        let available = buf.len() - pos;
        if available < RECORD_HEADER_LEN {
            return Err(nested_error(pos, RECORD_HEADER_LEN, available));
        }
        buf[pos..pos + INDEX_LEN].reverse();
        let size_at = pos + INDEX_LEN + SUB_INDEX_LEN;
        buf[size_at..size_at + SIZE_LEN].reverse();
        let size = u32::from_le_bytes([
            buf[size_at],
            buf[size_at + 1],
            buf[size_at + 2],
            buf[size_at + 3],
        ]) as usize;
        let needed = RECORD_HEADER_LEN.saturating_add(size);
        if needed > available {
            return Err(nested_error(pos, needed, available));
        }
        buf[pos + RECORD_HEADER_LEN..pos + needed].reverse();
        pos += needed;
    }
    Ok(())
}
