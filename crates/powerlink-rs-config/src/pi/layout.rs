// crates/powerlink-rs-config/src/pi/layout.rs

use super::var::ProcessImageVar;
use crate::types::Direction;
use alloc::vec::Vec;

/// A field of a process-image struct.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutField<'a> {
    /// Alignment filler `PADDING_VAR_<number>`.
    Padding { number: u32, bits: u32 },
    Var {
        var: &'a ProcessImageVar,
        /// Bit position of the field inside the struct.
        bit_position: u32,
    },
}

/// The bit-packed struct for one direction of the process image.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionLayout<'a> {
    pub direction: Direction,
    pub fields: Vec<LayoutField<'a>>,
    pub total_bits: u32,
}

impl<'a> DirectionLayout<'a> {
    /// Lays out `vars` (all of the same direction, in node order).
    ///
    /// A field whose size is a multiple of 8 bits is aligned to its own size;
    /// the struct is padded to a multiple of 32 bits. Alignment gaps wider
    /// than 32 bits (before 64-bit fields) are filled by one field up to the
    /// next 32-bit boundary followed by 32-bit fields.
    pub fn compute(direction: Direction, vars: &[&'a ProcessImageVar]) -> Self {
        let mut layout = Self {
            direction,
            fields: Vec::new(),
            total_bits: 0,
        };
        let mut next_padding = 1;

        for &var in vars.iter().filter(|v| v.direction == direction) {
            let size = var.bit_size;
            if size != 0 && size % 8 == 0 && layout.total_bits % size != 0 {
                let gap = size - (layout.total_bits % size);
                layout.pad(gap, &mut next_padding);
            }
            layout.fields.push(LayoutField::Var {
                var,
                bit_position: layout.total_bits,
            });
            layout.total_bits += size;
        }

        if layout.total_bits % 32 != 0 {
            let gap = 32 - (layout.total_bits % 32);
            layout.pad(gap, &mut next_padding);
        }
        layout
    }

    fn pad(&mut self, gap: u32, next_padding: &mut u32) {
        let mut remaining = gap;
        while remaining > 0 {
            let to_boundary = 32 - (self.total_bits % 32);
            let bits = remaining.min(to_boundary);
            self.fields.push(LayoutField::Padding {
                number: *next_padding,
                bits,
            });
            *next_padding += 1;
            self.total_bits += bits;
            remaining -= bits;
        }
    }

    /// Struct size in bytes.
    pub fn size_bytes(&self) -> u32 {
        self.total_bits / 8
    }

    pub fn var_count(&self) -> usize {
        self.fields
            .iter()
            .filter(|f| matches!(f, LayoutField::Var { .. }))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.var_count() == 0
    }

    /// `(byte_offset, bit_offset)` of each variable, in field order.
    pub fn var_offsets(&self) -> Vec<(u32, u32)> {
        self.fields
            .iter()
            .filter_map(|f| match f {
                LayoutField::Var { bit_position, .. } => Some((bit_position / 8, bit_position % 8)),
                LayoutField::Padding { .. } => None,
            })
            .collect()
    }
}
