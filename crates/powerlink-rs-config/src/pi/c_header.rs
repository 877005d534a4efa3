// crates/powerlink-rs-config/src/pi/c_header.rs

use super::layout::{DirectionLayout, LayoutField};
use crate::types::Direction;
use alloc::string::String;
use core::fmt::Write;

const INCLUDE_GUARD_CHECK: &str = "#ifndef __PI_H__";
const INCLUDE_GUARD_START: &str = "#define __PI_H__";
const INCLUDE_GUARD_END: &str = "#endif\n";

/// Renders the C process-image header (`PI_OUT` for inputs, `PI_IN` for
/// outputs). Empty directions are left out.
pub fn render_c_header(
    comment: &str,
    input: &DirectionLayout<'_>,
    output: &DirectionLayout<'_>,
) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "/* {} */\n{}\n{}\n\n",
        comment, INCLUDE_GUARD_CHECK, INCLUDE_GUARD_START
    );
    if !input.is_empty() {
        write_struct(&mut out, input);
    }
    if !output.is_empty() {
        write_struct(&mut out, output);
    }
    out.push('\n');
    out.push_str(INCLUDE_GUARD_END);
    out
}

fn write_struct(out: &mut String, layout: &DirectionLayout<'_>) {
    match layout.direction {
        Direction::Input => out.push_str("# define COMPUTED_PI_OUT_SIZE "),
        Direction::Output => out.push_str("\n\n# define COMPUTED_PI_IN_SIZE "),
    }
    let _ = write!(out, "{}", layout.size_bytes());
    out.push_str("\ntypedef struct \n{\n");

    for field in &layout.fields {
        let _ = match field {
            LayoutField::Padding { number, bits } => {
                writeln!(out, "\tunsigned PADDING_VAR_{}:{};", number, bits)
            }
            LayoutField::Var { var, .. } => {
                writeln!(out, "\tunsigned {}:{};", var.field_name(), var.bit_size)
            }
        };
    }

    out.push('}');
    match layout.direction {
        Direction::Input => out.push_str(" PI_OUT;"),
        Direction::Output => out.push_str(" PI_IN;\n"),
    }
}
