// crates/powerlink-rs-config/src/pi/csharp.rs

use super::layout::{DirectionLayout, LayoutField};
use super::var::IecDatatype;
use crate::log::my_warn;
use crate::types::Direction;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write;

/// A field of the explicit-layout C# struct.
#[derive(Debug, Clone, PartialEq)]
struct NetField {
    node_id: u8,
    module_name: String,
    name: Option<String>,
    last_name: Option<String>,
    count: u32,
    data_type: Option<IecDatatype>,
    total_bits: u32,
}

impl NetField {
    fn padding(number: u32) -> Self {
        Self {
            node_id: 0,
            module_name: String::from("PADDING_VAR"),
            name: Some(format!("{}", number)),
            last_name: None,
            count: 0,
            data_type: Some(IecDatatype::Byte),
            total_bits: 8,
        }
    }
}

/// The C# type for an IEC type, `""` where there is none.
pub fn csharp_type(data_type: Option<IecDatatype>) -> &'static str {
    match data_type {
        Some(IecDatatype::Bool | IecDatatype::Byte | IecDatatype::Char | IecDatatype::Usint) => {
            "byte"
        }
        Some(IecDatatype::Sint) => "sbyte",
        Some(IecDatatype::Int) => "Int16",
        Some(IecDatatype::Uint) => "UInt16",
        Some(IecDatatype::Dint) => "Int32",
        Some(IecDatatype::Udint | IecDatatype::Dword) => "UInt32",
        Some(IecDatatype::Lint) => "Int64",
        Some(IecDatatype::Ulint | IecDatatype::Lword) => "UInt64",
        _ => "",
    }
}

/// Byte size the C# type occupies, 0 where there is none.
pub fn csharp_size(data_type: Option<IecDatatype>) -> u32 {
    match data_type {
        Some(
            IecDatatype::Bool
            | IecDatatype::Byte
            | IecDatatype::Char
            | IecDatatype::Sint
            | IecDatatype::Usint,
        ) => 1,
        Some(IecDatatype::Int | IecDatatype::Uint) => 2,
        Some(IecDatatype::Dint | IecDatatype::Dword | IecDatatype::Udint) => 4,
        Some(IecDatatype::Lint | IecDatatype::Lword | IecDatatype::Ulint) => 8,
        _ => 0,
    }
}

/// Groups the layout into C# fields. Padding becomes one byte field per
/// padded byte; consecutive bit strings of a module are merged into the
/// smallest covering byte/word/dword.
fn group_fields(layout: &DirectionLayout<'_>) -> Vec<NetField> {
    let mut fields: Vec<NetField> = Vec::new();
    let mut next_padding = 1;

    for field in &layout.fields {
        match field {
            LayoutField::Padding { bits, .. } => {
                for _ in 0..(bits / 8) {
                    fields.push(NetField::padding(next_padding));
                    next_padding += 1;
                }
            }
            LayoutField::Var { var, .. } => {
                let module_name = format!(
                    "CN{}_M{}_{}",
                    var.owner_node_id,
                    var.module_number(),
                    var.module_name
                );
                if var.data_type == Some(IecDatatype::Bitstring) {
                    let open = fields.iter_mut().find(|f| {
                        f.node_id == var.owner_node_id
                            && f.module_name == module_name
                            && f.total_bits < 8
                    });
                    if let Some(existing) = open {
                        existing.total_bits += var.bit_size;
                        existing.count += 1;
                        existing.last_name = var.var_name.clone();
                        match existing.total_bits {
                            8 => existing.data_type = Some(IecDatatype::Byte),
                            16 => existing.data_type = Some(IecDatatype::Uint),
                            32 => existing.data_type = Some(IecDatatype::Udint),
                            _ => {}
                        }
                        continue;
                    }
                }
                fields.push(NetField {
                    node_id: var.owner_node_id,
                    module_name,
                    name: var.var_name.clone(),
                    last_name: None,
                    count: 0,
                    data_type: var.data_type,
                    total_bits: var.bit_size,
                });
            }
        }
    }
    fields
}

fn write_struct(out: &mut String, layout: &DirectionLayout<'_>) {
    let (title, struct_name) = match layout.direction {
        Direction::Input => ("Out", "AppProcessImageOut"),
        Direction::Output => ("In", "AppProcessImageIn"),
    };
    let _ = write!(
        out,
        "\n\t/// <summary>\n\t/// Struct : ProcessImage {}\n\t/// </summary>\n\t[StructLayout(LayoutKind.Explicit, Pack = 1, Size = {})]\n\tpublic struct {}\n\t{{\n",
        title,
        layout.size_bytes(),
        struct_name
    );

    let mut offset = 0;
    for field in group_fields(layout) {
        let ty = csharp_type(field.data_type);
        if ty.is_empty() {
            my_warn!(
                "[PI] No C# type for '{}' ({:?}), rendering it without type.",
                field.module_name,
                field.data_type
            );
        }
        let _ = write!(out, "\t\t[FieldOffset({})]\n\t\tpublic {} {}", offset, ty, field.module_name);
        offset += csharp_size(field.data_type);
        if let Some(name) = &field.name {
            let _ = write!(out, "_{}", name);
            if field.count > 0 {
                if let Some(last) = &field.last_name {
                    let _ = write!(out, "_to_{}", last);
                }
            }
        }
        out.push_str(";\n");
    }
    out.push_str("\t}\n");
}

/// Renders the C# process-image file, or `None` when there are no variables.
pub fn render_csharp(
    comment: &str,
    input: &DirectionLayout<'_>,
    output: &DirectionLayout<'_>,
) -> Option<String> {
    if input.is_empty() && output.is_empty() {
        return None;
    }
    let mut out = String::new();
    let _ = write!(
        out,
        "using System;\nusing System.Runtime.InteropServices;\n/// <summary>\n/// {}\n/// </summary>\n\nnamespace openPOWERLINK\n{{\n",
        comment
    );
    if !input.is_empty() {
        write_struct(&mut out, input);
    }
    if !output.is_empty() {
        write_struct(&mut out, output);
    }
    out.push_str("}\n");
    Some(out)
}
