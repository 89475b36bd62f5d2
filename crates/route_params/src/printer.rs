//! Render shapes back to TypeScript source text.
//!
//! Output follows the layout of the TypeScript printer: one member per line,
//! four-space indentation, `;` after every member.

use crate::shape::{Field, FieldKey, Keyword, Shape, TypeShape};

const INDENT: &str = "    ";

pub fn print_shape(shape: &Shape) -> String {
    let mut out = String::new();
    write_shape(&mut out, shape, 0);
    out
}

fn write_shape(out: &mut String, shape: &Shape, depth: usize) {
    match &shape.ty {
        TypeShape::Literal(fields) => write_members(out, fields, depth),
        TypeShape::IndexSignatureOf(value) => {
            out.push_str("{\n");
            push_indent(out, depth + 1);
            out.push_str("[key: string]: ");
            write_shape(out, value, depth + 1);
            out.push_str(";\n");
            push_indent(out, depth);
            out.push('}');
        }
        TypeShape::Reference(name) => out.push_str(name),
        TypeShape::PromiseOf(inner) => {
            out.push_str("Promise<");
            write_shape(out, inner, depth);
            out.push('>');
        }
        TypeShape::ArrayOf(inner) => {
            let needs_parens = matches!(inner.ty, TypeShape::UnionOf(_));
            if needs_parens {
                out.push('(');
            }
            write_shape(out, inner, depth);
            if needs_parens {
                out.push(')');
            }
            out.push_str("[]");
        }
        TypeShape::UnionOf(members) => {
            for (index, member) in members.iter().enumerate() {
                if index > 0 {
                    out.push_str(" | ");
                }
                write_shape(out, member, depth);
            }
        }
        TypeShape::RecordOf(key, value) => {
            out.push_str("Record<");
            write_shape(out, key, depth);
            out.push_str(", ");
            write_shape(out, value, depth);
            out.push('>');
        }
        TypeShape::Primitive(keyword) => out.push_str(keyword_text(*keyword)),
        TypeShape::Opaque => out.push_str("unknown"),
    }
}

fn write_members(out: &mut String, fields: &[Field], depth: usize) {
    if fields.is_empty() {
        out.push_str("{}");
        return;
    }
    out.push_str("{\n");
    for field in fields {
        let FieldKey::Named(name) = &field.key else {
            continue;
        };
        push_indent(out, depth + 1);
        out.push_str(name);
        if field.optional {
            out.push('?');
        }
        if let Some(value) = &field.value {
            out.push_str(": ");
            write_shape(out, value, depth + 1);
        }
        out.push_str(";\n");
    }
    push_indent(out, depth);
    out.push('}');
}

fn keyword_text(keyword: Keyword) -> &'static str {
    match keyword {
        Keyword::String => "string",
        Keyword::Undefined => "undefined",
        Keyword::Never => "never",
        Keyword::Other => "unknown",
    }
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}
