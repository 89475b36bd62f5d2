use crate::canonical::canonical_search_params_type;
use crate::context::ValidationContext;
use crate::diagnostics::{Diagnostic, DiagnosticKind, Fix};
use crate::printer::print_shape;
use crate::shape::{AliasTable, Classification, Keyword, Range, Shape, TypeShape};

const SEARCH_PARAMS_TYPE: &str = "{ [key: string]: string | string[] | undefined }";

/// Validate the declared type of the `searchParams` prop.
pub fn validate_search_params(
    declared: &Shape,
    aliases: &AliasTable,
    context: &ValidationContext,
    out: &mut Vec<Diagnostic>,
) {
    let (inner, wrapped) = declared.unwrap_promise();
    let wrap = context.promise_params.wrap_for_fix(wrapped);

    if context.promise_params.mismatches(wrapped) {
        let canonical = print_shape(&canonical_search_params_type(wrap));
        out.push(wrong_type(declared.range, wrap).with_fix(Fix::replace(declared.range, canonical)));
        return;
    }

    let target = aliases.follow(inner);
    if target.is_some_and(is_search_params_shape) {
        return;
    }

    let diagnostic = wrong_type(declared.range, wrap);
    match target {
        Some(shape) if !matches!(shape.ty, TypeShape::Opaque) => {
            let canonical = print_shape(&canonical_search_params_type(false));
            out.push(diagnostic.with_fix(Fix::replace(inner.range, canonical)));
        }
        _ => out.push(diagnostic),
    }
}

fn wrong_type(range: Range, wrap: bool) -> Diagnostic {
    let expected = if wrap {
        format!("Promise<{SEARCH_PARAMS_TYPE}>")
    } else {
        SEARCH_PARAMS_TYPE.to_string()
    };
    Diagnostic::new(DiagnosticKind::WrongSearchParamsType, range).with_data("expected", expected)
}

/// `{ [key: string]: U }` or `Record<string, U>` with `U` exactly
/// `string | string[] | undefined` in any order.
fn is_search_params_shape(shape: &Shape) -> bool {
    match &shape.ty {
        TypeShape::IndexSignatureOf(value) => is_search_value(value),
        TypeShape::RecordOf(key, value) => key.is_keyword(Keyword::String) && is_search_value(value),
        _ => false,
    }
}

fn is_search_value(shape: &Shape) -> bool {
    let TypeShape::UnionOf(members) = &shape.ty else {
        return false;
    };
    let (mut string, mut string_array, mut undefined) = (false, false, false);
    for member in members {
        match member.classification() {
            Classification::String => string = true,
            Classification::StringArray => string_array = true,
            _ if member.is_keyword(Keyword::Undefined) => undefined = true,
            _ => return false,
        }
    }
    string && string_array && undefined
}
