//! Validators comparing extracted shapes against the route contract.
//!
//! Every validator is pure: it reads the shapes, the alias table and the
//! context, and appends diagnostics to `out`.

mod params;
mod search_params;
mod static_params;

pub use params::{validate_params, validate_props};
pub use search_params::validate_search_params;
pub use static_params::{AnnotationSlot, ReturnAnnotation, StaticParamsFunction, validate_static_params};

use crate::diagnostics::{Diagnostic, DiagnosticKind, Fix};
use crate::segments::RouteParam;
use crate::shape::{Classification, Field};

/// Wrong-type diagnostic for a field declaring a known route parameter.
fn check_field_type(field: &Field, param: &RouteParam) -> Option<Diagnostic> {
    let expected = if param.catch_all {
        Classification::StringArray
    } else {
        Classification::String
    };
    let actual = field.classification();
    if actual == expected || actual == Classification::Deferred {
        return None;
    }

    let expected_type = param.expected_type();
    let fix = match &field.value {
        Some(value) => Fix::replace(value.range, expected_type),
        None => Fix::insert(field.annotation_at, format!(": {expected_type}")),
    };
    Some(
        Diagnostic::new(DiagnosticKind::WrongParameterType, field.range)
            .with_data("name", param.name.as_str())
            .with_data("type", expected_type)
            .with_fix(fix),
    )
}

fn first_unknown_name<'a>(fields: &'a [Field], params: &[RouteParam]) -> Option<&'a str> {
    fields
        .iter()
        .filter_map(Field::name)
        .find(|name| !params.iter().any(|param| param.name == *name))
}

fn has_unnamed_member(fields: &[Field]) -> bool {
    fields.iter().any(|field| field.name().is_none())
}
