use crate::canonical::canonical_params_type;
use crate::context::{PARAMS_PROP, SEARCH_PARAMS_PROP, ValidationContext};
use crate::diagnostics::{Diagnostic, DiagnosticKind, Fix};
use crate::printer::print_shape;
use crate::shape::{AliasTable, Field, Shape, TypeShape};

use super::{check_field_type, first_unknown_name, has_unnamed_member, validate_search_params};

/// Validate the props object of a page, layout, default or metadata
/// handler, or the context argument of a route handler.
pub fn validate_props(
    props: &Shape,
    aliases: &AliasTable,
    context: &ValidationContext,
    out: &mut Vec<Diagnostic>,
) {
    let fields = match aliases.resolve(props).map(|shape| &shape.ty) {
        Some(TypeShape::Literal(fields)) => fields,
        _ => {
            out.push(Diagnostic::new(DiagnosticKind::IsNoLiteral, props.range));
            return;
        }
    };

    for field in fields {
        let Some(name) = field.name() else {
            continue;
        };
        if !context.allows(name) {
            out.push(
                Diagnostic::new(DiagnosticKind::ForbiddenProperty, field.range)
                    .with_data("key", name)
                    .with_fix(Fix::remove(field.range)),
            );
        }
    }

    for field in fields {
        let (Some(name), Some(value)) = (field.name(), &field.value) else {
            continue;
        };
        if name == PARAMS_PROP {
            validate_params(value, aliases, context, out);
        } else if name == SEARCH_PARAMS_PROP
            && context.search_params_strict
            && context.allows(SEARCH_PARAMS_PROP)
        {
            validate_search_params(value, aliases, context, out);
        }
    }
}

/// Validate the declared type of the `params` prop.
pub fn validate_params(
    declared: &Shape,
    aliases: &AliasTable,
    context: &ValidationContext,
    out: &mut Vec<Diagnostic>,
) {
    let (inner, wrapped) = declared.unwrap_promise();
    let promise_params = context.promise_params;
    let canonical_fix = |wrap: bool| {
        let canonical = canonical_params_type(&context.route_params, wrap);
        Fix::replace(declared.range, print_shape(&canonical))
    };

    if promise_params.mismatches(wrapped) {
        let kind = if wrapped {
            DiagnosticKind::MustNotBeWrappedInPromise
        } else {
            DiagnosticKind::MustBeWrappedInPromise
        };
        out.push(Diagnostic::new(kind, declared.range).with_fix(canonical_fix(!wrapped)));
        return;
    }

    let target = match &inner.ty {
        // nothing provable about unresolved aliases, aliases of anything
        // but a type literal, or records
        TypeShape::Reference(_) => match aliases.resolve(inner) {
            Some(target) if matches!(target.ty, TypeShape::Literal(_)) => target,
            _ => return,
        },
        TypeShape::RecordOf(..) => return,
        _ => inner,
    };
    let TypeShape::Literal(fields) = &target.ty else {
        out.push(Diagnostic::new(DiagnosticKind::IsNoLiteral, declared.range));
        return;
    };

    if let Some(name) = first_unknown_name(fields, &context.route_params) {
        out.push(
            Diagnostic::new(DiagnosticKind::UnknownParameter, declared.range)
                .with_data("name", name)
                .with_fix(canonical_fix(promise_params.wrap_for_fix(wrapped))),
        );
    }

    check_known_fields(fields, context, out);

    if has_unnamed_member(fields) {
        out.push(Diagnostic::new(DiagnosticKind::IsNoLiteral, target.range));
    }
}

fn check_known_fields(fields: &[Field], context: &ValidationContext, out: &mut Vec<Diagnostic>) {
    for field in fields {
        let Some(param) = field.name().and_then(|name| context.param(name)) else {
            continue;
        };
        if let Some(diagnostic) = check_field_type(field, param) {
            out.push(diagnostic);
        }
    }
}
