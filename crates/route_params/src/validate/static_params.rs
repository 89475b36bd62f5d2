use crate::canonical::{CanonicalRole, canonical_literal, canonical_static_params_return};
use crate::context::ValidationContext;
use crate::diagnostics::{Diagnostic, DiagnosticKind, Fix};
use crate::printer::print_shape;
use crate::shape::{AliasTable, Field, Range, Shape, TypeShape};

use super::{check_field_type, first_unknown_name, has_unnamed_member};

/// A `generateStaticParams` function as seen by the validator.
#[derive(Debug, Clone)]
pub struct StaticParamsFunction {
    pub range: Range,
    pub is_async: bool,
    pub return_type: Option<ReturnAnnotation>,
    /// Where a missing return annotation can be inserted.
    pub annotation_slot: Option<AnnotationSlot>,
}

#[derive(Debug, Clone)]
pub struct ReturnAnnotation {
    /// Annotation range, colon included.
    pub range: Range,
    pub shape: Shape,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationSlot {
    /// Empty range right after the closing parenthesis of the parameter
    /// list, or the range of a bare arrow parameter.
    pub range: Range,
    /// Written before the annotation, `(x)` for a bare arrow parameter.
    pub prefix: String,
    /// The next character is not whitespace, so the insertion needs a
    /// trailing space.
    pub trailing_space: bool,
}

pub fn validate_static_params(
    function: &StaticParamsFunction,
    aliases: &AliasTable,
    context: &ValidationContext,
    out: &mut Vec<Diagnostic>,
) {
    let canonical_return = format!(
        ": {}",
        print_shape(&canonical_static_params_return(
            &context.route_params,
            function.is_async
        ))
    );

    let Some(annotation) = &function.return_type else {
        let mut diagnostic = Diagnostic::new(DiagnosticKind::MissingReturnType, function.range);
        if let Some(slot) = &function.annotation_slot {
            let space = if slot.trailing_space { " " } else { "" };
            let text = format!("{}{canonical_return}{space}", slot.prefix);
            diagnostic = diagnostic.with_fix(Fix::replace(slot.range, text));
        }
        out.push(diagnostic);
        return;
    };

    let replace_annotation = || Fix::replace(annotation.range, canonical_return.clone());

    let (inner, wrapped) = annotation.shape.unwrap_promise();
    let element = match &inner.ty {
        TypeShape::ArrayOf(element) if wrapped == function.is_async => element,
        _ => {
            out.push(
                Diagnostic::new(DiagnosticKind::WrongReturnType, annotation.range)
                    .with_fix(replace_annotation()),
            );
            return;
        }
    };

    let fields = match aliases.resolve(element).map(|shape| &shape.ty) {
        Some(TypeShape::Literal(fields)) => fields,
        _ => {
            out.push(
                Diagnostic::new(DiagnosticKind::IsNoLiteral, element.range)
                    .with_fix(replace_annotation()),
            );
            return;
        }
    };

    validate_element(element, fields, context, out);
}

fn validate_element(
    element: &Shape,
    fields: &[Field],
    context: &ValidationContext,
    out: &mut Vec<Diagnostic>,
) {
    let canonical_element = || {
        let canonical = canonical_literal(&context.route_params, CanonicalRole::StaticParamsElement);
        Fix::replace(element.range, print_shape(&canonical))
    };

    if let Some(name) = first_unknown_name(fields, &context.route_params) {
        out.push(
            Diagnostic::new(DiagnosticKind::UnknownParameter, element.range)
                .with_data("name", name)
                .with_fix(canonical_element()),
        );
        return;
    }

    for field in fields {
        let Some(param) = field.name().and_then(|name| context.param(name)) else {
            continue;
        };
        if let Some(diagnostic) = check_field_type(field, param) {
            out.push(diagnostic);
        }
    }

    if has_unnamed_member(fields) {
        out.push(Diagnostic::new(DiagnosticKind::IsNoLiteral, element.range));
    }

    if let Some(current) = context.current_param() {
        let declared = fields
            .iter()
            .find(|field| field.name() == Some(current.name.as_str()));
        if declared.is_none_or(|field| field.optional) {
            out.push(
                Diagnostic::new(DiagnosticKind::ParamNotOptionalAllowed, element.range)
                    .with_data("name", current.name.as_str())
                    .with_fix(canonical_element()),
            );
        }
    }
}
