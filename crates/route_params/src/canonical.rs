//! The single correct shape for each checked position, used as fix text.

use crate::segments::RouteParam;
use crate::shape::{Field, FieldKey, Keyword, Range, Shape, TypeShape};

/// Which contract a canonical literal is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanonicalRole {
    /// Handler `params`: every parameter present.
    Params,
    /// Element of the static params array: only the current segment is
    /// mandatory.
    StaticParamsElement,
}

/// Literal with one field per route parameter, in route order.
pub fn canonical_literal(params: &[RouteParam], role: CanonicalRole) -> Shape {
    let fields = params
        .iter()
        .map(|param| Field {
            key: FieldKey::Named(param.name.clone()),
            optional: role == CanonicalRole::StaticParamsElement && !param.current,
            value: Some(param_value(param)),
            range: Range::default(),
            annotation_at: 0,
        })
        .collect();
    Shape::synthesized(TypeShape::Literal(fields))
}

/// Type of the `params` prop. A route without dynamic segments has
/// `Record<string, never>`.
pub fn canonical_params_type(params: &[RouteParam], wrap_in_promise: bool) -> Shape {
    let shape = if params.is_empty() {
        Shape::synthesized(TypeShape::RecordOf(
            Box::new(Shape::keyword(Keyword::String)),
            Box::new(Shape::keyword(Keyword::Never)),
        ))
    } else {
        canonical_literal(params, CanonicalRole::Params)
    };
    wrap(shape, wrap_in_promise)
}

/// `{ [key: string]: string | string[] | undefined }`
pub fn canonical_search_params_type(wrap_in_promise: bool) -> Shape {
    let value = Shape::synthesized(TypeShape::UnionOf(vec![
        Shape::keyword(Keyword::String),
        Shape::array_of(Shape::keyword(Keyword::String)),
        Shape::keyword(Keyword::Undefined),
    ]));
    let shape = Shape::synthesized(TypeShape::IndexSignatureOf(Box::new(value)));
    wrap(shape, wrap_in_promise)
}

/// Return type of the static params generator.
pub fn canonical_static_params_return(params: &[RouteParam], is_async: bool) -> Shape {
    let element = canonical_literal(params, CanonicalRole::StaticParamsElement);
    wrap(Shape::array_of(element), is_async)
}

fn param_value(param: &RouteParam) -> Shape {
    if param.catch_all {
        Shape::array_of(Shape::keyword(Keyword::String))
    } else {
        Shape::keyword(Keyword::String)
    }
}

fn wrap(shape: Shape, wrap_in_promise: bool) -> Shape {
    if wrap_in_promise {
        Shape::promise_of(shape)
    } else {
        shape
    }
}
