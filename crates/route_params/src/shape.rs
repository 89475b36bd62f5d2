//! Structural type shapes extracted from type annotations.
//!
//! A [`Shape`] is the closed vocabulary every validator works on. Shapes read
//! from source carry the byte range they were read from; shapes built by the
//! canonical constructors carry an empty range.

use std::collections::HashMap;

use serde::Serialize;

/// Half-open byte range into the linted source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Range {
    pub start: usize,
    pub end: usize,
}

impl Range {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn empty(at: usize) -> Self {
        Self { start: at, end: at }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Keyword {
    String,
    Undefined,
    Never,
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeShape {
    Literal(Vec<Field>),
    Reference(String),
    PromiseOf(Box<Shape>),
    ArrayOf(Box<Shape>),
    UnionOf(Vec<Shape>),
    RecordOf(Box<Shape>, Box<Shape>),
    IndexSignatureOf(Box<Shape>),
    Primitive(Keyword),
    Opaque,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub ty: TypeShape,
    pub range: Range,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKey {
    Named(String),
    /// Computed keys, index signatures, methods and call signatures.
    Unnamed,
}

/// One member of a type literal.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: FieldKey,
    pub optional: bool,
    pub value: Option<Shape>,
    /// Member range including a trailing `,` or `;`.
    pub range: Range,
    /// Where `: T` goes when the member has no annotation.
    pub annotation_at: usize,
}

/// How a field's declared type compares against route parameter types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    String,
    StringArray,
    /// Named reference whose meaning is not resolved at field level.
    Deferred,
    Other,
}

impl Shape {
    /// Shape with no source position, used for generated text.
    pub fn synthesized(ty: TypeShape) -> Self {
        Self {
            ty,
            range: Range::default(),
        }
    }

    pub fn keyword(keyword: Keyword) -> Self {
        Self::synthesized(TypeShape::Primitive(keyword))
    }

    pub fn promise_of(inner: Shape) -> Self {
        Self::synthesized(TypeShape::PromiseOf(Box::new(inner)))
    }

    pub fn array_of(inner: Shape) -> Self {
        Self::synthesized(TypeShape::ArrayOf(Box::new(inner)))
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        matches!(self.ty, TypeShape::Primitive(kind) if kind == keyword)
    }

    /// Strip one `Promise<...>` layer, reporting whether it was present.
    pub fn unwrap_promise(&self) -> (&Shape, bool) {
        match &self.ty {
            TypeShape::PromiseOf(inner) => (inner.as_ref(), true),
            _ => (self, false),
        }
    }

    pub fn classification(&self) -> Classification {
        match &self.ty {
            TypeShape::Primitive(Keyword::String) => Classification::String,
            TypeShape::ArrayOf(inner) if inner.is_keyword(Keyword::String) => {
                Classification::StringArray
            }
            TypeShape::Reference(_) => Classification::Deferred,
            _ => Classification::Other,
        }
    }

    /// Type literals and string index signatures, the targets a reference
    /// may resolve to.
    pub fn is_object_like(&self) -> bool {
        matches!(
            self.ty,
            TypeShape::Literal(_) | TypeShape::IndexSignatureOf(_)
        )
    }
}

impl Field {
    pub fn name(&self) -> Option<&str> {
        match &self.key {
            FieldKey::Named(name) => Some(name),
            FieldKey::Unnamed => None,
        }
    }

    /// Members without an annotation are implicitly `any`.
    pub fn classification(&self) -> Classification {
        self.value
            .as_ref()
            .map_or(Classification::Other, Shape::classification)
    }
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::String => "string",
            Classification::StringArray => "string[]",
            Classification::Deferred => "deferred",
            Classification::Other => "other",
        }
    }
}

/// Top-level type aliases and interfaces of one file.
#[derive(Debug, Default, Clone)]
pub struct AliasTable {
    aliases: HashMap<String, Shape>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, shape: Shape) {
        self.aliases.insert(name.into(), shape);
    }

    pub fn get(&self, name: &str) -> Option<&Shape> {
        self.aliases.get(name)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Follow at most one reference.
    ///
    /// Non-reference shapes are returned as-is. A reference resolves only
    /// when its alias is object-like; anything else yields `None`, which
    /// callers treat as opaque.
    pub fn resolve<'a>(&'a self, shape: &'a Shape) -> Option<&'a Shape> {
        match &shape.ty {
            TypeShape::Reference(_) => self.follow(shape).filter(|target| target.is_object_like()),
            _ => Some(shape),
        }
    }

    /// Follow at most one reference, whatever the alias target is, as long
    /// as it is not itself a reference.
    pub fn follow<'a>(&'a self, shape: &'a Shape) -> Option<&'a Shape> {
        match &shape.ty {
            TypeShape::Reference(name) => self
                .get(name)
                .filter(|target| !matches!(target.ty, TypeShape::Reference(_))),
            _ => Some(shape),
        }
    }
}
