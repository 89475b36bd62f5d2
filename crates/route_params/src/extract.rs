//! Extract [`Shape`]s from swc type annotations.

use swc_common::{BytePos, Span, Spanned};
use swc_ecma_ast::{
    Expr, TsEntityName, TsFnParam, TsIndexSignature, TsInterfaceDecl, TsKeywordTypeKind,
    TsPropertySignature, TsType, TsTypeAnn, TsTypeElement, TsTypeLit, TsTypeRef,
    TsUnionOrIntersectionType,
};

use crate::shape::{Field, FieldKey, Keyword, Range, Shape, TypeShape};

/// Converts swc type nodes of one file into shapes with byte ranges
/// relative to that file's source.
pub struct ShapeExtractor<'a> {
    source: &'a str,
    start: BytePos,
    /// Bytes the source map dropped from the front of the file (a BOM).
    skipped: usize,
}

impl<'a> ShapeExtractor<'a> {
    pub fn new(source: &'a str, start: BytePos) -> Self {
        let skipped = if source.starts_with('\u{feff}') {
            '\u{feff}'.len_utf8()
        } else {
            0
        };
        Self {
            source,
            start,
            skipped,
        }
    }

    pub fn offset(&self, pos: BytePos) -> usize {
        pos.0.saturating_sub(self.start.0) as usize + self.skipped
    }

    pub fn range(&self, span: Span) -> Range {
        Range::new(self.offset(span.lo), self.offset(span.hi))
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn extract(&self, ty: &TsType) -> Shape {
        let range = self.range(ty.span());
        let ty = match ty {
            TsType::TsParenthesizedType(paren) => return self.extract(&paren.type_ann),
            TsType::TsKeywordType(keyword) => TypeShape::Primitive(keyword_of(keyword.kind)),
            TsType::TsLitType(_) => TypeShape::Primitive(Keyword::Other),
            TsType::TsArrayType(array) => TypeShape::ArrayOf(Box::new(self.extract(&array.elem_type))),
            TsType::TsUnionOrIntersectionType(TsUnionOrIntersectionType::TsUnionType(union)) => {
                TypeShape::UnionOf(union.types.iter().map(|member| self.extract(member)).collect())
            }
            TsType::TsTypeRef(reference) => self.type_reference(reference),
            TsType::TsTypeLit(literal) => self.type_literal(literal),
            _ => TypeShape::Opaque,
        };
        Shape { ty, range }
    }

    /// Interfaces without `extends` behave like a type literal.
    pub fn interface(&self, interface: &TsInterfaceDecl) -> Option<Shape> {
        if !interface.extends.is_empty() {
            return None;
        }
        Some(Shape {
            ty: TypeShape::Literal(self.members(&interface.body.body)),
            range: self.range(interface.body.span),
        })
    }

    /// Range of a `: T` annotation, colon included.
    pub fn annotation_range(&self, annotation: &TsTypeAnn) -> Range {
        let type_range = self.range(annotation.type_ann.span());
        let bytes = self.source.as_bytes();
        let mut cursor = type_range.start;
        while cursor > 0 && bytes.get(cursor - 1).is_some_and(u8::is_ascii_whitespace) {
            cursor -= 1;
        }
        let start = if cursor > 0 && bytes.get(cursor - 1) == Some(&b':') {
            cursor - 1
        } else {
            type_range.start
        };
        Range::new(start, type_range.end)
    }

    fn type_reference(&self, reference: &TsTypeRef) -> TypeShape {
        let TsEntityName::Ident(ident) = &reference.type_name else {
            return TypeShape::Opaque;
        };
        let args = reference
            .type_params
            .as_ref()
            .map(|params| params.params.as_slice())
            .unwrap_or_default();

        match (&*ident.sym, args) {
            ("Promise", [inner]) => TypeShape::PromiseOf(Box::new(self.extract(inner))),
            ("Array", [inner]) => TypeShape::ArrayOf(Box::new(self.extract(inner))),
            ("Record", [key, value]) => {
                TypeShape::RecordOf(Box::new(self.extract(key)), Box::new(self.extract(value)))
            }
            (name, []) => TypeShape::Reference(name.to_string()),
            _ => TypeShape::Opaque,
        }
    }

    fn type_literal(&self, literal: &TsTypeLit) -> TypeShape {
        if let [TsTypeElement::TsIndexSignature(index)] = literal.members.as_slice() {
            if let Some(value) = self.string_index_value(index) {
                return TypeShape::IndexSignatureOf(Box::new(value));
            }
        }
        TypeShape::Literal(self.members(&literal.members))
    }

    fn string_index_value(&self, index: &TsIndexSignature) -> Option<Shape> {
        let [TsFnParam::Ident(key)] = index.params.as_slice() else {
            return None;
        };
        let key_type = key.type_ann.as_ref()?;
        let is_string_key = matches!(
            &*key_type.type_ann,
            TsType::TsKeywordType(keyword) if keyword.kind == TsKeywordTypeKind::TsStringKeyword
        );
        if !is_string_key {
            return None;
        }
        let value = index.type_ann.as_ref()?;
        Some(self.extract(&value.type_ann))
    }

    pub fn members(&self, members: &[TsTypeElement]) -> Vec<Field> {
        members.iter().map(|member| self.member(member)).collect()
    }

    fn member(&self, member: &TsTypeElement) -> Field {
        let range = self.member_range(member.span());
        match member {
            TsTypeElement::TsPropertySignature(property) => self.property(property, range),
            _ => Field {
                key: FieldKey::Unnamed,
                optional: false,
                value: None,
                range,
                annotation_at: range.end,
            },
        }
    }

    fn property(&self, property: &TsPropertySignature, range: Range) -> Field {
        let key = match &*property.key {
            Expr::Ident(ident) if !property.computed => FieldKey::Named(ident.sym.to_string()),
            _ => FieldKey::Unnamed,
        };

        let mut annotation_at = self.offset(property.key.span().hi);
        if property.optional {
            let bytes = self.source.as_bytes();
            let mut cursor = annotation_at;
            while bytes.get(cursor).is_some_and(u8::is_ascii_whitespace) {
                cursor += 1;
            }
            if bytes.get(cursor) == Some(&b'?') {
                annotation_at = cursor + 1;
            }
        }

        Field {
            key,
            optional: property.optional,
            value: property
                .type_ann
                .as_ref()
                .map(|annotation| self.extract(&annotation.type_ann)),
            range,
            annotation_at,
        }
    }

    /// Member span widened to cover a trailing `,` or `;` on the same line.
    fn member_range(&self, span: Span) -> Range {
        let range = self.range(span);
        let bytes = self.source.as_bytes();
        if range.end > range.start && matches!(bytes.get(range.end - 1), Some(b',' | b';')) {
            return range;
        }
        let mut cursor = range.end;
        while matches!(bytes.get(cursor), Some(b' ' | b'\t')) {
            cursor += 1;
        }
        if matches!(bytes.get(cursor), Some(b',' | b';')) {
            Range::new(range.start, cursor + 1)
        } else {
            range
        }
    }
}

fn keyword_of(kind: TsKeywordTypeKind) -> Keyword {
    match kind {
        TsKeywordTypeKind::TsStringKeyword => Keyword::String,
        TsKeywordTypeKind::TsUndefinedKeyword => Keyword::Undefined,
        TsKeywordTypeKind::TsNeverKeyword => Keyword::Never,
        _ => Keyword::Other,
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{aliases_of, shape_of};
    use super::*;
    use crate::shape::Classification;

    fn slice<'s>(source: &'s str, range: Range) -> &'s str {
        &source[range.start..range.end]
    }

    #[test]
    fn test_literal_fields() {
        let (source, shape) = shape_of("{ id: string; rest?: string[], other: number }");
        let TypeShape::Literal(fields) = &shape.ty else {
            panic!("expected literal, got {:?}", shape.ty);
        };
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0].name(), Some("id"));
        assert_eq!(fields[0].classification(), Classification::String);
        assert_eq!(slice(&source, fields[0].range), "id: string;");
        assert_eq!(fields[1].name(), Some("rest"));
        assert!(fields[1].optional);
        assert_eq!(fields[1].classification(), Classification::StringArray);
        assert_eq!(slice(&source, fields[1].range), "rest?: string[],");
        assert_eq!(fields[2].classification(), Classification::Other);
        assert_eq!(slice(&source, fields[2].range), "other: number");
    }

    #[test]
    fn test_annotation_slot_after_key() {
        let (source, shape) = shape_of("{ id; slug? }");
        let TypeShape::Literal(fields) = &shape.ty else {
            panic!("expected literal");
        };
        assert!(fields[0].value.is_none());
        assert_eq!(&source[..fields[0].annotation_at], "type Subject = { id");
        assert_eq!(&source[..fields[1].annotation_at], "type Subject = { id; slug?");
    }

    #[test]
    fn test_wrappers() {
        let (_, shape) = shape_of("Promise<Array<string>>");
        let (inner, wrapped) = shape.unwrap_promise();
        assert!(wrapped);
        assert_eq!(inner.classification(), Classification::StringArray);

        let (_, shape) = shape_of("(string)");
        assert!(shape.is_keyword(Keyword::String));

        let (_, shape) = shape_of("Record<string, never>");
        let TypeShape::RecordOf(key, value) = &shape.ty else {
            panic!("expected record");
        };
        assert!(key.is_keyword(Keyword::String));
        assert!(value.is_keyword(Keyword::Never));
    }

    #[test]
    fn test_index_signature() {
        let (_, shape) = shape_of("{ [key: string]: string | string[] | undefined }");
        let TypeShape::IndexSignatureOf(value) = &shape.ty else {
            panic!("expected index signature, got {:?}", shape.ty);
        };
        let TypeShape::UnionOf(members) = &value.ty else {
            panic!("expected union");
        };
        assert_eq!(members.len(), 3);
        assert!(members[2].is_keyword(Keyword::Undefined));

        let (_, shape) = shape_of("{ [key: number]: string }");
        let TypeShape::Literal(fields) = &shape.ty else {
            panic!("expected literal");
        };
        assert_eq!(fields[0].name(), None);
    }

    #[test]
    fn test_references_and_opaque() {
        let (_, shape) = shape_of("Params");
        assert_eq!(shape.ty, TypeShape::Reference("Params".to_string()));

        for text in ["Foo.Bar", "Map<string, string>", "() => void", "[string]", "A & B"] {
            let (_, shape) = shape_of(text);
            assert_eq!(shape.ty, TypeShape::Opaque, "{text}");
        }
        let (_, shape) = shape_of("'literal'");
        assert!(shape.is_keyword(Keyword::Other));
    }

    #[test]
    fn test_interfaces_join_alias_table() {
        let aliases = aliases_of(
            "interface Params { id: string }\ninterface Extended extends Params { other: string }\nexport type Alias = Params;\n",
        );
        assert!(matches!(
            aliases.get("Params").map(|shape| &shape.ty),
            Some(TypeShape::Literal(_))
        ));
        assert!(aliases.get("Extended").is_none());
        assert!(aliases.get("Alias").is_some());
    }

    #[test]
    fn test_computed_keys_are_unnamed() {
        let (_, shape) = shape_of("{ ['id']: string; method(): void }");
        let TypeShape::Literal(fields) = &shape.ty else {
            panic!("expected literal");
        };
        assert!(fields.iter().all(|field| field.name().is_none()));
    }
}
