//! Lint a route file: find its handlers and validate their signatures.

use std::collections::HashMap;
use std::path::Path;

use serde::Serialize;
use swc_common::{BytePos, Span, Spanned};
use swc_ecma_ast::{
    ArrowExpr, Decl, DefaultDecl, ExportDecl, ExportDefaultDecl, ExportDefaultExpr, Expr, FnDecl, Function,
    Module, ModuleDecl, ModuleItem, Pat, Stmt, TsTypeAnn, VarDeclarator,
};
use swc_ecma_visit::{Visit, VisitWith};
use tracing::debug;

use crate::config::Options;
use crate::context::{FileRole, ValidationContext};
use crate::diagnostics::Diagnostic;
use crate::error::LintError;
use crate::extract::ShapeExtractor;
use crate::parse::parse_module;
use crate::shape::{AliasTable, Range};
use crate::validate::{
    AnnotationSlot, ReturnAnnotation, StaticParamsFunction, validate_props, validate_static_params,
};

/// Route handler exports of `route` files.
pub const ROUTE_HANDLERS: &[&str] = &["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS"];
pub const METADATA_FUNCTIONS: &[&str] = &["generateMetadata", "generateMetadataFile"];
pub const STATIC_PARAMS_FUNCTION: &str = "generateStaticParams";

/// Diagnostics of one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: String,
    #[serde(skip)]
    pub source: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl FileReport {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn fixable(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.fix.is_some())
            .count()
    }
}

/// Whether `path` names a page, layout, route or default file.
pub fn is_route_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(FileRole::from_file_name)
        .is_some()
}

/// Read and lint `path`. `display_path` locates the file in the routing
/// tree and is used in the report.
pub fn lint_file(path: &Path, display_path: &str, options: &Options) -> Result<FileReport, LintError> {
    let source = std::fs::read_to_string(path).map_err(|source| LintError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let diagnostics = lint_source(&source, display_path, options)?;
    Ok(FileReport {
        path: display_path.to_string(),
        source,
        diagnostics,
    })
}

/// Lint source text. Files outside the routing tree yield no diagnostics
/// and are not parsed.
pub fn lint_source(
    source: &str,
    file_path: &str,
    options: &Options,
) -> Result<Vec<Diagnostic>, LintError> {
    let normalized = file_path.replace('\\', "/");
    let Some(context) = ValidationContext::for_path(
        &normalized,
        &options.root_dir,
        options.search_params,
        options.promise_params,
    ) else {
        debug!(path = %normalized, "not a routed file");
        return Ok(Vec::new());
    };

    let parsed = parse_module(source, file_path)?;
    let extractor = ShapeExtractor::new(source, parsed.start);
    let aliases = collect_aliases(&parsed.module, &extractor);
    debug!(
        path = %normalized,
        role = context.role.as_str(),
        params = context.route_params.len(),
        aliases = aliases.len(),
        "linting route file"
    );

    let mut checker = HandlerChecker::new(&extractor, &aliases, &context);
    parsed.module.visit_with(&mut checker);
    Ok(checker.finish())
}

fn collect_aliases(module: &Module, extractor: &ShapeExtractor) -> AliasTable {
    let mut aliases = AliasTable::new();
    for item in &module.body {
        let decl = match item {
            ModuleItem::Stmt(Stmt::Decl(decl)) => decl,
            ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export)) => &export.decl,
            _ => continue,
        };
        match decl {
            Decl::TsTypeAlias(alias) => {
                aliases.insert(alias.id.sym.to_string(), extractor.extract(&alias.type_ann));
            }
            Decl::TsInterface(interface) => {
                if let Some(shape) = extractor.interface(interface) {
                    aliases.insert(interface.id.sym.to_string(), shape);
                }
            }
            _ => {}
        }
    }
    aliases
}

#[derive(Clone, Copy)]
enum FunctionNode<'a> {
    Function(&'a Function),
    Arrow(&'a ArrowExpr),
}

impl<'a> FunctionNode<'a> {
    fn from_expr(expr: &'a Expr) -> Option<Self> {
        match expr {
            Expr::Paren(paren) => Self::from_expr(&paren.expr),
            Expr::Arrow(arrow) => Some(FunctionNode::Arrow(arrow)),
            Expr::Fn(fn_expr) => Some(FunctionNode::Function(&fn_expr.function)),
            _ => None,
        }
    }

    fn param(&self, index: usize) -> Option<&'a Pat> {
        match self {
            FunctionNode::Function(function) => function.params.get(index).map(|param| &param.pat),
            FunctionNode::Arrow(arrow) => arrow.params.get(index),
        }
    }

    fn is_async(&self) -> bool {
        match self {
            FunctionNode::Function(function) => function.is_async,
            FunctionNode::Arrow(arrow) => arrow.is_async,
        }
    }

    fn return_type(&self) -> Option<&'a TsTypeAnn> {
        match self {
            FunctionNode::Function(function) => function.return_type.as_deref(),
            FunctionNode::Arrow(arrow) => arrow.return_type.as_deref(),
        }
    }

    fn span(&self) -> Span {
        match self {
            FunctionNode::Function(function) => function.span,
            FunctionNode::Arrow(arrow) => arrow.span,
        }
    }

    fn body_start(&self) -> Option<BytePos> {
        match self {
            FunctionNode::Function(function) => function.body.as_ref().map(|body| body.span.lo),
            FunctionNode::Arrow(arrow) => Some(arrow.body.span().lo),
        }
    }
}

fn pat_type_annotation(pat: &Pat) -> Option<&TsTypeAnn> {
    match pat {
        Pat::Ident(binding) => binding.type_ann.as_deref(),
        Pat::Object(object) => object.type_ann.as_deref(),
        Pat::Array(array) => array.type_ann.as_deref(),
        Pat::Assign(assign) => pat_type_annotation(&assign.left),
        _ => None,
    }
}

/// Build the validator's view of a static params generator.
fn static_params_function(
    extractor: &ShapeExtractor,
    function: FunctionNode,
    name_range: Range,
) -> StaticParamsFunction {
    StaticParamsFunction {
        range: name_range,
        is_async: function.is_async(),
        return_type: function.return_type().map(|annotation| ReturnAnnotation {
            range: extractor.annotation_range(annotation),
            shape: extractor.extract(&annotation.type_ann),
        }),
        annotation_slot: annotation_slot(extractor, function),
    }
}

/// Position right after the parameter list's closing parenthesis. A bare
/// arrow parameter gets parenthesised.
fn annotation_slot(extractor: &ShapeExtractor, function: FunctionNode) -> Option<AnnotationSlot> {
    let source = extractor.source();
    let start = extractor.offset(function.span().lo);
    let body = extractor.offset(function.body_start()?);
    let head = source.get(start..body)?;
    let head = match function {
        FunctionNode::Arrow(_) => &head[..head.rfind("=>")?],
        FunctionNode::Function(_) => head,
    };
    let (range, prefix) = match (head.rfind(')'), function) {
        (Some(close), _) => (Range::empty(start + close + 1), String::new()),
        (None, FunctionNode::Arrow(arrow)) => {
            let [Pat::Ident(binding)] = arrow.params.as_slice() else {
                return None;
            };
            let range = extractor.range(binding.id.span);
            (range, format!("({})", source.get(range.start..range.end)?))
        }
        (None, FunctionNode::Function(_)) => return None,
    };
    let trailing_space = !source
        .get(range.end..)
        .is_some_and(|rest| rest.starts_with(char::is_whitespace));
    Some(AnnotationSlot {
        range,
        prefix,
        trailing_space,
    })
}

/// Walks top-level module items and validates every handler it finds.
struct HandlerChecker<'a> {
    extractor: &'a ShapeExtractor<'a>,
    aliases: &'a AliasTable,
    context: &'a ValidationContext,
    diagnostics: Vec<Diagnostic>,
    /// Props diagnostics of other named functions, kept until we know
    /// which one `export default Name` refers to.
    candidates: HashMap<String, Vec<Diagnostic>>,
    default_export: Option<String>,
}

impl<'a> HandlerChecker<'a> {
    fn new(
        extractor: &'a ShapeExtractor<'a>,
        aliases: &'a AliasTable,
        context: &'a ValidationContext,
    ) -> Self {
        Self {
            extractor,
            aliases,
            context,
            diagnostics: Vec::new(),
            candidates: HashMap::new(),
            default_export: None,
        }
    }

    fn finish(mut self) -> Vec<Diagnostic> {
        if let Some(name) = self.default_export.take() {
            if let Some(diagnostics) = self.candidates.remove(&name) {
                self.diagnostics.extend(diagnostics);
            }
        }
        self.diagnostics.sort_by_key(|diagnostic| diagnostic.range.start);
        self.diagnostics
    }

    fn check_named(&mut self, name: &str, name_span: Span, function: FunctionNode) {
        if name == STATIC_PARAMS_FUNCTION {
            debug!(handler = name, "checking static params");
            let function = static_params_function(self.extractor, function, self.extractor.range(name_span));
            validate_static_params(&function, self.aliases, self.context, &mut self.diagnostics);
        } else if METADATA_FUNCTIONS.contains(&name) {
            debug!(handler = name, "checking metadata props");
            let diagnostics = self.check_props(function, 0);
            self.diagnostics.extend(diagnostics);
        } else if self.context.role == FileRole::Route && ROUTE_HANDLERS.contains(&name) {
            debug!(handler = name, "checking route handler context");
            let diagnostics = self.check_props(function, 1);
            self.diagnostics.extend(diagnostics);
        } else if self.context.role != FileRole::Route {
            let diagnostics = self.check_props(function, 0);
            self.candidates.insert(name.to_string(), diagnostics);
        }
    }

    fn check_default(&mut self, function: FunctionNode) {
        if self.context.role == FileRole::Route {
            return;
        }
        debug!("checking default export props");
        let diagnostics = self.check_props(function, 0);
        self.diagnostics.extend(diagnostics);
    }

    fn check_props(&self, function: FunctionNode, index: usize) -> Vec<Diagnostic> {
        let mut out = Vec::new();
        let Some(annotation) = function.param(index).and_then(pat_type_annotation) else {
            return out;
        };
        let props = self.extractor.extract(&annotation.type_ann);
        validate_props(&props, self.aliases, self.context, &mut out);
        out
    }
}

impl Visit for HandlerChecker<'_> {
    fn visit_module_item(&mut self, n: &ModuleItem) {
        match n {
            ModuleItem::Stmt(Stmt::Decl(decl))
            | ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(ExportDecl { decl, .. })) => {
                if matches!(decl, Decl::Fn(_) | Decl::Var(_)) {
                    decl.visit_with(self);
                }
            }
            ModuleItem::ModuleDecl(
                ModuleDecl::ExportDefaultDecl(_) | ModuleDecl::ExportDefaultExpr(_),
            ) => n.visit_children_with(self),
            _ => {}
        }
    }

    fn visit_fn_decl(&mut self, n: &FnDecl) {
        self.check_named(&n.ident.sym, n.ident.span, FunctionNode::Function(&n.function));
    }

    fn visit_var_declarator(&mut self, n: &VarDeclarator) {
        let Pat::Ident(binding) = &n.name else {
            return;
        };
        let Some(function) = n.init.as_deref().and_then(FunctionNode::from_expr) else {
            return;
        };
        self.check_named(&binding.id.sym, binding.id.span, function);
    }

    fn visit_export_default_decl(&mut self, n: &ExportDefaultDecl) {
        if let DefaultDecl::Fn(fn_expr) = &n.decl {
            self.check_default(FunctionNode::Function(&fn_expr.function));
        }
    }

    fn visit_export_default_expr(&mut self, n: &ExportDefaultExpr) {
        match &*n.expr {
            Expr::Ident(ident) => self.default_export = Some(ident.sym.to_string()),
            expr => {
                if let Some(function) = FunctionNode::from_expr(expr) {
                    self.check_default(function);
                }
            }
        }
    }
}
