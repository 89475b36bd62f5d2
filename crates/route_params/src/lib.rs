//! Route parameter type checking for file-routed applications.
//!
//! Derives the parameter contract of a route file from its directory path
//! (`app/movies/[id]/page.tsx` takes `{ id: string }`), extracts the types
//! its handlers declare, and reports mismatches with exact replacement text.
//!
//! ```no_run
//! use route_params::{Options, lint_source};
//!
//! let source = "export default function Page({ params }: { params: { ids: string } }) {}";
//! let diagnostics = lint_source(source, "app/movies/[id]/page.tsx", &Options::default())?;
//! assert_eq!(diagnostics[0].message(), "The param ids does not exist in the corresponding route path of this file");
//! # Ok::<(), route_params::LintError>(())
//! ```

pub mod canonical;
pub mod config;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod extract;
pub mod fix;
pub mod lint;
pub mod manifest;
mod parse;
pub mod printer;
pub mod segments;
pub mod shape;
pub mod validate;

pub use config::{Config, Options, PromiseParamsSetting};
pub use context::{FileRole, PromiseParams, ValidationContext};
pub use diagnostics::{Diagnostic, DiagnosticKind, Fix};
pub use error::LintError;
pub use fix::{FixOutcome, apply_fixes, fix_source};
pub use lint::{FileReport, is_route_file, lint_file, lint_source};
pub use segments::{RouteParam, resolve_route_params};
pub use shape::Range;
