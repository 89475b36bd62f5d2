//! Apply diagnostic fixes to source text.

use tracing::debug;

use crate::config::Options;
use crate::diagnostics::{Diagnostic, Fix};
use crate::error::LintError;
use crate::lint::lint_source;

/// Passes `fix_source` runs before giving up on reaching a fixed point.
pub const MAX_FIX_PASSES: usize = 10;

/// Apply every non-overlapping fix in one pass.
///
/// Fixes are taken in order of their start offset; a fix that overlaps one
/// already taken, or starts where it started, is skipped and left for the
/// next pass. Returns `None` when no fix applies.
pub fn apply_fixes(source: &str, diagnostics: &[Diagnostic]) -> Option<String> {
    let mut fixes: Vec<&Fix> = diagnostics
        .iter()
        .filter_map(|diagnostic| diagnostic.fix.as_ref())
        .filter(|fix| is_applicable(source, fix))
        .collect();
    fixes.sort_by_key(|fix| (fix.range.start, fix.range.end));
    // handlers sharing one alias report the same fix more than once
    fixes.dedup();

    let mut out = String::with_capacity(source.len());
    let mut cursor = 0;
    let mut last_start = None;
    for fix in fixes {
        if fix.range.start < cursor || last_start == Some(fix.range.start) {
            continue;
        }
        out.push_str(&source[cursor..fix.range.start]);
        out.push_str(&reindent(&fix.replacement, line_indent(source, fix.range.start)));
        cursor = fix.range.end;
        last_start = Some(fix.range.start);
    }
    if last_start.is_none() {
        return None;
    }
    out.push_str(&source[cursor..]);
    Some(out)
}

/// Leading whitespace of the line holding `offset`.
fn line_indent(source: &str, offset: usize) -> &str {
    let line_start = source[..offset].rfind('\n').map_or(0, |index| index + 1);
    let line = &source[line_start..];
    &line[..line.len() - line.trim_start_matches([' ', '\t']).len()]
}

/// Continuation lines of a replacement printed at depth 0 follow the
/// indentation of the line they land on.
fn reindent(replacement: &str, indent: &str) -> String {
    if indent.is_empty() {
        return replacement.to_string();
    }
    replacement.replace('\n', &format!("\n{indent}"))
}

fn is_applicable(source: &str, fix: &Fix) -> bool {
    fix.range.start <= fix.range.end
        && fix.range.end <= source.len()
        && source.is_char_boundary(fix.range.start)
        && source.is_char_boundary(fix.range.end)
}

#[derive(Debug, Clone)]
pub struct FixOutcome {
    pub source: String,
    /// Passes that changed the source.
    pub passes: usize,
    /// Diagnostics left after the last pass.
    pub remaining: Vec<Diagnostic>,
}

impl FixOutcome {
    pub fn changed(&self) -> bool {
        self.passes > 0
    }
}

/// Lint and fix repeatedly until no fix applies.
pub fn fix_source(source: &str, file_path: &str, options: &Options) -> Result<FixOutcome, LintError> {
    let mut current = source.to_string();
    let mut passes = 0;
    loop {
        let diagnostics = lint_source(&current, file_path, options)?;
        if passes == MAX_FIX_PASSES {
            debug!(path = file_path, "fix passes exhausted");
            return Ok(FixOutcome {
                source: current,
                passes,
                remaining: diagnostics,
            });
        }
        match apply_fixes(&current, &diagnostics) {
            Some(fixed) if fixed != current => {
                current = fixed;
                passes += 1;
            }
            _ => {
                return Ok(FixOutcome {
                    source: current,
                    passes,
                    remaining: diagnostics,
                });
            }
        }
    }
}
