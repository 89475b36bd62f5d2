//! Framework version detection from `package.json`.

use std::path::Path;

use semver::{Comparator, Op, VersionReq};
use tracing::{debug, warn};

use crate::config::MANIFEST_FILE;
use crate::context::PromiseParams;

/// Dependency whose version decides promise-wrapped params.
pub const FRAMEWORK_PACKAGE: &str = "next";

const DEPENDENCY_SECTIONS: &[&str] = &["dependencies", "devDependencies"];

/// Detect promise-wrapped params from the manifest in `project_dir`.
pub fn detect_promise_params(project_dir: &Path) -> PromiseParams {
    let path = project_dir.join(MANIFEST_FILE);
    let Some(range) = read_dependency_range(&path, FRAMEWORK_PACKAGE) else {
        debug!(path = %path.display(), "no framework dependency found");
        return PromiseParams::Unknown;
    };
    let promise_params = promise_params_for_range(&range);
    debug!(range = %range, ?promise_params, "detected framework version");
    promise_params
}

/// Params are promises from major 15 on; 13 and 14 pass them as plain
/// objects.
pub fn promise_params_for_range(range: &str) -> PromiseParams {
    match min_major(range) {
        Some(13 | 14) => PromiseParams::Forbidden,
        Some(major) if major >= 15 => PromiseParams::Required,
        _ => PromiseParams::Unknown,
    }
}

/// Lowest major version any alternative of an npm range admits.
///
/// Accepts `||` alternatives and space-separated comparators. Returns
/// `None` when any alternative fails to parse.
pub fn min_major(range: &str) -> Option<u64> {
    range
        .split("||")
        .map(|alternative| alternative_min_major(alternative.trim()))
        .collect::<Option<Vec<u64>>>()?
        .into_iter()
        .min()
}

fn alternative_min_major(alternative: &str) -> Option<u64> {
    let requirement = parse_requirement(alternative)?;
    Some(
        requirement
            .comparators
            .iter()
            .filter_map(lower_bound_major)
            .max()
            .unwrap_or(0),
    )
}

fn parse_requirement(text: &str) -> Option<VersionReq> {
    if let Ok(requirement) = VersionReq::parse(text) {
        return Some(requirement);
    }
    // npm separates comparators with spaces, semver with commas
    let joined = text.split_whitespace().collect::<Vec<_>>().join(", ");
    VersionReq::parse(&joined).ok()
}

fn lower_bound_major(comparator: &Comparator) -> Option<u64> {
    match comparator.op {
        Op::Exact | Op::GreaterEq | Op::Tilde | Op::Caret | Op::Wildcard => Some(comparator.major),
        Op::Greater if comparator.minor.is_none() => Some(comparator.major + 1),
        Op::Greater => Some(comparator.major),
        _ => None,
    }
}

fn read_dependency_range(path: &Path, package: &str) -> Option<String> {
    if !path.exists() {
        return None;
    }

    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            warn!("Failed to read {}: {}", path.display(), err);
            return None;
        }
    };

    let root: serde_json::Value = match serde_json::from_str(&contents) {
        Ok(value) => value,
        Err(err) => {
            warn!("Failed to parse {}: {}", path.display(), err);
            return None;
        }
    };

    DEPENDENCY_SECTIONS.iter().find_map(|section| {
        root.get(section)
            .and_then(|dependencies| dependencies.get(package))
            .and_then(|range| range.as_str())
            .map(str::to_string)
    })
}
