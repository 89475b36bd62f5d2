//! Route parameters implied by a file's place in the routing tree.

use serde::Serialize;

/// Folder name that marks the start of the routing tree.
pub const DEFAULT_ROOT_DIR: &str = "app";

/// One dynamic segment of a route, ordered root to leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteParam {
    pub name: String,
    pub catch_all: bool,
    /// Set on the dynamic segment that is the file's own directory.
    pub current: bool,
}

impl RouteParam {
    pub fn new(name: &str, catch_all: bool) -> Self {
        Self {
            name: name.to_string(),
            catch_all,
            current: false,
        }
    }

    /// Type text a field for this parameter must carry.
    pub fn expected_type(&self) -> &'static str {
        if self.catch_all { "string[]" } else { "string" }
    }
}

/// Resolve the dynamic segments of `dir`, a forward-slash directory path.
///
/// Returns `None` when no component of `dir` equals `root_dir`, meaning the
/// file is outside the routing tree and must not be validated.
pub fn resolve_route_params(dir: &str, root_dir: &str) -> Option<Vec<RouteParam>> {
    let folders: Vec<&str> = dir.split('/').filter(|folder| !folder.is_empty()).collect();
    let root = folders.iter().position(|folder| *folder == root_dir)?;
    let routed = &folders[root + 1..];

    let mut params: Vec<RouteParam> = routed
        .iter()
        .filter_map(|folder| parse_dynamic_segment(folder))
        .collect();

    let own_dir_is_dynamic = routed
        .last()
        .is_some_and(|folder| parse_dynamic_segment(folder).is_some());
    if own_dir_is_dynamic {
        if let Some(last) = params.last_mut() {
            last.current = true;
        }
    }

    Some(params)
}

/// Parent directory of a forward-slash file path.
pub fn parent_dir(file_path: &str) -> &str {
    match file_path.rfind('/') {
        Some(index) => &file_path[..index],
        None => "",
    }
}

fn parse_dynamic_segment(folder: &str) -> Option<RouteParam> {
    let inner = folder.strip_prefix('[')?.strip_suffix(']')?;
    // [[...slug]] is the optional form of a catch-all
    let inner = match inner.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
        Some(optional) if optional.starts_with("...") => optional,
        _ => inner,
    };
    let (name, catch_all) = match inner.strip_prefix("...") {
        Some(name) => (name, true),
        None => (inner, false),
    };
    if name.is_empty() || name.contains(['[', ']']) {
        return None;
    }
    Some(RouteParam::new(name, catch_all))
}
