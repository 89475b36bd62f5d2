//! Per-file validation context.

use serde::{Deserialize, Serialize};

use crate::segments::{RouteParam, parent_dir, resolve_route_params};

pub const PARAMS_PROP: &str = "params";
pub const SEARCH_PARAMS_PROP: &str = "searchParams";
pub const CHILDREN_PROP: &str = "children";

/// Source extensions a routable file may carry.
pub const ROUTE_FILE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "mts", "cts"];

/// What a routable file renders or handles, derived from its stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileRole {
    Page,
    Layout,
    Route,
    Default,
}

impl FileRole {
    /// Role of `page.tsx`, `route.ts` and friends; `None` for anything else.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (stem, extension) = file_name.rsplit_once('.')?;
        if !ROUTE_FILE_EXTENSIONS.contains(&extension) {
            return None;
        }
        match stem {
            "page" => Some(FileRole::Page),
            "layout" => Some(FileRole::Layout),
            "route" => Some(FileRole::Route),
            "default" => Some(FileRole::Default),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileRole::Page => "page",
            FileRole::Layout => "layout",
            FileRole::Route => "route",
            FileRole::Default => "default",
        }
    }

    /// Props a handler of this role may declare.
    pub fn allowed_props(&self) -> &'static [&'static str] {
        match self {
            FileRole::Page => &[PARAMS_PROP, SEARCH_PARAMS_PROP],
            FileRole::Layout => &[PARAMS_PROP, CHILDREN_PROP],
            FileRole::Route | FileRole::Default => &[PARAMS_PROP],
        }
    }
}

/// Whether `params` and `searchParams` arrive as promises.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromiseParams {
    Required,
    Forbidden,
    /// Version could not be determined; promise checks are disabled.
    #[default]
    Unknown,
}

impl PromiseParams {
    /// Wrapping a generated fix should use, given what the user wrote.
    pub fn wrap_for_fix(&self, written_wrapped: bool) -> bool {
        match self {
            PromiseParams::Required => true,
            PromiseParams::Forbidden => false,
            PromiseParams::Unknown => written_wrapped,
        }
    }

    /// Whether the written wrapping contradicts the expected one.
    pub fn mismatches(&self, written_wrapped: bool) -> bool {
        matches!(
            (self, written_wrapped),
            (PromiseParams::Required, false) | (PromiseParams::Forbidden, true)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationContext {
    pub route_params: Vec<RouteParam>,
    pub allowed_props: &'static [&'static str],
    pub search_params_strict: bool,
    pub promise_params: PromiseParams,
    pub role: FileRole,
}

impl ValidationContext {
    /// Context for a forward-slash file path, or `None` when the file is not
    /// a routable file inside `root_dir`.
    pub fn for_path(
        file_path: &str,
        root_dir: &str,
        search_params_strict: bool,
        promise_params: PromiseParams,
    ) -> Option<Self> {
        let file_name = file_path.rsplit('/').next().unwrap_or(file_path);
        let role = FileRole::from_file_name(file_name)?;
        let route_params = resolve_route_params(parent_dir(file_path), root_dir)?;
        Some(Self {
            route_params,
            allowed_props: role.allowed_props(),
            search_params_strict,
            promise_params,
            role,
        })
    }

    pub fn allows(&self, prop: &str) -> bool {
        self.allowed_props.contains(&prop)
    }

    pub fn param(&self, name: &str) -> Option<&RouteParam> {
        self.route_params.iter().find(|param| param.name == name)
    }

    pub fn current_param(&self) -> Option<&RouteParam> {
        self.route_params.iter().find(|param| param.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_from_file_names() {
        assert_eq!(FileRole::from_file_name("page.tsx"), Some(FileRole::Page));
        assert_eq!(FileRole::from_file_name("layout.js"), Some(FileRole::Layout));
        assert_eq!(FileRole::from_file_name("route.ts"), Some(FileRole::Route));
        assert_eq!(FileRole::from_file_name("default.jsx"), Some(FileRole::Default));
        assert_eq!(FileRole::from_file_name("page.test.tsx"), None);
        assert_eq!(FileRole::from_file_name("page.css"), None);
        assert_eq!(FileRole::from_file_name("loading.tsx"), None);
        assert_eq!(FileRole::from_file_name("page"), None);
    }

    #[test]
    fn test_allowed_props() {
        assert_eq!(FileRole::Page.allowed_props(), &["params", "searchParams"]);
        assert_eq!(FileRole::Layout.allowed_props(), &["params", "children"]);
        assert_eq!(FileRole::Route.allowed_props(), &["params"]);
        assert_eq!(FileRole::Default.allowed_props(), &["params"]);
    }

    #[test]
    fn test_context_for_path() {
        let context = ValidationContext::for_path(
            "src/app/movies/[id]/page.tsx",
            "app",
            true,
            PromiseParams::Unknown,
        );
        let Some(context) = context else {
            panic!("expected a routed file");
        };
        assert_eq!(context.role, FileRole::Page);
        assert!(context.allows("searchParams"));
        assert!(!context.allows("children"));
        assert_eq!(context.current_param().map(|param| param.name.as_str()), Some("id"));

        assert!(
            ValidationContext::for_path("src/lib/page.tsx", "app", true, PromiseParams::Unknown)
                .is_none()
        );
        assert!(
            ValidationContext::for_path("src/app/utils.ts", "app", true, PromiseParams::Unknown)
                .is_none()
        );
    }

    #[test]
    fn test_promise_params_wrapping() {
        assert!(PromiseParams::Required.mismatches(false));
        assert!(!PromiseParams::Required.mismatches(true));
        assert!(PromiseParams::Forbidden.mismatches(true));
        assert!(!PromiseParams::Unknown.mismatches(true));
        assert!(!PromiseParams::Unknown.mismatches(false));

        assert!(PromiseParams::Unknown.wrap_for_fix(true));
        assert!(!PromiseParams::Unknown.wrap_for_fix(false));
        assert!(PromiseParams::Required.wrap_for_fix(false));
        assert!(!PromiseParams::Forbidden.wrap_for_fix(true));
    }
}
