use std::path::Path;

use serde::Deserialize;

use crate::context::PromiseParams;
use crate::manifest::detect_promise_params;
use crate::segments::DEFAULT_ROOT_DIR;

pub const CONFIG_FILE: &str = "route-params.json";
pub const MANIFEST_FILE: &str = "package.json";
/// Key holding the configuration inside `package.json`.
pub const MANIFEST_KEY: &str = "routeParams";

/// Options the linter runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Check `searchParams` props.
    pub search_params: bool,
    pub root_dir: String,
    pub promise_params: PromiseParams,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            search_params: true,
            root_dir: DEFAULT_ROOT_DIR.to_string(),
            promise_params: PromiseParams::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromiseParamsSetting {
    /// Derive from the framework version in `package.json`.
    #[default]
    Auto,
    Required,
    Forbidden,
}

/// Configuration as written in `route-params.json` or under the
/// `routeParams` key of `package.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub search_params: Option<bool>,
    pub root_dir: Option<String>,
    pub promise_params: Option<PromiseParamsSetting>,
}

impl Config {
    pub fn load(directory: &Path) -> Self {
        let config_path = directory.join(CONFIG_FILE);
        if let Some(config) = load_config_file(&config_path) {
            return config;
        }

        let manifest_path = directory.join(MANIFEST_FILE);
        load_from_manifest(&manifest_path).unwrap_or_default()
    }

    /// Resolve into [`Options`], reading the manifest of `project_dir` when
    /// the promise setting is `auto`.
    pub fn resolve(&self, project_dir: &Path) -> Options {
        let defaults = Options::default();
        let promise_params = match self.promise_params.unwrap_or_default() {
            PromiseParamsSetting::Required => PromiseParams::Required,
            PromiseParamsSetting::Forbidden => PromiseParams::Forbidden,
            PromiseParamsSetting::Auto => detect_promise_params(project_dir),
        };
        Options {
            search_params: self.search_params.unwrap_or(defaults.search_params),
            root_dir: self.root_dir.clone().unwrap_or(defaults.root_dir),
            promise_params,
        }
    }
}

fn load_config_file(path: &Path) -> Option<Config> {
    if !path.exists() {
        return None;
    }

    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            tracing::warn!("Failed to read {}: {}", path.display(), err);
            return None;
        }
    };

    match serde_json::from_str::<Config>(&contents) {
        Ok(config) => Some(config),
        Err(err) => {
            tracing::warn!("Failed to parse {}: {}", path.display(), err);
            None
        }
    }
}

fn load_from_manifest(path: &Path) -> Option<Config> {
    if !path.exists() {
        return None;
    }

    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            tracing::warn!("Failed to read {}: {}", path.display(), err);
            return None;
        }
    };

    let root: serde_json::Value = match serde_json::from_str(&contents) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {}", path.display(), err);
            return None;
        }
    };

    let section = root.get(MANIFEST_KEY)?;
    match serde_json::from_value::<Config>(section.clone()) {
        Ok(config) => Some(config),
        Err(err) => {
            tracing::warn!("Failed to parse {}.{}: {}", path.display(), MANIFEST_KEY, err);
            None
        }
    }
}
