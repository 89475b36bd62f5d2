//! Diagnostics produced by the validators.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::shape::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    UnknownParameter,
    WrongParameterType,
    ForbiddenProperty,
    WrongSearchParamsType,
    MissingReturnType,
    WrongReturnType,
    ParamNotOptionalAllowed,
    MustBeWrappedInPromise,
    MustNotBeWrappedInPromise,
    IsNoLiteral,
}

impl DiagnosticKind {
    /// Stable identifier, as used in JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::UnknownParameter => "unknown-parameter",
            DiagnosticKind::WrongParameterType => "wrong-parameter-type",
            DiagnosticKind::ForbiddenProperty => "forbidden-property",
            DiagnosticKind::WrongSearchParamsType => "wrong-search-params-type",
            DiagnosticKind::MissingReturnType => "missing-return-type",
            DiagnosticKind::WrongReturnType => "wrong-return-type",
            DiagnosticKind::ParamNotOptionalAllowed => "param-not-optional-allowed",
            DiagnosticKind::MustBeWrappedInPromise => "must-be-wrapped-in-promise",
            DiagnosticKind::MustNotBeWrappedInPromise => "must-not-be-wrapped-in-promise",
            DiagnosticKind::IsNoLiteral => "is-no-literal",
        }
    }

    /// Heading shown above a rendered code frame.
    pub fn title(&self) -> &'static str {
        match self {
            DiagnosticKind::UnknownParameter => "Unknown Parameter",
            DiagnosticKind::WrongParameterType => "Wrong Parameter Type",
            DiagnosticKind::ForbiddenProperty => "Forbidden Property",
            DiagnosticKind::WrongSearchParamsType => "Wrong searchParams Type",
            DiagnosticKind::MissingReturnType => "Missing Return Type",
            DiagnosticKind::WrongReturnType => "Wrong Return Type",
            DiagnosticKind::ParamNotOptionalAllowed => "Param Not Optional",
            DiagnosticKind::MustBeWrappedInPromise => "Promise Required",
            DiagnosticKind::MustNotBeWrappedInPromise => "Promise Not Allowed",
            DiagnosticKind::IsNoLiteral => "No Literal Type",
        }
    }

    /// Message template; `{key}` placeholders are filled from the data map.
    fn template(&self) -> &'static str {
        match self {
            DiagnosticKind::UnknownParameter => {
                "The param {name} does not exist in the corresponding route path of this file"
            }
            DiagnosticKind::WrongParameterType => "{name} must be of type {type}",
            DiagnosticKind::ForbiddenProperty => "The property {key} is forbidden",
            DiagnosticKind::WrongSearchParamsType => "searchParams must be of type {expected}",
            DiagnosticKind::MissingReturnType => "The function must specify a return type",
            DiagnosticKind::WrongReturnType => "The function must specify a correct return type",
            DiagnosticKind::ParamNotOptionalAllowed => "The param {name} must not be optional",
            DiagnosticKind::MustBeWrappedInPromise => "params must be wrapped in a Promise",
            DiagnosticKind::MustNotBeWrappedInPromise => "params must not be wrapped in a Promise",
            DiagnosticKind::IsNoLiteral => "Consider using an explicit type annotation",
        }
    }

    pub fn help(&self) -> &'static str {
        match self {
            DiagnosticKind::UnknownParameter => {
                "Only dynamic segments of this file's directory path can be declared"
            }
            DiagnosticKind::WrongParameterType => {
                "Dynamic segments are strings; catch-all segments are string arrays"
            }
            DiagnosticKind::ForbiddenProperty => "Remove the property from the props type",
            DiagnosticKind::WrongSearchParamsType => {
                "Use { [key: string]: string | string[] | undefined }"
            }
            DiagnosticKind::MissingReturnType | DiagnosticKind::WrongReturnType => {
                "generateStaticParams returns one object per generated route"
            }
            DiagnosticKind::ParamNotOptionalAllowed => {
                "The segment of this file's own directory must always be generated"
            }
            DiagnosticKind::MustBeWrappedInPromise => {
                "This framework version passes params as a Promise"
            }
            DiagnosticKind::MustNotBeWrappedInPromise => {
                "This framework version passes params as a plain object"
            }
            DiagnosticKind::IsNoLiteral => "Declare the type as an object literal or a type alias",
        }
    }
}

/// Text edit attached to a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fix {
    pub range: Range,
    pub replacement: String,
}

impl Fix {
    pub fn replace(range: Range, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
        }
    }

    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self::replace(Range::empty(at), text)
    }

    pub fn remove(range: Range) -> Self {
        Self::replace(range, String::new())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub range: Range,
    pub data: BTreeMap<String, String>,
    pub fix: Option<Fix>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, range: Range) -> Self {
        Self {
            kind,
            range,
            data: BTreeMap::new(),
            fix: None,
        }
    }

    pub fn with_data(mut self, key: &str, value: impl Into<String>) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }

    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.fix = Some(fix);
        self
    }

    pub fn data(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    pub fn message(&self) -> String {
        let mut message = self.kind.template().to_string();
        for (key, value) in &self.data {
            message = message.replace(&format!("{{{key}}}"), value);
        }
        message
    }
}
