use std::fs;
use std::path::{Path, PathBuf};

use route_params::{
    DiagnosticKind, FileReport, Options, PromiseParams, fix_source, lint_file, lint_source,
};

fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn lint_fixture(relative: &str) -> FileReport {
    let path = fixtures_root().join(relative);
    lint_file(&path, relative, &Options::default()).expect("fixture lint failed")
}

fn fix_fixture(relative: &str) -> String {
    let source = load_fixture(&fixtures_root().join(relative));
    let outcome = fix_source(&source, relative, &Options::default()).expect("fixture fix failed");
    assert!(
        outcome.remaining.is_empty(),
        "unfixed diagnostics: {:?}",
        outcome.remaining
    );
    outcome.source
}

fn load_fixture(path: &Path) -> String {
    fs::read_to_string(path).expect("fixture read failed")
}

fn kinds(report: &FileReport) -> Vec<DiagnosticKind> {
    report
        .diagnostics
        .iter()
        .map(|diagnostic| diagnostic.kind)
        .collect()
}

#[test]
fn unknown_parameter_in_aliased_props() {
    let report = lint_fixture("app/movies/[id]/[reviewId]/page.tsx");
    assert_eq!(kinds(&report), vec![DiagnosticKind::UnknownParameter]);
    assert_eq!(
        report.diagnostics[0].message(),
        "The param ids does not exist in the corresponding route path of this file"
    );

    let fixed = fix_fixture("app/movies/[id]/[reviewId]/page.tsx");
    assert!(fixed.starts_with(
        "type Props = {\n  params: {\n      id: string;\n      reviewId: string;\n  };\n};\n"
    ));
}

#[test]
fn catch_all_requires_string_array() {
    let report = lint_fixture("app/shop/[id]/[...other]/page.tsx");
    assert_eq!(kinds(&report), vec![DiagnosticKind::WrongParameterType]);
    assert_eq!(report.diagnostics[0].data("name"), Some("other"));
    assert_eq!(report.diagnostics[0].data("type"), Some("string[]"));

    let fixed = fix_fixture("app/shop/[id]/[...other]/page.tsx");
    assert!(fixed.contains("params: { id: string; other: string[] };"));
}

#[test]
fn search_params_union_must_be_exact() {
    let report = lint_fixture("app/search/page.tsx");
    assert_eq!(kinds(&report), vec![DiagnosticKind::WrongSearchParamsType]);

    let fixed = fix_fixture("app/search/page.tsx");
    assert!(fixed.contains(
        "searchParams: {\n      [key: string]: string | string[] | undefined;\n  };"
    ));
}

#[test]
fn search_params_check_can_be_disabled() {
    let path = fixtures_root().join("app/search/page.tsx");
    let options = Options {
        search_params: false,
        ..Options::default()
    };
    let report = lint_file(&path, "app/search/page.tsx", &options).expect("fixture lint failed");
    assert!(report.is_clean());
}

#[test]
fn static_params_current_segment_not_optional() {
    let report = lint_fixture("app/[optionalFirst]/[optionalSecond]/[id]/page.tsx");
    assert_eq!(kinds(&report), vec![DiagnosticKind::ParamNotOptionalAllowed]);
    assert_eq!(report.diagnostics[0].data("name"), Some("id"));

    let fixed = fix_fixture("app/[optionalFirst]/[optionalSecond]/[id]/page.tsx");
    assert!(fixed.starts_with(
        "export function generateStaticParams(): {\n    optionalFirst?: string;\n    optionalSecond?: string;\n    id: string;\n}[] {"
    ));
}

#[test]
fn route_handlers_with_valid_context() {
    let report = lint_fixture("app/api/[id]/route.ts");
    assert!(report.is_clean(), "unexpected: {:?}", report.diagnostics);
}

#[test]
fn layout_forbids_search_params() {
    let report = lint_fixture("app/blog/[slug]/layout.tsx");
    assert_eq!(kinds(&report), vec![DiagnosticKind::ForbiddenProperty]);
    assert_eq!(
        report.diagnostics[0].message(),
        "The property searchParams is forbidden"
    );

    let fixed = fix_fixture("app/blog/[slug]/layout.tsx");
    assert!(fixed.starts_with(
        "interface LayoutProps {\n  children: React.ReactNode;\n  params: { slug: string };\n  \n}\n"
    ));
}

#[test]
fn optional_catch_all_route() {
    let report = lint_fixture("app/docs/[[...slug]]/page.tsx");
    assert!(report.is_clean(), "unexpected: {:?}", report.diagnostics);
}

#[test]
fn fully_typed_page_is_clean() {
    let report = lint_fixture("app/clean/[id]/page.tsx");
    assert!(report.is_clean(), "unexpected: {:?}", report.diagnostics);
}

#[test]
fn files_outside_routing_tree_are_skipped() {
    let report = lint_fixture("components/page.tsx");
    assert!(report.is_clean());
}

#[test]
fn promise_params_required_by_version() {
    let source = "export default async function Page({ params }: { params: { id: string } }) {}";
    let options = Options {
        promise_params: PromiseParams::Required,
        ..Options::default()
    };
    let diagnostics = lint_source(source, "app/[id]/page.tsx", &options).expect("lint failed");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::MustBeWrappedInPromise);

    let outcome = fix_source(source, "app/[id]/page.tsx", &options).expect("fix failed");
    assert_eq!(
        outcome.source,
        "export default async function Page({ params }: { params: Promise<{\n    id: string;\n}> }) {}"
    );
    assert!(outcome.remaining.is_empty());
}

#[test]
fn promise_wrapped_search_params() {
    let source = "export default async function Page({ searchParams }: { searchParams: Promise<{ [key: string]: string | string[] | undefined }> }) {}";
    let required = Options {
        promise_params: PromiseParams::Required,
        ..Options::default()
    };
    assert!(lint_source(source, "app/page.tsx", &required).expect("lint failed").is_empty());

    let forbidden = Options {
        promise_params: PromiseParams::Forbidden,
        ..Options::default()
    };
    let diagnostics = lint_source(source, "app/page.tsx", &forbidden).expect("lint failed");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::WrongSearchParamsType);
}

#[test]
fn fixes_are_idempotent() {
    for relative in [
        "app/movies/[id]/[reviewId]/page.tsx",
        "app/shop/[id]/[...other]/page.tsx",
        "app/search/page.tsx",
        "app/[optionalFirst]/[optionalSecond]/[id]/page.tsx",
        "app/blog/[slug]/layout.tsx",
    ] {
        let fixed = fix_fixture(relative);
        let diagnostics = lint_source(&fixed, relative, &Options::default()).expect("lint failed");
        assert!(diagnostics.is_empty(), "{relative}: {diagnostics:?}");
    }
}

#[test]
fn report_serializes_to_json() {
    let report = lint_fixture("app/shop/[id]/[...other]/page.tsx");
    let json = serde_json::to_value(&report).expect("serialize failed");
    assert_eq!(json["path"], "app/shop/[id]/[...other]/page.tsx");
    assert_eq!(json["diagnostics"][0]["kind"], "wrong-parameter-type");
    assert!(json.get("source").is_none());
}
