use route_params::{Diagnostic, FileReport};

/// Code frames for every diagnostic followed by a summary line.
pub fn render_pretty(reports: &[FileReport]) -> String {
    let mut out = String::new();
    for report in reports {
        for diagnostic in &report.diagnostics {
            out.push_str(&render_diagnostic(report, diagnostic));
        }
    }

    let problems = reports.iter().map(|report| report.diagnostics.len()).sum();
    let fixable = reports.iter().map(FileReport::fixable).sum();
    if problems > 0 {
        out.push('\n');
    }
    out.push_str(&report::format_summary(problems, fixable, reports.len()));
    out
}

fn render_diagnostic(file: &FileReport, diagnostic: &Diagnostic) -> String {
    let (line, col) = report::line_col(&file.source, diagnostic.range.start);
    let underline = report::underline_length(&file.source, diagnostic.range.start, diagnostic.range.end);
    report::format_diagnostic_with_fix(
        &file.source,
        &file.path,
        diagnostic.kind.title(),
        line,
        col,
        &diagnostic.message(),
        diagnostic.kind.help(),
        underline,
        "error",
        diagnostic.fix.as_ref().map(|fix| fix.replacement.clone()),
    )
}

pub fn render_json(reports: &[FileReport]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use route_params::{Options, lint_source};

    fn report_for(source: &str, path: &str) -> FileReport {
        let diagnostics = lint_source(source, path, &Options::default()).unwrap();
        FileReport {
            path: path.to_string(),
            source: source.to_string(),
            diagnostics,
        }
    }

    #[test]
    fn test_pretty_output() {
        let report = report_for(
            "export default function Page({ params }: { params: { ids: string } }) {}",
            "app/[id]/page.tsx",
        );
        let out = render_pretty(&[report]);
        assert!(out.contains("Unknown Parameter"));
        assert!(out.contains("┌─ app/[id]/page.tsx:1:"));
        assert!(out.contains("The param ids does not exist"));
        assert!(out.contains("id: string;"));
        assert!(out.ends_with("1 problem (1 fixable) in 1 file"));
    }

    #[test]
    fn test_clean_output() {
        let report = report_for(
            "export default function Page({ params }: { params: { id: string } }) {}",
            "app/[id]/page.tsx",
        );
        assert!(render_pretty(&[report]).ends_with("no problems in 1 file"));
    }

    #[test]
    fn test_json_output() {
        let report = report_for(
            "export default function Page({ params }: { params: { id: number } }) {}",
            "app/[id]/page.tsx",
        );
        let json: serde_json::Value = serde_json::from_str(&render_json(&[report]).unwrap()).unwrap();
        assert_eq!(json[0]["path"], "app/[id]/page.tsx");
        assert_eq!(json[0]["diagnostics"][0]["kind"], "wrong-parameter-type");
        assert_eq!(json[0]["diagnostics"][0]["data"]["name"], "id");
    }
}
