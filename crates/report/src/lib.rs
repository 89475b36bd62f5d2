//! Code-frame rendering for route parameter diagnostics.
//!
//! Turns a diagnostic (kind, location, message) into a framed excerpt of the
//! offending source line with a caret underline, help text and, when a fix
//! exists, the replacement that `--fix` would write.

use std::io::IsTerminal;

/// Format a diagnostic as a code frame.
///
/// # Arguments
///
/// * `code` - The source code containing the problem
/// * `file_path` - Path shown in the frame header (e.g., "app/[id]/page.tsx")
/// * `kind` - Heading for the problem (e.g., "Unknown Parameter")
/// * `line_num` - Line number (1-indexed)
/// * `col_num` - Column number (1-indexed)
/// * `message` - Problem message
/// * `help` - Help text explaining how to fix
/// * `underline_length` - Number of characters to underline (for ^^^)
///
/// # Example
///
/// ```rust
/// use report::format_diagnostic;
///
/// let frame = format_diagnostic(
///     "export default function Page({ params }: { params: { ids: string } }) {}",
///     "app/[id]/page.tsx",
///     "Unknown Parameter",
///     1,
///     52,
///     "The param ids does not exist in the corresponding route path of this file",
///     "Only dynamic segments of this file's directory path can be declared",
///     15,
/// );
///
/// assert!(frame.contains("app/[id]/page.tsx:1:52"));
///
/// // Produces:
/// // Route Params Error
/// // ❌ Unknown Parameter
/// //
/// // ┌─ app/[id]/page.tsx:1:52
/// // │
/// //   1 │ export default function Page({ params }: { params: { ids: string } }) {}
/// //     │                                                    ^^^^^^^^^^^^^^^ The param ids does not exist ...
/// // │
/// // = help: Only dynamic segments of this file's directory path can be declared
/// // │
/// // └─
/// ```
pub fn format_diagnostic(
    code: &str,
    file_path: &str,
    kind: &str,
    line_num: usize,
    col_num: usize,
    message: &str,
    help: &str,
    underline_length: usize,
) -> String {
    format_frame(
        code,
        file_path,
        kind,
        line_num,
        col_num,
        message,
        help,
        underline_length,
        None,
    )
}

/// Like [`format_diagnostic`], with a severity and the text a fix would
/// write.
pub fn format_diagnostic_with_fix(
    code: &str,
    file_path: &str,
    kind: &str,
    line_num: usize,
    col_num: usize,
    message: &str,
    help: &str,
    underline_length: usize,
    severity: &str,
    fix: Option<String>,
) -> String {
    format_frame(
        code,
        file_path,
        kind,
        line_num,
        col_num,
        message,
        help,
        underline_length,
        Some(ExtraFormatInfo {
            severity: severity.to_string(),
            fix,
        }),
    )
}

#[derive(Debug, Clone)]
struct ExtraFormatInfo {
    severity: String,
    fix: Option<String>,
}

fn format_frame(
    code: &str,
    file_path: &str,
    kind: &str,
    line_num: usize,
    col_num: usize,
    message: &str,
    help: &str,
    underline_length: usize,
    extra: Option<ExtraFormatInfo>,
) -> String {
    let lines: Vec<&str> = code.lines().collect();
    let error_line = if line_num > 0 && line_num <= lines.len() {
        lines[line_num - 1]
    } else {
        ""
    };

    let underline_length = underline_length.max(1);

    let severity = extra
        .as_ref()
        .map(|extra| extra.severity.as_str())
        .unwrap_or("error");
    let (icon, label) = match severity {
        "warning" | "warn" => ("⚠️", "Route Params Warning"),
        _ => ("❌", "Route Params Error"),
    };

    let use_color = use_color_output();
    let severity_color = match severity {
        "warning" | "warn" => "\x1b[33m",
        _ => "\x1b[31m",
    };
    let kind_color = color_for_kind(kind).unwrap_or(severity_color);
    let icon = colorize(icon, severity_color, use_color);
    let label = colorize(label, severity_color, use_color);
    let kind_label = colorize(kind, kind_color, use_color);

    let mut out = format!(
        "\n{}\n\
        {} {}\n\
        \n\
        ┌─ {}:{}:{}\n\
        │\n\
        {:>3} │ {}\n\
            │ {}{} {}\n\
        │\n",
        label,
        icon,
        kind_label,
        file_path,
        line_num,
        col_num,
        line_num,
        error_line,
        " ".repeat(col_num.saturating_sub(1)),
        "^".repeat(underline_length),
        message,
    );

    if !help.trim().is_empty() {
        out.push_str(&format!("= help: {}\n", help));
    }
    if let Some(fix) = extra.and_then(|extra| extra.fix) {
        let fix_label = colorize("fix", "\x1b[36m", use_color);
        let fix_text = if fix.is_empty() {
            "remove".to_string()
        } else {
            format!("`{}`", fix.replace('\n', "\n│   "))
        };
        out.push_str(&format!("= {}: {}\n", fix_label, fix_text));
    }
    out.push_str("│\n└─\n");
    out
}

/// 1-indexed line and column of a byte offset. Columns count characters.
pub fn line_col(code: &str, offset: usize) -> (usize, usize) {
    let mut offset = offset.min(code.len());
    while !code.is_char_boundary(offset) {
        offset -= 1;
    }
    let before = &code[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |index| index + 1);
    let col = before[line_start..].chars().count() + 1;
    (line, col)
}

/// Characters to underline for a byte range, clipped to the first line.
pub fn underline_length(code: &str, start: usize, end: usize) -> usize {
    let start = start.min(code.len());
    let end = end.clamp(start, code.len());
    code.get(start..end)
        .map(|text| text.split('\n').next().unwrap_or("").chars().count())
        .unwrap_or(0)
        .max(1)
}

/// Closing line of a run, e.g. `✖ 3 problems (2 fixable) in 2 files`.
pub fn format_summary(problems: usize, fixable: usize, files: usize) -> String {
    if problems == 0 {
        let check = colorize("✔", "\x1b[32m", use_color_output());
        return format!("{} no problems in {} {}", check, files, plural(files, "file"));
    }
    let cross = colorize("✖", "\x1b[31m", use_color_output());
    format!(
        "{} {} {} ({} fixable) in {} {}",
        cross,
        problems,
        plural(problems, "problem"),
        fixable,
        files,
        plural(files, "file")
    )
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

fn use_color_output() -> bool {
    if cfg!(test) || !std::io::stdout().is_terminal() {
        return false;
    }
    if std::env::var("NO_COLOR").is_ok() || std::env::var("ROUTE_PARAMS_NO_COLOR").is_ok() {
        return false;
    }
    if let Ok(term) = std::env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }
    true
}

fn colorize(text: &str, color: &str, enabled: bool) -> String {
    if !enabled {
        return text.to_string();
    }
    format!("{color}{text}\x1b[0m")
}

fn color_for_kind(kind: &str) -> Option<&'static str> {
    let lower = kind.to_ascii_lowercase();
    if lower.contains("promise") {
        return Some("\x1b[36m");
    }
    if lower.contains("type") || lower.contains("literal") {
        return Some("\x1b[35m");
    }
    if lower.contains("parameter") || lower.contains("param") {
        return Some("\x1b[33m");
    }
    if lower.contains("property") {
        return Some("\x1b[34m");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_formatting() {
        let code = "export default function Page({ params }: { params: { ids: string } }) {}";
        let frame = format_diagnostic(
            code,
            "app/[id]/page.tsx",
            "Unknown Parameter",
            1,
            52,
            "The param ids does not exist",
            "Only dynamic segments can be declared",
            15,
        );

        assert!(frame.contains("❌ Unknown Parameter"));
        assert!(frame.contains("app/[id]/page.tsx:1:52"));
        assert!(frame.contains("^^^^^^^^^^^^^^^ The param ids"));
        assert!(frame.contains("= help: Only dynamic segments"));
    }

    #[test]
    fn test_multiline_code() {
        let code = "type Props = {\n  params: { id: number };\n};";
        let frame = format_diagnostic(
            code,
            "page.tsx",
            "Wrong Parameter Type",
            2,
            13,
            "id must be of type string",
            "",
            10,
        );

        assert!(frame.contains("page.tsx:2:13"));
        assert!(frame.contains("  params: { id: number };"));
        assert!(!frame.contains("= help"));
    }

    #[test]
    fn test_fix_is_shown() {
        let frame = format_diagnostic_with_fix(
            "{ id: number }",
            "page.tsx",
            "Wrong Parameter Type",
            1,
            7,
            "id must be of type string",
            "",
            6,
            "error",
            Some("string".to_string()),
        );
        assert!(frame.contains("= fix: `string`"));

        let frame = format_diagnostic_with_fix(
            "{ children: string }",
            "layout.tsx",
            "Forbidden Property",
            1,
            3,
            "The property children is forbidden",
            "",
            17,
            "warning",
            Some(String::new()),
        );
        assert!(frame.contains("⚠️ Forbidden Property"));
        assert!(frame.contains("= fix: remove"));
    }

    #[test]
    fn test_underline_length_minimum() {
        let frame = format_diagnostic("test", "page.tsx", "Error", 1, 1, "msg", "help", 0);

        assert!(frame.contains("^"));
    }

    #[test]
    fn test_out_of_bounds_line() {
        let frame = format_diagnostic("only one line", "page.tsx", "Error", 999, 1, "msg", "help", 5);

        assert!(frame.contains("❌ Error"));
        assert!(frame.contains("999 │"));
    }

    #[test]
    fn test_line_col() {
        let code = "ab\ncdé\nf";
        assert_eq!(line_col(code, 0), (1, 1));
        assert_eq!(line_col(code, 3), (2, 1));
        assert_eq!(line_col(code, 7), (2, 4));
        assert_eq!(line_col(code, 8), (3, 1));
        assert_eq!(line_col(code, 100), (3, 2));
    }

    #[test]
    fn test_underline_length_clips_to_line() {
        let code = "{\n  id: string;\n}";
        assert_eq!(underline_length(code, 0, code.len()), 1);
        assert_eq!(underline_length(code, 4, 14), 10);
        assert_eq!(underline_length(code, 5, 5), 1);
    }

    #[test]
    fn test_summary() {
        assert_eq!(format_summary(0, 0, 3), "✔ no problems in 3 files");
        assert_eq!(format_summary(1, 1, 1), "✖ 1 problem (1 fixable) in 1 file");
        assert_eq!(format_summary(4, 2, 2), "✖ 4 problems (2 fixable) in 2 files");
    }
}
