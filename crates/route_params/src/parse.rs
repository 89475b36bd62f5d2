//! swc parsing for route files.

use swc_common::{BytePos, FileName, SourceMap, Spanned, sync::Lrc};
use swc_ecma_ast::{EsVersion, Module};
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax, error::SyntaxError, lexer::Lexer};

use crate::error::LintError;

pub(crate) struct ParsedModule {
    pub module: Module,
    /// Position of the first byte of the file in the source map.
    pub start: BytePos,
}

pub(crate) fn parse_module(source_code: &str, file_path: &str) -> Result<ParsedModule, LintError> {
    let cm: Lrc<SourceMap> = Default::default();

    // JSX only for .tsx/.jsx, otherwise `<T>(x)` casts are ambiguous
    let lower = file_path.to_ascii_lowercase();
    let is_jsx = lower.ends_with(".tsx") || lower.ends_with(".jsx");
    let syntax = Syntax::Typescript(TsSyntax {
        tsx: is_jsx,
        decorators: false,
        dts: false,
        no_early_errors: true,
        disallow_ambiguous_jsx_like: true,
    });

    let fm = cm.new_source_file(
        FileName::Custom(file_path.to_string()).into(),
        source_code.to_string(),
    );

    let lexer = Lexer::new(syntax, EsVersion::Es2022, StringInput::from(&*fm), None);
    let mut parser = Parser::new_from(lexer);

    match parser.parse_module() {
        Ok(module) => Ok(ParsedModule {
            module,
            start: fm.start_pos,
        }),
        Err(err) => {
            let loc = cm.lookup_char_pos(err.span().lo);
            Err(LintError::Parse {
                path: file_path.to_string(),
                line: loc.line,
                column: loc.col.0 + 1,
                message: parse_error_message(err.kind()),
            })
        }
    }
}

fn parse_error_message(kind: &SyntaxError) -> String {
    match kind {
        SyntaxError::Eof => "Unexpected end of file".to_string(),
        SyntaxError::UnterminatedStrLit => "Unterminated string literal".to_string(),
        SyntaxError::UnterminatedTpl => "Unterminated template literal".to_string(),
        SyntaxError::UnterminatedRegExp => "Unterminated regular expression".to_string(),
        other => format!("{:?}", other),
    }
}
