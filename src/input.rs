//! Reading statements from raw SQL text and rendering the output.

use std::fs;
use std::path::Path;

use crate::error::ConvertResult;
use crate::parser::splitter::LiteralScanner;

/// Statement terminator written after each rewritten statement.
pub const TERMINATOR: &str = "\n;\n";

/// Fold newlines and tabs to spaces and trim.
pub fn normalize(statement: &str) -> String {
    statement
        .replace(['\r', '\n', '\t'], " ")
        .trim()
        .to_string()
}

/// Split raw text on `;` outside literals into normalized statements.
///
/// Empty pieces (trailing `;`, blank lines) are dropped.
pub fn split_statements(raw: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut start = 0;

    for (i, c, in_literal) in LiteralScanner::new(raw) {
        if c == ';' && !in_literal {
            statements.push(normalize(&raw[start..i]));
            start = i + c.len_utf8();
        }
    }
    statements.push(normalize(&raw[start..]));

    statements.retain(|s| !s.is_empty());
    statements
}

/// Read and split a SQL file.
pub fn read_statements(path: &Path) -> ConvertResult<Vec<String>> {
    let raw = fs::read_to_string(path)?;
    Ok(split_statements(&raw))
}

/// Join rewritten statements, each followed by [`TERMINATOR`].
pub fn render(statements: &[String]) -> String {
    statements
        .iter()
        .map(|s| format!("{}{}", s, TERMINATOR))
        .collect()
}
