//! # query-converter
//!
//! Rewrites `LIKE '%word%'` / `AND` / `OR` `WHERE` clauses into Athena and
//! Redshift regex or bit-match predicates.
//!
//! ## Quick Example
//!
//! ```
//! use query_converter::prelude::*;
//!
//! let stmt = query_converter::parse(
//!     "SELECT * FROM t WHERE a LIKE '%x%' OR a LIKE '%y%'",
//! ).unwrap();
//! let sql = stmt.to_sql(Strategy::RedshiftPermuted).unwrap();
//! assert_eq!(sql, "SELECT * FROM t WHERE a ~ 'x|y'");
//! ```
//!
//! ## Styles
//!
//! | Service  | Style | AND                         | OR                        |
//! |----------|-------|-----------------------------|---------------------------|
//! | athena   | 1     | `regexp_like` per predicate | kept                      |
//! | athena   | 2     | permuted `x.*y` alternatives| kept                      |
//! | redshift | 3     | left as written             | `col ~ 'a\|b'`            |
//! | redshift | 4     | permuted `x.*y` alternatives| `col ~ 'a\|b'`            |
//! | redshift | 5     | bit references              | temp table + bit match    |

pub mod ast;
pub mod config;
pub mod error;
pub mod input;
pub mod parser;
pub mod pipeline;
pub mod transpiler;

pub mod prelude {
    pub use crate::ast::*;
    pub use crate::config::Config;
    pub use crate::error::*;
    pub use crate::pipeline::{Conversion, Pipeline, StatementStats, Summary, convert_all};
    pub use crate::transpiler::{BitmatchOptions, Rewrite, Synthesizer, ToSql};
}

/// Parse one statement into its clause tree.
///
/// # Example
///
/// ```
/// use query_converter::parse;
///
/// let stmt = parse("SELECT * FROM t WHERE a LIKE '%x%' AND a LIKE '%y%'").unwrap();
/// assert_eq!(stmt.front, "SELECT * FROM t");
/// assert_eq!(stmt.or_group.groups[0].len(), 2);
/// ```
pub fn parse(statement: &str) -> Result<ast::Statement, error::ConvertError> {
    parser::parse(statement)
}

/// Convert raw SQL text (`;`-separated) and render it with terminators.
pub fn convert_text(raw: &str, request: ast::ConversionRequest) -> error::ConvertResult<String> {
    let statements = input::split_statements(raw);
    let conversion = pipeline::convert_all(&statements, request)?;
    Ok(input::render(&conversion.statements))
}
