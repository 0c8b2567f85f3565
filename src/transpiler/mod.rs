//! Dialect synthesizers.
//!
//! Each strategy consumes a parsed [`Statement`] and produces either a new
//! `WHERE` expression (reattached to the front clause) or a complete
//! replacement statement.

pub mod athena;
pub mod bitmatch;
pub mod permute;
pub mod redshift;

#[cfg(test)]
mod tests;

use crate::ast::{Statement, Strategy};
use crate::error::ConvertResult;

pub use athena::{AthenaPermuted, AthenaRegexp};
pub use bitmatch::{BitmatchOptions, RedshiftBitmatch};
pub use redshift::{RedshiftAlternation, RedshiftPermuted};

/// Output of a synthesizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rewrite {
    /// A boolean expression to place after `WHERE`.
    Predicate(String),
    /// A full statement that replaces the input.
    Statement(String),
}

impl Rewrite {
    /// Reassemble against the statement it was built from.
    pub fn into_sql(self, stmt: &Statement) -> String {
        match self {
            Rewrite::Predicate(expr) => stmt.with_where(&expr),
            Rewrite::Statement(sql) => sql,
        }
    }
}

/// A rewrite strategy for one engine.
pub trait Synthesizer {
    fn synthesize(&self, stmt: &Statement) -> ConvertResult<Rewrite>;
}

impl Strategy {
    pub fn synthesizer(&self, options: &BitmatchOptions) -> Box<dyn Synthesizer> {
        match self {
            Strategy::AthenaRegexp => Box::new(AthenaRegexp),
            Strategy::AthenaPermuted => Box::new(AthenaPermuted),
            Strategy::RedshiftAlternation => Box::new(RedshiftAlternation),
            Strategy::RedshiftPermuted => Box::new(RedshiftPermuted),
            Strategy::RedshiftBitmatch => Box::new(RedshiftBitmatch::new(options.clone())),
        }
    }
}

/// Trait for converting parsed statements to target SQL.
pub trait ToSql {
    /// Rewrite with the given strategy and default options.
    fn to_sql(&self, strategy: Strategy) -> ConvertResult<String> {
        self.to_sql_with_options(strategy, &BitmatchOptions::default())
    }

    fn to_sql_with_options(
        &self,
        strategy: Strategy,
        options: &BitmatchOptions,
    ) -> ConvertResult<String>;
}

impl ToSql for Statement {
    fn to_sql_with_options(
        &self,
        strategy: Strategy,
        options: &BitmatchOptions,
    ) -> ConvertResult<String> {
        let rewrite = strategy.synthesizer(options).synthesize(self)?;
        Ok(rewrite.into_sql(self))
    }
}
