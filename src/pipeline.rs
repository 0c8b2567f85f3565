//! Statement pipeline.
//!
//! Runs parse → synthesize → reassemble over a batch of statements. The
//! first failure aborts the batch; no partial output is returned.

use serde::Serialize;
use tracing::{debug, info};

use crate::ast::{ConversionRequest, Statement, Strategy};
use crate::error::ConvertResult;
use crate::parser::parse;
use crate::transpiler::{BitmatchOptions, Synthesizer};

/// Keyword counts for one statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatementStats {
    /// Number of OR branches (AND groups).
    pub or_branches: usize,
    /// Branches holding a single predicate.
    pub single_predicates: usize,
    /// Predicates inside multi-predicate AND groups.
    pub and_predicates: usize,
}

impl StatementStats {
    pub fn of(stmt: &Statement) -> Self {
        let or_group = &stmt.or_group;
        Self {
            or_branches: or_group.len(),
            single_predicates: or_group.singles().count(),
            and_predicates: or_group.conjunctions().map(|g| g.len()).sum(),
        }
    }
}

/// Totals over a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub statements: usize,
    pub or_branches: usize,
    pub single_predicates: usize,
    pub and_predicates: usize,
}

impl Summary {
    fn add(&mut self, stats: &StatementStats) {
        self.statements += 1;
        self.or_branches += stats.or_branches;
        self.single_predicates += stats.single_predicates;
        self.and_predicates += stats.and_predicates;
    }
}

/// Result of converting a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Conversion {
    /// Rewritten statements, without terminators.
    pub statements: Vec<String>,
    pub stats: Vec<StatementStats>,
    pub summary: Summary,
}

/// A resolved strategy ready to run over statements.
pub struct Pipeline {
    strategy: Strategy,
    synthesizer: Box<dyn Synthesizer>,
}

impl Pipeline {
    /// Resolve `request` with default bit-match names.
    pub fn new(request: ConversionRequest) -> ConvertResult<Self> {
        Self::with_options(request, &BitmatchOptions::default())
    }

    pub fn with_options(
        request: ConversionRequest,
        options: &BitmatchOptions,
    ) -> ConvertResult<Self> {
        let strategy = request.strategy()?;
        Ok(Self {
            strategy,
            synthesizer: strategy.synthesizer(options),
        })
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Convert one statement.
    pub fn convert(&self, statement: &str) -> ConvertResult<(String, StatementStats)> {
        let stmt = parse(statement)?;
        let stats = StatementStats::of(&stmt);
        let rewrite = self.synthesizer.synthesize(&stmt)?;
        Ok((rewrite.into_sql(&stmt), stats))
    }

    /// Convert every statement, stopping at the first failure.
    pub fn convert_all<S: AsRef<str>>(&self, statements: &[S]) -> ConvertResult<Conversion> {
        let mut conversion = Conversion::default();

        for (i, statement) in statements.iter().enumerate() {
            let statement = statement.as_ref();
            let (sql, stats) = self
                .convert(statement)
                .map_err(|e| e.in_statement(i + 1, statement))?;

            debug!(
                index = i + 1,
                or_branches = stats.or_branches,
                single_predicates = stats.single_predicates,
                and_predicates = stats.and_predicates,
                "converted statement"
            );

            conversion.summary.add(&stats);
            conversion.stats.push(stats);
            conversion.statements.push(sql);
        }

        info!(
            strategy = %self.strategy,
            statements = conversion.summary.statements,
            "conversion complete"
        );
        Ok(conversion)
    }
}

/// Convert a batch of normalized statements.
pub fn convert_all<S: AsRef<str>>(
    statements: &[S],
    request: ConversionRequest,
) -> ConvertResult<Conversion> {
    Pipeline::new(request)?.convert_all(statements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Engine;
    use crate::error::ConvertError;

    #[test]
    fn test_stats() {
        let stmt = parse(
            "SELECT * FROM t WHERE (a LIKE '%x%' AND a LIKE '%y%') OR a LIKE '%z%' OR a LIKE '%w%'",
        )
        .unwrap();
        assert_eq!(
            StatementStats::of(&stmt),
            StatementStats {
                or_branches: 3,
                single_predicates: 2,
                and_predicates: 2,
            }
        );
    }

    #[test]
    fn test_unsupported_style_before_any_statement() {
        let err =
            convert_all::<&str>(&[], ConversionRequest::new(Engine::Redshift, 2)).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::UnsupportedStyle {
                engine: Engine::Redshift,
                style: 2
            }
        ));

        let err = Pipeline::new(ConversionRequest::new(Engine::Athena, 0)).err();
        assert!(matches!(err, Some(ConvertError::UnknownStyle { style: 0, .. })));
    }

    #[test]
    fn test_failure_names_statement() {
        let statements = [
            "SELECT * FROM t WHERE a LIKE '%x%'",
            "SELECT * FROM t",
        ];
        let err = convert_all(&statements, Strategy::AthenaRegexp.into()).unwrap_err();
        match &err {
            ConvertError::Statement { index, statement, .. } => {
                assert_eq!(*index, 2);
                assert_eq!(statement, "SELECT * FROM t");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(err.root(), ConvertError::MalformedStatement { .. }));
    }
}
