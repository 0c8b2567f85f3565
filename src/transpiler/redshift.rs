//! Redshift rewrites using the `~` pattern operator.

use super::permute::ordered_patterns;
use super::{Rewrite, Synthesizer};
use crate::ast::{shared_column, Predicate, Statement};
use crate::error::ConvertResult;

fn pattern_match(column: &str, alternatives: &[String]) -> String {
    format!("{} ~ '{}'", column, alternatives.join("|"))
}

/// Style 3: single predicates fold into one alternation, AND groups are kept
/// as written.
pub struct RedshiftAlternation;

impl Synthesizer for RedshiftAlternation {
    fn synthesize(&self, stmt: &Statement) -> ConvertResult<Rewrite> {
        let mut parts = Vec::new();

        for group in stmt.or_group.conjunctions() {
            group.shared_column()?;
        }

        let singles: Vec<&Predicate> = stmt
            .or_group
            .singles()
            .flat_map(|g| g.predicates.iter())
            .collect();
        if !singles.is_empty() {
            let column = shared_column(singles.iter().copied())?;
            let tokens: Vec<String> = singles.iter().map(|p| p.token.clone()).collect();
            parts.push(pattern_match(column, &tokens));
        }

        parts.extend(
            stmt.or_group
                .conjunctions()
                .map(|g| format!("({})", g.fragment)),
        );

        Ok(Rewrite::Predicate(parts.join(" OR ")))
    }
}

/// Style 4: one alternation over single tokens and every ordering of each
/// AND group.
pub struct RedshiftPermuted;

impl Synthesizer for RedshiftPermuted {
    fn synthesize(&self, stmt: &Statement) -> ConvertResult<Rewrite> {
        let mut alternatives = Vec::new();

        for group in &stmt.or_group {
            if group.is_single() {
                alternatives.push(group.predicates[0].token.clone());
            } else {
                group.shared_column()?;
                alternatives.extend(ordered_patterns(&group.tokens()));
            }
        }

        let column = shared_column(stmt.or_group.predicates())?;
        Ok(Rewrite::Predicate(pattern_match(column, &alternatives)))
    }
}
