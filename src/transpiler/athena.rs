//! Athena rewrites using `regexp_like`.

use super::permute::ordered_patterns;
use super::{Rewrite, Synthesizer};
use crate::ast::Statement;
use crate::error::ConvertResult;

fn regexp_like(column: &str, pattern: &str) -> String {
    format!("(regexp_like({},'{}'))", column, pattern)
}

/// Style 1: every LIKE becomes a `regexp_like`, AND/OR structure unchanged.
pub struct AthenaRegexp;

impl Synthesizer for AthenaRegexp {
    fn synthesize(&self, stmt: &Statement) -> ConvertResult<Rewrite> {
        let branches: Vec<String> = stmt
            .or_group
            .iter()
            .map(|group| {
                let terms: Vec<String> = group
                    .predicates
                    .iter()
                    .map(|p| regexp_like(&p.column, &p.token))
                    .collect();
                match terms.as_slice() {
                    [term] => term.clone(),
                    _ => format!("({})", terms.join(" AND ")),
                }
            })
            .collect();

        Ok(Rewrite::Predicate(branches.join(" OR ")))
    }
}

/// Style 2: AND groups on one column become the OR of all token orderings.
pub struct AthenaPermuted;

impl Synthesizer for AthenaPermuted {
    fn synthesize(&self, stmt: &Statement) -> ConvertResult<Rewrite> {
        let mut terms = Vec::new();

        for group in &stmt.or_group {
            if group.is_single() {
                let p = &group.predicates[0];
                terms.push(regexp_like(&p.column, &p.token));
                continue;
            }

            let column = group.shared_column()?;
            for pattern in ordered_patterns(&group.tokens()) {
                terms.push(regexp_like(column, &pattern));
            }
        }

        Ok(Rewrite::Predicate(terms.join(" OR ")))
    }
}
