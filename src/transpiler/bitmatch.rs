//! Redshift bit-match rewrite.
//!
//! All tokens are matched at once by a multi-pattern function that yields
//! one bit per token; the input AND/OR structure is then rebuilt over
//! those bits inside a temp-table query:
//!
//! ```text
//! WITH t AS (SELECT id, multi_match(text, ARRAY['x', 'y', 'z']) AS bits FROM docs)
//! SELECT COUNT(DISTINCT id) FROM t
//! WHERE (SUBSTRING(bits, 1, 1) = '1' AND SUBSTRING(bits, 2, 1) = '1')
//!    OR (SUBSTRING(bits, 3, 1) = '1')
//! ```

use serde::{Deserialize, Serialize};

use super::{Rewrite, Synthesizer};
use crate::ast::{shared_column, Statement};
use crate::error::{ConvertError, ConvertResult};
use crate::parser::split_top_level;

/// Names used by the bit-match query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BitmatchOptions {
    /// Row key counted with `COUNT(DISTINCT ..)`.
    pub id_column: String,
    pub temp_table: String,
    /// Multi-pattern function returning one bit per pattern.
    pub function: String,
    pub bits_alias: String,
}

impl Default for BitmatchOptions {
    fn default() -> Self {
        Self {
            id_column: "id".to_string(),
            temp_table: "t".to_string(),
            function: "multi_match".to_string(),
            bits_alias: "bits".to_string(),
        }
    }
}

/// Style 5.
pub struct RedshiftBitmatch {
    options: BitmatchOptions,
}

impl RedshiftBitmatch {
    pub fn new(options: BitmatchOptions) -> Self {
        Self { options }
    }

    fn bit(&self, index: usize) -> String {
        format!("SUBSTRING({}, {}, 1) = '1'", self.options.bits_alias, index)
    }
}

/// The source table: first word after the top-level `FROM` of the front
/// clause.
fn source_table(front: &str) -> ConvertResult<&str> {
    let parts = split_top_level(front, "FROM");
    match parts[..] {
        [_, rest] => rest
            .split_whitespace()
            .next()
            .ok_or_else(|| ConvertError::malformed_statement(front)),
        _ => Err(ConvertError::malformed_statement(front)),
    }
}

/// 1-based position of `token`; a repeated token reuses its first slot.
fn slot<'a>(tokens: &mut Vec<&'a str>, token: &'a str) -> usize {
    match tokens.iter().position(|t| *t == token) {
        Some(i) => i + 1,
        None => {
            tokens.push(token);
            tokens.len()
        }
    }
}

impl Synthesizer for RedshiftBitmatch {
    fn synthesize(&self, stmt: &Statement) -> ConvertResult<Rewrite> {
        let column = shared_column(stmt.or_group.predicates())?;
        let table = source_table(&stmt.front)?;

        let mut tokens: Vec<&str> = Vec::new();
        let mut branches = Vec::new();
        for group in &stmt.or_group {
            let mut bits = Vec::with_capacity(group.len());
            for p in &group.predicates {
                bits.push(self.bit(slot(&mut tokens, &p.token)));
            }
            branches.push(format!("({})", bits.join(" AND ")));
        }

        let patterns: Vec<String> = tokens.iter().map(|t| format!("'{}'", t)).collect();
        let BitmatchOptions {
            id_column,
            temp_table,
            function,
            bits_alias,
        } = &self.options;

        Ok(Rewrite::Statement(format!(
            "WITH {temp_table} AS \
             (SELECT {id_column}, {function}({column}, ARRAY[{patterns}]) AS {bits_alias} \
             FROM {table}) \
             SELECT COUNT(DISTINCT {id_column}) FROM {temp_table} WHERE {where_clause}",
            patterns = patterns.join(", "),
            where_clause = branches.join(" OR "),
        )))
    }
}
