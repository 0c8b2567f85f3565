//! Clause tree builder.
//!
//! Decomposes a statement into its front clause and a two-level predicate
//! tree.
//!
//! ```text
//! SELECT * FROM t WHERE (a LIKE '%x%' AND a LIKE '%y%') OR a LIKE '%z%'
//! ───────┬─────── ──┬── ───────────────┬──────────────  ──────┬──────
//!        │          │                  │                      │
//!        │          │                  └── AndGroup [x, y]    └── AndGroup [z]
//!        │          └── split point
//!        └── front clause (kept verbatim)
//! ```

pub mod predicate;
pub mod splitter;


use crate::ast::{AndGroup, OrGroup, Statement};
use crate::error::{ConvertError, ConvertResult};

pub use predicate::extract_predicate;
pub use splitter::{split, split_top_level, strip_parens};

/// Parse one normalized statement into a clause tree.
pub fn parse(statement: &str) -> ConvertResult<Statement> {
    let statement = statement.trim();

    let parts = split(statement, "WHERE");
    let [front, back] = parts.as_slice() else {
        return Err(ConvertError::malformed_statement(statement));
    };

    let mut groups = Vec::new();
    for branch in split(back, "OR") {
        let fragment = strip_parens(branch);
        let predicates = split(&fragment, "AND")
            .into_iter()
            .map(extract_predicate)
            .collect::<ConvertResult<Vec<_>>>()?;
        groups.push(AndGroup::new(predicates, fragment));
    }

    Ok(Statement {
        front: front.to_string(),
        or_group: OrGroup::new(groups),
    })
}
