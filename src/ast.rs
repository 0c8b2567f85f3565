//! Clause tree types.
//!
//! A statement is kept as its untouched front clause plus a two-level
//! predicate tree: an OR of AND groups of `column LIKE '%token%'` pairs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ConvertError, ConvertResult};

/// A single `column LIKE '%token%'` comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Predicate {
    pub column: String,
    /// Token with quotes and `%` markers stripped. Never empty.
    pub token: String,
}

impl Predicate {
    pub fn new(column: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            token: token.into(),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} LIKE '%{}%'", self.column, self.token)
    }
}

/// Predicates that must all hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AndGroup {
    pub predicates: Vec<Predicate>,
    /// The OR fragment this group was built from, parentheses removed.
    pub fragment: String,
}

impl AndGroup {
    pub fn new(predicates: Vec<Predicate>, fragment: impl Into<String>) -> Self {
        Self {
            predicates,
            fragment: fragment.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// True when the group came from a fragment without `AND`.
    pub fn is_single(&self) -> bool {
        self.predicates.len() == 1
    }

    /// The one column shared by every predicate of the group.
    pub fn shared_column(&self) -> ConvertResult<&str> {
        shared_column(self.predicates.iter())
    }

    pub fn tokens(&self) -> Vec<&str> {
        self.predicates.iter().map(|p| p.token.as_str()).collect()
    }
}

impl fmt::Display for AndGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.predicates.iter().enumerate() {
            if i > 0 {
                f.write_str(" AND ")?;
            }
            write!(f, "{}", p)?;
        }
        Ok(())
    }
}

/// AND groups of which any one must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrGroup {
    pub groups: Vec<AndGroup>,
}

impl OrGroup {
    pub fn new(groups: Vec<AndGroup>) -> Self {
        Self { groups }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AndGroup> {
        self.groups.iter()
    }

    /// All predicates, in statement order.
    pub fn predicates(&self) -> impl Iterator<Item = &Predicate> {
        self.groups.iter().flat_map(|g| g.predicates.iter())
    }

    /// Groups built from a fragment without `AND`.
    pub fn singles(&self) -> impl Iterator<Item = &AndGroup> {
        self.groups.iter().filter(|g| g.is_single())
    }

    /// Groups with more than one predicate.
    pub fn conjunctions(&self) -> impl Iterator<Item = &AndGroup> {
        self.groups.iter().filter(|g| !g.is_single())
    }
}

impl<'a> IntoIterator for &'a OrGroup {
    type Item = &'a AndGroup;
    type IntoIter = std::slice::Iter<'a, AndGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// One parsed statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statement {
    /// Everything before `WHERE`, verbatim.
    pub front: String,
    pub or_group: OrGroup,
}

impl Statement {
    /// Reassemble with a rewritten predicate expression.
    pub fn with_where(&self, expression: &str) -> String {
        format!("{} WHERE {}", self.front, expression)
    }
}

/// Target query engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// Function-style `regexp_like(col, 're')`.
    Athena,
    /// Operator-style `col ~ 're'`.
    Redshift,
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Engine::Athena => write!(f, "athena"),
            Engine::Redshift => write!(f, "redshift"),
        }
    }
}

impl FromStr for Engine {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "athena" => Ok(Engine::Athena),
            "redshift" => Ok(Engine::Redshift),
            other => Err(ConvertError::Config(format!(
                "Unknown service '{}'. Expected: athena or redshift",
                other
            ))),
        }
    }
}

/// Which synthesizer to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub engine: Engine,
    pub style: u8,
}

impl ConversionRequest {
    pub fn new(engine: Engine, style: u8) -> Self {
        Self { engine, style }
    }

    /// Resolve the (engine, style) pair to an implemented strategy.
    pub fn strategy(&self) -> ConvertResult<Strategy> {
        match (self.engine, self.style) {
            (Engine::Athena, 1) => Ok(Strategy::AthenaRegexp),
            (Engine::Athena, 2) => Ok(Strategy::AthenaPermuted),
            (Engine::Redshift, 3) => Ok(Strategy::RedshiftAlternation),
            (Engine::Redshift, 4) => Ok(Strategy::RedshiftPermuted),
            (Engine::Redshift, 5) => Ok(Strategy::RedshiftBitmatch),
            (engine, style @ 1..=5) => Err(ConvertError::UnsupportedStyle { engine, style }),
            (engine, style) => Err(ConvertError::UnknownStyle { engine, style }),
        }
    }
}

/// The five implemented rewrite strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Strategy {
    /// A1: one `regexp_like` per predicate, structure preserved.
    AthenaRegexp,
    /// A2: AND groups expanded into permuted `regexp_like` alternatives.
    AthenaPermuted,
    /// B3: singles folded into one `~` alternation, AND groups kept.
    RedshiftAlternation,
    /// B4: everything folded into one `~` alternation with permuted AND groups.
    RedshiftPermuted,
    /// B5: temp table over a multi-pattern bit match.
    RedshiftBitmatch,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::AthenaRegexp,
        Strategy::AthenaPermuted,
        Strategy::RedshiftAlternation,
        Strategy::RedshiftPermuted,
        Strategy::RedshiftBitmatch,
    ];

    pub fn engine(&self) -> Engine {
        match self {
            Strategy::AthenaRegexp | Strategy::AthenaPermuted => Engine::Athena,
            _ => Engine::Redshift,
        }
    }

    pub fn style(&self) -> u8 {
        match self {
            Strategy::AthenaRegexp => 1,
            Strategy::AthenaPermuted => 2,
            Strategy::RedshiftAlternation => 3,
            Strategy::RedshiftPermuted => 4,
            Strategy::RedshiftBitmatch => 5,
        }
    }

    pub fn request(&self) -> ConversionRequest {
        ConversionRequest::new(self.engine(), self.style())
    }

    pub fn description(&self) -> &'static str {
        match self {
            Strategy::AthenaRegexp => "LIKE to regexp_like, AND/OR kept",
            Strategy::AthenaPermuted => "LIKE to regexp_like, AND combined with permutations",
            Strategy::RedshiftAlternation => "OR to col ~ 'a|b', AND left as-is",
            Strategy::RedshiftPermuted => "OR to col ~ 'a|b', AND combined with permutations",
            Strategy::RedshiftBitmatch => "temp table over a bit-match of all tokens",
        }
    }
}

impl From<Strategy> for ConversionRequest {
    fn from(strategy: Strategy) -> Self {
        strategy.request()
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} style {}", self.engine(), self.style())
    }
}

/// Distinct columns in first-seen order.
pub fn distinct_columns<'a>(predicates: impl Iterator<Item = &'a Predicate>) -> Vec<&'a str> {
    let mut columns: Vec<&str> = Vec::new();
    for p in predicates {
        if !columns.contains(&p.column.as_str()) {
            columns.push(&p.column);
        }
    }
    columns
}

/// The single column referenced by all `predicates`.
pub fn shared_column<'a>(
    predicates: impl Iterator<Item = &'a Predicate>,
) -> ConvertResult<&'a str> {
    let columns = distinct_columns(predicates);
    match columns.as_slice() {
        [column] => Ok(*column),
        [] => Err(ConvertError::InconsistentColumn { columns: vec![] }),
        _ => Err(ConvertError::InconsistentColumn {
            columns: columns.iter().map(|c| c.to_string()).collect(),
        }),
    }
}
