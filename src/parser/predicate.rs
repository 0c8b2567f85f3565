//! `column LIKE '%token%'` extraction.

use nom::{
    branch::alt,
    bytes::complete::{is_not, tag},
    character::complete::char,
    combinator::{all_consuming, recognize},
    multi::many0,
    sequence::delimited,
    IResult,
};

use super::splitter::split;
use crate::ast::Predicate;
use crate::error::{ConvertError, ConvertResult};

/// Parse a single-quoted literal, returning its body with `''` escapes kept.
fn quoted_literal(input: &str) -> IResult<&str, &str> {
    delimited(
        char('\''),
        recognize(many0(alt((tag("''"), is_not("'"))))),
        char('\''),
    )(input)
}

/// Pull the `(column, token)` pair out of a `column LIKE '%token%'` fragment.
pub fn extract_predicate(fragment: &str) -> ConvertResult<Predicate> {
    let parts = split(fragment, "LIKE");
    let [column, value] = parts.as_slice() else {
        return Err(ConvertError::malformed_predicate(fragment));
    };

    if column.is_empty() {
        return Err(ConvertError::malformed_predicate(fragment));
    }

    let (_, body) = all_consuming(quoted_literal)(*value)
        .map_err(|_| ConvertError::malformed_predicate(fragment))?;

    let token = body.replace('%', "");
    if token.is_empty() {
        return Err(ConvertError::malformed_predicate(fragment));
    }

    Ok(Predicate::new(*column, token))
}
