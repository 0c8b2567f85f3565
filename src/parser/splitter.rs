//! Literal-aware keyword splitting.
//!
//! SQL keywords are matched case-insensitively as whole words and never
//! inside a single-quoted literal, so a `LIKE '%black and white%'` value
//! survives a split on `AND`.

use nom::{
    bytes::complete::tag_no_case,
    character::complete::satisfy,
    combinator::{not, peek},
    sequence::terminated,
    IResult,
};

/// Walks a string yielding `(byte offset, char, inside literal)`.
///
/// Quote characters themselves are reported as part of the literal, and a
/// doubled `''` inside a literal does not close it.
pub(crate) struct LiteralScanner<'a> {
    text: &'a str,
    pos: usize,
    in_literal: bool,
    escaped: bool,
}

impl<'a> LiteralScanner<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            in_literal: false,
            escaped: false,
        }
    }

    /// Jump forward to byte offset `to`. Only valid over non-quote text.
    fn advance(&mut self, to: usize) {
        if to > self.pos {
            self.pos = to;
        }
    }
}

impl Iterator for LiteralScanner<'_> {
    type Item = (usize, char, bool);

    fn next(&mut self) -> Option<Self::Item> {
        let c = self.text[self.pos..].chars().next()?;
        let idx = self.pos;
        self.pos += c.len_utf8();

        if c != '\'' {
            return Some((idx, c, self.in_literal));
        }
        if self.escaped {
            self.escaped = false;
        } else if !self.in_literal {
            self.in_literal = true;
        } else if self.text[self.pos..].starts_with('\'') {
            self.escaped = true;
        } else {
            self.in_literal = false;
        }
        Some((idx, c, true))
    }
}

pub(crate) fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Match `keyword` (any casing) not followed by an identifier character.
fn keyword_at<'a>(input: &'a str, keyword: &str) -> IResult<&'a str, &'a str> {
    terminated(tag_no_case(keyword), peek(not(satisfy(is_ident_char))))(input)
}

/// Split `text` on `keyword` outside quoted literals.
///
/// Every part is whitespace-trimmed. Without a valid split point the
/// whole trimmed text comes back as the only element.
pub fn split<'a>(text: &'a str, keyword: &str) -> Vec<&'a str> {
    split_on(text, keyword, false)
}

/// Like [`split`], but also skips `keyword` inside parentheses.
pub fn split_top_level<'a>(text: &'a str, keyword: &str) -> Vec<&'a str> {
    split_on(text, keyword, true)
}

fn split_on<'a>(text: &'a str, keyword: &str, top_level: bool) -> Vec<&'a str> {
    if keyword.is_empty() {
        return vec![text.trim()];
    }

    let mut parts = Vec::new();
    let mut start = 0;
    let mut depth = 0usize;
    let mut scanner = LiteralScanner::new(text);

    while let Some((i, c, in_literal)) = scanner.next() {
        if in_literal {
            continue;
        }
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
        if top_level && depth > 0 {
            continue;
        }
        if text[..i].chars().next_back().is_some_and(is_ident_char) {
            continue;
        }
        if let Ok((rest, _)) = keyword_at(&text[i..], keyword) {
            parts.push(text[start..i].trim());
            start = text.len() - rest.len();
            scanner.advance(start);
        }
    }

    parts.push(text[start..].trim());
    parts
}

/// Remove parentheses that sit outside quoted literals.
pub fn strip_parens(text: &str) -> String {
    LiteralScanner::new(text)
        .filter(|(_, c, in_literal)| *in_literal || (*c != '(' && *c != ')'))
        .map(|(_, c, _)| c)
        .collect::<String>()
        .trim()
        .to_string()
}
