use pretty_assertions::assert_eq;

use super::*;
use crate::error::ConvertError;
use crate::parser::parse;

fn rewrite(sql: &str, strategy: Strategy) -> String {
    parse(sql).unwrap().to_sql(strategy).unwrap()
}

fn rewrite_err(sql: &str, strategy: Strategy) -> ConvertError {
    parse(sql).unwrap().to_sql(strategy).unwrap_err()
}

const AND_PAIR: &str = "SELECT * FROM t WHERE a LIKE '%x%' AND a LIKE '%y%'";
const OR_PAIR: &str = "SELECT * FROM t WHERE a LIKE '%x%' OR a LIKE '%y%'";
const MIXED: &str =
    "SELECT * FROM docs WHERE (text LIKE '%x%' AND text LIKE '%y%') OR text LIKE '%z%' OR text LIKE '%w%'";
const TWO_COLUMNS: &str = "SELECT * FROM t WHERE a LIKE '%x%' AND b LIKE '%y%'";

#[test]
fn test_athena_regexp_single() {
    assert_eq!(
        rewrite("SELECT * FROM t WHERE a LIKE '%x%'", Strategy::AthenaRegexp),
        "SELECT * FROM t WHERE (regexp_like(a,'x'))"
    );
}

#[test]
fn test_athena_regexp_keeps_structure() {
    assert_eq!(
        rewrite(MIXED, Strategy::AthenaRegexp),
        "SELECT * FROM docs WHERE ((regexp_like(text,'x')) AND (regexp_like(text,'y'))) \
         OR (regexp_like(text,'z')) OR (regexp_like(text,'w'))"
    );
}

#[test]
fn test_athena_regexp_allows_mixed_columns() {
    assert_eq!(
        rewrite(TWO_COLUMNS, Strategy::AthenaRegexp),
        "SELECT * FROM t WHERE ((regexp_like(a,'x')) AND (regexp_like(b,'y')))"
    );
}

#[test]
fn test_athena_permuted_pair() {
    let sql = rewrite(AND_PAIR, Strategy::AthenaPermuted);
    assert_eq!(
        sql,
        "SELECT * FROM t WHERE (regexp_like(a,'x.*y')) OR (regexp_like(a,'y.*x'))"
    );
    assert!(sql.contains("regexp_like(a,'x.*y')"));
    assert!(sql.contains("regexp_like(a,'y.*x')"));
}

#[test]
fn test_athena_permuted_mixed() {
    assert_eq!(
        rewrite(MIXED, Strategy::AthenaPermuted),
        "SELECT * FROM docs WHERE (regexp_like(text,'x.*y')) OR (regexp_like(text,'y.*x')) \
         OR (regexp_like(text,'z')) OR (regexp_like(text,'w'))"
    );
}

#[test]
fn test_athena_permuted_factorial() {
    let sql = rewrite(
        "SELECT * FROM t WHERE a LIKE '%p%' AND a LIKE '%q%' AND a LIKE '%r%' AND a LIKE '%s%'",
        Strategy::AthenaPermuted,
    );
    assert_eq!(sql.matches("regexp_like").count(), 24);
}

#[test]
fn test_redshift_alternation_or_only() {
    assert_eq!(
        rewrite(OR_PAIR, Strategy::RedshiftAlternation),
        "SELECT * FROM t WHERE a ~ 'x|y'"
    );
}

#[test]
fn test_redshift_alternation_keeps_and_fragments() {
    assert_eq!(
        rewrite(MIXED, Strategy::RedshiftAlternation),
        "SELECT * FROM docs WHERE text ~ 'z|w' OR (text LIKE '%x%' AND text LIKE '%y%')"
    );
}

#[test]
fn test_redshift_alternation_and_only() {
    assert_eq!(
        rewrite(AND_PAIR, Strategy::RedshiftAlternation),
        "SELECT * FROM t WHERE (a LIKE '%x%' AND a LIKE '%y%')"
    );
}

#[test]
fn test_redshift_permuted() {
    assert_eq!(
        rewrite(MIXED, Strategy::RedshiftPermuted),
        "SELECT * FROM docs WHERE text ~ 'x.*y|y.*x|z|w'"
    );
}

#[test]
fn test_redshift_permuted_requires_one_column_overall() {
    let err = rewrite_err(
        "SELECT * FROM t WHERE a LIKE '%x%' OR b LIKE '%y%'",
        Strategy::RedshiftPermuted,
    );
    assert!(matches!(err, ConvertError::InconsistentColumn { .. }));
}

#[test]
fn test_inconsistent_columns_rejected() {
    for strategy in [
        Strategy::AthenaPermuted,
        Strategy::RedshiftAlternation,
        Strategy::RedshiftPermuted,
        Strategy::RedshiftBitmatch,
    ] {
        match rewrite_err(TWO_COLUMNS, strategy) {
            ConvertError::InconsistentColumn { columns } => assert_eq!(columns, vec!["a", "b"]),
            other => panic!("{strategy}: unexpected error {other}"),
        }
    }
}

#[test]
fn test_bitmatch_default_names() {
    assert_eq!(
        rewrite(MIXED, Strategy::RedshiftBitmatch),
        "WITH t AS (SELECT id, multi_match(text, ARRAY['x', 'y', 'z', 'w']) AS bits FROM docs) \
         SELECT COUNT(DISTINCT id) FROM t WHERE \
         (SUBSTRING(bits, 1, 1) = '1' AND SUBSTRING(bits, 2, 1) = '1') \
         OR (SUBSTRING(bits, 3, 1) = '1') OR (SUBSTRING(bits, 4, 1) = '1')"
    );
}

#[test]
fn test_bitmatch_reuses_repeated_tokens() {
    let sql = rewrite(
        "SELECT * FROM docs WHERE (text LIKE '%x%' AND text LIKE '%y%') OR (text LIKE '%x%' AND text LIKE '%z%')",
        Strategy::RedshiftBitmatch,
    );
    assert!(sql.contains("ARRAY['x', 'y', 'z']"));
    assert!(sql.ends_with(
        "WHERE (SUBSTRING(bits, 1, 1) = '1' AND SUBSTRING(bits, 2, 1) = '1') \
         OR (SUBSTRING(bits, 1, 1) = '1' AND SUBSTRING(bits, 3, 1) = '1')"
    ));
}

#[test]
fn test_bitmatch_custom_names() {
    let options = BitmatchOptions {
        id_column: "doc_id".into(),
        temp_table: "matches".into(),
        function: "f_multi_match".into(),
        bits_alias: "flags".into(),
    };
    let stmt = parse("SELECT doc_id FROM corpus c WHERE body LIKE '%q%'").unwrap();
    assert_eq!(
        stmt.to_sql_with_options(Strategy::RedshiftBitmatch, &options).unwrap(),
        "WITH matches AS (SELECT doc_id, f_multi_match(body, ARRAY['q']) AS flags FROM corpus) \
         SELECT COUNT(DISTINCT doc_id) FROM matches WHERE (SUBSTRING(flags, 1, 1) = '1')"
    );
}

#[test]
fn test_bitmatch_needs_from() {
    let err = rewrite_err("SELECT 1 WHERE a LIKE '%x%'", Strategy::RedshiftBitmatch);
    assert!(matches!(err, ConvertError::MalformedStatement { .. }));
}

#[test]
fn test_bitmatch_skips_from_inside_parentheses() {
    let sql = rewrite(
        "SELECT EXTRACT(year FROM ts) FROM events WHERE a LIKE '%x%'",
        Strategy::RedshiftBitmatch,
    );
    assert_eq!(
        sql,
        "WITH t AS (SELECT id, multi_match(a, ARRAY['x']) AS bits FROM events) \
         SELECT COUNT(DISTINCT id) FROM t WHERE (SUBSTRING(bits, 1, 1) = '1')"
    );
}

#[test]
fn test_rewrite_into_sql() {
    let stmt = parse(OR_PAIR).unwrap();
    let rewrite = RedshiftPermuted.synthesize(&stmt).unwrap();
    assert_eq!(rewrite, Rewrite::Predicate("a ~ 'x|y'".to_string()));
    assert_eq!(rewrite.into_sql(&stmt), "SELECT * FROM t WHERE a ~ 'x|y'");
}
