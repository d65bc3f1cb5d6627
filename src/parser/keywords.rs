//! Reserved word tables
//!
//! ADQL distinguishes three families of reserved words:
//! - ADQL words (function names, `TOP`...), which depend on the version
//! - SQL-92 words, always reserved even when ADQL gives them no meaning
//! - grammar keywords of the current version (`SELECT`, `JOIN`...)
//!
//! A reserved word can only be used as a table/column/alias name when
//! written between double quotes. The helpers here build the hint the
//! parser attaches to errors caused by such a collision.

use std::sync::LazyLock;

use rustc_hash::FxHashSet;

use super::AdqlVersion;

/// Reserved ADQL words common to every version
const ADQL_RESERVED_COMMON: &[&str] = &[
    "ABS", "ACOS", "AREA", "ASIN", "ATAN", "ATAN2", "BOX", "CEILING", "CENTROID", "CIRCLE",
    "CONTAINS", "COORD1", "COORD2", "COORDSYS", "COS", "COT", "DEGREES", "DISTANCE", "EXP",
    "FLOOR", "INTERSECTS", "LOG", "LOG10", "MOD", "PI", "POINT", "POLYGON", "POWER", "RADIANS",
    "RAND", "ROUND", "SIN", "SQRT", "TAN", "TOP", "TRUNCATE",
];

/// Reserved only in ADQL 2.0
const ADQL_RESERVED_V2_0: &[&str] = &["REGION"];

/// Reserved only in ADQL 2.1
const ADQL_RESERVED_V2_1: &[&str] = &["ILIKE", "IN_UNIT", "OFFSET"];

/// SQL-92 reserved words
///
/// `DEC` is left out: it is the usual name of the declination column.
const SQL_RESERVED: &[&str] = &[
    "ABSOLUTE", "ACTION", "ADD", "ALL", "ALLOCATE", "ALTER", "AND", "ANY", "ARE", "AS", "ASC",
    "ASSERTION", "AT", "AUTHORIZATION", "AVG", "BEGIN", "BETWEEN", "BIT", "BIT_LENGTH", "BOTH",
    "BY", "CASCADE", "CASCADED", "CASE", "CAST", "CATALOG", "CHAR", "CHARACTER", "CHAR_LENGTH",
    "CHARACTER_LENGTH", "CHECK", "CLOSE", "COALESCE", "COLLATE", "COLLATION", "COLUMN",
    "COMMIT", "CONNECT", "CONNECTION", "CONSTRAINT", "CONSTRAINTS", "CONTINUE", "CONVERT",
    "CORRESPONDING", "COUNT", "CREATE", "CROSS", "CURRENT", "CURRENT_DATE", "CURRENT_TIME",
    "CURRENT_TIMESTAMP", "CURRENT_USER", "CURSOR", "DATE", "DAY", "DEALLOCATE", "DECIMAL",
    "DECLARE", "DEFAULT", "DEFERRABLE", "DEFERRED", "DELETE", "DESC", "DESCRIBE", "DESCRIPTOR",
    "DIAGNOSTICS", "DISCONNECT", "DISTINCT", "DOMAIN", "DOUBLE", "DROP", "ELSE", "END",
    "ESCAPE", "EXCEPT", "EXCEPTION", "EXEC", "EXECUTE", "EXISTS", "EXTERNAL", "EXTRACT",
    "FALSE", "FETCH", "FIRST", "FLOAT", "FOR", "FOREIGN", "FOUND", "FROM", "FULL", "GET",
    "GLOBAL", "GO", "GOTO", "GRANT", "GROUP", "HAVING", "HOUR", "IDENTITY", "IMMEDIATE", "IN",
    "INDICATOR", "INITIALLY", "INNER", "INPUT", "INSENSITIVE", "INSERT", "INT", "INTEGER",
    "INTERSECT", "INTERVAL", "INTO", "IS", "ISOLATION", "JOIN", "KEY", "LANGUAGE", "LAST",
    "LEADING", "LEFT", "LEVEL", "LIKE", "LOCAL", "LOWER", "MATCH", "MAX", "MIN", "MINUTE",
    "MODULE", "MONTH", "NAMES", "NATIONAL", "NATURAL", "NCHAR", "NEXT", "NO", "NOT", "NULL",
    "NULLIF", "NUMERIC", "OCTET_LENGTH", "OF", "ON", "ONLY", "OPEN", "OPTION", "OR", "ORDER",
    "OUTER", "OUTPUT", "OVERLAPS", "PAD", "PARTIAL", "POSITION", "PRECISION", "PREPARE",
    "PRESERVE", "PRIMARY", "PRIOR", "PRIVILEGES", "PROCEDURE", "PUBLIC", "READ", "REAL",
    "REFERENCES", "RELATIVE", "RESTRICT", "REVOKE", "RIGHT", "ROLLBACK", "ROWS", "SCHEMA",
    "SCROLL", "SECOND", "SECTION", "SELECT", "SESSION", "SESSION_USER", "SET", "SIZE",
    "SMALLINT", "SOME", "SPACE", "SQL", "SQLCODE", "SQLERROR", "SQLSTATE", "SUBSTRING", "SUM",
    "SYSTEM_USER", "TABLE", "TEMPORARY", "THEN", "TIME", "TIMESTAMP", "TIMEZONE_HOUR",
    "TIMEZONE_MINUTE", "TO", "TRAILING", "TRANSACTION", "TRANSLATE", "TRANSLATION", "TRIM",
    "TRUE", "UNION", "UNIQUE", "UNKNOWN", "UPDATE", "UPPER", "USAGE", "USER", "USING", "VALUE",
    "VALUES", "VARCHAR", "VARYING", "VIEW", "WHEN", "WHENEVER", "WHERE", "WITH", "WORK",
    "WRITE", "YEAR", "ZONE",
];

static ADQL_V2_0: LazyLock<FxHashSet<&'static str>> = LazyLock::new(|| {
    ADQL_RESERVED_COMMON
        .iter()
        .chain(ADQL_RESERVED_V2_0)
        .copied()
        .collect()
});

static ADQL_V2_1: LazyLock<FxHashSet<&'static str>> = LazyLock::new(|| {
    ADQL_RESERVED_COMMON
        .iter()
        .chain(ADQL_RESERVED_V2_1)
        .copied()
        .collect()
});

static SQL: LazyLock<FxHashSet<&'static str>> =
    LazyLock::new(|| SQL_RESERVED.iter().copied().collect());

/// Whether `word` is a reserved ADQL word in `version` (case-insensitive)
pub fn is_adql_reserved(word: &str, version: AdqlVersion) -> bool {
    let upper = word.to_ascii_uppercase();
    match version {
        AdqlVersion::V2_0 => ADQL_V2_0.contains(upper.as_str()),
        AdqlVersion::V2_1 => ADQL_V2_1.contains(upper.as_str()),
    }
}

/// Whether `word` is a reserved SQL-92 word (case-insensitive)
pub fn is_sql_reserved(word: &str) -> bool {
    SQL.contains(word.to_ascii_uppercase().as_str())
}

/// Whether `word` is reserved in `version`, by ADQL or by SQL
pub fn is_reserved(word: &str, version: AdqlVersion) -> bool {
    is_adql_reserved(word, version) || is_sql_reserved(word)
}

/// Whether `word` may be written as a regular (non-quoted) identifier
pub fn is_regular_identifier(word: &str, version: AdqlVersion) -> bool {
    let mut chars = word.chars();
    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    starts_with_letter
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !is_reserved(word, version)
}

/// Build the hint explaining why `word` can not be used as an identifier
///
/// `grammar_keyword` tells whether the grammar of `version` uses the word
/// (e.g. `SELECT`), which makes it reserved even if neither table lists it.
pub fn reserved_word_hint(
    word: &str,
    version: AdqlVersion,
    grammar_keyword: bool,
) -> Option<String> {
    let upper = word.to_ascii_uppercase();
    let reason = if is_adql_reserved(&upper, version) || grammar_keyword {
        format!("\"{upper}\" is a reserved ADQL word in {version}")
    } else if is_version_gated(&upper, version) {
        format!(
            "\"{upper}\" is not supported in ADQL {version}, but is however a reserved word"
        )
    } else if is_sql_reserved(&upper) {
        format!("\"{upper}\" is not an ADQL word, but is however a reserved SQL word")
    } else {
        return None;
    };

    Some(format!(
        "(HINT: {reason}. To use it as a column/table/schema name/alias, write it between double quotes.)"
    ))
}

/// SQL words the grammar of a later version gives a meaning to
fn is_version_gated(upper: &str, version: AdqlVersion) -> bool {
    const V2_1_ONLY: &[&str] = &[
        "WITH", "UNION", "INTERSECT", "EXCEPT", "LOWER", "UPPER", "COALESCE", "CAST",
    ];
    version == AdqlVersion::V2_0 && V2_1_ONLY.contains(&upper)
}
