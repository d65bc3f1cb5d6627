//! Automatic fixes for common query writing mistakes
//!
//! - typographic characters pasted from documents (curly quotes,
//!   non-breaking spaces, dashes) become their ASCII equivalent
//! - reserved words and names starting with `_` used as identifiers are
//!   put between double quotes

use crate::parser::keywords::is_reserved;
use crate::parser::{AdqlVersion, Lexer, Token, TokenKind};

/// Apply every fix to `query`
///
/// The result is not guaranteed to be valid ADQL: only the mistakes listed
/// above are corrected.
pub fn try_quick_fix(query: &str, version: AdqlVersion) -> String {
    let query = replace_confusables(query);
    quote_identifiers(&query, version)
}

/// Replace Unicode look-alikes of ADQL characters by their ASCII version
pub fn replace_confusables(query: &str) -> String {
    query
        .chars()
        .filter_map(|c| match c {
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' | '\u{2035}' => Some('\''),
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{2033}' | '\u{2036}' => Some('"'),
            '\u{00A0}' | '\u{1680}' | '\u{2000}'..='\u{200A}' | '\u{202F}' | '\u{205F}'
            | '\u{3000}' => Some(' '),
            '\u{2010}'..='\u{2015}' | '\u{2212}' | '\u{FE63}' | '\u{FF0D}' => Some('-'),
            '\u{200B}'..='\u{200D}' | '\u{2060}' | '\u{FEFF}' => None,
            other => Some(other),
        })
        .collect()
}

fn quote_identifiers(query: &str, version: AdqlVersion) -> String {
    let tokens: Vec<Token<'_>> = Lexer::new(query).collect();
    let mut fixed = String::with_capacity(query.len() + 8);
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if is_underscore(token) {
            // `_` is not a token on its own: glue it to the word it starts
            let start = i;
            i += 1;
            while i < tokens.len() && is_word_part(&tokens[i]) && touches(&tokens[i - 1], &tokens[i]) {
                i += 1;
            }
            let word: String = tokens[start..i].iter().map(|t| t.text).collect();
            fixed.push_str(&format!("\"{word}\""));
            continue;
        }

        if needs_quotes(token, next_significant(&tokens, i), version) {
            fixed.push_str(&format!("\"{}\"", token.text));
        } else {
            fixed.push_str(token.text);
        }
        i += 1;
    }
    fixed
}

fn needs_quotes(token: &Token<'_>, next: Option<&Token<'_>>, version: AdqlVersion) -> bool {
    let is_call = next.is_some_and(|t| t.kind == TokenKind::L_PAREN);
    if is_call {
        return false;
    }
    match token.kind {
        TokenKind::IDENT => is_reserved(token.text, version),
        kind if kind.is_function() => kind.is_available_in(version) || is_reserved(token.text, version),
        kind if kind.is_keyword() && !kind.is_available_in(version) => is_reserved(token.text, version),
        _ => false,
    }
}

fn next_significant<'t, 'a>(tokens: &'t [Token<'a>], i: usize) -> Option<&'t Token<'a>> {
    tokens[i + 1..].iter().find(|t| !t.kind.is_trivia())
}

fn is_underscore(token: &Token<'_>) -> bool {
    token.kind == TokenKind::ERROR && token.text.chars().all(|c| c == '_')
}

fn is_word_part(token: &Token<'_>) -> bool {
    is_underscore(token)
        || token.kind == TokenKind::IDENT
        || token.kind == TokenKind::UNSIGNED_INTEGER
        || token.kind.is_keyword()
}

fn touches(previous: &Token<'_>, next: &Token<'_>) -> bool {
    previous.range.end() == next.range.start()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confusables() {
        assert_eq!(
            replace_confusables("SELECT\u{00A0}* FROM t WHERE name = \u{2018}M31\u{2019} AND x > \u{2212}1"),
            "SELECT * FROM t WHERE name = 'M31' AND x > -1"
        );
        assert_eq!(replace_confusables("a\u{200B}b"), "ab");
    }

    #[test]
    fn test_reserved_words_are_quoted() {
        assert_eq!(
            try_quick_fix("SELECT date, point FROM t", AdqlVersion::V2_1),
            "SELECT \"date\", \"point\" FROM t"
        );
    }

    #[test]
    fn test_function_calls_are_kept() {
        let query = "SELECT POINT('', ra, dec), COUNT(*) FROM t";
        assert_eq!(try_quick_fix(query, AdqlVersion::V2_0), query);
    }

    #[test]
    fn test_underscore_names() {
        assert_eq!(
            try_quick_fix("SELECT _id, _2mass_name FROM t", AdqlVersion::V2_1),
            "SELECT \"_id\", \"_2mass_name\" FROM t"
        );
    }

    #[test]
    fn test_version_dependent_words() {
        assert_eq!(
            try_quick_fix("SELECT lower FROM t", AdqlVersion::V2_0),
            "SELECT \"lower\" FROM t"
        );
        assert_eq!(
            try_quick_fix("SELECT offset FROM t", AdqlVersion::V2_0),
            "SELECT offset FROM t"
        );
    }

    #[test]
    fn test_strings_are_untouched() {
        let query = "SELECT a FROM t WHERE b = 'date _x'";
        assert_eq!(try_quick_fix(query, AdqlVersion::V2_1), query);
    }
}
