//! Allowed coordinate systems
//!
//! A policy is a list of patterns `"{frame} {refpos} {flavor}"`. Each part
//! is a value, a list of values `(A|B)` or `*`. The default value of each
//! part is always accepted, so `"ICRS * *"` also lets through queries with
//! no frame at all.

use regex::Regex;

use super::{CoordSys, Flavor, Frame, RefPos};
use crate::parser::{ErrorCode, ParseError};

/// Compiled list of allowed coordinate systems
#[derive(Debug, Clone)]
pub struct CoordSysPolicy {
    patterns: Vec<String>,
    /// `None` when no pattern is given: only the default system passes
    regex: Option<Regex>,
}

impl CoordSysPolicy {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, ParseError> {
        let patterns: Vec<String> = patterns.iter().map(|p| p.as_ref().trim().to_string()).collect();
        let regex = if patterns.is_empty() {
            None
        } else {
            let alternatives = patterns
                .iter()
                .map(|pattern| compile_pattern(pattern))
                .collect::<Result<Vec<_>, _>>()?;
            let source = format!("^(?i:{})$", alternatives.join("|"));
            tracing::debug!(regex = %source, "compiled coordinate system policy");
            Some(Regex::new(&source).map_err(|err| {
                ParseError::new(
                    format!("Invalid allowed coordinate systems: {err}"),
                    ErrorCode::E0405,
                )
            })?)
        };
        Ok(Self { patterns, regex })
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_allowed(&self, coord_sys: &CoordSys) -> bool {
        match &self.regex {
            Some(regex) => regex.is_match(&coord_sys.to_full_stcs()),
            None => coord_sys.is_default(),
        }
    }

    /// Check a coordinate system, as `written` in the query
    pub fn check(&self, written: &str, coord_sys: &CoordSys) -> Result<(), ParseError> {
        if self.is_allowed(coord_sys) {
            return Ok(());
        }
        let allowed = if self.patterns.is_empty() {
            "No coordinate system is allowed!".to_string()
        } else {
            format!("Allowed coordinate systems are: {}", self.patterns.join(", "))
        };
        Err(ParseError::new(
            format!(
                "Coordinate system \"{written}\" (= \"{}\") not allowed in this implementation. {allowed}",
                coord_sys.to_full_stcs()
            ),
            ErrorCode::E0403,
        ))
    }
}

fn compile_pattern(pattern: &str) -> Result<String, ParseError> {
    let parts: Vec<&str> = pattern.split_whitespace().collect();
    let [frame, refpos, flavor] = parts.as_slice() else {
        return Err(pattern_error(pattern));
    };
    Ok(format!(
        "(?:{} {} {})",
        compile_part(pattern, frame, Frame::ALL.iter().map(|v| v.as_str()), Frame::DEFAULT.as_str())?,
        compile_part(pattern, refpos, RefPos::ALL.iter().map(|v| v.as_str()), RefPos::DEFAULT.as_str())?,
        compile_part(pattern, flavor, Flavor::ALL.iter().map(|v| v.as_str()), Flavor::DEFAULT.as_str())?,
    ))
}

fn compile_part<'v>(
    pattern: &str,
    part: &str,
    values: impl Iterator<Item = &'v str>,
    default: &str,
) -> Result<String, ParseError> {
    let values: Vec<&str> = values.collect();
    if part == "*" {
        return Ok(format!("(?:{})", values.join("|")));
    }

    let listed = match part.strip_prefix('(').and_then(|p| p.strip_suffix(')')) {
        Some(inner) => inner.split('|').map(str::trim).collect(),
        None => vec![part],
    };
    let mut accepted = vec![default];
    for value in listed {
        let known = values
            .iter()
            .find(|known| known.eq_ignore_ascii_case(value))
            .ok_or_else(|| pattern_error(pattern))?;
        if !accepted.contains(known) {
            accepted.push(*known);
        }
    }
    Ok(format!("(?:{})", accepted.join("|")))
}

fn pattern_error(pattern: &str) -> ParseError {
    ParseError::new(
        format!(
            "Incorrect allowed coordinate system pattern: \"{pattern}\"! Expected syntax: \"{{frame}} {{refpos}} {{flavor}}\", where each part is a value, a list of values between parentheses separated by \"|\", or \"*\"."
        ),
        ErrorCode::E0405,
    )
}
