//! Coordinate system pass
//!
//! Checks the string literals given as coordinate system to `POINT`,
//! `CIRCLE`, `BOX` and `POLYGON`. Other operands (columns, expressions)
//! can only be evaluated by the database and are left alone.

use crate::parser::ParseError;
use crate::stc::{CoordSys, CoordSysPolicy};
use crate::syntax::{Operand, Walk, search_operands};

/// Syntax errors and policy violations of every literal coordinate system
///
/// Without a policy every well-formed coordinate system is allowed.
pub fn check_coord_systems<W: Walk + ?Sized>(
    root: &W,
    policy: Option<&CoordSysPolicy>,
) -> Vec<ParseError> {
    literal_coord_systems(root)
        .into_iter()
        .filter_map(|(text, operand)| {
            let result = CoordSys::parse(text)
                .and_then(|coord_sys| match policy {
                    Some(policy) => policy.check(text, &coord_sys),
                    None => Ok(()),
                });
            result.err().map(|e| e.or_position(operand.position))
        })
        .collect()
}

/// Coordinate system literals of the geometry functions, in document order
fn literal_coord_systems<W: Walk + ?Sized>(root: &W) -> Vec<(&str, &Operand)> {
    search_operands(root, |operand| operand.as_geometry().is_some())
        .into_iter()
        .filter_map(|operand| {
            let coord_sys = operand.as_geometry()?.coord_sys.as_deref()?;
            Some((coord_sys.as_string_literal()?, coord_sys))
        })
        .collect()
}
