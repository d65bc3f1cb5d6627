//! Function calls
//!
//! Parameters are checked as soon as a call is parsed: their number, and
//! their type (numeric, string or geometry) as far as it can be known
//! without database metadata.
//!
//! Shapes (`POINT`, `CIRCLE`, `BOX`, `POLYGON`) take a coordinate system
//! first. It is mandatory in ADQL 2.0 and optional in ADQL 2.1, where it is
//! recognised by being a string expression or by the number of parameters.

use super::operands::{check_geometry, check_numeric, check_string, value_expression};
use crate::parser::errors::{ErrorCode, ParseError};
use crate::parser::parser::{PResult, Parser};
use crate::parser::syntax_kind::TokenKind;
use crate::parser::AdqlVersion;
use crate::syntax::{
    AggregateKind, CastType, Function, GeometryFunction, GeometryKind, Identifier, MathKind,
    Operand, OperandKind,
};

/// Whether a function call starts at the current token
pub(super) fn starts_function(p: &Parser<'_>) -> bool {
    let kind = p.kind();
    aggregate_kind(kind).is_some()
        || math_kind(kind).is_some()
        || geometry_kind(kind).is_some()
        || matches!(
            kind,
            TokenKind::LOWER_KW
                | TokenKind::UPPER_KW
                | TokenKind::COALESCE_KW
                | TokenKind::IN_UNIT_KW
                | TokenKind::CAST_KW
        )
        || (kind == TokenKind::IDENT && p.is_identifier(0) && p.nth(1) == TokenKind::L_PAREN)
}

pub(super) fn function_call(p: &mut Parser<'_>) -> PResult<Operand> {
    let start = p.token_index();
    let token = p.bump();

    let function = if let Some(kind) = aggregate_kind(token.kind) {
        aggregate(p, kind)?
    } else if let Some(kind) = math_kind(token.kind) {
        let args = arguments(p)?;
        let (min, max) = kind.arity();
        if args.len() < min || args.len() > max {
            let expected = if min == max {
                min.to_string()
            } else {
                format!("{min} to {max}")
            };
            return Err(wrong_arity(p, kind.name(), &expected, args.len(), start));
        }
        for arg in &args {
            check_numeric(p, arg)?;
        }
        Function::Math { kind, args }
    } else if let Some(kind) = geometry_kind(token.kind) {
        Function::Geometry(geometry(p, kind, start)?)
    } else {
        match token.kind {
            TokenKind::LOWER_KW | TokenKind::UPPER_KW => {
                let name = if token.kind == TokenKind::LOWER_KW { "LOWER" } else { "UPPER" };
                let value = single_argument(p, name, start)?;
                check_string(p, &value)?;
                if token.kind == TokenKind::LOWER_KW {
                    Function::Lower(value)
                } else {
                    Function::Upper(value)
                }
            }
            TokenKind::COALESCE_KW => {
                let args = arguments(p)?;
                if args.is_empty() {
                    return Err(wrong_arity(p, "COALESCE", "at least 1", 0, start));
                }
                Function::Coalesce(args)
            }
            TokenKind::IN_UNIT_KW => {
                let args = arguments(p)?;
                let [value, unit]: [Operand; 2] = args
                    .try_into()
                    .map_err(|args: Vec<Operand>| wrong_arity(p, "IN_UNIT", "2", args.len(), start))?;
                check_numeric(p, &value)?;
                check_string(p, &unit)?;
                Function::InUnit { value, unit }
            }
            TokenKind::CAST_KW => cast(p)?,
            _ => Function::UserDefined {
                name: Identifier::from_token_text(token.text),
                args: arguments(p)?,
            },
        }
    };

    Ok(Operand::function(function).with_position(p.span_from(start)))
}

fn aggregate_kind(kind: TokenKind) -> Option<AggregateKind> {
    Some(match kind {
        TokenKind::COUNT_KW => AggregateKind::Count,
        TokenKind::AVG_KW => AggregateKind::Avg,
        TokenKind::MAX_KW => AggregateKind::Max,
        TokenKind::MIN_KW => AggregateKind::Min,
        TokenKind::SUM_KW => AggregateKind::Sum,
        _ => return None,
    })
}

fn math_kind(kind: TokenKind) -> Option<MathKind> {
    Some(match kind {
        TokenKind::ABS_KW => MathKind::Abs,
        TokenKind::CEILING_KW => MathKind::Ceiling,
        TokenKind::DEGREES_KW => MathKind::Degrees,
        TokenKind::EXP_KW => MathKind::Exp,
        TokenKind::FLOOR_KW => MathKind::Floor,
        TokenKind::LOG_KW => MathKind::Log,
        TokenKind::LOG10_KW => MathKind::Log10,
        TokenKind::MOD_KW => MathKind::Mod,
        TokenKind::PI_KW => MathKind::Pi,
        TokenKind::POWER_KW => MathKind::Power,
        TokenKind::RADIANS_KW => MathKind::Radians,
        TokenKind::RAND_KW => MathKind::Rand,
        TokenKind::ROUND_KW => MathKind::Round,
        TokenKind::SQRT_KW => MathKind::Sqrt,
        TokenKind::TRUNCATE_KW => MathKind::Truncate,
        TokenKind::ACOS_KW => MathKind::Acos,
        TokenKind::ASIN_KW => MathKind::Asin,
        TokenKind::ATAN_KW => MathKind::Atan,
        TokenKind::ATAN2_KW => MathKind::Atan2,
        TokenKind::COS_KW => MathKind::Cos,
        TokenKind::COT_KW => MathKind::Cot,
        TokenKind::SIN_KW => MathKind::Sin,
        TokenKind::TAN_KW => MathKind::Tan,
        _ => return None,
    })
}

fn geometry_kind(kind: TokenKind) -> Option<GeometryKind> {
    Some(match kind {
        TokenKind::AREA_KW => GeometryKind::Area,
        TokenKind::BOX_KW => GeometryKind::Box,
        TokenKind::CENTROID_KW => GeometryKind::Centroid,
        TokenKind::CIRCLE_KW => GeometryKind::Circle,
        TokenKind::CONTAINS_KW => GeometryKind::Contains,
        TokenKind::COORD1_KW => GeometryKind::Coord1,
        TokenKind::COORD2_KW => GeometryKind::Coord2,
        TokenKind::COORDSYS_KW => GeometryKind::Coordsys,
        TokenKind::DISTANCE_KW => GeometryKind::Distance,
        TokenKind::INTERSECTS_KW => GeometryKind::Intersects,
        TokenKind::POINT_KW => GeometryKind::Point,
        TokenKind::POLYGON_KW => GeometryKind::Polygon,
        TokenKind::REGION_KW => GeometryKind::Region,
        _ => return None,
    })
}

/// `( [value (, value)*] )`
fn arguments(p: &mut Parser<'_>) -> PResult<Vec<Operand>> {
    p.expect(TokenKind::L_PAREN)?;
    let mut args = Vec::new();
    if p.eat(TokenKind::R_PAREN) {
        return Ok(args);
    }
    loop {
        args.push(value_expression(p)?);
        if !p.eat(TokenKind::COMMA) {
            break;
        }
    }
    p.expect(TokenKind::R_PAREN)?;
    Ok(args)
}

fn single_argument(p: &mut Parser<'_>, name: &str, start: usize) -> PResult<Operand> {
    let args = arguments(p)?;
    let given = args.len();
    let [arg]: [Operand; 1] = args
        .try_into()
        .map_err(|_| wrong_arity(p, name, "1", given, start))?;
    Ok(arg)
}

fn wrong_arity(p: &Parser<'_>, name: &str, expected: &str, given: usize, start: usize) -> ParseError {
    p.error_at(
        format!(
            "Wrong number of parameters for the function \"{name}\": {expected} expected, {given} given!"
        ),
        p.span_from(start),
        ErrorCode::E0203,
    )
}

/// `COUNT([DISTINCT | ALL] * | value)`, `AVG|MAX|MIN|SUM([DISTINCT | ALL] value)`
fn aggregate(p: &mut Parser<'_>, kind: AggregateKind) -> PResult<Function> {
    p.expect(TokenKind::L_PAREN)?;
    let distinct = if p.eat(TokenKind::DISTINCT_KW) {
        true
    } else {
        p.eat(TokenKind::ALL_KW);
        false
    };

    let arg = if kind == AggregateKind::Count && !distinct && p.eat(TokenKind::STAR) {
        None
    } else {
        let arg = value_expression(p)?;
        if matches!(kind, AggregateKind::Avg | AggregateKind::Sum) {
            check_numeric(p, &arg)?;
        }
        Some(arg)
    };
    p.expect(TokenKind::R_PAREN)?;

    Ok(Function::Aggregate {
        kind,
        distinct,
        arg,
    })
}

/// `CAST(value AS type)`
fn cast(p: &mut Parser<'_>) -> PResult<Function> {
    p.expect(TokenKind::L_PAREN)?;
    let value = value_expression(p)?;
    p.expect(TokenKind::AS_KW)?;

    let target = if p.at_word("SMALLINT", "\"SMALLINT\"") {
        p.bump();
        CastType::SmallInt
    } else if p.at_word("INTEGER", "\"INTEGER\"") {
        p.bump();
        CastType::Integer
    } else if p.at_word("BIGINT", "\"BIGINT\"") {
        p.bump();
        CastType::BigInt
    } else if p.at_word("REAL", "\"REAL\"") {
        p.bump();
        CastType::Real
    } else if p.at_word("DOUBLE", "\"DOUBLE PRECISION\"") {
        p.bump();
        if !p.at_word("PRECISION", "\"PRECISION\"") {
            return Err(p.unexpected());
        }
        p.bump();
        CastType::DoublePrecision
    } else if p.at_word("CHAR", "\"CHAR\"") {
        p.bump();
        CastType::Char(type_length(p)?)
    } else if p.at_word("VARCHAR", "\"VARCHAR\"") {
        p.bump();
        CastType::VarChar(type_length(p)?)
    } else if p.at_word("TIMESTAMP", "\"TIMESTAMP\"") {
        p.bump();
        CastType::Timestamp
    } else {
        return Err(p.unexpected());
    };

    p.expect(TokenKind::R_PAREN)?;
    Ok(Function::Cast { value, target })
}

fn type_length(p: &mut Parser<'_>) -> PResult<Option<u32>> {
    if !p.eat(TokenKind::L_PAREN) {
        return Ok(None);
    }
    let start = p.token_index();
    let token = p.expect(TokenKind::UNSIGNED_INTEGER)?;
    let length = token.text.parse::<u32>().map_err(|_| {
        p.error_at(
            format!("Incorrect type length: \"{}\"!", token.text),
            p.span_from(start),
            ErrorCode::E0104,
        )
    })?;
    p.expect(TokenKind::R_PAREN)?;
    Ok(Some(length))
}

fn geometry(p: &mut Parser<'_>, kind: GeometryKind, start: usize) -> PResult<GeometryFunction> {
    let args = arguments(p)?;
    let n = args.len();

    match kind {
        GeometryKind::Area
        | GeometryKind::Centroid
        | GeometryKind::Coord1
        | GeometryKind::Coord2
        | GeometryKind::Coordsys => {
            if n != 1 {
                return Err(wrong_arity(p, kind.name(), "1", n, start));
            }
            check_geometry(p, &args[0])?;
        }
        GeometryKind::Contains | GeometryKind::Intersects => {
            if n != 2 {
                return Err(wrong_arity(p, kind.name(), "2", n, start));
            }
            for arg in &args {
                check_geometry(p, arg)?;
            }
        }
        GeometryKind::Distance => match (n, p.version()) {
            (2, _) => {
                for arg in &args {
                    check_geometry(p, arg)?;
                }
            }
            (4, AdqlVersion::V2_1) => {
                for arg in &args {
                    check_numeric(p, arg)?;
                }
            }
            (_, AdqlVersion::V2_0) => return Err(wrong_arity(p, "DISTANCE", "2", n, start)),
            (_, AdqlVersion::V2_1) => {
                return Err(wrong_arity(p, "DISTANCE", "2 or 4", n, start));
            }
        },
        GeometryKind::Region => {
            if n != 1 {
                return Err(wrong_arity(p, "REGION", "1", n, start));
            }
            check_string(p, &args[0])?;
        }
        GeometryKind::Point | GeometryKind::Circle | GeometryKind::Box | GeometryKind::Polygon => {
            return shape(p, kind, args, start);
        }
    }

    Ok(GeometryFunction::new(kind, None, args))
}

fn shape(
    p: &Parser<'_>,
    kind: GeometryKind,
    mut args: Vec<Operand>,
    start: usize,
) -> PResult<GeometryFunction> {
    let given = args.len();
    let version = p.version();
    let arity_error = || wrong_arity(p, kind.name(), shape_arity(kind, version), given, start);

    let has_coord_sys = match version {
        AdqlVersion::V2_0 => true,
        AdqlVersion::V2_1 => starts_with_coord_sys(kind, &args),
    };
    let coord_sys = if has_coord_sys {
        if args.is_empty() {
            return Err(arity_error());
        }
        let coord_sys = args.remove(0);
        check_string(p, &coord_sys)?;
        Some(coord_sys)
    } else {
        None
    };

    let with_point = version == AdqlVersion::V2_1 && args.first().is_some_and(is_point_like);
    let n = args.len();
    match (kind, with_point) {
        (GeometryKind::Point, _) if n == 2 => check_all(p, &args, check_numeric)?,
        (GeometryKind::Circle, false) if n == 3 => check_all(p, &args, check_numeric)?,
        (GeometryKind::Box, false) if n == 4 => check_all(p, &args, check_numeric)?,
        (GeometryKind::Circle, true) if n == 2 => {
            check_geometry(p, &args[0])?;
            check_numeric(p, &args[1])?;
        }
        (GeometryKind::Box, true) if n == 3 => {
            check_geometry(p, &args[0])?;
            check_all(p, &args[1..], check_numeric)?;
        }
        (GeometryKind::Polygon, false) if n >= 6 && n % 2 == 0 => {
            check_all(p, &args, check_numeric)?
        }
        (GeometryKind::Polygon, true) if n >= 3 => check_all(p, &args, check_geometry)?,
        // A lone column may stand for a point in ADQL 2.1
        (GeometryKind::Circle, false) if n == 2 && version == AdqlVersion::V2_1 => {
            check_geometry(p, &args[0])?;
            check_numeric(p, &args[1])?;
        }
        (GeometryKind::Box, false) if n == 3 && version == AdqlVersion::V2_1 => {
            check_geometry(p, &args[0])?;
            check_all(p, &args[1..], check_numeric)?;
        }
        // Too few arguments for coordinates: only points
        (GeometryKind::Polygon, false) if (3..6).contains(&n) && version == AdqlVersion::V2_1 => {
            check_all(p, &args, check_geometry)?
        }
        _ => return Err(arity_error()),
    }

    Ok(GeometryFunction::new(kind, coord_sys, args))
}

fn shape_arity(kind: GeometryKind, version: AdqlVersion) -> &'static str {
    match (kind, version) {
        (GeometryKind::Point, AdqlVersion::V2_0) => "3",
        (GeometryKind::Circle, AdqlVersion::V2_0) => "4",
        (GeometryKind::Box, AdqlVersion::V2_0) => "5",
        (_, AdqlVersion::V2_0) => "an odd number (at least 7)",
        (GeometryKind::Point, _) => "2 (or 3 with a coordinate system)",
        (GeometryKind::Circle, _) => "2 or 3 (or one more with a coordinate system)",
        (GeometryKind::Box, _) => "3 or 4 (or one more with a coordinate system)",
        _ => "at least 3 points or 6 coordinates (or one more with a coordinate system)",
    }
}

/// Whether the first parameter of an ADQL 2.1 shape is its coordinate system
fn starts_with_coord_sys(kind: GeometryKind, args: &[Operand]) -> bool {
    let Some(first) = args.first() else {
        return false;
    };
    if is_string_only(first) {
        return true;
    }
    let n = args.len();
    let second_is_point = args.get(1).is_some_and(is_point_like);
    match kind {
        GeometryKind::Point => n == 3,
        GeometryKind::Circle => n == 4 || (n == 3 && second_is_point),
        GeometryKind::Box => n == 5 || (n == 4 && second_is_point),
        GeometryKind::Polygon => {
            if second_is_point {
                !is_point_like(first)
            } else {
                n >= 7 && n % 2 == 1
            }
        }
        _ => false,
    }
}

/// Expressions that can only be strings (a column may be anything)
fn is_string_only(operand: &Operand) -> bool {
    match &operand.kind {
        OperandKind::String(_) | OperandKind::Concatenation(_) => true,
        OperandKind::Wrapped(inner) => is_string_only(inner),
        OperandKind::Function(function) => matches!(
            function.as_ref(),
            Function::Lower(_) | Function::Upper(_)
        ) || matches!(
            function.as_ref(),
            Function::Geometry(g) if g.kind == GeometryKind::Coordsys
        ),
        _ => false,
    }
}

/// Expressions that can only be geometries
fn is_point_like(operand: &Operand) -> bool {
    match &operand.kind {
        OperandKind::Wrapped(inner) => is_point_like(inner),
        OperandKind::Function(function) => matches!(
            function.as_ref(),
            Function::Geometry(g) if g.kind.is_geometry()
        ),
        _ => false,
    }
}

fn check_all(
    p: &Parser<'_>,
    args: &[Operand],
    check: fn(&Parser<'_>, &Operand) -> PResult<()>,
) -> PResult<()> {
    args.iter().try_for_each(|arg| check(p, arg))
}
