//! Regions described by geometry functions of a query
//!
//! Only literal values can be converted: a coordinate system must be a
//! string literal, and coordinates, radius and sizes numeric literals.

use super::{CoordSys, Region};
use crate::parser::{ErrorCode, ParseError};
use crate::syntax::{GeometryFunction, GeometryKind, Operand, OperandKind};

impl Region {
    /// Region described by a geometry function call
    pub fn from_operand(operand: &Operand) -> Result<Region, ParseError> {
        match &operand.kind {
            OperandKind::Wrapped(inner) => Self::from_operand(inner),
            _ => match operand.as_geometry() {
                Some(geometry) => {
                    Self::from_geometry(geometry).map_err(|e| e.or_position(operand.position))
                }
                None => Err(unknown_region(operand)),
            },
        }
    }

    /// Region described by a `POINT`, `CIRCLE`, `BOX`, `POLYGON` or `REGION` call
    pub fn from_geometry(function: &GeometryFunction) -> Result<Region, ParseError> {
        let args = &function.args;
        match function.kind {
            GeometryKind::Point => {
                let coord_sys = coord_sys_of(function)?;
                let [x, y] = numbers::<2>(args)?;
                Ok(Region::position(coord_sys, x, y))
            }
            GeometryKind::Circle => {
                let (coord_sys, [x, y], rest) = centre(function)?;
                let [radius] = numbers::<1>(rest)?;
                Ok(Region::circle(coord_sys, x, y, radius))
            }
            GeometryKind::Box => {
                let (coord_sys, [x, y], rest) = centre(function)?;
                let [width, height] = numbers::<2>(rest)?;
                Ok(Region::rectangle(coord_sys, x, y, width, height))
            }
            GeometryKind::Polygon => {
                let mut coord_sys = coord_sys_of(function)?;
                let vertices = if args.first().is_some_and(|a| point_of(a).is_some()) {
                    let mut vertices = Vec::with_capacity(args.len());
                    for arg in args {
                        let point = point_of(arg).ok_or_else(|| non_numeric(arg))?;
                        let point = Region::from_geometry(point)?;
                        if function.coord_sys.is_none() && vertices.is_empty() {
                            coord_sys = point.coord_sys().copied().unwrap_or_default();
                        }
                        vertices.push(point.coordinates()[0]);
                    }
                    vertices
                } else {
                    if args.len() % 2 != 0 {
                        return Err(ParseError::new(
                            "A polygon needs an even number of coordinates!",
                            ErrorCode::E0508,
                        ));
                    }
                    args.chunks(2)
                        .map(|pair| -> Result<[f64; 2], ParseError> {
                            Ok([number(&pair[0])?, number(&pair[1])?])
                        })
                        .collect::<Result<Vec<_>, ParseError>>()?
                };
                Region::polygon(coord_sys, vertices)
            }
            GeometryKind::Region => {
                let [arg] = args.as_slice() else {
                    return Err(ParseError::new(
                        "A REGION function needs exactly one parameter!",
                        ErrorCode::E0508,
                    ));
                };
                let text = arg.as_string_literal().ok_or_else(|| {
                    ParseError::at(
                        format!("Can not convert into STC-S a non string argument: \"{arg}\"!"),
                        arg.position,
                        ErrorCode::E0505,
                    )
                })?;
                Region::parse(text).map_err(|cause| {
                    ParseError::at(
                        "Unsupported region serialization!",
                        arg.position,
                        ErrorCode::E0506,
                    )
                    .with_hint(cause.message)
                })
            }
            _ => Err(ParseError::new("Unknown region type!", ErrorCode::E0507)),
        }
    }
}

/// Parse a coordinate system argument, which must be a string literal
pub fn coord_sys_literal(operand: &Operand) -> Result<CoordSys, ParseError> {
    let text = operand.as_string_literal().ok_or_else(|| {
        ParseError::at(
            format!("A coordinate system must be a string literal: \"{operand}\" is not!"),
            operand.position,
            ErrorCode::E0404,
        )
    })?;
    CoordSys::parse(text).map_err(|e| e.or_position(operand.position))
}

fn coord_sys_of(function: &GeometryFunction) -> Result<CoordSys, ParseError> {
    match &function.coord_sys {
        Some(operand) => coord_sys_literal(operand),
        None => Ok(CoordSys::default()),
    }
}

/// Coordinate system, centre and remaining arguments of a circle or a box
fn centre(function: &GeometryFunction) -> Result<(CoordSys, [f64; 2], &[Operand]), ParseError> {
    let args = function.args.as_slice();
    match args.first().and_then(point_of) {
        Some(point) => {
            let point = Region::from_geometry(point)?;
            let coord_sys = match &function.coord_sys {
                Some(operand) => coord_sys_literal(operand)?,
                None => point.coord_sys().copied().unwrap_or_default(),
            };
            Ok((coord_sys, point.coordinates()[0], &args[1..]))
        }
        None => {
            let coord_sys = coord_sys_of(function)?;
            let [x, y] = numbers::<2>(args)?;
            Ok((coord_sys, [x, y], args.get(2..).unwrap_or_default()))
        }
    }
}

fn point_of(operand: &Operand) -> Option<&GeometryFunction> {
    match &operand.kind {
        OperandKind::Wrapped(inner) => point_of(inner),
        _ => operand.as_geometry().filter(|g| g.kind == GeometryKind::Point),
    }
}

/// The first `N` arguments as numbers, which must all be there
fn numbers<const N: usize>(args: &[Operand]) -> Result<[f64; N], ParseError> {
    if args.len() < N {
        return Err(ParseError::new(
            format!("{N} numeric parameters were expected, not {}!", args.len()),
            ErrorCode::E0508,
        ));
    }
    let mut values = [0.0; N];
    for (value, arg) in values.iter_mut().zip(args) {
        *value = number(arg)?;
    }
    Ok(values)
}

fn number(operand: &Operand) -> Result<f64, ParseError> {
    operand.as_number().ok_or_else(|| non_numeric(operand))
}

fn non_numeric(operand: &Operand) -> ParseError {
    ParseError::at(
        format!("Can not convert into STC-S a non numeric argument: \"{operand}\"!"),
        operand.position,
        ErrorCode::E0504,
    )
}

fn unknown_region(operand: &Operand) -> ParseError {
    ParseError::at("Unknown region type!", operand.position, ErrorCode::E0507)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{AdqlVersion, parse_select};
    use crate::stc::{Frame, RegionType};
    use crate::syntax::SelectItem;

    fn operand(text: &str, version: AdqlVersion) -> Operand {
        let select = parse_select(&format!("SELECT {text}"), version).unwrap();
        match select.items.into_iter().next() {
            Some(SelectItem::Expr { operand, .. }) => operand,
            other => panic!("unexpected select item: {other:?}"),
        }
    }

    fn region(text: &str, version: AdqlVersion) -> Result<Region, ParseError> {
        Region::from_operand(&operand(text, version))
    }

    #[test]
    fn test_point() {
        let r = region("POINT('ICRS', 10, -20.5)", AdqlVersion::V2_0).unwrap();
        assert_eq!(r.region_type(), RegionType::Position);
        assert_eq!(r.coordinates(), &[[10.0, -20.5]]);
        assert_eq!(r.coord_sys().unwrap().frame(), Frame::Icrs);
    }

    #[test]
    fn test_circle_forms() {
        let r = region("CIRCLE('', 1, 2, 3)", AdqlVersion::V2_0).unwrap();
        assert_eq!(r.to_dali().as_deref(), Some("1.0 2.0 3.0"));
        let r = region("CIRCLE(POINT('ICRS', 1, 2), 3)", AdqlVersion::V2_1).unwrap();
        assert_eq!(r.to_stcs(), "CIRCLE ICRS 1.0 2.0 3.0");
    }

    #[test]
    fn test_polygon_forms() {
        let r = region("POLYGON('', 0, 0, 1, 0, 1, 1)", AdqlVersion::V2_0).unwrap();
        assert_eq!(r.coordinates().len(), 3);
        let r = region("POLYGON(POINT(0, 0), POINT(1, 0), POINT(1, 1))", AdqlVersion::V2_1).unwrap();
        assert_eq!(r.coordinates(), &[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]);
    }

    #[test]
    fn test_coord_sys_must_be_literal() {
        let err = region("POINT(cs, 1, 2)", AdqlVersion::V2_0).unwrap_err();
        assert_eq!(err.code, ErrorCode::E0404);
        assert!(err.message.starts_with("A coordinate system must be a string literal"));
        let err = region("POINT('IC' || 'RS', 1, 2)", AdqlVersion::V2_0).unwrap_err();
        assert_eq!(err.code, ErrorCode::E0404);
    }

    #[test]
    fn test_coordinates_must_be_literals() {
        let err = region("POINT('', ra, 2)", AdqlVersion::V2_0).unwrap_err();
        assert_eq!(err.code, ErrorCode::E0504);
        assert!(err.message.starts_with("Can not convert into STC-S a non numeric argument"));
        assert!(region("POINT('', 1 + 1, 2)", AdqlVersion::V2_0).is_err());
    }

    #[test]
    fn test_region_function() {
        let r = region("REGION('BOX ICRS 1 2 3 4')", AdqlVersion::V2_0).unwrap();
        assert_eq!(r.region_type(), RegionType::Box);

        let err = region("REGION('BOX ICRS 1 2')", AdqlVersion::V2_0).unwrap_err();
        assert_eq!(err.code, ErrorCode::E0506);
        assert_eq!(err.message, "Unsupported region serialization!");

        let err = region("REGION(name)", AdqlVersion::V2_0).unwrap_err();
        assert_eq!(err.code, ErrorCode::E0505);
    }

    #[test]
    fn test_not_a_shape() {
        let err = region("CENTROID(CIRCLE('', 1, 2, 3))", AdqlVersion::V2_0).unwrap_err();
        assert_eq!(err.code, ErrorCode::E0507);
        assert_eq!(err.message, "Unknown region type!");
        assert!(region("ra", AdqlVersion::V2_0).is_err());
    }
}
