//! PostgreSQL with pgSphere
//!
//! ADQL angles are degrees while pgSphere works in radians: every angle is
//! converted on the way in and on the way out. Coordinate systems are
//! ignored, pgSphere has no notion of them.

use super::{SqlTranslator, TranslationError, TranslationResult, comparison};
use crate::stc::{Region, RegionType, format_number};
use crate::syntax::{ComparisonOp, GeometryFunction, GeometryKind, Operand};

#[derive(Debug, Clone, Copy, Default)]
pub struct PgSphereTranslator;

impl PgSphereTranslator {
    pub fn new() -> Self {
        Self
    }

    fn point(&self, x: &Operand, y: &Operand) -> TranslationResult {
        Ok(format!(
            "spoint(RADIANS({}), RADIANS({}))",
            self.translate_operand(x)?,
            self.translate_operand(y)?
        ))
    }

    fn circle(&self, center: String, radius: &Operand) -> TranslationResult {
        Ok(format!("scircle({center}, RADIANS({}))", self.translate_operand(radius)?))
    }

    fn polygon(&self, vertices: Vec<String>) -> String {
        let vertices = vertices.join(" || ',' || ");
        format!("spoly('{{' || {vertices} || '}}')")
    }

    /// `a @ b` or `a && b`, for CONTAINS and INTERSECTS
    fn predicate(&self, geometry: &GeometryFunction) -> Option<TranslationResult> {
        let symbol = match geometry.kind {
            GeometryKind::Contains => "@",
            GeometryKind::Intersects => "&&",
            _ => return None,
        };
        let [left, right] = geometry.args.as_slice() else {
            return Some(Err(unsupported(geometry)));
        };
        Some(
            self.translate_operand(left)
                .and_then(|left| Ok(format!("{left} {symbol} {}", self.translate_operand(right)?))),
        )
    }

    fn region(&self, region: &Region) -> TranslationResult {
        let degrees = |[x, y]: [f64; 2]| format!("({}d,{}d)", format_number(x), format_number(y));
        let coordinates = region.coordinates();
        match (region.region_type(), coordinates) {
            (RegionType::Position, [center]) => Ok(format!("spoint '{}'", degrees(*center))),
            (RegionType::Circle, [center]) => Ok(format!(
                "scircle '<{},{}d>'",
                degrees(*center),
                format_number(region.radius())
            )),
            (RegionType::Box, [[x, y]]) => {
                let (dx, dy) = (region.width() / 2.0, region.height() / 2.0);
                Ok(format!(
                    "sbox '({},{})'",
                    degrees([x - dx, y - dy]),
                    degrees([x + dx, y + dy])
                ))
            }
            (RegionType::Polygon, vertices) => {
                let vertices: Vec<String> = vertices.iter().copied().map(degrees).collect();
                Ok(format!("spoly '{{{}}}'", vertices.join(",")))
            }
            (other, _) => Err(TranslationError::unsupported(format!(
                "a {other} region"
            ))),
        }
    }
}

impl SqlTranslator for PgSphereTranslator {
    fn translate_geometry(&self, geometry: &GeometryFunction) -> TranslationResult {
        let args = geometry.args.as_slice();
        match (geometry.kind, args) {
            (GeometryKind::Point, [x, y]) => self.point(x, y),

            (GeometryKind::Circle, [center, radius]) => {
                self.circle(self.translate_operand(center)?, radius)
            }
            (GeometryKind::Circle, [x, y, radius]) => self.circle(self.point(x, y)?, radius),

            (GeometryKind::Box, [x, y, width, height]) => {
                let (x, y) = (self.translate_operand(x)?, self.translate_operand(y)?);
                let (w, h) = (self.translate_operand(width)?, self.translate_operand(height)?);
                Ok(format!(
                    "sbox(spoint(RADIANS(({x}) - ({w}) / 2), RADIANS(({y}) - ({h}) / 2)), \
                     spoint(RADIANS(({x}) + ({w}) / 2), RADIANS(({y}) + ({h}) / 2)))"
                ))
            }
            (GeometryKind::Box, [center, width, height]) => {
                let c = self.translate_operand(center)?;
                let (w, h) = (self.translate_operand(width)?, self.translate_operand(height)?);
                Ok(format!(
                    "sbox(spoint(long({c}) - RADIANS({w}) / 2, lat({c}) - RADIANS({h}) / 2), \
                     spoint(long({c}) + RADIANS({w}) / 2, lat({c}) + RADIANS({h}) / 2))"
                ))
            }

            (GeometryKind::Polygon, _) if is_coordinate_list(args) => {
                let vertices = args
                    .chunks(2)
                    .map(|pair| match pair {
                        [x, y] => self.point(x, y),
                        _ => Err(unsupported(geometry)),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(self.polygon(vertices))
            }
            (GeometryKind::Polygon, _) => {
                let vertices = args
                    .iter()
                    .map(|vertex| self.translate_operand(vertex))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(self.polygon(vertices))
            }

            (GeometryKind::Contains | GeometryKind::Intersects, _) => {
                let predicate = self.predicate(geometry).unwrap_or_else(|| Err(unsupported(geometry)))?;
                Ok(format!("CAST(({predicate}) AS INTEGER)"))
            }

            (GeometryKind::Distance, [p1, p2]) => Ok(format!(
                "DEGREES({} <-> {})",
                self.translate_operand(p1)?,
                self.translate_operand(p2)?
            )),
            (GeometryKind::Distance, [x1, y1, x2, y2]) => Ok(format!(
                "DEGREES({} <-> {})",
                self.point(x1, y1)?,
                self.point(x2, y2)?
            )),

            // steradians to square degrees
            (GeometryKind::Area, [shape]) => {
                Ok(format!("DEGREES(DEGREES(area({})))", self.translate_operand(shape)?))
            }
            (GeometryKind::Centroid, [shape]) => {
                Ok(format!("center({})", self.translate_operand(shape)?))
            }
            (GeometryKind::Coord1, [point]) => {
                Ok(format!("DEGREES(long({}))", self.translate_operand(point)?))
            }
            (GeometryKind::Coord2, [point]) => {
                Ok(format!("DEGREES(lat({}))", self.translate_operand(point)?))
            }

            (GeometryKind::Region, [argument]) => match argument.as_string_literal() {
                Some(text) => self.region(&Region::parse(text)?),
                None => Err(TranslationError::unsupported(
                    "a REGION whose argument is not a string literal",
                )),
            },

            _ => Err(unsupported(geometry)),
        }
    }

    /// `CONTAINS(a, b) = 1` and the like become `a @ b`, so that pgSphere
    /// indexes can be used
    fn translate_comparison(&self, left: &Operand, op: ComparisonOp, right: &Operand) -> TranslationResult {
        let (call, value) = match (left.as_geometry(), right.as_geometry()) {
            (Some(call), _) if is_predicate(call) => (call, right),
            (_, Some(call)) if is_predicate(call) => (call, left),
            _ => return comparison(self, left, op, right),
        };
        let holds = match (op, value.as_number()) {
            (ComparisonOp::Eq, Some(n)) | (ComparisonOp::NotEq, Some(n)) if n == 0.0 || n == 1.0 => {
                (op == ComparisonOp::Eq) == (n == 1.0)
            }
            _ => return comparison(self, left, op, right),
        };
        let predicate = self.predicate(call).unwrap_or_else(|| Err(unsupported(call)))?;
        Ok(if holds { predicate } else { format!("NOT ({predicate})") })
    }
}

fn is_predicate(geometry: &GeometryFunction) -> bool {
    matches!(geometry.kind, GeometryKind::Contains | GeometryKind::Intersects)
}

/// `POLYGON(x1, y1, x2, y2, ...)` rather than `POLYGON(p1, p2, ...)`
fn is_coordinate_list(args: &[Operand]) -> bool {
    args.len() >= 6 && args.len() % 2 == 0 && args.iter().all(|arg| arg.as_geometry().is_none())
}

fn unsupported(geometry: &GeometryFunction) -> TranslationError {
    TranslationError::unsupported(format!("{geometry}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{AdqlVersion, parse_query};

    fn translate(query: &str, version: AdqlVersion) -> TranslationResult {
        let query = parse_query(query, version).unwrap();
        PgSphereTranslator::new().translate(&query)
    }

    #[test]
    fn test_contains_comparison_uses_operator() {
        let sql = translate(
            "SELECT id FROM t WHERE CONTAINS(POINT('ICRS', ra, dec), CIRCLE('ICRS', 10, 20, 1)) = 1",
            AdqlVersion::V2_0,
        )
        .unwrap();
        assert_eq!(
            sql,
            "SELECT id\nFROM t\nWHERE spoint(RADIANS(ra), RADIANS(dec)) @ \
             scircle(spoint(RADIANS(10), RADIANS(20)), RADIANS(1))"
        );
    }

    #[test]
    fn test_negated_intersects() {
        let sql = translate(
            "SELECT id FROM t WHERE 0 = INTERSECTS(POINT(ra, dec), CIRCLE(1, 2, 3))",
            AdqlVersion::V2_1,
        )
        .unwrap();
        assert!(sql.ends_with("WHERE NOT (spoint(RADIANS(ra), RADIANS(dec)) && scircle(spoint(RADIANS(1), RADIANS(2)), RADIANS(3)))"));
    }

    #[test]
    fn test_contains_as_value() {
        let sql = translate(
            "SELECT CONTAINS(POINT(ra, dec), CIRCLE(1, 2, 3)) AS inside FROM t",
            AdqlVersion::V2_1,
        )
        .unwrap();
        assert!(sql.starts_with("SELECT CAST((spoint(RADIANS(ra), RADIANS(dec)) @ "));
        assert!(sql.contains(") AS INTEGER) AS inside"));
    }

    #[test]
    fn test_distance_in_degrees() {
        let sql = translate("SELECT DISTANCE(ra, dec, 1, 2) FROM t", AdqlVersion::V2_1).unwrap();
        assert_eq!(
            sql,
            "SELECT DEGREES(spoint(RADIANS(ra), RADIANS(dec)) <-> spoint(RADIANS(1), RADIANS(2)))\nFROM t"
        );
    }

    #[test]
    fn test_polygon_of_coordinates() {
        let sql = translate("SELECT POLYGON(1, 2, 3, 4, 5, 6) FROM t", AdqlVersion::V2_1).unwrap();
        assert_eq!(
            sql,
            "SELECT spoly('{' || spoint(RADIANS(1), RADIANS(2)) || ',' || spoint(RADIANS(3), RADIANS(4)) \
             || ',' || spoint(RADIANS(5), RADIANS(6)) || '}')\nFROM t"
        );
    }

    #[test]
    fn test_region_literal() {
        let sql = translate(
            "SELECT id FROM t WHERE CONTAINS(POINT('', ra, dec), REGION('CIRCLE ICRS 10 20 0.5')) = 1",
            AdqlVersion::V2_0,
        )
        .unwrap();
        assert!(sql.ends_with("@ scircle '<(10.0d,20.0d),0.5d>'"));
    }

    #[test]
    fn test_combined_region_is_rejected() {
        let err = translate(
            "SELECT REGION('UNION (CIRCLE 1 2 3 CIRCLE 4 5 6)') FROM t",
            AdqlVersion::V2_0,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Impossible to translate a UNION region into SQL!");
    }

    #[test]
    fn test_coordsys_is_rejected() {
        let err = translate("SELECT COORDSYS(pos) FROM t", AdqlVersion::V2_0).unwrap_err();
        assert!(matches!(err, TranslationError::Unsupported { .. }));
    }
}
