//! Regions: positions, shapes and their combinations

use std::fmt;
use std::str::FromStr;

use super::CoordSys;
use super::number::format_number;
use crate::feature::{FeatureType, LanguageFeature};
use crate::parser::{ErrorCode, ParseError};

/// Kind of a [`Region`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RegionType {
    Position,
    Circle,
    Box,
    Polygon,
    Union,
    Intersection,
    Not,
}

impl RegionType {
    /// STC-S keyword
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Position => "POSITION",
            Self::Circle => "CIRCLE",
            Self::Box => "BOX",
            Self::Polygon => "POLYGON",
            Self::Union => "UNION",
            Self::Intersection => "INTERSECTION",
            Self::Not => "NOT",
        }
    }

    /// Case-insensitive lookup of an STC-S keyword
    pub fn from_keyword(word: &str) -> Option<Self> {
        [
            Self::Position,
            Self::Circle,
            Self::Box,
            Self::Polygon,
            Self::Union,
            Self::Intersection,
            Self::Not,
        ]
        .into_iter()
        .find(|t| t.keyword().eq_ignore_ascii_case(word))
    }

    /// Expected STC-S syntax, for error messages
    pub fn syntax(self) -> &'static str {
        match self {
            Self::Position => "POSITION <coordsys> <coordPair>",
            Self::Circle => "CIRCLE <coordsys> <coordPair> <radius>",
            Self::Box => "BOX <coordsys> <coordPair> <width> <height>",
            Self::Polygon => "POLYGON <coordsys> <coordPair> <coordPair> <coordPair> [<coordPair> ...]",
            Self::Union => "UNION <coordsys> ( <region> <region> [<region> ...] )",
            Self::Intersection => "INTERSECTION <coordsys> ( <region> <region> [<region> ...] )",
            Self::Not => "NOT ( <region> )",
        }
    }

    /// The geometry function a region of this type needs in a query
    ///
    /// `None` for combinations, which only need their members.
    pub fn feature(self) -> Option<LanguageFeature> {
        let form = match self {
            Self::Position => "POINT",
            Self::Circle => "CIRCLE",
            Self::Box => "BOX",
            Self::Polygon => "POLYGON",
            Self::Union | Self::Intersection | Self::Not => return None,
        };
        Some(LanguageFeature::standard(FeatureType::AdqlGeo, form))
    }
}

impl fmt::Display for RegionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A region, serialisable in STC-S and, for simple shapes, in DALI
///
/// Only the fields of the region type are set: numbers that do not apply
/// are `NaN`, and a `NOT` has no coordinate system. Two regions are equal
/// when their fields are, `NaN` being equal to `NaN`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Region {
    region_type: RegionType,
    coord_sys: Option<CoordSys>,
    coordinates: Vec<[f64; 2]>,
    radius: f64,
    width: f64,
    height: f64,
    regions: Vec<Region>,
}

impl Region {
    fn shape(region_type: RegionType, coord_sys: CoordSys, coordinates: Vec<[f64; 2]>) -> Self {
        Self {
            region_type,
            coord_sys: Some(coord_sys),
            coordinates,
            radius: f64::NAN,
            width: f64::NAN,
            height: f64::NAN,
            regions: Vec::new(),
        }
    }

    pub fn position(coord_sys: CoordSys, x: f64, y: f64) -> Self {
        Self::shape(RegionType::Position, coord_sys, vec![[x, y]])
    }

    pub fn circle(coord_sys: CoordSys, x: f64, y: f64, radius: f64) -> Self {
        Self {
            radius,
            ..Self::shape(RegionType::Circle, coord_sys, vec![[x, y]])
        }
    }

    pub fn rectangle(coord_sys: CoordSys, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::shape(RegionType::Box, coord_sys, vec![[x, y]])
        }
    }

    pub fn polygon(coord_sys: CoordSys, vertices: Vec<[f64; 2]>) -> Result<Self, ParseError> {
        if vertices.len() < 3 {
            return Err(ParseError::new(
                format!(
                    "A polygon must have at least 3 vertices, not {}!",
                    vertices.len()
                ),
                ErrorCode::E0508,
            ));
        }
        Ok(Self::shape(RegionType::Polygon, coord_sys, vertices))
    }

    pub fn union(coord_sys: CoordSys, regions: Vec<Region>) -> Result<Self, ParseError> {
        Self::combination(RegionType::Union, coord_sys, regions)
    }

    pub fn intersection(coord_sys: CoordSys, regions: Vec<Region>) -> Result<Self, ParseError> {
        Self::combination(RegionType::Intersection, coord_sys, regions)
    }

    fn combination(
        region_type: RegionType,
        coord_sys: CoordSys,
        regions: Vec<Region>,
    ) -> Result<Self, ParseError> {
        if regions.len() < 2 {
            return Err(ParseError::new(
                format!(
                    "A {region_type} must contain at least 2 regions, not {}!",
                    regions.len()
                ),
                ErrorCode::E0508,
            ));
        }
        Ok(Self {
            regions,
            ..Self::shape(region_type, coord_sys, Vec::new())
        })
    }

    pub fn negation(region: Region) -> Self {
        Self {
            region_type: RegionType::Not,
            coord_sys: None,
            coordinates: Vec::new(),
            radius: f64::NAN,
            width: f64::NAN,
            height: f64::NAN,
            regions: vec![region],
        }
    }

    /// Parse an STC-S or a DALI region
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        super::stcs::parse_region(text)
    }

    pub fn region_type(&self) -> RegionType {
        self.region_type
    }

    pub fn coord_sys(&self) -> Option<&CoordSys> {
        self.coord_sys.as_ref()
    }

    pub fn coordinates(&self) -> &[[f64; 2]] {
        &self.coordinates
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// This region and all the regions it is made of, depth first
    pub fn walk(&self) -> Vec<&Region> {
        let mut all = vec![self];
        for region in &self.regions {
            all.extend(region.walk());
        }
        all
    }

    pub fn to_stcs(&self) -> String {
        let mut out = String::from(self.region_type.keyword());
        if let Some(coord_sys) = self.coord_sys.filter(|c| !c.is_default()) {
            out.push(' ');
            out.push_str(&coord_sys.to_stcs());
        }
        match self.region_type {
            RegionType::Union | RegionType::Intersection | RegionType::Not => {
                out.push_str(" (");
                for region in &self.regions {
                    out.push(' ');
                    out.push_str(&region.to_stcs());
                }
                out.push_str(" )");
            }
            _ => {
                out.push(' ');
                out.push_str(&self.numbers());
            }
        }
        out
    }

    /// DALI form, for points, circles and polygons in the default system
    pub fn to_dali(&self) -> Option<String> {
        let simple = matches!(
            self.region_type,
            RegionType::Position | RegionType::Circle | RegionType::Polygon
        );
        let default_system = self.coord_sys.is_none_or(|c| c.is_default());
        (simple && default_system).then(|| self.numbers())
    }

    fn numbers(&self) -> String {
        let mut numbers: Vec<f64> = self.coordinates.iter().flatten().copied().collect();
        match self.region_type {
            RegionType::Circle => numbers.push(self.radius),
            RegionType::Box => numbers.extend([self.width, self.height]),
            _ => {}
        }
        numbers
            .into_iter()
            .map(format_number)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl PartialEq for Region {
    fn eq(&self, other: &Self) -> bool {
        let same = |a: f64, b: f64| a == b || (a.is_nan() && b.is_nan());
        self.region_type == other.region_type
            && self.coord_sys == other.coord_sys
            && self.coordinates == other.coordinates
            && same(self.radius, other.radius)
            && same(self.width, other.width)
            && same(self.height, other.height)
            && self.regions == other.regions
    }
}

impl FromStr for Region {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// DALI when possible, STC-S otherwise
impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_dali() {
            Some(dali) => f.write_str(&dali),
            None => f.write_str(&self.to_stcs()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn icrs() -> CoordSys {
        CoordSys::parse("ICRS").unwrap()
    }

    #[test]
    fn test_irrelevant_fields() {
        let point = Region::position(CoordSys::default(), 10.0, 20.0);
        assert_eq!(point.coordinates(), &[[10.0, 20.0]]);
        assert!(point.radius().is_nan());
        assert!(point.width().is_nan() && point.height().is_nan());
        assert!(point.regions().is_empty());

        let not = Region::negation(point);
        assert!(not.coord_sys().is_none());
        assert!(not.coordinates().is_empty());
        assert!(not.radius().is_nan());
        assert_eq!(not.regions().len(), 1);
    }

    #[test]
    fn test_to_stcs() {
        let circle = Region::circle(icrs(), 1.0, 2.0, 0.5);
        assert_eq!(circle.to_stcs(), "CIRCLE ICRS 1.0 2.0 0.5");
        let rect = Region::rectangle(CoordSys::default(), 1.0, -2.3, 3.0, 4.0);
        assert_eq!(rect.to_stcs(), "BOX 1.0 -2.3 3.0 4.0");
        let union = Region::union(icrs(), vec![circle.clone(), rect]).unwrap();
        assert_eq!(
            union.to_stcs(),
            "UNION ICRS ( CIRCLE ICRS 1.0 2.0 0.5 BOX 1.0 -2.3 3.0 4.0 )"
        );
        assert_eq!(
            Region::negation(circle).to_stcs(),
            "NOT ( CIRCLE ICRS 1.0 2.0 0.5 )"
        );
    }

    #[test]
    fn test_to_dali() {
        let circle = Region::circle(CoordSys::default(), 1.0, 2.0, 0.5);
        assert_eq!(circle.to_dali().as_deref(), Some("1.0 2.0 0.5"));
        assert_eq!(circle.to_string(), "1.0 2.0 0.5");

        assert_eq!(Region::circle(icrs(), 1.0, 2.0, 0.5).to_dali(), None);
        assert_eq!(
            Region::rectangle(CoordSys::default(), 1.0, 2.0, 3.0, 4.0).to_dali(),
            None
        );
        let rect = Region::rectangle(CoordSys::default(), 1.0, 2.0, 3.0, 4.0);
        assert_eq!(rect.to_string(), "BOX 1.0 2.0 3.0 4.0");
    }

    #[test]
    fn test_constructor_errors() {
        let err = Region::polygon(CoordSys::default(), vec![[0.0, 0.0], [1.0, 1.0]]).unwrap_err();
        assert_eq!(err.code, ErrorCode::E0508);
        let point = Region::position(CoordSys::default(), 0.0, 0.0);
        assert!(Region::union(CoordSys::default(), vec![point]).is_err());
    }

    #[test]
    fn test_equality_ignores_unused_fields() {
        let point = Region::position(icrs(), 1.0, 2.0);
        assert_eq!(point, point.clone());
        assert_ne!(point, Region::position(CoordSys::default(), 1.0, 2.0));
    }

    #[test]
    fn test_walk() {
        let a = Region::position(CoordSys::default(), 0.0, 0.0);
        let b = Region::circle(CoordSys::default(), 0.0, 0.0, 1.0);
        let union = Region::union(CoordSys::default(), vec![a, Region::negation(b)]).unwrap();
        let types: Vec<_> = union.walk().iter().map(|r| r.region_type()).collect();
        assert_eq!(
            types,
            vec![
                RegionType::Union,
                RegionType::Position,
                RegionType::Not,
                RegionType::Circle
            ]
        );
    }
}
