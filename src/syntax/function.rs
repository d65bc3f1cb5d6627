//! Function calls: math, aggregates, geometry, string/conditional/unit/type
//! functions and user defined functions

use std::fmt;

use super::{Identifier, Operand};
use crate::feature::{FeatureType, FunctionDef, LanguageFeature};

/// Any function call usable as an operand
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Function {
    Math {
        kind: MathKind,
        args: Vec<Operand>,
    },
    Aggregate {
        kind: AggregateKind,
        distinct: bool,
        /// `None` for `COUNT(*)`
        arg: Option<Operand>,
    },
    Geometry(GeometryFunction),
    Lower(Operand),
    Upper(Operand),
    Coalesce(Vec<Operand>),
    InUnit {
        value: Operand,
        unit: Operand,
    },
    Cast {
        value: Operand,
        target: CastType,
    },
    UserDefined {
        name: Identifier,
        args: Vec<Operand>,
    },
}

impl Function {
    /// Upper-case name of the function (as written for UDFs)
    pub fn name(&self) -> String {
        match self {
            Self::Math { kind, .. } => kind.name().to_string(),
            Self::Aggregate { kind, .. } => kind.name().to_string(),
            Self::Geometry(geometry) => geometry.kind.name().to_string(),
            Self::Lower(_) => "LOWER".to_string(),
            Self::Upper(_) => "UPPER".to_string(),
            Self::Coalesce(_) => "COALESCE".to_string(),
            Self::InUnit { .. } => "IN_UNIT".to_string(),
            Self::Cast { .. } => "CAST".to_string(),
            Self::UserDefined { name, .. } => name.name.to_string(),
        }
    }

    /// All operands of this call, in source order
    pub fn args(&self) -> Vec<&Operand> {
        match self {
            Self::Math { args, .. } | Self::Coalesce(args) | Self::UserDefined { args, .. } => {
                args.iter().collect()
            }
            Self::Aggregate { arg, .. } => arg.iter().collect(),
            Self::Geometry(geometry) => geometry.operands().collect(),
            Self::Lower(value) | Self::Upper(value) | Self::Cast { value, .. } => vec![value],
            Self::InUnit { value, unit } => vec![value, unit],
        }
    }

    /// Mutable access to all operands of this call, in source order
    pub fn args_mut(&mut self) -> Vec<&mut Operand> {
        match self {
            Self::Math { args, .. } | Self::Coalesce(args) | Self::UserDefined { args, .. } => {
                args.iter_mut().collect()
            }
            Self::Aggregate { arg, .. } => arg.iter_mut().collect(),
            Self::Geometry(geometry) => geometry.operands_mut().collect(),
            Self::Lower(value) | Self::Upper(value) | Self::Cast { value, .. } => vec![value],
            Self::InUnit { value, unit } => vec![value, unit],
        }
    }

    pub fn is_numeric(&self) -> bool {
        match self {
            Self::Math { .. } | Self::InUnit { .. } => true,
            Self::Aggregate { kind, arg, .. } => match kind {
                AggregateKind::Min | AggregateKind::Max => {
                    arg.as_ref().is_none_or(|a| a.is_numeric())
                }
                _ => true,
            },
            Self::Geometry(geometry) => geometry.kind.is_numeric(),
            Self::Lower(_) | Self::Upper(_) => false,
            Self::Coalesce(args) => args.iter().all(Operand::is_numeric),
            Self::Cast { target, .. } => target.is_numeric(),
            Self::UserDefined { .. } => true,
        }
    }

    pub fn is_string(&self) -> bool {
        match self {
            Self::Math { .. } | Self::InUnit { .. } => false,
            Self::Aggregate { kind, arg, .. } => match kind {
                AggregateKind::Min | AggregateKind::Max => {
                    arg.as_ref().is_some_and(|a| a.is_string())
                }
                _ => false,
            },
            Self::Geometry(geometry) => geometry.kind == GeometryKind::Coordsys,
            Self::Lower(_) | Self::Upper(_) => true,
            Self::Coalesce(args) => args.iter().all(Operand::is_string),
            Self::Cast { target, .. } => !target.is_numeric(),
            Self::UserDefined { .. } => true,
        }
    }

    pub fn is_geometry(&self) -> bool {
        match self {
            Self::Geometry(geometry) => geometry.kind.is_geometry(),
            Self::Coalesce(args) => args.iter().all(Operand::is_geometry),
            Self::UserDefined { .. } => true,
            _ => false,
        }
    }

    /// The optional language feature this call requires, if any
    pub fn feature(&self) -> Option<LanguageFeature> {
        let (feature_type, form) = match self {
            Self::Math { .. } | Self::Aggregate { .. } => return None,
            Self::Geometry(geometry) => (FeatureType::AdqlGeo, geometry.kind.name()),
            Self::Lower(_) => (FeatureType::AdqlString, "LOWER"),
            Self::Upper(_) => (FeatureType::AdqlString, "UPPER"),
            Self::Coalesce(_) => (FeatureType::AdqlConditional, "COALESCE"),
            Self::InUnit { .. } => (FeatureType::AdqlUnit, "IN_UNIT"),
            Self::Cast { .. } => (FeatureType::AdqlType, "CAST"),
            Self::UserDefined { name, args } => {
                return Some(LanguageFeature::udf(FunctionDef::from_call(
                    &name.name,
                    args.len(),
                )));
            }
        };
        Some(LanguageFeature::standard(feature_type, form))
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Math { kind, args } => write!(f, "{}({})", kind.name(), join(args)),
            Self::Aggregate {
                kind,
                distinct,
                arg,
            } => {
                write!(f, "{}(", kind.name())?;
                if *distinct {
                    f.write_str("DISTINCT ")?;
                }
                match arg {
                    Some(arg) => write!(f, "{arg})"),
                    None => f.write_str("*)"),
                }
            }
            Self::Geometry(geometry) => write!(f, "{geometry}"),
            Self::Lower(value) => write!(f, "LOWER({value})"),
            Self::Upper(value) => write!(f, "UPPER({value})"),
            Self::Coalesce(args) => write!(f, "COALESCE({})", join(args)),
            Self::InUnit { value, unit } => write!(f, "IN_UNIT({value}, {unit})"),
            Self::Cast { value, target } => write!(f, "CAST({value} AS {target})"),
            Self::UserDefined { name, args } => write!(f, "{name}({})", join(args)),
        }
    }
}

pub(crate) fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Mathematical and trigonometric functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MathKind {
    Abs,
    Ceiling,
    Degrees,
    Exp,
    Floor,
    Log,
    Log10,
    Mod,
    Pi,
    Power,
    Radians,
    Rand,
    Round,
    Sqrt,
    Truncate,
    Acos,
    Asin,
    Atan,
    Atan2,
    Cos,
    Cot,
    Sin,
    Tan,
}

impl MathKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Abs => "ABS",
            Self::Ceiling => "CEILING",
            Self::Degrees => "DEGREES",
            Self::Exp => "EXP",
            Self::Floor => "FLOOR",
            Self::Log => "LOG",
            Self::Log10 => "LOG10",
            Self::Mod => "MOD",
            Self::Pi => "PI",
            Self::Power => "POWER",
            Self::Radians => "RADIANS",
            Self::Rand => "RAND",
            Self::Round => "ROUND",
            Self::Sqrt => "SQRT",
            Self::Truncate => "TRUNCATE",
            Self::Acos => "ACOS",
            Self::Asin => "ASIN",
            Self::Atan => "ATAN",
            Self::Atan2 => "ATAN2",
            Self::Cos => "COS",
            Self::Cot => "COT",
            Self::Sin => "SIN",
            Self::Tan => "TAN",
        }
    }

    /// Minimum and maximum number of parameters
    pub fn arity(self) -> (usize, usize) {
        match self {
            Self::Pi => (0, 0),
            Self::Rand => (0, 1),
            Self::Round | Self::Truncate => (1, 2),
            Self::Mod | Self::Power | Self::Atan2 => (2, 2),
            _ => (1, 1),
        }
    }
}

/// SQL aggregate functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AggregateKind {
    Count,
    Avg,
    Max,
    Min,
    Sum,
}

impl AggregateKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Count => "COUNT",
            Self::Avg => "AVG",
            Self::Max => "MAX",
            Self::Min => "MIN",
            Self::Sum => "SUM",
        }
    }
}

/// Target of a `CAST`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CastType {
    SmallInt,
    Integer,
    BigInt,
    Real,
    DoublePrecision,
    Char(Option<u32>),
    VarChar(Option<u32>),
    Timestamp,
}

impl CastType {
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::SmallInt | Self::Integer | Self::BigInt | Self::Real | Self::DoublePrecision
        )
    }
}

impl fmt::Display for CastType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SmallInt => f.write_str("SMALLINT"),
            Self::Integer => f.write_str("INTEGER"),
            Self::BigInt => f.write_str("BIGINT"),
            Self::Real => f.write_str("REAL"),
            Self::DoublePrecision => f.write_str("DOUBLE PRECISION"),
            Self::Char(None) => f.write_str("CHAR"),
            Self::Char(Some(n)) => write!(f, "CHAR({n})"),
            Self::VarChar(None) => f.write_str("VARCHAR"),
            Self::VarChar(Some(n)) => write!(f, "VARCHAR({n})"),
            Self::Timestamp => f.write_str("TIMESTAMP"),
        }
    }
}

/// Geometry functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GeometryKind {
    Area,
    Box,
    Centroid,
    Circle,
    Contains,
    Coord1,
    Coord2,
    Coordsys,
    Distance,
    Intersects,
    Point,
    Polygon,
    Region,
}

impl GeometryKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Area => "AREA",
            Self::Box => "BOX",
            Self::Centroid => "CENTROID",
            Self::Circle => "CIRCLE",
            Self::Contains => "CONTAINS",
            Self::Coord1 => "COORD1",
            Self::Coord2 => "COORD2",
            Self::Coordsys => "COORDSYS",
            Self::Distance => "DISTANCE",
            Self::Intersects => "INTERSECTS",
            Self::Point => "POINT",
            Self::Polygon => "POLYGON",
            Self::Region => "REGION",
        }
    }

    /// Functions building a shape from a coordinate system and coordinates
    pub fn is_shape(self) -> bool {
        matches!(self, Self::Point | Self::Circle | Self::Box | Self::Polygon)
    }

    pub fn is_geometry(self) -> bool {
        self.is_shape() || matches!(self, Self::Region | Self::Centroid)
    }

    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Area
                | Self::Coord1
                | Self::Coord2
                | Self::Distance
                | Self::Contains
                | Self::Intersects
        )
    }
}

/// A geometry function call
///
/// For shapes (`POINT`, `CIRCLE`, `BOX`, `POLYGON`) the coordinate system
/// is kept apart from the other arguments. It is always present in ADQL 2.0
/// and optional in ADQL 2.1.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeometryFunction {
    pub kind: GeometryKind,
    pub coord_sys: Option<Box<Operand>>,
    pub args: Vec<Operand>,
}

impl GeometryFunction {
    pub fn new(kind: GeometryKind, coord_sys: Option<Operand>, args: Vec<Operand>) -> Self {
        Self {
            kind,
            coord_sys: coord_sys.map(Box::new),
            args,
        }
    }

    /// Coordinate system followed by the other arguments
    pub fn operands(&self) -> impl Iterator<Item = &Operand> {
        self.coord_sys.iter().map(|c| c.as_ref()).chain(self.args.iter())
    }

    pub fn operands_mut(&mut self) -> impl Iterator<Item = &mut Operand> {
        self.coord_sys
            .iter_mut()
            .map(|c| c.as_mut())
            .chain(self.args.iter_mut())
    }
}

impl fmt::Display for GeometryFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operands: Vec<String> = self.operands().map(ToString::to_string).collect();
        write!(f, "{}({})", self.kind.name(), operands.join(", "))
    }
}
