//! Coordinate systems and regions
//!
//! - [`CoordSys`]: `[frame] [refpos] [flavor]` triples and their STC-S form
//! - [`CoordSysPolicy`]: the coordinate systems a service accepts
//! - [`Region`]: shapes and combinations of shapes, parsed from and
//!   serialised to STC-S or DALI, or built from geometry function calls
//!
//! Every failure is a [`ParseError`](crate::parser::ParseError) with an
//! `E04xx` (coordinate system) or `E05xx` (region) code.

mod coord_sys;
mod from_ast;
mod number;
mod policy;
mod region;
mod stcs;

pub use coord_sys::{CoordSys, Flavor, Frame, RefPos};
pub use from_ast::coord_sys_literal;
pub use policy::CoordSysPolicy;
pub use region::{Region, RegionType};

pub(crate) use number::format_number;
