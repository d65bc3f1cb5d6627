//! REGION argument pass
//!
//! Only run when `REGION` is supported and the extended region parameter
//! mode is off. The argument of every `REGION(...)` must then be a string
//! literal holding an STC-S or DALI region whose shapes are all supported,
//! and whose coordinate systems pass the policy.

use super::features::unsupported_feature;
use crate::feature::FeatureSet;
use crate::parser::{ErrorCode, ParseError};
use crate::stc::{CoordSysPolicy, Region};
use crate::syntax::{GeometryKind, Operand, Walk, search_operands};

pub fn check_regions<W: Walk + ?Sized>(
    root: &W,
    features: &FeatureSet,
    policy: Option<&CoordSysPolicy>,
) -> Vec<ParseError> {
    let mut errors = Vec::new();
    let calls = search_operands(root, |operand| {
        operand
            .as_geometry()
            .is_some_and(|g| g.kind == GeometryKind::Region)
    });
    for call in calls {
        match Region::from_operand(call) {
            Ok(region) => check_region(&region, call, features, policy, &mut errors),
            Err(err) => errors.push(err.or_position(call.position)),
        }
    }
    errors
}

fn check_region(
    region: &Region,
    call: &Operand,
    features: &FeatureSet,
    policy: Option<&CoordSysPolicy>,
    errors: &mut Vec<ParseError>,
) {
    for part in region.walk() {
        let unsupported = part
            .region_type()
            .feature()
            .filter(|feature| !features.is_supporting(feature));
        if let Some(feature) = unsupported {
            let cause = unsupported_feature(&feature, call.position);
            errors.push(
                ParseError::at(
                    format!("Unsupported STC-S region type: \"{}\"!", part.region_type()),
                    call.position,
                    ErrorCode::E0503,
                )
                .with_hint(cause.message),
            );
        }
        if let (Some(policy), Some(coord_sys)) = (policy, part.coord_sys()) {
            if let Err(err) = policy.check(&coord_sys.to_stcs(), coord_sys) {
                errors.push(err.or_position(call.position));
            }
        }
    }
}
