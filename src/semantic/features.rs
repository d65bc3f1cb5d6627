//! Optional language feature pass

use crate::base::TextPosition;
use crate::feature::{FeatureSet, LanguageFeature};
use crate::parser::{ErrorCode, ParseError};
use crate::syntax::visitor::{walk_body, walk_constraint, walk_operand};
use crate::syntax::{Constraint, Offset, Operand, SetOperation, Walk, WithItem, Visitor};

/// Every use of an optional feature the set does not support
///
/// UDFs are all accepted when `allow_any_udf` is set, declared or not.
pub fn check_features<W: Walk + ?Sized>(
    root: &W,
    features: &FeatureSet,
    allow_any_udf: bool,
) -> Vec<ParseError> {
    let mut collector = FeatureUses::default();
    root.walk(&mut collector);
    collector
        .uses
        .into_iter()
        .filter(|(feature, _)| !(allow_any_udf && feature.is_udf()))
        .filter(|(feature, _)| !features.is_supporting(feature))
        .map(|(feature, position)| unsupported_feature(&feature, position))
        .collect()
}

pub(crate) fn unsupported_feature(
    feature: &LanguageFeature,
    position: Option<TextPosition>,
) -> ParseError {
    let feature_type = feature
        .feature_type()
        .map(|t| t.ivoid())
        .unwrap_or_default();
    ParseError::at(
        format!(
            "Unsupported ADQL feature: \"{}\" (of type '{feature_type}')!",
            feature.form()
        ),
        position,
        ErrorCode::E0301,
    )
}

/// Features used by a tree, in document order
#[derive(Default)]
struct FeatureUses {
    uses: Vec<(LanguageFeature, Option<TextPosition>)>,
}

impl<'ast> Visitor<'ast> for FeatureUses {
    fn visit_with_item(&mut self, item: &'ast WithItem) {
        self.uses.push((item.feature(), item.position));
        self.visit_query(&item.query);
    }

    fn visit_set_operation(&mut self, set: &'ast SetOperation) {
        walk_body(self, &set.left);
        self.uses.push((set.feature(), set.position));
        walk_body(self, &set.right);
        for item in &set.order_by {
            self.visit_order_item(item);
        }
        if let Some(offset) = &set.offset {
            self.visit_offset(offset);
        }
    }

    fn visit_constraint(&mut self, constraint: &'ast Constraint) {
        if let Some(feature) = constraint.feature() {
            self.uses.push((feature, constraint.position));
        }
        walk_constraint(self, constraint);
    }

    fn visit_offset(&mut self, offset: &'ast Offset) {
        self.uses.push((offset.feature(), offset.position));
    }

    fn visit_operand(&mut self, operand: &'ast Operand) {
        if let Some(feature) = operand.feature() {
            self.uses.push((feature, operand.position));
        }
        walk_operand(self, operand);
    }
}
