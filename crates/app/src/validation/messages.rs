//! Message tables

use super::ConstraintKind;

const FALLBACK_SUFFIX: &str = "is invalid";

/// Maps constraint kinds to the suffix appended after the field name.
#[derive(Debug, Clone, Copy)]
pub struct MessageTable(&'static [(ConstraintKind, &'static str)]);

impl MessageTable {
    #[must_use]
    pub const fn new(entries: &'static [(ConstraintKind, &'static str)]) -> Self {
        Self(entries)
    }

    #[must_use]
    pub fn suffix(&self, kind: ConstraintKind) -> &'static str {
        self.0
            .iter()
            .find_map(|(entry, suffix)| (*entry == kind).then_some(*suffix))
            .unwrap_or(FALLBACK_SUFFIX)
    }
}

pub const USER_MESSAGES: MessageTable = MessageTable::new(&[
    (ConstraintKind::Required, "is required"),
    (ConstraintKind::Email, "is not valid"),
    (ConstraintKind::OneOf, "must be either 'admin' or 'client'"),
]);

pub const PRODUCT_MESSAGES: MessageTable = MessageTable::new(&[
    (ConstraintKind::Required, "is required"),
    (ConstraintKind::Gt, "must be greater than 0"),
    (ConstraintKind::Gte, "must be greater than or equal to 0"),
]);

pub const ORDER_MESSAGES: MessageTable = MessageTable::new(&[
    (ConstraintKind::Required, "is required"),
    (ConstraintKind::Gt, "must be greater than 0"),
]);
