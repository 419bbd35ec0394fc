//! Declarative payload validation.
//!
//! Each payload type declares a static rule table (field name to constraints)
//! and a message table mapping constraint kinds to human readable suffixes.
//! [`validate`] walks the rule table and reports the first failing constraint
//! of every field as `"<field> <suffix>"`.

use std::fmt::{Display, Formatter, Result as FmtResult};

use validator::ValidateEmail;

mod messages;

pub use messages::*;

/// Kind of constraint, used as the key into a [`MessageTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Required,
    Gt,
    Gte,
    OneOf,
    Email,
}

impl ConstraintKind {
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::OneOf => "oneof",
            Self::Email => "email",
        }
    }
}

/// A single field constraint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constraint {
    /// Value must be present and non-empty.
    Required,

    /// Number must be strictly greater than the bound.
    Gt(f64),

    /// Number must be greater than or equal to the bound.
    Gte(f64),

    /// Text must be one of the listed values.
    OneOf(&'static [&'static str]),

    /// Text must look like an email address.
    Email,
}

impl Constraint {
    #[must_use]
    pub const fn kind(&self) -> ConstraintKind {
        match self {
            Self::Required => ConstraintKind::Required,
            Self::Gt(_) => ConstraintKind::Gt,
            Self::Gte(_) => ConstraintKind::Gte,
            Self::OneOf(_) => ConstraintKind::OneOf,
            Self::Email => ConstraintKind::Email,
        }
    }

    fn is_satisfied_by(&self, value: &FieldValue<'_>) -> bool {
        match (self, value) {
            (Self::Required, FieldValue::Missing) => false,
            (Self::Required, FieldValue::Text(text)) => !text.trim().is_empty(),
            (Self::Required, FieldValue::List(len)) => *len > 0,
            (Self::Required, FieldValue::Number(_)) => true,

            // Optional values are only checked when present.
            (_, FieldValue::Missing) => true,

            (Self::Gt(bound), FieldValue::Number(number)) => number > bound,
            (Self::Gte(bound), FieldValue::Number(number)) => number >= bound,
            (Self::OneOf(allowed), FieldValue::Text(text)) => {
                allowed.iter().any(|candidate| *candidate == *text)
            }
            (Self::Email, FieldValue::Text(text)) => is_email(text),

            _ => false,
        }
    }
}

/// Value of a payload field as seen by the validator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Missing,
    Text(&'a str),
    Number(f64),
    List(usize),
}

impl<'a> FieldValue<'a> {
    #[must_use]
    pub fn optional_text(value: Option<&'a String>) -> Self {
        value.map_or(Self::Missing, |text| Self::Text(text))
    }

    #[must_use]
    pub fn optional_number(value: Option<f64>) -> Self {
        value.map_or(Self::Missing, Self::Number)
    }
}

/// Constraints declared for one field.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub field: &'static str,
    pub constraints: &'static [Constraint],
}

impl Rule {
    #[must_use]
    pub const fn new(field: &'static str, constraints: &'static [Constraint]) -> Self {
        Self { field, constraints }
    }
}

/// Payloads that can be checked against a rule table.
pub trait Validate {
    /// Rules evaluated in declaration order.
    const RULES: &'static [Rule];

    /// Messages used to describe failures for this payload type.
    const MESSAGES: &'static MessageTable;

    /// Look up the current value of a field named in [`Validate::RULES`].
    fn field(&self, name: &str) -> FieldValue<'_>;

    /// Check the payload against its rule table.
    ///
    /// # Errors
    ///
    /// Returns every failing field when at least one constraint is violated.
    fn validate(&self) -> Result<(), ValidationErrors>
    where
        Self: Sized,
    {
        validate(self)
    }
}

/// A single failed constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: &'static str,
    pub kind: ConstraintKind,
    pub message: String,
}

/// All failed constraints for a payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    #[must_use]
    pub fn messages(&self) -> Vec<&str> {
        self.0.iter().map(|error| error.message.as_str()).collect()
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.messages().join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Evaluate the rule table of `payload`.
///
/// # Errors
///
/// Returns the accumulated field errors when any constraint fails.
pub fn validate<P: Validate>(payload: &P) -> Result<(), ValidationErrors> {
    let errors: Vec<FieldError> = P::RULES
        .iter()
        .filter_map(|rule| {
            let value = payload.field(rule.field);

            rule.constraints
                .iter()
                .find(|constraint| !constraint.is_satisfied_by(&value))
                .map(|constraint| FieldError {
                    field: rule.field,
                    kind: constraint.kind(),
                    message: format!("{} {}", rule.field, P::MESSAGES.suffix(constraint.kind())),
                })
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}

/// Treat blank text as absent. Partial updates skip blank fields.
#[must_use]
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

fn is_email(text: &str) -> bool {
    text.validate_email()
}
