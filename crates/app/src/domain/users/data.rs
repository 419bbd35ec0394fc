//! Users Data

use jiff::Timestamp;

use crate::{
    domain::users::records::USER_ROLES,
    validation::{Constraint, FieldValue, MessageTable, Rule, USER_MESSAGES, Validate, non_blank},
};

/// New User Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub address: String,
    pub role: String,

    /// Defaults to the time of insertion when omitted.
    pub registration_date: Option<Timestamp>,
}

impl Validate for NewUser {
    const RULES: &'static [Rule] = &[
        Rule::new("name", &[Constraint::Required]),
        Rule::new("email", &[Constraint::Required, Constraint::Email]),
        Rule::new("role", &[Constraint::Required, Constraint::OneOf(USER_ROLES)]),
    ];

    const MESSAGES: &'static MessageTable = &USER_MESSAGES;

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "name" => FieldValue::Text(&self.name),
            "email" => FieldValue::Text(&self.email),
            "role" => FieldValue::Text(&self.role),
            _ => FieldValue::Missing,
        }
    }
}

/// User Update Data
///
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub role: Option<String>,
}

impl UserUpdate {
    /// Drop blank text fields so they keep their stored values.
    #[must_use]
    pub fn without_blank_text(self) -> Self {
        Self {
            name: non_blank(self.name),
            email: non_blank(self.email),
            address: non_blank(self.address),
            role: non_blank(self.role),
        }
    }
}

impl Validate for UserUpdate {
    const RULES: &'static [Rule] = &[
        Rule::new("email", &[Constraint::Email]),
        Rule::new("role", &[Constraint::OneOf(USER_ROLES)]),
    ];

    const MESSAGES: &'static MessageTable = &USER_MESSAGES;

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "email" => FieldValue::optional_text(self.email.as_ref()),
            "role" => FieldValue::optional_text(self.role.as_ref()),
            _ => FieldValue::Missing,
        }
    }
}
