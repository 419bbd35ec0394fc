//! Products Data

use crate::validation::{
    Constraint, FieldValue, MessageTable, PRODUCT_MESSAGES, Rule, Validate, non_blank,
};

/// New Product Data
///
/// Numeric fields are optional so that an omitted price or quantity is
/// reported as missing rather than defaulting to zero.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: Option<f64>,
    pub quantity: Option<i32>,
}

impl Validate for NewProduct {
    const RULES: &'static [Rule] = &[
        Rule::new("name", &[Constraint::Required]),
        Rule::new("description", &[Constraint::Required]),
        Rule::new("price", &[Constraint::Required, Constraint::Gt(0.0)]),
        Rule::new("category", &[Constraint::Required]),
        Rule::new("quantity", &[Constraint::Required, Constraint::Gte(0.0)]),
    ];

    const MESSAGES: &'static MessageTable = &PRODUCT_MESSAGES;

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "name" => FieldValue::Text(&self.name),
            "description" => FieldValue::Text(&self.description),
            "price" => FieldValue::optional_number(self.price),
            "category" => FieldValue::Text(&self.category),
            "quantity" => FieldValue::optional_number(self.quantity.map(f64::from)),
            _ => FieldValue::Missing,
        }
    }
}

/// Product Update Data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i32>,
}

impl ProductUpdate {
    /// Drop blank text fields so they keep their stored values.
    #[must_use]
    pub fn without_blank_text(self) -> Self {
        Self {
            name: non_blank(self.name),
            description: non_blank(self.description),
            category: non_blank(self.category),
            ..self
        }
    }
}

impl Validate for ProductUpdate {
    const RULES: &'static [Rule] = &[
        Rule::new("price", &[Constraint::Gt(0.0)]),
        Rule::new("quantity", &[Constraint::Gte(0.0)]),
    ];

    const MESSAGES: &'static MessageTable = &PRODUCT_MESSAGES;

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "price" => FieldValue::optional_number(self.price),
            "quantity" => FieldValue::optional_number(self.quantity.map(f64::from)),
            _ => FieldValue::Missing,
        }
    }
}
