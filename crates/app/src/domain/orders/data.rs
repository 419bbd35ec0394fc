//! Orders Data

use jiff::Timestamp;

use crate::{
    domain::{products::records::ProductId, users::records::UserId},
    validation::{Constraint, FieldValue, MessageTable, ORDER_MESSAGES, Rule, Validate},
};

/// Order payload, used both to place an order and to replace one.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub user_id: Option<UserId>,
    pub product_ids: Vec<ProductId>,
    pub total_price: Option<f64>,
    pub status: String,

    /// Defaults to the time of insertion. Ignored on update.
    pub order_date: Option<Timestamp>,
}

impl Validate for NewOrder {
    const RULES: &'static [Rule] = &[
        Rule::new("user_id", &[Constraint::Required, Constraint::Gt(0.0)]),
        Rule::new("product_ids", &[Constraint::Required]),
        Rule::new("total_price", &[Constraint::Required, Constraint::Gt(0.0)]),
        Rule::new("status", &[Constraint::Required]),
    ];

    const MESSAGES: &'static MessageTable = &ORDER_MESSAGES;

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "user_id" => FieldValue::optional_number(self.user_id.map(|id| id.into_i64() as f64)),
            "product_ids" => FieldValue::List(self.product_ids.len()),
            "total_price" => FieldValue::optional_number(self.total_price),
            "status" => FieldValue::Text(&self.status),
            _ => FieldValue::Missing,
        }
    }
}

/// Fields written by an order update. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderUpdate {
    pub user_id: Option<UserId>,
    pub product_ids: Option<Vec<ProductId>>,
    pub total_price: Option<f64>,
    pub status: Option<String>,
}

impl From<NewOrder> for OrderUpdate {
    fn from(order: NewOrder) -> Self {
        Self {
            user_id: order.user_id,
            product_ids: (!order.product_ids.is_empty()).then_some(order.product_ids),
            total_price: order.total_price,
            status: (!order.status.trim().is_empty()).then_some(order.status),
        }
    }
}
