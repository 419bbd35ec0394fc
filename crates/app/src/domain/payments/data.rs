//! Payments Data

use crate::domain::{orders::records::OrderId, users::records::UserId};

/// New Payment Data
///
/// The stored status always comes from the gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPayment {
    pub user_id: UserId,
    pub order_id: OrderId,
    pub amount: f64,
}

/// Payment Update Data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentUpdate {
    pub user_id: Option<UserId>,
    pub order_id: Option<OrderId>,
    pub amount: Option<f64>,
    pub payment_status: Option<String>,
}
