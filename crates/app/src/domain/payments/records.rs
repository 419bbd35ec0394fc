//! Payment Records

use jiff::Timestamp;

use crate::{
    domain::{orders::records::OrderId, users::records::UserId},
    ids::TypedId,
};

/// Payment Id
pub type PaymentId = TypedId<PaymentRecord>;

/// Payment Record
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRecord {
    pub id: PaymentId,
    pub user_id: UserId,
    pub order_id: OrderId,
    pub amount: f64,

    /// Status reported by the payment gateway when the charge was made.
    pub payment_status: String,
    pub created_at: Timestamp,
}
