//! Order Records

use jiff::Timestamp;

use crate::{
    domain::{products::records::ProductId, users::records::UserId},
    ids::TypedId,
};

/// Order Id
pub type OrderId = TypedId<OrderRecord>;

/// Order Record
///
/// `status` is free-form text chosen by the client.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub id: OrderId,
    pub user_id: UserId,
    pub product_ids: Vec<ProductId>,
    pub total_price: f64,
    pub status: String,
    pub order_date: Timestamp,
}
