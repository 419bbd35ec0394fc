//! Orders Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgConnection, Postgres, Row, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{
    orders::{
        data::{NewOrder, OrderUpdate},
        records::{OrderId, OrderRecord},
    },
    products::records::ProductId,
    users::records::UserId,
};

const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const ORDER_EXISTS_SQL: &str = include_str!("sql/order_exists.sql");
const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const UPDATE_ORDER_SQL: &str = include_str!("sql/update_order.sql");
const DELETE_ORDER_SQL: &str = include_str!("sql/delete_order.sql");
const SEARCH_ORDERS_BY_USER_SQL: &str = include_str!("sql/search_orders_by_user.sql");
const SEARCH_ORDERS_BY_STATUS_SQL: &str = include_str!("sql/search_orders_by_status.sql");

fn product_ids_to_i64(product_ids: &[ProductId]) -> Vec<i64> {
    product_ids.iter().copied().map(ProductId::into_i64).collect()
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_orders(
        &self,
        conn: &mut PgConnection,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
            .fetch_all(&mut *conn)
            .await
    }

    pub(crate) async fn get_order(
        &self,
        conn: &mut PgConnection,
        order: OrderId,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_i64())
            .fetch_one(&mut *conn)
            .await
    }

    pub(crate) async fn order_exists(
        &self,
        conn: &mut PgConnection,
        order: OrderId,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(ORDER_EXISTS_SQL)
            .bind(order.into_i64())
            .fetch_one(&mut *conn)
            .await
    }

    pub(crate) async fn create_order(
        &self,
        conn: &mut PgConnection,
        user: UserId,
        total_price: f64,
        order: &NewOrder,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(user.into_i64())
            .bind(product_ids_to_i64(&order.product_ids))
            .bind(total_price)
            .bind(&order.status)
            .bind(order.order_date.map(SqlxTimestamp::from))
            .fetch_one(&mut *conn)
            .await
    }

    pub(crate) async fn update_order(
        &self,
        conn: &mut PgConnection,
        order: OrderId,
        update: &OrderUpdate,
        order_date: Timestamp,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(UPDATE_ORDER_SQL)
            .bind(order.into_i64())
            .bind(update.user_id.map(UserId::into_i64))
            .bind(update.product_ids.as_deref().map(product_ids_to_i64))
            .bind(update.total_price)
            .bind(update.status.as_deref())
            .bind(SqlxTimestamp::from(order_date))
            .fetch_one(&mut *conn)
            .await
    }

    pub(crate) async fn delete_order(
        &self,
        conn: &mut PgConnection,
        order: OrderId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ORDER_SQL)
            .bind(order.into_i64())
            .execute(&mut *conn)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn search_orders_by_user(
        &self,
        conn: &mut PgConnection,
        user: UserId,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(SEARCH_ORDERS_BY_USER_SQL)
            .bind(user.into_i64())
            .fetch_all(&mut *conn)
            .await
    }

    pub(crate) async fn search_orders_by_status(
        &self,
        conn: &mut PgConnection,
        status: &str,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(SEARCH_ORDERS_BY_STATUS_SQL)
            .bind(status)
            .fetch_all(&mut *conn)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let user_id: i64 = row.try_get("user_id")?;
        let product_ids: Vec<i64> = row.try_get("product_ids")?;
        let order_date: SqlxTimestamp = row.try_get("order_date")?;

        Ok(Self {
            id: OrderId::from_i64(id),
            user_id: UserId::from_i64(user_id),
            product_ids: product_ids.into_iter().map(ProductId::from_i64).collect(),
            total_price: row.try_get("total_price")?,
            status: row.try_get("status")?,
            order_date: order_date.to_jiff(),
        })
    }
}
