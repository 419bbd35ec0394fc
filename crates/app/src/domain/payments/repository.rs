//! Payments Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgConnection, Postgres, Row, postgres::PgRow, query, query_as};

use crate::domain::{
    orders::records::OrderId,
    payments::{
        data::PaymentUpdate,
        records::{PaymentId, PaymentRecord},
    },
    users::records::UserId,
};

const LIST_PAYMENTS_SQL: &str = include_str!("sql/list_payments.sql");
const GET_PAYMENT_SQL: &str = include_str!("sql/get_payment.sql");
const CREATE_PAYMENT_SQL: &str = include_str!("sql/create_payment.sql");
const UPDATE_PAYMENT_SQL: &str = include_str!("sql/update_payment.sql");
const DELETE_PAYMENT_SQL: &str = include_str!("sql/delete_payment.sql");
const SEARCH_PAYMENTS_BY_USER_SQL: &str = include_str!("sql/search_payments_by_user.sql");
const SEARCH_PAYMENTS_BY_ORDER_SQL: &str = include_str!("sql/search_payments_by_order.sql");
const SEARCH_PAYMENTS_BY_STATUS_SQL: &str = include_str!("sql/search_payments_by_status.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPaymentsRepository;

impl PgPaymentsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_payments(
        &self,
        conn: &mut PgConnection,
    ) -> Result<Vec<PaymentRecord>, sqlx::Error> {
        query_as::<Postgres, PaymentRecord>(LIST_PAYMENTS_SQL)
            .fetch_all(&mut *conn)
            .await
    }

    pub(crate) async fn get_payment(
        &self,
        conn: &mut PgConnection,
        payment: PaymentId,
    ) -> Result<PaymentRecord, sqlx::Error> {
        query_as::<Postgres, PaymentRecord>(GET_PAYMENT_SQL)
            .bind(payment.into_i64())
            .fetch_one(&mut *conn)
            .await
    }

    pub(crate) async fn create_payment(
        &self,
        conn: &mut PgConnection,
        user: UserId,
        order: OrderId,
        amount: f64,
        payment_status: &str,
    ) -> Result<PaymentRecord, sqlx::Error> {
        query_as::<Postgres, PaymentRecord>(CREATE_PAYMENT_SQL)
            .bind(user.into_i64())
            .bind(order.into_i64())
            .bind(amount)
            .bind(payment_status)
            .fetch_one(&mut *conn)
            .await
    }

    pub(crate) async fn update_payment(
        &self,
        conn: &mut PgConnection,
        payment: PaymentId,
        update: &PaymentUpdate,
    ) -> Result<PaymentRecord, sqlx::Error> {
        query_as::<Postgres, PaymentRecord>(UPDATE_PAYMENT_SQL)
            .bind(payment.into_i64())
            .bind(update.user_id.map(UserId::into_i64))
            .bind(update.order_id.map(OrderId::into_i64))
            .bind(update.amount)
            .bind(update.payment_status.as_deref())
            .fetch_one(&mut *conn)
            .await
    }

    pub(crate) async fn delete_payment(
        &self,
        conn: &mut PgConnection,
        payment: PaymentId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PAYMENT_SQL)
            .bind(payment.into_i64())
            .execute(&mut *conn)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn search_payments_by_user(
        &self,
        conn: &mut PgConnection,
        user: UserId,
    ) -> Result<Vec<PaymentRecord>, sqlx::Error> {
        query_as::<Postgres, PaymentRecord>(SEARCH_PAYMENTS_BY_USER_SQL)
            .bind(user.into_i64())
            .fetch_all(&mut *conn)
            .await
    }

    pub(crate) async fn search_payments_by_order(
        &self,
        conn: &mut PgConnection,
        order: OrderId,
    ) -> Result<Vec<PaymentRecord>, sqlx::Error> {
        query_as::<Postgres, PaymentRecord>(SEARCH_PAYMENTS_BY_ORDER_SQL)
            .bind(order.into_i64())
            .fetch_all(&mut *conn)
            .await
    }

    pub(crate) async fn search_payments_by_status(
        &self,
        conn: &mut PgConnection,
        status: &str,
    ) -> Result<Vec<PaymentRecord>, sqlx::Error> {
        query_as::<Postgres, PaymentRecord>(SEARCH_PAYMENTS_BY_STATUS_SQL)
            .bind(status)
            .fetch_all(&mut *conn)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for PaymentRecord {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let user_id: i64 = row.try_get("user_id")?;
        let order_id: i64 = row.try_get("order_id")?;
        let created_at: SqlxTimestamp = row.try_get("created_at")?;

        Ok(Self {
            id: PaymentId::from_i64(id),
            user_id: UserId::from_i64(user_id),
            order_id: OrderId::from_i64(order_id),
            amount: row.try_get("amount")?,
            payment_status: row.try_get("payment_status")?,
            created_at: created_at.to_jiff(),
        })
    }
}
