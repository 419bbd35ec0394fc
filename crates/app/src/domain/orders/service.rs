//! Orders service.
//!
//! Placing an order checks that the referenced user and every referenced
//! product exist before anything is written. The checks and the write run on
//! one pooled connection without a surrounding transaction.

use async_trait::async_trait;
use mockall::automock;
use tracing::debug;

use crate::{
    database::Db,
    domain::{
        orders::{
            data::{NewOrder, OrderUpdate},
            errors::OrdersServiceError,
            records::{OrderId, OrderRecord},
            repository::PgOrdersRepository,
        },
        products::repository::PgProductsRepository,
        users::{records::UserId, repository::PgUsersRepository},
    },
    validation::Validate,
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
    users: PgUsersRepository,
    products: PgProductsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
            users: PgUsersRepository::new(),
            products: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn list_orders(&self) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut conn = self.db.acquire().await?;

        let orders = self.repository.list_orders(&mut conn).await?;

        Ok(orders)
    }

    async fn get_order(&self, order: OrderId) -> Result<OrderRecord, OrdersServiceError> {
        let mut conn = self.db.acquire().await?;

        let order = self.repository.get_order(&mut conn, order).await?;

        Ok(order)
    }

    async fn create_order(&self, order: NewOrder) -> Result<OrderRecord, OrdersServiceError> {
        order.validate()?;

        let (Some(user), Some(total_price)) = (order.user_id, order.total_price) else {
            return Err(OrdersServiceError::InvalidData);
        };

        let mut conn = self.db.acquire().await?;

        if !self.users.user_exists(&mut conn, user).await? {
            return Err(OrdersServiceError::UserNotFound);
        }

        for &product in &order.product_ids {
            if !self.products.product_exists(&mut conn, product).await? {
                debug!(%product, "order references a missing product");

                return Err(OrdersServiceError::ProductNotFound(product));
            }
        }

        let created = self
            .repository
            .create_order(&mut conn, user, total_price, &order)
            .await?;

        Ok(created)
    }

    async fn update_order(
        &self,
        order: OrderId,
        payload: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError> {
        payload.validate()?;

        let mut conn = self.db.acquire().await?;

        let existing = self.repository.get_order(&mut conn, order).await?;

        let updated = self
            .repository
            .update_order(
                &mut conn,
                order,
                &OrderUpdate::from(payload),
                existing.order_date,
            )
            .await?;

        Ok(updated)
    }

    async fn delete_order(&self, order: OrderId) -> Result<(), OrdersServiceError> {
        let mut conn = self.db.acquire().await?;

        if !self.repository.order_exists(&mut conn, order).await? {
            return Err(OrdersServiceError::NotFound);
        }

        self.repository.delete_order(&mut conn, order).await?;

        Ok(())
    }

    async fn search_orders_by_user(
        &self,
        user: UserId,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut conn = self.db.acquire().await?;

        let orders = self.repository.search_orders_by_user(&mut conn, user).await?;

        Ok(orders)
    }

    async fn search_orders_by_status(
        &self,
        status: &str,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut conn = self.db.acquire().await?;

        let orders = self
            .repository
            .search_orders_by_status(&mut conn, status)
            .await?;

        Ok(orders)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Retrieves all orders.
    async fn list_orders(&self) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Retrieve a single order.
    async fn get_order(&self, order: OrderId) -> Result<OrderRecord, OrdersServiceError>;

    /// Places an order for an existing user and existing products.
    ///
    /// The user is checked first, then each product in payload order; the
    /// first missing product is reported.
    async fn create_order(&self, order: NewOrder) -> Result<OrderRecord, OrdersServiceError>;

    /// Replaces an order's fields, keeping its original order date.
    async fn update_order(
        &self,
        order: OrderId,
        payload: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Deletes an order.
    async fn delete_order(&self, order: OrderId) -> Result<(), OrdersServiceError>;

    /// Orders placed by `user`.
    async fn search_orders_by_user(
        &self,
        user: UserId,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Orders whose status equals `status`.
    async fn search_orders_by_status(
        &self,
        status: &str,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::{Timestamp, ToSpan};
    use testresult::TestResult;

    use crate::{
        domain::{
            products::{ProductsService, records::ProductId},
            users::UsersService,
        },
        test::{
            TestContext,
            helpers::{new_order, new_product, new_user},
        },
    };

    use super::*;

    async fn seed(ctx: &TestContext) -> TestResult<(UserId, ProductId)> {
        let user = ctx
            .users
            .create_user(new_user("John Doe", "john@example.com"))
            .await?;

        let product = ctx
            .products
            .create_product(new_product("Desk Lamp", "Lighting", 29.99))
            .await?;

        Ok((user.id, product.id))
    }

    #[tokio::test]
    async fn create_order_with_existing_references_succeeds() -> TestResult {
        let ctx = TestContext::new().await;
        let (user, product) = seed(&ctx).await?;

        let order = ctx
            .orders
            .create_order(new_order(user, vec![product], "new"))
            .await?;

        let fetched = ctx.orders.get_order(order.id).await?;

        assert_eq!(fetched.user_id, user);
        assert_eq!(fetched.product_ids, vec![product]);
        assert_eq!(fetched.status, "new");
        assert!((fetched.total_price - 100.0).abs() < f64::EPSILON);

        Ok(())
    }

    #[tokio::test]
    async fn create_order_unknown_user_returns_user_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let (_, product) = seed(&ctx).await?;

        let result = ctx
            .orders
            .create_order(new_order(UserId::from_i64(9_999), vec![product], "new"))
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::UserNotFound)),
            "expected UserNotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_order_reports_first_missing_product() -> TestResult {
        let ctx = TestContext::new().await;
        let (user, product) = seed(&ctx).await?;
        let missing = ProductId::from_i64(product.into_i64() + 100);
        let also_missing = ProductId::from_i64(product.into_i64() + 200);

        let result = ctx
            .orders
            .create_order(new_order(user, vec![product, missing, also_missing], "new"))
            .await;

        match result {
            Err(OrdersServiceError::ProductNotFound(id)) => assert_eq!(id, missing),
            other => panic!("expected ProductNotFound, got {other:?}"),
        }

        let orders = ctx.orders.list_orders().await?;

        assert!(orders.is_empty(), "nothing should be persisted");

        Ok(())
    }

    #[tokio::test]
    async fn create_order_validates_before_lookups() {
        let ctx = TestContext::new().await;

        let result = ctx
            .orders
            .create_order(NewOrder {
                total_price: Some(0.0),
                ..new_order(UserId::from_i64(9_999), vec![], "new")
            })
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::Validation(_))),
            "expected Validation, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_order_preserves_order_date() -> TestResult {
        let ctx = TestContext::new().await;
        let (user, product) = seed(&ctx).await?;
        let placed_at = Timestamp::now().checked_sub(48.hours())?;

        let order = ctx
            .orders
            .create_order(NewOrder {
                order_date: Some(placed_at),
                ..new_order(user, vec![product], "new")
            })
            .await?;

        let updated = ctx
            .orders
            .update_order(
                order.id,
                NewOrder {
                    order_date: Some(Timestamp::now()),
                    ..new_order(user, vec![product], "shipped")
                },
            )
            .await?;

        assert_eq!(updated.status, "shipped");
        assert_eq!(updated.order_date, order.order_date);

        Ok(())
    }

    #[tokio::test]
    async fn update_order_unknown_id_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let (user, product) = seed(&ctx).await?;

        let result = ctx
            .orders
            .update_order(
                OrderId::from_i64(9_999),
                new_order(user, vec![product], "shipped"),
            )
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_order_unknown_id_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.orders.delete_order(OrderId::from_i64(9_999)).await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn searches_filter_by_user_and_status() -> TestResult {
        let ctx = TestContext::new().await;
        let (user, product) = seed(&ctx).await?;

        let placed = ctx
            .orders
            .create_order(new_order(user, vec![product], "new"))
            .await?;

        ctx.orders
            .create_order(new_order(user, vec![product, product], "paid"))
            .await?;

        let by_user = ctx.orders.search_orders_by_user(user).await?;

        assert_eq!(by_user.len(), 2);

        let by_status = ctx.orders.search_orders_by_status("new").await?;

        assert_eq!(by_status, vec![placed]);

        let none = ctx.orders.search_orders_by_status("cancelled").await?;

        assert!(none.is_empty());

        Ok(())
    }
}
