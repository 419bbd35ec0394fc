//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgConnection, Postgres, Row, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::products::{
    data::ProductUpdate,
    records::{ProductId, ProductRecord},
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const PRODUCT_EXISTS_SQL: &str = include_str!("sql/product_exists.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");
const SEARCH_PRODUCTS_BY_NAME_SQL: &str = include_str!("sql/search_products_by_name.sql");
const SEARCH_PRODUCTS_BY_CATEGORY_SQL: &str = include_str!("sql/search_products_by_category.sql");

/// Validated product fields ready to insert.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ProductInsert<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub price: f64,
    pub category: &'a str,
    pub quantity: i32,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        conn: &mut PgConnection,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .fetch_all(&mut *conn)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        conn: &mut PgConnection,
        product: ProductId,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_i64())
            .fetch_one(&mut *conn)
            .await
    }

    pub(crate) async fn product_exists(
        &self,
        conn: &mut PgConnection,
        product: ProductId,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(PRODUCT_EXISTS_SQL)
            .bind(product.into_i64())
            .fetch_one(&mut *conn)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        conn: &mut PgConnection,
        product: ProductInsert<'_>,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.name)
            .bind(product.description)
            .bind(product.price)
            .bind(product.category)
            .bind(product.quantity)
            .fetch_one(&mut *conn)
            .await
    }

    pub(crate) async fn update_product(
        &self,
        conn: &mut PgConnection,
        product: ProductId,
        update: &ProductUpdate,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_SQL)
            .bind(product.into_i64())
            .bind(update.name.as_deref())
            .bind(update.description.as_deref())
            .bind(update.price)
            .bind(update.category.as_deref())
            .bind(update.quantity)
            .fetch_one(&mut *conn)
            .await
    }

    pub(crate) async fn delete_product(
        &self,
        conn: &mut PgConnection,
        product: ProductId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_i64())
            .execute(&mut *conn)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn search_products_by_name(
        &self,
        conn: &mut PgConnection,
        name: &str,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(SEARCH_PRODUCTS_BY_NAME_SQL)
            .bind(name)
            .fetch_all(&mut *conn)
            .await
    }

    pub(crate) async fn search_products_by_category(
        &self,
        conn: &mut PgConnection,
        category: &str,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(SEARCH_PRODUCTS_BY_CATEGORY_SQL)
            .bind(category)
            .fetch_all(&mut *conn)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let created_at: SqlxTimestamp = row.try_get("created_at")?;

        Ok(Self {
            id: ProductId::from_i64(id),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: row.try_get("price")?,
            category: row.try_get("category")?,
            quantity: row.try_get("quantity")?,
            created_at: created_at.to_jiff(),
        })
    }
}
