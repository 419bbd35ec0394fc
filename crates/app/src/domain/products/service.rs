//! Products service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::products::{
        data::{NewProduct, ProductUpdate},
        errors::ProductsServiceError,
        records::{ProductId, ProductRecord},
        repository::{PgProductsRepository, ProductInsert},
    },
    validation::Validate,
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut conn = self.db.acquire().await?;

        let products = self.repository.list_products(&mut conn).await?;

        Ok(products)
    }

    async fn get_product(&self, product: ProductId) -> Result<ProductRecord, ProductsServiceError> {
        let mut conn = self.db.acquire().await?;

        let product = self.repository.get_product(&mut conn, product).await?;

        Ok(product)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        product.validate()?;

        let (Some(price), Some(quantity)) = (product.price, product.quantity) else {
            return Err(ProductsServiceError::MissingRequiredData);
        };

        let mut conn = self.db.acquire().await?;

        let created = self
            .repository
            .create_product(
                &mut conn,
                ProductInsert {
                    name: &product.name,
                    description: &product.description,
                    price,
                    category: &product.category,
                    quantity,
                },
            )
            .await?;

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductId,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let update = update.without_blank_text();

        update.validate()?;

        let mut conn = self.db.acquire().await?;

        let updated = self
            .repository
            .update_product(&mut conn, product, &update)
            .await?;

        Ok(updated)
    }

    async fn delete_product(&self, product: ProductId) -> Result<(), ProductsServiceError> {
        let mut conn = self.db.acquire().await?;

        let rows_affected = self.repository.delete_product(&mut conn, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        Ok(())
    }

    async fn search_products_by_name(
        &self,
        name: &str,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut conn = self.db.acquire().await?;

        let products = self
            .repository
            .search_products_by_name(&mut conn, name)
            .await?;

        Ok(products)
    }

    async fn search_products_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut conn = self.db.acquire().await?;

        let products = self
            .repository
            .search_products_by_category(&mut conn, category)
            .await?;

        Ok(products)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all products.
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductId) -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a new product.
    async fn create_product(&self, product: NewProduct)
    -> Result<ProductRecord, ProductsServiceError>;

    /// Overwrites the fields present in `update`.
    async fn update_product(
        &self,
        product: ProductId,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Deletes a product.
    async fn delete_product(&self, product: ProductId) -> Result<(), ProductsServiceError>;

    /// Products whose name contains `name`, ignoring case.
    async fn search_products_by_name(
        &self,
        name: &str,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Products whose category contains `category`, ignoring case.
    async fn search_products_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;
}
