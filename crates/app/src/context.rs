//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    crypto::{CardCipher, CipherError},
    database::{self, ConnectRetry, Db},
    gateway::{GatewayConfig, GatewayError, HttpPaymentGateway, PaymentGateway},
    orders::{OrdersService, PgOrdersService},
    payments::{PaymentsService, PgPaymentsService},
    products::{PgProductsService, ProductsService},
    users::{PgUsersService, UsersService},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrations(#[source] sqlx::migrate::MigrateError),

    #[error("failed to build payment gateway client")]
    Gateway(#[source] GatewayError),

    #[error("invalid payment encryption key")]
    EncryptionKey(#[source] CipherError),
}

#[derive(Clone)]
pub struct AppContext {
    pub users: Arc<dyn UsersService>,
    pub products: Arc<dyn ProductsService>,
    pub orders: Arc<dyn OrdersService>,
    pub payments: Arc<dyn PaymentsService>,
}

impl AppContext {
    #[must_use]
    pub fn new(db: &Db, gateway: Arc<dyn PaymentGateway>, cipher: CardCipher) -> Self {
        Self {
            users: Arc::new(PgUsersService::new(db.clone())),
            products: Arc::new(PgProductsService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone())),
            payments: Arc::new(PgPaymentsService::new(db.clone(), gateway, cipher)),
        }
    }

    /// Build application context backed by the HTTP payment gateway.
    ///
    /// # Errors
    ///
    /// Returns an error when the encryption key or gateway settings are unusable.
    pub fn with_gateway(
        db: &Db,
        gateway: GatewayConfig,
        encryption_key: &str,
    ) -> Result<Self, AppInitError> {
        let cipher = CardCipher::from_base64(encryption_key).map_err(AppInitError::EncryptionKey)?;
        let gateway = HttpPaymentGateway::new(gateway).map_err(AppInitError::Gateway)?;

        Ok(Self::new(db, Arc::new(gateway), cipher))
    }
}

/// Connect to the database, retrying while it comes up, and apply pending
/// migrations.
///
/// # Errors
///
/// Returns an error when the database stays unreachable or a migration fails.
pub async fn bootstrap_database(url: &str, retry: ConnectRetry) -> Result<Db, AppInitError> {
    let pool = database::connect_with_retry(url, retry)
        .await
        .map_err(AppInitError::Database)?;

    database::migrate(&pool)
        .await
        .map_err(AppInitError::Migrations)?;

    Ok(Db::new(pool))
}
