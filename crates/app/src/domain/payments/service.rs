//! Payments service.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use async_trait::async_trait;
use mockall::automock;
use tracing::{error, info};

use crate::{
    crypto::CardCipher,
    database::Db,
    domain::{
        orders::records::OrderId,
        payments::{
            data::{NewPayment, PaymentUpdate},
            errors::PaymentsServiceError,
            records::{PaymentId, PaymentRecord},
            repository::PgPaymentsRepository,
        },
        users::records::UserId,
    },
    gateway::{Charge, PaymentGateway},
};

/// Card data submitted with every charge.
///
/// A fixed test card accepted by the gateway's sandbox; payloads do not carry
/// card details of their own.
pub const DEFAULT_CARD_DATA: &str = r#"{"hpan":"4405639704015096","expDate":"0125","cvc":"815","terminalId":"67e34d63-102f-4bd1-898e-370781d0074d"}"#;

#[derive(Clone)]
pub struct PgPaymentsService {
    db: Db,
    repository: PgPaymentsRepository,
    gateway: Arc<dyn PaymentGateway>,
    cipher: CardCipher,
}

impl PgPaymentsService {
    #[must_use]
    pub fn new(db: Db, gateway: Arc<dyn PaymentGateway>, cipher: CardCipher) -> Self {
        Self {
            db,
            repository: PgPaymentsRepository::new(),
            gateway,
            cipher,
        }
    }
}

impl Debug for PgPaymentsService {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("PgPaymentsService")
            .field("db", &self.db)
            .field("cipher", &self.cipher)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl PaymentsService for PgPaymentsService {
    async fn list_payments(&self) -> Result<Vec<PaymentRecord>, PaymentsServiceError> {
        let mut conn = self.db.acquire().await?;

        let payments = self.repository.list_payments(&mut conn).await?;

        Ok(payments)
    }

    async fn get_payment(&self, payment: PaymentId) -> Result<PaymentRecord, PaymentsServiceError> {
        let mut conn = self.db.acquire().await?;

        let payment = self.repository.get_payment(&mut conn, payment).await?;

        Ok(payment)
    }

    async fn create_payment(
        &self,
        payment: NewPayment,
    ) -> Result<PaymentRecord, PaymentsServiceError> {
        let token = self
            .gateway
            .access_token()
            .await
            .map_err(PaymentsServiceError::Token)?;

        let cryptogram = self
            .cipher
            .encrypt(DEFAULT_CARD_DATA)
            .map_err(PaymentsServiceError::Encryption)?;

        let charge = Charge {
            amount: payment.amount,
            invoice_id: payment.order_id.to_string(),
        };

        let result = self
            .gateway
            .charge(token, cryptogram, charge)
            .await
            .map_err(|gateway_error| {
                error!(order = %payment.order_id, "failed to make payment: {gateway_error}");

                PaymentsServiceError::Charge(gateway_error)
            })?;

        info!(
            order = %payment.order_id,
            charge = %result.id,
            status = %result.status,
            "payment charged"
        );

        let mut conn = self.db.acquire().await?;

        let created = self
            .repository
            .create_payment(
                &mut conn,
                payment.user_id,
                payment.order_id,
                payment.amount,
                &result.status,
            )
            .await?;

        Ok(created)
    }

    async fn update_payment(
        &self,
        payment: PaymentId,
        update: PaymentUpdate,
    ) -> Result<PaymentRecord, PaymentsServiceError> {
        let mut conn = self.db.acquire().await?;

        let updated = self
            .repository
            .update_payment(&mut conn, payment, &update)
            .await?;

        Ok(updated)
    }

    async fn delete_payment(&self, payment: PaymentId) -> Result<(), PaymentsServiceError> {
        let mut conn = self.db.acquire().await?;

        let rows_affected = self.repository.delete_payment(&mut conn, payment).await?;

        if rows_affected == 0 {
            return Err(PaymentsServiceError::NotFound);
        }

        Ok(())
    }

    async fn search_payments_by_user(
        &self,
        user: UserId,
    ) -> Result<Vec<PaymentRecord>, PaymentsServiceError> {
        let mut conn = self.db.acquire().await?;

        let payments = self
            .repository
            .search_payments_by_user(&mut conn, user)
            .await?;

        Ok(payments)
    }

    async fn search_payments_by_order(
        &self,
        order: OrderId,
    ) -> Result<Vec<PaymentRecord>, PaymentsServiceError> {
        let mut conn = self.db.acquire().await?;

        let payments = self
            .repository
            .search_payments_by_order(&mut conn, order)
            .await?;

        Ok(payments)
    }

    async fn search_payments_by_status(
        &self,
        status: &str,
    ) -> Result<Vec<PaymentRecord>, PaymentsServiceError> {
        let mut conn = self.db.acquire().await?;

        let payments = self
            .repository
            .search_payments_by_status(&mut conn, status)
            .await?;

        Ok(payments)
    }
}

#[automock]
#[async_trait]
pub trait PaymentsService: Send + Sync {
    /// Retrieves all payments.
    async fn list_payments(&self) -> Result<Vec<PaymentRecord>, PaymentsServiceError>;

    /// Retrieve a single payment.
    async fn get_payment(&self, payment: PaymentId) -> Result<PaymentRecord, PaymentsServiceError>;

    /// Charges the payment through the gateway and records the gateway's
    /// status. Nothing is stored when any gateway step fails.
    async fn create_payment(
        &self,
        payment: NewPayment,
    ) -> Result<PaymentRecord, PaymentsServiceError>;

    /// Overwrites the fields present in `update`.
    async fn update_payment(
        &self,
        payment: PaymentId,
        update: PaymentUpdate,
    ) -> Result<PaymentRecord, PaymentsServiceError>;

    /// Deletes a payment.
    async fn delete_payment(&self, payment: PaymentId) -> Result<(), PaymentsServiceError>;

    async fn search_payments_by_user(
        &self,
        user: UserId,
    ) -> Result<Vec<PaymentRecord>, PaymentsServiceError>;

    async fn search_payments_by_order(
        &self,
        order: OrderId,
    ) -> Result<Vec<PaymentRecord>, PaymentsServiceError>;

    async fn search_payments_by_status(
        &self,
        status: &str,
    ) -> Result<Vec<PaymentRecord>, PaymentsServiceError>;
}
