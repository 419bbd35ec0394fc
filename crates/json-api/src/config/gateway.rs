//! Payment Gateway Config

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    time::Duration,
};

use clap::Args;

use storefront_app::gateway::GatewayConfig;

/// Payment gateway settings.
#[derive(Args)]
pub struct PaymentGatewayConfig {
    /// OAuth token endpoint of the payment provider
    #[arg(long, env = "PAYMENT_TOKEN_URL")]
    pub token_url: String,

    /// Base URL of the payment provider API
    #[arg(long, env = "PAYMENT_GATEWAY_URL")]
    pub gateway_url: String,

    /// OAuth client id
    #[arg(long, env = "PAYMENT_CLIENT_ID")]
    pub client_id: String,

    /// OAuth client secret
    #[arg(long, env = "PAYMENT_SECRET_KEY", hide_env_values = true)]
    pub secret_key: String,

    /// OAuth scope requested for charges
    #[arg(long, env = "PAYMENT_SCOPE")]
    pub scope: String,

    /// Merchant terminal id
    #[arg(long, env = "PAYMENT_TERMINAL_ID")]
    pub terminal_id: String,

    /// Charge currency
    #[arg(long, env = "PAYMENT_CURRENCY", default_value = "USD")]
    pub currency: String,

    /// Base64 encoded 32 byte key used to encrypt card data
    #[arg(long, env = "PAYMENT_ENCRYPTION_KEY", hide_env_values = true)]
    pub encryption_key: String,

    /// Request timeout in seconds
    #[arg(long, env = "PAYMENT_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}

impl Debug for PaymentGatewayConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("PaymentGatewayConfig")
            .field("token_url", &self.token_url)
            .field("gateway_url", &self.gateway_url)
            .field("client_id", &self.client_id)
            .field("secret_key", &"<redacted>")
            .field("scope", &self.scope)
            .field("terminal_id", &self.terminal_id)
            .field("currency", &self.currency)
            .field("encryption_key", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl PaymentGatewayConfig {
    #[must_use]
    pub fn client_config(&self) -> GatewayConfig {
        GatewayConfig {
            token_url: self.token_url.clone(),
            gateway_url: self.gateway_url.clone(),
            client_id: self.client_id.clone(),
            secret_key: self.secret_key.clone(),
            scope: self.scope.clone(),
            terminal_id: self.terminal_id.clone(),
            currency: self.currency.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}
