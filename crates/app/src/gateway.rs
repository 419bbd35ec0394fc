//! Payment gateway client.
//!
//! Charges are a two step exchange: a client-credentials token request
//! followed by a payment request carrying the encrypted card data.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    time::Duration,
};

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Connection settings for the payment gateway.
#[derive(Clone)]
pub struct GatewayConfig {
    /// OAuth token endpoint, e.g. `"https://auth.example.com/oauth2/token"`.
    pub token_url: String,

    /// Base URL of the payments API. Charges go to `{gateway_url}/payments`.
    pub gateway_url: String,

    pub client_id: String,

    /// Client secret sent with token requests.
    pub secret_key: String,

    pub scope: String,
    pub terminal_id: String,
    pub currency: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl Debug for GatewayConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GatewayConfig")
            .field("token_url", &self.token_url)
            .field("gateway_url", &self.gateway_url)
            .field("client_id", &self.client_id)
            .field("secret_key", &"<redacted>")
            .field("scope", &self.scope)
            .field("terminal_id", &self.terminal_id)
            .field("currency", &self.currency)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Bearer token issued by the gateway.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct AccessToken {
    pub access_token: String,

    #[serde(default)]
    pub token_type: String,

    #[serde(default)]
    pub expires_in: u64,
}

impl Debug for AccessToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AccessToken")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .finish_non_exhaustive()
    }
}

/// Amount and reference for a single charge.
#[derive(Debug, Clone, PartialEq)]
pub struct Charge {
    pub amount: f64,
    pub invoice_id: String,
}

/// Gateway response to a charge.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChargeResult {
    pub id: String,
    pub status: String,
}

#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    grant_type: &'static str,
    scope: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
}

#[derive(Debug, Serialize)]
struct ChargeRequest<'a> {
    amount: f64,
    currency: &'a str,
    invoice_id: &'a str,
    terminal_id: &'a str,
    cryptogram: &'a str,
}

/// Errors that can occur when communicating with the payment gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The gateway returned a non-2xx response.
    #[error("unexpected response from payment gateway: {0}")]
    UnexpectedResponse(String),
}

#[automock]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Request a fresh access token.
    async fn access_token(&self) -> Result<AccessToken, GatewayError>;

    /// Submit a charge for the encrypted card data in `cryptogram`.
    async fn charge(
        &self,
        token: AccessToken,
        cryptogram: String,
        charge: Charge,
    ) -> Result<ChargeResult, GatewayError>;
}

/// [`PaymentGateway`] backed by the gateway's HTTP API.
#[derive(Debug, Clone)]
pub struct HttpPaymentGateway {
    config: GatewayConfig,
    http: Client,
}

impl HttpPaymentGateway {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { config, http })
    }

    fn payments_url(&self) -> String {
        format!("{}/payments", self.config.gateway_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn access_token(&self) -> Result<AccessToken, GatewayError> {
        let form = TokenRequest {
            grant_type: "client_credentials",
            scope: &self.config.scope,
            client_id: &self.config.client_id,
            client_secret: &self.config.secret_key,
        };

        let response = self
            .http
            .post(&self.config.token_url)
            .form(&form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(GatewayError::UnexpectedResponse(format!(
                "token request failed with status {status}: {text}"
            )));
        }

        let token: AccessToken = response.json().await?;

        debug!(expires_in = token.expires_in, "obtained payment gateway token");

        Ok(token)
    }

    async fn charge(
        &self,
        token: AccessToken,
        cryptogram: String,
        charge: Charge,
    ) -> Result<ChargeResult, GatewayError> {
        let body = ChargeRequest {
            amount: charge.amount,
            currency: &self.config.currency,
            invoice_id: &charge.invoice_id,
            terminal_id: &self.config.terminal_id,
            cryptogram: &cryptogram,
        };

        let response = self
            .http
            .post(self.payments_url())
            .bearer_auth(&token.access_token)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(GatewayError::UnexpectedResponse(format!(
                "payment request failed with status {status}: {text}"
            )));
        }

        let result: ChargeResult = response.json().await?;

        debug!(charge = %result.id, status = %result.status, "payment gateway accepted charge");

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use mockito::{Matcher, Server};
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    fn config(server: &Server) -> GatewayConfig {
        GatewayConfig {
            token_url: format!("{}/oauth2/token", server.url()),
            gateway_url: server.url(),
            client_id: "storefront".to_string(),
            secret_key: "s3cret".to_string(),
            scope: "payment".to_string(),
            terminal_id: "67e34d63-102f-4bd1-898e-370781d0074d".to_string(),
            currency: "KZT".to_string(),
            timeout: Duration::from_secs(5),
        }
    }

    fn token() -> AccessToken {
        AccessToken {
            access_token: "tok-123".to_string(),
            token_type: "Bearer".to_string(),
            expires_in: 3600,
        }
    }

    #[tokio::test]
    async fn access_token_posts_client_credentials_form() -> TestResult {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("POST", "/oauth2/token")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("grant_type".into(), "client_credentials".into()),
                Matcher::UrlEncoded("scope".into(), "payment".into()),
                Matcher::UrlEncoded("client_id".into(), "storefront".into()),
                Matcher::UrlEncoded("client_secret".into(), "s3cret".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token":"tok-123","token_type":"Bearer","expires_in":3600}"#)
            .expect(1)
            .create_async()
            .await;

        let gateway = HttpPaymentGateway::new(config(&server))?;

        let issued = gateway.access_token().await?;

        assert_eq!(issued, token());

        mock.assert_async().await;

        Ok(())
    }

    #[tokio::test]
    async fn access_token_rejected_returns_unexpected_response() -> TestResult {
        let mut server = Server::new_async().await;

        let _mock = server
            .mock("POST", "/oauth2/token")
            .with_status(401)
            .with_body("invalid client")
            .create_async()
            .await;

        let gateway = HttpPaymentGateway::new(config(&server))?;

        let result = gateway.access_token().await;

        match result {
            Err(GatewayError::UnexpectedResponse(message)) => {
                assert!(message.contains("token request failed"), "got {message}");
                assert!(message.contains("401"), "got {message}");
            }
            other => panic!("expected UnexpectedResponse, got {other:?}"),
        }

        Ok(())
    }

    #[tokio::test]
    async fn charge_sends_bearer_token_and_cryptogram() -> TestResult {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("POST", "/payments")
            .match_header("authorization", "Bearer tok-123")
            .match_body(Matcher::PartialJson(json!({
                "amount": 150.0,
                "currency": "KZT",
                "invoice_id": "42",
                "terminal_id": "67e34d63-102f-4bd1-898e-370781d0074d",
                "cryptogram": "c2VhbGVk",
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":"pay-1","status":"AUTH"}"#)
            .expect(1)
            .create_async()
            .await;

        let gateway = HttpPaymentGateway::new(config(&server))?;

        let result = gateway
            .charge(
                token(),
                "c2VhbGVk".to_string(),
                Charge {
                    amount: 150.0,
                    invoice_id: "42".to_string(),
                },
            )
            .await?;

        assert_eq!(
            result,
            ChargeResult {
                id: "pay-1".to_string(),
                status: "AUTH".to_string(),
            }
        );

        mock.assert_async().await;

        Ok(())
    }

    #[tokio::test]
    async fn charge_declined_returns_unexpected_response() -> TestResult {
        let mut server = Server::new_async().await;

        let _mock = server
            .mock("POST", "/payments")
            .with_status(402)
            .with_body(r#"{"error":"declined"}"#)
            .create_async()
            .await;

        let gateway = HttpPaymentGateway::new(config(&server))?;

        let result = gateway
            .charge(
                token(),
                "c2VhbGVk".to_string(),
                Charge {
                    amount: 1.0,
                    invoice_id: "1".to_string(),
                },
            )
            .await;

        assert!(
            matches!(result, Err(GatewayError::UnexpectedResponse(ref message)) if message.contains("payment request failed")),
            "expected UnexpectedResponse, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let config = GatewayConfig {
            token_url: String::new(),
            gateway_url: String::new(),
            client_id: "id".to_string(),
            secret_key: "s3cret".to_string(),
            scope: String::new(),
            terminal_id: String::new(),
            currency: String::new(),
            timeout: Duration::from_secs(1),
        };

        assert!(!format!("{config:?}").contains("s3cret"));
        assert!(!format!("{:?}", token()).contains("tok-123"));
    }
}
