use crate::utils::constants::PENALTY_CURRENCY;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;

const PAYMENT_INTENTS_URL: &str = "https://api.stripe.com/v1/payment_intents";

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("payment request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("payment declined: {0}")]
    Declined(String),

    #[error("invalid charge amount: {0}")]
    InvalidAmount(i64),
}

/// Thin client for the payment processor. Creates the penalty charge
/// and hands back its intent id; capture, void and refund are handled
/// on the processor side.
#[derive(Clone)]
pub struct StripeClient {
    http: Client,
    secret_key: SecretString,
}

#[derive(Debug, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub status: String,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    message: Option<String>,
}

impl StripeClient {
    pub fn new(secret_key: SecretString) -> Self {
        StripeClient {
            http: Client::new(),
            secret_key,
        }
    }

    pub fn from_env() -> Self {
        Self::new(SecretString::new(
            std::env::var("STRIPE_SECRET_KEY").unwrap(),
        ))
    }

    /// Charges the penalty against the user's saved payment method.
    /// Amount is whole yen.
    pub async fn charge_penalty(
        &self,
        amount: i64,
        payment_method_id: &str,
    ) -> Result<PaymentIntent, PaymentError> {
        if amount <= 0 {
            return Err(PaymentError::InvalidAmount(amount));
        }

        let response = self
            .http
            .post(PAYMENT_INTENTS_URL)
            .bearer_auth(self.secret_key.expose_secret())
            .form(&charge_params(amount, payment_method_id))
            .send()
            .await?;

        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            let status = response.status();
            let message = response
                .json::<StripeErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error.message)
                .unwrap_or_else(|| format!("http status {status}"));
            Err(PaymentError::Declined(message))
        }
    }
}

fn charge_params(amount: i64, payment_method_id: &str) -> Vec<(&'static str, String)> {
    vec![
        ("amount", amount.to_string()),
        ("currency", PENALTY_CURRENCY.to_string()),
        ("capture_method", "manual".to_string()),
        ("payment_method", payment_method_id.to_string()),
        ("confirm", "true".to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_payment_intent() {
        let body = r#"{"id":"pi_123","status":"requires_capture"}"#;
        let intent: PaymentIntent = serde_json::from_str(body).unwrap();
        assert_eq!(intent.id, "pi_123");
        assert_eq!(intent.status, "requires_capture");
    }

    #[test]
    fn charge_params_carry_the_full_intent() {
        let params = charge_params(5000, "pm_123");
        assert!(params.contains(&("amount", "5000".to_string())));
        assert!(params.contains(&("currency", "jpy".to_string())));
        assert!(params.contains(&("capture_method", "manual".to_string())));
        assert!(params.contains(&("payment_method", "pm_123".to_string())));
        assert!(params.contains(&("confirm", "true".to_string())));
    }

    #[tokio::test]
    async fn non_positive_amounts_never_reach_the_processor() {
        let client = StripeClient::new(SecretString::new("sk_test".to_string()));
        assert!(matches!(
            client.charge_penalty(0, "pm_123").await,
            Err(PaymentError::InvalidAmount(0))
        ));
        assert!(matches!(
            client.charge_penalty(-100, "pm_123").await,
            Err(PaymentError::InvalidAmount(-100))
        ));
    }
}
