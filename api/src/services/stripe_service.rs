use log::{info, warn};
use serde::Deserialize;

use crate::error::ApiError;

pub const CURRENCY: &str = "usd";

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: Option<String>,
    pub amount: i64,
    pub currency: String,
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

/// Thin client for the payment-intents endpoint of Stripe's REST API.
pub struct StripeClient {
    http: reqwest::Client,
    base_url: String,
    secret_key: String,
}

impl StripeClient {
    pub fn new(base_url: &str, secret_key: &str) -> Self {
        StripeClient {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            secret_key: secret_key.to_string(),
        }
    }

    pub fn payment_intents_url(&self) -> String {
        format!("{}/v1/payment_intents", self.base_url)
    }

    pub async fn create_payment_intent(&self, amount: i64, currency: &str) -> Result<PaymentIntent, ApiError> {
        info!("creating payment intent for {} {}", amount, currency);
        let response = self
            .http
            .post(self.payment_intents_url())
            .bearer_auth(&self.secret_key)
            .form(&intent_form(amount, currency))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<StripeErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error.message)
                .unwrap_or_else(|| format!("payment processor returned {}", status));
            warn!("payment intent rejected: {}", message);
            return Err(ApiError::Payment(message));
        }

        let intent = response.json::<PaymentIntent>().await?;
        info!(
            "payment intent {} for {} {} is {}",
            intent.id, intent.amount, intent.currency, intent.status
        );
        Ok(intent)
    }
}

pub fn intent_form(amount: i64, currency: &str) -> Vec<(&'static str, String)> {
    vec![
        ("amount", amount.to_string()),
        ("currency", currency.to_string()),
        ("payment_method_types[]", "card".to_string()),
    ]
}

/// Turns a display price such as `"$120"` into cents. The first character is
/// the currency symbol; after it only the leading integer counts, so
/// `"$1,200"` is 100 cents and `"$19.99"` is 1900.
pub fn price_to_cents(price: &str) -> Result<i64, ApiError> {
    let invalid = || ApiError::Payment(format!("invalid price '{}'", price));

    let mut chars = price.chars();
    chars.next();
    let rest = chars.as_str().trim_start();
    let (sign, unsigned) = match rest.strip_prefix('-') {
        Some(r) => (-1, r),
        None => (1, rest.strip_prefix('+').unwrap_or(rest)),
    };
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());

    let whole: i64 = unsigned[..end].parse().map_err(|_| invalid())?;
    let cents = whole.checked_mul(100).ok_or_else(invalid)? * sign;
    if cents <= 0 {
        return Err(ApiError::Payment("Amount must be greater than zero".to_string()));
    }
    Ok(cents)
}
