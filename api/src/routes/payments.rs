use log::info;
use rocket::serde::json::Json;
use rocket::{post, State};
use serde::Serialize;

use crate::error::{ApiError, Result};
use crate::models::payment::{Payment, PaymentIntentRequest};
use crate::models::product::ProductStatus;
use crate::models::response::InsertSummary;
use crate::repository::booking_repository::BookingRepository;
use crate::repository::payment_repository::PaymentRepository;
use crate::repository::product_repository::ProductRepository;
use crate::routes::after_partial_write;
use crate::services::stripe_service::{price_to_cents, StripeClient, CURRENCY};

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ClientSecret {
    pub client_secret: String,
}

#[post("/create-payment-intent", format = "json", data = "<booking>")]
pub async fn create_payment_intent(
    booking: Json<PaymentIntentRequest>,
    stripe: &State<StripeClient>,
) -> Result<Json<ClientSecret>> {
    let amount = price_to_cents(&booking.price)?;
    let intent = stripe.create_payment_intent(amount, CURRENCY).await?;
    let client_secret = intent
        .client_secret
        .ok_or_else(|| ApiError::Payment(format!("payment intent {} has no client secret", intent.id)))?;

    Ok(Json(ClientSecret { client_secret }))
}

/// Records a completed payment, marks the booking paid and the product sold.
#[post("/payment", format = "json", data = "<payment>")]
pub async fn add_payment(
    payment: Json<Payment>,
    payments: &State<PaymentRepository>,
    bookings: &State<BookingRepository>,
    products: &State<ProductRepository>,
) -> Result<Json<InsertSummary>> {
    let payment = payment.into_inner();
    let booking_id = payment.booking_object_id()?;
    let product_id = payment.product_object_id()?;

    let result = payments.create(&payment).await?;
    bookings
        .mark_paid(booking_id, &payment.transaction_id)
        .await
        .map_err(after_partial_write("payment recorded"))?;
    products
        .set_status(product_id, ProductStatus::Sold)
        .await
        .map_err(after_partial_write("payment recorded and booking paid"))?;

    info!("booking {} paid with transaction {}", booking_id, payment.transaction_id);
    Ok(Json(result))
}
