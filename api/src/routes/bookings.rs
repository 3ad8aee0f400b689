use log::info;
use rocket::serde::json::Json;
use rocket::{delete, get, post, FromForm, State};
use serde::Serialize;

use crate::error::Result;
use crate::guards::BuyerUser;
use crate::models::booking::Booking;
use crate::models::parse_id;
use crate::models::product::ProductStatus;
use crate::models::response::{DeleteSummary, InsertSummary, UpdateSummary};
use crate::models::wire::Wire;
use crate::repository::booking_repository::BookingRepository;
use crate::repository::product_repository::ProductRepository;
use crate::repository::user_repository::UserRepository;
use crate::routes::after_partial_write;

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct BookingCreated {
    pub update_result: UpdateSummary,
    pub result: InsertSummary,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct BookingDeleted {
    pub booking_delete: DeleteSummary,
    pub update_result: UpdateSummary,
}

#[derive(FromForm, Debug)]
pub struct BookingTarget {
    pub id: String,
    #[field(name = "productId")]
    pub product_id: String,
}

/// Marks the product booked, then stores the booking linked to its buyer.
#[post("/bookings", format = "json", data = "<new_booking>")]
pub async fn add_booking(
    new_booking: Json<Booking>,
    users: &State<UserRepository>,
    products: &State<ProductRepository>,
    bookings: &State<BookingRepository>,
) -> Result<Json<BookingCreated>> {
    let mut booking = new_booking.into_inner();
    let product_id = booking.product_object_id()?;

    let update_result = products.set_status(product_id, ProductStatus::Booked).await?;

    let buyers = users
        .find_buyers()
        .await
        .map_err(after_partial_write("product marked booked"))?;
    booking.assign_buyer(&buyers);
    let result = bookings
        .create(&booking)
        .await
        .map_err(after_partial_write("product marked booked"))?;

    info!("{} booked product {}", booking.buyer_email, product_id);
    Ok(Json(BookingCreated { update_result, result }))
}

#[get("/bookings?<email>")]
pub async fn buyer_bookings(
    email: &str,
    buyer: BuyerUser,
    bookings: &State<BookingRepository>,
) -> Result<Json<Wire<Vec<Booking>>>> {
    buyer.0.ensure_is(email)?;
    Ok(Json(Wire(bookings.find_by_buyer_email(email).await?)))
}

/// The booking, or `null` when no booking has that id.
#[get("/bookings/<id>")]
pub async fn get_booking(id: &str, bookings: &State<BookingRepository>) -> Result<Json<Wire<Option<Booking>>>> {
    let booking_id = parse_id(id)?;
    Ok(Json(Wire(bookings.find_by_id(booking_id).await?)))
}

/// Cancels a booking and puts the product back on sale.
#[delete("/bookings?<target..>")]
pub async fn delete_booking(
    target: BookingTarget,
    products: &State<ProductRepository>,
    bookings: &State<BookingRepository>,
) -> Result<Json<BookingDeleted>> {
    let booking_id = parse_id(&target.id)?;
    let product_id = parse_id(&target.product_id)?;

    let booking_delete = bookings.delete_by_id(booking_id).await?;
    let update_result = products
        .set_status(product_id, ProductStatus::Available)
        .await
        .map_err(after_partial_write("booking deleted"))?;

    info!("booking {} cancelled, product {} available again", booking_id, product_id);
    Ok(Json(BookingDeleted { booking_delete, update_result }))
}
