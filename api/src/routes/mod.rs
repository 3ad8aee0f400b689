pub mod auth;
pub mod bookings;
pub mod categories;
pub mod payments;
pub mod products;
pub mod users;

use log::error;
use rocket::{get, routes, Route};

use crate::error::ApiError;

#[get("/")]
pub fn index() -> &'static str {
    "Rewatch Server Running"
}

/// Earlier writes of a fan-out are not rolled back; this only records which
/// one landed before the error goes back to the client.
pub(crate) fn after_partial_write(done: &'static str) -> impl FnOnce(ApiError) -> ApiError {
    move |e| {
        error!("{}, but the follow-up write failed: {}", done, e);
        e
    }
}

pub fn all() -> Vec<Route> {
    routes![
        index,
        auth::issue_token,
        users::user_role,
        users::create_user,
        users::users_by_role,
        users::delete_user,
        users::verify_seller,
        users::add_to_wishlist,
        users::remove_from_wishlist,
        categories::get_categories,
        categories::products_by_category,
        products::seller_products,
        products::promoted_products,
        products::wishlisted_products,
        products::add_product,
        products::delete_product,
        products::promote_product,
        bookings::add_booking,
        bookings::buyer_bookings,
        bookings::get_booking,
        bookings::delete_booking,
        payments::create_payment_intent,
        payments::add_payment,
    ]
}
