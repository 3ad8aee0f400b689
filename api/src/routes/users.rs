use log::{debug, info};
use rocket::serde::json::Json;
use rocket::{delete, get, patch, post, State};
use serde::Serialize;

use crate::error::Result;
use crate::guards::AdminUser;
use crate::models::parse_id;
use crate::models::response::{ApiResponse, DeleteSummary, InsertSummary, UpdateSummary};
use crate::models::user::{cascade_for, Cascade, User, WishlistItem};
use crate::models::wire::Wire;
use crate::repository::booking_repository::BookingRepository;
use crate::repository::product_repository::ProductRepository;
use crate::repository::user_repository::UserRepository;
use crate::routes::after_partial_write;

#[derive(Serialize, Debug)]
pub struct RoleResponse {
    pub role: Option<String>,
}

#[derive(Serialize, Debug)]
#[serde(untagged)]
pub enum UserCreated {
    Existing(ApiResponse<()>),
    Inserted(InsertSummary),
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UserDeleted {
    pub result: DeleteSummary,
    pub delete_result: Option<DeleteSummary>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SellerVerified {
    pub result: UpdateSummary,
    pub update_result: UpdateSummary,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WishlistUpdated {
    pub user_update: UpdateSummary,
    pub product_update: UpdateSummary,
}

#[get("/users/userRole/<email>")]
pub async fn user_role(email: &str, users: &State<UserRepository>) -> Result<Json<RoleResponse>> {
    let user = users.find_by_email(email).await?;
    Ok(Json(RoleResponse {
        role: user.and_then(|u| u.role),
    }))
}

/// Registers a user once per email; repeat sign-ins get a greeting instead.
#[post("/users", format = "json", data = "<new_user>")]
pub async fn create_user(new_user: Json<User>, users: &State<UserRepository>) -> Result<Json<UserCreated>> {
    let mut user = new_user.into_inner();
    if users.find_by_email(&user.email).await?.is_some() {
        debug!("returning user {}", user.email);
        let greeting = format!("Welcome Back {}", user.display_name());
        return Ok(Json(UserCreated::Existing(ApiResponse::message(greeting))));
    }

    user.fill_default_role();
    let result = users.create(&user).await?;
    info!("registered {} as {}", user.email, user.role.as_deref().unwrap_or_default());
    Ok(Json(UserCreated::Inserted(result)))
}

#[get("/users?<email>&<role>")]
pub async fn users_by_role(
    email: &str,
    role: &str,
    admin: AdminUser,
    users: &State<UserRepository>,
) -> Result<Json<Wire<Vec<User>>>> {
    admin.0.ensure_is(email)?;
    Ok(Json(Wire(users.find_by_role(role).await?)))
}

/// Deletes the user, then whatever they owned according to `role`.
#[delete("/users?<id>&<role>")]
pub async fn delete_user(
    id: &str,
    role: Option<&str>,
    admin: AdminUser,
    users: &State<UserRepository>,
    products: &State<ProductRepository>,
    bookings: &State<BookingRepository>,
) -> Result<Json<UserDeleted>> {
    let user_id = parse_id(id)?;
    info!("{} deletes user {}", admin.0.email, user_id);
    let result = users.delete_by_id(user_id).await?;

    let delete_result = match cascade_for(role) {
        Some(Cascade::SellerProducts) => Some(
            products
                .delete_by_seller(user_id)
                .await
                .map_err(after_partial_write("seller deleted"))?,
        ),
        Some(Cascade::BuyerBookings) => Some(
            bookings
                .delete_by_buyer(user_id)
                .await
                .map_err(after_partial_write("buyer deleted"))?,
        ),
        None => None,
    };

    Ok(Json(UserDeleted { result, delete_result }))
}

#[patch("/verify?<id>")]
pub async fn verify_seller(
    id: &str,
    admin: AdminUser,
    users: &State<UserRepository>,
    products: &State<ProductRepository>,
) -> Result<Json<SellerVerified>> {
    let seller_id = parse_id(id)?;
    info!("{} verifies seller {}", admin.0.email, seller_id);
    let result = users.mark_verified(seller_id).await?;
    let update_result = products
        .mark_seller_verified(seller_id)
        .await
        .map_err(after_partial_write("seller verified"))?;

    Ok(Json(SellerVerified { result, update_result }))
}

#[post("/users/wishlist?<email>", format = "json", data = "<item>")]
pub async fn add_to_wishlist(
    email: &str,
    item: Json<WishlistItem>,
    users: &State<UserRepository>,
    products: &State<ProductRepository>,
) -> Result<Json<WishlistUpdated>> {
    let item = item.into_inner().normalized()?;
    let product_id = item.product_id()?;
    let user_update = users.push_wishlist(email, &item).await?;
    let product_update = products
        .add_wishlister(product_id, email)
        .await
        .map_err(after_partial_write("wishlist entry stored on user"))?;

    Ok(Json(WishlistUpdated { user_update, product_update }))
}

#[delete("/users/wishlist?<email>", format = "json", data = "<item>")]
pub async fn remove_from_wishlist(
    email: &str,
    item: Json<WishlistItem>,
    users: &State<UserRepository>,
    products: &State<ProductRepository>,
) -> Result<Json<WishlistUpdated>> {
    let product_id = item.product_id()?;
    let user_update = users.pull_wishlist(email, product_id).await?;
    let product_update = products
        .remove_wishlister(product_id, email)
        .await
        .map_err(after_partial_write("wishlist entry removed from user"))?;

    Ok(Json(WishlistUpdated { user_update, product_update }))
}
