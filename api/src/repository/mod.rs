pub mod booking_repository;
pub mod category_repository;
pub mod payment_repository;
pub mod product_repository;
pub mod user_repository;

use futures::stream::TryStreamExt;
use mongodb::Cursor;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

pub const USERS: &str = "users";
pub const CATEGORIES: &str = "watchCategories";
pub const PRODUCTS: &str = "products";
pub const BOOKINGS: &str = "bookings";
pub const PAYMENTS: &str = "payments";

async fn collect<T>(mut cursor: Cursor<T>) -> Result<Vec<T>, ApiError>
where
    T: DeserializeOwned + Unpin + Send + Sync,
{
    let mut items = Vec::new();
    while let Some(item) = cursor.try_next().await? {
        items.push(item);
    }
    Ok(items)
}
