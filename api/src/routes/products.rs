use chrono::Utc;
use log::{debug, info};
use rocket::serde::json::Json;
use rocket::{delete, get, patch, post, State};

use crate::error::Result;
use crate::guards::SellerUser;
use crate::models::parse_id;
use crate::models::product::{is_truthy, Product};
use crate::models::response::{DeleteSummary, InsertSummary, UpdateSummary};
use crate::models::wire::Wire;
use crate::repository::category_repository::CategoryRepository;
use crate::repository::product_repository::ProductRepository;
use crate::repository::user_repository::UserRepository;

/// A seller's own listings.
#[get("/products?<email>")]
pub async fn seller_products(
    email: &str,
    _seller: SellerUser,
    products: &State<ProductRepository>,
) -> Result<Json<Wire<Vec<Product>>>> {
    Ok(Json(Wire(products.find_by_seller_email(email).await?)))
}

#[get("/products/promoted?<promoted>")]
pub async fn promoted_products(
    promoted: Option<&str>,
    products: &State<ProductRepository>,
) -> Result<Json<Wire<Vec<Product>>>> {
    Ok(Json(Wire(products.find_promoted(is_truthy(promoted)).await?)))
}

#[get("/products/wishlist?<email>")]
pub async fn wishlisted_products(
    email: &str,
    products: &State<ProductRepository>,
) -> Result<Json<Wire<Vec<Product>>>> {
    Ok(Json(Wire(products.find_wishlisted_by(email).await?)))
}

/// Lists a product after resolving its category and seller references by
/// name and email.
#[post("/products", format = "json", data = "<new_product>")]
pub async fn add_product(
    new_product: Json<Product>,
    categories: &State<CategoryRepository>,
    users: &State<UserRepository>,
    products: &State<ProductRepository>,
) -> Result<Json<InsertSummary>> {
    let mut product = new_product.into_inner();

    product.assign_category(&categories.find_all().await?);
    product.assign_seller(&users.find_sellers().await?);
    if product.category_id.is_none() {
        debug!("no category named '{}'", product.category_name);
    }

    let result = products.create(&product).await?;
    info!("{} listed a product under '{}'", product.seller_email, product.category_name);
    Ok(Json(result))
}

#[delete("/products?<id>")]
pub async fn delete_product(id: &str, products: &State<ProductRepository>) -> Result<Json<DeleteSummary>> {
    let product_id = parse_id(id)?;
    Ok(Json(products.delete_by_id(product_id).await?))
}

#[patch("/products/promote?<id>")]
pub async fn promote_product(
    id: &str,
    seller: SellerUser,
    products: &State<ProductRepository>,
) -> Result<Json<UpdateSummary>> {
    let product_id = parse_id(id)?;
    let promote_time = Utc::now().timestamp_millis();
    info!("{} promotes product {}", seller.0.email, product_id);
    Ok(Json(products.promote(product_id, promote_time).await?))
}
