use rocket::serde::json::Json;
use rocket::{get, State};

use crate::error::Result;
use crate::models::category::Category;
use crate::models::parse_id;
use crate::models::product::Product;
use crate::models::wire::Wire;
use crate::repository::category_repository::CategoryRepository;
use crate::repository::product_repository::ProductRepository;

#[get("/categories")]
pub async fn get_categories(categories: &State<CategoryRepository>) -> Result<Json<Wire<Vec<Category>>>> {
    Ok(Json(Wire(categories.find_all().await?)))
}

/// Every product filed under the category, whatever its status.
#[get("/categories/<id>")]
pub async fn products_by_category(
    id: &str,
    products: &State<ProductRepository>,
) -> Result<Json<Wire<Vec<Product>>>> {
    let category_id = parse_id(id)?;
    Ok(Json(Wire(products.find_by_category(category_id).await?)))
}
