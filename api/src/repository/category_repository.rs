use mongodb::bson::doc;
use mongodb::{Collection, Database};

use crate::error::ApiError;
use crate::models::category::Category;
use crate::repository::{collect, CATEGORIES};

pub struct CategoryRepository {
    collection: Collection<Category>,
}

impl CategoryRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<Category>(CATEGORIES);
        CategoryRepository { collection }
    }

    pub async fn find_all(&self) -> Result<Vec<Category>, ApiError> {
        let cursor = self.collection.find(doc! {}, None).await?;
        collect(cursor).await
    }
}
