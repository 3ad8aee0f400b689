use log::debug;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::options::FindOptions;
use mongodb::{Collection, Database};

use crate::error::ApiError;
use crate::models::product::{Product, ProductStatus};
use crate::models::response::{DeleteSummary, InsertSummary, UpdateSummary};
use crate::repository::{collect, PRODUCTS};

pub struct ProductRepository {
    collection: Collection<Product>,
}

impl ProductRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<Product>(PRODUCTS);
        ProductRepository { collection }
    }

    #[cfg(test)]
    pub async fn find_by_id(&self, id: ObjectId) -> Result<Option<Product>, ApiError> {
        Ok(self.collection.find_one(doc! { "_id": id }, None).await?)
    }

    pub async fn find_by_category(&self, category_id: ObjectId) -> Result<Vec<Product>, ApiError> {
        let cursor = self.collection.find(doc! { "categoryID": category_id }, None).await?;
        collect(cursor).await
    }

    pub async fn find_by_seller_email(&self, email: &str) -> Result<Vec<Product>, ApiError> {
        let cursor = self.collection.find(doc! { "sellerEmail": email }, None).await?;
        collect(cursor).await
    }

    /// Available products with the given promotion flag, newest promotion first.
    pub async fn find_promoted(&self, promoted: bool) -> Result<Vec<Product>, ApiError> {
        let filter = doc! {
            "promoted": promoted,
            "status": ProductStatus::Available.as_str(),
        };
        let options = FindOptions::builder().sort(doc! { "promoteTime": -1 }).build();
        let cursor = self.collection.find(filter, options).await?;
        collect(cursor).await
    }

    pub async fn find_wishlisted_by(&self, email: &str) -> Result<Vec<Product>, ApiError> {
        let cursor = self.collection.find(doc! { "userWishlisted": email }, None).await?;
        collect(cursor).await
    }

    pub async fn create(&self, product: &Product) -> Result<InsertSummary, ApiError> {
        debug!("insert product for seller: {}", product.seller_email);
        Ok(self.collection.insert_one(product, None).await?.into())
    }

    pub async fn delete_by_id(&self, id: ObjectId) -> Result<DeleteSummary, ApiError> {
        debug!("delete product: {}", id);
        Ok(self.collection.delete_one(doc! { "_id": id }, None).await?.into())
    }

    pub async fn delete_by_seller(&self, seller_id: ObjectId) -> Result<DeleteSummary, ApiError> {
        debug!("delete products of seller: {}", seller_id);
        Ok(self.collection.delete_many(doc! { "sellerId": seller_id }, None).await?.into())
    }

    pub async fn promote(&self, id: ObjectId, promote_time: i64) -> Result<UpdateSummary, ApiError> {
        let update = doc! { "$set": { "promoted": true, "promoteTime": promote_time } };
        Ok(self.collection.update_one(doc! { "_id": id }, update, None).await?.into())
    }

    pub async fn set_status(&self, id: ObjectId, status: ProductStatus) -> Result<UpdateSummary, ApiError> {
        debug!("product {} -> {}", id, status.as_str());
        let update = doc! { "$set": { "status": status.as_str() } };
        Ok(self.collection.update_one(doc! { "_id": id }, update, None).await?.into())
    }

    pub async fn mark_seller_verified(&self, seller_id: ObjectId) -> Result<UpdateSummary, ApiError> {
        let update = doc! { "$set": { "isSellerVerified": true } };
        Ok(self.collection.update_many(doc! { "sellerId": seller_id }, update, None).await?.into())
    }

    pub async fn add_wishlister(&self, id: ObjectId, email: &str) -> Result<UpdateSummary, ApiError> {
        let update = doc! { "$push": { "userWishlisted": email } };
        Ok(self.collection.update_one(doc! { "_id": id }, update, None).await?.into())
    }

    pub async fn remove_wishlister(&self, id: ObjectId, email: &str) -> Result<UpdateSummary, ApiError> {
        let update = doc! { "$pull": { "userWishlisted": email } };
        Ok(self.collection.update_one(doc! { "_id": id }, update, None).await?.into())
    }
}
