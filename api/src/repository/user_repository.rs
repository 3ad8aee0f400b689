// src/repository/user_repository.rs
use log::debug;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, to_bson};
use mongodb::{Collection, Database};

use crate::error::ApiError;
use crate::models::response::{DeleteSummary, InsertSummary, UpdateSummary};
use crate::models::user::{Role, User, WishlistItem};
use crate::repository::{collect, USERS};

pub struct UserRepository {
    collection: Collection<User>,
}

impl UserRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<User>(USERS);
        UserRepository { collection }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let filter = doc! { "email": email };
        Ok(self.collection.find_one(filter, None).await?)
    }

    pub async fn find_by_role(&self, role: &str) -> Result<Vec<User>, ApiError> {
        let cursor = self.collection.find(doc! { "role": role }, None).await?;
        collect(cursor).await
    }

    pub async fn find_sellers(&self) -> Result<Vec<User>, ApiError> {
        self.find_by_role(Role::Seller.as_str()).await
    }

    pub async fn find_buyers(&self) -> Result<Vec<User>, ApiError> {
        self.find_by_role(Role::Buyer.as_str()).await
    }

    pub async fn create(&self, user: &User) -> Result<InsertSummary, ApiError> {
        debug!("insert user: {}", user.email);
        Ok(self.collection.insert_one(user, None).await?.into())
    }

    pub async fn delete_by_id(&self, id: ObjectId) -> Result<DeleteSummary, ApiError> {
        debug!("delete user: {}", id);
        Ok(self.collection.delete_one(doc! { "_id": id }, None).await?.into())
    }

    pub async fn mark_verified(&self, id: ObjectId) -> Result<UpdateSummary, ApiError> {
        let update = doc! { "$set": { "isVerified": true } };
        Ok(self.collection.update_one(doc! { "_id": id }, update, None).await?.into())
    }

    pub async fn push_wishlist(&self, email: &str, item: &WishlistItem) -> Result<UpdateSummary, ApiError> {
        let update = doc! { "$push": { "wishlist": to_bson(item)? } };
        Ok(self.collection.update_one(doc! { "email": email }, update, None).await?.into())
    }

    /// Drops every snapshot of the product, on every user record carrying
    /// that email. Snapshots stored before ids were normalised may hold the
    /// raw ObjectId, so both shapes match.
    pub async fn pull_wishlist(&self, email: &str, product_id: ObjectId) -> Result<UpdateSummary, ApiError> {
        let update = doc! {
            "$pull": { "wishlist": { "_id": { "$in": [product_id.to_hex(), product_id] } } }
        };
        Ok(self.collection.update_many(doc! { "email": email }, update, None).await?.into())
    }
}
