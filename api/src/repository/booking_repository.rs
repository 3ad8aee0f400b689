use log::debug;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::{Collection, Database};

use crate::error::ApiError;
use crate::models::booking::Booking;
use crate::models::response::{DeleteSummary, InsertSummary, UpdateSummary};
use crate::repository::{collect, BOOKINGS};

pub struct BookingRepository {
    collection: Collection<Booking>,
}

impl BookingRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<Booking>(BOOKINGS);
        BookingRepository { collection }
    }

    pub async fn find_by_id(&self, id: ObjectId) -> Result<Option<Booking>, ApiError> {
        Ok(self.collection.find_one(doc! { "_id": id }, None).await?)
    }

    pub async fn find_by_buyer_email(&self, email: &str) -> Result<Vec<Booking>, ApiError> {
        let cursor = self.collection.find(doc! { "buyerEmail": email }, None).await?;
        collect(cursor).await
    }

    pub async fn create(&self, booking: &Booking) -> Result<InsertSummary, ApiError> {
        debug!("insert booking for buyer: {}", booking.buyer_email);
        Ok(self.collection.insert_one(booking, None).await?.into())
    }

    pub async fn delete_by_id(&self, id: ObjectId) -> Result<DeleteSummary, ApiError> {
        debug!("delete booking: {}", id);
        Ok(self.collection.delete_one(doc! { "_id": id }, None).await?.into())
    }

    pub async fn delete_by_buyer(&self, buyer_id: ObjectId) -> Result<DeleteSummary, ApiError> {
        debug!("delete bookings of buyer: {}", buyer_id);
        Ok(self.collection.delete_many(doc! { "buyerId": buyer_id }, None).await?.into())
    }

    pub async fn mark_paid(&self, id: ObjectId, transaction_id: &str) -> Result<UpdateSummary, ApiError> {
        let update = doc! { "$set": { "paid": true, "transactionId": transaction_id } };
        Ok(self.collection.update_one(doc! { "_id": id }, update, None).await?.into())
    }
}
