use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::models::id_from_bson;

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub booking_id: Bson,
    #[serde(default)]
    pub product_id: Bson,
    #[serde(default)]
    pub transaction_id: String,
    // price, buyer email...
    #[serde(flatten)]
    pub details: Document,
}

impl Payment {
    pub fn booking_object_id(&self) -> Result<ObjectId, ApiError> {
        id_from_bson(&self.booking_id)
    }

    pub fn product_object_id(&self) -> Result<ObjectId, ApiError> {
        id_from_bson(&self.product_id)
    }
}

/// Body of `POST /create-payment-intent`: the booking being paid for.
#[derive(Deserialize, Debug)]
pub struct PaymentIntentRequest {
    pub price: String,
}
