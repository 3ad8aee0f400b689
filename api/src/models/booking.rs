use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::models::id_from_bson;
use crate::models::user::User;

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub buyer_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer_id: Option<ObjectId>,
    #[serde(default)]
    pub product_id: Bson,
    #[serde(default)]
    pub paid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    // price, meeting location, phone...
    #[serde(flatten)]
    pub details: Document,
}

impl Booking {
    pub fn product_object_id(&self) -> Result<ObjectId, ApiError> {
        id_from_bson(&self.product_id)
    }

    pub fn assign_buyer(&mut self, buyers: &[User]) {
        for buyer in buyers {
            if buyer.email == self.buyer_email {
                self.buyer_id = buyer.id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Role;
    use serde_json::json;

    fn buyer(email: &str) -> User {
        User {
            id: Some(ObjectId::new()),
            name: None,
            email: email.to_string(),
            role: Some(Role::Buyer.as_str().to_string()),
            is_verified: false,
            wishlist: vec![],
            profile: Document::new(),
        }
    }

    #[test]
    fn assigns_buyer_by_email() {
        let product = ObjectId::new();
        let mut booking: Booking = serde_json::from_value(json!({
            "buyerEmail": "ana@example.com",
            "productId": product.to_hex(),
            "price": "$120"
        }))
        .unwrap();
        let buyers = vec![buyer("kim@example.com"), buyer("ana@example.com")];

        booking.assign_buyer(&buyers);

        assert_eq!(booking.buyer_id, buyers[1].id);
        assert!(!booking.paid);
        assert_eq!(booking.product_object_id().unwrap(), product);
        assert_eq!(booking.details.get_str("price").unwrap(), "$120");
    }

    #[test]
    fn rejects_malformed_product_reference() {
        let booking: Booking = serde_json::from_value(json!({
            "buyerEmail": "ana@example.com",
            "productId": "42"
        }))
        .unwrap();
        assert!(matches!(booking.product_object_id(), Err(ApiError::InvalidId(_))));

        let missing: Booking = serde_json::from_value(json!({ "buyerEmail": "ana@example.com" })).unwrap();
        assert!(matches!(missing.product_object_id(), Err(ApiError::InvalidId(_))));
    }
}
