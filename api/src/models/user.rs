use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::models::id_from_bson;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Buyer,
    Seller,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Buyer => "buyer",
            Role::Seller => "seller",
            Role::Admin => "admin",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub email: String,
    // kept as stored; only the three known roles pass a guard
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub wishlist: Vec<Bson>,
    // photo url, sign-in provider and whatever else the client sends
    #[serde(flatten)]
    pub profile: Document,
}

impl User {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role.as_deref() == Some(role.as_str())
    }

    /// Sign-ups without a role register as buyers.
    pub fn fill_default_role(&mut self) {
        if self.role.is_none() {
            self.role = Some(Role::Buyer.as_str().to_string());
        }
    }
}

/// A product snapshot posted into a user's wishlist. Only `_id` is
/// interpreted; the rest is stored as the client sent it.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct WishlistItem {
    #[serde(rename = "_id")]
    pub id: Bson,
    #[serde(flatten)]
    pub snapshot: Document,
}

impl WishlistItem {
    pub fn product_id(&self) -> Result<ObjectId, ApiError> {
        id_from_bson(&self.id)
    }

    /// Same snapshot with `_id` as a hex string, the one shape stored.
    pub fn normalized(mut self) -> Result<Self, ApiError> {
        self.id = Bson::String(self.product_id()?.to_hex());
        Ok(self)
    }
}

/// Which collection a user delete fans out to, keyed by the role the caller
/// says the user had.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cascade {
    SellerProducts,
    BuyerBookings,
}

pub fn cascade_for(role: Option<&str>) -> Option<Cascade> {
    match role {
        Some("seller") => Some(Cascade::SellerProducts),
        Some("buyer") => Some(Cascade::BuyerBookings),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{self, doc};
    use serde_json::json;

    #[test]
    fn new_users_default_to_unverified_buyers() {
        let mut user: User = serde_json::from_value(json!({
            "name": "Ana",
            "email": "ana@example.com",
            "photoURL": "https://img.example.com/ana.png"
        }))
        .unwrap();
        user.fill_default_role();

        assert!(user.has_role(Role::Buyer));
        assert!(!user.is_verified);
        assert!(user.wishlist.is_empty());
        assert_eq!(user.profile.get_str("photoURL").unwrap(), "https://img.example.com/ana.png");
    }

    #[test]
    fn stored_document_keeps_camel_case_and_extras() {
        let user: User = serde_json::from_value(json!({
            "email": "sam@example.com",
            "role": "seller",
            "isVerified": true,
            "phone": "555-0101"
        }))
        .unwrap();

        let stored = bson::to_document(&user).unwrap();
        assert_eq!(stored.get_str("role").unwrap(), "seller");
        assert!(stored.get_bool("isVerified").unwrap());
        assert_eq!(stored.get_str("phone").unwrap(), "555-0101");
        assert!(!stored.contains_key("_id"));
        assert!(!stored.contains_key("wishlist"));
    }

    #[test]
    fn explicit_role_survives_defaulting() {
        let mut user: User = serde_json::from_value(json!({ "email": "sam@example.com", "role": "seller" })).unwrap();
        user.fill_default_role();
        assert!(user.has_role(Role::Seller));
        assert!(!user.has_role(Role::Buyer));
    }

    #[test]
    fn stored_user_without_role_has_none() {
        let user: User = bson::from_document(doc! { "email": "a@x.com" }).unwrap();
        assert_eq!(user.role, None);
        assert!(!user.has_role(Role::Buyer));
        assert!(!user.has_role(Role::Seller));
        assert!(!user.has_role(Role::Admin));
    }

    #[test]
    fn unknown_roles_and_loose_fields_still_decode() {
        let user: User = bson::from_document(doc! {
            "role": "moderator",
            "wishlist": ["legacy-entry", { "_id": "0123456789abcdef01234567" }],
        })
        .unwrap();
        assert_eq!(user.role.as_deref(), Some("moderator"));
        assert_eq!(user.email, "");
        assert_eq!(user.wishlist.len(), 2);
        assert!(!user.has_role(Role::Admin));
    }

    #[test]
    fn display_name_falls_back_to_email() {
        let user: User = serde_json::from_value(json!({ "email": "kim@example.com" })).unwrap();
        assert_eq!(user.display_name(), "kim@example.com");
    }

    #[test]
    fn wishlist_item_keeps_its_snapshot() {
        let oid = ObjectId::new();
        let item: WishlistItem = serde_json::from_value(json!({
            "_id": oid.to_hex(),
            "productName": "Seiko 5",
            "resalePrice": "$120"
        }))
        .unwrap();

        assert_eq!(item.product_id().unwrap(), oid);
        let stored = bson::to_document(&item).unwrap();
        assert_eq!(stored, doc! { "_id": oid.to_hex(), "productName": "Seiko 5", "resalePrice": "$120" });
    }

    #[test]
    fn wishlist_ids_are_stored_as_hex_whatever_the_client_sent() {
        let oid = ObjectId::new();
        let item: WishlistItem =
            serde_json::from_value(json!({ "_id": { "$oid": oid.to_hex() }, "productName": "Seiko 5" })).unwrap();
        let item = item.normalized().unwrap();
        assert_eq!(item.id, Bson::String(oid.to_hex()));

        let bad: WishlistItem = serde_json::from_value(json!({ "_id": 7 })).unwrap();
        assert!(matches!(bad.normalized(), Err(ApiError::InvalidId(_))));
    }

    #[test]
    fn cascade_depends_on_role() {
        assert_eq!(cascade_for(Some("seller")), Some(Cascade::SellerProducts));
        assert_eq!(cascade_for(Some("buyer")), Some(Cascade::BuyerBookings));
        assert_eq!(cascade_for(Some("admin")), None);
        assert_eq!(cascade_for(None), None);
    }
}
