use mongodb::bson::oid::ObjectId;
use mongodb::bson::Document;
use serde::{Deserialize, Serialize};

use crate::models::category::Category;
use crate::models::user::User;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    #[default]
    Available,
    Booked,
    Sold,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Available => "available",
            ProductStatus::Booked => "booked",
            ProductStatus::Sold => "sold",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub seller_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_id: Option<ObjectId>,
    #[serde(default)]
    pub is_seller_verified: bool,
    #[serde(default)]
    pub category_name: String,
    #[serde(rename = "categoryID", default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<ObjectId>,
    #[serde(default)]
    pub status: ProductStatus,
    #[serde(default)]
    pub promoted: bool,
    /// Epoch milliseconds of the last promotion.
    #[serde(
        default,
        deserialize_with = "crate::models::deserialize_millis",
        skip_serializing_if = "Option::is_none"
    )]
    pub promote_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub user_wishlisted: Vec<String>,
    // name, prices, condition, location, image url...
    #[serde(flatten)]
    pub details: Document,
}

impl Product {
    /// Points `categoryID` at the category whose name matches. Every
    /// category is visited, so with duplicate names the last one wins.
    pub fn assign_category(&mut self, categories: &[Category]) {
        for category in categories {
            if category.category_name == self.category_name {
                self.category_id = category.id;
            }
        }
    }

    /// Copies id and verification flag from the seller owning `sellerEmail`.
    pub fn assign_seller(&mut self, sellers: &[User]) {
        for seller in sellers {
            if seller.email == self.seller_email {
                self.seller_id = seller.id;
                self.is_seller_verified = seller.is_verified;
            }
        }
    }
}

/// Query-string truthiness with JavaScript `Boolean(string)` semantics: any
/// non-empty value, including "false", counts as true.
pub fn is_truthy(value: Option<&str>) -> bool {
    value.map_or(false, |v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Role;
    use mongodb::bson::{self, doc};
    use serde_json::json;

    fn product(seller_email: &str, category_name: &str) -> Product {
        serde_json::from_value(json!({
            "productName": "Omega Seamaster",
            "sellerEmail": seller_email,
            "categoryName": category_name,
            "resalePrice": "$2400"
        }))
        .unwrap()
    }

    fn category(name: &str) -> Category {
        Category {
            id: Some(ObjectId::new()),
            category_name: name.to_string(),
            details: Document::new(),
        }
    }

    fn seller(email: &str, verified: bool) -> User {
        User {
            id: Some(ObjectId::new()),
            name: None,
            email: email.to_string(),
            role: Some(Role::Seller.as_str().to_string()),
            is_verified: verified,
            wishlist: vec![],
            profile: Document::new(),
        }
    }

    #[test]
    fn new_listings_start_available_and_unpromoted() {
        let p = product("sam@example.com", "Luxury");
        assert_eq!(p.status, ProductStatus::Available);
        assert!(!p.promoted);
        assert!(p.promote_time.is_none());
        assert_eq!(p.details.get_str("productName").unwrap(), "Omega Seamaster");
    }

    #[test]
    fn assigns_category_by_name() {
        let categories = vec![category("Sport"), category("Luxury"), category("Vintage")];
        let mut p = product("sam@example.com", "Luxury");
        p.assign_category(&categories);
        assert_eq!(p.category_id, categories[1].id);

        let mut orphan = product("sam@example.com", "Smart");
        orphan.assign_category(&categories);
        assert!(orphan.category_id.is_none());
    }

    #[test]
    fn duplicate_category_names_resolve_to_the_last() {
        let categories = vec![category("Luxury"), category("Luxury")];
        let mut p = product("sam@example.com", "Luxury");
        p.assign_category(&categories);
        assert_eq!(p.category_id, categories[1].id);
    }

    #[test]
    fn assigns_seller_and_verification() {
        let sellers = vec![seller("other@example.com", false), seller("sam@example.com", true)];
        let mut p = product("sam@example.com", "Luxury");
        p.assign_seller(&sellers);
        assert_eq!(p.seller_id, sellers[1].id);
        assert!(p.is_seller_verified);

        let mut unknown = product("nobody@example.com", "Luxury");
        unknown.assign_seller(&sellers);
        assert!(unknown.seller_id.is_none());
        assert!(!unknown.is_seller_verified);
    }

    #[test]
    fn stored_product_uses_category_id_key() {
        let mut p = product("sam@example.com", "Luxury");
        let c = category("Luxury");
        p.assign_category(std::slice::from_ref(&c));

        let stored = bson::to_document(&p).unwrap();
        assert_eq!(stored.get_object_id("categoryID").unwrap(), c.id.unwrap());
        assert_eq!(stored.get_str("status").unwrap(), "available");
        assert!(!stored.contains_key("userWishlisted"));
        assert_eq!(stored.get_str("resalePrice").unwrap(), "$2400");
    }

    #[test]
    fn reads_documents_written_by_other_clients() {
        let oid = ObjectId::new();
        let stored = doc! {
            "_id": oid,
            "sellerEmail": "sam@example.com",
            "status": "sold",
            "promoted": true,
            "promoteTime": 1_700_000_000_000_i64,
            "userWishlisted": ["ana@example.com"],
        };
        let p: Product = bson::from_document(stored).unwrap();
        assert_eq!(p.id, Some(oid));
        assert_eq!(p.status, ProductStatus::Sold);
        assert_eq!(p.promote_time, Some(1_700_000_000_000));
        assert_eq!(p.user_wishlisted, vec!["ana@example.com".to_string()]);
    }

    #[test]
    fn promote_time_reads_any_numeric_type() {
        let as_double: Product = bson::from_document(doc! { "promoteTime": 1_700_000_000_000.0_f64 }).unwrap();
        assert_eq!(as_double.promote_time, Some(1_700_000_000_000));

        let as_int: Product = bson::from_document(doc! { "promoteTime": 42_i32 }).unwrap();
        assert_eq!(as_int.promote_time, Some(42));

        let as_null: Product = bson::from_document(doc! { "promoteTime": null }).unwrap();
        assert_eq!(as_null.promote_time, None);
    }

    #[test]
    fn partial_documents_still_decode() {
        let p: Product = bson::from_document(doc! { "productName": "Casio F-91W" }).unwrap();
        assert_eq!(p.seller_email, "");
        assert_eq!(p.category_name, "");
        assert_eq!(p.status, ProductStatus::Available);

        let c: Category = bson::from_document(doc! { "_id": ObjectId::new() }).unwrap();
        assert_eq!(c.category_name, "");
    }

    #[test]
    fn truthiness_matches_javascript_boolean() {
        assert!(is_truthy(Some("true")));
        assert!(is_truthy(Some("false")));
        assert!(is_truthy(Some("0")));
        assert!(!is_truthy(Some("")));
        assert!(!is_truthy(None));
    }
}
