pub mod booking;
pub mod category;
pub mod payment;
pub mod product;
pub mod response;
pub mod user;
pub mod wire;

use mongodb::bson::oid::ObjectId;
use mongodb::bson::Bson;
use serde::{Deserialize, Deserializer};

use crate::error::ApiError;

/// Parses a 24-character hex id taken from a path or query string.
pub fn parse_id(raw: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(raw).map_err(|_| ApiError::InvalidId(raw.to_string()))
}

/// Reads an id reference out of a client body. Clients echo ids back either
/// as plain hex strings or as the `{"$oid": ...}` form this API emits.
pub fn id_from_bson(value: &Bson) -> Result<ObjectId, ApiError> {
    match value {
        Bson::ObjectId(oid) => Ok(*oid),
        Bson::String(raw) => parse_id(raw),
        other => Err(ApiError::InvalidId(other.to_string())),
    }
}

/// Epoch milliseconds in whatever numeric type the writer used. Anything
/// that is not a number reads as absent.
pub fn deserialize_millis<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Bson>::deserialize(deserializer)? {
        Some(Bson::Int32(ms)) => Some(i64::from(ms)),
        Some(Bson::Int64(ms)) => Some(ms),
        Some(Bson::Double(ms)) if ms.is_finite() => Some(ms as i64),
        _ => None,
    })
}
