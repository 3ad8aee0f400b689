use mongodb::bson::{self, Bson};
use serde::{Serialize, Serializer};
use serde_json::Value;

/// JSON body for stored documents. ObjectIds go out as plain hex strings so
/// clients can pass them straight back in paths and queries.
#[derive(Debug)]
pub struct Wire<T>(pub T);

impl<T: Serialize> Serialize for Wire<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = bson::to_bson(&self.0).map_err(serde::ser::Error::custom)?;
        to_json(value).serialize(serializer)
    }
}

pub fn to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::Document(doc) => Value::Object(doc.into_iter().map(|(k, v)| (k, to_json(v))).collect()),
        Bson::Array(items) => Value::Array(items.into_iter().map(to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

pub fn serialize_bson<S: Serializer>(value: &Bson, serializer: S) -> Result<S::Ok, S::Error> {
    to_json(value.clone()).serialize(serializer)
}

pub fn serialize_opt_bson<S: Serializer>(value: &Option<Bson>, serializer: S) -> Result<S::Ok, S::Error> {
    value.clone().map(to_json).serialize(serializer)
}
