use mongodb::bson::Bson;
use mongodb::results::{DeleteResult, InsertOneResult, UpdateResult};
use serde::{Deserialize, Serialize};

/// Envelope for message-only replies and errors.
#[derive(Serialize, Deserialize, Debug)]
pub struct ApiResponse<T> {
    pub message: String,
    pub result: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn message(message: impl Into<String>) -> Self {
        ApiResponse {
            message: message.into(),
            result: None,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InsertSummary {
    pub acknowledged: bool,
    #[serde(serialize_with = "crate::models::wire::serialize_bson")]
    pub inserted_id: Bson,
}

impl From<InsertOneResult> for InsertSummary {
    fn from(result: InsertOneResult) -> Self {
        InsertSummary {
            acknowledged: true,
            inserted_id: result.inserted_id,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSummary {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    #[serde(serialize_with = "crate::models::wire::serialize_opt_bson")]
    pub upserted_id: Option<Bson>,
}

impl From<UpdateResult> for UpdateSummary {
    fn from(result: UpdateResult) -> Self {
        UpdateSummary {
            acknowledged: true,
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_id: result.upserted_id,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSummary {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl From<DeleteResult> for DeleteSummary {
    fn from(result: DeleteResult) -> Self {
        DeleteSummary {
            acknowledged: true,
            deleted_count: result.deleted_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn summaries_use_driver_field_names() {
        let update = UpdateSummary {
            acknowledged: true,
            matched_count: 1,
            modified_count: 1,
            upserted_id: None,
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({ "acknowledged": true, "matchedCount": 1, "modifiedCount": 1, "upsertedId": null })
        );

        let delete = DeleteSummary { acknowledged: true, deleted_count: 3 };
        assert_eq!(serde_json::to_value(&delete).unwrap(), json!({ "acknowledged": true, "deletedCount": 3 }));
    }

    #[test]
    fn inserted_id_goes_out_as_hex() {
        let oid = mongodb::bson::oid::ObjectId::new();
        let insert = InsertSummary { acknowledged: true, inserted_id: Bson::ObjectId(oid) };
        assert_eq!(
            serde_json::to_value(&insert).unwrap(),
            json!({ "acknowledged": true, "insertedId": oid.to_hex() })
        );
    }

    #[test]
    fn message_envelope_has_null_result() {
        let body = ApiResponse::<()>::message("Welcome Back Ana");
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "message": "Welcome Back Ana", "result": null })
        );
    }
}
