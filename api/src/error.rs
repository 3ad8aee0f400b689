// src/error.rs
use log::error;
use rocket::http::Status;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use rocket::Request;
use thiserror::Error;

use crate::models::response::ApiResponse;

/// Every failure a handler or guard can surface to a client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Serialization error: {0}")]
    Bson(#[from] mongodb::bson::ser::Error),

    #[error("Invalid id: '{0}'")]
    InvalidId(String),

    #[error("Unauthorized Access")]
    Unauthorized,

    #[error("{0}")]
    Forbidden(String),

    #[error("Payment error: {0}")]
    Payment(String),

    #[error("Payment processor unreachable: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    pub fn forbidden() -> Self {
        ApiError::Forbidden("forbidden access".to_string())
    }

    pub fn status(&self) -> Status {
        match self {
            ApiError::InvalidId(_) => Status::BadRequest,
            ApiError::Unauthorized => Status::Unauthorized,
            ApiError::Forbidden(_) => Status::Forbidden,
            ApiError::Payment(_) | ApiError::Http(_) => Status::BadGateway,
            ApiError::Database(_) | ApiError::Bson(_) | ApiError::Token(_) | ApiError::Config(_) => {
                Status::InternalServerError
            }
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();
        if status.code >= 500 {
            error!("{} {} failed: {}", req.method(), req.uri(), self);
        }
        (status, Json(ApiResponse::<()>::message(self.to_string()))).respond_to(req)
    }
}

pub type Result<T, E = ApiError> = std::result::Result<T, E>;
