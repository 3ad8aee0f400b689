// src/jwt/jwt_helper.rs
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::error::ApiError;
use crate::jwt::claims::Claims;

pub fn create_token(email: &str, secret: &str, ttl_days: i64) -> Result<String, ApiError> {
    let exp = (Utc::now() + Duration::days(ttl_days)).timestamp().max(0) as usize;
    let claims = Claims {
        email: email.to_string(),
        exp,
    };

    Ok(encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))?)
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, ApiError> {
    let data = decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &Validation::default())?;
    Ok(data.claims)
}
