//! Request guards for the JWT filter and the role checks layered on top.
pub mod role;

use log::warn;
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};
use rocket::Request;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::jwt::jwt_helper;

pub use role::{AdminUser, BuyerUser, SellerUser};

/// Message of the first guard that turned a request away; the catchers
/// echo it back because Rocket does not hand guard errors to them.
#[derive(Debug, Default)]
pub struct GuardRejection(pub Option<String>);

pub(crate) fn reject<T>(req: &Request<'_>, error: ApiError) -> Outcome<T, ApiError> {
    let status = error.status();
    req.local_cache(|| GuardRejection(Some(error.to_string())));
    Outcome::Error((status, error))
}

/// Second word of the `Authorization` header. A literal `null`, which
/// browsers send when no token was stored, counts as absent.
pub fn bearer_token(header: Option<&str>) -> Option<&str> {
    header
        .and_then(|value| value.split(' ').nth(1))
        .filter(|token| !token.is_empty() && *token != "null")
}

/// Caller identity decoded from a valid access token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub email: String,
}

impl AuthUser {
    /// Routes that also name a user in the query may only name the caller.
    pub fn ensure_is(&self, email: &str) -> Result<(), ApiError> {
        if self.email == email {
            Ok(())
        } else {
            Err(ApiError::forbidden())
        }
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AuthUser {
    type Error = ApiError;

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let config = match req.rocket().state::<AppConfig>() {
            Some(config) => config,
            None => {
                let error = ApiError::Config("application config is not managed".to_string());
                return Outcome::Error((Status::InternalServerError, error));
            }
        };

        let token = match bearer_token(req.headers().get_one("Authorization")) {
            Some(token) => token,
            None => return reject(req, ApiError::Unauthorized),
        };

        match jwt_helper::verify_token(token, &config.access_token_secret) {
            Ok(claims) => Outcome::Success(AuthUser { email: claims.email }),
            Err(e) => {
                warn!("rejected access token: {}", e);
                reject(req, ApiError::Forbidden("Forbidden Access".to_string()))
            }
        }
    }
}
