use log::debug;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{get, State};
use serde::Serialize;

use crate::config::AppConfig;
use crate::error::Result;
use crate::jwt::jwt_helper;
use crate::repository::user_repository::UserRepository;

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
}

/// Issues an access token to registered emails; unknown emails get 403 with
/// an empty token.
#[get("/jwt?<email>")]
pub async fn issue_token(
    email: &str,
    users: &State<UserRepository>,
    config: &State<AppConfig>,
) -> Result<(Status, Json<TokenResponse>)> {
    if users.find_by_email(email).await?.is_none() {
        debug!("token refused for unknown email {}", email);
        return Ok((Status::Forbidden, Json(TokenResponse { access_token: String::new() })));
    }

    let access_token = jwt_helper::create_token(email, &config.access_token_secret, config.token_ttl_days)?;
    Ok((Status::Ok, Json(TokenResponse { access_token })))
}
