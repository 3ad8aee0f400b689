use rocket::http::Status;
use rocket::outcome::try_outcome;
use rocket::request::{FromRequest, Outcome};
use rocket::Request;

use crate::error::ApiError;
use crate::guards::{reject, AuthUser};
use crate::models::user::Role;
use crate::repository::user_repository::UserRepository;

/// Passes when the token is valid and the stored user has exactly `role`.
async fn require_role(req: &Request<'_>, role: Role) -> Outcome<AuthUser, ApiError> {
    let caller = try_outcome!(req.guard::<AuthUser>().await);

    let users = match req.rocket().state::<UserRepository>() {
        Some(users) => users,
        None => {
            let error = ApiError::Config("user repository is not managed".to_string());
            return Outcome::Error((Status::InternalServerError, error));
        }
    };

    match users.find_by_email(&caller.email).await {
        Ok(Some(user)) if user.has_role(role) => Outcome::Success(caller),
        Ok(_) => reject(req, ApiError::forbidden()),
        Err(e) => Outcome::Error((e.status(), e)),
    }
}

macro_rules! role_guard {
    ($(#[$meta:meta])* $name:ident, $role:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name(pub AuthUser);

        #[rocket::async_trait]
        impl<'r> FromRequest<'r> for $name {
            type Error = ApiError;

            async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
                require_role(req, $role).await.map($name)
            }
        }
    };
}

role_guard!(
    /// Token holder stored as an admin.
    AdminUser,
    Role::Admin
);
role_guard!(
    /// Token holder stored as a seller.
    SellerUser,
    Role::Seller
);
role_guard!(
    /// Token holder stored as a buyer.
    BuyerUser,
    Role::Buyer
);
