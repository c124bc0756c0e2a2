use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the shared admin password.
pub const ADMIN_PASSWORD_HEADER: &str = "X-Admin-Password";

/// Proof that the request carried an accepted admin password.
///
/// Add this as a handler parameter to restrict the route to admins.
pub struct AdminUser;

impl<S> FromRequestParts<S> for AdminUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        let password = parts
            .headers
            .get(ADMIN_PASSWORD_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::InvalidCredentials)?;

        if !state.credential.verify(password) {
            tracing::warn!("Rejected admin request with an invalid password");
            return Err(AppError::InvalidCredentials);
        }
        Ok(AdminUser)
    }
}
