//! Bearer-token extractors.
//!
//! The session table only proves who the caller is. Ban and activation state
//! are re-read from the database on every request, so a ban takes effect on
//! the author's very next call even though their token is still live.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::http::request::Parts;
use muslimnet_core::auth::SessionToken;
use muslimnet_storage::User;
use tracing::warn;

use crate::error::ApiError;
use crate::state::AppState;

/// An authenticated, active, non-banned user.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(ApiError::Unauthorized)?;

        let session = state
            .auth
            .validate_session(&token)
            .ok_or(ApiError::SessionExpired)?;

        let user = state
            .db
            .get_user(session.user_id)?
            .ok_or(ApiError::Unauthorized)?;

        check_standing(&user)?;
        Ok(AuthUser(user))
    }
}

/// An authenticated user allowed to act on the review queue.
#[derive(Debug, Clone)]
pub struct ModeratorUser(pub User);

impl FromRequestParts<AppState> for ModeratorUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;
        if !user.role.can_moderate() {
            warn!(user_id = user.id, "Rejected admin request from non-moderator");
            return Err(ApiError::Forbidden);
        }
        Ok(ModeratorUser(user))
    }
}

/// Rejects banned and deactivated accounts.
pub(crate) fn check_standing(user: &User) -> Result<(), ApiError> {
    if user.standing.is_banned {
        warn!(user_id = user.id, "Rejected banned user");
        let reason = user.standing.ban_reason.clone().unwrap_or_default();
        return Err(ApiError::Banned(reason));
    }

    if !user.is_active {
        warn!(user_id = user.id, "Rejected inactive user");
        return Err(ApiError::Inactive);
    }

    Ok(())
}

/// Extracts the session token from an `Authorization: Bearer <token>` header.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<SessionToken> {
    let header = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(SessionToken::from_string(token))
}
