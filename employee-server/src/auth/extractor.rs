//! JWT Extractor
//!
//! Validates the bearer token and yields the [`CurrentUser`] for a handler

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::AppError;
use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::security_log;

/// Resolve the current employee from `Authorization: Bearer <token>`
///
/// `require_auth` may already have placed the user in the request
/// extensions; the token is only validated once per request.
impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let auth_header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let user = authenticate_header(state.get_jwt_service(), auth_header, &parts.uri)?;
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}

/// Shared by the extractor and the middleware
pub(crate) fn authenticate_header(
    jwt_service: &JwtService,
    auth_header: Option<&str>,
    uri: &http::Uri,
) -> Result<CurrentUser, AppError> {
    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!("WARN", "auth_missing", uri = uri.to_string());
            return Err(AppError::unauthorized());
        }
    };

    match jwt_service.validate_token(token) {
        Ok(claims) => CurrentUser::try_from(claims)
            .map_err(|e| AppError::invalid_token(format!("Malformed JWT claims: {}", e))),
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = e.to_string(),
                uri = uri.to_string()
            );

            match e {
                JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}
