use actix_web::http::header;
use actix_web::HttpRequest;

use crate::domain::order::errors::OrderError;
use crate::store::{Session, SessionStore};

use super::ApiError;

/// Resolve the caller's session from the `Authorization: Bearer <token>`
/// header. Missing or malformed headers and unknown tokens are distinct
/// failures so the client can tell "log in" from "log in again".
pub async fn authenticate(
    req: &HttpRequest,
    sessions: &dyn SessionStore,
) -> Result<Session, ApiError> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(ApiError(OrderError::MissingAuthorization))?;

    let token = header_value
        .strip_prefix("Bearer ")
        .ok_or(ApiError(OrderError::MissingAuthorization))?;

    match sessions.resolve(token).await {
        Ok(Some(session)) => Ok(session),
        Ok(None) => Err(ApiError(OrderError::InvalidAuthorization)),
        Err(err) => Err(ApiError(OrderError::Persistence(err.to_string()))),
    }
}
