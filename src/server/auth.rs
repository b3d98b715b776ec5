use axum::http::{header, HeaderMap};

use crate::error::{AppError, Result};

pub(crate) const FORBIDDEN_MESSAGE: &str = "Forbidden - Invalid token";

pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let auth = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    auth.strip_prefix("Bearer ")
}

/// Check the presented token against the configured one.
///
/// The `token` query parameter takes precedence; the bearer header is only
/// consulted when the parameter is absent. Without a configured token every
/// request is allowed.
pub(crate) fn authorize(expected: Option<&str>, query_token: Option<&str>, headers: &HeaderMap) -> Result<()> {
    let Some(expected) = expected else {
        return Ok(());
    };

    let presented = query_token.or_else(|| bearer_token(headers));
    if presented == Some(expected) {
        Ok(())
    } else {
        Err(AppError::auth(FORBIDDEN_MESSAGE))
    }
}
