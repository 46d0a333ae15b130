//! Axum extractor for the authenticated account.

use crate::{
    api::models::accounts::CurrentAccount,
    auth::session,
    errors::{Error, Result},
    AppState,
};
use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::instrument;

/// Extract the bearer token from the Authorization header, if present.
fn bearer_token(parts: &Parts) -> Option<Result<&str>> {
    let auth_header = parts.headers.get(axum::http::header::AUTHORIZATION)?;

    let auth_str = match auth_header.to_str() {
        Ok(s) => s,
        Err(e) => {
            return Some(Err(Error::Validation {
                message: format!("Invalid authorization header: {e}"),
            }))
        }
    };

    match auth_str.strip_prefix("Bearer ") {
        Some(token) => Some(Ok(token)),
        None => Some(Err(Error::Unauthorized { message: None })),
    }
}

impl FromRequestParts<AppState> for CurrentAccount {
    type Rejection = Error;

    #[instrument(skip(parts, state))]
    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let token = match bearer_token(parts) {
            Some(Ok(token)) => token,
            Some(Err(e)) => return Err(e),
            None => return Err(Error::Unauthorized { message: None }),
        };

        session::verify_session_token(token, &state.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts_with_auth(value: &str) -> Parts {
        let request = axum::http::Request::builder()
            .uri("http://localhost/test")
            .header(axum::http::header::AUTHORIZATION, value)
            .body(())
            .unwrap();
        let (parts, _body) = request.into_parts();
        parts
    }

    #[test]
    fn test_bearer_token_extraction() {
        let parts = parts_with_auth("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&parts).unwrap().unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_non_bearer_scheme_rejected() {
        let parts = parts_with_auth("Basic dXNlcjpwYXNz");
        let result = bearer_token(&parts).unwrap();
        assert!(matches!(result.unwrap_err(), Error::Unauthorized { .. }));
    }

    #[test]
    fn test_missing_header_is_none() {
        let request = axum::http::Request::builder()
            .uri("http://localhost/test")
            .body(())
            .unwrap();
        let (parts, _body) = request.into_parts();
        assert!(bearer_token(&parts).is_none());
    }
}
