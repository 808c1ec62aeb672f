//! Owner resolution for record-scoped routes.
//!
//! The `X-User-Id` header selects whose records a request operates on. When
//! absent, the configured default owner is used. This is scoping, not
//! authentication: the header is trusted as given.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use finagent_common::error::AppError;

use crate::state::AppState;

pub const OWNER_HEADER: &str = "x-user-id";

/// Owner extracted from the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Owner {
    pub owner_id: i64,
}

/// Parse an `X-User-Id` header value into a positive owner id.
pub fn parse_owner_id(raw: &str) -> Result<i64, AppError> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::Validation(format!(
            "X-User-Id must be a positive integer, got '{raw}'"
        ))),
    }
}

impl FromRequestParts<AppState> for Owner {
    type Rejection = AppError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let default_owner_id = state.config.default_owner_id;

        let header = parts.headers.get(OWNER_HEADER).map(|v| {
            v.to_str()
                .map(str::to_string)
                .map_err(|_| AppError::Validation("X-User-Id must be valid ASCII".to_string()))
        });

        async move {
            let owner_id = match header {
                Some(raw) => parse_owner_id(&raw?)?,
                None => default_owner_id,
            };
            Ok(Owner { owner_id })
        }
    }
}
