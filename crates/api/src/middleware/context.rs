//! Caller identity extraction.

use axum::Json;
use axum::extract::FromRequestParts;
use axum::http::{StatusCode, request::Parts};
use serde_json::json;
use tranzero_shared::types::{RequestContext, UserId};

/// Header carrying the acting user's ID.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the acting user's display name.
pub const USER_NAME_HEADER: &str = "x-user-name";

/// Extractor for the identity of the user performing a request.
///
/// Identity arrives as headers set by the gateway in front of this service.
/// Requests without a user ID are rejected; the display name falls back to
/// the ID when absent.
#[derive(Debug, Clone)]
pub struct Caller(pub RequestContext);

impl Caller {
    /// Returns the request context for repository calls.
    #[must_use]
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let Some(user_id) = header(USER_ID_HEADER) else {
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "UNAUTHORIZED",
                    "message": "Missing x-user-id header"
                })),
            ));
        };
        let user_name = header(USER_NAME_HEADER).unwrap_or_else(|| user_id.clone());

        Ok(Self(RequestContext::new(
            UserId::from_string(user_id),
            user_name,
        )))
    }
}
