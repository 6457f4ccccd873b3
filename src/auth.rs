use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Header carrying the operator identity for audit attribution.
///
/// Authentication itself is delegated to the deployment's edge (gateway or
/// identity proxy); by the time a request reaches this service the operator
/// is trusted. This type exists so the workflow layer never reads ambient
/// global state: every mutating service call takes an explicit CurrentUser.
pub const OPERATOR_HEADER: &str = "x-operator";

const ANONYMOUS_OPERATOR: &str = "system";

/// The operator on whose behalf a workflow mutation runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub username: String,
}

impl CurrentUser {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    /// Fallback identity for unattributed calls (background jobs, tests).
    pub fn system() -> Self {
        Self::new(ANONYMOUS_OPERATOR)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let username = parts
            .headers
            .get(OPERATOR_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(ANONYMOUS_OPERATOR);

        Ok(CurrentUser::new(username))
    }
}
