//! Integer id path parameter extractors.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};

fn parse_id(raw: &str) -> Result<i32, Response> {
    raw.parse::<i32>()
        .map_err(|_| AppError::InvalidId(raw.to_string()).into_response())
}

/// Extractor for a single integer path parameter such as `/store/{id}`.
///
/// Non-integer values are rejected with 400 `INVALID_ID`.
///
/// ```ignore
/// async fn get_store(IdPath(id): IdPath) -> String {
///     format!("Store {}", id)
/// }
///
/// let app = Router::new().route("/store/{id}", get(get_store));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPath(pub i32);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| e.into_response())?;

        parse_id(&raw).map(IdPath)
    }
}

/// Extractor for two integer path parameters, in route order, such as
/// `/item/{item_id}/tag/{tag_id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPairPath(pub i32, pub i32);

impl<S> FromRequestParts<S> for IdPairPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path((first, second)) = Path::<(String, String)>::from_request_parts(parts, state)
            .await
            .map_err(|e| e.into_response())?;

        Ok(IdPairPath(parse_id(&first)?, parse_id(&second)?))
    }
}
