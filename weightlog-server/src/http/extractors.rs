//! Custom Axum extractors

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use super::error::ApiError;

/// Record id from the path. Anything that isn't an integer can't name a
/// record, so it is answered like an unknown id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordId(pub i64);

impl RecordId {
    fn parse(raw: String) -> Result<Self, ApiError> {
        raw.parse::<i64>()
            .map(Self)
            .map_err(|_| ApiError::NotFound { id: raw })
    }
}

impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::NotFound { id: String::new() })?;

        Self::parse(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_ids_parse() {
        assert_eq!(RecordId::parse("12".into()).unwrap(), RecordId(12));
        assert_eq!(RecordId::parse("-3".into()).unwrap(), RecordId(-3));
    }

    #[test]
    fn non_integer_ids_are_not_found() {
        for raw in ["abc", "1.5", "", "99999999999999999999"] {
            let err = RecordId::parse(raw.into()).unwrap_err();
            assert!(matches!(err, ApiError::NotFound { ref id } if id == raw));
        }
    }
}
