use std::convert::Infallible;

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

/// JSON body extractor that never rejects.
///
/// An unreadable or malformed body yields `T::default()`, so handlers report the
/// fields as missing through the normal error path instead of axum's plain-text
/// rejection.
#[derive(Debug, Clone, Default)]
pub struct LenientJson<T>(pub T);

impl<S, T> FromRequest<S> for LenientJson<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = match Bytes::from_request(req, state).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::debug!("Unreadable request body: {}", e);
                return Ok(Self(T::default()));
            }
        };

        if bytes.is_empty() {
            return Ok(Self(T::default()));
        }

        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(Self(value)),
            Err(e) => {
                tracing::debug!("Malformed JSON body: {}", e);
                Ok(Self(T::default()))
            }
        }
    }
}
