//! Request extractors.

use axum::{
    Json, async_trait,
    extract::{FromRequest, Request},
};
use rpc_protocol::Validate;
use serde::de::DeserializeOwned;

use crate::error::ServerError;

/// JSON body that has been deserialized and passed [`Validate`].
///
/// Shape errors and rule failures are both answered with an error body,
/// never with axum's plain-text rejection.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(Self(value))
    }
}
