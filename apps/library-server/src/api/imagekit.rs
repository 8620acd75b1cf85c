//! Image host upload endpoints.

use std::sync::Arc;

use axum::{extract::State, Json};
use library_store::LibraryStore;
use rpc_protocol::responses::ImageKitAuthResponse;

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

/// Issues signed parameters for a browser upload.
pub async fn authentication_parameters<S: LibraryStore>(
    State(state): State<Arc<AppState<S>>>,
) -> ServerResult<Json<ImageKitAuthResponse>> {
    let imagekit = state
        .imagekit
        .as_ref()
        .ok_or(ServerError::NotConfigured("Image host"))?;

    let params = imagekit.authentication_parameters();

    Ok(Json(ImageKitAuthResponse {
        token: params.token,
        expire: params.expire,
        signature: params.signature,
    }))
}
