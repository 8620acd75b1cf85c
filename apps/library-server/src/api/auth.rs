//! Authentication API endpoints.

use std::sync::Arc;

use auth::{Registrar, SignUpCredentials};
use axum::{extract::State, http::StatusCode, Json};
use library_store::LibraryStore;
use rpc_protocol::{requests::SignUpRequest, responses::SignUpResponse};

use crate::api::extract::ValidatedJson;
use crate::error::ServerResult;
use crate::state::AppState;

/// Creates an account.
///
/// Malformed bodies and field errors are answered with an error body; every other
/// outcome uses the `{success, error}` shape.
pub async fn sign_up<S: LibraryStore>(
    State(state): State<Arc<AppState<S>>>,
    ValidatedJson(request): ValidatedJson<SignUpRequest>,
) -> ServerResult<(StatusCode, Json<SignUpResponse>)> {
    let credentials = SignUpCredentials {
        full_name: request.full_name.trim().to_string(),
        email: request.email,
        university_id: request.university_id,
        password: request.password,
        university_card: request.university_card,
    };

    let registrar = Registrar::new(&state.store, state.hasher.clone());
    match registrar.sign_up(credentials).await {
        Ok(_) => Ok((StatusCode::CREATED, Json(SignUpResponse::ok()))),
        Err(e) => {
            let status = if e.is_duplicate() {
                StatusCode::CONFLICT
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            Ok((status, Json(SignUpResponse::failed(e.public_message()))))
        }
    }
}
