//! Customer-insights endpoint.
//!
//! GET /api/v1/profile
//!
//! Fetches the caller's customer profile, creating one with onboarding
//! defaults on first contact.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use silk_core::chat::store::ProfileStore;
use silk_types::profile::CustomerProfile;

use crate::http::error::AppError;
use crate::http::extractors::auth::Authenticated;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub profile: CustomerProfile,
}

/// GET /api/v1/profile -- get-or-create the caller's profile.
pub async fn get_profile(
    State(state): State<AppState>,
    auth: Authenticated,
) -> Result<Json<ProfileResponse>, AppError> {
    if let Some(profile) = state.profiles.get_profile(&auth.user_id).await? {
        return Ok(Json(ProfileResponse { profile }));
    }

    let profile = CustomerProfile::with_defaults(auth.user_id, &auth.key_name);
    state.profiles.save_profile(&profile).await?;
    tracing::info!(user_id = %auth.user_id, "customer profile created with defaults");

    Ok(Json(ProfileResponse { profile }))
}
