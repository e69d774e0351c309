//! Sanction-letter endpoint.
//!
//! POST /api/v1/sanction
//!
//! Renders the approval document for an accepted offer and marks the
//! conversation sanctioned. The status update is best-effort: a store
//! failure never withholds the letter already rendered.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use silk_core::chat::store::ProfileStore;
use silk_core::loan::sanction;
use silk_types::loan::SanctionTerms;

use crate::http::error::AppError;
use crate::http::extractors::auth::Authenticated;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SanctionRequest {
    #[serde(default)]
    pub conversation_id: Option<Uuid>,
    pub loan_amount: f64,
    pub tenure: u32,
    pub emi: i64,
    pub interest_rate: f64,
}

#[derive(Debug, Serialize)]
pub struct SanctionResponse {
    pub success: bool,
    pub sanction_letter: String,
    pub reference_no: String,
}

/// POST /api/v1/sanction -- generate the sanction letter.
pub async fn generate_sanction(
    State(state): State<AppState>,
    auth: Authenticated,
    Json(body): Json<SanctionRequest>,
) -> Result<Json<SanctionResponse>, AppError> {
    let customer_name = state
        .profiles
        .get_profile(&auth.user_id)
        .await
        .ok()
        .flatten()
        .map(|p| p.full_name)
        .unwrap_or_else(|| "Valued Customer".to_string());

    let terms = SanctionTerms {
        loan_amount: body.loan_amount,
        interest_rate: body.interest_rate,
        tenure: body.tenure,
        emi: body.emi,
    };

    let letter = sanction::render_letter(&customer_name, &terms, Utc::now());

    if let Some(conversation_id) = body.conversation_id {
        if let Err(err) = state
            .conversations
            .mark_sanctioned(&conversation_id, body.loan_amount)
            .await
        {
            tracing::warn!(error = %err, %conversation_id, "failed to mark conversation sanctioned");
        }
    }

    Ok(Json(SanctionResponse {
        success: true,
        sanction_letter: letter.html,
        reference_no: letter.reference_no,
    }))
}
