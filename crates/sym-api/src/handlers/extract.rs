//! Symptom extraction handler

use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

/// Extraction request body
#[derive(Debug, Deserialize, ToSchema)]
pub struct SymptomRequest {
    /// Free-text description of the patient's symptoms
    #[schema(example = "I have a fever and headache")]
    pub text: String,
}

/// Extraction response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SymptomResponse {
    /// Extracted symptoms, most confident first
    #[schema(example = json!(["Fever", "Headache"]))]
    pub symptoms: Vec<String>,

    /// Recommended specializations, best match first
    #[schema(example = json!(["General Physician"]))]
    pub specializations: Vec<String>,
}

/// Extract symptoms and recommend specializations
#[utoipa::path(
    post,
    path = "/extract-symptoms",
    tag = "extraction",
    request_body = SymptomRequest,
    responses(
        (status = 200, description = "Extraction successful", body = SymptomResponse),
        (status = 400, description = "Invalid input", body = crate::error::ApiError),
        (status = 503, description = "Extraction engine unavailable", body = crate::error::ApiError),
        (status = 500, description = "Internal error", body = crate::error::ApiError)
    )
)]
pub async fn extract_symptoms(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SymptomRequest>, JsonRejection>,
) -> Result<Json<SymptomResponse>, AppError> {
    let Json(req) = payload?;

    let result = state.pipeline.analyze(&req.text).await?;

    Ok(Json(SymptomResponse {
        symptoms: result.symptom_names(),
        specializations: result.specialization_names(),
    }))
}
