// src/handlers/jobs.rs

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::{
    common::json_body::payload_from_json,
    config::AppState,
    middleware::i18n::Locale,
    models::job::{CreateJobApplicationPayload, JobApplicationView},
};

#[derive(Debug, Serialize, ToSchema)]
pub struct JobApplicationResponse {
    pub success: bool,
    #[schema(example = "Rezyume muvaffaqiyatli yuborildi! Tez orada siz bilan bog'lanamiz.")]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<JobApplicationView>,
}

// POST /api/job-applications
#[utoipa::path(
    post,
    path = "/api/job-applications",
    tag = "Conteúdo",
    request_body = CreateJobApplicationPayload,
    responses(
        (status = 201, description = "Candidatura gravada", body = JobApplicationResponse),
        (status = 400, description = "Dados inválidos, currículo grande demais ou formato não aceito"),
        (status = 500, description = "Falha interna", body = JobApplicationResponse)
    )
)]
pub async fn submit_job_application(
    State(app_state): State<AppState>,
    locale: Locale,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let payload: CreateJobApplicationPayload =
        match payload_from_json(body, &CreateJobApplicationPayload::FIELDS) {
            Ok(payload) => payload,
            Err(e) => return e.to_api_error(&locale, &app_state.i18n_store).into_response(),
        };

    match app_state.job_service.submit(payload, locale.0).await {
        Ok(application) => {
            let body = JobApplicationResponse {
                success: true,
                message: app_state.i18n_store.translate(locale.0, "job.created"),
                data: Some(application),
            };
            (StatusCode::CREATED, Json(body)).into_response()
        }
        Err(e) if e.is_internal() => {
            tracing::error!(error = %e, "❌ Falha ao registrar a candidatura");
            let body = JobApplicationResponse {
                success: false,
                message: app_state.i18n_store.translate(locale.0, "error.internal"),
                data: None,
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
        Err(e) => e.to_api_error(&locale, &app_state.i18n_store).into_response(),
    }
}
