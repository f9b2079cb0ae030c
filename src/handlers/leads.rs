// src/handlers/leads.rs

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, StatusCode},
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
    models::lead::CreateLeadPayload,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct LeadSubmitResponse {
    pub success: bool,
    #[schema(example = "Xabar yuborildi!")]
    pub message: String,
}

// POST /api/contact
#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "Leads",
    request_body = CreateLeadPayload,
    responses(
        (status = 201, description = "Lead gravado (o despacho não afeta a resposta)", body = LeadSubmitResponse),
        (status = 400, description = "Dados inválidos ou campo com tipo errado"),
        (status = 500, description = "Falha interna", body = LeadSubmitResponse)
    )
)]
pub async fn submit_lead(
    State(app_state): State<AppState>,
    locale: Locale,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let payload: CreateLeadPayload = match payload_from_json(body, &CreateLeadPayload::FIELDS) {
        Ok(payload) => payload,
        Err(e) => return e.to_api_error(&locale, &app_state.i18n_store).into_response(),
    };

    let header_referer = headers
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok());

    match app_state.lead_service.submit(payload, header_referer).await {
        Ok((lead, outcome)) => {
            tracing::info!(
                lead_id = %lead.id,
                crm_ok = outcome.crm_ok,
                notify_ok = outcome.notify_ok,
                "Lead recebido"
            );
            let body = LeadSubmitResponse {
                success: true,
                message: app_state.i18n_store.translate(locale.0, "lead.created"),
            };
            (StatusCode::CREATED, Json(body)).into_response()
        }
        // Erro interno: o formulário recebe a mensagem genérica no formato dele
        Err(e) if e.is_internal() => {
            tracing::error!(error = %e, "❌ Falha ao registrar o lead");
            let body = LeadSubmitResponse {
                success: false,
                message: app_state.i18n_store.translate(locale.0, "error.internal"),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
        Err(e) => e.to_api_error(&locale, &app_state.i18n_store).into_response(),
    }
}
