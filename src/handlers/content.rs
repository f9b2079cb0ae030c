// src/handlers/content.rs

use axum::{extract::State, response::IntoResponse, Json};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::i18n::Locale,
    models::content::{NewsView, VacancyView},
};

// GET /api/vacancies
#[utoipa::path(
    get,
    path = "/api/vacancies",
    tag = "Conteúdo",
    responses((status = 200, description = "Vagas ativas", body = Vec<VacancyView>))
)]
pub async fn list_vacancies(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let vacancies = app_state
        .content_service
        .list_vacancies(locale.0)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(vacancies))
}

// GET /api/news
#[utoipa::path(
    get,
    path = "/api/news",
    tag = "Conteúdo",
    responses((status = 200, description = "Notícias ativas, mais recentes primeiro", body = Vec<NewsView>))
)]
pub async fn list_news(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let news = app_state
        .content_service
        .list_news(locale.0)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(news))
}

// GET /api/health
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Sistema",
    responses((status = 200, description = "Servidor no ar", body = String))
)]
pub async fn health() -> &'static str {
    "OK"
}
