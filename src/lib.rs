// src/lib.rs

use axum::{
    routing::{get, post},
    Json, Router,
};
use utoipa::OpenApi;

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod integrations;
pub mod middleware;
pub mod models;
pub mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;

/// Todas as rotas públicas do site.
pub fn build_router(app_state: AppState) -> Router {
    let catalog_routes = Router::new()
        .route("/product-categories", get(handlers::catalog::list_categories))
        .route("/products", get(handlers::catalog::list_products))
        // "/products/slider" tem prioridade sobre "/products/{slug}" (rota estática)
        .route("/products/slider", get(handlers::catalog::product_slider))
        .route("/products/{slug}", get(handlers::catalog::product_detail));

    let content_routes = Router::new()
        .route("/vacancies", get(handlers::content::list_vacancies))
        .route("/news", get(handlers::content::list_news));

    Router::new()
        .route("/api/health", get(handlers::content::health))
        .route("/api/contact", post(handlers::leads::submit_lead))
        .route("/api/job-applications", post(handlers::jobs::submit_job_application))
        .route(
            "/i18n/setlang",
            get(handlers::language::set_language_query).post(handlers::language::set_language_form),
        )
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .nest("/api", catalog_routes.merge(content_routes))
        .with_state(app_state)
}
