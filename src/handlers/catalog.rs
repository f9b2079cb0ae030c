// src/handlers/catalog.rs

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::i18n::Locale,
    models::catalog::{ProductCardView, ProductCategoryView, ProductDetailView, SliderItemView},
};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductFilter {
    /// Slug da categoria
    pub category: Option<String>,
}

// GET /api/product-categories
#[utoipa::path(
    get,
    path = "/api/product-categories",
    tag = "Catálogo",
    responses((status = 200, description = "Categorias ativas", body = Vec<ProductCategoryView>))
)]
pub async fn list_categories(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let categories = app_state
        .catalog_service
        .list_categories(locale.0)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(categories))
}

// GET /api/products?category=<slug>
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Catálogo",
    params(ProductFilter),
    responses((status = 200, description = "Produtos ativos", body = Vec<ProductCardView>))
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(filter): Query<ProductFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let products = app_state
        .catalog_service
        .list_products(filter.category.as_deref(), locale.0)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(products))
}

// GET /api/products/slider
#[utoipa::path(
    get,
    path = "/api/products/slider",
    tag = "Catálogo",
    responses((status = 200, description = "Produtos em destaque (máx. 10)", body = Vec<SliderItemView>))
)]
pub async fn product_slider(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let slides = app_state
        .catalog_service
        .slider(locale.0)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(slides))
}

// GET /api/products/{slug}
#[utoipa::path(
    get,
    path = "/api/products/{slug}",
    tag = "Catálogo",
    params(("slug" = String, Path, description = "Slug do produto")),
    responses(
        (status = 200, description = "Produto com parâmetros agrupados", body = ProductDetailView),
        (status = 404, description = "Produto inexistente ou inativo")
    )
)]
pub async fn product_detail(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let product = app_state
        .catalog_service
        .product_detail(&slug, locale.0)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(product))
}
