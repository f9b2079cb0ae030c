// src/handlers/language.rs

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap},
    response::Redirect,
    Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{config::AppState, models::localized::Lang};

pub const LANGUAGE_COOKIE_DAYS: i64 = 365;

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SetLanguagePayload {
    #[schema(example = "ru")]
    pub language: Option<String>,
}

// GET /i18n/setlang?language=ru
#[utoipa::path(
    get,
    path = "/i18n/setlang",
    tag = "Idioma",
    params(SetLanguagePayload),
    responses((status = 303, description = "Redireciona para o Referer (ou /)"))
)]
pub async fn set_language_query(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
    Query(payload): Query<SetLanguagePayload>,
) -> (CookieJar, Redirect) {
    set_language(&app_state, &headers, jar, payload.language.as_deref())
}

// POST /i18n/setlang (formulário com o campo `language`)
#[utoipa::path(
    post,
    path = "/i18n/setlang",
    tag = "Idioma",
    request_body(content = SetLanguagePayload, content_type = "application/x-www-form-urlencoded"),
    responses((status = 303, description = "Redireciona para o Referer (ou /)"))
)]
pub async fn set_language_form(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
    Form(payload): Form<SetLanguagePayload>,
) -> (CookieJar, Redirect) {
    set_language(&app_state, &headers, jar, payload.language.as_deref())
}

fn set_language(
    app_state: &AppState,
    headers: &HeaderMap,
    jar: CookieJar,
    language: Option<&str>,
) -> (CookieJar, Redirect) {
    // Valor inválido: nada muda, volta para a home
    let Some(lang) = language.and_then(Lang::parse) else {
        tracing::debug!(?language, "Idioma não suportado, ignorado");
        return (jar, Redirect::to("/"));
    };

    let cookie = Cookie::build((
        app_state.locale_resolver.cookie_name().to_string(),
        lang.as_str(),
    ))
    .path("/")
    .max_age(time::Duration::days(LANGUAGE_COOKIE_DAYS))
    .same_site(SameSite::Lax);

    let target = safe_referer(headers).unwrap_or_else(|| "/".to_string());
    (jar.add(cookie), Redirect::to(&target))
}

/// O Referer só é usado como destino se for do próprio site.
pub(crate) fn safe_referer(headers: &HeaderMap) -> Option<String> {
    let referer = headers.get(header::REFERER)?.to_str().ok()?.trim();

    if referer.starts_with('/') && !referer.starts_with("//") {
        return Some(referer.to_string());
    }

    let host = headers.get(header::HOST)?.to_str().ok()?;
    let url = reqwest::Url::parse(referer).ok()?;
    let same_host = match (url.host_str(), url.port()) {
        (Some(h), Some(port)) => format!("{h}:{port}") == host,
        (Some(h), None) => h == host,
        (None, _) => false,
    };

    (matches!(url.scheme(), "http" | "https") && same_host).then(|| referer.to_string())
}
