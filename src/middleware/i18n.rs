// src/middleware/i18n.rs

use axum::extract::{FromRequestParts, Query};
use axum::http::{header, request::Parts};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::config::AppState;
use crate::models::localized::Lang;

/// Nome do parâmetro (query ou campo de formulário) que escolhe o idioma.
pub const LANGUAGE_PARAM: &str = "language";

/// As preferências de idioma que chegaram com o pedido, em estado bruto.
#[derive(Debug, Clone, Default)]
pub struct LocaleContext {
    pub query: Option<String>,
    pub session: Option<String>,
    pub cookie: Option<String>,
    pub accept_language: Option<String>,
}

/// Idioma guardado na sessão. Uma camada de sessão coloca isso nas extensions do pedido.
#[derive(Debug, Clone)]
pub struct SessionLocale(pub String);

/// Decide o idioma ativo. Função pura: não lê nem grava estado.
#[derive(Debug, Clone)]
pub struct LocaleResolver {
    cookie_name: String,
}

impl LocaleResolver {
    pub fn new(cookie_name: impl Into<String>) -> Self {
        Self { cookie_name: cookie_name.into() }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    // Ordem: query > sessão > cookie > Accept-Language > uz.
    // Valor não suportado é ignorado, como se não tivesse sido enviado.
    pub fn resolve(&self, ctx: &LocaleContext) -> Lang {
        [&ctx.query, &ctx.session, &ctx.cookie]
            .into_iter()
            .flatten()
            .find_map(|value| Lang::parse(value))
            .or_else(|| ctx.accept_language.as_deref().and_then(from_accept_language))
            .unwrap_or_default()
    }

    /// Monta o contexto a partir das partes do pedido HTTP.
    pub fn context_from_parts(&self, parts: &Parts) -> LocaleContext {
        let query = Query::<LanguageQuery>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(q)| q.language);

        let session = parts
            .extensions
            .get::<SessionLocale>()
            .map(|session| session.0.clone());

        let cookie = CookieJar::from_headers(&parts.headers)
            .get(&self.cookie_name)
            .map(|cookie| cookie.value().to_string());

        let accept_language = parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        LocaleContext { query, session, cookie, accept_language }
    }
}

#[derive(Debug, Deserialize)]
struct LanguageQuery {
    language: Option<String>,
}

// "ru-RU,ru;q=0.9,en;q=0.8" -> primeiro idioma suportado, pela subtag primária
fn from_accept_language(header_str: &str) -> Option<Lang> {
    accept_language::parse(header_str).iter().find_map(|tag| {
        let primary = tag.split('-').next().unwrap_or(tag).to_ascii_lowercase();
        Lang::parse(&primary)
    })
}

// Nosso extrator de idioma
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale(pub Lang);

impl FromRequestParts<AppState> for Locale {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ctx = state.locale_resolver.context_from_parts(parts);
        Ok(Locale(state.locale_resolver.resolve(&ctx)))
    }
}
