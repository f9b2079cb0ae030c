// src/config.rs

use std::{env, str::FromStr, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    common::i18n::I18nStore,
    db::{
        CatalogRepository, ContentRepository, JobApplicationRepository, JobApplicationStore,
        LeadRepository, LeadStore,
    },
    integrations::{crm::HttpCrmAdapter, telegram::TelegramNotifier},
    middleware::i18n::LocaleResolver,
    services::{
        catalog_service::{CatalogService, MediaUrls},
        content_service::ContentService,
        job_service::JobService,
        dispatch::{ChatNotifier, CrmAdapter, DisabledAdapter, DispatchPipeline},
        lead_service::LeadService,
    },
};

// =========================================================================
//  CONFIGURAÇÃO (variáveis de ambiente)
// =========================================================================

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub database_max_connections: u32,
    pub media_base_url: String,
    pub language_cookie_name: String,
    pub crm_webhook_url: Option<String>,
    pub crm_api_token: Option<String>,
    pub telegram_bot_token: Option<String>,
    pub telegram_chat_id: Option<String>,
    pub telegram_api_base: Option<String>,
    pub adapter_timeout: Duration,
}

impl Config {
    /// Só o banco definido; todo o resto com os valores padrão e integrações desligadas.
    pub fn with_database_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            bind_addr: "0.0.0.0:3000".to_string(),
            database_max_connections: 5,
            media_base_url: "/media/".to_string(),
            language_cookie_name: "django_language".to_string(),
            crm_webhook_url: None,
            crm_api_token: None,
            telegram_bot_token: None,
            telegram_chat_id: None,
            telegram_api_base: None,
            adapter_timeout: Duration::from_secs(10),
        }
    }

    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let defaults = Self::with_database_url(database_url);

        Ok(Self {
            bind_addr: optional("BIND_ADDR").unwrap_or(defaults.bind_addr.clone()),
            database_max_connections: parsed("DATABASE_MAX_CONNECTIONS", defaults.database_max_connections)?,
            media_base_url: optional("MEDIA_BASE_URL").unwrap_or(defaults.media_base_url.clone()),
            language_cookie_name: optional("LANGUAGE_COOKIE_NAME")
                .unwrap_or(defaults.language_cookie_name.clone()),
            crm_webhook_url: optional("CRM_WEBHOOK_URL"),
            crm_api_token: optional("CRM_API_TOKEN"),
            telegram_bot_token: optional("TELEGRAM_BOT_TOKEN"),
            telegram_chat_id: optional("TELEGRAM_CHAT_ID"),
            telegram_api_base: optional("TELEGRAM_API_BASE"),
            adapter_timeout: Duration::from_secs(parsed("ADAPTER_TIMEOUT_SECS", 10)?),
            ..defaults
        })
    }
}

// Variável vazia conta como não definida
fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn parsed<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} inválida: '{raw}'")),
        None => Ok(default),
    }
}

// =========================================================================
//  ESTADO COMPARTILHADO
// =========================================================================

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub i18n_store: Arc<I18nStore>,
    pub locale_resolver: LocaleResolver,
    pub lead_service: LeadService,
    pub catalog_service: CatalogService,
    pub content_service: ContentService,
    pub job_service: JobService,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        let http_client = reqwest::Client::builder()
            .timeout(config.adapter_timeout)
            .build()
            .context("Falha ao criar o cliente HTTP")?;

        let crm: Arc<dyn CrmAdapter> = match &config.crm_webhook_url {
            Some(url) => Arc::new(HttpCrmAdapter::new(
                http_client.clone(),
                url.clone(),
                config.crm_api_token.clone(),
            )),
            None => {
                tracing::warn!("⚠️ CRM_WEBHOOK_URL não definida: leads não serão enviados ao CRM");
                Arc::new(DisabledAdapter("crm"))
            }
        };

        let notifier: Arc<dyn ChatNotifier> =
            match (&config.telegram_bot_token, &config.telegram_chat_id) {
                (Some(token), Some(chat_id)) => {
                    let notifier = TelegramNotifier::new(http_client, token.clone(), chat_id.clone());
                    match &config.telegram_api_base {
                        Some(base) => Arc::new(notifier.with_api_base(base.clone())),
                        None => Arc::new(notifier),
                    }
                }
                _ => {
                    tracing::warn!("⚠️ Telegram não configurado: a equipe não será avisada dos leads");
                    Arc::new(DisabledAdapter("telegram"))
                }
            };

        let lead_store: Arc<dyn LeadStore> = Arc::new(LeadRepository::new(db_pool.clone()));
        let job_store: Arc<dyn JobApplicationStore> =
            Arc::new(JobApplicationRepository::new(db_pool.clone()));

        Ok(Self::from_parts(config, db_pool, lead_store, job_store, crm, notifier))
    }

    // --- Monta o gráfico de dependências ---
    pub fn from_parts(
        config: &Config,
        db_pool: PgPool,
        lead_store: Arc<dyn LeadStore>,
        job_store: Arc<dyn JobApplicationStore>,
        crm: Arc<dyn CrmAdapter>,
        notifier: Arc<dyn ChatNotifier>,
    ) -> Self {
        let media = MediaUrls::new(config.media_base_url.clone());
        let pipeline = DispatchPipeline::new(lead_store.clone(), crm, notifier);

        Self {
            lead_service: LeadService::new(lead_store, pipeline),
            job_service: JobService::new(job_store),
            catalog_service: CatalogService::new(CatalogRepository::new(db_pool.clone()), media.clone()),
            content_service: ContentService::new(ContentRepository::new(db_pool.clone()), media),
            i18n_store: Arc::new(I18nStore::new()),
            locale_resolver: LocaleResolver::new(config.language_cookie_name.clone()),
            db_pool,
        }
    }
}
