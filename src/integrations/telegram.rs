// src/integrations/telegram.rs

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::models::lead::Lead;
use crate::services::dispatch::{AdapterError, ChatNotifier};

pub const TELEGRAM_API: &str = "https://api.telegram.org";

/// Avisa a equipe de vendas no grupo do Telegram.
#[derive(Clone)]
pub struct TelegramNotifier {
    client: Client,
    api_base: String,
    bot_token: String,
    chat_id: String,
}

#[derive(Debug, Deserialize)]
struct TelegramReply {
    ok: bool,
    description: Option<String>,
}

impl TelegramNotifier {
    pub fn new(client: Client, bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            client,
            api_base: TELEGRAM_API.to_string(),
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Texto da notificação (parse_mode HTML). Tudo que veio do formulário é escapado.
pub fn compose_message(lead: &Lead) -> String {
    let mut lines = vec![
        "🚚 <b>Yangi ariza</b>".to_string(),
        format!("👤 <b>Ism:</b> {}", escape_html(&lead.name)),
        format!("📞 <b>Telefon:</b> {}", escape_html(&lead.phone)),
        format!("📍 <b>Hudud:</b> {}", lead.region.display_name()),
    ];

    if let Some(product_id) = lead.product_id {
        lines.push(format!("🏷 <b>Mahsulot:</b> {product_id}"));
    }
    if !lead.message.trim().is_empty() {
        lines.push(format!("💬 <b>Xabar:</b> {}", escape_html(&lead.message)));
    }
    if let Some(utm) = &lead.utm_data {
        lines.push(format!("📊 <b>UTM:</b> <code>{}</code>", escape_html(utm)));
    }
    if let Some(uid) = &lead.visitor_uid {
        lines.push(format!("🔖 <b>Visitor UID:</b> <code>{}</code>", escape_html(uid)));
    }
    if let Some(crm_id) = &lead.crm_lead_id {
        lines.push(format!("🔗 <b>CRM ID:</b> {}", escape_html(crm_id)));
    }
    lines.push(format!("🕒 {}", lead.created_at.format("%d.%m.%Y %H:%M")));

    lines.join("\n")
}

#[async_trait]
impl ChatNotifier for TelegramNotifier {
    async fn notify(&self, lead: &Lead) -> Result<(), AdapterError> {
        let url = format!("{}/bot{}/sendMessage", self.api_base, self.bot_token);
        let body = json!({
            "chat_id": self.chat_id,
            "text": compose_message(lead),
            "parse_mode": "HTML",
            "disable_web_page_preview": true,
        });

        // without_url(): a URL carrega o token do bot e não pode ir para o log
        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AdapterError::Transport(e.without_url()))?;

        let status = response.status();
        let reply: TelegramReply = response
            .json()
            .await
            .map_err(|e| AdapterError::BadResponse(e.without_url().to_string()))?;

        if !status.is_success() {
            return Err(AdapterError::Rejected {
                status: status.as_u16(),
                body: reply.description.unwrap_or_default(),
            });
        }
        if !reply.ok {
            return Err(AdapterError::BadResponse(
                reply.description.unwrap_or_else(|| "ok=false".to_string()),
            ));
        }

        Ok(())
    }
}
