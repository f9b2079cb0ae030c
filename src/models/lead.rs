// src/models/lead.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// --- ENUMS ---

// Mapeia o CREATE TYPE lead_region do banco
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "lead_region", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Region {
    TashkentCity,
    TashkentRegion,
    Andijan,
    Bukhara,
    Fergana,
    Jizzakh,
    Kashkadarya,
    Khorezm,
    Namangan,
    Navoi,
    Samarkand,
    Surkhandarya,
    Syrdarya,
    Karakalpakstan,
}

impl Region {
    pub const ALL: [Region; 14] = [
        Region::TashkentCity,
        Region::TashkentRegion,
        Region::Andijan,
        Region::Bukhara,
        Region::Fergana,
        Region::Jizzakh,
        Region::Kashkadarya,
        Region::Khorezm,
        Region::Namangan,
        Region::Navoi,
        Region::Samarkand,
        Region::Surkhandarya,
        Region::Syrdarya,
        Region::Karakalpakstan,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Region::TashkentCity => "tashkent_city",
            Region::TashkentRegion => "tashkent_region",
            Region::Andijan => "andijan",
            Region::Bukhara => "bukhara",
            Region::Fergana => "fergana",
            Region::Jizzakh => "jizzakh",
            Region::Kashkadarya => "kashkadarya",
            Region::Khorezm => "khorezm",
            Region::Namangan => "namangan",
            Region::Navoi => "navoi",
            Region::Samarkand => "samarkand",
            Region::Surkhandarya => "surkhandarya",
            Region::Syrdarya => "syrdarya",
            Region::Karakalpakstan => "karakalpakstan",
        }
    }

    /// Nome exibido para a equipe (notificações do chat).
    pub const fn display_name(self) -> &'static str {
        match self {
            Region::TashkentCity => "Toshkent shahri",
            Region::TashkentRegion => "Toshkent viloyati",
            Region::Andijan => "Andijon viloyati",
            Region::Bukhara => "Buxoro viloyati",
            Region::Fergana => "Farg'ona viloyati",
            Region::Jizzakh => "Jizzax viloyati",
            Region::Kashkadarya => "Qashqadaryo viloyati",
            Region::Khorezm => "Xorazm viloyati",
            Region::Namangan => "Namangan viloyati",
            Region::Navoi => "Navoiy viloyati",
            Region::Samarkand => "Samarqand viloyati",
            Region::Surkhandarya => "Surxondaryo viloyati",
            Region::Syrdarya => "Sirdaryo viloyati",
            Region::Karakalpakstan => "Qoraqalpog'iston Respublikasi",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|region| region.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "lead_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    #[default]
    New,
    InProgress,
    Closed,
}

impl LeadStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "new" => Some(LeadStatus::New),
            "in_progress" => Some(LeadStatus::InProgress),
            "closed" => Some(LeadStatus::Closed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "lead_priority", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LeadPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl LeadPriority {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(LeadPriority::Low),
            "medium" => Some(LeadPriority::Medium),
            "high" => Some(LeadPriority::High),
            _ => None,
        }
    }
}

// --- LEAD (O registro persistido) ---

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Lead {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub region: Region,
    pub message: String,
    pub product_id: Option<Uuid>,
    pub referer: Option<String>,

    // Atribuição UTM já serializada (JSON de um mapa, ou a string enviada pelo cliente)
    pub utm_data: Option<String>,

    // Token do pixel do CRM, usado para juntar envios do mesmo navegador. Imutável.
    pub visitor_uid: Option<String>,

    pub status: LeadStatus,
    pub priority: LeadPriority,
    pub manager_id: Option<Uuid>,
    pub admin_comment: String,

    // Preenchidos pelo pipeline de despacho
    pub crm_status: Option<String>,
    pub crm_lead_id: Option<String>,

    pub created_at: DateTime<Utc>,
}

// --- PAYLOAD (O formulário de contato) ---

// Enums chegam como texto para o erro de valor desconhecido ser um 400 com o nome do campo.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateLeadPayload {
    #[serde(default)]
    #[validate(length(min = 1, max = 255))]
    #[schema(example = "Aziz Karimov")]
    pub name: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 50))]
    #[schema(example = "+998901234567")]
    pub phone: String,

    #[schema(example = "samarkand")]
    pub region: Option<String>,

    pub product: Option<Uuid>,

    #[schema(example = "Narxi qancha?")]
    pub message: Option<String>,

    // Objeto (usado como está) ou string já serializada (gravada sem interpretar)
    #[schema(value_type = Option<Object>, example = json!({"utm_source": "google"}))]
    pub utm_data: Option<Value>,

    #[schema(example = "abc-123_ok")]
    pub visitor_uid: Option<String>,

    pub referer: Option<String>,

    #[schema(example = "new")]
    pub status: Option<String>,

    #[schema(example = "medium")]
    pub priority: Option<String>,
}

impl CreateLeadPayload {
    /// Campos aceitos no corpo JSON (nomes usados nos erros de tipo).
    pub const FIELDS: [&'static str; 10] = [
        "name",
        "phone",
        "region",
        "product",
        "message",
        "utm_data",
        "visitor_uid",
        "referer",
        "status",
        "priority",
    ];
}

/// Dados já validados, prontos para o INSERT.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLead {
    pub name: String,
    pub phone: String,
    pub region: Region,
    pub message: String,
    pub product_id: Option<Uuid>,
    pub referer: Option<String>,
    pub utm_data: Option<String>,
    pub visitor_uid: Option<String>,
    pub status: LeadStatus,
    pub priority: LeadPriority,
}

/// Resultado do CRM gravado de volta no lead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrmSync {
    pub status: String,
    pub external_id: Option<String>,
}

impl CrmSync {
    pub const FAILED: &'static str = "failed";

    pub fn failed() -> Self {
        Self { status: Self::FAILED.to_string(), external_id: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_parse_matches_serde_names() {
        for region in Region::ALL {
            let json = serde_json::to_value(region).unwrap();
            assert_eq!(json.as_str(), Some(region.as_str()));
            assert_eq!(Region::parse(region.as_str()), Some(region));
        }
        assert_eq!(Region::parse("moscow"), None);
    }

    #[test]
    fn every_listed_field_decodes_on_its_own() {
        // Um campo sozinho sempre desserializa, senão o erro de tipo não acha o culpado
        let full = serde_json::json!({
            "name": "Ali",
            "phone": "+998901234567",
            "region": "navoi",
            "product": Uuid::nil(),
            "message": "Salom",
            "utm_data": {"utm_source": "google"},
            "visitor_uid": "abc-123",
            "referer": "/products/",
            "status": "new",
            "priority": "low"
        });
        assert!(serde_json::from_value::<CreateLeadPayload>(serde_json::json!({})).is_ok());
        for field in CreateLeadPayload::FIELDS {
            let value = full.get(field).cloned().unwrap();
            let body = serde_json::json!({ field: value });
            assert!(serde_json::from_value::<CreateLeadPayload>(body).is_ok(), "{field}");
        }
    }

    #[test]
    fn defaults_are_new_and_medium() {
        assert_eq!(LeadStatus::default(), LeadStatus::New);
        assert_eq!(LeadPriority::default(), LeadPriority::Medium);
    }

    #[test]
    fn status_and_priority_parse() {
        assert_eq!(LeadStatus::parse("in_progress"), Some(LeadStatus::InProgress));
        assert_eq!(LeadStatus::parse("done"), None);
        assert_eq!(LeadPriority::parse("high"), Some(LeadPriority::High));
        assert_eq!(LeadPriority::parse("urgent"), None);
    }
}
