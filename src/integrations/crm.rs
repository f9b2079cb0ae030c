// src/integrations/crm.rs

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::models::lead::Lead;
use crate::services::dispatch::{AdapterError, CrmAdapter, CrmReceipt};

/// Envia o lead para o webhook do CRM.
///
/// Resposta esperada: 2xx com `{"id": <string|número>, "status": <string opcional>}`.
#[derive(Clone)]
pub struct HttpCrmAdapter {
    client: Client,
    url: String,
    token: Option<String>,
}

impl HttpCrmAdapter {
    pub fn new(client: Client, url: impl Into<String>, token: Option<String>) -> Self {
        Self { client, url: url.into(), token }
    }
}

pub(crate) fn lead_payload(lead: &Lead) -> Value {
    json!({
        "id": lead.id,
        "name": lead.name,
        "phone": lead.phone,
        "region": lead.region.as_str(),
        "region_display": lead.region.display_name(),
        "message": lead.message,
        "product_id": lead.product_id,
        "referer": lead.referer,
        "utm_data": lead.utm_data,
        "visitor_uid": lead.visitor_uid,
        "created_at": lead.created_at,
    })
}

pub(crate) fn parse_receipt(body: &Value) -> Result<CrmReceipt, AdapterError> {
    let external_id = match body.get("id") {
        Some(Value::String(id)) if !id.is_empty() => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        _ => return Err(AdapterError::BadResponse(format!("sem 'id' na resposta: {body}"))),
    };
    let status = body
        .get("status")
        .and_then(Value::as_str)
        .unwrap_or("sent")
        .to_string();

    Ok(CrmReceipt { external_id, status })
}

#[async_trait]
impl CrmAdapter for HttpCrmAdapter {
    async fn send(&self, lead: &Lead) -> Result<CrmReceipt, AdapterError> {
        let mut request = self.client.post(&self.url).json(&lead_payload(lead));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| AdapterError::Transport(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AdapterError::Rejected { status: status.as_u16(), body });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| AdapterError::BadResponse(e.without_url().to_string()))?;

        parse_receipt(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    use crate::models::lead::{LeadPriority, LeadStatus, Region};

    #[test]
    fn receipt_accepts_numeric_and_string_ids() {
        let receipt = parse_receipt(&json!({"id": 123456, "status": "created"})).unwrap();
        assert_eq!(receipt, CrmReceipt { external_id: "123456".into(), status: "created".into() });

        let receipt = parse_receipt(&json!({"id": "abc"})).unwrap();
        assert_eq!(receipt.external_id, "abc");
        assert_eq!(receipt.status, "sent");
    }

    #[test]
    fn receipt_without_id_is_bad_response() {
        assert!(matches!(parse_receipt(&json!({"ok": true})), Err(AdapterError::BadResponse(_))));
        assert!(matches!(parse_receipt(&json!({"id": ""})), Err(AdapterError::BadResponse(_))));
    }

    #[test]
    fn payload_carries_dedup_token_and_region() {
        let lead = Lead {
            id: Uuid::new_v4(),
            name: "Dilnoza".into(),
            phone: "+998935551122".into(),
            region: Region::Fergana,
            message: "Narxi qancha?".into(),
            product_id: None,
            referer: Some("https://faw.uz/".into()),
            utm_data: Some(r#"{"utm_source":"fb"}"#.into()),
            visitor_uid: Some("abc-123_ok".into()),
            status: LeadStatus::New,
            priority: LeadPriority::Medium,
            manager_id: None,
            admin_comment: String::new(),
            crm_status: None,
            crm_lead_id: None,
            created_at: Utc::now(),
        };

        let payload = lead_payload(&lead);
        assert_eq!(payload["visitor_uid"], "abc-123_ok");
        assert_eq!(payload["region"], "fergana");
        assert_eq!(payload["region_display"], "Farg'ona viloyati");
        assert_eq!(payload["utm_data"], r#"{"utm_source":"fb"}"#);
    }
}
