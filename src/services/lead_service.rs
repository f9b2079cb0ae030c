// src/services/lead_service.rs

use std::sync::Arc;

use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    common::error::AppError,
    db::LeadStore,
    models::lead::{CreateLeadPayload, Lead, LeadPriority, LeadStatus, NewLead, Region},
    services::{
        dispatch::{DispatchOutcome, DispatchPipeline},
        utm::{self, ExplicitUtm},
    },
};

pub const VISITOR_UID_MAX_LEN: usize = 100;

#[derive(Clone)]
pub struct LeadService {
    store: Arc<dyn LeadStore>,
    pipeline: DispatchPipeline,
}

impl LeadService {
    pub fn new(store: Arc<dyn LeadStore>, pipeline: DispatchPipeline) -> Self {
        Self { store, pipeline }
    }

    /// Valida, grava e despacha um lead do formulário de contato.
    ///
    /// Só erros de validação e de gravação voltam como `Err`. Depois do INSERT
    /// o lead existe, e falhas do CRM ou do chat ficam no `DispatchOutcome`.
    pub async fn submit(
        &self,
        payload: CreateLeadPayload,
        header_referer: Option<&str>,
    ) -> Result<(Lead, DispatchOutcome), AppError> {
        let new_lead = prepare(payload, header_referer)?;

        let lead = self.store.insert(new_lead).await?;
        tracing::info!(lead_id = %lead.id, region = lead.region.as_str(), "✅ Lead gravado");

        let outcome = self.pipeline.dispatch(lead.clone()).await;
        Ok((lead, outcome))
    }
}

// --- Validação ---

/// Token do pixel do CRM: até 100 caracteres, letras e dígitos, com `-` e `_` permitidos.
pub fn validate_visitor_uid(value: &str) -> Result<(), ValidationError> {
    let stripped: String = value.chars().filter(|c| *c != '-' && *c != '_').collect();
    if value.chars().count() > VISITOR_UID_MAX_LEN
        || stripped.is_empty()
        || !stripped.chars().all(char::is_alphanumeric)
    {
        return Err(ValidationError::new("invalid_visitor_uid"));
    }
    Ok(())
}

fn parse_choice<T>(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<&str>,
    parse: fn(&str) -> Option<T>,
) -> Option<T> {
    let value = value?;
    match parse(value) {
        Some(parsed) => Some(parsed),
        None => {
            errors.add(field, ValidationError::new("invalid_choice"));
            None
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Transforma o payload em um `NewLead`, acumulando todos os erros de campo.
pub fn prepare(
    mut payload: CreateLeadPayload,
    header_referer: Option<&str>,
) -> Result<NewLead, AppError> {
    payload.name = payload.name.trim().to_string();
    payload.phone = payload.phone.trim().to_string();

    let mut errors = match payload.validate() {
        Ok(()) => ValidationErrors::new(),
        Err(errors) => errors,
    };

    let region = match payload.region.as_deref().map(str::trim) {
        None | Some("") => {
            errors.add("region", ValidationError::new("required"));
            None
        }
        value => parse_choice(&mut errors, "region", value, Region::parse),
    };
    let status = parse_choice(&mut errors, "status", payload.status.as_deref(), LeadStatus::parse);
    let priority =
        parse_choice(&mut errors, "priority", payload.priority.as_deref(), LeadPriority::parse);

    // Vazio conta como ausente
    let visitor_uid = payload.visitor_uid.filter(|uid| !uid.is_empty());
    if let Some(uid) = &visitor_uid {
        if let Err(e) = validate_visitor_uid(uid) {
            errors.add("visitor_uid", e);
        }
    }

    let explicit_utm = match ExplicitUtm::from_json(payload.utm_data) {
        Ok(utm) => utm,
        Err(()) => {
            errors.add("utm_data", ValidationError::new("invalid_utm"));
            None
        }
    };

    if !errors.is_empty() {
        return Err(AppError::ValidationError(errors));
    }
    let region = region.ok_or_else(|| AppError::field("region", "required"))?;

    // O campo explícito ganha do cabeçalho
    let referer = non_blank(payload.referer).or_else(|| non_blank(header_referer.map(str::to_string)));
    let utm_data = utm::extract(explicit_utm, referer.as_deref()).map(|a| a.to_stored());

    Ok(NewLead {
        name: payload.name,
        phone: payload.phone,
        region,
        message: payload.message.unwrap_or_default(),
        product_id: payload.product,
        referer,
        utm_data,
        visitor_uid,
        status: status.unwrap_or_default(),
        priority: priority.unwrap_or_default(),
    })
}
