// src/services/dispatch.rs

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::Instrument;

use crate::db::LeadStore;
use crate::models::lead::{CrmSync, Lead};

// =========================================================================
//  CONTRATOS DOS COLABORADORES EXTERNOS
// =========================================================================

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("integração '{0}' não configurada")]
    NotConfigured(&'static str),

    #[error("falha de transporte: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("serviço remoto recusou o pedido (HTTP {status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("resposta inesperada do serviço remoto: {0}")]
    BadResponse(String),
}

/// O que o CRM devolve ao aceitar um lead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrmReceipt {
    pub external_id: String,
    pub status: String,
}

#[async_trait]
pub trait CrmAdapter: Send + Sync {
    async fn send(&self, lead: &Lead) -> Result<CrmReceipt, AdapterError>;
}

#[async_trait]
pub trait ChatNotifier: Send + Sync {
    async fn notify(&self, lead: &Lead) -> Result<(), AdapterError>;
}

/// Instalado no lugar de uma integração sem configuração: toda chamada falha.
#[derive(Debug, Clone, Copy)]
pub struct DisabledAdapter(pub &'static str);

#[async_trait]
impl CrmAdapter for DisabledAdapter {
    async fn send(&self, _lead: &Lead) -> Result<CrmReceipt, AdapterError> {
        Err(AdapterError::NotConfigured(self.0))
    }
}

#[async_trait]
impl ChatNotifier for DisabledAdapter {
    async fn notify(&self, _lead: &Lead) -> Result<(), AdapterError> {
        Err(AdapterError::NotConfigured(self.0))
    }
}

// =========================================================================
//  PIPELINE
// =========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub crm_ok: bool,
    pub notify_ok: bool,
}

/// CRM primeiro, chat depois, sempre os dois.
///
/// Cada chamada é isolada: o erro é logado com o id do lead e vira `false` no
/// resultado. Nada aqui desfaz o lead já gravado nem chega a quem enviou o formulário.
#[derive(Clone)]
pub struct DispatchPipeline {
    store: Arc<dyn LeadStore>,
    crm: Arc<dyn CrmAdapter>,
    notifier: Arc<dyn ChatNotifier>,
}

impl DispatchPipeline {
    pub fn new(
        store: Arc<dyn LeadStore>,
        crm: Arc<dyn CrmAdapter>,
        notifier: Arc<dyn ChatNotifier>,
    ) -> Self {
        Self { store, crm, notifier }
    }

    pub async fn dispatch(&self, lead: Lead) -> DispatchOutcome {
        let span = tracing::info_span!("dispatch", lead_id = %lead.id);
        self.run(lead).instrument(span).await
    }

    async fn run(&self, lead: Lead) -> DispatchOutcome {
        // 1. CRM
        let (crm_ok, lead) = match self.crm.send(&lead).await {
            Ok(receipt) => {
                tracing::info!(external_id = %receipt.external_id, status = %receipt.status, "Lead enviado ao CRM");
                let sync = CrmSync {
                    status: receipt.status,
                    external_id: Some(receipt.external_id),
                };
                self.record(&lead, &sync).await;
                // Recarrega para o chat ver o id externo gravado
                (true, self.refresh(lead, sync).await)
            }
            Err(e) => {
                tracing::error!(lead_id = %lead.id, error = %e, "Erro do CRM para o lead");
                self.record(&lead, &CrmSync::failed()).await;
                (false, lead)
            }
        };

        // 2. Chat (roda mesmo que o CRM tenha falhado)
        let notify_ok = match self.notifier.notify(&lead).await {
            Ok(()) => {
                tracing::info!("Notificação do lead enviada ao chat");
                true
            }
            Err(e) => {
                tracing::error!(lead_id = %lead.id, error = %e, "Erro do chat para o lead");
                false
            }
        };

        let outcome = DispatchOutcome { crm_ok, notify_ok };
        tracing::debug!(?outcome, "Despacho concluído");
        outcome
    }

    async fn record(&self, lead: &Lead, sync: &CrmSync) {
        if let Err(e) = self.store.record_crm_sync(lead.id, sync).await {
            tracing::error!(lead_id = %lead.id, error = %e, "Falha ao gravar o resultado do CRM");
        }
    }

    // Se a releitura falhar, segue com o lead em memória + o que o CRM devolveu.
    async fn refresh(&self, lead: Lead, sync: CrmSync) -> Lead {
        match self.store.find_by_id(lead.id).await {
            Ok(Some(fresh)) => fresh,
            Ok(None) => {
                tracing::warn!(lead_id = %lead.id, "Lead sumiu antes da releitura");
                apply_sync(lead, sync)
            }
            Err(e) => {
                tracing::error!(lead_id = %lead.id, error = %e, "Falha ao reler o lead");
                apply_sync(lead, sync)
            }
        }
    }
}

fn apply_sync(mut lead: Lead, sync: CrmSync) -> Lead {
    lead.crm_status = Some(sync.status);
    if sync.external_id.is_some() {
        lead.crm_lead_id = sync.external_id;
    }
    lead
}
