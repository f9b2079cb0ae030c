// src/db/lead_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::lead::{CrmSync, Lead, NewLead},
};

/// Persistência dos leads. O pipeline de despacho e o serviço dependem só disto.
#[async_trait]
pub trait LeadStore: Send + Sync {
    async fn insert(&self, lead: NewLead) -> Result<Lead, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Lead>, AppError>;

    /// Grava o resultado do CRM. `external_id = None` mantém o id já gravado.
    async fn record_crm_sync(&self, id: Uuid, sync: &CrmSync) -> Result<(), AppError>;
}

// O repositório de leads, responsável pela tabela 'leads'
#[derive(Clone)]
pub struct LeadRepository {
    pool: PgPool,
}

impl LeadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LeadStore for LeadRepository {
    async fn insert(&self, lead: NewLead) -> Result<Lead, AppError> {
        sqlx::query_as::<_, Lead>(
            r#"
            INSERT INTO leads (
                name, phone, region, message, product_id,
                referer, utm_data, visitor_uid, status, priority
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(&lead.name)
        .bind(&lead.phone)
        .bind(lead.region)
        .bind(&lead.message)
        .bind(lead.product_id)
        .bind(&lead.referer)
        .bind(&lead.utm_data)
        .bind(&lead.visitor_uid)
        .bind(lead.status)
        .bind(lead.priority)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // Produto inexistente vira erro de validação do campo, não 500
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return AppError::field("product", "unknown_product");
                }
            }
            AppError::DatabaseError(e)
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Lead>, AppError> {
        let lead = sqlx::query_as::<_, Lead>("SELECT * FROM leads WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(lead)
    }

    async fn record_crm_sync(&self, id: Uuid, sync: &CrmSync) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE leads
            SET crm_status = $2,
                crm_lead_id = COALESCE($3, crm_lead_id)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&sync.status)
        .bind(&sync.external_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
