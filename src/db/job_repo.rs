// src/db/job_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::job::{JobApplication, NewJobApplication},
};

/// Persistência das candidaturas. O serviço depende só disto.
#[async_trait]
pub trait JobApplicationStore: Send + Sync {
    /// Grava e devolve a candidatura já com o título da vaga.
    async fn insert(&self, application: NewJobApplication) -> Result<JobApplication, AppError>;
}

// O repositório de candidaturas, responsável pela tabela 'job_applications'
#[derive(Clone)]
pub struct JobApplicationRepository {
    pool: PgPool,
}

impl JobApplicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobApplicationStore for JobApplicationRepository {
    async fn insert(&self, application: NewJobApplication) -> Result<JobApplication, AppError> {
        sqlx::query_as::<_, JobApplication>(
            r#"
            WITH inserted AS (
                INSERT INTO job_applications (
                    vacancy_id, region, resume_name, resume_size, resume_content_type
                )
                VALUES ($1, $2, $3, $4, $5)
                RETURNING *
            )
            SELECT i.*, v.title, v.title_uz, v.title_ru, v.title_en
            FROM inserted i
            JOIN vacancies v ON v.id = i.vacancy_id
            "#,
        )
        .bind(application.vacancy_id)
        .bind(application.region)
        .bind(&application.resume_name)
        .bind(application.resume_size)
        .bind(&application.resume_content_type)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // Vaga inexistente vira erro de validação do campo, não 500
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return AppError::field("vacancy", "unknown_vacancy");
                }
            }
            AppError::DatabaseError(e)
        })
    }
}
