// src/db/content_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::content::{News, NewsBlock, Vacancy, VacancyPoint, VacancyPointKind, VacancyResponsibility},
};

#[derive(Clone)]
pub struct ContentRepository {
    pool: PgPool,
}

impl ContentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  VAGAS
    // =========================================================================

    pub async fn list_active_vacancies(&self) -> Result<Vec<Vacancy>, AppError> {
        let vacancies = sqlx::query_as::<_, Vacancy>(
            r#"SELECT * FROM vacancies WHERE is_active ORDER BY "order" ASC, created_at DESC"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(vacancies)
    }

    pub async fn responsibilities_for(
        &self,
        vacancy_ids: &[Uuid],
    ) -> Result<Vec<VacancyResponsibility>, AppError> {
        let items = sqlx::query_as::<_, VacancyResponsibility>(
            r#"
            SELECT * FROM vacancy_responsibilities
            WHERE vacancy_id = ANY($1)
            ORDER BY "order" ASC
            "#,
        )
        .bind(vacancy_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Requisitos, condições ou candidato ideal (mesma forma, tabela escolhida pelo tipo).
    pub async fn points_for(
        &self,
        kind: VacancyPointKind,
        vacancy_ids: &[Uuid],
    ) -> Result<Vec<VacancyPoint>, AppError> {
        // O nome da tabela vem de um enum fechado, nunca do usuário
        let sql = format!(
            r#"SELECT * FROM {} WHERE vacancy_id = ANY($1) ORDER BY "order" ASC"#,
            kind.table()
        );

        let items = sqlx::query_as::<_, VacancyPoint>(&sql)
            .bind(vacancy_ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }

    // =========================================================================
    //  NOTÍCIAS
    // =========================================================================

    pub async fn list_active_news(&self) -> Result<Vec<News>, AppError> {
        let news = sqlx::query_as::<_, News>(
            r#"SELECT * FROM news WHERE is_active ORDER BY "order" DESC, created_at DESC"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(news)
    }

    pub async fn blocks_for(&self, news_ids: &[Uuid]) -> Result<Vec<NewsBlock>, AppError> {
        let blocks = sqlx::query_as::<_, NewsBlock>(
            r#"SELECT * FROM news_blocks WHERE news_id = ANY($1) ORDER BY "order" ASC"#,
        )
        .bind(news_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(blocks)
    }
}
