// src/models/job.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgRow, FromRow, Row};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::localized_columns;
use crate::models::lead::Region;
use crate::models::localized::{Localized, Translatable};

// --- PAYLOAD (Candidatura a uma vaga) ---

/// Metadados do currículo enviado. O arquivo não passa por aqui.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ResumeMeta {
    #[serde(default)]
    #[schema(example = "Karimov_CV.pdf")]
    pub name: String,

    // Tamanho em bytes
    #[serde(default)]
    #[schema(example = 245760)]
    pub size: u64,

    #[schema(example = "application/pdf")]
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateJobApplicationPayload {
    #[validate(required)]
    pub vacancy: Option<Uuid>,

    #[schema(example = "tashkent_city")]
    pub region: Option<String>,

    #[validate(required, custom(function = "crate::services::job_service::validate_resume"))]
    pub resume: Option<ResumeMeta>,
}

impl CreateJobApplicationPayload {
    pub const FIELDS: [&'static str; 3] = ["vacancy", "region", "resume"];
}

/// Dados já validados, prontos para o INSERT.
#[derive(Debug, Clone, PartialEq)]
pub struct NewJobApplication {
    pub vacancy_id: Uuid,
    pub region: Region,
    pub resume_name: String,
    pub resume_size: i64,
    pub resume_content_type: Option<String>,
}

// --- CANDIDATURA (O registro persistido, com o título da vaga) ---

#[derive(Debug, Clone)]
pub struct JobApplication {
    pub id: Uuid,
    pub vacancy_id: Uuid,
    pub vacancy_title: Localized,
    pub region: Region,
    pub resume_name: String,
    pub resume_size: i64,
    pub resume_content_type: Option<String>,
    pub is_processed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy)]
pub enum JobApplicationField {
    VacancyTitle,
}

impl Translatable for JobApplication {
    type Field = JobApplicationField;

    fn translations(&self, field: Self::Field) -> &Localized {
        match field {
            JobApplicationField::VacancyTitle => &self.vacancy_title,
        }
    }
}

// As colunas title* vêm do JOIN com vacancies
impl<'r> FromRow<'r, PgRow> for JobApplication {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            vacancy_id: row.try_get("vacancy_id")?,
            vacancy_title: Localized::from_row(row, &localized_columns!("title"))?,
            region: row.try_get("region")?,
            resume_name: row.try_get("resume_name")?,
            resume_size: row.try_get("resume_size")?,
            resume_content_type: row.try_get("resume_content_type")?,
            is_processed: row.try_get("is_processed")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

// --- VIEW ---

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct JobApplicationView {
    pub id: Uuid,
    pub vacancy: Uuid,
    #[schema(example = "Haydovchi")]
    pub vacancy_title: String,
    pub region: Region,
    pub resume: ResumeMeta,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::localized::Lang;

    #[test]
    fn every_listed_field_decodes_on_its_own() {
        let full = serde_json::json!({
            "vacancy": Uuid::nil(),
            "region": "navoi",
            "resume": {"name": "cv.pdf", "size": 1}
        });
        for field in CreateJobApplicationPayload::FIELDS {
            let value = full.get(field).cloned().unwrap();
            let body = serde_json::json!({ field: value });
            assert!(serde_json::from_value::<CreateJobApplicationPayload>(body).is_ok(), "{field}");
        }
    }

    #[test]
    fn vacancy_title_follows_language() {
        let application = JobApplication {
            id: Uuid::new_v4(),
            vacancy_id: Uuid::new_v4(),
            vacancy_title: Localized::new("Haydovchi").with(Lang::Ru, "Водитель"),
            region: Region::Navoi,
            resume_name: "cv.pdf".to_string(),
            resume_size: 1024,
            resume_content_type: None,
            is_processed: false,
            created_at: Utc::now(),
        };
        assert_eq!(application.localized(JobApplicationField::VacancyTitle, Lang::Ru), "Водитель");
        assert_eq!(application.localized(JobApplicationField::VacancyTitle, Lang::En), "Haydovchi");
    }
}
