// src/models/content.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{postgres::PgRow, FromRow, Row};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::localized_columns;
use crate::models::localized::{Localized, Translatable};

// =========================================================================
//  VAGAS
// =========================================================================

#[derive(Debug, Clone)]
pub struct Vacancy {
    pub id: Uuid,
    pub title: Localized,
    pub short_description: Localized,
    pub contact_info: Localized,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy)]
pub enum VacancyField {
    Title,
    ShortDescription,
    ContactInfo,
}

impl Translatable for Vacancy {
    type Field = VacancyField;

    fn translations(&self, field: Self::Field) -> &Localized {
        match field {
            VacancyField::Title => &self.title,
            VacancyField::ShortDescription => &self.short_description,
            VacancyField::ContactInfo => &self.contact_info,
        }
    }
}

impl<'r> FromRow<'r, PgRow> for Vacancy {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            title: Localized::from_row(row, &localized_columns!("title"))?,
            short_description: Localized::from_row(row, &localized_columns!("short_description"))?,
            contact_info: Localized::from_row(row, &localized_columns!("contact_info"))?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

/// Responsabilidade: o único sub-item de vaga com título próprio.
#[derive(Debug, Clone)]
pub struct VacancyResponsibility {
    pub id: Uuid,
    pub vacancy_id: Uuid,
    pub title: Localized,
    pub text: Localized,
    pub order: i32,
}

#[derive(Debug, Clone, Copy)]
pub enum VacancyResponsibilityField {
    Title,
    Text,
}

impl Translatable for VacancyResponsibility {
    type Field = VacancyResponsibilityField;

    fn translations(&self, field: Self::Field) -> &Localized {
        match field {
            VacancyResponsibilityField::Title => &self.title,
            VacancyResponsibilityField::Text => &self.text,
        }
    }
}

impl<'r> FromRow<'r, PgRow> for VacancyResponsibility {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            vacancy_id: row.try_get("vacancy_id")?,
            title: Localized::from_row(row, &localized_columns!("title"))?,
            text: Localized::from_row(row, &localized_columns!("text"))?,
            order: row.try_get("order")?,
        })
    }
}

/// Requisito, condição ou candidato ideal: mesma forma, tabelas diferentes.
#[derive(Debug, Clone)]
pub struct VacancyPoint {
    pub id: Uuid,
    pub vacancy_id: Uuid,
    pub text: Localized,
    pub order: i32,
}

#[derive(Debug, Clone, Copy)]
pub enum VacancyPointField {
    Text,
}

impl Translatable for VacancyPoint {
    type Field = VacancyPointField;

    fn translations(&self, field: Self::Field) -> &Localized {
        match field {
            VacancyPointField::Text => &self.text,
        }
    }
}

impl<'r> FromRow<'r, PgRow> for VacancyPoint {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            vacancy_id: row.try_get("vacancy_id")?,
            text: Localized::from_row(row, &localized_columns!("text"))?,
            order: row.try_get("order")?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VacancyPointKind {
    Requirement,
    Condition,
    IdealCandidate,
}

impl VacancyPointKind {
    pub const fn table(self) -> &'static str {
        match self {
            VacancyPointKind::Requirement => "vacancy_requirements",
            VacancyPointKind::Condition => "vacancy_conditions",
            VacancyPointKind::IdealCandidate => "vacancy_ideal_candidates",
        }
    }
}

// =========================================================================
//  NOTÍCIAS
// =========================================================================

#[derive(Debug, Clone)]
pub struct News {
    pub id: Uuid,
    pub slug: String,
    pub title: Localized,
    pub desc: Localized,
    pub image: Option<String>,
    pub order: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy)]
pub enum NewsField {
    Title,
    Desc,
}

impl Translatable for News {
    type Field = NewsField;

    fn translations(&self, field: Self::Field) -> &Localized {
        match field {
            NewsField::Title => &self.title,
            NewsField::Desc => &self.desc,
        }
    }
}

impl<'r> FromRow<'r, PgRow> for News {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            slug: row.try_get("slug")?,
            title: Localized::from_row(row, &localized_columns!("title"))?,
            desc: Localized::from_row(row, &localized_columns!("desc"))?,
            image: row.try_get("image")?,
            order: row.try_get("order")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct NewsBlock {
    pub id: Uuid,
    pub news_id: Uuid,
    pub title: Localized,
    pub text: Localized,
    pub image: Option<String>,
    pub order: i32,
}

#[derive(Debug, Clone, Copy)]
pub enum NewsBlockField {
    Title,
    Text,
}

impl Translatable for NewsBlock {
    type Field = NewsBlockField;

    fn translations(&self, field: Self::Field) -> &Localized {
        match field {
            NewsBlockField::Title => &self.title,
            NewsBlockField::Text => &self.text,
        }
    }
}

impl<'r> FromRow<'r, PgRow> for NewsBlock {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            news_id: row.try_get("news_id")?,
            title: Localized::from_row(row, &localized_columns!("title"))?,
            text: Localized::from_row(row, &localized_columns!("text"))?,
            image: row.try_get("image")?,
            order: row.try_get("order")?,
        })
    }
}

// =========================================================================
//  RESPOSTAS
// =========================================================================

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ResponsibilityView {
    pub id: Uuid,
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VacancyPointView {
    pub id: Uuid,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VacancyView {
    pub id: Uuid,
    pub title: String,
    pub short_description: String,
    pub contact_info: String,
    pub responsibilities: Vec<ResponsibilityView>,
    pub requirements: Vec<VacancyPointView>,
    pub conditions: Vec<VacancyPointView>,
    pub ideal_candidates: Vec<VacancyPointView>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NewsBlockView {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    pub image_url: Option<String>,
    pub order: i32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NewsView {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub desc: String,
    pub image_url: Option<String>,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub blocks: Vec<NewsBlockView>,
}
