// src/services/content_service.rs

use std::collections::HashMap;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ContentRepository,
    models::{
        content::{
            NewsBlockField, NewsBlockView, NewsField, NewsView, ResponsibilityView, VacancyField,
            VacancyPoint, VacancyPointField, VacancyPointKind, VacancyPointView,
            VacancyResponsibilityField, VacancyView,
        },
        localized::{Lang, Translatable},
    },
    services::catalog_service::MediaUrls,
};

#[derive(Clone)]
pub struct ContentService {
    repo: ContentRepository,
    media: MediaUrls,
}

// Agrupa filhos pelo id do pai, preservando a ordem da consulta.
fn by_parent<T>(items: Vec<T>, parent: impl Fn(&T) -> Uuid) -> HashMap<Uuid, Vec<T>> {
    let mut grouped: HashMap<Uuid, Vec<T>> = HashMap::new();
    for item in items {
        grouped.entry(parent(&item)).or_default().push(item);
    }
    grouped
}

fn point_views(points: Option<Vec<VacancyPoint>>, lang: Lang) -> Vec<VacancyPointView> {
    points
        .unwrap_or_default()
        .iter()
        .map(|p| VacancyPointView {
            id: p.id,
            text: p.localized(VacancyPointField::Text, lang).to_string(),
        })
        .collect()
}

impl ContentService {
    pub fn new(repo: ContentRepository, media: MediaUrls) -> Self {
        Self { repo, media }
    }

    pub async fn list_vacancies(&self, lang: Lang) -> Result<Vec<VacancyView>, AppError> {
        let vacancies = self.repo.list_active_vacancies().await?;
        let ids: Vec<Uuid> = vacancies.iter().map(|v| v.id).collect();

        let mut responsibilities = by_parent(self.repo.responsibilities_for(&ids).await?, |r| r.vacancy_id);
        let mut requirements =
            by_parent(self.repo.points_for(VacancyPointKind::Requirement, &ids).await?, |p| p.vacancy_id);
        let mut conditions =
            by_parent(self.repo.points_for(VacancyPointKind::Condition, &ids).await?, |p| p.vacancy_id);
        let mut ideal =
            by_parent(self.repo.points_for(VacancyPointKind::IdealCandidate, &ids).await?, |p| p.vacancy_id);

        Ok(vacancies
            .iter()
            .map(|vacancy| VacancyView {
                id: vacancy.id,
                title: vacancy.localized(VacancyField::Title, lang).to_string(),
                short_description: vacancy.localized(VacancyField::ShortDescription, lang).to_string(),
                contact_info: vacancy.localized(VacancyField::ContactInfo, lang).to_string(),
                responsibilities: responsibilities
                    .remove(&vacancy.id)
                    .unwrap_or_default()
                    .iter()
                    .map(|r| ResponsibilityView {
                        id: r.id,
                        title: r.localized(VacancyResponsibilityField::Title, lang).to_string(),
                        text: r.localized(VacancyResponsibilityField::Text, lang).to_string(),
                    })
                    .collect(),
                requirements: point_views(requirements.remove(&vacancy.id), lang),
                conditions: point_views(conditions.remove(&vacancy.id), lang),
                ideal_candidates: point_views(ideal.remove(&vacancy.id), lang),
                is_active: vacancy.is_active,
                created_at: vacancy.created_at,
            })
            .collect())
    }

    pub async fn list_news(&self, lang: Lang) -> Result<Vec<NewsView>, AppError> {
        let news = self.repo.list_active_news().await?;
        let ids: Vec<Uuid> = news.iter().map(|n| n.id).collect();
        let mut blocks = by_parent(self.repo.blocks_for(&ids).await?, |b| b.news_id);

        Ok(news
            .iter()
            .map(|item| NewsView {
                id: item.id,
                slug: item.slug.clone(),
                title: item.localized(NewsField::Title, lang).to_string(),
                desc: item.localized(NewsField::Desc, lang).to_string(),
                image_url: self.media.url(item.image.as_deref()),
                order: item.order,
                created_at: item.created_at,
                blocks: blocks
                    .remove(&item.id)
                    .unwrap_or_default()
                    .iter()
                    .map(|b| NewsBlockView {
                        id: b.id,
                        title: b.localized(NewsBlockField::Title, lang).to_string(),
                        text: b.localized(NewsBlockField::Text, lang).to_string(),
                        image_url: self.media.url(b.image.as_deref()),
                        order: b.order,
                    })
                    .collect(),
            })
            .collect())
    }
}
