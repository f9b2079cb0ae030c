// src/services/job_service.rs

use std::sync::Arc;

use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    common::error::AppError,
    db::JobApplicationStore,
    models::{
        job::{
            CreateJobApplicationPayload, JobApplication, JobApplicationField, JobApplicationView,
            NewJobApplication, ResumeMeta,
        },
        lead::Region,
        localized::{Lang, Translatable},
    },
};

/// Limite do currículo: 10 MB, inclusive.
pub const MAX_RESUME_BYTES: u64 = 10 * 1024 * 1024;

pub const ALLOWED_RESUME_EXTENSIONS: [&str; 6] = ["pdf", "doc", "docx", "jpg", "jpeg", "png"];

pub const RESUME_NAME_MAX_LEN: usize = 255;

#[derive(Clone)]
pub struct JobService {
    store: Arc<dyn JobApplicationStore>,
}

impl JobService {
    pub fn new(store: Arc<dyn JobApplicationStore>) -> Self {
        Self { store }
    }

    /// Valida e grava uma candidatura. A resposta traz o título da vaga no idioma pedido.
    pub async fn submit(
        &self,
        payload: CreateJobApplicationPayload,
        lang: Lang,
    ) -> Result<JobApplicationView, AppError> {
        let new_application = prepare(payload)?;

        let application = self.store.insert(new_application).await?;
        tracing::info!(
            application_id = %application.id,
            vacancy_id = %application.vacancy_id,
            region = application.region.as_str(),
            "✅ Candidatura gravada"
        );

        Ok(to_view(application, lang))
    }
}

// --- Validação ---

/// Tamanho primeiro, depois a extensão (sem diferenciar maiúsculas).
pub fn validate_resume(resume: &ResumeMeta) -> Result<(), ValidationError> {
    if resume.size > MAX_RESUME_BYTES {
        let mut err = ValidationError::new("resume_too_large");
        err.add_param("max".into(), &MAX_RESUME_BYTES);
        return Err(err);
    }

    let name = resume.name.trim().to_lowercase();
    let extension = name.rsplit('.').next().unwrap_or_default();
    if !name.contains('.') || !ALLOWED_RESUME_EXTENSIONS.contains(&extension) {
        return Err(ValidationError::new("resume_bad_extension"));
    }

    if resume.name.chars().count() > RESUME_NAME_MAX_LEN {
        return Err(ValidationError::new("too_long"));
    }
    Ok(())
}

/// Transforma o payload em uma `NewJobApplication`, acumulando todos os erros de campo.
pub fn prepare(payload: CreateJobApplicationPayload) -> Result<NewJobApplication, AppError> {
    let mut errors = match payload.validate() {
        Ok(()) => ValidationErrors::new(),
        Err(errors) => errors,
    };

    let region = match payload.region.as_deref().map(str::trim) {
        None | Some("") => {
            errors.add("region", ValidationError::new("required"));
            None
        }
        Some(value) => {
            let region = Region::parse(value);
            if region.is_none() {
                errors.add("region", ValidationError::new("invalid_choice"));
            }
            region
        }
    };

    if !errors.is_empty() {
        return Err(AppError::ValidationError(errors));
    }
    let vacancy_id = payload.vacancy.ok_or_else(|| AppError::field("vacancy", "required"))?;
    let region = region.ok_or_else(|| AppError::field("region", "required"))?;
    let resume = payload.resume.ok_or_else(|| AppError::field("resume", "required"))?;
    let resume_size =
        i64::try_from(resume.size).map_err(|_| AppError::field("resume", "resume_too_large"))?;

    Ok(NewJobApplication {
        vacancy_id,
        region,
        resume_name: resume.name.trim().to_string(),
        resume_size,
        resume_content_type: resume.content_type.filter(|ct| !ct.trim().is_empty()),
    })
}

fn to_view(application: JobApplication, lang: Lang) -> JobApplicationView {
    JobApplicationView {
        vacancy_title: application
            .localized(JobApplicationField::VacancyTitle, lang)
            .to_string(),
        id: application.id,
        vacancy: application.vacancy_id,
        region: application.region,
        resume: ResumeMeta {
            name: application.resume_name,
            size: u64::try_from(application.resume_size).unwrap_or_default(),
            content_type: application.resume_content_type,
        },
        created_at: application.created_at,
    }
}
