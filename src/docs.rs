// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;
use crate::models::localized::Lang;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Leads ---
        handlers::leads::submit_lead,

        // --- Idioma ---
        handlers::language::set_language_query,
        handlers::language::set_language_form,

        // --- Catálogo ---
        handlers::catalog::list_categories,
        handlers::catalog::list_products,
        handlers::catalog::product_slider,
        handlers::catalog::product_detail,

        // --- Conteúdo ---
        handlers::content::list_vacancies,
        handlers::content::list_news,
        handlers::jobs::submit_job_application,
        handlers::content::health,
    ),
    components(
        schemas(
            // --- Leads ---
            models::lead::Region,
            models::lead::LeadStatus,
            models::lead::LeadPriority,
            models::lead::CreateLeadPayload,
            handlers::leads::LeadSubmitResponse,
            handlers::language::SetLanguagePayload,

            // --- Catálogo ---
            models::catalog::ProductCategoryView,
            models::catalog::CategoryBadge,
            models::catalog::FeatureIconView,
            models::catalog::CardSpecView,
            models::catalog::FeatureView,
            models::catalog::GalleryImageView,
            models::catalog::ProductCardView,
            models::catalog::SpecItem,
            models::catalog::SpecGroup,
            models::catalog::ProductDetailView,
            models::catalog::SliderItemView,

            // --- Conteúdo ---
            models::content::ResponsibilityView,
            models::content::VacancyPointView,
            models::content::VacancyView,
            models::content::NewsBlockView,
            models::content::NewsView,
            models::job::ResumeMeta,
            models::job::CreateJobApplicationPayload,
            models::job::JobApplicationView,
            handlers::jobs::JobApplicationResponse,
        )
    ),
    tags(
        (name = "Leads", description = "Formulário de contato e despacho para CRM e chat"),
        (name = "Idioma", description = "Escolha do idioma do site"),
        (name = "Catálogo", description = "Categorias, produtos e parâmetros técnicos"),
        (name = "Conteúdo", description = "Vagas, candidaturas e notícias"),
        (name = "Sistema", description = "Saúde do servidor")
    ),
    modifiers(&LocaleAddon)
)]
pub struct ApiDoc;

struct LocaleAddon;

// Documenta de onde vem o idioma das respostas traduzidas
impl utoipa::Modify for LocaleAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let langs: Vec<&str> = Lang::ALL.iter().map(|lang| lang.as_str()).collect();
        openapi.info.description = Some(format!(
            "Idiomas: {}. Ordem de escolha: ?language=, sessão, cookie, Accept-Language, uz.",
            langs.join(", ")
        ));
    }
}
