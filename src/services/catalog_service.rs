// src/services/catalog_service.rs

use std::collections::HashMap;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CatalogRepository,
    models::{
        catalog::{
            CardSpecView, CategoryBadge, FeatureIcon, FeatureIconView, FeatureView,
            GalleryImageView, ParameterCategoryField, Product, ProductCardSpec,
            ProductCardSpecField, ProductCardView, ProductCategory, ProductCategoryField,
            ProductCategoryView, ProductDetailView, ProductFeatureField, ProductField,
            ProductParameterField, SliderItemView,
        },
        localized::{Lang, Translatable},
    },
    services::spec_grouper::{self, GroupKey, SpecParameter, UNCATEGORIZED_NAME},
};

pub const SLIDER_LIMIT: i64 = 10;
pub const SLIDER_PRICE_FALLBACK: &str = "Narx so'rang";
pub const SLIDER_VALUE_FALLBACK: &str = "—";

/// Monta URLs de mídia a partir do caminho gravado no banco.
#[derive(Debug, Clone)]
pub struct MediaUrls {
    base: String,
}

impl MediaUrls {
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        if !base.ends_with('/') {
            base.push('/');
        }
        Self { base }
    }

    pub fn url(&self, path: Option<&str>) -> Option<String> {
        let path = path.map(str::trim).filter(|p| !p.is_empty())?;
        if path.starts_with("http://") || path.starts_with("https://") {
            return Some(path.to_string());
        }
        Some(format!("{}{}", self.base, path.trim_start_matches('/')))
    }
}

#[derive(Clone)]
pub struct CatalogService {
    repo: CatalogRepository,
    media: MediaUrls,
}

impl CatalogService {
    pub fn new(repo: CatalogRepository, media: MediaUrls) -> Self {
        Self { repo, media }
    }

    pub async fn list_categories(&self, lang: Lang) -> Result<Vec<ProductCategoryView>, AppError> {
        let categories = self.repo.list_active_categories().await?;
        Ok(categories.iter().map(|c| category_view(c, lang, &self.media)).collect())
    }

    pub async fn list_products(
        &self,
        category_slug: Option<&str>,
        lang: Lang,
    ) -> Result<Vec<ProductCardView>, AppError> {
        let category_slug = category_slug.map(str::trim).filter(|s| !s.is_empty());
        let products = self.repo.list_active_products(category_slug).await?;

        let ids: Vec<Uuid> = products.iter().map(|p| p.id).collect();
        let mut specs_by_product: HashMap<Uuid, Vec<ProductCardSpec>> = HashMap::new();
        for spec in self.repo.card_specs_for(&ids).await? {
            specs_by_product.entry(spec.product_id).or_default().push(spec);
        }

        Ok(products
            .iter()
            .map(|product| {
                let specs = specs_by_product.remove(&product.id).unwrap_or_default();
                card_view(product, &specs, lang, &self.media)
            })
            .collect())
    }

    pub async fn slider(&self, lang: Lang) -> Result<Vec<SliderItemView>, AppError> {
        let products = self.repo.list_featured_products(SLIDER_LIMIT).await?;
        Ok(products.iter().map(|p| slider_view(p, lang, &self.media)).collect())
    }

    pub async fn product_detail(&self, slug: &str, lang: Lang) -> Result<ProductDetailView, AppError> {
        let product = self
            .repo
            .find_active_product_by_slug(slug)
            .await?
            .ok_or(AppError::NotFound)?;

        let card_specs = self.repo.card_specs_for(&[product.id]).await?;
        let features = self.repo.features_for(product.id).await?;
        let gallery = self.repo.gallery_for(product.id).await?;
        let parameters = self.repo.parameters_for(product.id).await?;

        let spec_groups = spec_grouper::group(parameters.iter().map(|parameter| SpecParameter {
            id: parameter.id,
            category: parameter.category.as_ref().map(|category| {
                let name = category.localized(ParameterCategoryField::Name, lang);
                GroupKey {
                    id: category.id,
                    rank: category.order,
                    name: if name.is_empty() { UNCATEGORIZED_NAME.to_string() } else { name.to_string() },
                }
            }),
            order: parameter.order,
            text: parameter.localized(ProductParameterField::Text, lang).to_string(),
        }));

        Ok(ProductDetailView {
            id: product.id,
            title: product.localized(ProductField::Title, lang).to_string(),
            slug: product.slug.clone(),
            category: badge(product.category.as_ref(), lang, true),
            main_image_url: self.media.url(product.main_image.as_deref()),
            card_image_url: self.media.url(product.card_image.as_deref()),
            card_specs: card_specs.iter().map(|s| card_spec_view(s, lang, &self.media)).collect(),
            spec_groups,
            features: features
                .iter()
                .map(|f| FeatureView {
                    id: f.id,
                    icon: icon_view(f.icon.as_ref(), &self.media),
                    name: f.localized(ProductFeatureField::Name, lang).to_string(),
                    order: f.order,
                })
                .collect(),
            gallery: gallery
                .iter()
                .filter_map(|image| {
                    Some(GalleryImageView {
                        id: image.id,
                        image_url: self.media.url(Some(&image.image))?,
                        order: image.order,
                    })
                })
                .collect(),
            is_active: product.is_active,
            is_featured: product.is_featured,
            order: product.order,
        })
    }
}

// =========================================================================
//  MONTAGEM DAS RESPOSTAS
// =========================================================================

fn category_view(category: &ProductCategory, lang: Lang, media: &MediaUrls) -> ProductCategoryView {
    ProductCategoryView {
        id: category.id,
        slug: category.slug.clone(),
        name: category.localized(ProductCategoryField::Name, lang).to_string(),
        description: category.localized(ProductCategoryField::Description, lang).to_string(),
        hero_image_url: media.url(category.hero_image.as_deref()),
        order: category.order,
    }
}

// Categoria inativa não aparece no produto
fn badge(category: Option<&ProductCategory>, lang: Lang, with_description: bool) -> Option<CategoryBadge> {
    let category = category.filter(|c| c.is_active)?;
    Some(CategoryBadge {
        id: category.id,
        slug: category.slug.clone(),
        name: category.localized(ProductCategoryField::Name, lang).to_string(),
        description: with_description
            .then(|| category.localized(ProductCategoryField::Description, lang).to_string()),
    })
}

fn icon_view(icon: Option<&FeatureIcon>, media: &MediaUrls) -> Option<FeatureIconView> {
    icon.map(|icon| FeatureIconView {
        id: icon.id,
        name: icon.name.clone(),
        icon_url: media.url(icon.icon.as_deref()),
    })
}

fn card_spec_view(spec: &ProductCardSpec, lang: Lang, media: &MediaUrls) -> CardSpecView {
    CardSpecView {
        id: spec.id,
        icon: icon_view(spec.icon.as_ref(), media),
        value: spec.localized(ProductCardSpecField::Value, lang).to_string(),
        order: spec.order,
    }
}

fn card_view(product: &Product, specs: &[ProductCardSpec], lang: Lang, media: &MediaUrls) -> ProductCardView {
    ProductCardView {
        id: product.id,
        title: product.localized(ProductField::Title, lang).to_string(),
        slug: product.slug.clone(),
        category: badge(product.category.as_ref(), lang, false),
        image_url: media
            .url(product.card_image.as_deref())
            .or_else(|| media.url(product.main_image.as_deref())),
        card_specs: specs.iter().map(|s| card_spec_view(s, lang, media)).collect(),
        is_featured: product.is_featured,
        order: product.order,
    }
}

fn or_fallback(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() { fallback.to_string() } else { value.to_string() }
}

fn slider_view(product: &Product, lang: Lang, media: &MediaUrls) -> SliderItemView {
    SliderItemView {
        year: product.slider_year.clone().filter(|y| !y.trim().is_empty()),
        title: product.localized(ProductField::Title, lang).to_string(),
        price: or_fallback(product.localized(ProductField::SliderPrice, lang), SLIDER_PRICE_FALLBACK),
        power: or_fallback(product.localized(ProductField::SliderPower, lang), SLIDER_VALUE_FALLBACK),
        mpg: or_fallback(
            product.localized(ProductField::SliderFuelConsumption, lang),
            SLIDER_VALUE_FALLBACK,
        ),
        image: media
            .url(product.slider_image.as_deref())
            .or_else(|| media.url(product.main_image.as_deref())),
        link: format!("/products/{}/", product.slug),
    }
}
