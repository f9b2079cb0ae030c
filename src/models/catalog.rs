// src/models/catalog.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{postgres::PgRow, FromRow, Row};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::localized_columns;
use crate::models::localized::{Localized, LocalizedColumns, Translatable};

// =========================================================================
//  CATEGORIAS DE PRODUTO
// =========================================================================

#[derive(Debug, Clone)]
pub struct ProductCategory {
    pub id: Uuid,
    pub slug: String,
    pub name: Localized,
    pub description: Localized,
    pub hero_image: Option<String>,
    pub order: i32,
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy)]
pub enum ProductCategoryField {
    Name,
    Description,
}

impl Translatable for ProductCategory {
    type Field = ProductCategoryField;

    fn translations(&self, field: Self::Field) -> &Localized {
        match field {
            ProductCategoryField::Name => &self.name,
            ProductCategoryField::Description => &self.description,
        }
    }
}

struct ProductCategoryColumns {
    id: &'static str,
    slug: &'static str,
    name: LocalizedColumns,
    description: LocalizedColumns,
    hero_image: &'static str,
    order: &'static str,
    is_active: &'static str,
}

const CATEGORY_COLUMNS: ProductCategoryColumns = ProductCategoryColumns {
    id: "id",
    slug: "slug",
    name: localized_columns!("name"),
    description: localized_columns!("description"),
    hero_image: "hero_image",
    order: "order",
    is_active: "is_active",
};

// Colunas da categoria quando vem num JOIN com `products` (prefixo cat_).
const JOINED_CATEGORY_COLUMNS: ProductCategoryColumns = ProductCategoryColumns {
    id: "cat_id",
    slug: "cat_slug",
    name: localized_columns!("cat_name"),
    description: localized_columns!("cat_description"),
    hero_image: "cat_hero_image",
    order: "cat_order",
    is_active: "cat_is_active",
};

impl ProductCategory {
    fn read(row: &PgRow, columns: &ProductCategoryColumns) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get(columns.id)?,
            slug: row.try_get(columns.slug)?,
            name: Localized::from_row(row, &columns.name)?,
            description: Localized::from_row(row, &columns.description)?,
            hero_image: row.try_get(columns.hero_image)?,
            order: row.try_get(columns.order)?,
            is_active: row.try_get(columns.is_active)?,
        })
    }

    /// Categoria de um JOIN (LEFT JOIN: pode não existir).
    fn read_joined(row: &PgRow) -> Result<Option<Self>, sqlx::Error> {
        let id: Option<Uuid> = row.try_get(JOINED_CATEGORY_COLUMNS.id)?;
        match id {
            Some(_) => Ok(Some(Self::read(row, &JOINED_CATEGORY_COLUMNS)?)),
            None => Ok(None),
        }
    }
}

impl<'r> FromRow<'r, PgRow> for ProductCategory {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Self::read(row, &CATEGORY_COLUMNS)
    }
}

// =========================================================================
//  PRODUTOS
// =========================================================================

#[derive(Debug, Clone)]
pub struct Product {
    pub id: Uuid,
    pub slug: String,
    pub title: Localized,
    pub slider_price: Localized,
    pub slider_power: Localized,
    pub slider_fuel_consumption: Localized,
    pub slider_year: Option<String>,
    pub slider_image: Option<String>,
    pub main_image: Option<String>,
    pub card_image: Option<String>,
    pub is_active: bool,
    pub is_featured: bool,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub category: Option<ProductCategory>,
}

#[derive(Debug, Clone, Copy)]
pub enum ProductField {
    Title,
    SliderPrice,
    SliderPower,
    SliderFuelConsumption,
}

impl Translatable for Product {
    type Field = ProductField;

    fn translations(&self, field: Self::Field) -> &Localized {
        match field {
            ProductField::Title => &self.title,
            ProductField::SliderPrice => &self.slider_price,
            ProductField::SliderPower => &self.slider_power,
            ProductField::SliderFuelConsumption => &self.slider_fuel_consumption,
        }
    }
}

impl<'r> FromRow<'r, PgRow> for Product {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            slug: row.try_get("slug")?,
            title: Localized::from_row(row, &localized_columns!("title"))?,
            slider_price: Localized::from_row(row, &localized_columns!("slider_price"))?,
            slider_power: Localized::from_row(row, &localized_columns!("slider_power"))?,
            slider_fuel_consumption: Localized::from_row(
                row,
                &localized_columns!("slider_fuel_consumption"),
            )?,
            slider_year: row.try_get("slider_year")?,
            slider_image: row.try_get("slider_image")?,
            main_image: row.try_get("main_image")?,
            card_image: row.try_get("card_image")?,
            is_active: row.try_get("is_active")?,
            is_featured: row.try_get("is_featured")?,
            order: row.try_get("order")?,
            created_at: row.try_get("created_at")?,
            category: ProductCategory::read_joined(row)?,
        })
    }
}

// --- Ícones, características, specs do card e galeria ---

#[derive(Debug, Clone)]
pub struct FeatureIcon {
    pub id: Uuid,
    pub name: String,
    pub icon: Option<String>,
}

impl FeatureIcon {
    // LEFT JOIN com feature_icons: colunas icon_ref_id, icon_name, icon_path
    fn read_joined(row: &PgRow) -> Result<Option<Self>, sqlx::Error> {
        let id: Option<Uuid> = row.try_get("icon_ref_id")?;
        let Some(id) = id else {
            return Ok(None);
        };
        Ok(Some(Self {
            id,
            name: row.try_get("icon_name")?,
            icon: row.try_get("icon_path")?,
        }))
    }
}

#[derive(Debug, Clone)]
pub struct ProductFeature {
    pub id: Uuid,
    pub product_id: Uuid,
    pub icon: Option<FeatureIcon>,
    pub name: Localized,
    pub order: i32,
}

#[derive(Debug, Clone, Copy)]
pub enum ProductFeatureField {
    Name,
}

impl Translatable for ProductFeature {
    type Field = ProductFeatureField;

    fn translations(&self, field: Self::Field) -> &Localized {
        match field {
            ProductFeatureField::Name => &self.name,
        }
    }
}

impl<'r> FromRow<'r, PgRow> for ProductFeature {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            product_id: row.try_get("product_id")?,
            icon: FeatureIcon::read_joined(row)?,
            name: Localized::from_row(row, &localized_columns!("name"))?,
            order: row.try_get("order")?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ProductCardSpec {
    pub id: Uuid,
    pub product_id: Uuid,
    pub icon: Option<FeatureIcon>,
    pub value: Localized,
    pub order: i32,
}

#[derive(Debug, Clone, Copy)]
pub enum ProductCardSpecField {
    Value,
}

impl Translatable for ProductCardSpec {
    type Field = ProductCardSpecField;

    fn translations(&self, field: Self::Field) -> &Localized {
        match field {
            ProductCardSpecField::Value => &self.value,
        }
    }
}

impl<'r> FromRow<'r, PgRow> for ProductCardSpec {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            product_id: row.try_get("product_id")?,
            icon: FeatureIcon::read_joined(row)?,
            value: Localized::from_row(row, &localized_columns!("value"))?,
            order: row.try_get("order")?,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct ProductGalleryImage {
    pub id: Uuid,
    pub product_id: Uuid,
    pub image: String,
    pub order: i32,
}

// =========================================================================
//  PARÂMETROS TÉCNICOS
// =========================================================================

#[derive(Debug, Clone)]
pub struct ParameterCategory {
    pub id: Uuid,
    pub slug: String,
    pub name: Localized,
    pub order: i32,
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy)]
pub enum ParameterCategoryField {
    Name,
}

impl Translatable for ParameterCategory {
    type Field = ParameterCategoryField;

    fn translations(&self, field: Self::Field) -> &Localized {
        match field {
            ParameterCategoryField::Name => &self.name,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProductParameter {
    pub id: Uuid,
    pub product_id: Uuid,
    pub text: Localized,
    pub order: i32,
    pub category: Option<ParameterCategory>,
}

#[derive(Debug, Clone, Copy)]
pub enum ProductParameterField {
    Text,
}

impl Translatable for ProductParameter {
    type Field = ProductParameterField;

    fn translations(&self, field: Self::Field) -> &Localized {
        match field {
            ProductParameterField::Text => &self.text,
        }
    }
}

impl<'r> FromRow<'r, PgRow> for ProductParameter {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let category_id: Option<Uuid> = row.try_get("pc_id")?;
        let category = match category_id {
            Some(id) => Some(ParameterCategory {
                id,
                slug: row.try_get("pc_slug")?,
                name: Localized::from_row(row, &localized_columns!("pc_name"))?,
                order: row.try_get("pc_order")?,
                is_active: row.try_get("pc_is_active")?,
            }),
            None => None,
        };

        Ok(Self {
            id: row.try_get("id")?,
            product_id: row.try_get("product_id")?,
            text: Localized::from_row(row, &localized_columns!("text"))?,
            order: row.try_get("order")?,
            category,
        })
    }
}

// =========================================================================
//  RESPOSTAS (já traduzidas para o idioma do pedido)
// =========================================================================

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductCategoryView {
    pub id: Uuid,
    pub slug: String,
    #[schema(example = "Самосвалы")]
    pub name: String,
    pub description: String,
    pub hero_image_url: Option<String>,
    pub order: i32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryBadge {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FeatureIconView {
    pub id: Uuid,
    pub name: String,
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CardSpecView {
    pub id: Uuid,
    pub icon: Option<FeatureIconView>,
    pub value: String,
    pub order: i32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FeatureView {
    pub id: Uuid,
    pub icon: Option<FeatureIconView>,
    pub name: String,
    pub order: i32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GalleryImageView {
    pub id: Uuid,
    pub image_url: String,
    pub order: i32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductCardView {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub category: Option<CategoryBadge>,
    pub image_url: Option<String>,
    pub card_specs: Vec<CardSpecView>,
    pub is_featured: bool,
    pub order: i32,
}

/// Um item do grupo de especificações.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SpecItem {
    pub id: Uuid,
    pub text: String,
    pub order: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SpecGroup {
    #[schema(example = "Двигатель")]
    pub category_name: String,
    pub parameters: Vec<SpecItem>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductDetailView {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub category: Option<CategoryBadge>,
    pub main_image_url: Option<String>,
    pub card_image_url: Option<String>,
    pub card_specs: Vec<CardSpecView>,
    pub spec_groups: Vec<SpecGroup>,
    pub features: Vec<FeatureView>,
    pub gallery: Vec<GalleryImageView>,
    pub is_active: bool,
    pub is_featured: bool,
    pub order: i32,
}

/// Slide da página inicial (produtos em destaque).
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SliderItemView {
    pub year: Option<String>,
    pub title: String,
    pub price: String,
    pub power: String,
    pub mpg: String,
    pub image: Option<String>,
    pub link: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::localized::Lang;

    // Cada campo recebe um override próprio: braço trocado no match aparece na hora
    fn text(tag: &str) -> Localized {
        Localized::new(format!("{tag}-uz")).with(Lang::Ru, format!("{tag}-ru"))
    }

    fn assert_fields<E: Translatable>(entity: &E, table: &[(E::Field, &str)]) {
        for (field, tag) in table {
            assert_eq!(entity.localized(*field, Lang::Ru), format!("{tag}-ru"));
            assert_eq!(entity.localized(*field, Lang::En), format!("{tag}-uz"));
        }
    }

    fn category() -> ProductCategory {
        ProductCategory {
            id: Uuid::new_v4(),
            slug: "tractors".to_string(),
            name: text("name"),
            description: text("description"),
            hero_image: None,
            order: 0,
            is_active: true,
        }
    }

    #[test]
    fn product_category_fields() {
        assert_fields(
            &category(),
            &[
                (ProductCategoryField::Name, "name"),
                (ProductCategoryField::Description, "description"),
            ],
        );
    }

    #[test]
    fn product_fields() {
        let product = Product {
            id: Uuid::new_v4(),
            slug: "faw-j6".to_string(),
            title: text("title"),
            slider_price: text("price"),
            slider_power: text("power"),
            slider_fuel_consumption: text("fuel"),
            slider_year: None,
            slider_image: None,
            main_image: None,
            card_image: None,
            is_active: true,
            is_featured: false,
            order: 0,
            created_at: Utc::now(),
            category: Some(category()),
        };
        assert_fields(
            &product,
            &[
                (ProductField::Title, "title"),
                (ProductField::SliderPrice, "price"),
                (ProductField::SliderPower, "power"),
                (ProductField::SliderFuelConsumption, "fuel"),
            ],
        );
    }

    #[test]
    fn feature_and_card_spec_fields() {
        let feature = ProductFeature {
            id: Uuid::new_v4(),
            product_id: Uuid::new_v4(),
            icon: None,
            name: text("feature"),
            order: 0,
        };
        assert_fields(&feature, &[(ProductFeatureField::Name, "feature")]);

        let spec = ProductCardSpec {
            id: Uuid::new_v4(),
            product_id: Uuid::new_v4(),
            icon: None,
            value: text("spec"),
            order: 0,
        };
        assert_fields(&spec, &[(ProductCardSpecField::Value, "spec")]);
    }

    #[test]
    fn parameter_and_parameter_category_fields() {
        let category = ParameterCategory {
            id: Uuid::new_v4(),
            slug: "engine".to_string(),
            name: text("group"),
            order: 2,
            is_active: true,
        };
        assert_fields(&category, &[(ParameterCategoryField::Name, "group")]);

        let parameter = ProductParameter {
            id: Uuid::new_v4(),
            product_id: Uuid::new_v4(),
            text: text("param"),
            order: 0,
            category: Some(category),
        };
        assert_fields(&parameter, &[(ProductParameterField::Text, "param")]);
    }
}
