// src/db/catalog_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::catalog::{
        Product, ProductCardSpec, ProductCategory, ProductFeature, ProductGalleryImage,
        ProductParameter,
    },
};

// Produto + categoria (LEFT JOIN) com as colunas da categoria prefixadas por cat_
const PRODUCT_SELECT: &str = r#"
    SELECT
        p.*,
        c.id AS cat_id, c.slug AS cat_slug,
        c.name AS cat_name, c.name_uz AS cat_name_uz, c.name_ru AS cat_name_ru, c.name_en AS cat_name_en,
        c.description AS cat_description, c.description_uz AS cat_description_uz,
        c.description_ru AS cat_description_ru, c.description_en AS cat_description_en,
        c.hero_image AS cat_hero_image, c."order" AS cat_order, c.is_active AS cat_is_active
    FROM products p
    LEFT JOIN product_categories c ON c.id = p.category_id
"#;

// Leitura do catálogo: só SELECTs, a escrita é feita pelo painel administrativo.
#[derive(Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  CATEGORIAS
    // =========================================================================

    pub async fn list_active_categories(&self) -> Result<Vec<ProductCategory>, AppError> {
        let categories = sqlx::query_as::<_, ProductCategory>(
            r#"SELECT * FROM product_categories WHERE is_active ORDER BY "order" ASC, name ASC"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    // =========================================================================
    //  PRODUTOS
    // =========================================================================

    /// Produtos ativos; com `category_slug` só os da categoria (ativa) indicada.
    pub async fn list_active_products(
        &self,
        category_slug: Option<&str>,
    ) -> Result<Vec<Product>, AppError> {
        let sql = format!(
            r#"{PRODUCT_SELECT}
            WHERE p.is_active
              AND ($1::text IS NULL OR (c.slug = $1 AND c.is_active))
            ORDER BY p."order" ASC, p.title ASC"#
        );

        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(category_slug)
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    pub async fn list_featured_products(&self, limit: i64) -> Result<Vec<Product>, AppError> {
        let sql = format!(
            r#"{PRODUCT_SELECT}
            WHERE p.is_active AND p.is_featured
            ORDER BY p.slider_order DESC, p.created_at DESC
            LIMIT $1"#
        );

        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    pub async fn find_active_product_by_slug(&self, slug: &str) -> Result<Option<Product>, AppError> {
        let sql = format!(r#"{PRODUCT_SELECT} WHERE p.slug = $1 AND p.is_active"#);

        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    // =========================================================================
    //  FILHOS DO PRODUTO
    // =========================================================================

    /// Specs do card de vários produtos de uma vez (evita N+1 na listagem).
    pub async fn card_specs_for(&self, product_ids: &[Uuid]) -> Result<Vec<ProductCardSpec>, AppError> {
        let specs = sqlx::query_as::<_, ProductCardSpec>(
            r#"
            SELECT s.*, fi.id AS icon_ref_id, fi.name AS icon_name, fi.icon AS icon_path
            FROM product_card_specs s
            LEFT JOIN feature_icons fi ON fi.id = s.icon_id
            WHERE s.product_id = ANY($1)
            ORDER BY s."order" ASC
            "#,
        )
        .bind(product_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(specs)
    }

    pub async fn features_for(&self, product_id: Uuid) -> Result<Vec<ProductFeature>, AppError> {
        let features = sqlx::query_as::<_, ProductFeature>(
            r#"
            SELECT f.*, fi.id AS icon_ref_id, fi.name AS icon_name, fi.icon AS icon_path
            FROM product_features f
            LEFT JOIN feature_icons fi ON fi.id = f.icon_id
            WHERE f.product_id = $1
            ORDER BY f."order" ASC
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(features)
    }

    pub async fn gallery_for(&self, product_id: Uuid) -> Result<Vec<ProductGalleryImage>, AppError> {
        let images = sqlx::query_as::<_, ProductGalleryImage>(
            r#"
            SELECT id, product_id, image, "order"
            FROM product_gallery
            WHERE product_id = $1
            ORDER BY "order" ASC
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(images)
    }

    /// Parâmetros já na ordem que o agrupador espera: rank da categoria, depois do item.
    /// Sem categoria (NULL) vai para o fim.
    pub async fn parameters_for(&self, product_id: Uuid) -> Result<Vec<ProductParameter>, AppError> {
        let parameters = sqlx::query_as::<_, ProductParameter>(
            r#"
            SELECT
                pp.*,
                pc.id AS pc_id, pc.slug AS pc_slug,
                pc.name AS pc_name, pc.name_uz AS pc_name_uz,
                pc.name_ru AS pc_name_ru, pc.name_en AS pc_name_en,
                pc."order" AS pc_order, pc.is_active AS pc_is_active
            FROM product_parameters pp
            LEFT JOIN parameter_categories pc ON pc.id = pp.category_id
            WHERE pp.product_id = $1
            ORDER BY pc."order" ASC NULLS LAST, pp."order" ASC
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(parameters)
    }
}
