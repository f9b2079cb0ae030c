// src/models/localized.rs

use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgRow, Row};
use utoipa::ToSchema;

// --- IDIOMAS ---

/// Idiomas suportados pelo site. `Uz` é o idioma base (autoria) e o padrão.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Uz,
    Ru,
    En,
}

impl Lang {
    pub const ALL: [Lang; 3] = [Lang::Uz, Lang::Ru, Lang::En];

    pub const fn as_str(self) -> &'static str {
        match self {
            Lang::Uz => "uz",
            Lang::Ru => "ru",
            Lang::En => "en",
        }
    }

    /// Só aceita o código exato ("ru"), sem região nem maiúsculas.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "uz" => Some(Lang::Uz),
            "ru" => Some(Lang::Ru),
            "en" => Some(Lang::En),
            _ => None,
        }
    }
}

// --- VALOR TRADUZÍVEL ---

/// Um campo traduzível: o valor base (idioma de autoria) + um override opcional por idioma.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Localized {
    pub base: String,
    pub uz: Option<String>,
    pub ru: Option<String>,
    pub en: Option<String>,
}

impl Localized {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into(), ..Default::default() }
    }

    pub fn with(mut self, lang: Lang, value: impl Into<String>) -> Self {
        let slot = match lang {
            Lang::Uz => &mut self.uz,
            Lang::Ru => &mut self.ru,
            Lang::En => &mut self.en,
        };
        *slot = Some(value.into());
        self
    }

    fn override_for(&self, lang: Lang) -> Option<&str> {
        match lang {
            Lang::Uz => self.uz.as_deref(),
            Lang::Ru => self.ru.as_deref(),
            Lang::En => self.en.as_deref(),
        }
    }

    /// Override do idioma se existir e não for vazio; senão o valor base
    /// (que pode ser "" quando o campo base também está vazio).
    pub fn get(&self, lang: Lang) -> &str {
        self.override_for(lang)
            .filter(|value| !value.is_empty())
            .unwrap_or(&self.base)
    }

    /// Lê as quatro colunas de um campo. A base pode ser NULL em campos opcionais.
    pub fn from_row(row: &PgRow, columns: &LocalizedColumns) -> Result<Self, sqlx::Error> {
        let base: Option<String> = row.try_get(columns.base)?;
        Ok(Self {
            base: base.unwrap_or_default(),
            uz: row.try_get(columns.uz)?,
            ru: row.try_get(columns.ru)?,
            en: row.try_get(columns.en)?,
        })
    }
}

/// Nomes das colunas de um campo traduzível, fixados em tempo de compilação.
#[derive(Debug, Clone, Copy)]
pub struct LocalizedColumns {
    pub base: &'static str,
    pub uz: &'static str,
    pub ru: &'static str,
    pub en: &'static str,
}

#[macro_export]
macro_rules! localized_columns {
    ($field:literal) => {
        $crate::models::localized::LocalizedColumns {
            base: $field,
            uz: concat!($field, "_uz"),
            ru: concat!($field, "_ru"),
            en: concat!($field, "_en"),
        }
    };
}

// --- ENTIDADES TRADUZÍVEIS ---

/// Entidade com campos traduzíveis. Cada entidade expõe um enum com os seus campos,
/// então um campo inexistente é erro de compilação e não um atributo ausente.
/// Toda leitura traduzida passa por `localized`.
pub trait Translatable {
    type Field: Copy;

    fn translations(&self, field: Self::Field) -> &Localized;

    fn localized(&self, field: Self::Field, lang: Lang) -> &str {
        self.translations(field).get(lang)
    }
}
