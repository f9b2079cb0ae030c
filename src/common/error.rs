// src/common/error.rs

use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::common::i18n::I18nStore;
use crate::middleware::i18n::Locale;

// Erros internos da aplicação (camadas de serviço e repositório).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Recurso não encontrado")]
    NotFound,

    // Falha de armazenamento: nunca chega ao cliente com detalhes
    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    /// Erro de validação de um único campo, com um código que o catálogo sabe traduzir.
    pub fn field(field: &'static str, code: &'static str) -> Self {
        let mut errors = validator::ValidationErrors::new();
        errors.add(field, validator::ValidationError::new(code));
        AppError::ValidationError(errors)
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, AppError::DatabaseError(_) | AppError::InternalServerError(_))
    }

    /// Converte para o erro HTTP, já com as mensagens no idioma do pedido.
    pub fn to_api_error(self, locale: &Locale, store: &I18nStore) -> ApiError {
        match self {
            AppError::ValidationError(errors) => {
                let mut details: HashMap<String, Vec<String>> = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages = field_errors
                        .iter()
                        .map(|e| match &e.message {
                            Some(message) => message.to_string(),
                            None => store.translate(locale.0, &format!("validation.{}", e.code)),
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                ApiError {
                    status: StatusCode::BAD_REQUEST,
                    message: store.translate(locale.0, "error.validation"),
                    details: Some(json!(details)),
                }
            }
            AppError::NotFound => ApiError {
                status: StatusCode::NOT_FOUND,
                message: store.translate(locale.0, "error.not_found"),
                details: None,
            },
            ref e => {
                // O detalhe fica só no log; o cliente recebe a mensagem genérica.
                tracing::error!(error = %e, "Erro Interno do Servidor");
                ApiError {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: store.translate(locale.0, "error.internal"),
                    details: None,
                }
            }
        }
    }
}

// O erro que sai pela API.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.message, "details": details }),
            None => json!({ "error": self.message }),
        };
        (self.status, Json(body)).into_response()
    }
}
