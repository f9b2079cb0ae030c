// src/common/json_body.rs

use axum::{extract::rejection::JsonRejection, Json};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use validator::{ValidationError, ValidationErrors};

use crate::common::error::AppError;

/// Converte o corpo JSON no payload, com erro de tipo apontando o campo culpado.
///
/// O `Json<T>` do axum responde 422 em texto puro; aqui o erro vira o 400
/// `{error, details}` de sempre. `fields` são os campos que o payload aceita,
/// e todos precisam ter valor padrão para que cada um possa ser testado sozinho.
pub fn payload_from_json<T: DeserializeOwned>(
    body: Result<Json<Value>, JsonRejection>,
    fields: &[&'static str],
) -> Result<T, AppError> {
    let object = match body {
        Ok(Json(Value::Object(object))) => object,
        Ok(Json(_)) => return Err(AppError::field("body", "invalid_json")),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Corpo JSON rejeitado");
            return Err(AppError::field("body", "invalid_json"));
        }
    };

    match serde_json::from_value::<T>(Value::Object(object.clone())) {
        Ok(payload) => Ok(payload),
        Err(_) => Err(AppError::ValidationError(type_errors::<T>(&object, fields))),
    }
}

// Reprocessa campo a campo para saber quais não desserializam
fn type_errors<T: DeserializeOwned>(
    object: &Map<String, Value>,
    fields: &[&'static str],
) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    for field in fields {
        let Some(value) = object.get(*field) else { continue };
        let mut single = Map::new();
        single.insert(field.to_string(), value.clone());
        if serde_json::from_value::<T>(Value::Object(single)).is_err() {
            errors.add(*field, ValidationError::new("invalid_type"));
        }
    }

    if errors.is_empty() {
        errors.add("body", ValidationError::new("invalid_json"));
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default)]
        name: String,
        count: Option<u32>,
        id: Option<uuid::Uuid>,
    }

    const FIELDS: [&str; 3] = ["name", "count", "id"];

    fn parse(value: Value) -> Result<Sample, AppError> {
        payload_from_json(Ok(Json(value)), &FIELDS)
    }

    fn failing_fields(result: Result<Sample, AppError>) -> Vec<String> {
        let Err(AppError::ValidationError(errors)) = result else {
            panic!("esperava erro de validação");
        };
        let mut fields: Vec<String> = errors.field_errors().keys().map(|k| k.to_string()).collect();
        fields.sort();
        fields
    }

    #[test]
    fn well_typed_body_passes_through() {
        let sample = parse(json!({"name": "Ali", "count": 3})).unwrap();
        assert_eq!(sample.name, "Ali");
        assert_eq!(sample.count, Some(3));
        assert!(sample.id.is_none());
    }

    #[test]
    fn each_mistyped_field_is_named() {
        let result = parse(json!({"name": 5, "count": 2, "id": "not-a-uuid"}));
        assert_eq!(failing_fields(result), vec!["id", "name"]);
    }

    #[test]
    fn non_object_body_is_invalid_json() {
        assert_eq!(failing_fields(parse(json!([1, 2]))), vec!["body"]);
    }
}
