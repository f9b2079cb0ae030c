// src/services/utm.rs

use reqwest::Url;
use serde_json::{Map, Value};

/// As únicas chaves de campanha que extraímos do referer.
pub const UTM_KEYS: [&str; 5] = [
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
];

/// Atribuição de campanha de um lead.
#[derive(Debug, Clone, PartialEq)]
pub enum Attribution {
    /// Mapa (enviado pelo cliente ou extraído do referer).
    Mapping(Map<String, Value>),
    /// String enviada pelo cliente, assumida como já serializada. Não é interpretada.
    Serialized(String),
}

impl Attribution {
    /// Forma gravada na coluna `utm_data`.
    pub fn to_stored(&self) -> String {
        match self {
            Attribution::Mapping(map) => Value::Object(map.clone()).to_string(),
            Attribution::Serialized(raw) => raw.clone(),
        }
    }
}

/// Valor explícito vindo do corpo do pedido.
#[derive(Debug, Clone, PartialEq)]
pub enum ExplicitUtm {
    Mapping(Map<String, Value>),
    Serialized(String),
}

impl ExplicitUtm {
    /// `None` = não enviado ou null. `Err` = tipo que não é nem objeto nem string.
    pub fn from_json(value: Option<Value>) -> Result<Option<Self>, ()> {
        match value {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Object(map)) => Ok(Some(ExplicitUtm::Mapping(map))),
            Some(Value::String(raw)) => Ok(Some(ExplicitUtm::Serialized(raw))),
            Some(_) => Err(()),
        }
    }

    // Objeto vazio ou string vazia contam como "não enviado".
    fn is_blank(&self) -> bool {
        match self {
            ExplicitUtm::Mapping(map) => map.is_empty(),
            ExplicitUtm::Serialized(raw) => raw.is_empty(),
        }
    }
}

/// O explícito vence sempre; senão, as chaves UTM da query do referer.
/// Sem nenhuma chave reconhecida o resultado é `None` (e não um mapa vazio).
pub fn extract(explicit: Option<ExplicitUtm>, referer: Option<&str>) -> Option<Attribution> {
    if let Some(explicit) = explicit.filter(|e| !e.is_blank()) {
        return Some(match explicit {
            ExplicitUtm::Mapping(map) => Attribution::Mapping(map),
            ExplicitUtm::Serialized(raw) => Attribution::Serialized(raw),
        });
    }

    let url = parse_referer(referer?)?;
    let mut found = Map::new();
    for (key, value) in url.query_pairs() {
        // Valores vazios são ignorados; a primeira ocorrência ganha.
        if value.is_empty() || !UTM_KEYS.contains(&key.as_ref()) || found.contains_key(key.as_ref()) {
            continue;
        }
        found.insert(key.into_owned(), Value::String(value.into_owned()));
    }

    if found.is_empty() {
        None
    } else {
        Some(Attribution::Mapping(found))
    }
}

// Aceita URL absoluta ou relativa ("/page?utm_source=x").
fn parse_referer(referer: &str) -> Option<Url> {
    let referer = referer.trim();
    if referer.is_empty() {
        return None;
    }
    Url::parse(referer).ok().or_else(|| {
        Url::parse("http://localhost/")
            .ok()
            .and_then(|base| base.join(referer).ok())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mapping(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn explicit_mapping_wins_over_referer() {
        let explicit = ExplicitUtm::Mapping(mapping(json!({"utm_source": "google"})));
        let result = extract(Some(explicit), Some("https://x/?utm_source=fb&utm_medium=cpc"));
        assert_eq!(result, Some(Attribution::Mapping(mapping(json!({"utm_source": "google"})))));
    }

    #[test]
    fn explicit_string_passes_through_unparsed() {
        let explicit = ExplicitUtm::Serialized("not json at all".to_string());
        let result = extract(Some(explicit), Some("https://x/?utm_source=fb"));
        assert_eq!(result, Some(Attribution::Serialized("not json at all".to_string())));
        assert_eq!(result.unwrap().to_stored(), "not json at all");
    }

    #[test]
    fn referer_keys_are_extracted() {
        let result = extract(None, Some("https://x/?utm_source=fb&utm_medium=cpc"));
        assert_eq!(
            result,
            Some(Attribution::Mapping(mapping(json!({"utm_source": "fb", "utm_medium": "cpc"}))))
        );
    }

    #[test]
    fn only_recognised_keys_and_first_occurrence() {
        let result = extract(
            None,
            Some("https://x/p?gclid=1&utm_campaign=spring&utm_campaign=autumn&utm_term=&ref=home"),
        );
        assert_eq!(result, Some(Attribution::Mapping(mapping(json!({"utm_campaign": "spring"})))));
    }

    #[test]
    fn no_utm_keys_is_none_not_empty_map() {
        assert_eq!(extract(None, Some("https://x/?page=2")), None);
        assert_eq!(extract(None, Some("https://x/")), None);
        assert_eq!(extract(None, None), None);
        assert_eq!(extract(None, Some("")), None);
    }

    #[test]
    fn blank_explicit_values_fall_back_to_referer() {
        let referer = Some("https://x/?utm_source=fb");
        let expected = Some(Attribution::Mapping(mapping(json!({"utm_source": "fb"}))));
        assert_eq!(extract(Some(ExplicitUtm::Mapping(Map::new())), referer), expected);
        assert_eq!(extract(Some(ExplicitUtm::Serialized(String::new())), referer), expected);
    }

    #[test]
    fn relative_referer_and_encoded_values() {
        let result = extract(None, Some("/products?utm_source=tele%20gram&utm_content=a+b"));
        assert_eq!(
            result,
            Some(Attribution::Mapping(mapping(
                json!({"utm_source": "tele gram", "utm_content": "a b"})
            )))
        );
    }

    #[test]
    fn explicit_from_json_rejects_other_types() {
        assert_eq!(ExplicitUtm::from_json(None), Ok(None));
        assert_eq!(ExplicitUtm::from_json(Some(Value::Null)), Ok(None));
        assert!(ExplicitUtm::from_json(Some(json!(42))).is_err());
        assert!(ExplicitUtm::from_json(Some(json!(["utm_source"]))).is_err());
    }

    #[test]
    fn stored_mapping_is_json() {
        let stored = Attribution::Mapping(mapping(json!({"utm_source": "fb"}))).to_stored();
        let parsed: Value = serde_json::from_str(&stored).unwrap();
        assert_eq!(parsed, json!({"utm_source": "fb"}));
    }
}
