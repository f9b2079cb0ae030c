// src/common/i18n.rs

use std::collections::HashMap;

use crate::models::localized::Lang;

/// Catálogo de mensagens para o usuário final (respostas da API).
/// Chave ausente no idioma pedido cai para o uzbeque e depois para a própria chave.
#[derive(Debug, Clone)]
pub struct I18nStore {
    messages: HashMap<(Lang, &'static str), &'static str>,
}

const CATALOG: &[(&str, [&str; 3])] = &[
    // chave, [uz, ru, en]
    ("lead.created", ["Xabar yuborildi!", "Сообщение отправлено!", "Message sent!"]),
    (
        "job.created",
        [
            "Rezyume muvaffaqiyatli yuborildi! Tez orada siz bilan bog'lanamiz.",
            "Резюме успешно отправлено! Скоро мы с вами свяжемся.",
            "Your résumé has been sent! We will contact you soon.",
        ],
    ),
    ("error.internal", ["Xatolik yuz berdi.", "Произошла ошибка.", "Something went wrong."]),
    (
        "error.validation",
        [
            "Bir yoki bir nechta maydon noto'g'ri to'ldirilgan.",
            "Одно или несколько полей заполнены неверно.",
            "One or more fields are invalid.",
        ],
    ),
    ("error.not_found", ["Topilmadi.", "Не найдено.", "Not found."]),
    ("validation.required", ["Majburiy maydon.", "Обязательное поле.", "This field is required."]),
    (
        "validation.too_long",
        ["Qiymat juda uzun.", "Слишком длинное значение.", "Value is too long."],
    ),
    (
        "validation.length",
        [
            "Qiymat uzunligi noto'g'ri.",
            "Недопустимая длина значения.",
            "Value has an invalid length.",
        ],
    ),
    (
        "validation.invalid_visitor_uid",
        ["Noto'g'ri visitor_uid.", "Невалидный visitor_uid.", "Invalid visitor_uid."],
    ),
    (
        "validation.invalid_choice",
        ["Noto'g'ri tanlov.", "Недопустимое значение.", "Not a valid choice."],
    ),
    (
        "validation.invalid_utm",
        [
            "utm_data obyekt yoki satr bo'lishi kerak.",
            "utm_data должен быть объектом или строкой.",
            "utm_data must be an object or a string.",
        ],
    ),
    (
        "validation.invalid_type",
        ["Qiymat turi noto'g'ri.", "Неверный тип значения.", "Value has the wrong type."],
    ),
    (
        "validation.invalid_json",
        [
            "So'rov tanasi JSON obyekt bo'lishi kerak.",
            "Тело запроса должно быть JSON-объектом.",
            "Request body must be a JSON object.",
        ],
    ),
    (
        "validation.unknown_product",
        ["Mahsulot topilmadi.", "Продукт не найден.", "Product does not exist."],
    ),
    (
        "validation.unknown_vacancy",
        ["Vakansiya topilmadi.", "Вакансия не найдена.", "Vacancy does not exist."],
    ),
    (
        "validation.resume_too_large",
        [
            "Fayl hajmi juda katta. Maksimal 10 MB",
            "Файл слишком большой. Максимум 10 МБ",
            "File is too large. Maximum is 10 MB",
        ],
    ),
    (
        "validation.resume_bad_extension",
        [
            "Noto'g'ri fayl formati. PDF, DOC, DOCX, JPG yoki PNG foydalaning",
            "Неверный формат файла. Используйте PDF, DOC, DOCX, JPG или PNG",
            "Wrong file format. Use PDF, DOC, DOCX, JPG or PNG",
        ],
    ),
];

impl I18nStore {
    pub fn new() -> Self {
        let mut messages = HashMap::new();
        for (key, translations) in CATALOG {
            for (lang, text) in Lang::ALL.into_iter().zip(translations.iter()) {
                messages.insert((lang, *key), *text);
            }
        }
        Self { messages }
    }

    pub fn translate(&self, lang: Lang, key: &str) -> String {
        self.messages
            .get(&(lang, key))
            .or_else(|| self.messages.get(&(Lang::default(), key)))
            .map(|text| text.to_string())
            .unwrap_or_else(|| key.to_string())
    }
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}
