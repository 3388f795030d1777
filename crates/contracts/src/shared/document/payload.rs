use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::renderer::render;
use crate::domain::a003_workspace::Entry;
use crate::enums::document_kind::DocumentKind;
use crate::shared::text::truncate_chars;

pub const TEXT_MIME_TYPE: &str = "text/plain;charset=utf-8";

/// Символы, недопустимые в именах файлов
const FORBIDDEN_FILE_NAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Длина названия профессии в имени файла личной карточки
const SINGLE_CARD_NAME_LEN: usize = 20;

/// Готовый к выдаче файл: содержимое, имя и MIME-тип
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentPayload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl DocumentPayload {
    fn text(file_name: String, content: String) -> Self {
        Self {
            file_name,
            mime_type: TEXT_MIME_TYPE.to_string(),
            bytes: content.into_bytes(),
        }
    }
}

/// Документ по всему списку профессий
pub fn build_list_payload(
    entries: &[Entry],
    kind: DocumentKind,
    generated_on: NaiveDate,
) -> DocumentPayload {
    DocumentPayload::text(
        kind.list_file_name().to_string(),
        render(entries, kind, generated_on),
    )
}

/// Личная карточка по одной профессии
pub fn build_single_card_payload(entry: &Entry, generated_on: NaiveDate) -> DocumentPayload {
    DocumentPayload::text(
        single_card_file_name(&entry.profession_name),
        render(std::slice::from_ref(entry), DocumentKind::Anketa, generated_on),
    )
}

/// `anketa-<название>.txt`, название без запрещённых символов и не длиннее
/// 20 символов. Разные профессии с общим началом дают одинаковое имя.
pub fn single_card_file_name(profession_name: &str) -> String {
    let cleaned: String = profession_name
        .chars()
        .filter(|c| !FORBIDDEN_FILE_NAME_CHARS.contains(c))
        .collect();
    format!("anketa-{}.txt", truncate_chars(&cleaned, SINGLE_CARD_NAME_LEN))
}
