use serde::{Deserialize, Serialize};

use crate::enums::document_kind::DocumentKind;

/// Запрос на формирование документа по всему списку
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub doc_type: DocumentKind,
}
