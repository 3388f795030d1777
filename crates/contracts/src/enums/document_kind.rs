use serde::{Deserialize, Serialize};

/// Вид формируемого документа
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Нормы выдачи СИЗ
    Normy,
    /// Личная карточка учёта выдачи СИЗ
    Anketa,
}

impl DocumentKind {
    /// Код вида документа (так же он передаётся в JSON)
    pub fn code(&self) -> &'static str {
        match self {
            DocumentKind::Normy => "normy",
            DocumentKind::Anketa => "anketa",
        }
    }

    /// Человекочитаемое название для истории
    pub fn display_name(&self) -> &'static str {
        match self {
            DocumentKind::Normy => "Нормы выдачи СИЗ",
            DocumentKind::Anketa => "Личные карточки",
        }
    }

    /// Имя файла при формировании по всему списку
    pub fn list_file_name(&self) -> &'static str {
        match self {
            DocumentKind::Normy => "normy-vydachi-siz.txt",
            DocumentKind::Anketa => "ankety-siz.txt",
        }
    }

    pub fn all() -> Vec<DocumentKind> {
        vec![DocumentKind::Normy, DocumentKind::Anketa]
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_match_wire_format() {
        for kind in DocumentKind::all() {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.code()));
            assert_eq!(serde_json::from_str::<DocumentKind>(&json).unwrap(), kind);
        }
        assert!(serde_json::from_str::<DocumentKind>("\"all\"").is_err());
    }
}
