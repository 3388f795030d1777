use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

/// Ошибки поля формы: имя поля -> сообщение для пользователя
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Добавить ошибку; первая ошибка поля не перезаписывается
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `Ok(())`, если ошибок нет, иначе `DomainError::Validation`
    pub fn into_result(self) -> DomainResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(self))
        }
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self.0.values().cloned().collect::<Vec<_>>().join("; ");
        f.write_str(&joined)
    }
}

/// Ошибки доменной логики
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Не заполнено обязательное поле или поле заполнено неверно
    #[error("{0}")]
    Validation(FieldErrors),

    /// Ссылка на позицию, которой уже нет в списке
    #[error("Позиция {index} вне списка (всего позиций: {len})")]
    Index { index: usize, len: usize },

    /// Действие над пустым списком
    #[error("{0}")]
    EmptyList(String),
}

impl DomainError {
    /// Ошибка валидации одного поля
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.add(field, message);
        DomainError::Validation(errors)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::Validation(_) => "validation",
            DomainError::Index { .. } => "index",
            DomainError::EmptyList(_) => "empty_list",
        }
    }
}
