use serde::{Deserialize, Serialize};

use crate::domain::common::{DomainResult, FieldErrors};
use crate::shared::notification::Notice;

/// Минимальная длина пароля (в символах)
pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub password2: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserInfo,
    pub notice: Notice,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user: UserInfo,
    pub notice: Notice,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: String,
}

/// Пользователь сессии
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    /// Стабильный идентификатор для привязки истории (email в нижнем регистре)
    pub id: String,
    pub name: String,
    pub email: String,
}

impl UserInfo {
    /// Пользователь по email; если имя не задано, берётся часть email до '@'
    pub fn from_email(email: &str, name: Option<&str>) -> Self {
        let email = email.trim();
        let name = match name.map(str::trim) {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => email.split('@').next().unwrap_or_default().to_string(),
        };
        Self {
            id: email.to_lowercase(),
            name,
            email: email.to_string(),
        }
    }
}

/// Проверка email в духе `\S+@\S+\.\S+`
pub fn is_valid_email(email: &str) -> bool {
    let chars: Vec<char> = email.chars().collect();
    chars.iter().enumerate().any(|(at, &c)| {
        if c != '@' || at == 0 || chars[at - 1].is_whitespace() {
            return false;
        }
        let domain: Vec<char> = chars[at + 1..]
            .iter()
            .copied()
            .take_while(|c| !c.is_whitespace())
            .collect();
        domain
            .iter()
            .enumerate()
            .any(|(dot, &d)| d == '.' && dot > 0 && dot + 1 < domain.len())
    })
}

fn check_credentials(errors: &mut FieldErrors, email: &str, password: &str) {
    if email.is_empty() {
        errors.add("email", "Введите email");
    } else if !is_valid_email(email) {
        errors.add("email", "Некорректный email");
    }

    if password.is_empty() {
        errors.add("password", "Введите пароль");
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.add("password", "Минимум 8 символов");
    }
}

pub fn validate_login(request: &LoginRequest) -> DomainResult<()> {
    let mut errors = FieldErrors::new();
    check_credentials(&mut errors, &request.email, &request.password);
    errors.into_result()
}

pub fn validate_register(request: &RegisterRequest) -> DomainResult<()> {
    let mut errors = FieldErrors::new();
    check_credentials(&mut errors, &request.email, &request.password);
    if request.name.is_empty() {
        errors.add("name", "Введите имя");
    }
    if request.password != request.password2 {
        errors.add("password2", "Пароли не совпадают");
    }
    errors.into_result()
}

pub fn validate_profile(request: &UpdateProfileRequest) -> DomainResult<()> {
    let mut errors = FieldErrors::new();
    if request.name.trim().is_empty() {
        errors.add("name", "Введите имя");
    }
    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::DomainError;

    fn fields(result: DomainResult<()>) -> FieldErrors {
        match result {
            Err(DomainError::Validation(fields)) => fields,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("ivan@company.ru"));
        assert!(is_valid_email("a@b.c"));
        assert!(!is_valid_email("ivan@company"));
        assert!(!is_valid_email("@company.ru"));
        assert!(!is_valid_email("ivan@.ru"));
        assert!(!is_valid_email("ivan@company."));
        assert!(!is_valid_email("ivan company.ru"));
    }

    #[test]
    fn test_login_field_messages() {
        let errors = fields(validate_login(&LoginRequest {
            email: String::new(),
            password: String::new(),
        }));
        assert_eq!(errors.get("email"), Some("Введите email"));
        assert_eq!(errors.get("password"), Some("Введите пароль"));

        let errors = fields(validate_login(&LoginRequest {
            email: "ivan".into(),
            password: "короткий".chars().take(7).collect(),
        }));
        assert_eq!(errors.get("email"), Some("Некорректный email"));
        assert_eq!(errors.get("password"), Some("Минимум 8 символов"));
    }

    #[test]
    fn test_password_length_counts_characters() {
        assert!(validate_login(&LoginRequest {
            email: "ivan@company.ru".into(),
            password: "пароль12".into(),
        })
        .is_ok());
    }

    #[test]
    fn test_register_requires_name_and_matching_passwords() {
        let errors = fields(validate_register(&RegisterRequest {
            name: String::new(),
            email: "ivan@company.ru".into(),
            password: "password1".into(),
            password2: "password2".into(),
        }));
        assert_eq!(errors.get("name"), Some("Введите имя"));
        assert_eq!(errors.get("password2"), Some("Пароли не совпадают"));
        assert_eq!(errors.get("email"), None);
    }

    #[test]
    fn test_user_name_falls_back_to_email_prefix() {
        let user = UserInfo::from_email("Ivan.Petrov@Company.ru", None);
        assert_eq!(user.name, "Ivan.Petrov");
        assert_eq!(user.id, "ivan.petrov@company.ru");

        let user = UserInfo::from_email("ivan@company.ru", Some("Иван Иванов"));
        assert_eq!(user.name, "Иван Иванов");
    }
}
