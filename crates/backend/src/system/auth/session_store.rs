use chrono::{DateTime, Duration, Utc};
use contracts::system::auth::UserInfo;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

struct Session {
    user_id: String,
    last_seen: DateTime<Utc>,
}

/// Сессии и профили пользователей в памяти.
///
/// Токен сессии хранится только в виде SHA-256 хэша. Сессия, которой
/// не пользовались дольше `idle_ttl`, считается закрытой.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    profiles: Arc<RwLock<HashMap<String, UserInfo>>>,
    idle_ttl: Duration,
}

impl SessionStore {
    pub fn new(idle_ttl_hours: i64) -> Self {
        Self {
            sessions: Arc::default(),
            profiles: Arc::default(),
            idle_ttl: Duration::hours(idle_ttl_hours),
        }
    }

    /// Открыть сессию. Имя сохраняется в профиле при регистрации;
    /// при входе берётся из профиля, если он уже есть.
    pub async fn open(&self, email: &str, name: Option<&str>) -> (String, UserInfo) {
        let candidate = UserInfo::from_email(email, name);
        let user = {
            let mut profiles = self.profiles.write().await;
            let existing = profiles.get(&candidate.id).cloned();
            match (existing, name) {
                (Some(existing), None) => existing,
                _ => {
                    profiles.insert(candidate.id.clone(), candidate.clone());
                    candidate
                }
            }
        };

        let now = Utc::now();
        self.evict_idle(now).await;

        let token = uuid::Uuid::new_v4().to_string();
        let mut sessions = self.sessions.write().await;
        sessions.insert(
            hash_token(&token),
            Session {
                user_id: user.id.clone(),
                last_seen: now,
            },
        );
        (token, user)
    }

    /// Пользователь сессии; продлевает её
    pub async fn resolve(&self, token: &str) -> Option<UserInfo> {
        self.resolve_at(token, Utc::now()).await
    }

    async fn resolve_at(&self, token: &str, now: DateTime<Utc>) -> Option<UserInfo> {
        let user_id = {
            let mut sessions = self.sessions.write().await;
            let key = hash_token(token);
            let session = sessions.get_mut(&key)?;
            if now - session.last_seen > self.idle_ttl {
                sessions.remove(&key);
                return None;
            }
            session.last_seen = now;
            session.user_id.clone()
        };
        let profiles = self.profiles.read().await;
        profiles.get(&user_id).cloned()
    }

    pub async fn revoke(&self, token: &str) -> bool {
        let mut sessions = self.sessions.write().await;
        sessions.remove(&hash_token(token)).is_some()
    }

    /// Закрыть сессии, простаивающие дольше `idle_ttl`; возвращает их количество
    pub async fn evict_idle(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| now - session.last_seen <= self.idle_ttl);
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::debug!("Evicted {} idle sessions", evicted);
        }
        evicted
    }

    /// Новое отображаемое имя; видно во всех сессиях пользователя
    pub async fn rename(&self, user_id: &str, name: &str) -> Option<UserInfo> {
        let mut profiles = self.profiles.write().await;
        let profile = profiles.get_mut(user_id)?;
        profile.name = name.trim().to_string();
        Some(profile.clone())
    }
}

fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
