use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub workspace: WorkspaceConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// JSON-файл справочника профессий; без него используются встроенные данные
    pub professions_path: Option<String>,
    /// JSON-файл справочника опасностей
    pub hazards_path: Option<String>,
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
    #[serde(default = "default_max_search_limit")]
    pub max_search_limit: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GenerationConfig {
    /// Имитация времени формирования документа по списку
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
    /// Имитация времени формирования одной личной карточки
    #[serde(default = "default_single_card_latency_ms")]
    pub single_card_latency_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WorkspaceConfig {
    /// Пространство без изменений дольше этого срока удаляется вместе с анонимной историей
    #[serde(default = "default_workspace_idle_ttl_hours")]
    pub idle_ttl_hours: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// Срок жизни неиспользуемой сессии
    #[serde(default = "default_session_idle_ttl_hours")]
    pub session_idle_ttl_hours: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_search_limit() -> usize {
    20
}

fn default_max_search_limit() -> usize {
    50
}

fn default_latency_ms() -> u64 {
    1000
}

fn default_single_card_latency_ms() -> u64 {
    600
}

fn default_workspace_idle_ttl_hours() -> i64 {
    24
}

fn default_session_idle_ttl_hours() -> i64 {
    24 * 7
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            professions_path: None,
            hazards_path: None,
            search_limit: default_search_limit(),
            max_search_limit: default_max_search_limit(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
            single_card_latency_ms: default_single_card_latency_ms(),
        }
    }
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            idle_ttl_hours: default_workspace_idle_ttl_hours(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_idle_ttl_hours: default_session_idle_ttl_hours(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl CatalogConfig {
    /// Лимит выдачи поиска: по умолчанию из конфигурации, не больше максимума
    pub fn effective_limit(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.search_limit)
            .min(self.max_search_limit)
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000

[catalog]
search_limit = 20
max_search_limit = 50

[generation]
latency_ms = 1000
single_card_latency_ms = 600

[workspace]
idle_ttl_hours = 24

[auth]
session_idle_ttl_hours = 168

[logging]
level = "info"
"#;

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 3000,
            },
            catalog: CatalogConfig::default(),
            generation: GenerationConfig::default(),
            workspace: WorkspaceConfig::default(),
            auth: AuthConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
///
/// Вызывается до инициализации трассировки, поэтому пишет в stdout.
pub fn load_config() -> anyhow::Result<Config> {
    if let Some(exe_dir) = exe_dir() {
        let config_path = exe_dir.join("config.toml");

        if config_path.exists() {
            println!("✓ Loading config from: {}", config_path.display());
            let contents = std::fs::read_to_string(&config_path)?;
            return parse_config(&contents);
        }
        println!("ℹ config.toml not found at: {}", config_path.display());
    }

    println!("ℹ Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    if config.catalog.search_limit == 0 || config.catalog.max_search_limit == 0 {
        anyhow::bail!("catalog search limits must be positive");
    }
    if config.workspace.idle_ttl_hours <= 0 || config.auth.session_idle_ttl_hours <= 0 {
        anyhow::bail!("idle TTLs must be positive");
    }
    Ok(config)
}

fn exe_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
}

/// Resolves relative paths relative to the executable directory
pub fn resolve_path(path: &str) -> PathBuf {
    let candidate = Path::new(path);

    if candidate.is_absolute() {
        return candidate.to_path_buf();
    }

    match exe_dir() {
        Some(dir) => dir.join(candidate),
        // Fallback: use relative to current directory
        None => PathBuf::from(path),
    }
}
