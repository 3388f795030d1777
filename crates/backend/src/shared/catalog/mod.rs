pub mod hazards;
pub mod professions;

pub use hazards::HazardCatalog;
pub use professions::{ProfessionCatalog, StaticProfessionCatalog};

use std::sync::Arc;

use crate::shared::config::{resolve_path, CatalogConfig};

/// Справочники приложения
#[derive(Clone)]
pub struct Catalogs {
    pub professions: Arc<dyn ProfessionCatalog>,
    pub hazards: Arc<HazardCatalog>,
}

impl Catalogs {
    /// Встроенные демонстрационные справочники
    pub fn embedded() -> Self {
        Self {
            professions: Arc::new(StaticProfessionCatalog::embedded()),
            hazards: Arc::new(HazardCatalog::embedded()),
        }
    }

    /// Файлы из конфигурации; не указанный файл заменяется встроенными данными
    pub fn load(config: &CatalogConfig) -> anyhow::Result<Self> {
        let professions = match &config.professions_path {
            Some(path) => {
                let path = resolve_path(path);
                tracing::info!("Loading professions from {}", path.display());
                StaticProfessionCatalog::from_file(&path)?
            }
            None => StaticProfessionCatalog::embedded(),
        };
        let hazards = match &config.hazards_path {
            Some(path) => {
                let path = resolve_path(path);
                tracing::info!("Loading hazards from {}", path.display());
                HazardCatalog::from_file(&path)?
            }
            None => HazardCatalog::embedded(),
        };
        tracing::info!("Hazard catalog: {} unique entries", hazards.len());

        Ok(Self {
            professions: Arc::new(professions),
            hazards: Arc::new(hazards),
        })
    }
}
