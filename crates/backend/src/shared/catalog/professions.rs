use anyhow::Context;
use async_trait::async_trait;
use contracts::domain::a001_profession::aggregate::{filter_professions, ProfessionCard};
use once_cell::sync::Lazy;
use std::path::Path;

/// Справочник профессий
#[async_trait]
pub trait ProfessionCatalog: Send + Sync {
    /// Поиск по подстроке; пустой запрос возвращает пустой список
    async fn search(&self, search: &str, limit: usize) -> anyhow::Result<Vec<ProfessionCard>>;

    async fn get(&self, id: i64) -> anyhow::Result<Option<ProfessionCard>>;

    async fn count(&self) -> usize;
}

const SAMPLE_PROFESSIONS: &[(i64, &str, u32)] = &[
    (1, "Авербандщик", 4),
    (2, "Авиационный механик (техник) по планеру и двигателям", 7),
    (7, "Автоклавщик", 5),
    (11, "Автоматчик", 4),
    (50, "Аппаратчик", 6),
    (51, "Аппаратчик абсорбции", 7),
    (80, "Бетонщик", 5),
    (100, "Водитель автомобиля", 4),
    (150, "Газосварщик", 8),
    (200, "Дорожный рабочий", 6),
    (250, "Электросварщик ручной сварки", 9),
    (300, "Маляр", 7),
    (350, "Слесарь-ремонтник", 8),
    (400, "Токарь", 5),
    (450, "Уборщик производственных помещений", 4),
    (500, "Штукатур", 6),
    (550, "Электромонтёр по ремонту и обслуживанию электрооборудования", 8),
    (600, "Плотник", 7),
    (650, "Каменщик", 5),
    (700, "Сварщик термитной сварки", 6),
];

static EMBEDDED_PROFESSIONS: Lazy<Vec<ProfessionCard>> = Lazy::new(|| {
    SAMPLE_PROFESSIONS
        .iter()
        .map(|&(id, name, siz_count)| ProfessionCard {
            id,
            name: name.to_string(),
            siz_count,
        })
        .collect()
});

/// Справочник, целиком загруженный в память
pub struct StaticProfessionCatalog {
    professions: Vec<ProfessionCard>,
}

impl StaticProfessionCatalog {
    pub fn new(professions: Vec<ProfessionCard>) -> Self {
        Self { professions }
    }

    /// Встроенный демонстрационный справочник
    pub fn embedded() -> Self {
        Self::new(EMBEDDED_PROFESSIONS.clone())
    }

    /// JSON-массив `[{ "id", "name", "siz_count" }]`
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read professions from {}", path.display()))?;
        let professions: Vec<ProfessionCard> = serde_json::from_str(&contents)
            .with_context(|| format!("Invalid professions JSON in {}", path.display()))?;
        Ok(Self::new(professions))
    }
}

#[async_trait]
impl ProfessionCatalog for StaticProfessionCatalog {
    async fn search(&self, search: &str, limit: usize) -> anyhow::Result<Vec<ProfessionCard>> {
        Ok(filter_professions(&self.professions, search, limit)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn get(&self, id: i64) -> anyhow::Result<Option<ProfessionCard>> {
        Ok(self.professions.iter().find(|p| p.id == id).cloned())
    }

    async fn count(&self) -> usize {
        self.professions.len()
    }
}
