use anyhow::Context;
use contracts::domain::a002_hazard::{filter_hazards, unique_by_name, HazardRef};
use once_cell::sync::Lazy;
use std::path::Path;

const SAMPLE_HAZARDS: &[(&str, &str)] = &[
    ("Скользкие, обледенелые, зажиренные, мокрые поверхности", "Падение из-за потери равновесия"),
    ("Перепад высот, отсутствие ограждения на высоте", "Падение работника с высоты"),
    ("Груз, инструмент или предмет, перемещаемый или поднимаемый", "Удар падающим предметом"),
    ("Плохо или неправильно закрепленные детали или заготовки", "Удар или порез"),
    ("Острые кромки, заусенцы, шероховатая поверхность", "Порезы, проколы, царапины"),
    ("Движущиеся части машин и механизмов", "Захват, затягивание, удар"),
    ("Электрический ток", "Поражение электрическим током"),
    ("Повышенная запылённость воздуха рабочей зоны", "Заболевание органов дыхания"),
    ("Пониженная температура воздуха и поверхностей", "Переохлаждение"),
    ("Повышенный уровень шума на рабочем месте", "Потеря слуха"),
    ("Воздействие вредных веществ — аэрозолей", "Профессиональные заболевания"),
    ("Биологические объекты", "Инфекционные заболевания"),
];

static EMBEDDED_HAZARDS: Lazy<Vec<HazardRef>> = Lazy::new(|| {
    SAMPLE_HAZARDS
        .iter()
        .map(|&(name, event)| HazardRef::new(name, event))
        .collect()
});

/// Справочник опасностей, уникальный по имени
pub struct HazardCatalog {
    hazards: Vec<HazardRef>,
}

impl HazardCatalog {
    pub fn new(hazards: Vec<HazardRef>) -> Self {
        Self {
            hazards: unique_by_name(hazards),
        }
    }

    pub fn embedded() -> Self {
        Self::new(EMBEDDED_HAZARDS.clone())
    }

    /// JSON-массив `[{ "name", "event" }]`
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read hazards from {}", path.display()))?;
        let hazards: Vec<HazardRef> = serde_json::from_str(&contents)
            .with_context(|| format!("Invalid hazards JSON in {}", path.display()))?;
        Ok(Self::new(hazards))
    }

    pub fn list(&self, search: &str) -> Vec<HazardRef> {
        filter_hazards(&self.hazards, search)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.hazards.iter().any(|h| h.name == name)
    }

    pub fn len(&self) -> usize {
        self.hazards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hazards.is_empty()
    }
}
