use contracts::domain::a002_hazard::HazardRef;

use crate::shared::state::AppState;

/// Справочник опасностей с необязательным фильтром по имени
pub fn list(state: &AppState, search: &str) -> Vec<HazardRef> {
    state.catalogs.hazards.list(search)
}

pub fn is_known(state: &AppState, name: &str) -> bool {
    state.catalogs.hazards.contains(name)
}
