use serde::{Deserialize, Serialize};

/// Выбранные опасности в порядке выбора, без повторов.
///
/// Порядок важен: первая опасность выводится в строке профессии в нормах выдачи.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct HazardSet {
    names: Vec<String>,
}

impl HazardSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Переключить опасность: убрать, если выбрана, иначе добавить в конец.
    /// Возвращает `true`, если опасность теперь выбрана.
    pub fn toggle(&mut self, name: &str) -> bool {
        if let Some(pos) = self.names.iter().position(|h| h == name) {
            self.names.remove(pos);
            false
        } else {
            self.names.push(name.to_string());
            true
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|h| h == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Последовательность в порядке выбора
    pub fn to_vec(&self) -> Vec<String> {
        self.names.clone()
    }
}

impl<S: Into<String>> FromIterator<S> for HazardSet {
    /// Повторы отбрасываются, порядок первых вхождений сохраняется
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = HazardSet::new();
        for name in iter {
            let name = name.into();
            if !set.contains(&name) {
                set.names.push(name);
            }
        }
        set
    }
}

impl From<Vec<String>> for HazardSet {
    fn from(names: Vec<String>) -> Self {
        names.into_iter().collect()
    }
}

impl From<HazardSet> for Vec<String> {
    fn from(set: HazardSet) -> Self {
        set.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_appends_in_selection_order() {
        let mut set = HazardSet::new();
        assert!(set.toggle("Шум"));
        assert!(set.toggle("Электрический ток"));
        assert_eq!(set.to_vec(), vec!["Шум", "Электрический ток"]);
    }

    #[test]
    fn test_toggle_removes_present() {
        let mut set: HazardSet = ["a", "b", "c"].into_iter().collect();
        assert!(!set.toggle("b"));
        assert_eq!(set.to_vec(), vec!["a", "c"]);
    }

    #[test]
    fn test_double_toggle_is_noop() {
        let original: HazardSet = ["Электрический ток", "Биологические объекты"]
            .into_iter()
            .collect();

        let mut set = original.clone();
        set.toggle("Шум");
        set.toggle("Шум");
        assert_eq!(set, original);
    }

    #[test]
    fn test_double_toggle_of_selected_moves_it_last() {
        let mut set: HazardSet = ["a", "b"].into_iter().collect();
        set.toggle("a");
        set.toggle("a");
        assert_eq!(set.to_vec(), vec!["b", "a"]);
    }

    #[test]
    fn test_from_iter_drops_duplicates() {
        let set: HazardSet = ["a", "b", "a"].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_deserialize_drops_duplicates() {
        let set: HazardSet = serde_json::from_str(r#"["Шум", "Вибрация", "Шум"]"#).unwrap();
        assert_eq!(set.to_vec(), vec!["Шум", "Вибрация"]);
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"["Шум","Вибрация"]"#);
    }
}
