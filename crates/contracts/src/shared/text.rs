/// Первые `max` символов строки (по символам, а не байтам)
///
/// # Примеры
/// ```
/// use contracts::shared::text::truncate_chars;
/// assert_eq!(truncate_chars("Электрический ток", 5), "Элект");
/// assert_eq!(truncate_chars("Шум", 28), "Шум");
/// ```
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((byte_idx, _)) => &s[..byte_idx],
        None => s,
    }
}

/// Регистронезависимый поиск подстроки
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_never_splits_characters() {
        assert_eq!(truncate_chars("Бетонщик", 3), "Бет");
        assert_eq!(truncate_chars("Бетонщик", 8), "Бетонщик");
        assert_eq!(truncate_chars("", 10), "");
        assert_eq!(truncate_chars("abc", 0), "");
    }

    #[test]
    fn test_contains_ignore_case_cyrillic() {
        assert!(contains_ignore_case("Электрический ток", "ТОК"));
        assert!(contains_ignore_case("Маляр", ""));
        assert!(!contains_ignore_case("Маляр", "токарь"));
    }
}
