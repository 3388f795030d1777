//! Текстовые заменители документов "Нормы выдачи СИЗ" и "Личная карточка".
//!
//! Рендер детерминирован: одинаковый вход (включая дату формирования) даёт
//! побайтово одинаковый результат. Дата не участвует в ключе дедупликации
//! истории.

use chrono::NaiveDate;
use std::fmt::Write;

use crate::domain::a003_workspace::Entry;
use crate::enums::document_kind::DocumentKind;
use crate::shared::text::truncate_chars;

pub const NORMY_TITLE: &str = "НОРМЫ ВЫДАЧИ СИЗ";
pub const ANKETA_TITLE: &str = "ЛИЧНАЯ КАРТОЧКА УЧЁТА ВЫДАЧИ СИЗ";
pub const BASIC_PPE_LABEL: &str = "Базовые СИЗ";
pub const NO_HAZARDS_LABEL: &str = "Нет";
pub const REGULATION_FOOTER: &str = "Основание: Приказ Минтруда России от 29.10.2021 №767н";
pub const PROFESSION_PPE_LINE: &str = "- СИЗ согласно нормам для профессии";

const NORMY_HAZARD_WIDTH: usize = 28;
const ANKETA_HAZARD_WIDTH: usize = 50;
const NUMBER_COLUMN: usize = 4;
const PROFESSION_COLUMN: usize = 40;
const HAZARD_COLUMN: usize = 30;

/// Сформировать текст документа по снимку списка
pub fn render(entries: &[Entry], kind: DocumentKind, generated_on: NaiveDate) -> String {
    match kind {
        DocumentKind::Normy => render_normy(entries, generated_on),
        DocumentKind::Anketa => render_anketa(entries),
    }
}

fn render_normy(entries: &[Entry], generated_on: NaiveDate) -> String {
    let mut out = String::new();
    let rule = "=".repeat(60);
    // Запись в String не может завершиться ошибкой
    let _ = writeln!(out, "{NORMY_TITLE}");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "Дата формирования: {}", generated_on.format("%d.%m.%Y"));
    out.push('\n');
    let _ = writeln!(
        out,
        "{:<nw$} {:<pw$} {:<hw$}",
        "№",
        "Профессия",
        "Опасности",
        nw = NUMBER_COLUMN,
        pw = PROFESSION_COLUMN,
        hw = HAZARD_COLUMN
    );
    let _ = writeln!(out, "{}", "-".repeat(80));

    for (i, entry) in entries.iter().enumerate() {
        let first = entry
            .hazards
            .first()
            .map(|h| truncate_chars(h, NORMY_HAZARD_WIDTH))
            .unwrap_or(BASIC_PPE_LABEL);
        let _ = writeln!(
            out,
            "{:<nw$} {:<pw$} {}",
            i + 1,
            entry.profession_name,
            first,
            nw = NUMBER_COLUMN,
            pw = PROFESSION_COLUMN
        );
        for hazard in entry.hazards.iter().skip(1) {
            let _ = writeln!(
                out,
                "{:<w$} {}",
                "",
                truncate_chars(hazard, NORMY_HAZARD_WIDTH),
                w = NUMBER_COLUMN + 1 + PROFESSION_COLUMN
            );
        }
    }

    out.push('\n');
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "{REGULATION_FOOTER}");
    out
}

fn render_anketa(entries: &[Entry]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{ANKETA_TITLE}");
    let _ = writeln!(out, "{}", "=".repeat(60));

    for entry in entries {
        let conditions = if entry.hazards.is_empty() {
            NO_HAZARDS_LABEL.to_string()
        } else {
            entry.hazards.join(", ")
        };
        let _ = writeln!(out, "\nПрофессия: {}", entry.profession_name);
        let _ = writeln!(out, "Дополнительные условия: {conditions}");
        let _ = writeln!(out, "\nСИЗ:");
        let _ = writeln!(out, "{PROFESSION_PPE_LINE}");
        for hazard in &entry.hazards {
            let _ = writeln!(
                out,
                "- СИЗ по опасности: {}",
                truncate_chars(hazard, ANKETA_HAZARD_WIDTH)
            );
        }
        let _ = writeln!(out, "\n{}", "-".repeat(60));
    }
    out
}
