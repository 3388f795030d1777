//! Общие контракты калькулятора норм выдачи СИЗ.
//!
//! Крейт не выполняет ввода-вывода: здесь живут доменные типы, правила
//! работы со списком профессий, история формирований и рендер документов.
//! Бекенд и любые клиенты используют одни и те же структуры.

pub mod domain;
pub mod enums;
pub mod shared;
pub mod system;
pub mod usecases;
