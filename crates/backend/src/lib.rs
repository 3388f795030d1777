//! HTTP API калькулятора норм выдачи СИЗ.
//!
//! Всё состояние хранится в памяти процесса и принадлежит одному
//! [`shared::state::AppState`], который передаётся обработчикам через `State`.

pub mod domain;
pub mod handlers;
pub mod routes;
pub mod shared;
pub mod system;
pub mod usecases;
