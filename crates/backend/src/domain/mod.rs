pub mod a001_profession;
pub mod a002_hazard;
pub mod a003_workspace;
pub mod a004_history;
