pub mod action;
pub mod config;
pub mod error;
pub mod event;
pub mod format;
pub mod lifecycle;
pub mod rank;
pub mod scheduler;
pub mod system;
pub mod ui;
