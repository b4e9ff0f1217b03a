pub mod app;
pub mod components;
pub mod config;
pub mod event;
pub mod input;
pub mod logging;
pub mod reminder;
pub mod store;
pub mod theme;
pub mod tui;
