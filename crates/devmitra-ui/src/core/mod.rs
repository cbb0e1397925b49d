//! Core, DOM-free controllers and helpers for the dashboard pages.
pub mod actions;
pub mod config;
pub mod csrf;
pub mod editors;
pub mod forms;
pub mod list;
pub mod notify;
pub mod profile;
pub mod selection;
pub mod store;
pub mod uploads;

#[cfg(test)]
pub(crate) mod testing;
