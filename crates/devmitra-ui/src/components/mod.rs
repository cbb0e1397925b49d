//! Yew components for the dashboard pages.

pub(crate) mod delete_modal;
pub(crate) mod list_page;
pub(crate) mod tag_selector;
pub(crate) mod toast;
pub(crate) mod toolbar;
pub(crate) mod upload;
