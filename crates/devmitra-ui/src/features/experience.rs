//! Experience page.

use devmitra_api_models::EntityKind;

use super::{DATE_SORTS, EntityPage, all_filter};
use crate::core::list::FilterChoice;

/// Experience management page.
pub const PAGE: EntityPage = EntityPage {
    kind: EntityKind::Experience,
    heading: "Experience",
    search_placeholder: "Search by role or company...",
    filters: &[
        all_filter(),
        FilterChoice {
            value: "active",
            label: "Active",
        },
        FilterChoice {
            value: "inactive",
            label: "Inactive",
        },
    ],
    sorts: &DATE_SORTS,
    empty_title: "No experience found",
    empty_hint: "Try adjusting your search or filters",
};
