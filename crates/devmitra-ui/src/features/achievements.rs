//! Achievements page.

use devmitra_api_models::EntityKind;

use super::{DATE_SORTS, EntityPage, all_filter};
use crate::core::list::FilterChoice;

/// Achievements management page.
pub const PAGE: EntityPage = EntityPage {
    kind: EntityKind::Achievement,
    heading: "Achievements",
    search_placeholder: "Search by title or issuer...",
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
        FilterChoice {
            value: "draft",
            label: "Draft",
        },
    ],
    sorts: &DATE_SORTS,
    empty_title: "No achievements found",
    empty_hint: "Try adjusting your search or filters",
};
