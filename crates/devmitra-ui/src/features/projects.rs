//! Projects page.

use devmitra_api_models::EntityKind;

use super::{DATE_SORTS, EntityPage, all_filter};
use crate::core::list::FilterChoice;

/// Projects management page.
pub const PAGE: EntityPage = EntityPage {
    kind: EntityKind::Project,
    heading: "Projects",
    search_placeholder: "Search projects...",
    filters: &[
        all_filter(),
        FilterChoice {
            value: "active",
            label: "Active",
        },
        FilterChoice {
            value: "completed",
            label: "Completed",
        },
        FilterChoice {
            value: "on-hold",
            label: "On Hold",
        },
        FilterChoice {
            value: "draft",
            label: "Draft",
        },
    ],
    sorts: &DATE_SORTS,
    empty_title: "No projects found",
    empty_hint: "Try adjusting your search or filters",
};
