//! Categories page. Cards are filtered by category type.

use devmitra_api_models::EntityKind;

use super::{EntityPage, SortChoice, all_filter};
use crate::core::list::{FilterChoice, SortKey};

/// Categories management page.
pub const PAGE: EntityPage = EntityPage {
    kind: EntityKind::Category,
    heading: "Categories",
    search_placeholder: "Search categories...",
    filters: &[
        all_filter(),
        FilterChoice {
            value: "project",
            label: "Projects",
        },
        FilterChoice {
            value: "skill",
            label: "Skills",
        },
        FilterChoice {
            value: "achievement",
            label: "Achievements",
        },
        FilterChoice {
            value: "experience",
            label: "Experience",
        },
    ],
    sorts: &[
        SortChoice {
            key: SortKey::TitleAsc,
            label: "Name (A-Z)",
        },
        SortChoice {
            key: SortKey::TitleDesc,
            label: "Name (Z-A)",
        },
    ],
    empty_title: "No categories yet",
    empty_hint: "Create a category to group your content",
};
