//! Skills page.

use devmitra_api_models::EntityKind;

use super::{EntityPage, SortChoice, all_filter};
use crate::core::list::{FilterChoice, SortKey};

/// Skills management page; sorted by proficiency on load.
pub const PAGE: EntityPage = EntityPage {
    kind: EntityKind::Skill,
    heading: "Skills",
    search_placeholder: "Search skills...",
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
    sorts: &[
        SortChoice {
            key: SortKey::MetricDesc,
            label: "Highest Proficiency",
        },
        SortChoice {
            key: SortKey::MetricAsc,
            label: "Lowest Proficiency",
        },
        SortChoice {
            key: SortKey::TitleAsc,
            label: "Name (A-Z)",
        },
        SortChoice {
            key: SortKey::TitleDesc,
            label: "Name (Z-A)",
        },
    ],
    empty_title: "No skills found",
    empty_hint: "Try adjusting your search or filters",
};
