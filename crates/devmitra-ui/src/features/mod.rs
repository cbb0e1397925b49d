//! Per-entity page descriptions.
//!
//! # Design
//! - Each management page is data: filters, sort options and empty-state copy.
//! - The generic list/action controllers do the work; pages only parameterise them.

pub mod achievements;
pub mod categories;
pub mod contact_responses;
pub mod experience;
pub mod notifications;
pub mod projects;
pub mod skills;

use devmitra_api_models::EntityKind;

use crate::core::list::{CardRecord, FILTER_ALL, FilterChoice, ListController, ListError, SortKey};

/// Sort option shown in a page's `<select>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortChoice {
    /// Sort order.
    pub key: SortKey,
    /// Option label.
    pub label: &'static str,
}

/// Static description of one management page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntityPage {
    /// Entity kind listed on the page.
    pub kind: EntityKind,
    /// Page heading.
    pub heading: &'static str,
    /// Search box placeholder.
    pub search_placeholder: &'static str,
    /// Filter buttons, `all` first.
    pub filters: &'static [FilterChoice],
    /// Sort options; the first one is applied on load.
    pub sorts: &'static [SortChoice],
    /// Empty-state heading.
    pub empty_title: &'static str,
    /// Empty-state hint.
    pub empty_hint: &'static str,
}

impl EntityPage {
    /// Page description for `kind`.
    #[must_use]
    pub const fn for_kind(kind: EntityKind) -> &'static Self {
        match kind {
            EntityKind::Project => &projects::PAGE,
            EntityKind::Skill => &skills::PAGE,
            EntityKind::Experience => &experience::PAGE,
            EntityKind::Achievement => &achievements::PAGE,
            EntityKind::Category => &categories::PAGE,
            EntityKind::Notification => &notifications::PAGE,
            EntityKind::ContactResponse => &contact_responses::PAGE,
        }
    }

    /// Tags a card on this page may carry.
    pub fn known_tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.filters
            .iter()
            .map(|choice| choice.value)
            .filter(|value| *value != FILTER_ALL)
    }

    /// Sort applied when the page loads.
    #[must_use]
    pub fn default_sort(&self) -> Option<SortKey> {
        self.sorts.first().map(|choice| choice.key)
    }

    /// List controller over `records` with this page's tags and default sort.
    ///
    /// # Errors
    /// Propagates snapshot validation failures from [`ListController::new`].
    pub fn controller(&self, records: Vec<CardRecord>) -> Result<ListController, ListError> {
        let mut list = ListController::new(records, self.known_tags())?;
        list.set_sort(self.default_sort());
        Ok(list)
    }
}

pub(crate) const fn all_filter() -> FilterChoice {
    FilterChoice {
        value: FILTER_ALL,
        label: "All",
    }
}

pub(crate) const DATE_SORTS: [SortChoice; 4] = [
    SortChoice {
        key: SortKey::Newest,
        label: "Newest First",
    },
    SortChoice {
        key: SortKey::Oldest,
        label: "Oldest First",
    },
    SortChoice {
        key: SortKey::TitleAsc,
        label: "Title (A-Z)",
    },
    SortChoice {
        key: SortKey::TitleDesc,
        label: "Title (Z-A)",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_a_page_with_all_filter_first() {
        for kind in EntityKind::all() {
            let page = EntityPage::for_kind(kind);
            assert_eq!(page.kind, kind);
            assert_eq!(page.filters.first().map(|choice| choice.value), Some(FILTER_ALL));
            assert!(!page.sorts.is_empty());
            assert!(page.known_tags().all(|tag| tag != FILTER_ALL));
        }
    }

    #[test]
    fn controller_applies_default_sort() {
        let page = EntityPage::for_kind(EntityKind::Skill);
        let list = page
            .controller(vec![
                CardRecord::new("1", "Go", "active").with_metric(40),
                CardRecord::new("2", "Rust", "active").with_metric(90),
            ])
            .unwrap();
        assert_eq!(list.query().sort, Some(SortKey::MetricDesc));
        assert_eq!(list.visible_records()[0].title, "Rust");
    }

    #[test]
    fn controller_rejects_tags_the_page_does_not_offer() {
        let page = EntityPage::for_kind(EntityKind::Project);
        assert!(page
            .controller(vec![CardRecord::new("1", "Site", "archived")])
            .is_err());
    }
}
