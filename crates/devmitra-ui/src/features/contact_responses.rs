//! Contact responses page: filtered by priority label or response status.

use devmitra_api_models::EntityKind;

use super::{EntityPage, SortChoice, all_filter};
use crate::core::list::{CardId, FilterChoice, ListController, ListError, SortKey};
use crate::core::notify::Notice;

/// Status of a message that has been answered.
pub const STATUS_RESPONDED: &str = "responded";

/// Contact responses page.
pub const PAGE: EntityPage = EntityPage {
    kind: EntityKind::ContactResponse,
    heading: "Contact Responses",
    search_placeholder: "Search by name, email or message...",
    filters: &[
        all_filter(),
        FilterChoice {
            value: "urgent",
            label: "Urgent",
        },
        FilterChoice {
            value: "normal",
            label: "Normal",
        },
        FilterChoice {
            value: "pending",
            label: "Pending",
        },
        FilterChoice {
            value: STATUS_RESPONDED,
            label: "Responded",
        },
    ],
    sorts: &[
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
            label: "Name (A-Z)",
        },
    ],
    empty_title: "No messages found",
    empty_hint: "Try adjusting your search or filters",
};

/// Mark a message as responded on the page.
///
/// # Errors
/// Returns [`ListError::MissingCard`] when the card is not listed.
pub fn mark_responded(list: &mut ListController, id: &CardId) -> Result<Notice, ListError> {
    list.set_status(id, STATUS_RESPONDED)?;
    Ok(Notice::success("Response marked as responded!"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::list::{CardRecord, StatusFilter};

    #[test]
    fn responded_cards_leave_the_pending_filter() {
        let mut list = PAGE
            .controller(vec![
                CardRecord::new("1", "Asha", "pending")
                    .with_label("urgent")
                    .with_secondary("asha@example.com"),
            ])
            .unwrap();
        list.set_filter(StatusFilter::from_value("pending"));
        let notice = mark_responded(&mut list, &CardId::from("1")).unwrap();
        assert_eq!(notice.message, "Response marked as responded!");
        assert!(list.view().empty_state());
        assert_eq!(list.set_filter(StatusFilter::from_value("urgent")).visible_count(), 1);
        assert_eq!(list.set_search("ASHA@").visible_count(), 1);
    }
}
