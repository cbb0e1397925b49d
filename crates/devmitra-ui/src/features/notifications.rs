//! Notifications page: read state plus notice type filters.

use devmitra_api_models::EntityKind;

use super::{DATE_SORTS, EntityPage, all_filter};
use crate::core::actions::STATUS_READ;
use crate::core::list::{FilterChoice, ListController};
use crate::core::notify::Notice;

/// Status carried by notifications that have not been opened.
pub const STATUS_UNREAD: &str = "unread";

/// Notifications management page. Cards carry the read state as status
/// and the notice type as a label.
pub const PAGE: EntityPage = EntityPage {
    kind: EntityKind::Notification,
    heading: "Notifications",
    search_placeholder: "Search notifications...",
    filters: &[
        all_filter(),
        FilterChoice {
            value: STATUS_UNREAD,
            label: "Unread",
        },
        FilterChoice {
            value: STATUS_READ,
            label: "Read",
        },
        FilterChoice {
            value: "info",
            label: "Info",
        },
        FilterChoice {
            value: "success",
            label: "Success",
        },
        FilterChoice {
            value: "warning",
            label: "Warning",
        },
        FilterChoice {
            value: "error",
            label: "Error",
        },
    ],
    sorts: &DATE_SORTS,
    empty_title: "No notifications",
    empty_hint: "You're all caught up",
};

/// Move every unread card to read after the mark-all endpoint succeeded.
pub fn mark_all_read(list: &mut ListController) -> Notice {
    let unread: Vec<_> = list
        .records()
        .iter()
        .filter(|record| record.status == STATUS_UNREAD)
        .map(|record| record.id.clone())
        .collect();
    for id in &unread {
        if let Err(err) = list.set_status(id, STATUS_READ) {
            tracing::warn!(%id, error = %err, "read status not applied");
        }
    }
    Notice::success(format!("{} notifications marked as read.", unread.len()))
}

/// Question asked before every notification is marked as read.
pub const MARK_ALL_READ_PROMPT: &str = "Mark all notifications as read?";

/// Prompt to confirm "mark all as read", or `None` when nothing is unread.
#[must_use]
pub fn mark_all_read_prompt(list: &ListController) -> Option<&'static str> {
    (unread_count(list) > 0).then_some(MARK_ALL_READ_PROMPT)
}

/// Number of unread notifications shown on the badge.
#[must_use]
pub fn unread_count(list: &ListController) -> usize {
    list.records()
        .iter()
        .filter(|record| record.status == STATUS_UNREAD)
        .count()
}
