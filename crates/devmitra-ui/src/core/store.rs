//! Page-wide yewdux store.
//!
//! # Design
//! - One store per mounted page; controllers live inside it as plain values.
//! - Reducers are methods so the async glue in the wasm host stays thin.
//! - Deleted cards linger in `leaving` for the fade-out, then leave the list.

use std::collections::BTreeSet;

use devmitra_api_models::{ActionAck, EntityKind};
use yewdux::store::Store;

use crate::core::actions::{
    ActionController, ActionRejected, DeleteDialog, GatewayError, Outcome, PendingAction,
    Settlement,
};
use crate::core::list::{CardId, CardRecord, ListController, ListError, ListQuery};
use crate::core::notify::{Notice, NotificationCenter};
use crate::features::contact_responses::STATUS_RESPONDED;
use crate::features::notifications::STATUS_UNREAD;
use crate::features::EntityPage;

/// Controllers for the listed entity kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageState {
    /// Static page description.
    pub page: &'static EntityPage,
    /// Search/filter/sort state.
    pub list: ListController,
    /// In-flight guard and action settlement.
    pub actions: ActionController,
}

/// What one server-rendered card should show after the latest change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardState {
    /// Card id (`data-id`).
    pub id: CardId,
    /// Matches the current search and filter.
    pub visible: bool,
    /// Value shown by the active switch.
    pub checked: bool,
    /// Confirmed inactive; greys the card on toggle pages.
    pub inactive: bool,
    /// Controls are locked: a request is pending or the card is fading out.
    pub busy: bool,
    /// Fading out after a confirmed delete.
    pub leaving: bool,
    /// Current status tag.
    pub status: String,
    /// Offers "mark as read".
    pub can_mark_read: bool,
    /// Offers "mark as responded".
    pub can_mark_responded: bool,
}

/// Store backing one management page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Store)]
pub struct PageStore {
    /// Loaded page, if the snapshot was valid.
    pub state: Option<PageState>,
    /// Visible notification.
    pub notices: NotificationCenter,
    /// Open delete confirmation.
    pub dialog: Option<DeleteDialog>,
    /// Cards fading out after a confirmed delete.
    pub leaving: BTreeSet<CardId>,
    /// Snapshot validation failure shown instead of the grid.
    pub load_error: Option<String>,
}

impl PageStore {
    /// Load the rendered snapshot for `page`, honouring a `?filter=` query.
    ///
    /// # Errors
    /// Returns the snapshot validation failure; it is also kept in `load_error`.
    pub fn load(
        &mut self,
        page: &'static EntityPage,
        records: Vec<CardRecord>,
        query_string: &str,
    ) -> Result<(), ListError> {
        match page.controller(records) {
            Ok(list) => {
                let query = ListQuery {
                    sort: list.query().sort,
                    ..ListQuery::default()
                }
                .with_query_string(query_string);
                self.state = Some(PageState {
                    page,
                    list: list.with_query(query),
                    actions: ActionController::new(page.kind),
                });
                self.load_error = None;
                Ok(())
            }
            Err(err) => {
                self.state = None;
                self.load_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Show a notice and return its id for the dismiss timer.
    pub fn notify(&mut self, notice: Notice, now_ms: u64) -> u64 {
        self.notices.push(notice, now_ms)
    }

    /// Open the confirmation prompt for `id`.
    pub fn open_delete(&mut self, id: &CardId) -> bool {
        let Some(state) = &self.state else {
            return false;
        };
        if self.is_busy(id) {
            return false;
        }
        self.dialog = state
            .list
            .record(id)
            .map(|record| DeleteDialog::open(state.page.kind, record));
        self.dialog.is_some()
    }

    /// Whether `id` has a request outstanding or is fading out after a delete.
    #[must_use]
    pub fn is_busy(&self, id: &CardId) -> bool {
        self.leaving.contains(id)
            || self
                .state
                .as_ref()
                .is_some_and(|state| state.actions.is_in_flight(id))
    }

    /// Desired state of every listed card, in the order the cards should appear:
    /// visible cards in display order, then hidden ones in snapshot order.
    #[must_use]
    pub fn card_states(&self) -> Vec<CardState> {
        let Some(state) = &self.state else {
            return Vec::new();
        };
        let kind = state.page.kind;
        let list = &state.list;
        let hidden = list
            .records()
            .iter()
            .filter(|record| !list.view().is_visible(&record.id));
        list.visible_records()
            .into_iter()
            .chain(hidden)
            .map(|record| CardState {
                id: record.id.clone(),
                visible: list.view().is_visible(&record.id),
                checked: list.toggle_value(&record.id).unwrap_or(record.is_active),
                inactive: kind.supports_toggle() && !record.is_active,
                busy: self.is_busy(&record.id),
                leaving: self.leaving.contains(&record.id),
                status: record.status.clone(),
                can_mark_read: kind == EntityKind::Notification && record.status == STATUS_UNREAD,
                can_mark_responded: kind == EntityKind::ContactResponse
                    && record.status != STATUS_RESPONDED,
            })
            .collect()
    }

    /// Close the prompt without deleting.
    pub fn cancel_delete(&mut self) {
        if let Some(dialog) = self.dialog.take() {
            dialog.cancel();
        }
    }

    /// Confirm the open prompt and start the delete.
    ///
    /// Returns `None` when no prompt is open or the delete was rejected.
    pub fn confirm_delete(&mut self, now_ms: u64) -> Option<PendingAction> {
        let dialog = self.dialog.take()?;
        let state = self.state.as_mut()?;
        let started = state.actions.begin_delete(&state.list, dialog.confirm());
        self.accept(started, now_ms)
    }

    /// Start a toggle for `id`.
    pub fn start_toggle(&mut self, id: &CardId, requested: bool, now_ms: u64) -> Option<PendingAction> {
        if self.leaving.contains(id) {
            return None;
        }
        let state = self.state.as_mut()?;
        let started = state.actions.begin_toggle(&mut state.list, id, requested);
        self.accept(started, now_ms)
    }

    /// Start marking `id` as read.
    pub fn start_mark_read(&mut self, id: &CardId, now_ms: u64) -> Option<PendingAction> {
        if self.leaving.contains(id) {
            return None;
        }
        let state = self.state.as_mut()?;
        let started = state.actions.begin_mark_read(&state.list, id);
        self.accept(started, now_ms)
    }

    /// Settle a finished request. Deleted cards are parked in `leaving`.
    pub fn finish(
        &mut self,
        pending: &PendingAction,
        result: &Result<ActionAck, GatewayError>,
        now_ms: u64,
    ) -> Option<Settlement> {
        let state = self.state.as_mut()?;
        let settlement = state.actions.classify(pending, result);
        if settlement.outcome == Outcome::Removed {
            self.leaving.insert(settlement.id.clone());
        } else {
            ActionController::apply(&mut state.list, &settlement);
        }
        self.notices.push(settlement.notice.clone(), now_ms);
        Some(settlement)
    }

    /// Drop a faded-out card from the list.
    pub fn complete_removal(&mut self, id: &CardId) {
        if !self.leaving.remove(id) {
            return;
        }
        if let Some(state) = self.state.as_mut() {
            state.list.remove(id);
        }
    }

    fn accept(
        &mut self,
        started: Result<PendingAction, ActionRejected>,
        now_ms: u64,
    ) -> Option<PendingAction> {
        match started {
            Ok(pending) => Some(pending),
            Err(ActionRejected::InFlight(id)) => {
                tracing::debug!(%id, "ignored while a request is pending");
                None
            }
            Err(err) => {
                tracing::debug!(%err, "action refused");
                self.notices.push(Notice::error(err.user_message()), now_ms);
                None
            }
        }
    }
}
