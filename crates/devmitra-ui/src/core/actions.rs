//! Entity action controller: toggle, delete and mark-read against the server.
//!
//! # Design
//! - Every action is `begin` (guard + optimistic change), `dispatch` through an
//!   [`EntityGateway`], then `settle` (commit or revert + notice).
//! - One request per card id at a time; a second attempt is rejected until the first settles.
//! - Deletes are only reachable through a confirmed [`DeleteDialog`].
//! - Nothing is retried; every failure ends in an error notice.

use std::collections::BTreeSet;

use async_trait::async_trait;
use devmitra_api_models::{ActionAck, EntityAction, EntityKind, RouteError};
use thiserror::Error;

use crate::core::list::{CardId, CardRecord, ListController, ListError};
use crate::core::notify::Notice;

/// Status tag given to notifications once read.
pub const STATUS_READ: &str = "read";

/// Message shown when a request fails before the server answers.
pub const TRANSPORT_FAILURE_MESSAGE: &str = "An error occurred. Please try again.";

/// Transport used to deliver actions to the dashboard server.
#[async_trait(?Send)]
pub trait EntityGateway {
    /// Send one action and return the server acknowledgement.
    ///
    /// # Errors
    /// Returns a [`GatewayError`] when no acknowledgement could be read.
    async fn perform(
        &self,
        kind: EntityKind,
        id: &CardId,
        action: EntityAction,
    ) -> Result<ActionAck, GatewayError>;
}

/// Failures raised while talking to the server.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// No endpoint exists for the action.
    #[error(transparent)]
    Route(#[from] RouteError),
    /// The request never completed.
    #[error("request failed: {0}")]
    Transport(String),
    /// The server answered with an error status and no acknowledgement body.
    #[error("server responded with status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },
    /// The acknowledgement body could not be decoded.
    #[error("invalid response body: {0}")]
    Decode(String),
}

/// Reasons an action is refused before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionRejected {
    /// A request for the same card is still outstanding.
    #[error("an action for '{0}' is already in progress")]
    InFlight(CardId),
    /// The entity kind has no endpoint for this action.
    #[error("{kind} entries do not support {action}")]
    Unsupported {
        /// Page entity kind.
        kind: EntityKind,
        /// Rejected action verb.
        action: &'static str,
    },
    /// The card is not part of the list.
    #[error(transparent)]
    List(#[from] ListError),
}

impl ActionRejected {
    /// Text shown on the page when the action is refused.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InFlight(_) => "Please wait for the previous request to finish.".to_string(),
            Self::Unsupported { kind, .. } => {
                format!("This action is not available for {}.", kind.plural())
            }
            Self::List(_) => "This item is no longer on the page.".to_string(),
        }
    }
}

/// Open confirmation prompt for a destructive delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteDialog {
    kind: EntityKind,
    id: CardId,
    title: String,
}

impl DeleteDialog {
    /// Open the prompt for `record`.
    #[must_use]
    pub fn open(kind: EntityKind, record: &CardRecord) -> Self {
        Self {
            kind,
            id: record.id.clone(),
            title: record.title.clone(),
        }
    }

    /// Card the prompt refers to.
    #[must_use]
    pub const fn id(&self) -> &CardId {
        &self.id
    }

    /// Prompt heading.
    #[must_use]
    pub fn heading(&self) -> String {
        format!("Delete {}", self.kind.label())
    }

    /// Prompt body naming the target.
    #[must_use]
    pub fn prompt(&self) -> String {
        format!(
            "Are you sure you want to delete \"{}\"? This action cannot be undone.",
            self.title
        )
    }

    /// The user confirmed; the delete may now be started.
    #[must_use]
    pub fn confirm(self) -> ConfirmedDelete {
        ConfirmedDelete {
            kind: self.kind,
            id: self.id,
        }
    }

    /// The user cancelled; nothing is sent.
    pub fn cancel(self) {
        tracing::debug!(id = %self.id, "delete cancelled");
    }
}

/// Proof that the user confirmed a delete. Only [`DeleteDialog::confirm`] builds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedDelete {
    kind: EntityKind,
    id: CardId,
}

impl ConfirmedDelete {
    /// Card to delete.
    #[must_use]
    pub const fn id(&self) -> &CardId {
        &self.id
    }
}

/// Action that has been started and awaits its acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a started action holds its card's in-flight slot until settled"]
pub struct PendingAction {
    kind: EntityKind,
    id: CardId,
    action: EntityAction,
    previous: Option<bool>,
}

impl PendingAction {
    /// Card the action targets.
    #[must_use]
    pub const fn id(&self) -> &CardId {
        &self.id
    }

    /// Entity kind.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Requested action.
    #[must_use]
    pub const fn action(&self) -> EntityAction {
        self.action
    }

    /// Toggle value shown before the optimistic change.
    #[must_use]
    pub const fn previous(&self) -> Option<bool> {
        self.previous
    }
}

/// What settling did to the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The new active flag was committed.
    Toggled {
        /// Committed value.
        is_active: bool,
    },
    /// The toggle control returned to its pre-click value.
    Reverted {
        /// Restored value.
        is_active: bool,
    },
    /// The card left the list.
    Removed,
    /// The card stayed because the delete failed.
    Kept,
    /// The notification moved to the read state.
    MarkedRead,
    /// Mark-read failed and nothing changed.
    Unchanged,
}

impl Outcome {
    /// Whether the server accepted the action.
    #[must_use]
    pub const fn succeeded(self) -> bool {
        matches!(
            self,
            Self::Toggled { .. } | Self::Removed | Self::MarkedRead
        )
    }
}

/// Result of settling one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    /// Card the action targeted.
    pub id: CardId,
    /// Change applied to the list.
    pub outcome: Outcome,
    /// Message to show.
    pub notice: Notice,
}

/// Per-page controller owning the in-flight guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionController {
    kind: EntityKind,
    in_flight: BTreeSet<CardId>,
}

impl ActionController {
    /// Controller for one entity kind.
    #[must_use]
    pub const fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            in_flight: BTreeSet::new(),
        }
    }

    /// Entity kind handled by this controller.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Whether a request for `id` is outstanding (controls render disabled).
    #[must_use]
    pub fn is_in_flight(&self, id: &CardId) -> bool {
        self.in_flight.contains(id)
    }

    /// Start a toggle, showing `requested` on the control immediately.
    ///
    /// # Errors
    /// Rejects unsupported kinds, unknown cards and cards with a request in flight.
    pub fn begin_toggle(
        &mut self,
        list: &mut ListController,
        id: &CardId,
        requested: bool,
    ) -> Result<PendingAction, ActionRejected> {
        let action = EntityAction::Toggle {
            is_active: requested,
        };
        self.ensure_supported(action)?;
        let previous = list
            .toggle_value(id)
            .ok_or_else(|| ListError::MissingCard(id.clone()))?;
        self.claim(id)?;
        list.show_toggle_value(id, requested);
        tracing::debug!(kind = %self.kind, %id, requested, "toggle started");
        Ok(PendingAction {
            kind: self.kind,
            id: id.clone(),
            action,
            previous: Some(previous),
        })
    }

    /// Start a confirmed delete.
    ///
    /// # Errors
    /// Rejects unsupported kinds, unknown cards and cards with a request in flight.
    pub fn begin_delete(
        &mut self,
        list: &ListController,
        confirmed: ConfirmedDelete,
    ) -> Result<PendingAction, ActionRejected> {
        if confirmed.kind != self.kind {
            return Err(ActionRejected::Unsupported {
                kind: confirmed.kind,
                action: EntityAction::Delete.verb(),
            });
        }
        self.ensure_supported(EntityAction::Delete)?;
        if list.record(&confirmed.id).is_none() {
            return Err(ListError::MissingCard(confirmed.id).into());
        }
        self.claim(&confirmed.id)?;
        tracing::debug!(kind = %self.kind, id = %confirmed.id, "delete started");
        Ok(PendingAction {
            kind: self.kind,
            id: confirmed.id,
            action: EntityAction::Delete,
            previous: None,
        })
    }

    /// Start marking a notification as read.
    ///
    /// # Errors
    /// Rejects kinds other than notifications, unknown cards and cards with a request in flight.
    pub fn begin_mark_read(
        &mut self,
        list: &ListController,
        id: &CardId,
    ) -> Result<PendingAction, ActionRejected> {
        self.ensure_supported(EntityAction::MarkRead)?;
        if list.record(id).is_none() {
            return Err(ListError::MissingCard(id.clone()).into());
        }
        self.claim(id)?;
        Ok(PendingAction {
            kind: self.kind,
            id: id.clone(),
            action: EntityAction::MarkRead,
            previous: None,
        })
    }

    /// Decide the outcome of an acknowledged (or failed) action and release its slot.
    ///
    /// The list is left untouched so the caller can animate before [`Self::apply`].
    pub fn classify(
        &mut self,
        pending: &PendingAction,
        result: &Result<ActionAck, GatewayError>,
    ) -> Settlement {
        self.in_flight.remove(&pending.id);
        let label = pending.kind.label();
        let noun = pending.kind.singular();
        let outcome = match result {
            Ok(ack) if ack.success => match pending.action {
                EntityAction::Toggle { is_active } => Outcome::Toggled { is_active },
                EntityAction::Delete => Outcome::Removed,
                EntityAction::MarkRead => Outcome::MarkedRead,
            },
            _ => match pending.action {
                EntityAction::Toggle { .. } => Outcome::Reverted {
                    is_active: pending.previous.unwrap_or_default(),
                },
                EntityAction::Delete => Outcome::Kept,
                EntityAction::MarkRead => Outcome::Unchanged,
            },
        };
        let notice = match (result, outcome) {
            (Ok(_), Outcome::Toggled { .. }) => {
                Notice::success(format!("{label} status updated successfully!"))
            }
            (Ok(_), Outcome::Removed) => Notice::success(format!("{label} deleted successfully!")),
            (Ok(_), Outcome::MarkedRead) => Notice::success(format!("{label} marked as read.")),
            (Ok(ack), Outcome::Reverted { .. }) => Notice::error(
                ack.reason()
                    .map_or_else(|| format!("Failed to update {noun} status."), str::to_string),
            ),
            (Ok(ack), Outcome::Kept) => Notice::error(
                ack.reason()
                    .map_or_else(|| format!("Failed to delete {noun}."), str::to_string),
            ),
            (Ok(ack), _) => Notice::error(
                ack.reason()
                    .map_or_else(|| format!("Failed to mark {noun} as read."), str::to_string),
            ),
            (Err(_), _) => Notice::error(TRANSPORT_FAILURE_MESSAGE),
        };
        match result {
            Ok(_) => tracing::info!(
                kind = %pending.kind,
                id = %pending.id,
                action = pending.action.verb(),
                succeeded = outcome.succeeded(),
                "action settled"
            ),
            Err(err) => tracing::warn!(
                kind = %pending.kind,
                id = %pending.id,
                action = pending.action.verb(),
                error = %err,
                "action failed"
            ),
        }
        Settlement {
            id: pending.id.clone(),
            outcome,
            notice,
        }
    }

    /// Apply a settlement to the list.
    pub fn apply(list: &mut ListController, settlement: &Settlement) {
        let id = &settlement.id;
        match settlement.outcome {
            Outcome::Toggled { is_active } => {
                list.set_active(id, is_active);
            }
            Outcome::Reverted { is_active } => list.show_toggle_value(id, is_active),
            Outcome::Removed => {
                list.remove(id);
            }
            Outcome::MarkedRead => {
                if let Err(err) = list.set_status(id, STATUS_READ) {
                    tracing::warn!(%id, error = %err, "read status not applied");
                }
            }
            Outcome::Kept | Outcome::Unchanged => {}
        }
    }

    /// Classify and apply in one step.
    pub fn settle(
        &mut self,
        list: &mut ListController,
        pending: &PendingAction,
        result: &Result<ActionAck, GatewayError>,
    ) -> Settlement {
        let settlement = self.classify(pending, result);
        Self::apply(list, &settlement);
        settlement
    }

    /// Dispatch a started action and settle it.
    pub async fn run<G>(
        &mut self,
        list: &mut ListController,
        gateway: &G,
        pending: PendingAction,
    ) -> Settlement
    where
        G: EntityGateway + ?Sized,
    {
        let result = dispatch(gateway, &pending).await;
        self.settle(list, &pending, &result)
    }

    fn ensure_supported(&self, action: EntityAction) -> Result<(), ActionRejected> {
        let supported = match action {
            EntityAction::Toggle { .. } => self.kind.supports_toggle(),
            EntityAction::Delete => self.kind.supports_delete(),
            EntityAction::MarkRead => self.kind == EntityKind::Notification,
        };
        if supported {
            Ok(())
        } else {
            Err(ActionRejected::Unsupported {
                kind: self.kind,
                action: action.verb(),
            })
        }
    }

    fn claim(&mut self, id: &CardId) -> Result<(), ActionRejected> {
        if self.in_flight.insert(id.clone()) {
            Ok(())
        } else {
            tracing::debug!(kind = %self.kind, %id, "action rejected while in flight");
            Err(ActionRejected::InFlight(id.clone()))
        }
    }
}

/// Send a started action through `gateway`.
///
/// # Errors
/// Propagates the gateway failure unchanged.
pub async fn dispatch<G>(gateway: &G, pending: &PendingAction) -> Result<ActionAck, GatewayError>
where
    G: EntityGateway + ?Sized,
{
    tracing::debug!(
        kind = %pending.kind,
        id = %pending.id,
        action = pending.action.verb(),
        "dispatching action"
    );
    gateway.perform(pending.kind, &pending.id, pending.action).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::notify::NoticeKind;
    use crate::core::testing::ScriptedGateway;

    fn skills() -> ListController {
        let mut inactive = CardRecord::new("2", "Go", "inactive");
        inactive.is_active = false;
        ListController::new(
            vec![CardRecord::new("1", "Rust", "active"), inactive],
            ["active", "inactive"],
        )
        .unwrap()
    }

    #[tokio::test]
    async fn toggle_success_commits_value() {
        let mut list = skills();
        let mut actions = ActionController::new(EntityKind::Skill);
        let gateway = ScriptedGateway::new(vec![Ok(ActionAck::ok())]);
        let id = CardId::from("1");

        let pending = actions.begin_toggle(&mut list, &id, false).unwrap();
        assert_eq!(list.toggle_value(&id), Some(false));
        let settlement = actions.run(&mut list, &gateway, pending).await;

        assert_eq!(settlement.outcome, Outcome::Toggled { is_active: false });
        assert_eq!(settlement.notice.message, "Skill status updated successfully!");
        assert!(!list.record(&id).unwrap().is_active);
        assert_eq!(list.toggle_value(&id), Some(false));
        assert_eq!(
            gateway.calls(),
            vec![(
                EntityKind::Skill,
                id,
                EntityAction::Toggle { is_active: false }
            )]
        );
    }

    #[tokio::test]
    async fn toggle_failure_reverts_to_pre_click_value() {
        let mut list = skills();
        let mut actions = ActionController::new(EntityKind::Skill);
        let gateway = ScriptedGateway::new(vec![Ok(ActionAck {
            success: false,
            error: None,
            message: None,
        })]);
        let id = CardId::from("2");

        let pending = actions.begin_toggle(&mut list, &id, true).unwrap();
        let settlement = actions.run(&mut list, &gateway, pending).await;

        assert_eq!(settlement.outcome, Outcome::Reverted { is_active: false });
        assert_eq!(settlement.notice.kind, NoticeKind::Error);
        assert_eq!(settlement.notice.message, "Failed to update skill status.");
        assert_eq!(list.toggle_value(&id), Some(false));
        assert!(!list.record(&id).unwrap().is_active);
    }

    #[tokio::test]
    async fn transport_failure_reverts_with_generic_message() {
        let mut list = skills();
        let mut actions = ActionController::new(EntityKind::Skill);
        let gateway =
            ScriptedGateway::new(vec![Err(GatewayError::Transport("offline".to_string()))]);
        let id = CardId::from("1");

        let pending = actions.begin_toggle(&mut list, &id, false).unwrap();
        let settlement = actions.run(&mut list, &gateway, pending).await;

        assert_eq!(settlement.notice.message, TRANSPORT_FAILURE_MESSAGE);
        assert_eq!(list.toggle_value(&id), Some(true));
        assert!(!actions.is_in_flight(&id));
    }

    #[test]
    fn second_action_is_rejected_while_in_flight() {
        let mut list = skills();
        let mut actions = ActionController::new(EntityKind::Skill);
        let id = CardId::from("1");

        let pending = actions.begin_toggle(&mut list, &id, false).unwrap();
        assert!(actions.is_in_flight(&id));
        assert_eq!(
            actions.begin_toggle(&mut list, &id, true),
            Err(ActionRejected::InFlight(id.clone()))
        );
        let dialog = DeleteDialog::open(EntityKind::Skill, list.record(&id).unwrap());
        assert_eq!(
            actions.begin_delete(&list, dialog.confirm()),
            Err(ActionRejected::InFlight(id.clone()))
        );

        actions.settle(&mut list, &pending, &Ok(ActionAck::ok()));
        assert!(actions.begin_toggle(&mut list, &id, true).is_ok());
    }

    #[tokio::test]
    async fn confirmed_delete_removes_card_for_good() {
        let mut list = skills();
        let mut actions = ActionController::new(EntityKind::Skill);
        let gateway = ScriptedGateway::new(vec![Ok(ActionAck::ok()), Ok(ActionAck::ok())]);

        for id in ["1", "2"] {
            let id = CardId::from(id);
            let dialog = DeleteDialog::open(EntityKind::Skill, list.record(&id).unwrap());
            let pending = actions.begin_delete(&list, dialog.confirm()).unwrap();
            let settlement = actions.run(&mut list, &gateway, pending).await;
            assert_eq!(settlement.outcome, Outcome::Removed);
            assert_eq!(settlement.notice.message, "Skill deleted successfully!");
            assert!(list.record(&id).is_none());
            assert!(!list.set_search("").is_visible(&id));
        }
        assert!(list.view().empty_state());
    }

    #[tokio::test]
    async fn failed_delete_keeps_card_and_uses_server_reason() {
        let mut list = skills();
        let mut actions = ActionController::new(EntityKind::Skill);
        let gateway = ScriptedGateway::new(vec![Ok(ActionAck::failed("Skill is in use"))]);
        let id = CardId::from("1");

        let dialog = DeleteDialog::open(EntityKind::Skill, list.record(&id).unwrap());
        let pending = actions.begin_delete(&list, dialog.confirm()).unwrap();
        let settlement = actions.run(&mut list, &gateway, pending).await;

        assert_eq!(settlement.outcome, Outcome::Kept);
        assert_eq!(settlement.notice.message, "Skill is in use");
        assert!(list.record(&id).is_some());
    }

    #[test]
    fn cancelled_dialog_sends_nothing() {
        let list = skills();
        let dialog = DeleteDialog::open(EntityKind::Skill, list.record(&CardId::from("1")).unwrap());
        assert_eq!(
            dialog.prompt(),
            "Are you sure you want to delete \"Rust\"? This action cannot be undone."
        );
        assert_eq!(dialog.heading(), "Delete Skill");
        dialog.cancel();
        assert_eq!(list.records().len(), 2);
    }

    #[test]
    fn unsupported_kinds_reject_toggles() {
        let mut list =
            ListController::new(vec![CardRecord::new("1", "Web", "project")], ["project"]).unwrap();
        let mut actions = ActionController::new(EntityKind::Category);
        assert_eq!(
            actions.begin_toggle(&mut list, &CardId::from("1"), false),
            Err(ActionRejected::Unsupported {
                kind: EntityKind::Category,
                action: "toggle",
            })
        );
        assert!(!actions.is_in_flight(&CardId::from("1")));
    }

    #[test]
    fn refusals_read_as_plain_sentences() {
        let unsupported = ActionRejected::Unsupported {
            kind: EntityKind::ContactResponse,
            action: EntityAction::Delete.verb(),
        };
        assert_eq!(
            unsupported.user_message(),
            "This action is not available for responses."
        );
        assert!(
            ActionRejected::InFlight(CardId::from("1"))
                .user_message()
                .starts_with("Please wait")
        );
    }

    #[test]
    fn unknown_cards_are_rejected() {
        let mut list = skills();
        let mut actions = ActionController::new(EntityKind::Skill);
        assert!(matches!(
            actions.begin_toggle(&mut list, &CardId::from("99"), true),
            Err(ActionRejected::List(ListError::MissingCard(_)))
        ));
    }

    #[tokio::test]
    async fn mark_read_moves_notification_to_read_status() {
        let mut list = ListController::new(
            vec![CardRecord::new("5", "Deploy finished", "unread").with_label("info")],
            ["unread", "read", "info", "success", "warning", "error"],
        )
        .unwrap();
        let mut actions = ActionController::new(EntityKind::Notification);
        let gateway = ScriptedGateway::new(vec![Ok(ActionAck::ok())]);
        let id = CardId::from("5");

        let pending = actions.begin_mark_read(&list, &id).unwrap();
        let settlement = actions.run(&mut list, &gateway, pending).await;

        assert_eq!(settlement.outcome, Outcome::MarkedRead);
        assert_eq!(list.record(&id).unwrap().status, STATUS_READ);
    }

    #[test]
    fn classify_leaves_list_untouched_until_applied() {
        let mut list = skills();
        let mut actions = ActionController::new(EntityKind::Skill);
        let id = CardId::from("1");
        let dialog = DeleteDialog::open(EntityKind::Skill, list.record(&id).unwrap());
        let pending = actions.begin_delete(&list, dialog.confirm()).unwrap();

        let settlement = actions.classify(&pending, &Ok(ActionAck::ok()));
        assert!(list.record(&id).is_some());
        ActionController::apply(&mut list, &settlement);
        assert!(list.record(&id).is_none());
    }
}
