//! Category and notification edit modals over the server-rendered `[data-editor-modal]`.
//!
//! Openers: `[data-editor-open]` for a new entry, `[data-action="edit"]` inside a card.
//! Closers: `[data-editor-close]` or a click on the modal backdrop.

use std::rc::Rc;

use crate::core::actions::TRANSPORT_FAILURE_MESSAGE;
use crate::core::editors::{
    CategoryDraft, NotificationDraft, category_lookup_failure, category_record,
    category_save_notice, notification_save_failure,
};
use crate::core::forms::{FormValues, SubmitGuard, required_fields};
use crate::core::notify::Notice;
use crate::core::store::PageStore;
use crate::services::api::HttpGateway;
use crate::services::dom::{self, reload_page};
use devmitra_api_models::{CategoryData, EntityKind};
use gloo::console;
use gloo::dialogs::alert;
use gloo::events::{EventListener, EventListenerOptions};
use gloo::utils::document;
use wasm_bindgen::JsCast;
use web_sys::{Element, FormData, HtmlFormElement};
use yew::platform::spawn_local;
use yewdux::prelude::Dispatch;

use super::forms::{attach_slug, values_of};
use super::notify;

const OPEN_CLASS: &str = "open";

#[derive(Clone)]
struct Modal {
    shell: Element,
    form: HtmlFormElement,
}

impl Modal {
    fn find() -> Option<Self> {
        let shell = dom::select_all("[data-editor-modal]").into_iter().next()?;
        let form = dom::first(&shell, "form")?.dyn_into::<HtmlFormElement>().ok()?;
        Some(Self { shell, form })
    }

    fn show(&self, heading: &str, fields: &FormValues) {
        self.form.reset();
        dom::fill_form(&self.form, fields);
        if let Some(title) = dom::first(&self.shell, "[data-editor-heading]") {
            title.set_text_content(Some(heading));
        }
        dom::set_class(&self.shell, OPEN_CLASS, true);
    }

    fn close(&self) {
        dom::set_class(&self.shell, OPEN_CLASS, false);
        self.form.reset();
    }
}

enum Opened {
    New,
    Edit(String),
    Close,
}

fn opened_by(event: &web_sys::Event, modal: &Modal) -> Option<Opened> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    if target.closest("[data-editor-open]").ok()?.is_some() {
        return Some(Opened::New);
    }
    if let Some(control) = target.closest("[data-action=\"edit\"]").ok()? {
        let card = control.closest("[data-id]").ok()??;
        return card.get_attribute("data-id").map(Opened::Edit);
    }
    let closer = target.closest("[data-editor-close]").ok()?.is_some();
    (closer || target == modal.shell).then_some(Opened::Close)
}

/// Wire the editor modal of a category or notification list page.
pub(super) fn attach(root: &Element, kind: EntityKind, gateway: Rc<HttpGateway>) {
    if !matches!(kind, EntityKind::Category | EntityKind::Notification) {
        return;
    }
    let Some(modal) = Modal::find() else {
        return;
    };
    if kind == EntityKind::Category {
        attach_slug(&modal.form);
    }
    attach_openers(&modal, kind, gateway.clone());
    attach_save(&modal, root, kind, gateway);
}

fn attach_openers(modal: &Modal, kind: EntityKind, gateway: Rc<HttpGateway>) {
    let modal = modal.clone();
    let options = EventListenerOptions::enable_prevent_default();
    EventListener::new_with_options(&document(), "click", options, move |event| {
        let Some(opened) = opened_by(event, &modal) else {
            return;
        };
        event.prevent_default();
        match (opened, kind) {
            (Opened::Close, _) => modal.close(),
            (Opened::New, EntityKind::Category) => {
                let draft = CategoryDraft::blank();
                modal.show(draft.heading(), &draft.fields());
            }
            (Opened::New, _) => {
                let draft = NotificationDraft::blank();
                modal.show(draft.heading(), &draft.fields());
            }
            (Opened::Edit(id), EntityKind::Category) => {
                spawn_local(open_category(modal.clone(), gateway.clone(), id));
            }
            (Opened::Edit(id), _) => {
                spawn_local(open_notification(modal.clone(), gateway.clone(), id));
            }
        }
    })
    .forget();
}

async fn open_category(modal: Modal, gateway: Rc<HttpGateway>, id: String) {
    match gateway.fetch_category(&id).await {
        Ok(reply) => match reply.category.as_ref().filter(|_| reply.success) {
            Some(category) => {
                let draft = CategoryDraft::from_data(category);
                modal.show(draft.heading(), &draft.fields());
            }
            None => notify(category_lookup_failure(&reply)),
        },
        Err(err) => {
            console::error!(format!("loading category {id} failed: {err}"));
            notify(Notice::error(TRANSPORT_FAILURE_MESSAGE));
        }
    }
}

async fn open_notification(modal: Modal, gateway: Rc<HttpGateway>, id: String) {
    match gateway.fetch_notification(&id).await {
        Ok(reply) => match reply.notification.as_ref().filter(|_| reply.success) {
            Some(notification) => {
                let draft = NotificationDraft::from_data(notification);
                modal.show(draft.heading(), &draft.fields());
            }
            None => notify(Notice::error(
                reply
                    .message
                    .unwrap_or_else(|| "Failed to load notification".to_string()),
            )),
        },
        Err(err) => {
            console::error!(format!("loading notification {id} failed: {err}"));
            notify(Notice::error(TRANSPORT_FAILURE_MESSAGE));
        }
    }
}

fn attach_save(modal: &Modal, root: &Element, kind: EntityKind, gateway: Rc<HttpGateway>) {
    let guard = SubmitGuard::shared();
    let form = modal.form.clone();
    let modal = modal.clone();
    let root = root.clone();
    let options = EventListenerOptions::enable_prevent_default();
    EventListener::new_with_options(&form, "submit", options, move |event| {
        event.prevent_default();
        let Some(permit) = guard.begin() else {
            return;
        };
        let Ok(data) = FormData::new_with_form(&modal.form) else {
            console::error!("could not read form data");
            return;
        };
        if let Err(err) = values_of(&data).require(required_fields(kind)) {
            notify(Notice::error(err.to_string()));
            return;
        }
        let modal = modal.clone();
        let root = root.clone();
        let gateway = gateway.clone();
        spawn_local(async move {
            if kind == EntityKind::Category {
                save_category(&modal, &root, &gateway, data).await;
            } else {
                save_notification(&gateway, data).await;
            }
            drop(permit);
        });
    })
    .forget();
}

async fn save_category(modal: &Modal, root: &Element, gateway: &HttpGateway, data: FormData) {
    let reply = match gateway.save_category(data).await {
        Ok(reply) => reply,
        Err(err) => {
            console::error!(format!("saving category failed: {err}"));
            notify(Notice::error(TRANSPORT_FAILURE_MESSAGE));
            return;
        }
    };
    notify(category_save_notice(&reply));
    if !reply.success {
        return;
    }
    modal.close();
    match reply.category {
        Some(category) => place_category(root, &category),
        None => reload_page(),
    }
}

// An updated category rewrites its card; a created one clones an existing card as its shell.
fn place_category(root: &Element, category: &CategoryData) {
    let card = dom::card_element(root, &category.id).or_else(|| dom::clone_card(root, &category.id));
    let Some(card) = card else {
        reload_page();
        return;
    };
    dom::fill_category_card(&card, category);
    Dispatch::<PageStore>::new().reduce_mut(|store| {
        if let Some(state) = store.state.as_mut() {
            if let Err(err) = state.list.upsert(category_record(category)) {
                console::warn!(format!("category card not tracked: {err}"));
            }
        }
    });
}

async fn save_notification(gateway: &HttpGateway, data: FormData) {
    match gateway.save_notification(data).await {
        Ok(response) => match notification_save_failure(&response) {
            Some(message) => alert(&message),
            None => reload_page(),
        },
        Err(err) => {
            console::error!(format!("saving notification failed: {err}"));
            alert("Error saving notification");
        }
    }
}
