//! Management page host: toolbar, result count and delete prompt, plus the
//! projection of list state onto the server-rendered cards.
//!
//! # Design
//! - All state lives in [`PageStore`]; this component only forwards events.
//! - Cards keep their server markup; their controls are wired by delegation on the list root.
//! - Requests run on the local executor; results are folded back through the store.

use std::rc::Rc;

use crate::components::delete_modal::DeleteModal;
use crate::components::toolbar::ListToolbar;
use crate::core::actions::{
    Outcome, PendingAction, TRANSPORT_FAILURE_MESSAGE, dispatch as send_action,
};
use crate::core::config::UiConfig;
use crate::core::list::{CardId, SortKey, StatusFilter};
use crate::core::notify::Notice;
use crate::core::store::{CardState, PageStore};
use crate::features::{contact_responses, notifications};
use crate::services::api::HttpGateway;
use crate::services::dom::{self, now_ms};
use devmitra_api_models::EntityKind;
use gloo::console;
use gloo::dialogs::confirm;
use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement};
use yew::platform::spawn_local;
use yew::prelude::*;
use yewdux::prelude::{Dispatch, use_store};

#[derive(Properties, PartialEq)]
pub(crate) struct ListPageProps {
    pub(crate) config: UiConfig,
    pub(crate) gateway: Rc<HttpGateway>,
    /// List root holding the rendered cards.
    pub(crate) cards: Element,
    /// The page renders its own `[data-empty-state]`.
    pub(crate) server_empty_state: bool,
}

fn run_pending(
    dispatch: Dispatch<PageStore>,
    gateway: Rc<HttpGateway>,
    pending: PendingAction,
    fade_ms: u32,
) {
    spawn_local(async move {
        let result = send_action(gateway.as_ref(), &pending).await;
        if let Err(err) = &result {
            console::error!(format!("{} {} failed: {err}", pending.action().verb(), pending.id()));
        }
        let mut settled = None;
        dispatch.reduce_mut(|store| settled = store.finish(&pending, &result, now_ms()));
        if let Some(settlement) = settled.filter(|settlement| settlement.outcome == Outcome::Removed) {
            let id = settlement.id;
            Timeout::new(fade_ms, move || {
                dispatch.reduce_mut(|store| store.complete_removal(&id));
            })
            .forget();
        }
    });
}

fn start(
    dispatch: &Dispatch<PageStore>,
    gateway: &Rc<HttpGateway>,
    fade_ms: u32,
    begin: impl FnOnce(&mut PageStore) -> Option<PendingAction>,
) -> bool {
    let mut pending = None;
    dispatch.reduce_mut(|store| pending = begin(store));
    pending.is_some_and(|pending| {
        run_pending(dispatch.clone(), gateway.clone(), pending, fade_ms);
        true
    })
}

// `(data-action, card id, control)` for an event raised inside a card.
fn card_action(event: &Event) -> Option<(String, CardId, Element)> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let control = target.closest("[data-action]").ok()??;
    let card = control.closest("[data-id]").ok()??;
    let action = control.get_attribute("data-action")?;
    let id = card.get_attribute("data-id")?;
    Some((action, CardId::new(id), control))
}

fn mark_responded(store: &mut PageStore, id: &CardId) {
    let notice = store
        .state
        .as_mut()
        .map(|state| contact_responses::mark_responded(&mut state.list, id));
    match notice {
        Some(Ok(notice)) => {
            store.notify(notice, now_ms());
        }
        Some(Err(err)) => console::warn!(err.to_string()),
        None => {}
    }
}

fn wire_cards(
    root: &Element,
    dispatch: &Dispatch<PageStore>,
    gateway: &Rc<HttpGateway>,
    fade_ms: u32,
) -> [EventListener; 2] {
    let click = {
        let dispatch = dispatch.clone();
        let gateway = gateway.clone();
        let options = EventListenerOptions::enable_prevent_default();
        EventListener::new_with_options(root, "click", options, move |event| {
            let Some((action, id, _)) = card_action(event) else {
                return;
            };
            match action.as_str() {
                "delete" => {
                    event.prevent_default();
                    dispatch.reduce_mut(|store| {
                        store.open_delete(&id);
                    });
                }
                "mark-read" => {
                    event.prevent_default();
                    start(&dispatch, &gateway, fade_ms, |store| {
                        store.start_mark_read(&id, now_ms())
                    });
                }
                "mark-responded" => {
                    event.prevent_default();
                    dispatch.reduce_mut(|store| mark_responded(store, &id));
                }
                _ => {}
            }
        })
    };
    let change = {
        let dispatch = dispatch.clone();
        let gateway = gateway.clone();
        EventListener::new(root, "change", move |event| {
            let Some((action, id, control)) = card_action(event) else {
                return;
            };
            let Ok(input) = control.dyn_into::<HtmlInputElement>() else {
                return;
            };
            if action != "toggle" {
                return;
            }
            let requested = input.checked();
            let started = start(&dispatch, &gateway, fade_ms, |store| {
                store.start_toggle(&id, requested, now_ms())
            });
            if !started {
                input.set_checked(!requested);
            }
        })
    };
    [click, change]
}

#[function_component(ListPage)]
pub(crate) fn list_page(props: &ListPageProps) -> Html {
    let (store, dispatch) = use_store::<PageStore>();
    let fade_ms = props.config.delete_animation_ms;

    {
        let dispatch = dispatch.clone();
        let gateway = props.gateway.clone();
        use_effect_with_deps(
            move |root: &Element| {
                let listeners = wire_cards(root, &dispatch, &gateway, fade_ms);
                move || drop(listeners)
            },
            props.cards.clone(),
        );
    }
    {
        let cards = store.state.is_some().then(|| store.card_states());
        let empty = store
            .state
            .as_ref()
            .is_some_and(|state| state.list.view().empty_state());
        use_effect_with_deps(
            move |(root, cards, empty): &(Element, Option<Vec<CardState>>, bool)| {
                if let Some(cards) = cards {
                    dom::project_cards(root, cards);
                    dom::show_empty_state(root, *empty);
                }
                || ()
            },
            (props.cards.clone(), cards, empty),
        );
    }

    let on_search = dispatch.reduce_mut_callback_with(|store, search: String| {
        if let Some(state) = store.state.as_mut() {
            state.list.set_search(search);
        }
    });
    let on_filter = dispatch.reduce_mut_callback_with(|store, value: String| {
        if let Some(state) = store.state.as_mut() {
            state.list.set_filter(StatusFilter::from_value(&value));
        }
    });
    let on_sort = dispatch.reduce_mut_callback_with(|store, value: String| {
        if let Some(state) = store.state.as_mut() {
            state.list.set_sort(SortKey::from_value(&value));
        }
    });
    let on_cancel = dispatch.reduce_mut_callback(PageStore::cancel_delete);
    let on_confirm = {
        let dispatch = dispatch.clone();
        let gateway = props.gateway.clone();
        Callback::from(move |()| {
            start(&dispatch, &gateway, fade_ms, |store| store.confirm_delete(now_ms()));
        })
    };
    let on_mark_all = {
        let dispatch = dispatch.clone();
        let gateway = props.gateway.clone();
        let prompt = store
            .state
            .as_ref()
            .and_then(|state| notifications::mark_all_read_prompt(&state.list));
        Callback::from(move |_: MouseEvent| {
            let Some(prompt) = prompt else {
                return;
            };
            if !confirm(prompt) {
                return;
            }
            let dispatch = dispatch.clone();
            let gateway = gateway.clone();
            spawn_local(async move {
                let result = gateway.mark_all_read().await;
                dispatch.reduce_mut(|store| {
                    let notice = match (&result, store.state.as_mut()) {
                        (Ok(ack), Some(state)) if ack.success => {
                            notifications::mark_all_read(&mut state.list)
                        }
                        (Ok(ack), _) => Notice::error(
                            ack.reason()
                                .unwrap_or("Failed to mark notifications as read."),
                        ),
                        (Err(_), _) => Notice::error(TRANSPORT_FAILURE_MESSAGE),
                    };
                    store.notify(notice, now_ms());
                });
            });
        })
    };

    let Some(state) = store.state.as_ref() else {
        let message = store
            .load_error
            .clone()
            .unwrap_or_else(|| "Nothing to show".to_string());
        return html! {
            <div class="empty-state load-error" role="alert">{message}</div>
        };
    };

    let page = state.page;
    let list = &state.list;
    let view = list.view();
    let filters = list.filter_options(page.filters);
    let mark_all = (page.kind == EntityKind::Notification
        && notifications::unread_count(list) > 0)
        .then(|| {
            html! {
                <button type="button" class="btn btn-secondary mark-all-read" onclick={on_mark_all}>
                    {"Mark all as read"}
                </button>
            }
        });
    let empty_state = (view.empty_state() && !props.server_empty_state).then(|| {
        html! {
            <div class="empty-state" id="no-results">
                <h3>{page.empty_title}</h3>
                <p>{page.empty_hint}</p>
            </div>
        }
    });

    html! {
        <div class="list-controls" data-entity={page.kind.segment()}>
            <div class="list-summary">
                <span class="result-count">{format!("{} of {}", view.visible_count(), view.total)}</span>
                {for mark_all}
            </div>
            <ListToolbar
                search={list.query().search.clone()}
                placeholder={page.search_placeholder}
                {filters}
                sorts={page.sorts}
                sort={list.query().sort}
                {on_search}
                {on_filter}
                {on_sort}
            />
            {for empty_state}
            <DeleteModal dialog={store.dialog.clone()} {on_confirm} {on_cancel} />
        </div>
    }
}
