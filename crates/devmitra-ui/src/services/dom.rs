//! Readers and writers for server-rendered markup.
//!
//! # Design
//! - Cards stay the server's elements; the store's [`CardState`] is projected onto them.
//! - Order changes move existing nodes; nothing is re-rendered from scratch.

use std::collections::BTreeMap;

use gloo::console;
use gloo::utils::document;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlDocument, HtmlInputElement};

use crate::core::csrf::{self, CsrfToken};
use crate::core::editors::item_count_label;
use crate::core::forms::FormValues;
use crate::core::list::{CardAttributes, CardRecord};
use crate::core::selection::TagOption;
use crate::core::store::CardState;
use devmitra_api_models::{CSRF_FORM_FIELD, CategoryData};

const CARD_SELECTOR: &str = "[data-id]";
const SEARCHABLE_SELECTOR: &str = "[data-search]";
const ACTION_SELECTOR: &str = "[data-action]";
pub(crate) const HIDDEN: &str = "hidden";

fn elements(root: &Element, selector: &str) -> Vec<Element> {
    let Ok(nodes) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Every element in the document matching `selector`.
pub(crate) fn select_all(selector: &str) -> Vec<Element> {
    document()
        .document_element()
        .map(|root| elements(&root, selector))
        .unwrap_or_default()
}

fn attr(element: &Element, name: &str) -> Option<String> {
    element.get_attribute(name)
}

/// First element below `root` matching `selector`.
pub(crate) fn first(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

/// Add or remove one class.
pub(crate) fn set_class(element: &Element, class: &str, on: bool) {
    if element.class_list().toggle_with_force(class, on).is_err() {
        console::warn!(format!("could not toggle class {class}"));
    }
}

fn set_attr(element: &Element, name: &str, value: &str) {
    if element.set_attribute(name, value).is_err() {
        console::warn!(format!("could not set {name}"));
    }
}

/// Set or clear the `disabled` attribute.
pub(crate) fn set_disabled(element: &Element, disabled: bool) {
    let result = if disabled {
        element.set_attribute("disabled", "")
    } else {
        element.remove_attribute("disabled")
    };
    if result.is_err() {
        console::warn!("could not change disabled state");
    }
}

fn action_control(card: &Element, action: &str) -> Option<Element> {
    first(card, &format!("[data-action=\"{action}\"]"))
}

/// Project the store's card states onto the cards rendered under `root`.
///
/// Cards are re-appended in state order, so hidden ones trail the visible
/// ones. Cards whose id is no longer listed are removed.
pub(crate) fn project_cards(root: &Element, states: &[CardState]) {
    let mut cards: BTreeMap<String, Element> = elements(root, CARD_SELECTOR)
        .into_iter()
        .filter_map(|card| Some((attr(&card, "data-id")?, card)))
        .collect();
    for state in states {
        let Some(card) = cards.remove(state.id.as_str()) else {
            console::warn!(format!("no rendered card for {}", state.id));
            continue;
        };
        if let Some(parent) = card.parent_node() {
            if parent.append_child(&card).is_err() {
                console::warn!(format!("could not move card {}", state.id));
            }
        }
        set_class(&card, HIDDEN, !state.visible);
        set_class(&card, "inactive", state.inactive);
        set_class(&card, "removing", state.leaving);
        set_attr(&card, "data-status", &state.status);
        for control in elements(&card, ACTION_SELECTOR) {
            set_disabled(&control, state.busy);
        }
        if let Some(toggle) = action_control(&card, "toggle")
            .and_then(|control| control.dyn_into::<HtmlInputElement>().ok())
        {
            toggle.set_checked(state.checked);
        }
        if let Some(button) = action_control(&card, "mark-read") {
            set_class(&button, HIDDEN, !state.can_mark_read);
        }
        if let Some(button) = action_control(&card, "mark-responded") {
            set_class(&button, HIDDEN, !state.can_mark_responded);
        }
        if let Some(label) = first(&card, "[data-status-label]") {
            label.set_text_content(Some(&state.status));
        }
    }
    for (id, orphan) in cards {
        tracing::debug!(%id, "card removed from the page");
        orphan.remove();
    }
}

/// Show the server's empty state and hide the grid, or the reverse.
/// Returns `false` when the page renders no `[data-empty-state]` of its own.
pub(crate) fn show_empty_state(root: &Element, empty: bool) -> bool {
    if let Some(grid) = first(root, "[data-card-grid]") {
        set_class(&grid, HIDDEN, empty);
    }
    first(root, "[data-empty-state]").is_some_and(|state| {
        set_class(&state, HIDDEN, !empty);
        true
    })
}

/// Card element for `id` under `root`.
pub(crate) fn card_element(root: &Element, id: &str) -> Option<Element> {
    elements(root, CARD_SELECTOR)
        .into_iter()
        .find(|card| attr(card, "data-id").as_deref() == Some(id))
}

/// Copy an existing card as the shell for a newly created one.
pub(crate) fn clone_card(root: &Element, id: &str) -> Option<Element> {
    let model = first(root, CARD_SELECTOR)?;
    let copy = model.clone_node_with_deep(true).ok()?.dyn_into::<Element>().ok()?;
    set_attr(&copy, "data-id", id);
    model.parent_node()?.append_child(&copy).ok()?;
    Some(copy)
}

fn set_field_text(card: &Element, field: &str, text: &str) {
    if let Some(element) = first(card, &format!("[data-field=\"{field}\"]")) {
        element.set_text_content(Some(text));
    }
}

/// Rewrite a category card from a save reply.
pub(crate) fn fill_category_card(card: &Element, data: &CategoryData) {
    set_attr(card, "data-title", &data.name);
    set_attr(card, "data-status", &data.category_type);
    set_attr(card, "data-secondary", &data.slug);
    set_field_text(card, "name", &data.name);
    set_field_text(
        card,
        "category_type",
        data.category_type_display.as_deref().unwrap_or(&data.category_type),
    );
    set_field_text(card, "description", &data.description);
    if let Some(count) = data.item_count {
        set_field_text(card, "item_count", &item_count_label(count));
    }
    if let Some(badge) = first(card, "[data-field=\"icon\"]") {
        if !data.color.is_empty() {
            set_attr(
                &badge,
                "style",
                &format!("background-color: {0}20; color: {0};", data.color),
            );
        }
        if let Some(glyph) = first(&badge, "i") {
            set_attr(&glyph, "class", &data.icon);
        }
    }
}

/// Write `values` into the named controls of `form`.
pub(crate) fn fill_form(form: &Element, values: &FormValues) {
    for (name, value) in values.fields() {
        match first(form, &format!("[name=\"{name}\"]")) {
            Some(control) => set_js_value(&control, value),
            None => tracing::debug!(%name, "form has no such field"),
        }
    }
}

/// Navigate to `url`.
pub(crate) fn navigate(url: &str) {
    if gloo::utils::window().location().set_href(url).is_err() {
        console::error!(format!("could not navigate to {url}"));
    }
}

/// Reload the current page.
pub(crate) fn reload_page() {
    if gloo::utils::window().location().reload().is_err() {
        console::error!("could not reload the page");
    }
}

/// Read every card rendered under `root`.
pub(crate) fn read_cards(root: &Element) -> Vec<CardRecord> {
    elements(root, CARD_SELECTOR)
        .iter()
        .map(|card| {
            let mut secondary: Vec<String> = attr(card, "data-secondary").into_iter().collect();
            secondary.extend(
                elements(card, SEARCHABLE_SELECTOR)
                    .iter()
                    .filter_map(|element| element.text_content()),
            );
            CardRecord::from_attributes(CardAttributes {
                id: attr(card, "data-id").unwrap_or_default(),
                title: attr(card, "data-title").unwrap_or_default(),
                date: attr(card, "data-date"),
                status: attr(card, "data-status").unwrap_or_default(),
                secondary,
                metric: attr(card, "data-metric").or_else(|| attr(card, "data-proficiency")),
                labels: attr(card, "data-labels"),
                active: attr(card, "data-active"),
            })
        })
        .collect()
}

/// Read `[data-option]` entries for a tag selector.
pub(crate) fn read_tag_options(root: &Element) -> Vec<TagOption> {
    elements(root, "[data-option]")
        .iter()
        .filter_map(|option| {
            Some(TagOption {
                name: attr(option, "data-option")?,
                icon: attr(option, "data-icon").unwrap_or_default(),
            })
        })
        .collect()
}

/// CSRF token from the cookie jar or the page's hidden form field.
pub(crate) fn csrf_token(cookie_name: &str) -> Option<CsrfToken> {
    let cookies = document()
        .dyn_into::<HtmlDocument>()
        .ok()
        .and_then(|doc| doc.cookie().ok())
        .unwrap_or_default();
    let field = document()
        .query_selector(&format!("[name=\"{CSRF_FORM_FIELD}\"]"))
        .ok()
        .flatten()
        .and_then(|input| js_value(&input));
    csrf::resolve(&cookies, cookie_name, field.as_deref())
}

/// `value` property of a form control.
pub(crate) fn js_value(element: &Element) -> Option<String> {
    js_sys::Reflect::get(element, &"value".into())
        .ok()
        .and_then(|value| value.as_string())
}

/// Set the `value` property of a form control.
pub(crate) fn set_js_value(element: &Element, value: &str) {
    if js_sys::Reflect::set(element, &"value".into(), &value.into()).is_err() {
        gloo::console::warn!("could not set form value");
    }
}

/// Page query string including the leading `?`.
pub(crate) fn query_string() -> String {
    gloo::utils::window().location().search().unwrap_or_default()
}

/// Milliseconds since the epoch from the browser clock.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn now_ms() -> u64 {
    js_sys::Date::now().max(0.0) as u64
}
