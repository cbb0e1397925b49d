//! XHR saving for create/edit forms plus the small field helpers they carry.

use std::cell::Cell;
use std::rc::Rc;

use crate::core::forms::{
    FormValues, SubmitGuard, SubmitIntent, proficiency_label, required_fields, save_outcome,
    save_transport_failure, slugify,
};
use crate::services::api::HttpGateway;
use crate::services::dom::{js_value, navigate, set_disabled, set_js_value};
use devmitra_api_models::{EntityKind, FormSaveResponse};
use gloo::console;
use gloo::dialogs::alert;
use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{Element, FormData, HtmlFormElement, HtmlInputElement, SubmitEvent};
use yew::platform::spawn_local;

const CURRENT_FLAG: &str = "is_current";
const END_DATE: &str = "end_date";

fn field(form: &Element, name: &str) -> Option<Element> {
    form.query_selector(&format!("[name=\"{name}\"]")).ok().flatten()
}

fn checked(form: &Element, name: &str) -> bool {
    field(form, name)
        .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
        .is_some_and(|input| input.checked())
}

/// Text entries of `data` in submission order. Repeated names are kept; files are skipped.
pub(super) fn values_of(data: &FormData) -> FormValues {
    let mut values = FormValues::new();
    let Ok(Some(entries)) = js_sys::try_iter(data) else {
        return values;
    };
    for entry in entries.flatten() {
        let pair = js_sys::Array::from(&entry);
        if let (Some(name), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) {
            values.append(&name, value);
        }
    }
    values
}

// Only rewritten fields go back, so multi-valued fields such as `skills` keep every entry.
fn write_back(data: &FormData, changes: &[(String, String)]) {
    for (name, value) in changes {
        if data.set_with_str(name, value).is_err() {
            console::warn!(format!("could not set form field {name}"));
        }
    }
}

/// Attach the submit handler and field helpers to `form`.
pub(super) fn attach(form: &Element, kind: EntityKind, gateway: Rc<HttpGateway>) {
    let Some(form) = form.clone().dyn_into::<HtmlFormElement>().ok() else {
        return;
    };
    attach_slug(&form);
    attach_proficiency(&form);
    attach_current_flag(&form);

    let target = form.clone();
    let guard = SubmitGuard::shared();
    let options = EventListenerOptions::enable_prevent_default();
    EventListener::new_with_options(&form, "submit", options, move |event| {
        event.prevent_default();
        let Some(permit) = guard.begin() else {
            return;
        };
        let submitter = event
            .dyn_ref::<SubmitEvent>()
            .and_then(SubmitEvent::submitter);
        let intent = submitter
            .as_ref()
            .and_then(|button| js_value(button))
            .map_or(SubmitIntent::Publish, |value| SubmitIntent::from_button(&value));
        let Ok(data) = FormData::new_with_form(&target) else {
            console::error!("could not read form data");
            return;
        };

        let mut values = values_of(&data);
        let before = values.clone();
        match kind {
            EntityKind::Project => intent.apply_status(&mut values),
            EntityKind::Achievement => intent.apply_flags(&mut values),
            EntityKind::Experience => values.clear_when(checked(&target, CURRENT_FLAG), END_DATE),
            _ => {}
        }
        if let Err(err) = values.require(required_fields(kind)) {
            alert(&err.to_string());
            return;
        }
        write_back(&data, &values.changes_since(&before));

        if let Some(button) = &submitter {
            set_disabled(button, true);
        }
        let action = target.action();
        let gateway = gateway.clone();
        let draft = intent == SubmitIntent::SaveDraft;
        spawn_local(async move {
            match gateway.submit_form::<FormSaveResponse>(&action, data).await {
                Ok(response) => {
                    let outcome = save_outcome(kind, &response, draft);
                    alert(&outcome.notice.message);
                    if let Some(url) = outcome.redirect_url {
                        navigate(&url);
                    }
                }
                Err(err) => {
                    console::error!(format!("saving {kind} failed: {err}"));
                    alert(&save_transport_failure(kind).message);
                }
            }
            if let Some(button) = submitter {
                set_disabled(&button, false);
            }
            drop(permit);
        });
    })
    .forget();
}

// Category slugs follow the name until the user edits the slug directly.
pub(super) fn attach_slug(form: &HtmlFormElement) {
    let (Some(name), Some(slug)) = (field(form, "name"), field(form, "slug")) else {
        return;
    };
    let manual = Rc::new(Cell::new(js_value(&slug).is_some_and(|value| !value.is_empty())));
    {
        let manual = manual.clone();
        EventListener::new(&slug, "input", move |_| manual.set(true)).forget();
    }
    let source = name.clone();
    EventListener::new(&name, "input", move |_| {
        if !manual.get() {
            set_js_value(&slug, &slugify(&js_value(&source).unwrap_or_default()));
        }
    })
    .forget();
}

fn attach_proficiency(form: &HtmlFormElement) {
    let Some(slider) = field(form, "proficiency") else {
        return;
    };
    let Some(label) = form.query_selector("[data-proficiency-label]").ok().flatten() else {
        return;
    };
    let source = slider.clone();
    EventListener::new(&slider, "input", move |_| {
        let value = js_value(&source)
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .unwrap_or_default();
        label.set_text_content(Some(&proficiency_label(value)));
    })
    .forget();
}

fn attach_current_flag(form: &HtmlFormElement) {
    let (Some(flag), Some(end)) = (field(form, CURRENT_FLAG), field(form, END_DATE)) else {
        return;
    };
    let Ok(end) = end.dyn_into::<HtmlInputElement>() else {
        return;
    };
    let sync = move |current: bool| {
        end.set_disabled(current);
        if current {
            end.set_value("");
        }
    };
    let Ok(input) = flag.clone().dyn_into::<HtmlInputElement>() else {
        return;
    };
    sync(input.checked());
    EventListener::new(&flag, "change", move |_| sync(input.checked())).forget();
}
