//! Profile details page: section forms, file uploads and confirmed file deletes.

use std::rc::Rc;

use crate::core::actions::TRANSPORT_FAILURE_MESSAGE;
use crate::core::forms::SubmitGuard;
use crate::core::notify::Notice;
use crate::core::profile::{
    FileEffect, FileOutcome, PROFILE_PLACEHOLDER, RELOAD_DELAY_MS, delete_outcome, delete_prompt,
    section_notice, upload_outcome,
};
use crate::services::api::HttpGateway;
use crate::services::dom::{self, reload_page};
use devmitra_api_models::{DetailForm, FormSaveResponse, ProfileFile, profile_delete_form};
use gloo::console;
use gloo::dialogs::confirm;
use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use gloo::utils::window;
use wasm_bindgen::JsCast;
use web_sys::{Element, FormData, HtmlFormElement, HtmlInputElement};
use yew::platform::spawn_local;

use super::notify;

const PREVIEW_SELECTOR: &str = "[data-profile-preview]";

fn page_url() -> Option<String> {
    window().location().href().ok()
}

fn parse_attr<T: std::str::FromStr>(element: &Element, name: &str) -> Option<T> {
    let raw = element.get_attribute(name)?;
    let parsed = raw.parse().ok();
    if parsed.is_none() {
        console::warn!(format!("unknown {name} '{raw}'"));
    }
    parsed
}

/// Wire every profile section form and file control on the page.
pub(super) fn attach(gateway: &Rc<HttpGateway>) {
    for form in dom::select_all("form[data-detail-form]") {
        let Some(section) = parse_attr::<DetailForm>(&form, "data-detail-form") else {
            continue;
        };
        if let Ok(form) = form.dyn_into::<HtmlFormElement>() {
            attach_section(form, section, gateway.clone());
        }
    }
    for input in dom::select_all("input[data-profile-file]") {
        let Some(file) = parse_attr::<ProfileFile>(&input, "data-profile-file") else {
            continue;
        };
        if let Ok(input) = input.dyn_into::<HtmlInputElement>() {
            attach_upload(input, file, gateway.clone());
        }
    }
    for button in dom::select_all("[data-profile-delete]") {
        let Some(file) = parse_attr::<ProfileFile>(&button, "data-profile-delete") else {
            continue;
        };
        attach_delete(&button, file, gateway.clone());
    }
}

fn attach_section(form: HtmlFormElement, section: DetailForm, gateway: Rc<HttpGateway>) {
    let guard = SubmitGuard::shared();
    let target = form.clone();
    let options = EventListenerOptions::enable_prevent_default();
    EventListener::new_with_options(&form, "submit", options, move |event| {
        event.prevent_default();
        let Some(permit) = guard.begin() else {
            return;
        };
        let Ok(data) = FormData::new_with_form(&target) else {
            console::error!("could not read form data");
            return;
        };
        if data.set_with_str("form_type", section.form_type()).is_err() {
            return;
        }
        let action = target.action();
        let gateway = gateway.clone();
        spawn_local(async move {
            let notice = match gateway.submit_form::<FormSaveResponse>(&action, data).await {
                Ok(response) => section_notice(section, &response),
                Err(err) => {
                    console::error!(format!("saving {} failed: {err}", section.form_type()));
                    Notice::error(TRANSPORT_FAILURE_MESSAGE)
                }
            };
            notify(notice);
            drop(permit);
        });
    })
    .forget();
}

fn upload_data(input: &HtmlInputElement, file: ProfileFile) -> Option<FormData> {
    let picked = input.files()?.get(0)?;
    let data = match input.form() {
        Some(form) => FormData::new_with_form(&form),
        None => FormData::new(),
    }
    .ok()?;
    data.set_with_str("form_type", file.upload_form_type()).ok()?;
    data.set_with_blob(file.field(), &picked).ok()?;
    Some(data)
}

fn attach_upload(input: HtmlInputElement, file: ProfileFile, gateway: Rc<HttpGateway>) {
    let guard = SubmitGuard::shared();
    let source = input.clone();
    EventListener::new(&input, "change", move |_| {
        let Some(data) = upload_data(&source, file) else {
            return;
        };
        let Some(permit) = guard.begin() else {
            return;
        };
        let gateway = gateway.clone();
        let source = source.clone();
        spawn_local(async move {
            let outcome = match post_to_page(&gateway, data).await {
                Some(response) => upload_outcome(file, &response),
                None => transport_outcome(),
            };
            source.set_value("");
            apply(outcome);
            drop(permit);
        });
    })
    .forget();
}

fn attach_delete(button: &Element, file: ProfileFile, gateway: Rc<HttpGateway>) {
    let guard = SubmitGuard::shared();
    let options = EventListenerOptions::enable_prevent_default();
    EventListener::new_with_options(button, "click", options, move |event| {
        event.prevent_default();
        if guard.is_busy() || !confirm(&delete_prompt(file)) {
            return;
        }
        let Some(permit) = guard.begin() else {
            return;
        };
        let Ok(data) = FormData::new() else {
            return;
        };
        for (name, value) in profile_delete_form(file) {
            if data.append_with_str(&name, &value).is_err() {
                return;
            }
        }
        let gateway = gateway.clone();
        spawn_local(async move {
            let outcome = match post_to_page(&gateway, data).await {
                Some(response) => delete_outcome(file, &response),
                None => transport_outcome(),
            };
            apply(outcome);
            drop(permit);
        });
    })
    .forget();
}

async fn post_to_page(gateway: &HttpGateway, data: FormData) -> Option<FormSaveResponse> {
    let url = page_url()?;
    match gateway.submit_form::<FormSaveResponse>(&url, data).await {
        Ok(response) => Some(response),
        Err(err) => {
            console::error!(format!("profile file request failed: {err}"));
            None
        }
    }
}

fn transport_outcome() -> FileOutcome {
    FileOutcome {
        notice: Notice::error(TRANSPORT_FAILURE_MESSAGE),
        effect: FileEffect::Nothing,
    }
}

fn set_preview(source: impl Fn(&Element) -> String) {
    for preview in dom::select_all(PREVIEW_SELECTOR) {
        if preview.set_attribute("src", &source(&preview)).is_err() {
            console::warn!("could not update the profile preview");
        }
    }
}

fn apply(outcome: FileOutcome) {
    notify(outcome.notice);
    match outcome.effect {
        FileEffect::Nothing => {}
        FileEffect::ShowImage(url) => set_preview(|_| url.clone()),
        FileEffect::ResetImage => set_preview(|preview| {
            preview
                .get_attribute("data-placeholder")
                .unwrap_or_else(|| PROFILE_PLACEHOLDER.to_string())
        }),
        FileEffect::Reload => Timeout::new(RELOAD_DELAY_MS, reload_page).forget(),
    }
}
