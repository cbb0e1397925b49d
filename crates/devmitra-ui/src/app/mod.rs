//! Mount points: the server renders each page and marks the parts this crate drives.
//!
//! - `#devmitra-list[data-entity]`: management list. Cards stay in place; the
//!   controls are rendered into a host inserted at the top of the list root.
//! - `[data-editor-modal]`: category or notification editor on a list page.
//! - `[data-upload-area]`: image upload fields.
//! - `[data-tag-selector]`: skills picker on the project form.
//! - `form[data-devmitra-form]`: create/edit forms saved over XHR.
//! - `form[data-detail-form]`, `[data-profile-file]`, `[data-profile-delete]`: profile details page.

use std::rc::Rc;

use crate::components::list_page::{ListPage, ListPageProps};
use crate::components::tag_selector::{TagSelectorField, TagSelectorProps};
use crate::components::toast::NoticeHost;
use crate::components::upload::{UploadArea, UploadAreaProps};
use crate::core::config::UiConfig;
use crate::core::notify::{Notice, NotificationCenter};
use crate::core::store::PageStore;
use crate::core::uploads::UploadMode;
use crate::features::EntityPage;
use crate::services::api::HttpGateway;
use crate::services::dom::{self, now_ms, query_string};
use devmitra_api_models::EntityKind;
use gloo::console;
use gloo::utils::{body, document};
use web_sys::Element;
use yewdux::prelude::Dispatch;

mod details;
mod modals;
mod forms;

const LIST_ROOT: &str = "devmitra-list";
const CONTROLS_CLASS: &str = "devmitra-controls";

fn gateway_for(element: &Element) -> (UiConfig, Rc<HttpGateway>) {
    let config = UiConfig::from_attributes(|name| element.get_attribute(name));
    let csrf = dom::csrf_token(&config.csrf_cookie);
    if csrf.is_none() {
        console::warn!("no CSRF token on the page; mutating requests will be refused");
    }
    let gateway = Rc::new(HttpGateway::new(config.clone(), csrf));
    (config, gateway)
}

fn entity_of(element: &Element) -> Option<EntityKind> {
    let raw = element.get_attribute("data-entity")?;
    match raw.parse() {
        Ok(kind) => Some(kind),
        Err(err) => {
            console::error!(format!("unknown entity '{raw}': {err}"));
            None
        }
    }
}

/// Show a notice in the page's notification slot.
pub(crate) fn notify(notice: Notice) {
    Dispatch::<PageStore>::new().reduce_mut(|store| {
        store.notify(notice, now_ms());
    });
}

fn host_element(class: &str) -> Option<Element> {
    let host = document().create_element("div").ok()?;
    host.set_class_name(class);
    Some(host)
}

fn mount_notices(config: &UiConfig) {
    let ttl_ms = config.notification_ttl_ms;
    Dispatch::<PageStore>::new().reduce_mut(|store| {
        store.notices = NotificationCenter::new(ttl_ms);
    });
    let Some(host) = host_element("devmitra-notices") else {
        return;
    };
    if body().append_child(&host).is_err() {
        console::error!("could not attach the notification host");
        return;
    }
    yew::Renderer::<NoticeHost>::with_root(host).render();
}

fn mount_list(root: &Element, config: UiConfig, gateway: Rc<HttpGateway>) {
    let Some(kind) = entity_of(root) else {
        return;
    };
    let records = dom::read_cards(root);
    Dispatch::<PageStore>::new().reduce_mut(|store| {
        if let Err(err) = store.load(EntityPage::for_kind(kind), records, &query_string()) {
            console::error!(format!("{kind} snapshot rejected: {err}"));
        }
    });
    let Some(host) = host_element(CONTROLS_CLASS) else {
        return;
    };
    if root.insert_before(&host, root.first_child().as_ref()).is_err() {
        console::error!("could not attach the list controls");
        return;
    }
    modals::attach(root, kind, gateway.clone());
    let props = ListPageProps {
        config,
        gateway,
        cards: root.clone(),
        server_empty_state: dom::first(root, "[data-empty-state]").is_some(),
    };
    yew::Renderer::<ListPage>::with_root_and_props(host, props).render();
}

fn mount_uploads() {
    for area in dom::select_all("[data-upload-area]") {
        let mode = match area.get_attribute("data-upload-mode").as_deref() {
            Some("multiple") => UploadMode::Multiple,
            _ => UploadMode::Single,
        };
        let props = UploadAreaProps {
            name: area.get_attribute("data-name").unwrap_or_default(),
            mode,
            prompt: area.get_attribute("data-prompt").unwrap_or_default(),
        };
        area.set_inner_html("");
        yew::Renderer::<UploadArea>::with_root_and_props(area, props).render();
    }
}

fn mount_tag_selectors() {
    for root in dom::select_all("[data-tag-selector]") {
        let options = dom::read_tag_options(&root);
        let preselected = root
            .get_attribute("data-selected")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        let field = root
            .get_attribute("data-tag-selector")
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "skills".to_string());
        root.set_inner_html("");
        yew::Renderer::<TagSelectorField>::with_root_and_props(
            root,
            TagSelectorProps {
                options,
                preselected,
                field,
            },
        )
        .render();
    }
}

fn mount_forms() {
    for form in dom::select_all("form[data-devmitra-form]") {
        let Some(kind) = entity_of(&form) else {
            continue;
        };
        let (_, gateway) = gateway_for(&form);
        forms::attach(&form, kind, gateway);
    }
}

/// Entrypoint invoked by Trunk for wasm32 builds.
pub fn run_app() {
    console_error_panic_hook::set_once();
    let list_root = document().get_element_by_id(LIST_ROOT);
    let settings = list_root
        .clone()
        .or_else(|| document().document_element());
    let Some(settings) = settings else {
        return;
    };
    let (config, gateway) = gateway_for(&settings);
    mount_notices(&config);
    if let Some(root) = list_root {
        mount_list(&root, config, gateway.clone());
    }
    details::attach(&gateway);
    mount_uploads();
    mount_tag_selectors();
    mount_forms();
}
