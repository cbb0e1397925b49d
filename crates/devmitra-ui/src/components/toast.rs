use crate::core::notify::Toast;
use crate::core::store::PageStore;
use crate::services::dom::now_ms;
use gloo::timers::callback::Timeout;
use yew::prelude::*;
use yewdux::prelude::use_store;

#[derive(Properties, PartialEq)]
pub(crate) struct ToastHostProps {
    pub(crate) toast: Option<Toast>,
    /// Fired with the toast's deadline once it has passed.
    pub(crate) on_expire: Callback<u64>,
    pub(crate) on_dismiss: Callback<u64>,
}

#[function_component(ToastHost)]
pub(crate) fn toast_host(props: &ToastHostProps) -> Html {
    {
        let on_expire = props.on_expire.clone();
        use_effect_with_deps(
            move |toast: &Option<Toast>| {
                let handle = toast.as_ref().map(|toast| {
                    let deadline = toast.expires_at_ms;
                    let delay = u32::try_from(deadline.saturating_sub(now_ms())).unwrap_or(u32::MAX);
                    Timeout::new(delay, move || on_expire.emit(deadline))
                });
                move || drop(handle)
            },
            props.toast.clone(),
        );
    }

    html! {
        <div class="toast-host" aria-live="polite" aria-atomic="true">
            {for props.toast.iter().map(|toast| render_toast(toast, props.on_dismiss.clone()))}
        </div>
    }
}

fn render_toast(toast: &Toast, on_dismiss: Callback<u64>) -> Html {
    let id = toast.id;
    let on_close = Callback::from(move |_| on_dismiss.emit(id));

    html! {
        <div class={classes!("notification", toast.kind.class(), "show")} role="status">
            <span>{toast.message.clone()}</span>
            <button type="button" class="notification-close" aria-label="Dismiss" onclick={on_close}>{"×"}</button>
        </div>
    }
}

/// The page's single notification slot, fed from [`PageStore::notices`].
#[function_component(NoticeHost)]
pub(crate) fn notice_host() -> Html {
    let (store, dispatch) = use_store::<PageStore>();
    // The timer fires only after the deadline, so the deadline is a safe lower bound for now.
    let on_expire = dispatch.reduce_mut_callback_with(|store, deadline: u64| {
        store.notices.expire(now_ms().max(deadline));
    });
    let on_dismiss = dispatch.reduce_mut_callback_with(|store, id: u64| {
        store.notices.dismiss(id);
    });

    html! {
        <ToastHost toast={store.notices.current().cloned()} {on_expire} {on_dismiss} />
    }
}
