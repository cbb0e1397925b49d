use crate::core::actions::DeleteDialog;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct DeleteModalProps {
    pub(crate) dialog: Option<DeleteDialog>,
    pub(crate) on_confirm: Callback<()>,
    pub(crate) on_cancel: Callback<()>,
}

/// Confirmation prompt; nothing is deleted unless "Delete" is pressed.
#[function_component(DeleteModal)]
pub(crate) fn delete_modal(props: &DeleteModalProps) -> Html {
    let Some(dialog) = props.dialog.as_ref() else {
        return html! {};
    };
    let confirm = props.on_confirm.reform(|_: MouseEvent| ());
    let cancel = props.on_cancel.reform(|_: MouseEvent| ());
    let backdrop = props.on_cancel.reform(|_: MouseEvent| ());

    html! {
        <div class="modal active" role="dialog" aria-modal="true">
            <div class="modal-backdrop" onclick={backdrop} />
            <div class="modal-content">
                <h3>{dialog.heading()}</h3>
                <p>{dialog.prompt()}</p>
                <div class="modal-actions">
                    <button type="button" class="btn btn-secondary" onclick={cancel}>{"Cancel"}</button>
                    <button type="button" class="btn btn-danger" onclick={confirm}>{"Delete"}</button>
                </div>
            </div>
        </div>
    }
}
