//! Image upload area with click-to-pick, drag-and-drop and previews.

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::uploads::{UploadFile, UploadMode, UploadQueue};
use gloo::console;
use gloo::file::File as GlooFile;
use gloo::file::futures::read_as_bytes;
use web_sys::{DataTransfer, DragEvent, File, FileList, HtmlInputElement};
use yew::platform::spawn_local;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct UploadAreaProps {
    /// Form field name of the file input.
    pub(crate) name: String,
    pub(crate) mode: UploadMode,
    #[prop_or_default]
    pub(crate) prompt: String,
}

/// Queue plus the browser files backing it, index-aligned.
struct Slot {
    queue: UploadQueue,
    files: Vec<File>,
}

fn files_of(list: Option<FileList>) -> Vec<File> {
    list.map(|list| (0..list.length()).filter_map(|index| list.get(index)).collect())
        .unwrap_or_default()
}

// Mirror the kept files back into the input so the form posts what the previews show.
fn sync_input(input: &NodeRef, files: &[File]) {
    let Some(input) = input.cast::<HtmlInputElement>() else {
        return;
    };
    let Ok(transfer) = DataTransfer::new() else {
        return;
    };
    for file in files {
        if transfer.items().add_with_file(file).is_err() {
            console::warn!("could not attach file");
        }
    }
    input.set_files(transfer.files().as_ref());
}

async fn accept(slot: Rc<RefCell<Slot>>, input: NodeRef, picked: Vec<File>, refresh: Callback<()>) {
    let mut read = Vec::new();
    for file in picked {
        let handle = GlooFile::from(file.clone());
        match read_as_bytes(&handle).await {
            Ok(bytes) => read.push((
                file,
                UploadFile {
                    name: handle.name(),
                    mime: handle.raw_mime_type(),
                    bytes,
                },
            )),
            Err(err) => console::error!(err.to_string()),
        }
    }
    {
        let mut slot = slot.borrow_mut();
        for (file, upload) in read {
            if let Some(error) = slot.queue.offer(vec![upload]).first() {
                console::warn!(error.to_string());
                continue;
            }
            if slot.queue.mode() == UploadMode::Single {
                slot.files = vec![file];
                break;
            }
            slot.files.push(file);
        }
        sync_input(&input, &slot.files);
    }
    refresh.emit(());
}

#[function_component(UploadArea)]
pub(crate) fn upload_area(props: &UploadAreaProps) -> Html {
    let mode = props.mode;
    let slot = use_mut_ref(move || Slot {
        queue: UploadQueue::new(mode),
        files: Vec::new(),
    });
    let dragging = use_state(|| false);
    let input_ref = use_node_ref();
    let force = use_force_update();
    let refresh = Callback::from(move |()| force.force_update());

    let start = {
        let slot = slot.clone();
        let input_ref = input_ref.clone();
        let refresh = refresh.clone();
        move |picked: Vec<File>| {
            spawn_local(accept(slot.clone(), input_ref.clone(), picked, refresh.clone()));
        }
    };

    let onclick = {
        let input_ref = input_ref.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                input.click();
            }
        })
    };
    let onchange = {
        let start = start.clone();
        Callback::from(move |event: Event| {
            let input = event.target_unchecked_into::<HtmlInputElement>();
            start(files_of(input.files()));
        })
    };
    let ondragover = {
        let dragging = dragging.clone();
        Callback::from(move |event: DragEvent| {
            event.prevent_default();
            dragging.set(true);
        })
    };
    let ondragleave = {
        let dragging = dragging.clone();
        Callback::from(move |_: DragEvent| dragging.set(false))
    };
    let ondrop = {
        let dragging = dragging.clone();
        Callback::from(move |event: DragEvent| {
            event.prevent_default();
            dragging.set(false);
            start(files_of(event.data_transfer().and_then(|transfer| transfer.files())));
        })
    };

    let (previews, empty) = {
        let current = slot.borrow();
        (current.queue.previews(), current.queue.is_empty())
    };
    let tiles = previews.into_iter().map(|preview| {
        let slot = slot.clone();
        let input_ref = input_ref.clone();
        let refresh = refresh.clone();
        let index = preview.index;
        let remove = Callback::from(move |event: MouseEvent| {
            event.stop_propagation();
            let mut current = slot.borrow_mut();
            if current.queue.remove(index).is_ok() && index < current.files.len() {
                current.files.remove(index);
                sync_input(&input_ref, &current.files);
            }
            drop(current);
            refresh.emit(());
        });
        html! {
            <div class="preview-item" data-index={index.to_string()}>
                <img src={preview.src} alt={preview.name} />
                <button type="button" class="preview-remove" aria-label="Remove" onclick={remove}>{"×"}</button>
            </div>
        }
    });

    let prompt = if props.prompt.is_empty() {
        "Click or drop images here".to_string()
    } else {
        props.prompt.clone()
    };
    html! {
        <div class="upload-field">
            <div
                class={classes!("upload-area", dragging.then_some("dragover"))}
                {onclick}
                {ondragover}
                {ondragleave}
                {ondrop}
            >
                <p>{prompt}</p>
                <input
                    ref={input_ref}
                    type="file"
                    accept="image/*"
                    name={props.name.clone()}
                    multiple={mode == UploadMode::Multiple}
                    hidden=true
                    {onchange}
                />
            </div>
            <div class={classes!("upload-preview", (!empty).then_some("active"))}>
                {for tiles}
            </div>
        </div>
    }
}
