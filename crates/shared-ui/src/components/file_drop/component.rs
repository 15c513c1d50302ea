use dioxus::html::FileData;
use dioxus::prelude::*;

use super::DroppedFile;

/// Read every file in full, skipping the ones the browser fails to read.
async fn read_files(files: Vec<FileData>) -> Vec<DroppedFile> {
    let mut dropped = Vec::with_capacity(files.len());
    for file in files {
        if let Ok(bytes) = file.read_bytes().await {
            dropped.push(DroppedFile::new(
                file.name(),
                file.content_type(),
                bytes.to_vec(),
            ));
        }
    }
    dropped
}

/// Drop zone with a multi-file picker and the list of queued files.
///
/// Files are read fully before `on_drop` fires once per drop or picker
/// selection. Unreadable files are skipped.
#[component]
pub fn FileDrop(
    /// Names of the files currently queued.
    files: Vec<String>,
    on_drop: EventHandler<Vec<DroppedFile>>,
    on_remove: EventHandler<String>,
    #[props(default = false)] disabled: bool,
    #[props(default = "Drag and drop files here, or click to select".to_string())]
    prompt: String,
) -> Element {
    let mut hovering = use_signal(|| false);
    // Bumped after every pick so the input remounts empty and picking the
    // same file again still fires `onchange`.
    let mut picks = use_signal(|| 0u32);

    let handle_pick = move |evt: FormEvent| async move {
        let dropped = read_files(evt.files()).await;
        picks += 1;
        if !dropped.is_empty() {
            on_drop.call(dropped);
        }
    };

    let handle_drop = move |evt: DragEvent| async move {
        evt.prevent_default();
        hovering.set(false);
        if disabled {
            return;
        }
        let dropped = read_files(evt.files()).await;
        if !dropped.is_empty() {
            on_drop.call(dropped);
        }
    };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "file-drop",
            label {
                class: "file-drop-zone",
                "data-disabled": disabled,
                "data-hover": hovering(),
                ondragover: move |evt: DragEvent| {
                    evt.prevent_default();
                    if !disabled {
                        hovering.set(true);
                    }
                },
                ondragleave: move |_| hovering.set(false),
                ondrop: handle_drop,
                for pick in [picks()] {
                    input {
                        key: "{pick}",
                        r#type: "file",
                        class: "file-drop-input",
                        multiple: true,
                        disabled: disabled,
                        onchange: handle_pick,
                    }
                }
                span { class: "file-drop-prompt", "{prompt}" }
            }
            if !files.is_empty() {
                ul { class: "file-drop-list",
                    for name in files {
                        li { key: "{name}", class: "file-drop-item",
                            span { class: "file-drop-name", "{name}" }
                            button {
                                r#type: "button",
                                class: "file-drop-remove",
                                title: "Remove",
                                onclick: {
                                    let name = name.clone();
                                    move |_| on_remove.call(name.clone())
                                },
                                "×"
                            }
                        }
                    }
                }
            }
        }
    }
}
