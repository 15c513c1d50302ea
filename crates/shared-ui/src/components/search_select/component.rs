use dioxus::prelude::*;

/// Select whose options are looked up as the user types.
///
/// The parent owns the options: it receives `on_search` for every query of
/// at least `min_chars` characters and passes the results back through
/// `options` as `(value, label)` pairs.
#[component]
pub fn SearchSelect(
    /// Label of the current selection, shown while not searching.
    selected_label: String,
    options: Vec<(String, String)>,
    on_search: EventHandler<String>,
    on_select: EventHandler<String>,
    #[props(default = 3)] min_chars: usize,
    #[props(default)] placeholder: String,
    #[props(default = false)] required: bool,
    #[props(default = false)] disabled: bool,
) -> Element {
    let mut query = use_signal(String::new);
    let mut open = use_signal(|| false);

    let searching = open() && query.read().chars().count() >= min_chars;
    let shown = if open() {
        query.read().clone()
    } else {
        selected_label.clone()
    };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "search-select",
            input {
                class: "input search-select-input",
                r#type: "text",
                value: shown,
                placeholder: placeholder,
                required: required,
                disabled: disabled,
                onfocus: move |_| {
                    query.set(String::new());
                    open.set(true);
                },
                oninput: move |evt: FormEvent| {
                    let value = evt.value();
                    if value.chars().count() >= min_chars {
                        on_search.call(value.clone());
                    }
                    query.set(value);
                },
                onblur: move |_| open.set(false),
                onkeydown: move |evt: KeyboardEvent| {
                    if evt.key() == Key::Escape {
                        open.set(false);
                    }
                },
            }
            if open() {
                ul { class: "search-select-options",
                    if !searching {
                        li { class: "search-select-hint",
                            "Type at least {min_chars} characters"
                        }
                    } else if options.is_empty() {
                        li { class: "search-select-hint", "No results" }
                    } else {
                        for (value, label) in options {
                            li {
                                key: "{value}",
                                class: "search-select-option",
                                onmousedown: {
                                    let value = value.clone();
                                    move |evt: MouseEvent| {
                                        evt.prevent_default();
                                        open.set(false);
                                        on_select.call(value.clone());
                                    }
                                },
                                "{label}"
                            }
                        }
                    }
                }
            }
        }
    }
}
