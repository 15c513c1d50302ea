use dioxus::prelude::*;

/// Form wrapper that prevents default submission.
#[component]
pub fn Form(
    #[props(default)] onsubmit: EventHandler<FormEvent>,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let base = vec![Attribute::new("class", "form", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        form {
            onsubmit: move |evt| {
                evt.prevent_default();
                onsubmit.call(evt);
            },
            ..merged,
            {children}
        }
    }
}

/// One labelled row of a form.
///
/// Required rows get a marker after the label; `error` is shown under the
/// control.
#[component]
pub fn FormField(
    label: String,
    #[props(default = false)] required: bool,
    #[props(default)] error: Option<String>,
    children: Element,
) -> Element {
    let invalid = error.is_some();

    rsx! {
        div {
            class: "form-field",
            "data-invalid": invalid,
            label { class: "form-field-label",
                "{label}"
                if required {
                    span { class: "form-field-required", " *" }
                }
            }
            div { class: "form-field-control", {children} }
            if let Some(error) = error {
                p { class: "form-field-error", "{error}" }
            }
        }
    }
}

/// Read-only value shown in place of an input.
#[component]
pub fn FormValue(value: String) -> Element {
    rsx! {
        span { class: "form-value", "{value}" }
    }
}
