use dioxus::prelude::*;

/// A themed native select element.
///
/// Options are `(value, label)` pairs. An empty first option carries the
/// placeholder so that "nothing selected" is representable.
#[component]
pub fn FormSelect(
    /// Current selected value; empty when nothing is selected.
    #[props(default)]
    value: String,
    options: Vec<(String, String)>,
    #[props(default)] placeholder: String,
    #[props(default)] onchange: Option<EventHandler<Event<FormData>>>,
    #[props(default = false)] disabled: bool,
    #[props(default = false)] required: bool,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        select {
            class: "form-select",
            value: value.clone(),
            disabled: disabled,
            required: required,
            onchange: move |evt| {
                if let Some(handler) = &onchange {
                    handler.call(evt);
                }
            },
            option { value: "", selected: value.is_empty(), "{placeholder}" }
            for (option_value, label) in options {
                option {
                    key: "{option_value}",
                    selected: option_value == value,
                    value: "{option_value}",
                    "{label}"
                }
            }
        }
    }
}
