use dioxus::prelude::*;
use shared_types::fields::{find_field, FieldContext, Widget};
use shared_types::{
    date_shipped_from_input, date_shipped_input_value, Destination, ShipmentFormValues,
    ShipmentTypeOption, LOCATION_SEARCH_MIN_CHARS,
};
use shared_ui::components::{FormField, FormSelect, FormValue, Input, SearchQueue, SearchSelect};

/// One row of the field tables, rendered with the widget its spec resolves
/// to for the current values.
#[component]
pub fn ShipmentField(
    field_key: &'static str,
    values: Signal<ShipmentFormValues>,
    shipment_types: Vec<ShipmentTypeOption>,
    #[props(default)] error: Option<String>,
) -> Element {
    let mut values = values;
    let Some(spec) = find_field(field_key) else {
        return rsx! {};
    };

    let current = values.read().clone();
    let field = spec.resolve(&FieldContext::for_values(&current, &shipment_types));
    let shown = (spec.display)(&current);
    let attrs = field.attrs;

    let control = match field.widget {
        Widget::Label => rsx! {
            FormValue { value: shown }
        },
        Widget::Text => rsx! {
            Input {
                value: shown,
                disabled: attrs.disabled,
                required: attrs.required,
                on_input: move |evt: FormEvent| {
                    values.write().set_field(field_key, evt.value());
                },
            }
        },
        Widget::Date => {
            let input_value = date_shipped_input_value(current.date_shipped.as_deref());
            let format = attrs.date_format.unwrap_or_default();
            let input_type = if attrs.show_time_select {
                "datetime-local"
            } else {
                "date"
            };
            rsx! {
                Input {
                    input_type,
                    value: input_value,
                    disabled: attrs.disabled,
                    required: attrs.required,
                    on_input: move |evt: FormEvent| {
                        let mut values = values.write();
                        let converted =
                            date_shipped_from_input(&evt.value(), values.date_shipped.as_deref());
                        values.date_shipped = converted;
                    },
                }
                if !format.is_empty() {
                    span { class: "form-hint", "{format}" }
                }
            }
        }
        Widget::Select => {
            let options = attrs
                .options
                .iter()
                .map(|o| (o.value.clone(), o.label.clone()))
                .collect::<Vec<_>>();
            rsx! {
                FormSelect {
                    value: shown,
                    options,
                    placeholder: "Select...",
                    disabled: attrs.disabled,
                    required: attrs.required,
                    onchange: move |evt: Event<FormData>| {
                        values.write().set_field(field_key, evt.value());
                    },
                }
            }
        }
        Widget::LocationSelect => rsx! {
            DestinationSelect { values, required: attrs.required }
        },
    };

    rsx! {
        FormField {
            label: field.default_message.to_string(),
            required: attrs.required,
            error,
            {control}
        }
    }
}

/// Destination picker searching backend locations by name.
///
/// One search runs at a time. Queries typed while it is in flight collapse
/// into the latest, which is sent when it returns; only the response to
/// the last query is shown.
#[component]
fn DestinationSelect(values: Signal<ShipmentFormValues>, required: bool) -> Element {
    let mut values = values;
    let mut results = use_signal(Vec::<Destination>::new);
    let mut queue = use_signal(SearchQueue::default);

    let selected_label = values
        .read()
        .destination
        .as_ref()
        .map(|d| d.label.clone())
        .unwrap_or_default();
    let options = results
        .read()
        .iter()
        .map(|d| (d.id.clone(), d.label.clone()))
        .collect::<Vec<_>>();

    rsx! {
        SearchSelect {
            selected_label,
            options,
            required,
            min_chars: LOCATION_SEARCH_MIN_CHARS,
            placeholder: "Search locations...",
            on_search: move |query: String| {
                let Some(first) = queue.write().submit(query) else {
                    return;
                };
                spawn(async move {
                    let mut query = first;
                    loop {
                        let found = server::api::search_locations(query).await;
                        let done = queue.write().complete();
                        match found {
                            Ok(found) if done.apply => results.set(found),
                            Ok(_) => {}
                            Err(e) => tracing::warn!(error = %e, "location search failed"),
                        }
                        match done.next {
                            Some(next) => query = next,
                            None => break,
                        }
                    }
                });
            },
            on_select: move |id: String| {
                let chosen = results.peek().iter().find(|d| d.id == id).cloned();
                if let Some(destination) = chosen {
                    values.write().destination = Some(destination);
                }
            },
        }
    }
}
