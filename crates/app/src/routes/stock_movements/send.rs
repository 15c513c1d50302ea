use dioxus::prelude::*;
use server::workflow::{
    self, ConfirmPrompt, LeaveIntent, LeaveOutcome, SubmitError, SAVE_SUCCESS_MESSAGE,
};
use shared_types::fields::{FIELDS, SHIPMENT_FIELDS};
use shared_types::{
    mime_from_filename, validate, PendingFile, PendingFiles, SendStep, SessionContext,
    ShipmentFormValues, ShipmentTypeOption, REQUIRED_FIELD_ERROR,
};
use shared_ui::components::{
    AlertDialogAction, AlertDialogActions, AlertDialogCancel, AlertDialogContent,
    AlertDialogDescription, AlertDialogRoot, AlertDialogTitle, Button, ButtonVariant, Card,
    CardContent, CardFooter, CardHeader, CardTitle, DroppedFile, FileDrop, Form, PageHeader,
};
use shared_ui::{use_busy, use_toast, ToastOptions};

use super::documents::ShipmentDocuments;
use super::fields::ShipmentField;
use super::items::ShipmentItems;
use crate::backend::ServerFnBackend;
use crate::routes::Route;

fn error_text(key: &str) -> String {
    match key {
        REQUIRED_FIELD_ERROR => "This field is required".to_string(),
        other => other.to_string(),
    }
}

/// Route entry. Keyed by shipment id so navigating to another shipment
/// mounts a fresh form instead of reusing the previous one's values.
#[component]
pub fn SendShipment(id: String) -> Element {
    rsx! {
        SendShipmentForm { key: "{id}", id: id.clone() }
    }
}

/// Owns the form values for one shipment and wires "Previous" to the
/// browser history.
#[component]
fn SendShipmentForm(id: String) -> Element {
    let values = use_signal(|| ShipmentFormValues::new(id.clone()));

    rsx! {
        SendMovementPage {
            values,
            on_previous: move |_| navigator().go_back(),
        }
    }
}

/// The "send shipment" wizard step.
#[component]
pub fn SendMovementPage(
    values: Signal<ShipmentFormValues>,
    on_previous: EventHandler<()>,
) -> Element {
    let mut values = values;
    let busy = use_busy();
    let toast = use_toast();
    let nav = navigator();
    let session = use_context::<SessionContext>();
    let session = use_signal(move || session);

    let mut shipment_types = use_signal(Vec::<ShipmentTypeOption>::new);
    let mut step = use_signal(SendStep::default);
    let mut files = use_signal(PendingFiles::new);
    let mut confirm = use_signal(|| None::<(LeaveIntent, ConfirmPrompt)>);

    let fetch_step = move || {
        spawn(async move {
            let _busy = busy.hold();
            let current = values.peek().clone();
            match workflow::load_send_step(&ServerFnBackend, &current).await {
                Ok(loaded) if loaded.applies_to(&values.peek()) => {
                    step.set(loaded.step);
                    values.set(loaded.values);
                }
                Ok(_) => tracing::debug!(
                    stock_movement_id = %current.stock_movement_id,
                    "discarding send step loaded for another shipment"
                ),
                Err(e) => tracing::warn!(
                    stock_movement_id = %current.stock_movement_id,
                    error = %e,
                    "failed to load send step"
                ),
            }
        });
    };

    use_hook(move || {
        spawn(async move {
            let _busy = busy.hold();
            match workflow::load_shipment_types(&ServerFnBackend).await {
                Ok(types) => shipment_types.set(types),
                Err(e) => tracing::warn!(error = %e, "failed to load shipment types"),
            }
        });
        fetch_step();
    });

    let leave_now = move |intent: LeaveIntent| match intent {
        LeaveIntent::Previous => on_previous.call(()),
        LeaveIntent::Exit => {
            let url = session
                .read()
                .stock_movement_show_url(&values.peek().stock_movement_id);
            nav.push(NavigationTarget::<Route>::External(url));
        }
    };

    let on_save = move |_: MouseEvent| {
        let current = values.read().clone();
        spawn(async move {
            let guard = busy.hold();
            match workflow::save(&ServerFnBackend, &current).await {
                Ok(outcome) => {
                    drop(guard);
                    if outcome.refetch {
                        fetch_step();
                    }
                    toast.success(SAVE_SUCCESS_MESSAGE.to_string(), ToastOptions::new());
                }
                Err(e) => tracing::warn!(error = %e, "save failed"),
            }
        });
    };

    let on_leave = move |intent: LeaveIntent| {
        let current = values.read().clone();
        spawn(async move {
            let outcome = {
                let _busy = busy.hold();
                workflow::leave(&ServerFnBackend, &current, intent).await
            };
            match outcome {
                Ok(LeaveOutcome::Proceed) => leave_now(intent),
                Ok(LeaveOutcome::Confirm(prompt)) => confirm.set(Some((intent, prompt))),
                Err(e) => tracing::warn!(error = %e, ?intent, "save before leaving failed"),
            }
        });
    };

    let on_submit = move |_: FormEvent| {
        let current = values.read().clone();
        let queued = files.read().clone();
        let session = session.read().clone();
        spawn(async move {
            let _busy = busy.hold();
            let id = current.stock_movement_id.clone();
            let result = workflow::submit(
                &ServerFnBackend,
                session.current_location_id.as_deref(),
                &current,
                &queued,
                |file| {
                    let id = id.clone();
                    spawn(async move {
                        let notice = workflow::upload(&ServerFnBackend, &id, file).await;
                        let message = notice.message().to_string();
                        if notice.is_success() {
                            toast.success(message, ToastOptions::new());
                        } else {
                            toast.error(message, ToastOptions::new());
                        }
                    });
                },
            )
            .await;

            match result {
                Ok(()) => {
                    nav.push(NavigationTarget::<Route>::External(
                        session.stock_movement_show_url(&id),
                    ));
                }
                Err(SubmitError::WrongLocation(e)) => {
                    toast.error(e.message, ToastOptions::new());
                }
                Err(e @ SubmitError::Backend(_)) => {
                    tracing::warn!(stock_movement_id = %id, error = %e, "send shipment failed");
                }
            }
        });
    };

    let on_drop = move |dropped: Vec<DroppedFile>| {
        let pending = dropped
            .into_iter()
            .map(|f| {
                let content_type = f.content_type.unwrap_or_else(|| mime_from_filename(&f.name));
                PendingFile::new(f.name, content_type, f.bytes)
            })
            .collect();
        files.write().drop_files(pending);
    };

    let current = values.read().clone();
    let errors = validate(&current);
    let valid = errors.is_empty();
    let issued = current.is_issued();
    let types = shipment_types.read().clone();
    let step_data = step.read().clone();
    let documents = step_data.visible_documents().cloned().collect::<Vec<_>>();
    let file_names = files.read().names();
    let prompt = confirm.read().clone();

    rsx! {
        div { class: "send-shipment",
            PageHeader {
                title: "Send shipment".to_string(),
                subtitle: current.name.clone(),
            }

            Form { onsubmit: on_submit,
                div { class: "send-shipment-columns",
                    Card {
                        CardHeader { CardTitle { "Shipment" } }
                        CardContent {
                            for spec in SHIPMENT_FIELDS {
                                ShipmentField {
                                    key: "{spec.key}",
                                    field_key: spec.key,
                                    values,
                                    shipment_types: types.clone(),
                                    error: errors.get(spec.key).map(|k| error_text(k)),
                                }
                            }
                        }
                    }

                    Card {
                        CardHeader { CardTitle { "Send details" } }
                        CardContent {
                            for spec in FIELDS {
                                ShipmentField {
                                    key: "{spec.key}",
                                    field_key: spec.key,
                                    values,
                                    shipment_types: types.clone(),
                                    error: errors.get(spec.key).map(|k| error_text(k)),
                                }
                            }
                        }
                    }
                }

                Card {
                    CardHeader { CardTitle { "Documents" } }
                    CardContent {
                        ShipmentDocuments { documents }
                        FileDrop {
                            files: file_names,
                            disabled: issued,
                            on_drop,
                            on_remove: move |name: String| files.write().remove(&name),
                        }
                    }
                }

                Card {
                    CardHeader { CardTitle { "Items" } }
                    CardContent {
                        ShipmentItems { step: step_data }
                    }
                    CardFooter {
                        div { class: "send-shipment-footer-group",
                            Button {
                                variant: ButtonVariant::Outline,
                                disabled: issued,
                                onclick: move |_| on_leave(LeaveIntent::Previous),
                                "Previous"
                            }
                        }
                        div { class: "send-shipment-footer-group",
                            Button {
                                variant: ButtonVariant::Secondary,
                                disabled: !valid,
                                onclick: on_save,
                                "Save"
                            }
                            Button {
                                variant: ButtonVariant::Secondary,
                                onclick: move |_| on_leave(LeaveIntent::Exit),
                                "Save and exit"
                            }
                            Button {
                                variant: ButtonVariant::Primary,
                                button_type: "submit",
                                disabled: !valid || issued,
                                "Send shipment"
                            }
                        }
                    }
                }
            }
        }

        AlertDialogRoot {
            open: prompt.is_some(),
            on_open_change: move |open: bool| {
                if !open {
                    confirm.set(None);
                }
            },
            if let Some((intent, prompt)) = prompt {
                AlertDialogContent {
                    AlertDialogTitle { "{prompt.title}" }
                    AlertDialogDescription { "{prompt.message}" }
                    AlertDialogActions {
                        AlertDialogCancel { "{prompt.stay_label}" }
                        AlertDialogAction {
                            on_click: move |_| {
                                confirm.set(None);
                                leave_now(intent);
                            },
                            "{prompt.proceed_label}"
                        }
                    }
                }
            }
        }
    }
}
