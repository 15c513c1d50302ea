//! Confirmation dialog used before leaving a page with unsaved work.

use dioxus::prelude::*;
use dioxus_primitives::alert_dialog as prim;

fn class(name: &'static str) -> Attribute {
    Attribute::new("class", name, None, false)
}

#[component]
pub fn AlertDialogRoot(mut props: prim::AlertDialogRootProps) -> Element {
    props.attributes.push(class("confirm-dialog-overlay"));

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        prim::AlertDialogRoot { ..props }
    }
}

#[component]
pub fn AlertDialogContent(mut props: prim::AlertDialogContentProps) -> Element {
    props
        .class
        .get_or_insert_with(|| "confirm-dialog".to_string());

    rsx! {
        prim::AlertDialogContent { ..props }
    }
}

#[component]
pub fn AlertDialogTitle(mut props: prim::AlertDialogTitleProps) -> Element {
    props.attributes.push(class("confirm-dialog-title"));
    rsx! {
        prim::AlertDialogTitle { ..props }
    }
}

#[component]
pub fn AlertDialogDescription(mut props: prim::AlertDialogDescriptionProps) -> Element {
    props.attributes.push(class("confirm-dialog-message"));
    rsx! {
        prim::AlertDialogDescription { ..props }
    }
}

#[component]
pub fn AlertDialogActions(mut props: prim::AlertDialogActionsProps) -> Element {
    props.attributes.push(class("confirm-dialog-buttons"));
    rsx! {
        prim::AlertDialogActions { ..props }
    }
}

/// Button that confirms and closes the dialog.
#[component]
pub fn AlertDialogAction(mut props: prim::AlertDialogActionProps) -> Element {
    props.attributes.push(class("confirm-dialog-proceed"));
    rsx! {
        prim::AlertDialogAction { ..props }
    }
}

/// Button that only closes the dialog.
#[component]
pub fn AlertDialogCancel(mut props: prim::AlertDialogCancelProps) -> Element {
    props.attributes.push(class("confirm-dialog-stay"));
    rsx! {
        prim::AlertDialogCancel { ..props }
    }
}
