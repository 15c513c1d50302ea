use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::LdFileText;
use dioxus_free_icons::Icon;
use shared_types::{Document, SessionContext};

/// Printable documents generated by the previous step. Only visible
/// documents are passed in.
#[component]
pub fn ShipmentDocuments(documents: Vec<Document>) -> Element {
    let session = use_context::<SessionContext>();
    let links: Vec<(String, String)> = documents
        .iter()
        .map(|d| (d.name.clone(), session.document_url(&d.uri)))
        .collect();

    rsx! {
        div { class: "send-shipment-documents",
            for (name, href) in links {
                a {
                    key: "{href}",
                    class: "button",
                    "data-style": "outline",
                    href: "{href}",
                    target: "_blank",
                    rel: "noopener",
                    Icon::<LdFileText> { icon: LdFileText, width: 14, height: 14 }
                    "{name}"
                }
            }
        }
    }
}
