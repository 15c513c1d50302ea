use dioxus::prelude::*;

/// 404 page. The wizard is only entered through a stock movement link, so
/// there is nowhere in-app to send the user back to.
#[component]
pub fn NotFound(route: Vec<String>) -> Element {
    let path = format!("/{}", route.join("/"));

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./not_found.css") }

        div { class: "not-found-page",
            div { class: "not-found-card",
                div { class: "not-found-code", "404" }
                h1 { class: "not-found-title", "Page Not Found" }
                p { class: "not-found-message",
                    "The page "
                    code { "{path}" }
                    " could not be found. Open the shipment from its stock movement instead."
                }
            }
        }
    }
}
