use dioxus::prelude::*;
use shared_types::SessionContext;

mod backend;
mod routes;
use routes::Route;

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    #[cfg(feature = "server")]
    dioxus::serve(|| async move {
        server::config::load_config();
        let flags = server::config::feature_flags();

        if flags.telemetry {
            server::telemetry::init_telemetry();
        }
        server::health::record_start_time();

        let mut router = dioxus::server::router(App).route(
            "/health",
            axum::routing::get(server::health::health_check),
        );

        if flags.telemetry {
            router = router.layer(server::telemetry::OtelTraceLayer);
        }

        // Uploaded documents travel through server functions, so the body
        // limit bounds the largest document.
        let router = router
            .layer(axum::extract::DefaultBodyLimit::max(
                server::config::max_upload_bytes(),
            ))
            .layer(tower_http::request_id::PropagateRequestIdLayer::x_request_id())
            .layer(tower_http::request_id::SetRequestIdLayer::x_request_id(
                tower_http::request_id::MakeRequestUuid,
            ));
        Ok(router)
    });

    #[cfg(not(feature = "server"))]
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    // Without a current location the origin guard blocks sending.
    let session_resource =
        use_server_future(move || async move { server::api::get_session_context().await })?;

    let session = match session_resource.read().as_ref().cloned() {
        Some(Ok(session)) => session,
        Some(Err(e)) => {
            tracing::warn!(error = %e, "failed to load session context");
            SessionContext::default()
        }
        None => SessionContext::default(),
    };
    use_context_provider(|| session);
    shared_ui::use_busy_provider();

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        shared_ui::ToastProvider {
            shared_ui::Spinner {}
            SuspenseBoundary {
                fallback: |_| rsx! {
                    div { class: "page-loading",
                        p { "Loading..." }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
