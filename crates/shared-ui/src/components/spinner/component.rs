use dioxus::prelude::*;

use super::busy::BusyCount;

/// Process-wide busy indicator shared through context.
#[derive(Clone, Copy, PartialEq)]
pub struct BusyState {
    count: Signal<BusyCount>,
}

impl BusyState {
    /// Show the spinner until the returned guard is dropped.
    pub fn hold(&self) -> BusyGuard {
        let mut count = self.count;
        count.write().acquire();
        BusyGuard { count }
    }

    pub fn is_busy(&self) -> bool {
        self.count.read().is_busy()
    }
}

/// Releases its hold on the busy indicator when dropped.
pub struct BusyGuard {
    count: Signal<BusyCount>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        // The owning scope may already be gone after navigation.
        if let Ok(mut count) = self.count.try_write() {
            count.release();
        }
    }
}

/// Install the busy indicator; call once near the root.
pub fn use_busy_provider() -> BusyState {
    use_context_provider(|| BusyState {
        count: Signal::new(BusyCount::default()),
    })
}

pub fn use_busy() -> BusyState {
    use_context::<BusyState>()
}

/// Full-screen overlay shown while anything holds the busy indicator.
#[component]
pub fn Spinner() -> Element {
    let busy = use_busy();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        if busy.is_busy() {
            div { class: "spinner-overlay", role: "status", "aria-live": "polite",
                div { class: "spinner" }
            }
        }
    }
}
