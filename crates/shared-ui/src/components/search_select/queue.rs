/// Coalesces searches fired while typing: at most one request is in
/// flight, and of the queries typed meanwhile only the latest is sent
/// once it returns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQueue {
    in_flight: bool,
    pending: Option<String>,
}

/// What to do when the in-flight search returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// The response is the latest one and should be shown.
    pub apply: bool,
    /// Query to send next, if the user kept typing.
    pub next: Option<String>,
}

impl SearchQueue {
    /// Returns the query to send now, or `None` when it was parked behind
    /// the in-flight request. A parked query replaces any older one.
    pub fn submit(&mut self, query: String) -> Option<String> {
        if self.in_flight {
            self.pending = Some(query);
            None
        } else {
            self.in_flight = true;
            Some(query)
        }
    }

    pub fn complete(&mut self) -> Completion {
        match self.pending.take() {
            Some(next) => Completion {
                apply: false,
                next: Some(next),
            },
            None => {
                self.in_flight = false;
                Completion {
                    apply: true,
                    next: None,
                }
            }
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }
}
