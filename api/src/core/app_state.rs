use std::sync::Arc;

use responder::FaqResponder;

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Answers questions; immutable and shared across requests.
    pub responder: Arc<FaqResponder>,
}

impl AppState {
    pub fn new(responder: FaqResponder) -> Self {
        Self {
            responder: Arc::new(responder),
        }
    }
}
