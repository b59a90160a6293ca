use serde::{Deserialize, Serialize};

/// Request payload for /bot-invoke/invoke.
#[derive(Debug, Deserialize)]
pub struct InvokeRequest {
    /// Student question. Absent, `null` and `""` are accepted here and
    /// rejected by the handler with a fixed message.
    #[serde(default)]
    pub query: Option<String>,
}

/// Response payload for /bot-invoke/invoke.
#[derive(Debug, Serialize)]
pub struct InvokeResponse {
    /// Model answer, verbatim.
    pub message: String,
}
