use serde::Deserialize;

use crate::form::FormSession;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Sidecar state: at most one open form at a time. `None` until the
/// presentation layer sends `form.open`.
pub struct AppState {
    pub form: Option<FormSession>,
}
