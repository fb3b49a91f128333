use serde_json::json;

use crate::form::FormError;

pub fn ok(id: &str, result: serde_json::Value) -> serde_json::Value {
    json!({
        "id": id,
        "ok": true,
        "result": result
    })
}

pub fn err(
    id: &str,
    code: &str,
    message: impl Into<String>,
    details: Option<serde_json::Value>,
) -> serde_json::Value {
    let mut error = json!({
        "code": code,
        "message": message.into(),
    });
    if let Some(d) = details {
        error["details"] = d;
    }
    json!({
        "id": id,
        "ok": false,
        "error": error,
    })
}

pub fn form_err(id: &str, e: FormError) -> serde_json::Value {
    err(id, e.code, e.message, e.details)
}

pub fn no_form(id: &str) -> serde_json::Value {
    err(id, "no_form", "open a form first", None)
}
