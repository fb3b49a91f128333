use crate::ipc::error::{err, no_form, ok};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_section_toggle(state: &mut AppState, req: &Request) -> serde_json::Value {
    let section = match req.params.get("section").and_then(|v| v.as_str()) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => return err(&req.id, "bad_params", "missing section", None),
    };
    let Some(form) = state.form.as_mut() else {
        return no_form(&req.id);
    };

    let visible = form.toggle_section(&section);
    ok(
        &req.id,
        json!({
            "section": section,
            "visible": visible,
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "section.toggle" => Some(handle_section_toggle(state, req)),
        _ => None,
    }
}
