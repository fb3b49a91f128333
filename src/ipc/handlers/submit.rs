use crate::ipc::error::{form_err, no_form, ok};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_form_validate(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(form) = state.form.as_ref() else {
        return no_form(&req.id);
    };

    let violations = form.validate();
    ok(
        &req.id,
        json!({
            "valid": violations.is_empty(),
            "violations": violations,
        }),
    )
}

/// Writes both encoded payloads into the hidden carrier fields and hands
/// back the complete POST body. Submission is never blocked on content:
/// empty tables travel as "[]".
fn handle_prepare_submission(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(form) = state.form.as_mut() else {
        return no_form(&req.id);
    };

    match form.prepare_submission() {
        Ok(submission) => ok(
            &req.id,
            json!({
                "submit": true,
                "form": submission,
            }),
        ),
        Err(e) => form_err(&req.id, e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "form.validate" => Some(handle_form_validate(state, req)),
        "form.prepareSubmission" => Some(handle_prepare_submission(state, req)),
        _ => None,
    }
}
