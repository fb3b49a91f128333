use crate::form::{FormSession, MAX_COURSES, MIN_COURSES};
use crate::ipc::error::{no_form, ok};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn form_snapshot(form: &FormSession) -> serde_json::Value {
    let past_rows: Vec<serde_json::Value> = form
        .past
        .iter()
        .map(|r| {
            json!({
                "id": r.id,
                "course": r.course,
                "grade": r.grade,
                "complete": r.is_complete(),
            })
        })
        .collect();
    let current_rows: Vec<serde_json::Value> = form
        .current
        .iter()
        .map(|r| {
            json!({
                "id": r.id,
                "course": r.course,
                "status": r.status.map(|s| s.as_str()),
                "complete": r.is_complete(),
            })
        })
        .collect();

    json!({
        "fields": {
            "level": form.fields.level,
            "cgpa": form.fields.cgpa,
            "failedCourses": form.fields.failed_courses,
            "department": form.fields.department,
        },
        "past": {
            "rows": past_rows,
            "capacity": MAX_COURSES,
        },
        "current": {
            "rows": current_rows,
            "capacity": MAX_COURSES,
        },
        "sections": form.sections(),
    })
}

fn handle_form_open(state: &mut AppState, req: &Request) -> serde_json::Value {
    // Re-opening replaces the live form: page-reload semantics.
    let form = FormSession::open();
    let result = json!({
        "pastRows": form.past.len(),
        "currentRows": form.current.len(),
        "minimum": MIN_COURSES,
        "capacity": MAX_COURSES,
    });
    state.form = Some(form);
    ok(&req.id, result)
}

fn handle_form_state(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(form) = state.form.as_ref() else {
        return no_form(&req.id);
    };
    ok(&req.id, form_snapshot(form))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(ok(&req.id, json!({ "status": "ok" }))),
        "form.open" => Some(handle_form_open(state, req)),
        "form.state" => Some(handle_form_state(state, req)),
        _ => None,
    }
}
