use crate::ipc::error::{err, no_form, ok};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

/// Flat-field updates are stored as-is: format checks on the enumerated
/// inputs belong to `form.validate`, and CGPA/failed-courses content is
/// never inspected.
fn handle_fields_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(patch) = req.params.get("patch").and_then(|v| v.as_object()) else {
        return err(&req.id, "bad_params", "missing patch object", None);
    };
    let Some(form) = state.form.as_mut() else {
        return no_form(&req.id);
    };

    if let Some(v) = patch.get("level").and_then(|v| v.as_str()) {
        form.fields.level = v.to_string();
    }
    if let Some(v) = patch.get("cgpa").and_then(|v| v.as_str()) {
        form.fields.cgpa = v.to_string();
    }
    if let Some(v) = patch.get("failedCourses").and_then(|v| v.as_str()) {
        form.fields.failed_courses = v.to_string();
    }
    if let Some(v) = patch.get("department").and_then(|v| v.as_str()) {
        form.fields.department = v.to_string();
    }

    ok(
        &req.id,
        json!({
            "fields": {
                "level": form.fields.level,
                "cgpa": form.fields.cgpa,
                "failedCourses": form.fields.failed_courses,
                "department": form.fields.department,
            }
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "fields.update" => Some(handle_fields_update(state, req)),
        _ => None,
    }
}
