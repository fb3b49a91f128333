use crate::form::{TableRole, MAX_COURSES};
use crate::ipc::error::{err, form_err, no_form, ok};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn parse_table(req: &Request) -> Result<TableRole, serde_json::Value> {
    match req.params.get("table").and_then(|v| v.as_str()) {
        Some(s) => TableRole::parse(s).ok_or_else(|| {
            err(
                &req.id,
                "bad_params",
                "table must be one of: past, current",
                Some(json!({ "table": s })),
            )
        }),
        None => Err(err(&req.id, "bad_params", "missing table", None)),
    }
}

fn parse_index(req: &Request) -> Result<usize, serde_json::Value> {
    match req.params.get("index").and_then(|v| v.as_u64()) {
        Some(v) => Ok(v as usize),
        None => Err(err(&req.id, "bad_params", "missing/invalid index", None)),
    }
}

fn handle_rows_add(state: &mut AppState, req: &Request) -> serde_json::Value {
    let table = match parse_table(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Some(form) = state.form.as_mut() else {
        return no_form(&req.id);
    };

    match form.add_row(table) {
        Ok((row_id, index)) => ok(
            &req.id,
            json!({
                "rowId": row_id,
                "index": index,
                "rows": form.row_count(table),
                "capacity": MAX_COURSES,
            }),
        ),
        Err(e) => form_err(&req.id, e),
    }
}

fn handle_rows_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let table = match parse_table(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let index = match parse_index(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Some(patch) = req.params.get("patch").and_then(|v| v.as_object()) else {
        return err(&req.id, "bad_params", "missing patch object", None);
    };

    let course = patch.get("course").and_then(|v| v.as_str());
    let grade = patch.get("grade").and_then(|v| v.as_str());
    let status = patch.get("status").and_then(|v| v.as_str());

    let Some(form) = state.form.as_mut() else {
        return no_form(&req.id);
    };

    let updated = match table {
        TableRole::Past => {
            if status.is_some() {
                return err(
                    &req.id,
                    "bad_params",
                    "past rows have no status field",
                    None,
                );
            }
            form.update_past_row(index, course, grade)
        }
        TableRole::Current => {
            if grade.is_some() {
                return err(
                    &req.id,
                    "bad_params",
                    "current rows have no grade field",
                    None,
                );
            }
            form.update_current_row(index, course, status)
        }
    };

    match updated {
        Ok(()) => ok(&req.id, json!({ "ok": true })),
        Err(e) => form_err(&req.id, e),
    }
}

fn handle_rows_remove(state: &mut AppState, req: &Request) -> serde_json::Value {
    let table = match parse_table(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let index = match parse_index(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Some(form) = state.form.as_mut() else {
        return no_form(&req.id);
    };

    match form.remove_row(table, index) {
        Ok(()) => ok(&req.id, json!({ "rows": form.row_count(table) })),
        Err(e) => form_err(&req.id, e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "rows.add" => Some(handle_rows_add(state, req)),
        "rows.update" => Some(handle_rows_update(state, req)),
        "rows.remove" => Some(handle_rows_remove(state, req)),
        _ => None,
    }
}
