use super::handlers;
use super::types::{AppState, Request};
use crate::ipc::error::err;

pub fn handle_request(state: &mut AppState, req: Request) -> serde_json::Value {
    if let Some(resp) = handlers::session::try_handle(state, &req) {
        return resp;
    }
    if let Some(resp) = handlers::rows::try_handle(state, &req) {
        return resp;
    }
    if let Some(resp) = handlers::sections::try_handle(state, &req) {
        return resp;
    }
    if let Some(resp) = handlers::fields::try_handle(state, &req) {
        return resp;
    }
    if let Some(resp) = handlers::submit::try_handle(state, &req) {
        return resp;
    }

    err(
        &req.id,
        "not_implemented",
        format!("unknown method: {}", req.method),
        None,
    )
}
