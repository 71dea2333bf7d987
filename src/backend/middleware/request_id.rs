/**
 * Request Context Middleware
 *
 * `SetRequestIdLayer` stamps every request with an `x-request-id`. This
 * middleware copies that id into a task-local so the response envelope can
 * echo it without threading it through every handler.
 */

use axum::{extract::Request, middleware::Next, response::Response};

/// Header carrying the request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

tokio::task_local! {
    /// Id of the request being served by the current task
    pub static REQUEST_ID: String;
}

/// Request id of the current task, if it is serving a request
pub fn current_request_id() -> Option<String> {
    REQUEST_ID.try_with(|id| id.clone()).ok()
}

pub async fn request_context(request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    REQUEST_ID.scope(request_id, next.run(request)).await
}
