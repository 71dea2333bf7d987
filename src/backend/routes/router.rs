/**
 * Router Configuration
 *
 * Assembles the API routes, the fallback and the HTTP middleware stack.
 *
 * # Middleware Order (outermost first)
 *
 * 1. `SetRequestIdLayer` - stamps `x-request-id` with a UUID unless present
 * 2. `TraceLayer` - request span carrying method, uri and request id
 * 3. `PropagateRequestIdLayer` - copies the id onto the response
 * 4. `CorsLayer` - permissive CORS for browser clients
 * 5. `request_context` - exposes the id to the response envelope
 */

use axum::body::Body;
use axum::http::{HeaderName, Request, Uri};
use axum::middleware::from_fn;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::backend::error::{codes, BackendError};
use crate::backend::middleware::{request_context, REQUEST_ID_HEADER};
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// 404 in the standard envelope for any unmatched path
async fn route_not_found(uri: Uri) -> BackendError {
    BackendError::not_found(codes::ROUTE_NOT_FOUND, format!("No route for {}", uri.path()))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);

    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::new(request_id_header.clone(), MakeRequestUuid))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            let request_id = request
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|value| value.to_str().ok())
                .unwrap_or("-");
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %request_id,
            )
        }))
        .layer(PropagateRequestIdLayer::new(request_id_header))
        .layer(CorsLayer::permissive())
        .layer(from_fn(request_context));

    configure_api_routes(&app_state)
        .fallback(route_not_found)
        .layer(middleware)
        .with_state(app_state)
}
