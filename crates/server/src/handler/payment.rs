use crate::{
    middleware::session::{SessionId, session_middleware},
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;
use shared::{
    abstract_trait::DynPaymentStatusService,
    domain::{
        event::InvoiceCallback,
        responses::{ApiResponse, OrderResponse},
    },
    errors::HttpError,
};
use std::sync::Arc;
use tracing::error;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/payment/success/{order_id}",
    tag = "Payment",
    params(("order_id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order marked as paid", body = ApiResponse<OrderResponse>),
        (status = 404, description = "Order not found")
    )
)]
pub async fn payment_success_handler(
    Extension(service): Extension<DynPaymentStatusService>,
    Extension(SessionId(session_id)): Extension<SessionId>,
    Path(order_id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.redirect_success(&session_id, order_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/payment/failed/{order_id}",
    tag = "Payment",
    params(("order_id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order marked as failed", body = ApiResponse<OrderResponse>),
        (status = 404, description = "Order not found")
    )
)]
pub async fn payment_failed_handler(
    Extension(service): Extension<DynPaymentStatusService>,
    Path(order_id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.redirect_failed(order_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/payment/webhook",
    tag = "Payment",
    responses(
        (status = 200, description = "Event acknowledged")
    )
)]
pub async fn payment_webhook_handler(
    Extension(service): Extension<DynPaymentStatusService>,
    Json(payload): Json<InvoiceCallback>,
) -> impl IntoResponse {
    // The provider retries on non-2xx; handling failures are logged and the
    // event is acknowledged either way.
    if let Err(e) = service.apply_webhook(&payload).await {
        error!("❌ Webhook handling error: {e}");
    }

    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

pub fn payment_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let redirects = OpenApiRouter::new()
        .route("/api/payment/success/{order_id}", get(payment_success_handler))
        .route("/api/payment/failed/{order_id}", get(payment_failed_handler))
        .route_layer(middleware::from_fn(session_middleware));

    let webhook = OpenApiRouter::new().route("/api/payment/webhook", post(payment_webhook_handler));

    redirects.merge(webhook).layer(Extension(
        app_state.di_container.payment_status_service.clone(),
    ))
}
