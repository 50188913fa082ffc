use crate::{
    handler::checkout::outcome_response,
    middleware::{
        auth::{require_admin, require_user},
        session::{SessionId, session_middleware},
        validate::ValidatedJson,
    },
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Path, Query},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use shared::{
    abstract_trait::{DynCheckoutService, DynOrderCommandService, DynOrderQueryService},
    domain::{
        requests::{FindAllOrders, UpdateOrderStatusRequest},
        responses::{
            ApiResponse, ApiResponsePagination, OrderDetailResponse, OrderResponse,
        },
        session::UserSession,
    },
    errors::HttpError,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/orders/history",
    tag = "Order",
    responses(
        (status = 200, description = "Order history, newest first", body = ApiResponse<Vec<OrderDetailResponse>>),
        (status = 401, description = "Login required")
    )
)]
pub async fn get_order_history(
    Extension(service): Extension<DynOrderQueryService>,
    Extension(user): Extension<UserSession>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.order_history(user.id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "Order",
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order details", body = ApiResponse<OrderDetailResponse>),
        (status = 404, description = "Order not found or not yours"),
        (status = 401, description = "Login required")
    )
)]
pub async fn get_order(
    Extension(service): Extension<DynOrderQueryService>,
    Extension(user): Extension<UserSession>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.order_detail(id, user.id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/orders/{id}/pay",
    tag = "Order",
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 303, description = "Redirect to a fresh hosted invoice"),
        (status = 400, description = "Order is already paid"),
        (status = 404, description = "Order not found or not yours"),
        (status = 401, description = "Login required")
    )
)]
pub async fn pay_order_handler(
    Extension(service): Extension<DynCheckoutService>,
    Extension(SessionId(session_id)): Extension<SessionId>,
    Path(id): Path<i32>,
) -> Result<Response, HttpError> {
    let outcome = service.retry_payment(&session_id, id).await?;
    Ok(outcome_response(outcome))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders",
    tag = "Order",
    params(FindAllOrders),
    responses(
        (status = 200, description = "All orders", body = ApiResponsePagination<Vec<OrderResponse>>),
        (status = 403, description = "Admin privileges required")
    )
)]
pub async fn get_orders(
    Extension(service): Extension<DynOrderQueryService>,
    Query(params): Query<FindAllOrders>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/admin/orders/{id}/status",
    tag = "Order",
    params(("id" = i32, Path, description = "Order ID")),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Order status updated", body = ApiResponse<OrderResponse>),
        (status = 400, description = "Unknown status"),
        (status = 404, description = "Order not found"),
        (status = 403, description = "Admin privileges required")
    )
)]
pub async fn update_order_status(
    Extension(service): Extension<DynOrderCommandService>,
    Path(id): Path<i32>,
    ValidatedJson(req): ValidatedJson<UpdateOrderStatusRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_status(id, &req).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn order_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let user = OpenApiRouter::new()
        .route("/api/orders/history", get(get_order_history))
        .route("/api/orders/{id}", get(get_order))
        .route("/api/orders/{id}/pay", post(pay_order_handler))
        .route_layer(middleware::from_fn(require_user))
        .route_layer(middleware::from_fn(session_middleware))
        .layer(Extension(app_state.di_container.order_query_service.clone()))
        .layer(Extension(app_state.di_container.checkout_service.clone()))
        .layer(Extension(app_state.session_store.clone()));

    let admin = OpenApiRouter::new()
        .route("/api/admin/orders", get(get_orders))
        .route("/api/admin/orders/{id}/status", put(update_order_status))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn(session_middleware))
        .layer(Extension(app_state.di_container.order_query_service.clone()))
        .layer(Extension(
            app_state.di_container.order_command_service.clone(),
        ))
        .layer(Extension(app_state.session_store.clone()));

    user.merge(admin)
}
