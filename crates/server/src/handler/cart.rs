use crate::{
    middleware::{
        session::{SessionId, session_middleware},
        validate::ValidatedJson,
    },
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use shared::{
    abstract_trait::DynCartService,
    domain::{
        requests::{AddCartItemRequest, ApplyVoucherRequest, UpdateCartItemRequest},
        responses::{ApiResponse, CartResponse},
    },
    errors::HttpError,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/cart",
    tag = "Cart",
    responses(
        (status = 200, description = "Cart contents with totals", body = ApiResponse<CartResponse>)
    )
)]
pub async fn view_cart(
    Extension(service): Extension<DynCartService>,
    Extension(SessionId(session_id)): Extension<SessionId>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.view(&session_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/cart/items",
    tag = "Cart",
    request_body = AddCartItemRequest,
    responses(
        (status = 200, description = "Product added to cart", body = ApiResponse<CartResponse>),
        (status = 404, description = "Product not found")
    )
)]
pub async fn add_cart_item(
    Extension(service): Extension<DynCartService>,
    Extension(SessionId(session_id)): Extension<SessionId>,
    ValidatedJson(req): ValidatedJson<AddCartItemRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.add_item(&session_id, &req).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/cart/items/{product_id}",
    tag = "Cart",
    params(("product_id" = i32, Path, description = "Product ID")),
    request_body = UpdateCartItemRequest,
    responses(
        (status = 200, description = "Quantity updated", body = ApiResponse<CartResponse>),
        (status = 400, description = "Item not in cart or invalid quantity")
    )
)]
pub async fn update_cart_item(
    Extension(service): Extension<DynCartService>,
    Extension(SessionId(session_id)): Extension<SessionId>,
    Path(product_id): Path<i32>,
    ValidatedJson(req): ValidatedJson<UpdateCartItemRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_item(&session_id, product_id, &req).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/cart/items/{product_id}",
    tag = "Cart",
    params(("product_id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product removed from cart", body = ApiResponse<CartResponse>)
    )
)]
pub async fn remove_cart_item(
    Extension(service): Extension<DynCartService>,
    Extension(SessionId(session_id)): Extension<SessionId>,
    Path(product_id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.remove_item(&session_id, product_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/cart/voucher",
    tag = "Cart",
    request_body = ApplyVoucherRequest,
    responses(
        (status = 200, description = "Voucher applied", body = ApiResponse<CartResponse>),
        (status = 400, description = "Invalid voucher code")
    )
)]
pub async fn apply_voucher(
    Extension(service): Extension<DynCartService>,
    Extension(SessionId(session_id)): Extension<SessionId>,
    ValidatedJson(req): ValidatedJson<ApplyVoucherRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.apply_voucher(&session_id, &req).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/cart/voucher",
    tag = "Cart",
    responses(
        (status = 200, description = "Voucher removed", body = ApiResponse<CartResponse>)
    )
)]
pub async fn remove_voucher(
    Extension(service): Extension<DynCartService>,
    Extension(SessionId(session_id)): Extension<SessionId>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.remove_voucher(&session_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn cart_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/cart", get(view_cart))
        .route("/api/cart/items", post(add_cart_item))
        .route("/api/cart/items/{product_id}", put(update_cart_item))
        .route("/api/cart/items/{product_id}", delete(remove_cart_item))
        .route("/api/cart/voucher", post(apply_voucher))
        .route("/api/cart/voucher", delete(remove_voucher))
        .route_layer(middleware::from_fn(session_middleware))
        .layer(Extension(app_state.di_container.cart_service.clone()))
}
