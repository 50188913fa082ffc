use crate::{
    middleware::{
        auth::require_user,
        session::{SessionId, session_middleware},
        validate::ValidatedJson,
    },
    state::AppState,
};
use axum::{
    Json,
    extract::Extension,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Redirect, Response},
    routing::post,
};
use shared::{
    abstract_trait::{DynCartService, DynCheckoutService},
    domain::{
        requests::ShippingInfoRequest,
        responses::{ApiResponse, CartResponse, CheckoutOutcome},
    },
    errors::HttpError,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

/// An issued invoice turns into a redirect to the hosted payment page; a
/// demo order comes back as JSON.
pub fn outcome_response(outcome: CheckoutOutcome) -> Response {
    match outcome {
        CheckoutOutcome::Invoice { invoice_url, .. } => Redirect::to(&invoice_url).into_response(),
        demo @ CheckoutOutcome::PendingDemo { .. } => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                "Order created as pending; payment gateway not configured (demo)",
                demo,
            )),
        )
            .into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/checkout/shipping",
    tag = "Checkout",
    request_body = ShippingInfoRequest,
    responses(
        (status = 200, description = "Shipping information saved", body = ApiResponse<CartResponse>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Login required")
    )
)]
pub async fn save_shipping_handler(
    Extension(service): Extension<DynCartService>,
    Extension(SessionId(session_id)): Extension<SessionId>,
    ValidatedJson(req): ValidatedJson<ShippingInfoRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.save_shipping(&session_id, &req).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/checkout",
    tag = "Checkout",
    responses(
        (status = 303, description = "Redirect to the hosted invoice"),
        (status = 201, description = "Demo order created", body = ApiResponse<CheckoutOutcome>),
        (status = 400, description = "Empty cart, missing shipping info or insufficient stock"),
        (status = 401, description = "Login required"),
        (status = 502, description = "Payment gateway error; the order stays pending")
    )
)]
pub async fn checkout_handler(
    Extension(service): Extension<DynCheckoutService>,
    Extension(SessionId(session_id)): Extension<SessionId>,
) -> Result<Response, HttpError> {
    let outcome = service.checkout(&session_id).await?;
    Ok(outcome_response(outcome))
}

pub fn checkout_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/checkout/shipping", post(save_shipping_handler))
        .route("/api/checkout", post(checkout_handler))
        .route_layer(middleware::from_fn(require_user))
        .route_layer(middleware::from_fn(session_middleware))
        .layer(Extension(app_state.di_container.cart_service.clone()))
        .layer(Extension(app_state.di_container.checkout_service.clone()))
        .layer(Extension(app_state.session_store.clone()))
}
