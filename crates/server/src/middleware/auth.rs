use crate::middleware::session::SessionId;
use axum::{
    extract::{Extension, Request},
    middleware::Next,
    response::Response,
};
use shared::{abstract_trait::DynSessionStore, errors::HttpError};

/// Rejects anonymous requests and hands the session's user summary to the
/// handler as an extension.
pub async fn require_user(
    Extension(session_store): Extension<DynSessionStore>,
    Extension(SessionId(session_id)): Extension<SessionId>,
    mut req: Request,
    next: Next,
) -> Result<Response, HttpError> {
    let session = session_store
        .load(&session_id)
        .await
        .map_err(HttpError::from)?;

    let user = session
        .user
        .ok_or_else(|| HttpError::Unauthorized("You must be logged in".to_string()))?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

pub async fn require_admin(
    Extension(session_store): Extension<DynSessionStore>,
    Extension(SessionId(session_id)): Extension<SessionId>,
    mut req: Request,
    next: Next,
) -> Result<Response, HttpError> {
    let session = session_store
        .load(&session_id)
        .await
        .map_err(HttpError::from)?;

    let user = session
        .user
        .ok_or_else(|| HttpError::Unauthorized("You must be logged in".to_string()))?;

    if !user.is_admin() {
        return Err(HttpError::Forbidden(
            "Access denied. Admin privileges required.".to_string(),
        ));
    }

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
