use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "session_id";

/// Identifier of the browser session, injected into every request that goes
/// through the session middleware.
#[derive(Debug, Clone)]
pub struct SessionId(pub String);

/// Reads the session cookie, minting a fresh id (and setting the cookie on the
/// way out) when the browser does not carry one yet.
pub async fn session_middleware(jar: CookieJar, mut req: Request, next: Next) -> Response {
    let (jar, session_id) = match jar.get(SESSION_COOKIE) {
        Some(cookie) => {
            let id = cookie.value().to_string();
            (jar, id)
        }
        None => {
            let id = Uuid::new_v4().to_string();
            let cookie = Cookie::build((SESSION_COOKIE, id.clone()))
                .path("/")
                .http_only(true)
                .build();
            (jar.add(cookie), id)
        }
    };

    req.extensions_mut().insert(SessionId(session_id));

    let response = next.run(req).await;

    (jar, response).into_response()
}
