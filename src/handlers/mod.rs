use actix_web::cookie::{Cookie, SameSite};
use actix_web::HttpRequest;
use uuid::Uuid;

pub mod guess;
pub mod state;

pub const SESSION_COOKIE: &str = "sid";

/// The caller's session token, minted fresh when the cookie is missing.
/// The bool says whether the response needs a Set-Cookie.
fn session_token(req: &HttpRequest) -> (String, bool) {
    match req.cookie(SESSION_COOKIE) {
        Some(cookie) => (cookie.value().to_string(), false),
        None => (Uuid::new_v4().to_string(), true),
    }
}

fn session_cookie(token: &str) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token.to_string())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish()
}
