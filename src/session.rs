use actix_session::{Session, SessionMiddleware, storage::CookieSessionStore};
use actix_web::HttpResponse;
use actix_web::cookie::Key;

const FLASH_KEY: &str = "flash";

/// Signed-cookie session middleware carrying flash messages between redirects.
pub fn session_middleware(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_secure(false)
        .cookie_http_only(true)
        .build()
}

pub fn set_flash(session: &Session, message: &str) {
    if let Err(e) = session.insert(FLASH_KEY, message) {
        log::warn!("Could not store flash message: {e}");
    }
}

pub fn take_flash(session: &Session) -> Option<String> {
    let flash = session.get::<String>(FLASH_KEY).unwrap_or(None);
    if flash.is_some() {
        session.remove(FLASH_KEY);
    }
    flash
}

/// Store a flash message and send the user back to the index page.
pub fn redirect_with_flash(session: &Session, message: &str) -> HttpResponse {
    set_flash(session, message);
    HttpResponse::SeeOther()
        .insert_header(("Location", "/"))
        .finish()
}
