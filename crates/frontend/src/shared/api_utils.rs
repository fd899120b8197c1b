//! API base-URL construction for frontend-backend communication.

/// Backend port; the frontend bundle is served separately in development.
const BACKEND_PORT: u16 = 3000;

/// Base URL for API requests, derived from the current window location.
///
/// Returns an empty string outside a browser context, which keeps relative
/// URLs working in that case.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, BACKEND_PORT)
}
