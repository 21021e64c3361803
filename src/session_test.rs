use super::*;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::HeaderValue;
use axum::response::IntoResponse;

fn headers_with_cookie(raw: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(COOKIE, HeaderValue::from_str(raw).unwrap());
    headers
}

fn set_cookie_headers(jar: CookieJar) -> Vec<String> {
    jar.into_response()
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_owned())
        .collect()
}

// =============================================================================
// token_from_headers
// =============================================================================

#[test]
fn token_from_headers_reads_cookie() {
    let headers = headers_with_cookie("theme=dark; token=abc123");
    assert_eq!(token_from_headers(&headers).as_deref(), Some("abc123"));
}

#[test]
fn token_from_headers_empty_value_is_none() {
    assert_eq!(token_from_headers(&headers_with_cookie("token=")), None);
}

#[test]
fn token_from_headers_absent_is_none() {
    assert_eq!(token_from_headers(&HeaderMap::new()), None);
}

// =============================================================================
// CookieSession
// =============================================================================

#[test]
fn get_reads_request_cookie() {
    let session = CookieSession::from_headers(&headers_with_cookie("token=xyz"), false);
    assert_eq!(session.get().as_deref(), Some("xyz"));
}

#[test]
fn set_emits_seven_day_cookie() {
    let session = CookieSession::new(CookieJar::new(), true);
    session.set("abc");
    assert_eq!(session.get().as_deref(), Some("abc"));

    let headers = set_cookie_headers(session.into_jar());
    assert_eq!(headers.len(), 1);
    let header = &headers[0];
    assert!(header.starts_with("token=abc"), "{header}");
    assert!(header.contains("Path=/"));
    assert!(header.contains("Max-Age=604800"));
    assert!(header.contains("Secure"));
    assert!(!header.contains("HttpOnly"));
}

#[test]
fn clear_emits_zero_age_cookie_even_without_request_cookie() {
    let session = CookieSession::new(CookieJar::new(), false);
    session.clear();
    assert_eq!(session.get(), None);

    let headers = set_cookie_headers(session.into_jar());
    assert_eq!(headers.len(), 1);
    assert!(headers[0].starts_with("token="));
    assert!(headers[0].contains("Max-Age=0"));
    assert!(!headers[0].contains("Secure"));
}

#[test]
fn clear_after_set_leaves_session_empty() {
    let session = CookieSession::from_headers(&headers_with_cookie("token=old"), false);
    session.set("new");
    session.clear();
    assert_eq!(session.get(), None);
}

#[test]
fn untouched_session_emits_no_set_cookie() {
    let session = CookieSession::from_headers(&headers_with_cookie("token=old"), false);
    assert!(set_cookie_headers(session.into_jar()).is_empty());
}
