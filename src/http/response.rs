//! Response construction helpers.
//!
//! # Responsibilities
//! - HTML error pages with the status code and reason
//! - Permanent redirects for directory URLs missing their slash
//! - HEAD handling: same headers, empty body

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

/// Content type of generated HTML documents.
pub const HTML_UTF8: &str = "text/html; charset=utf-8";

/// Content type of error pages.
pub const ERROR_CONTENT_TYPE: &str = "text/html;charset=utf-8";

/// Build a response whose `Content-Length` reflects `body` even when the
/// body is withheld for a HEAD request.
pub fn with_body(status: StatusCode, content_type: HeaderValue, body: Vec<u8>, head: bool) -> Response {
    let length = HeaderValue::from(body.len());
    let body = if head { Body::empty() } else { Body::from(body) };
    (
        status,
        [(header::CONTENT_TYPE, content_type), (header::CONTENT_LENGTH, length)],
        body,
    )
        .into_response()
}

/// An HTML error page. The connection is closed after it is sent.
pub fn error_page(status: StatusCode, message: &str, head: bool) -> Response {
    let code = status.as_u16();
    let explain = explanation(status);
    let page = format!(
        "<!DOCTYPE HTML>\n\
         <html lang=\"en\">\n    \
         <head>\n        \
         <meta charset=\"utf-8\">\n        \
         <title>Error response</title>\n    \
         </head>\n    \
         <body>\n        \
         <h1>Error response</h1>\n        \
         <p>Error code: {code}</p>\n        \
         <p>Message: {message}.</p>\n        \
         <p>Error code explanation: {code} - {explain}.</p>\n    \
         </body>\n\
         </html>\n",
        message = escape_html(message),
    );

    let mut response = with_body(
        status,
        HeaderValue::from_static(ERROR_CONTENT_TYPE),
        page.into_bytes(),
        head,
    );
    response
        .headers_mut()
        .insert(header::CONNECTION, HeaderValue::from_static("close"));
    response
}

/// Long-form description of the statuses this server emits.
pub fn explanation(status: StatusCode) -> &'static str {
    match status {
        StatusCode::MOVED_PERMANENTLY => "Object moved permanently -- see URI list",
        StatusCode::NOT_MODIFIED => "Document has not changed since given time",
        StatusCode::BAD_REQUEST => "Bad request syntax or unsupported method",
        StatusCode::NOT_FOUND => "Nothing matches the given URI",
        StatusCode::NOT_IMPLEMENTED => "Server does not support this operation",
        other => other.canonical_reason().unwrap_or("Unknown"),
    }
}

/// `301 Moved Permanently` to `location`, with an empty body.
pub fn moved_permanently(location: &str) -> Response {
    let location = match HeaderValue::from_str(location) {
        Ok(value) => value,
        Err(_) => return error_page(StatusCode::BAD_REQUEST, "Bad request path", false),
    };
    (
        StatusCode::MOVED_PERMANENTLY,
        [
            (header::LOCATION, location),
            (header::CONTENT_LENGTH, HeaderValue::from(0usize)),
        ],
    )
        .into_response()
}

/// `304 Not Modified`, no body.
pub fn not_modified() -> Response {
    StatusCode::NOT_MODIFIED.into_response()
}

/// Escape text for inclusion in HTML element content.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            c => escaped.push(c),
        }
    }
    escaped
}
