//! Static-file request handler.
//!
//! # Responsibilities
//! - Accept GET and HEAD, refuse every other method with 501
//! - Map the request path onto the document root without escaping it
//! - Serve files with a guessed content type and `Last-Modified`
//! - Redirect directory URLs to their slash form, then serve an index
//!   file or a generated listing
//!
//! # Design Decisions
//! - `..` is resolved lexically before touching the filesystem, so a
//!   request can never name a path above the root
//! - Symlinks inside the root are followed
//! - File bodies are streamed, never buffered whole

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use new_mime_guess::MimeGuess;
use percent_encoding::percent_decode_str;
use tokio_util::io::ReaderStream;

use crate::http::listing;
use crate::http::path_bytes;
use crate::http::response::{error_page, moved_permanently, not_modified, with_body, HTML_UTF8};

/// Files served in place of a directory listing, in order of preference.
pub const INDEX_FILES: [&str; 2] = ["index.html", "index.htm"];

/// IMF-fixdate, the format of `Last-Modified`.
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Handler state: the directory requests are resolved against.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: Arc<PathBuf>,
}

/// A request path mapped onto the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translated {
    pub path: PathBuf,
    /// Whether the request path ended with `/`.
    pub trailing_slash: bool,
}

impl StaticFiles {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Arc::new(root.into()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Produce the response for one request.
    pub async fn respond(&self, method: &Method, uri: &Uri, headers: &HeaderMap) -> Response {
        let head = if method == Method::HEAD {
            true
        } else if method == Method::GET {
            false
        } else {
            return error_page(
                StatusCode::NOT_IMPLEMENTED,
                &format!("Unsupported method ('{method}')"),
                false,
            );
        };

        let request_path = collapse_leading_slashes(uri.path());
        let target = translate_path(self.root(), &request_path);
        let mut path = target.path;

        if is_dir(&path).await {
            if !request_path.ends_with('/') {
                let mut location = format!("{request_path}/");
                if let Some(query) = uri.query() {
                    location.push('?');
                    location.push_str(query);
                }
                return moved_permanently(&location);
            }

            match find_index(&path).await {
                Some(index) => path = index,
                None => return list_directory(&path, &request_path, head).await,
            }
        } else if target.trailing_slash {
            return error_page(StatusCode::NOT_FOUND, "File not found", head);
        }

        send_file(&path, headers, head).await
    }
}

/// Router fallback: every request lands here.
pub async fn handle(
    State(files): State<StaticFiles>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    files.respond(&method, &uri, &headers).await
}

/// Map a request path onto `root`.
///
/// Query and fragment are dropped, the rest is percent-decoded, `.` and
/// `..` are resolved (never above the root), and empty segments or
/// segments that are not a single plain path component are skipped.
/// Decoding works on bytes, so names that are not UTF-8 stay reachable.
pub fn translate_path(root: &Path, request_path: &str) -> Translated {
    let raw = request_path.split(['?', '#']).next().unwrap_or_default();
    let trailing_slash = raw.trim_end().ends_with('/');
    let decoded: Vec<u8> = percent_decode_str(raw).collect();

    let mut segments: Vec<&[u8]> = Vec::new();
    for segment in decoded.split(|&b| b == b'/') {
        match segment {
            b"" | b"." => {}
            b".." => {
                segments.pop();
            }
            segment => segments.push(segment),
        }
    }

    let mut path = root.to_path_buf();
    for segment in segments.into_iter().map(path_bytes::from_bytes) {
        if is_plain_segment(&segment) {
            path.push(segment);
        }
    }

    Translated {
        path,
        trailing_slash,
    }
}

/// `//a//b` becomes `/a//b`; only the leading run is collapsed.
pub fn collapse_leading_slashes(path: &str) -> String {
    if path.starts_with("//") {
        format!("/{}", path.trim_start_matches('/'))
    } else {
        path.to_string()
    }
}

fn is_plain_segment(segment: &OsStr) -> bool {
    let mut components = Path::new(segment).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

async fn is_dir(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false)
}

async fn find_index(dir: &Path) -> Option<PathBuf> {
    for name in INDEX_FILES {
        let candidate = dir.join(name);
        if let Ok(metadata) = tokio::fs::metadata(&candidate).await {
            if metadata.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}

async fn list_directory(dir: &Path, request_path: &str, head: bool) -> Response {
    let entries = match listing::read_entries(dir).await {
        Ok(entries) => entries,
        Err(err) => {
            tracing::debug!(path = %dir.display(), error = %err, "Directory listing failed");
            return error_page(StatusCode::NOT_FOUND, "No permission to list directory", head);
        }
    };

    let display_path = percent_decode_str(request_path).decode_utf8_lossy();
    let page = listing::render(&display_path, &entries);
    with_body(
        StatusCode::OK,
        HeaderValue::from_static(HTML_UTF8),
        page.into_bytes(),
        head,
    )
}

async fn send_file(path: &Path, headers: &HeaderMap, head: bool) -> Response {
    let file = match tokio::fs::File::open(path).await {
        Ok(file) => file,
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "Open failed");
            return error_page(StatusCode::NOT_FOUND, "File not found", head);
        }
    };
    let metadata = match file.metadata().await {
        Ok(metadata) => metadata,
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "Stat failed");
            return error_page(StatusCode::NOT_FOUND, "File not found", head);
        }
    };

    let last_modified = metadata.modified().ok().and_then(whole_seconds);
    if let Some(modified) = last_modified {
        if is_not_modified(headers, modified) {
            return not_modified();
        }
    }

    let body = if head {
        Body::empty()
    } else {
        Body::from_stream(ReaderStream::new(file))
    };

    let mut response = (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type_for(path)),
            (header::CONTENT_LENGTH, HeaderValue::from(metadata.len())),
        ],
        body,
    )
        .into_response();

    if let Some(modified) = last_modified {
        if let Ok(value) = HeaderValue::from_str(&format_http_date(modified)) {
            response.headers_mut().insert(header::LAST_MODIFIED, value);
        }
    }
    response
}

/// Guess the content type from the extension.
pub fn content_type_for(path: &Path) -> HeaderValue {
    let mime = MimeGuess::from_path(path).first_or_octet_stream();
    HeaderValue::from_str(mime.as_ref())
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"))
}

/// `If-Modified-Since` is honored only without `If-None-Match`, and only
/// when it parses as a UTC date.
fn is_not_modified(headers: &HeaderMap, modified: DateTime<Utc>) -> bool {
    if headers.contains_key(header::IF_NONE_MATCH) {
        return false;
    }
    headers
        .get(header::IF_MODIFIED_SINCE)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_http_date)
        .is_some_and(|since| modified <= since)
}

fn whole_seconds(time: SystemTime) -> Option<DateTime<Utc>> {
    let time: DateTime<Utc> = time.into();
    DateTime::from_timestamp(time.timestamp(), 0)
}

pub fn format_http_date(time: DateTime<Utc>) -> String {
    time.format(HTTP_DATE_FORMAT).to_string()
}

/// Parse an RFC 2822 style date. Dates with a non-zero offset are ignored.
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc2822(value.trim()).ok()?;
    if parsed.offset().local_minus_utc() != 0 {
        return None;
    }
    Some(parsed.with_timezone(&Utc))
}
