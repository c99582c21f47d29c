//! Handler model and buffered response writing.
//!
//! # Responsibilities
//! - Define the opaque callable registered under a route expression
//! - Buffer status, headers, and body while a handler runs
//! - Convert the buffered response into an Axum response
//!
//! # Design Decisions
//! - Handlers are synchronous over borrowed requests; any blocking work
//!   belongs to the handler itself, not the dispatch layer
//! - Closures get a blanket `Handler` impl, so `handle_func` is plain
//!   sugar rather than a separate registration path
//! - The writer never fails: status defaults to 200, writes append

use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderValue, Request, Response, StatusCode};

/// A callable capable of producing a response from a request.
///
/// Registered handlers are stored behind `Arc<dyn Handler>` and never
/// inspected beyond invocation.
pub trait Handler: Send + Sync {
    fn serve(&self, req: &Request<Body>, w: &mut ResponseWriter);
}

impl<F> Handler for F
where
    F: Fn(&Request<Body>, &mut ResponseWriter) + Send + Sync,
{
    fn serve(&self, req: &Request<Body>, w: &mut ResponseWriter) {
        self(req, w)
    }
}

/// Buffered response state handed to handlers.
#[derive(Debug)]
pub struct ResponseWriter {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl ResponseWriter {
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: Vec::new(),
        }
    }

    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    pub fn write(&mut self, bytes: &[u8]) {
        self.body.extend_from_slice(bytes);
    }

    pub fn write_str(&mut self, s: &str) {
        self.write(s.as_bytes());
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn into_response(self) -> Response<Body> {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}

impl Default for ResponseWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Handler serving a fixed response, used for config-declared routes.
#[derive(Debug, Clone)]
pub struct StaticResponse {
    status: StatusCode,
    content_type: String,
    body: String,
}

impl StaticResponse {
    pub fn new(status: StatusCode, content_type: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: content_type.into(),
            body: body.into(),
        }
    }
}

impl Handler for StaticResponse {
    fn serve(&self, _req: &Request<Body>, w: &mut ResponseWriter) {
        if let Ok(value) = HeaderValue::from_str(&self.content_type) {
            w.headers_mut().insert(header::CONTENT_TYPE, value);
        }
        w.set_status(self.status);
        w.write_str(&self.body);
    }
}
