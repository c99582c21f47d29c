//! Default not-found responder.

use axum::body::Body;
use axum::http::{header, HeaderValue, Request, StatusCode};

use crate::http::handler::{Handler, ResponseWriter};

/// Stateless fallback handler: 404, plain text, canonical reason phrase.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotFound;

impl Handler for NotFound {
    fn serve(&self, _req: &Request<Body>, w: &mut ResponseWriter) {
        w.headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        w.set_status(StatusCode::NOT_FOUND);
        w.write_str(StatusCode::NOT_FOUND.canonical_reason().unwrap_or("Not Found"));
    }
}
