//! Route expression parsing and validation.
//!
//! # Responsibilities
//! - Compile a route expression into matchable segments
//! - Reject malformed expressions before they reach the engine
//! - Back the public `is_valid` passthrough
//!
//! # Design Decisions
//! - Expressions are segment-based, not regex (deterministic, O(n) match)
//! - `:name` binds a single segment; `*` swallows the remaining path
//! - `*` is only legal as the final segment

use crate::routing::matcher::RouteError;

/// One compiled segment of a route expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Matches the segment text exactly (case-sensitive).
    Literal(String),
    /// Matches any single segment, capturing under the given name.
    Param(String),
    /// Matches zero or more trailing segments.
    Wildcard,
}

/// Compile an expression like `/users/:id` or `/static/*` into segments.
///
/// The root expression `/` compiles to an empty segment list.
pub fn compile(expr: &str) -> Result<Vec<Segment>, RouteError> {
    let invalid = |reason: &str| RouteError::InvalidExpression {
        expr: expr.to_string(),
        reason: reason.to_string(),
    };

    let Some(rest) = expr.strip_prefix('/') else {
        return Err(invalid("must start with '/'"));
    };
    if rest.is_empty() {
        return Ok(Vec::new());
    }

    let raw: Vec<&str> = rest.split('/').collect();
    let mut segments = Vec::with_capacity(raw.len());
    for (i, seg) in raw.iter().enumerate() {
        if seg.is_empty() {
            return Err(invalid("empty segment"));
        }
        if *seg == "*" {
            if i != raw.len() - 1 {
                return Err(invalid("'*' is only allowed as the final segment"));
            }
            segments.push(Segment::Wildcard);
        } else if let Some(name) = seg.strip_prefix(':') {
            if name.is_empty() {
                return Err(invalid("parameter segment needs a name"));
            }
            if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(invalid("parameter name must be alphanumeric"));
            }
            segments.push(Segment::Param(name.to_string()));
        } else {
            segments.push(Segment::Literal((*seg).to_string()));
        }
    }
    Ok(segments)
}

/// Whether an expression would be accepted by [`compile`].
pub fn is_valid(expr: &str) -> bool {
    compile(expr).is_ok()
}

/// True when the compiled expression contains no params or wildcards,
/// i.e. it matches exactly one concrete path.
pub fn is_exact(segments: &[Segment]) -> bool {
    segments
        .iter()
        .all(|s| matches!(s, Segment::Literal(_)))
}

/// Match a request path against compiled segments.
pub fn matches(segments: &[Segment], path: &str) -> bool {
    let Some(rest) = path.strip_prefix('/') else {
        return false;
    };
    let parts: Vec<&str> = if rest.is_empty() {
        Vec::new()
    } else {
        rest.split('/').collect()
    };

    let mut i = 0;
    for seg in segments {
        match seg {
            Segment::Wildcard => return true,
            Segment::Literal(lit) => {
                if parts.get(i).copied() != Some(lit.as_str()) {
                    return false;
                }
            }
            Segment::Param(_) => {
                if parts.get(i).is_none() {
                    return false;
                }
            }
        }
        i += 1;
    }
    i == parts.len()
}
