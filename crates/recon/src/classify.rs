use serde_json::Value;

use crate::authority::AuthorityReply;
use crate::config::ResponseShape;
use crate::model::{LookupOutcome, JSON_DECODE_ERROR, UNEXPECTED_SHAPE};

/// Turn a raw authority reply into a [`LookupOutcome`].
///
/// Order of checks: status, JSON parse, object shape, candidate list.
/// The first candidate wins; there is no re-ranking.
pub fn classify_reply(reply: &AuthorityReply, shape: &ResponseShape) -> LookupOutcome {
    if !reply.is_success() {
        return LookupOutcome::ProtocolError(reply.status);
    }

    let body = reply.body.trim_start_matches('\u{feff}');
    let payload: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(e) => return LookupOutcome::InvalidResponse(format!("{JSON_DECODE_ERROR}{e}")),
    };

    let Some(object) = payload.as_object() else {
        return unexpected_shape();
    };

    let candidates = match object.get(&shape.candidates_field) {
        None | Some(Value::Null) => return LookupOutcome::NotFound,
        Some(Value::Array(items)) => items,
        Some(_) => return unexpected_shape(),
    };

    let Some(first) = candidates.first() else {
        return LookupOutcome::NotFound;
    };

    // The registry answers `[null]` when nothing matches. A null ahead of
    // real candidates is not that answer.
    if first.is_null() {
        return if candidates.iter().all(Value::is_null) {
            LookupOutcome::NotFound
        } else {
            unexpected_shape()
        };
    }

    let Some(candidate) = first.as_object() else {
        return unexpected_shape();
    };

    let display = match candidate.get(&shape.display_field) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };

    LookupOutcome::Matched(display)
}

fn unexpected_shape() -> LookupOutcome {
    LookupOutcome::InvalidResponse(UNEXPECTED_SHAPE.to_string())
}
