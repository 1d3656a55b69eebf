//! Error envelope unwrapping.
//!
//! A failed parse request is reported as an XML (XHTML) document whose first
//! `<pre>` element contains a JSON object such as `{"error": "bad range"}`.
//! The servlet itself writes the bare JSON; the `<pre>` wrapper appears when
//! the body has passed through a browser frame, so both shapes are accepted.
//!
//! # Invariants
//! - Only the first `<pre>` element is considered.
//! - Every violation of the envelope shape maps to a distinct [`EnvelopeError`].

use quick_xml::Reader;
use quick_xml::events::Event;
use serde_json::Value;

use crate::error::EnvelopeError;

/// Extract the server's error message from a failure response body.
///
/// # Errors
///
/// Returns an [`EnvelopeError`] naming the first step of the
/// XML → `<pre>` → JSON → `error` chain that failed.
pub fn extract_error_message(body: &str) -> Result<String, EnvelopeError> {
    let trimmed = body.trim_start();
    let json_text = if trimmed.starts_with('{') {
        trimmed.to_string()
    } else {
        first_pre_text(body)?
    };
    error_field(&json_text)
}

/// Text content of the first `<pre>` element.
fn first_pre_text(body: &str) -> Result<String, EnvelopeError> {
    let mut reader = Reader::from_str(body);
    reader.config_mut().check_end_names = false;

    let mut in_pre = false;
    let mut depth = 0usize;
    let mut text = String::new();

    loop {
        let event = reader
            .read_event()
            .map_err(|e| EnvelopeError::MalformedXml(e.to_string()))?;
        match event {
            Event::Start(e) if !in_pre && is_pre(e.name().as_ref()) => {
                in_pre = true;
            }
            Event::Empty(e) if !in_pre && is_pre(e.name().as_ref()) => {
                return Err(EnvelopeError::EmptyPre);
            }
            Event::Start(_) if in_pre => depth += 1,
            Event::End(_) if in_pre && depth > 0 => depth -= 1,
            Event::End(_) if in_pre => break,
            Event::Text(t) if in_pre => {
                let unescaped = t
                    .unescape()
                    .map_err(|e| EnvelopeError::MalformedXml(e.to_string()))?;
                text.push_str(&unescaped);
            }
            Event::CData(c) if in_pre => {
                text.push_str(&String::from_utf8_lossy(&c.into_inner()));
            }
            Event::Eof => {
                if in_pre {
                    return Err(EnvelopeError::MalformedXml(
                        "unexpected end of document inside <pre>".to_string(),
                    ));
                }
                return Err(EnvelopeError::MissingPre);
            }
            _ => {}
        }
    }

    if text.trim().is_empty() {
        return Err(EnvelopeError::EmptyPre);
    }
    Ok(text)
}

fn is_pre(name: &[u8]) -> bool {
    name.eq_ignore_ascii_case(b"pre")
}

/// The `error` string of a JSON object.
fn error_field(json_text: &str) -> Result<String, EnvelopeError> {
    let value: Value = serde_json::from_str(json_text.trim())
        .map_err(|e| EnvelopeError::InvalidJson(e.to_string()))?;
    value
        .get("error")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(EnvelopeError::MissingErrorField)
}
