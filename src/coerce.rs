//! Strict string coercion
//!
//! Filters that take "any value" only accept values with a lossless textual
//! form. Over the dynamic `serde_json::Value` input that means `Value::String`
//! and nothing else: numbers, booleans, arrays, objects and null are rejected
//! instead of being stringified.
//!
//! Typed callers go through [`FilterText`], the allow-list of Rust types that
//! carry an explicit textual representation.

use crate::error::{Error, Result};
use serde_json::Value;
use std::borrow::Cow;
use std::io;

/// Longest rendering of a value that goes into an error message
const MAX_DESCRIBE_CHARS: usize = 64;

/// Types accepted as text by the typed filter entry points
pub trait FilterText {
    fn as_filter_text(&self) -> &str;
}

impl FilterText for str {
    fn as_filter_text(&self) -> &str {
        self
    }
}

impl FilterText for String {
    fn as_filter_text(&self) -> &str {
        self.as_str()
    }
}

impl FilterText for Cow<'_, str> {
    fn as_filter_text(&self) -> &str {
        self.as_ref()
    }
}

impl FilterText for Box<str> {
    fn as_filter_text(&self) -> &str {
        self
    }
}

/// Coerce a value to a string without any loose conversion
///
/// # Example
/// ```rust
/// use serde_json::json;
/// use strfilter::coerce::strict_string;
///
/// assert_eq!(strict_string(&json!("abc")).unwrap(), "abc");
/// assert!(strict_string(&json!(42)).is_err());
/// ```
pub fn strict_string(value: &Value) -> Result<&str> {
    match value {
        Value::String(s) => Ok(s.as_str()),
        other => Err(Error::validation(format!(
            "Value {} is not a string",
            describe(other)
        ))),
    }
}

/// Render a value for an error message
///
/// Uses compact JSON so strings show up quoted and `null` stays visible.
/// Long renderings are cut short with a trailing `...`. Serialization stops
/// once enough text is buffered, so huge arrays and objects are never
/// rendered in full.
pub fn describe(value: &Value) -> String {
    // Room for one character past the limit, at up to 4 bytes each
    let mut writer = BoundedWriter::new((MAX_DESCRIBE_CHARS + 1) * 4);
    // A full buffer aborts serialization with an error; what was written is kept.
    let _ = serde_json::to_writer(&mut writer, value);

    let rendered = String::from_utf8_lossy(&writer.buf);
    if rendered.chars().count() <= MAX_DESCRIBE_CHARS {
        return rendered.into_owned();
    }

    let mut short: String = rendered.chars().take(MAX_DESCRIBE_CHARS).collect();
    short.push_str("...");
    short
}

/// Byte sink that refuses writes past a fixed limit
struct BoundedWriter {
    buf: Vec<u8>,
    limit: usize,
}

impl BoundedWriter {
    fn new(limit: usize) -> Self {
        Self {
            buf: Vec::with_capacity(limit),
            limit,
        }
    }
}

impl io::Write for BoundedWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let room = self.limit - self.buf.len();
        if room == 0 {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                "description limit reached",
            ));
        }
        let take = room.min(data.len());
        self.buf.extend_from_slice(&data[..take]);
        Ok(take)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Render plain text for an error message, quoted like a JSON string
pub fn describe_text(text: &str) -> String {
    describe(&Value::String(text.to_string()))
}
