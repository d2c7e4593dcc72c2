//! Length-bounded string filter

use super::{parse_options, Filter, FilterResult};
use crate::coerce::{describe_text, strict_string, FilterText};
use crate::error::{Error, Result};
use serde::Deserialize;
use serde_json::Value;

/// Default lower length bound
pub const DEFAULT_MIN_LENGTH: i64 = 1;

/// Default upper length bound
pub const DEFAULT_MAX_LENGTH: i64 = i64::MAX;

/// Options for the `string` filter
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct StringOptions {
    #[serde(alias = "allow_null")]
    pub allow_null: bool,
    #[serde(alias = "min_length")]
    pub min_length: i64,
    #[serde(alias = "max_length")]
    pub max_length: i64,
}

impl Default for StringOptions {
    fn default() -> Self {
        Self {
            allow_null: false,
            min_length: DEFAULT_MIN_LENGTH,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

impl StringOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allow_null(mut self, allow: bool) -> Self {
        self.allow_null = allow;
        self
    }

    pub fn min_length(mut self, min: i64) -> Self {
        self.min_length = min;
        self
    }

    pub fn max_length(mut self, max: i64) -> Self {
        self.max_length = max;
        self
    }

    pub fn length_range(mut self, min: i64, max: i64) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    /// Check the bounds without filtering anything
    pub fn check(&self) -> Result<()> {
        length_bounds(self.min_length, self.max_length).map(|_| ())
    }

    /// Run the filter with these options
    pub fn apply(&self, value: &Value) -> Result<Option<String>> {
        validate(value, self.allow_null, self.min_length, self.max_length)
    }
}

/// The `string` filter
pub struct StringFilter;

impl Filter for StringFilter {
    fn apply(&self, value: &Value, options: Option<&Value>) -> FilterResult {
        let opts: StringOptions = parse_options(self.name(), options)?;
        Ok(opts.apply(value)?.map_or(Value::Null, Value::String))
    }

    fn check_options(&self, options: Option<&Value>) -> Result<()> {
        parse_options::<StringOptions>(self.name(), options)?.check()
    }

    fn name(&self) -> &str {
        "string"
    }

    fn description(&self) -> &str {
        "String whose byte length lies within bounds"
    }
}

/// Check that a value is a string whose byte length lies within bounds
///
/// Null passes through as `None` only when `allow_null` is set. The bounds
/// are checked independently of each other, so `min_length > max_length`
/// is accepted as configuration and simply rejects every string.
///
/// # Example
/// ```rust
/// use serde_json::json;
/// use strfilter::filters::string::validate;
///
/// assert_eq!(validate(&json!("abc"), false, 3, 5).unwrap(), Some("abc".to_string()));
/// assert!(validate(&json!("ab"), false, 3, 5).is_err());
/// assert_eq!(validate(&json!(null), true, 1, 10).unwrap(), None);
/// ```
pub fn validate(
    value: &Value,
    allow_null: bool,
    min_length: i64,
    max_length: i64,
) -> Result<Option<String>> {
    let (min, max) = length_bounds(min_length, max_length)?;

    if value.is_null() {
        if allow_null {
            return Ok(None);
        }
        return Err(Error::validation("Value is null and null is not allowed"));
    }

    let text = strict_string(value)?;
    check_length(text, min, max)?;
    Ok(Some(text.to_string()))
}

/// Typed counterpart of [`validate`] for callers that already hold text
pub fn validate_text<T: FilterText + ?Sized>(
    value: Option<&T>,
    allow_null: bool,
    min_length: i64,
    max_length: i64,
) -> Result<Option<String>> {
    let (min, max) = length_bounds(min_length, max_length)?;

    match value {
        None if allow_null => Ok(None),
        None => Err(Error::validation("Value is null and null is not allowed")),
        Some(value) => {
            let text = value.as_filter_text();
            check_length(text, min, max)?;
            Ok(Some(text.to_string()))
        }
    }
}

fn length_bounds(min_length: i64, max_length: i64) -> Result<(u64, u64)> {
    let min = u64::try_from(min_length).map_err(|_| {
        Error::invalid_configuration(format!(
            "minLength must be zero or greater, got {}",
            min_length
        ))
    })?;
    let max = u64::try_from(max_length).map_err(|_| {
        Error::invalid_configuration(format!(
            "maxLength must be zero or greater, got {}",
            max_length
        ))
    })?;
    Ok((min, max))
}

// Length is measured in bytes, not characters.
fn check_length(text: &str, min: u64, max: u64) -> Result<()> {
    let length = text.len() as u64;
    if length < min {
        return Err(Error::validation(format!(
            "String {} with length {} is shorter than the minimum length {}",
            describe_text(text),
            length,
            min
        )));
    }
    if length > max {
        return Err(Error::validation(format!(
            "String {} with length {} is longer than the maximum length {}",
            describe_text(text),
            length,
            max
        )));
    }
    Ok(())
}
