//! Delimiter-based split filter

use super::{parse_options, Filter, FilterResult};
use crate::coerce::describe;
use crate::error::{Error, Result};
use serde::Deserialize;
use serde_json::Value;

/// Default delimiter used by [`split`]
pub const DEFAULT_DELIMITER: &str = ",";

/// Options for the `split` filter
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SplitOptions {
    pub delimiter: String,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
        }
    }
}

impl SplitOptions {
    /// Check the delimiter without splitting anything
    pub fn check(&self) -> Result<()> {
        check_delimiter(&self.delimiter)
    }
}

/// The `split` filter
pub struct SplitFilter;

impl Filter for SplitFilter {
    fn apply(&self, value: &Value, options: Option<&Value>) -> FilterResult {
        let opts: SplitOptions = parse_options(self.name(), options)?;
        let parts = split(value, &opts.delimiter)?;
        Ok(Value::Array(parts.into_iter().map(Value::String).collect()))
    }

    fn check_options(&self, options: Option<&Value>) -> Result<()> {
        parse_options::<SplitOptions>(self.name(), options)?.check()
    }

    fn name(&self) -> &str {
        "split"
    }

    fn description(&self) -> &str {
        "Split a string on a literal delimiter"
    }
}

/// Split a string on every occurrence of a literal delimiter
///
/// Unlike the `string` filter there is no coercion: the value has to be a
/// string already. Empty pieces are kept, so `"a,,b"` yields three parts.
///
/// # Example
/// ```rust
/// use serde_json::json;
/// use strfilter::filters::split::split;
///
/// assert_eq!(split(&json!("a,b,,c"), ",").unwrap(), vec!["a", "b", "", "c"]);
/// ```
pub fn split(value: &Value, delimiter: &str) -> Result<Vec<String>> {
    check_delimiter(delimiter)?;

    let text = value.as_str().ok_or_else(|| {
        Error::validation(format!("Value {} is not a string", describe(value)))
    })?;

    Ok(text.split(delimiter).map(str::to_string).collect())
}

fn check_delimiter(delimiter: &str) -> Result<()> {
    if delimiter.is_empty() {
        return Err(Error::invalid_configuration("Delimiter must not be empty"));
    }
    Ok(())
}
