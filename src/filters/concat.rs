//! Prefix/suffix concatenation filter

use super::{parse_options, Filter, FilterResult};
use crate::coerce::{strict_string, FilterText};
use crate::error::Result;
use serde::Deserialize;
use serde_json::Value;

/// Options for the `concat` filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConcatOptions {
    pub prefix: String,
    pub suffix: String,
}

/// The `concat` filter
pub struct ConcatFilter;

impl Filter for ConcatFilter {
    fn apply(&self, value: &Value, options: Option<&Value>) -> FilterResult {
        let opts: ConcatOptions = parse_options(self.name(), options)?;
        Ok(Value::String(concat(value, &opts.prefix, &opts.suffix)?))
    }

    fn check_options(&self, options: Option<&Value>) -> Result<()> {
        parse_options::<ConcatOptions>(self.name(), options).map(|_| ())
    }

    fn name(&self) -> &str {
        "concat"
    }

    fn description(&self) -> &str {
        "Wrap a string with a prefix and a suffix"
    }
}

/// Wrap a strictly coerced string with a prefix and a suffix
///
/// # Example
/// ```rust
/// use serde_json::json;
/// use strfilter::filters::concat::concat;
///
/// assert_eq!(concat(&json!("mid"), "pre-", "-post").unwrap(), "pre-mid-post");
/// assert!(concat(&json!(null), "", "").is_err());
/// ```
pub fn concat(value: &Value, prefix: &str, suffix: &str) -> Result<String> {
    let text = strict_string(value)?;
    Ok(concat_text(text, prefix, suffix))
}

/// Typed counterpart of [`concat`]; cannot fail
pub fn concat_text<T: FilterText + ?Sized>(value: &T, prefix: &str, suffix: &str) -> String {
    let text = value.as_filter_text();
    let mut out = String::with_capacity(prefix.len() + text.len() + suffix.len());
    out.push_str(prefix);
    out.push_str(text);
    out.push_str(suffix);
    out
}
