//! Dictionary-based translation filter

use super::{parse_options, Filter, FilterResult};
use crate::coerce::{describe_text, strict_string};
use crate::error::{Error, Result};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Options for the `translate` filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TranslateOptions {
    #[serde(alias = "valueMap", alias = "value_map")]
    pub table: HashMap<String, String>,
}

/// The `translate` filter
pub struct TranslateFilter;

impl Filter for TranslateFilter {
    fn apply(&self, value: &Value, options: Option<&Value>) -> FilterResult {
        let opts: TranslateOptions = parse_options(self.name(), options)?;
        let key = strict_string(value)?;
        Ok(Value::String(translate(key, &opts.table)?))
    }

    fn check_options(&self, options: Option<&Value>) -> Result<()> {
        parse_options::<TranslateOptions>(self.name(), options).map(|_| ())
    }

    fn name(&self) -> &str {
        "translate"
    }

    fn description(&self) -> &str {
        "Exact-match lookup in a translation table"
    }
}

/// Look a value up as an exact, case-sensitive key in a translation table
///
/// # Example
/// ```rust
/// use std::collections::HashMap;
/// use strfilter::filters::translate::translate;
///
/// let table = HashMap::from([("x".to_string(), "y".to_string())]);
/// assert_eq!(translate("x", &table).unwrap(), "y");
/// assert!(translate("X", &table).is_err());
/// ```
pub fn translate(value: &str, table: &HashMap<String, String>) -> Result<String> {
    table.get(value).cloned().ok_or_else(|| {
        Error::validation(format!(
            "Value {} is not a key in the translation table",
            describe_text(value)
        ))
    })
}
