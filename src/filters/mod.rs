//! Filter plug-in system
//!
//! Every filter follows the same calling convention: it receives the raw
//! input value plus an optional map of named options and returns either the
//! transformed value or an error. The registry holds filters by name so an
//! external chain executor can look them up from configuration.
//!
//! Built-in filters:
//! - `string` - length-bounded string check ([`string::validate`])
//! - `split` - literal delimiter split ([`split::split`])
//! - `translate` - exact-match dictionary lookup ([`translate::translate`])
//! - `concat` - prefix/suffix wrapping ([`concat::concat`])
//! - `strip_markup` - tag removal ([`markup::strip_markup`])

pub mod concat;
pub mod markup;
pub mod split;
pub mod string;
pub mod translate;

pub use concat::{concat, concat_text, ConcatFilter, ConcatOptions};
pub use markup::{strip_markup, strip_markup_with, MarkupFilter, MarkupOptions};
pub use split::{split, SplitFilter, SplitOptions};
pub use string::{validate, validate_text, StringFilter, StringOptions};
pub use translate::{translate, TranslateFilter, TranslateOptions};

use crate::coerce::describe;
use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Result type for filters
pub type FilterResult = Result<Value>;

/// Trait for filters
///
/// Implement this trait to plug custom filters into a [`FilterRegistry`].
pub trait Filter: Send + Sync {
    /// Apply the filter
    ///
    /// # Arguments
    /// * `value` - The raw input value
    /// * `options` - Optional filter options, usually a JSON object
    ///
    /// # Returns
    /// The filtered value, or a validation or configuration error
    fn apply(&self, value: &Value, options: Option<&Value>) -> FilterResult;

    /// Check options ahead of time, without any input value
    ///
    /// Lets configuration be rejected at load time instead of on the first
    /// record. The default accepts anything.
    fn check_options(&self, _options: Option<&Value>) -> Result<()> {
        Ok(())
    }

    /// Get the filter's name
    fn name(&self) -> &str {
        "unnamed"
    }

    /// Get the filter's description
    fn description(&self) -> &str {
        "No description available"
    }
}

/// Function-based filter implementation
struct FunctionFilter<F>
where
    F: Fn(&Value, Option<&Value>) -> FilterResult + Send + Sync,
{
    func: F,
    name: String,
    description: String,
}

impl<F> Filter for FunctionFilter<F>
where
    F: Fn(&Value, Option<&Value>) -> FilterResult + Send + Sync,
{
    fn apply(&self, value: &Value, options: Option<&Value>) -> FilterResult {
        (self.func)(value, options)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Deserialize filter options, falling back to defaults when absent
///
/// Malformed options are a configuration error, never a validation error.
pub fn parse_options<T>(filter: &str, options: Option<&Value>) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    match options {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value) => T::deserialize(value).map_err(|e| {
            Error::invalid_configuration(format!(
                "Invalid options for filter '{}': {}",
                filter, e
            ))
        }),
    }
}

/// Registry for filters
pub struct FilterRegistry {
    filters: HashMap<String, Arc<dyn Filter>>,
}

// Manual Debug implementation since Arc<dyn Filter> doesn't implement Debug
impl std::fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterRegistry")
            .field("filter_count", &self.filters.len())
            .field("filter_names", &self.list())
            .finish()
    }
}

impl FilterRegistry {
    /// Create a registry holding the built-in filters
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register_builtin_filters();
        registry
    }

    /// Create a registry with no filters at all
    pub fn empty() -> Self {
        Self {
            filters: HashMap::new(),
        }
    }

    /// Register a filter, replacing any filter of the same name
    pub fn register(&mut self, name: &str, filter: impl Filter + 'static) {
        log::debug!("Registering filter: {}", name);
        self.filters.insert(name.to_string(), Arc::new(filter));
    }

    /// Register a function as a filter
    pub fn register_fn<F>(&mut self, name: &str, description: &str, func: F)
    where
        F: Fn(&Value, Option<&Value>) -> FilterResult + Send + Sync + 'static,
    {
        let filter = FunctionFilter {
            func,
            name: name.to_string(),
            description: description.to_string(),
        };
        self.register(name, filter);
    }

    /// Get a filter by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Filter>> {
        self.filters.get(name).cloned()
    }

    /// Check if a filter exists
    pub fn exists(&self, name: &str) -> bool {
        self.filters.contains_key(name)
    }

    /// Get the number of registered filters
    pub fn count(&self) -> usize {
        self.filters.len()
    }

    /// List all registered filter names, sorted
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.filters.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check options for a named filter without applying it
    pub fn check(&self, filter_name: &str, options: Option<&Value>) -> Result<()> {
        self.lookup(filter_name)?.check_options(options)
    }

    /// Apply a named filter to a value
    pub fn apply(&self, filter_name: &str, value: &Value, options: Option<&Value>) -> FilterResult {
        let filter = self.lookup(filter_name)?;

        log::trace!("Applying filter '{}' to {}", filter_name, describe(value));
        filter.apply(value, options).map_err(|e| {
            log::debug!("Filter '{}' failed: {}", filter_name, e);
            e
        })
    }

    fn lookup(&self, filter_name: &str) -> Result<&Arc<dyn Filter>> {
        self.filters.get(filter_name).ok_or_else(|| {
            Error::invalid_configuration(format!("Filter '{}' not found", filter_name))
        })
    }

    /// Register built-in filters
    fn register_builtin_filters(&mut self) {
        self.register("string", StringFilter);
        self.register("split", SplitFilter);
        self.register("translate", TranslateFilter);
        self.register("concat", ConcatFilter);
        self.register("strip_markup", MarkupFilter);
    }
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builtin_filters_registered() {
        let registry = FilterRegistry::new();
        assert_eq!(registry.count(), 5);
        assert_eq!(
            registry.list(),
            vec!["concat", "split", "string", "strip_markup", "translate"]
        );
        assert_eq!(registry.get("split").unwrap().name(), "split");
        assert!(!registry.exists("trim"));
    }

    #[test]
    fn test_unknown_filter_is_configuration_error() {
        let registry = FilterRegistry::new();
        let err = registry.apply("trim", &json!("x"), None).unwrap_err();
        assert!(err.is_invalid_configuration());
        assert!(err.to_string().contains("'trim'"));
    }

    #[test]
    fn test_string_filter() {
        let registry = FilterRegistry::new();

        assert_eq!(
            registry.apply("string", &json!("abc"), None).unwrap(),
            json!("abc")
        );
        assert!(registry
            .apply("string", &json!(null), None)
            .unwrap_err()
            .is_validation());
        assert_eq!(
            registry
                .apply("string", &json!(null), Some(&json!({"allowNull": true})))
                .unwrap(),
            Value::Null
        );

        let options = json!({"minLength": 3, "maxLength": 5});
        assert!(registry.apply("string", &json!("ab"), Some(&options)).is_err());
        assert!(registry.apply("string", &json!("abc"), Some(&options)).is_ok());
        assert!(registry
            .apply("string", &json!("abcdef"), Some(&options))
            .is_err());

        let negative = json!({"minLength": -1});
        assert!(registry
            .apply("string", &json!("abc"), Some(&negative))
            .unwrap_err()
            .is_invalid_configuration());
    }

    #[test]
    fn test_split_filter() {
        let registry = FilterRegistry::new();

        assert_eq!(
            registry.apply("split", &json!("a,b,,c"), None).unwrap(),
            json!(["a", "b", "", "c"])
        );
        assert_eq!(
            registry
                .apply("split", &json!("a|b"), Some(&json!({"delimiter": "|"})))
                .unwrap(),
            json!(["a", "b"])
        );
        assert!(registry
            .apply("split", &json!("x"), Some(&json!({"delimiter": ""})))
            .unwrap_err()
            .is_invalid_configuration());
        assert!(registry
            .apply("split", &json!(42), None)
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_translate_filter() {
        let registry = FilterRegistry::new();
        let options = json!({"table": {"x": "y"}});

        assert_eq!(
            registry.apply("translate", &json!("x"), Some(&options)).unwrap(),
            json!("y")
        );
        assert!(registry
            .apply("translate", &json!("z"), Some(&options))
            .unwrap_err()
            .is_validation());
        assert!(registry
            .apply("translate", &json!(1), Some(&options))
            .unwrap_err()
            .is_validation());

        // The legacy option name is accepted too
        let legacy = json!({"valueMap": {"x": "y"}});
        assert_eq!(
            registry.apply("translate", &json!("x"), Some(&legacy)).unwrap(),
            json!("y")
        );

        // Tables must map strings to strings
        let untyped = json!({"table": {"x": 1}});
        assert!(registry
            .apply("translate", &json!("x"), Some(&untyped))
            .unwrap_err()
            .is_invalid_configuration());
    }

    #[test]
    fn test_concat_filter() {
        let registry = FilterRegistry::new();
        let options = json!({"prefix": "pre-", "suffix": "-post"});

        assert_eq!(
            registry.apply("concat", &json!("mid"), Some(&options)).unwrap(),
            json!("pre-mid-post")
        );
        assert!(registry
            .apply("concat", &json!(null), None)
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_strip_markup_filter() {
        let registry = FilterRegistry::new();

        assert_eq!(
            registry.apply("strip_markup", &json!(null), None).unwrap(),
            Value::Null
        );
        assert_eq!(
            registry
                .apply("strip_markup", &json!("<b>hi</b> there"), None)
                .unwrap(),
            json!("hi there")
        );
        assert_eq!(
            registry
                .apply(
                    "strip_markup",
                    &json!("a<br>b"),
                    Some(&json!({"replacement": "\n"}))
                )
                .unwrap(),
            json!("a\nb")
        );
        assert!(registry
            .apply("strip_markup", &json!(3), None)
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_unknown_option_is_configuration_error() {
        let registry = FilterRegistry::new();
        let err = registry
            .apply("concat", &json!("x"), Some(&json!({"prefx": "a"})))
            .unwrap_err();
        assert!(err.is_invalid_configuration());
        assert!(err.to_string().contains("concat"));
    }

    #[test]
    fn test_check_options_without_value() {
        let registry = FilterRegistry::new();

        assert!(registry.check("string", None).is_ok());
        assert!(registry
            .check("string", Some(&json!({"maxLength": -5})))
            .unwrap_err()
            .is_invalid_configuration());
        assert!(registry
            .check("split", Some(&json!({"delimiter": ""})))
            .unwrap_err()
            .is_invalid_configuration());
        assert!(registry
            .check("translate", Some(&json!({"table": ["x"]})))
            .is_err());
        assert!(registry.check("nope", None).is_err());

        // Custom function filters accept any options
        let mut registry = registry;
        registry.register_fn("identity", "Returns the value", |value, _| Ok(value.clone()));
        assert!(registry.check("identity", Some(&json!({"any": 1}))).is_ok());
    }

    #[test]
    fn test_custom_filter() {
        let mut registry = FilterRegistry::new();
        registry.register_fn("upper", "Uppercase a string", |value, _| {
            let text = crate::coerce::strict_string(value)?;
            Ok(Value::String(text.to_uppercase()))
        });

        assert!(registry.exists("upper"));
        assert_eq!(registry.count(), 6);
        assert_eq!(
            registry.get("upper").unwrap().description(),
            "Uppercase a string"
        );
        assert_eq!(
            registry.apply("upper", &json!("abc"), None).unwrap(),
            json!("ABC")
        );
    }
}
