//! strfilter - stateless string filters for data-filtering pipelines
//!
//! strfilter provides small, pure filter functions that a pipeline applies
//! to one record at a time:
//! - `string` - strict string check with byte-length bounds
//! - `split` - literal delimiter split
//! - `translate` - exact-match dictionary lookup
//! - `concat` - prefix/suffix wrapping
//! - `strip_markup` - tag removal that keeps null as null
//!
//! Each filter is available as a plain function and as a [`Filter`] plug-in
//! behind the common `(value, options) -> value` calling convention.
//!
//! # Usage
//! ```rust
//! use strfilter::{json, FilterRegistry};
//!
//! let registry = FilterRegistry::new();
//! let out = registry
//!     .apply("concat", &json!("mid"), Some(&json!({"prefix": "pre-", "suffix": "-post"})))
//!     .unwrap();
//! assert_eq!(out, json!("pre-mid-post"));
//! ```

// Enforce error handling best practices
#![cfg_attr(
    not(test),
    warn(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
    )
)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used,))]

pub mod coerce;
pub mod error;
pub mod filters;

// Named filter presets loaded from TOML
#[cfg(feature = "config")]
pub mod config;

// Re-export main types for public API
pub use coerce::{strict_string, FilterText};
pub use error::{Error, Result};
pub use filters::{
    concat, concat_text, split, strip_markup, strip_markup_with, translate, validate,
    validate_text, Filter, FilterRegistry, FilterResult,
};

#[cfg(feature = "config")]
pub use config::{FilterConfig, FilterPreset};

// Re-export commonly used external types
pub use serde_json::{json, Value};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::*;
    pub use crate::filters::{
        ConcatOptions, MarkupOptions, SplitOptions, StringOptions, TranslateOptions,
    };
}
