//! Markup stripping filter
//!
//! Removes `<...>` tags and keeps everything else verbatim. There is no HTML
//! parsing and no entity decoding; text between `<script>` tags survives as
//! text.
//!
//! Boundary rules for malformed input:
//! - `<` opens a tag only when followed by a letter, `/`, `!`, `?` or another
//!   `<`. Otherwise it is literal text, so `1 < 2` is left alone.
//! - `<!--` opens a comment that runs to the next `-->`, whatever it
//!   contains, and is removed as a single tag.
//! - Inside a tag, quoted attribute values may contain `>`, and each nested
//!   `<` needs its own `>` before the tag closes.
//! - An unterminated tag or comment swallows the rest of the input.
//! - A `>` outside any tag is literal text.

use super::{parse_options, Filter, FilterResult};
use crate::coerce::describe;
use crate::error::{Error, Result};
use serde::Deserialize;
use serde_json::Value;

/// Options for the `strip_markup` filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkupOptions {
    pub replacement: String,
}

/// The `strip_markup` filter
pub struct MarkupFilter;

impl Filter for MarkupFilter {
    fn apply(&self, value: &Value, options: Option<&Value>) -> FilterResult {
        let opts: MarkupOptions = parse_options(self.name(), options)?;
        match value {
            Value::Null => Ok(Value::Null),
            Value::String(text) => Ok(Value::String(strip_tags(text, &opts.replacement))),
            other => Err(Error::validation(format!(
                "Value {} is not a string",
                describe(other)
            ))),
        }
    }

    fn check_options(&self, options: Option<&Value>) -> Result<()> {
        parse_options::<MarkupOptions>(self.name(), options).map(|_| ())
    }

    fn name(&self) -> &str {
        "strip_markup"
    }

    fn description(&self) -> &str {
        "Remove tags, keeping null as null"
    }
}

/// Remove tags from a string, passing null through untouched
///
/// Null stays null rather than becoming an empty string, so callers can tell
/// "no value" apart from "value that was all markup".
///
/// # Example
/// ```rust
/// use strfilter::filters::markup::strip_markup;
///
/// assert_eq!(strip_markup(Some("<b>hi</b> there")).as_deref(), Some("hi there"));
/// assert_eq!(strip_markup(None), None);
/// ```
pub fn strip_markup(value: Option<&str>) -> Option<String> {
    strip_markup_with(value, "")
}

/// Remove tags, putting `replacement` where each tag was
pub fn strip_markup_with(value: Option<&str>, replacement: &str) -> Option<String> {
    value.map(|text| strip_tags(text, replacement))
}

// Single pass over the input; `replacement` is only ever written to the
// output, never scanned.
fn strip_tags(input: &str, replacement: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('<') {
        out.push_str(&rest[..pos]);
        let tag = &rest[pos + 1..];

        if let Some(comment) = tag.strip_prefix("!--") {
            rest = comment.find("-->").map_or("", |end| &comment[end + 3..]);
            out.push_str(replacement);
        } else if tag.chars().next().is_some_and(opens_tag) {
            rest = skip_tag(tag);
            out.push_str(replacement);
        } else {
            out.push('<');
            rest = tag;
        }
    }

    out.push_str(rest);
    out
}

fn opens_tag(next: char) -> bool {
    next.is_alphabetic() || matches!(next, '/' | '!' | '?' | '<')
}

// Returns what follows the `>` that closes the tag, or nothing when the tag
// is never closed.
fn skip_tag(tag: &str) -> &str {
    let mut depth = 1usize;
    let mut quote: Option<char> = None;

    for (i, ch) in tag.char_indices() {
        if let Some(open) = quote {
            if ch == open {
                quote = None;
            }
            continue;
        }

        match ch {
            '"' | '\'' => quote = Some(ch),
            '<' => depth += 1,
            '>' => {
                depth -= 1;
                if depth == 0 {
                    return &tag[i + 1..];
                }
            }
            _ => {}
        }
    }

    ""
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(input: &str) -> String {
        strip_markup(Some(input)).unwrap()
    }

    #[test]
    fn test_null_passes_through() {
        assert_eq!(strip_markup(None), None);
        assert_eq!(strip_markup_with(None, " "), None);
    }

    #[test]
    fn test_basic_tags() {
        assert_eq!(strip("<b>hi</b> there"), "hi there");
        assert_eq!(strip("<p>Hello <strong>world</strong>!</p>"), "Hello world!");
        assert_eq!(strip("No HTML here"), "No HTML here");
        assert_eq!(strip(""), "");
        assert_eq!(strip("line<br/>break"), "linebreak");
        assert_eq!(strip("<?xml version=\"1.0\"?><root>v</root>"), "v");
    }

    #[test]
    fn test_content_outside_tags_is_verbatim() {
        assert_eq!(
            strip("<script>alert('x')</script>"),
            "alert('x')"
        );
        assert_eq!(strip("&amp; &lt;b&gt;"), "&amp; &lt;b&gt;");
        assert_eq!(strip("  <i>spaced</i>  "), "  spaced  ");
    }

    #[test]
    fn test_comments() {
        assert_eq!(strip("a<!-- hidden <b>x</b> -->b"), "ab");
        assert_eq!(strip("a<!-- multi\nline -->b"), "ab");
        assert_eq!(strip("<!---->x"), "x");
        assert_eq!(strip("a<!-- 1 > 0 -->b"), "ab");
        assert_eq!(strip("a<!-- never closed > b"), "a");
    }

    #[test]
    fn test_comment_markers_inside_quoted_attributes() {
        assert_eq!(strip("<a title=\"<!--\">x</a>-->y"), "x-->y");
        assert_eq!(strip("<p data-x='-->'>t</p>"), "t");
    }

    #[test]
    fn test_literal_angle_brackets() {
        assert_eq!(strip("1 < 2 and 3 > 2"), "1 < 2 and 3 > 2");
        assert_eq!(strip("a <= b"), "a <= b");
        assert_eq!(strip("x<"), "x<");
        assert_eq!(strip("<3 you"), "<3 you");
        assert_eq!(strip("done >"), "done >");
    }

    #[test]
    fn test_unterminated_tag_swallows_rest() {
        assert_eq!(strip("keep <b unterminated"), "keep ");
        assert_eq!(strip("keep </"), "keep ");
        assert_eq!(strip("a<!-- never closed"), "a");
    }

    #[test]
    fn test_nested_and_quoted_brackets() {
        assert_eq!(strip("<a <b>>text"), "text");
        assert_eq!(strip("<<b>>x"), "x");
        assert_eq!(strip("<a title=\"1 > 0\">link</a>"), "link");
        assert_eq!(strip("<a title='>'>link</a>"), "link");
    }

    #[test]
    fn test_replacement() {
        assert_eq!(
            strip_markup_with(Some("<p>one</p><p>two</p>"), " ").as_deref(),
            Some(" one  two ")
        );
        assert_eq!(
            strip_markup_with(Some("a<!-- c -->b"), "|").as_deref(),
            Some("a|b")
        );
        assert_eq!(
            strip_markup_with(Some("$0<b>x"), "$1").as_deref(),
            Some("$0$1x")
        );
    }

    #[test]
    fn test_replacement_is_never_read_as_markup() {
        let comment = strip_markup_with(Some("a<!--c-->b"), "<");
        let tag = strip_markup_with(Some("a<i>b"), "<");
        assert_eq!(comment.as_deref(), Some("a<b"));
        assert_eq!(comment, tag);

        assert_eq!(
            strip_markup_with(Some("x<!---->y<br>z"), "<!--").as_deref(),
            Some("x<!--y<!--z")
        );
        assert_eq!(
            strip_markup_with(Some("<b>1</b>2"), "<i>").as_deref(),
            Some("<i>1<i>2")
        );
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "<b>hi</b> there",
            "<<b>a",
            "<<!--x-->b",
            "<<!--x--> b",
            "<a title=\"<!--\">x</a>-->y",
            "a<!-- 1 > 0 -->b",
            "1 < 2 > 0",
            "<a <b>>c</a>",
            "x<",
            "<p title='<'>q</p>",
            "plain",
            "<unterminated",
            "a<!-- open",
            "<é>ü</é>",
        ];
        for input in inputs {
            let once = strip(input);
            assert_eq!(strip(&once), once, "not idempotent for {:?}", input);
        }
    }
}
