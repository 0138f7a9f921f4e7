//! Request payload validation.
//!
//! Each entity kind is described by a list of [`FieldRule`]s. [`validate`]
//! checks a JSON body against those rules, collects one [`FieldError`] per
//! failing field, and returns the sanitized values: strings trimmed, tags
//! trimmed and lower-cased. `null` counts as absent. Unknown fields are
//! ignored, so clients cannot set `id` or timestamps.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::defaults::{CONTENT_MAX_LEN, DESCRIPTION_MAX_LEN, TAG_MAX_LEN, TITLE_MAX_LEN};
use crate::tags::normalize_tag;

/// Loose URL shape: optional lower-case http(s) scheme, hostname.tld,
/// optional path. Classes are ASCII-only and case-sensitive, so a URL that
/// passes also passes the scheme prefix check done before fetching.
static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(https?://)?([0-9a-z.-]+)\.([a-z.]{2,6})([/0-9A-Za-z_ .-]*)*/?$")
        .expect("URL pattern is valid")
});

/// How a field's value is checked and sanitized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// String, trimmed, at most `max_len` characters.
    Text { max_len: usize },
    /// String, trimmed, must match the loose URL pattern.
    Url,
    /// Array of strings, each at most 50 characters; normalized like tags.
    Tags,
    /// Boolean.
    Flag,
}

/// Validation rule for one payload field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub name: &'static str,
    pub label: &'static str,
    pub required: bool,
    pub kind: FieldKind,
}

impl FieldRule {
    pub const fn required(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            required: true,
            kind,
        }
    }

    pub const fn optional(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            required: false,
            kind,
        }
    }
}

/// Fields accepted when creating or updating a note.
pub const NOTE_RULES: &[FieldRule] = &[
    FieldRule::required(
        "title",
        "Title",
        FieldKind::Text {
            max_len: TITLE_MAX_LEN,
        },
    ),
    FieldRule::required(
        "content",
        "Content",
        FieldKind::Text {
            max_len: CONTENT_MAX_LEN,
        },
    ),
    FieldRule::optional("tags", "Tags", FieldKind::Tags),
    FieldRule::optional("isFavorite", "isFavorite", FieldKind::Flag),
];

/// Fields accepted when creating or updating a bookmark.
pub const BOOKMARK_RULES: &[FieldRule] = &[
    FieldRule::optional(
        "title",
        "Title",
        FieldKind::Text {
            max_len: TITLE_MAX_LEN,
        },
    ),
    FieldRule::required("url", "URL", FieldKind::Url),
    FieldRule::optional(
        "description",
        "Description",
        FieldKind::Text {
            max_len: DESCRIPTION_MAX_LEN,
        },
    ),
    FieldRule::optional("tags", "Tags", FieldKind::Tags),
    FieldRule::optional("isFavorite", "isFavorite", FieldKind::Flag),
];

/// One failed validation check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    /// Payload path of the failing value, e.g. `content` or `tags[2]`.
    pub field: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>, value: Option<Value>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum FieldValue {
    Text(String),
    Tags(Vec<String>),
    Flag(bool),
}

/// Sanitized values of the fields that passed validation and were present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedFields {
    values: HashMap<&'static str, FieldValue>,
}

impl ValidatedFields {
    /// Take a trimmed text (or URL) field.
    pub fn take_text(&mut self, name: &str) -> Option<String> {
        match self.values.remove(name) {
            Some(FieldValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    /// Take a normalized tags field.
    pub fn take_tags(&mut self, name: &str) -> Option<Vec<String>> {
        match self.values.remove(name) {
            Some(FieldValue::Tags(tags)) => Some(tags),
            _ => None,
        }
    }

    /// Take a boolean field.
    pub fn take_flag(&mut self, name: &str) -> Option<bool> {
        match self.values.remove(name) {
            Some(FieldValue::Flag(b)) => Some(b),
            _ => None,
        }
    }
}

/// Validate a JSON body against a rule set.
pub fn validate(rules: &[FieldRule], body: &Value) -> Result<ValidatedFields, Vec<FieldError>> {
    let Some(object) = body.as_object() else {
        return Err(vec![FieldError::new(
            "body",
            "Request body must be a JSON object",
            None,
        )]);
    };

    let mut fields = ValidatedFields::default();
    let mut errors = Vec::new();

    for rule in rules {
        match check_field(rule, object, &mut errors) {
            Some(value) => {
                fields.values.insert(rule.name, value);
            }
            None => continue,
        }
    }

    if errors.is_empty() {
        Ok(fields)
    } else {
        Err(errors)
    }
}

fn check_field(
    rule: &FieldRule,
    object: &Map<String, Value>,
    errors: &mut Vec<FieldError>,
) -> Option<FieldValue> {
    let Some(raw) = object.get(rule.name).filter(|v| !v.is_null()) else {
        if rule.required {
            errors.push(required_error(rule, None));
        }
        return None;
    };

    match rule.kind {
        FieldKind::Text { max_len } => {
            let text = expect_string(rule, raw, errors)?;
            if rule.required && text.is_empty() {
                errors.push(required_error(rule, Some(raw)));
                return None;
            }
            if text.chars().count() > max_len {
                errors.push(FieldError::new(
                    rule.name,
                    format!("{} cannot exceed {} characters", rule.label, max_len),
                    Some(raw.clone()),
                ));
                return None;
            }
            Some(FieldValue::Text(text))
        }
        FieldKind::Url => {
            let text = expect_string(rule, raw, errors)?;
            if text.is_empty() {
                errors.push(required_error(rule, Some(raw)));
                return None;
            }
            if !is_valid_url(&text) {
                errors.push(FieldError::new(
                    rule.name,
                    "Please enter a valid URL",
                    Some(raw.clone()),
                ));
                return None;
            }
            Some(FieldValue::Text(text))
        }
        FieldKind::Tags => {
            let Some(items) = raw.as_array() else {
                errors.push(FieldError::new(
                    rule.name,
                    format!("{} must be an array", rule.label),
                    Some(raw.clone()),
                ));
                return None;
            };
            let mut tags = Vec::with_capacity(items.len());
            let mut failed = false;
            for (i, item) in items.iter().enumerate() {
                let path = format!("{}[{}]", rule.name, i);
                match item.as_str() {
                    Some(tag) if tag.trim().chars().count() <= TAG_MAX_LEN => {
                        tags.push(normalize_tag(tag));
                    }
                    Some(_) => {
                        failed = true;
                        errors.push(FieldError::new(
                            path,
                            format!("Each tag cannot exceed {} characters", TAG_MAX_LEN),
                            Some(item.clone()),
                        ));
                    }
                    None => {
                        failed = true;
                        errors.push(FieldError::new(
                            path,
                            "Each tag must be a string",
                            Some(item.clone()),
                        ));
                    }
                }
            }
            (!failed).then_some(FieldValue::Tags(tags))
        }
        FieldKind::Flag => match raw.as_bool() {
            Some(b) => Some(FieldValue::Flag(b)),
            None => {
                errors.push(FieldError::new(
                    rule.name,
                    format!("{} must be a boolean", rule.label),
                    Some(raw.clone()),
                ));
                None
            }
        },
    }
}

fn expect_string(rule: &FieldRule, raw: &Value, errors: &mut Vec<FieldError>) -> Option<String> {
    match raw.as_str() {
        Some(s) => Some(s.trim().to_string()),
        None => {
            errors.push(FieldError::new(
                rule.name,
                format!("{} must be a string", rule.label),
                Some(raw.clone()),
            ));
            None
        }
    }
}

fn required_error(rule: &FieldRule, raw: Option<&Value>) -> FieldError {
    FieldError::new(
        rule.name,
        format!("{} is required", rule.label),
        raw.cloned(),
    )
}

/// Check a URL against the loose URL pattern.
pub fn is_valid_url(url: &str) -> bool {
    URL_PATTERN.is_match(url)
}

/// Cut a string to at most `max` characters.
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields_of(errors: &[FieldError]) -> Vec<&str> {
        errors.iter().map(|e| e.field.as_str()).collect()
    }

    #[test]
    fn test_valid_note() {
        let body = json!({
            "title": "  Groceries ",
            "content": "milk, eggs",
            "tags": [" Home ", "TODO"],
            "isFavorite": true
        });
        let mut fields = validate(NOTE_RULES, &body).unwrap();
        assert_eq!(fields.take_text("title").as_deref(), Some("Groceries"));
        assert_eq!(fields.take_text("content").as_deref(), Some("milk, eggs"));
        assert_eq!(
            fields.take_tags("tags"),
            Some(vec!["home".to_string(), "todo".to_string()])
        );
        assert_eq!(fields.take_flag("isFavorite"), Some(true));
    }

    #[test]
    fn test_note_missing_required_fields() {
        let errors = validate(NOTE_RULES, &json!({})).unwrap_err();
        assert_eq!(fields_of(&errors), vec!["title", "content"]);
        assert_eq!(errors[0].message, "Title is required");
        assert_eq!(errors[1].message, "Content is required");
    }

    #[test]
    fn test_note_whitespace_title_is_missing() {
        let errors = validate(NOTE_RULES, &json!({"title": "   ", "content": "x"})).unwrap_err();
        assert_eq!(fields_of(&errors), vec!["title"]);
    }

    #[test]
    fn test_note_content_too_long() {
        let body = json!({"title": "t", "content": "x".repeat(5001)});
        let errors = validate(NOTE_RULES, &body).unwrap_err();
        assert_eq!(fields_of(&errors), vec!["content"]);
        assert_eq!(errors[0].message, "Content cannot exceed 5000 characters");
    }

    #[test]
    fn test_note_content_at_limit_is_valid() {
        let body = json!({"title": "t", "content": "é".repeat(5000)});
        assert!(validate(NOTE_RULES, &body).is_ok());
    }

    #[test]
    fn test_tags_must_be_array() {
        let body = json!({"title": "t", "content": "c", "tags": "a,b"});
        let errors = validate(NOTE_RULES, &body).unwrap_err();
        assert_eq!(fields_of(&errors), vec!["tags"]);
        assert_eq!(errors[0].message, "Tags must be an array");
    }

    #[test]
    fn test_tag_too_long_and_non_string() {
        let body = json!({"title": "t", "content": "c", "tags": ["ok", "x".repeat(51), 7]});
        let errors = validate(NOTE_RULES, &body).unwrap_err();
        assert_eq!(fields_of(&errors), vec!["tags[1]", "tags[2]"]);
    }

    #[test]
    fn test_is_favorite_must_be_boolean() {
        let body = json!({"title": "t", "content": "c", "isFavorite": "true"});
        let errors = validate(NOTE_RULES, &body).unwrap_err();
        assert_eq!(fields_of(&errors), vec!["isFavorite"]);
        assert_eq!(errors[0].value, Some(json!("true")));
    }

    #[test]
    fn test_null_counts_as_absent() {
        let body = json!({"title": "t", "content": "c", "tags": null, "isFavorite": null});
        let mut fields = validate(NOTE_RULES, &body).unwrap();
        assert!(fields.take_tags("tags").is_none());
        assert!(fields.take_flag("isFavorite").is_none());
    }

    #[test]
    fn test_body_must_be_object() {
        let errors = validate(NOTE_RULES, &json!(["not", "an", "object"])).unwrap_err();
        assert_eq!(fields_of(&errors), vec!["body"]);
    }

    #[test]
    fn test_bookmark_url_required() {
        let errors = validate(BOOKMARK_RULES, &json!({"title": "x"})).unwrap_err();
        assert_eq!(fields_of(&errors), vec!["url"]);
        assert_eq!(errors[0].message, "URL is required");
    }

    #[test]
    fn test_bookmark_invalid_url() {
        let errors = validate(BOOKMARK_RULES, &json!({"url": "not a url"})).unwrap_err();
        assert_eq!(errors[0].message, "Please enter a valid URL");
    }

    #[test]
    fn test_bookmark_title_optional() {
        let mut fields = validate(BOOKMARK_RULES, &json!({"url": "example.com"})).unwrap();
        assert!(fields.take_text("title").is_none());
        assert_eq!(fields.take_text("url").as_deref(), Some("example.com"));
    }

    #[test]
    fn test_bookmark_empty_title_is_kept_as_empty() {
        let mut fields =
            validate(BOOKMARK_RULES, &json!({"url": "example.com", "title": " "})).unwrap();
        assert_eq!(fields.take_text("title").as_deref(), Some(""));
    }

    #[test]
    fn test_bookmark_description_too_long() {
        let body = json!({"url": "example.com", "description": "d".repeat(501)});
        let errors = validate(BOOKMARK_RULES, &body).unwrap_err();
        assert_eq!(fields_of(&errors), vec!["description"]);
    }

    #[test]
    fn test_url_pattern() {
        for url in [
            "example.com",
            "https://example.com",
            "http://www.example.co.uk/some/path",
            "https://docs.rs/tokio/latest/",
            "example.com/Some_Page",
        ] {
            assert!(is_valid_url(url), "{url} should be valid");
        }
        for url in ["", "example", "ftp://example.com", "http://", "just words"] {
            assert!(!is_valid_url(url), "{url} should be invalid");
        }
    }

    #[test]
    fn test_url_pattern_is_case_sensitive() {
        for url in ["HTTPS://example.com", "Example.com", "https://example.COM"] {
            assert!(!is_valid_url(url), "{url} should be invalid");
        }
    }

    #[test]
    fn test_url_pattern_path_is_ascii_only() {
        assert!(is_valid_url("example.com/page_1"));
        for url in ["example.com/日本", "example.com/café"] {
            assert!(!is_valid_url(url), "{url} should be invalid");
        }
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("hello", 3), "hel");
        assert_eq!(truncate_chars("hi", 3), "hi");
        assert_eq!(truncate_chars("ééé", 2), "éé");
    }
}
