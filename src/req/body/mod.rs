//! Request body representations.
//!
//! A request carries exactly one [`RequestBody`], tagged by [`RequestBodyType`] so handlers
//! can branch on shape without re-parsing. [`FormData`] backs both the URL-encoded and
//! multipart-field binding sources described by the binding layer.

use std::fmt;

use ahash::AHashMap;
use serde_json::Value;

pub mod json_data;
pub mod rules;
pub mod text_data;

pub use json_data::{FromJson, JsonBody, JsonBodyRules, JsonBodyValidated};
pub use rules::{validate_rule_sets, validate_field_specs, FieldRules, HasFieldRules};
pub use text_data::{TextData, TextDataError};

/// A single value bound to a form key: either one string or a repeated list.
///
/// `key=a&key=b` and `key[]=a` both produce [`FormValue::Multiple`]; a lone `key=a`
/// produces [`FormValue::Single`]. This mirrors the bracket-notation flatten pass in
/// the binding layer rather than always allocating a list.
#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    /// A single scalar value.
    Single(String),
    /// Multiple values for the same key, in encounter order.
    Multiple(Vec<String>),
}

impl FormValue {
    /// Returns the first (or only) value.
    pub fn first(&self) -> &str {
        match self {
            FormValue::Single(s) => s,
            FormValue::Multiple(v) => v.first().map(|s| s.as_str()).unwrap_or(""),
        }
    }

    /// Returns all values as a slice-like vector.
    pub fn all(&self) -> Vec<&str> {
        match self {
            FormValue::Single(s) => vec![s.as_str()],
            FormValue::Multiple(v) => v.iter().map(|s| s.as_str()).collect(),
        }
    }

    fn push(&mut self, value: String) {
        match self {
            FormValue::Single(existing) => {
                *self = FormValue::Multiple(vec![std::mem::take(existing), value]);
            }
            FormValue::Multiple(values) => values.push(value),
        }
    }
}

/// Decoded form data: URL-encoded pairs, or the non-file fields of a multipart body.
///
/// Bracket-notation keys (`user[addr][city]`, `tags[]`) are flattened into this flat
/// map at parse time; nested access is done by querying the flattened dotted key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData {
    fields: AHashMap<String, FormValue>,
}

impl FormData {
    /// Creates an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value; a second insertion under the same key upgrades to a list.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        self.fields
            .entry(key)
            .and_modify(|existing| existing.push(value.clone()))
            .or_insert(FormValue::Single(value));
    }

    /// Returns the first value bound to `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(|v| v.first())
    }

    /// Returns every value bound to `key`.
    pub fn get_all(&self, key: &str) -> Option<Vec<&str>> {
        self.fields.get(key).map(|v| v.all())
    }

    /// Iterates over key/value-list pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FormValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// True if no fields were parsed.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Parses a `key=value&key2=value2` URL-encoded string into a [`FormData`].
    ///
    /// Always succeeds; malformed pairs are simply dropped by the underlying decoder.
    pub fn from_query_string(input: &str) -> Result<Self, String> {
        let mut form = Self::new();
        for (key, value) in url::form_urlencoded::parse(input.as_bytes()) {
            form.insert(key.into_owned(), value.into_owned());
        }
        Ok(form)
    }
}

impl fmt::Display for FormData {
    /// Serializes back to `key=value&key2=value2` URL-encoded form, in iteration order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.iter() {
            for v in value.all() {
                serializer.append_pair(key, v);
            }
        }
        write!(f, "{}", serializer.finish())
    }
}

/// The parsed, type-tagged content of a request body.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBodyContent {
    /// No body was present.
    EMPTY,
    /// A decoded JSON value.
    JSON(Value),
    /// Raw text (after UTF-8 decoding).
    TEXT(TextData),
    /// Decoded URL-encoded or multipart form fields.
    FORM(FormData),
    /// Raw bytes with no further interpretation.
    BINARY(bytes::Bytes),
    /// Raw bytes alongside multipart form fields parsed from the same body
    /// (used when a multipart body is read both as bytes and as fields).
    BinaryWithFields(bytes::Bytes, FormData),
}

impl RequestBodyContent {
    /// Size of the body in bytes, as it would be serialized back to the wire.
    pub fn len(&self) -> usize {
        match self {
            RequestBodyContent::EMPTY => 0,
            RequestBodyContent::JSON(v) => v.to_string().len(),
            RequestBodyContent::TEXT(t) => t.len_bytes(),
            RequestBodyContent::FORM(f) => f.to_string().len(),
            RequestBodyContent::BINARY(b) => b.len(),
            RequestBodyContent::BinaryWithFields(b, _) => b.len(),
        }
    }

    /// True if the body carries no bytes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The content-type classification of a [`RequestBody`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestBodyType {
    /// No body.
    EMPTY,
    /// `application/json` or a `+json` subtype.
    JSON,
    /// Plain text bodies.
    TEXT,
    /// `application/x-www-form-urlencoded`.
    FORM,
    /// `multipart/form-data`.
    MultipartForm,
    /// Anything else; exposed as raw bytes.
    BINARY,
}

impl fmt::Display for RequestBodyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RequestBodyType::EMPTY => "empty",
            RequestBodyType::JSON => "json",
            RequestBodyType::TEXT => "text",
            RequestBodyType::FORM => "form",
            RequestBodyType::MultipartForm => "multipart/form-data",
            RequestBodyType::BINARY => "binary",
        };
        write!(f, "{}", s)
    }
}

/// A request body paired with its content-type classification.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestBody {
    /// The decoded content.
    pub content: RequestBodyContent,
    /// The classification used to select a binding.
    pub content_type: RequestBodyType,
}

impl RequestBody {
    /// An empty body.
    pub fn new_empty() -> Self {
        Self { content: RequestBodyContent::EMPTY, content_type: RequestBodyType::EMPTY }
    }

    /// A JSON body.
    pub fn new_json(value: Value) -> Self {
        Self { content: RequestBodyContent::JSON(value), content_type: RequestBodyType::JSON }
    }

    /// A plain-text body.
    pub fn new_text(value: TextData) -> Self {
        Self { content: RequestBodyContent::TEXT(value), content_type: RequestBodyType::TEXT }
    }

    /// A URL-encoded or multipart-without-files form body.
    pub fn new_form(value: FormData) -> Self {
        Self { content: RequestBodyContent::FORM(value), content_type: RequestBodyType::FORM }
    }

    /// An opaque binary body.
    pub fn new_binary(value: bytes::Bytes) -> Self {
        Self { content: RequestBodyContent::BINARY(value), content_type: RequestBodyType::BINARY }
    }

    /// A multipart body carrying both raw bytes and the parsed form fields.
    pub fn new_binary_with_form_fields(bytes: bytes::Bytes, fields: FormData) -> Self {
        Self {
            content: RequestBodyContent::BinaryWithFields(bytes, fields),
            content_type: RequestBodyType::BINARY,
        }
    }
}
