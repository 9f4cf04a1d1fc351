//! Captured path parameters.
//!
//! The route tree binds one [`RouteParams`] per matched request: named segments map to a
//! single value, and a trailing catch-all (`{path:*}`) maps to the list of remaining
//! segments. Per the external interface contract, a parameter can only repeat via
//! catch-all semantics.

use ahash::AHashMap;

/// Errors raised while reading or parsing a captured route parameter.
#[derive(Debug, PartialEq, Eq)]
pub enum ParamError {
    /// No parameter with this name was captured for the matched route.
    NotFound(String),
    /// The parameter was present but failed to parse into the requested type.
    ParseError {
        /// Name of the parameter.
        param: String,
        /// The raw captured string.
        value: String,
        /// The Rust type name the caller tried to parse into.
        target_type: &'static str,
    },
}

impl std::fmt::Display for ParamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamError::NotFound(name) => write!(f, "route parameter '{}' not found", name),
            ParamError::ParseError {
                param,
                value,
                target_type,
            } => write!(
                f,
                "failed to parse route parameter '{}' (value: '{}') as {}",
                param, value, target_type
            ),
        }
    }
}

/// Path parameters captured by the route tree for the matched request.
///
/// Single-segment parameters (`{id}`) carry exactly one value; a catch-all parameter
/// (`{path:*}`) carries every remaining segment, joined by `/` when read as a string
/// and individually via [`RouteParams::get_all`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteParams {
    values: AHashMap<String, Vec<String>>,
}

impl RouteParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a single-segment capture, overwriting any prior value for `name`.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), vec![value.into()]);
    }

    /// Binds a catch-all capture as an ordered list of segments.
    pub fn insert_many(&mut self, name: impl Into<String>, values: Vec<String>) {
        self.values.insert(name.into(), values);
    }

    /// Returns the first (or only) captured value for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(|v| v.first()).map(|s| s.as_str())
    }

    /// Returns every captured segment for `name` (more than one only for a catch-all).
    pub fn get_all(&self, name: &str) -> Option<&[String]> {
        self.values.get(name).map(|v| v.as_slice())
    }

    /// Returns the captured value for `name` parsed as `T`.
    pub fn get_as<T>(&self, name: &str) -> Result<T, ParamError>
    where
        T: std::str::FromStr,
    {
        let value = self.get(name).ok_or_else(|| ParamError::NotFound(name.to_string()))?;
        value.parse::<T>().map_err(|_| ParamError::ParseError {
            param: name.to_string(),
            value: value.to_string(),
            target_type: std::any::type_name::<T>(),
        })
    }

    /// Iterates over every captured name and its first value.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .filter_map(|(k, v)| v.first().map(|first| (k.as_str(), first.as_str())))
    }

    /// True if no parameters were captured.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Implemented by `#[derive(FromParams)]` to bind a struct's fields from [`RouteParams`].
pub trait FromParams: Sized {
    /// Parse `Self` out of the captured route parameters, or describe what's missing/invalid.
    fn from_params(params: &RouteParams) -> Result<Self, String>;
}

/// A wrapper that extracts and binds a type from a request's captured route parameters.
///
/// Use this in handler signatures to automatically bind path parameters.
#[derive(Debug)]
pub struct Params<T>(T);

impl<T: FromParams> crate::helpers::FromRequest for Params<T> {
    type Error = String;

    fn from_request(req: &crate::req::HttpRequest) -> Result<Self, Self::Error> {
        Ok(Self(T::from_params(&req.params)?))
    }
}

impl<T> std::ops::Deref for Params<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
