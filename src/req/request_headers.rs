//! Request header access.

use hyper::HeaderMap;

/// A thin, ASCII-case-insensitive view over a request's headers.
///
/// Wraps a [`HeaderMap`] rather than re-encoding into a string map so multi-valued
/// headers and byte-accurate values are preserved.
#[derive(Debug, Clone, Default)]
pub struct RequestHeaders {
    inner: HeaderMap,
}

impl RequestHeaders {
    /// Creates an empty header set.
    pub fn new() -> Self {
        Self {
            inner: HeaderMap::new(),
        }
    }

    /// Builds a `RequestHeaders` by taking ownership of a hyper [`HeaderMap`].
    pub fn from_header_map(map: HeaderMap) -> Self {
        Self { inner: map }
    }

    /// Returns the first value for `name` as a `&str`, if present and valid UTF-8.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns every value for `name` that is valid UTF-8.
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.inner
            .get_all(name)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect()
    }

    /// True if a header with this name is present.
    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains_key(name)
    }

    /// True if no headers are present.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Number of header entries (including repeated names).
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Inserts or replaces a header value.
    pub fn insert(&mut self, name: &str, value: &str) {
        if let (Ok(name), Ok(value)) = (
            hyper::header::HeaderName::from_bytes(name.as_bytes()),
            hyper::header::HeaderValue::from_str(value),
        ) {
            self.inner.insert(name, value);
        }
    }

    /// Returns the underlying hyper `HeaderMap`.
    pub fn as_header_map(&self) -> &HeaderMap {
        &self.inner
    }

    /// Iterates over header name/value pairs that are valid UTF-8. For a header repeated
    /// across multiple lines, only the first value is yielded; see [`Self::iter_all`].
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner
            .keys()
            .filter_map(|k| self.get(k.as_str()).map(|v| (k.as_str(), v)))
    }

    /// Iterates over every header name/value pair, including repeated header names.
    pub fn iter_all(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str(), v)))
    }

    /// Alias for [`Self::contains`], matching `HashMap`-style naming.
    pub fn contains_key(&self, name: &str) -> bool {
        self.contains(name)
    }

    /// Appends a value for `name` without removing any existing values for it.
    pub fn append(&mut self, name: &str, value: &str) {
        if let (Ok(name), Ok(value)) = (
            hyper::header::HeaderName::from_bytes(name.as_bytes()),
            hyper::header::HeaderValue::from_str(value),
        ) {
            self.inner.append(name, value);
        }
    }

    /// Removes every value for `name`, returning the first one removed, if any.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.inner
            .remove(name)
            .and_then(|v| v.to_str().ok().map(str::to_string))
    }

    /// Iterates over the distinct header names present.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(|k| k.as_str())
    }

    /// Consumes `self`, returning the underlying hyper `HeaderMap`.
    pub fn into_header_map(self) -> HeaderMap {
        self.inner
    }

    /// The `Content-Type` header value, if present.
    pub fn content_type(&self) -> Option<&str> {
        self.get("content-type")
    }

    /// The `Host` header value, if present.
    pub fn host(&self) -> Option<&str> {
        self.get("host")
    }

    /// The `Authorization` header value, if present.
    pub fn authorization(&self) -> Option<&str> {
        self.get("authorization")
    }

    /// The `User-Agent` header value, if present.
    pub fn user_agent(&self) -> Option<&str> {
        self.get("user-agent")
    }

    /// The first address in `X-Forwarded-For`, if present.
    pub fn x_forwarded_for(&self) -> Option<&str> {
        self.get("x-forwarded-for")
    }

    /// True if `Accept` names `application/json` (or a `+json` suffixed type).
    pub fn accepts_json(&self) -> bool {
        self.get("accept")
            .map(|accept| {
                accept
                    .split(',')
                    .map(|part| part.split(';').next().unwrap_or("").trim())
                    .any(|mime| mime == "application/json" || mime.ends_with("+json"))
            })
            .unwrap_or(false)
    }

    /// True if `Accept` names `text/html` or `application/xhtml+xml`.
    pub fn accepts_html(&self) -> bool {
        self.get("accept")
            .map(|accept| {
                accept
                    .split(',')
                    .map(|part| part.split(';').next().unwrap_or("").trim())
                    .any(|mime| mime == "text/html" || mime == "application/xhtml+xml")
            })
            .unwrap_or(false)
    }
}

/// A wrapper that extracts a clone of a request's headers.
///
/// Use this in handler signatures to access every header without naming individual ones.
pub struct Headers(RequestHeaders);

impl crate::helpers::FromRequest for Headers {
    type Error = String;

    fn from_request(req: &crate::req::HttpRequest) -> Result<Self, Self::Error> {
        Ok(Self(req.headers.clone()))
    }
}

impl std::ops::Deref for Headers {
    type Target = RequestHeaders;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<HeaderMap> for RequestHeaders {
    fn from(map: HeaderMap) -> Self {
        Self::from_header_map(map)
    }
}

impl From<RequestHeaders> for HeaderMap {
    fn from(headers: RequestHeaders) -> Self {
        headers.into_header_map()
    }
}

impl std::fmt::Display for RequestHeaders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (name, value) in self.iter() {
            writeln!(f, "{}: {:?}", name, value)?;
        }
        Ok(())
    }
}

impl std::ops::Index<&str> for RequestHeaders {
    type Output = str;

    fn index(&self, name: &str) -> &str {
        self.get(name)
            .unwrap_or_else(|| panic!("header `{}` not present", name))
    }
}
