#![warn(missing_docs)]

//! Built-in middleware and the primitives used to register and run a middleware chain.
//!
//! Every middleware, whether user-supplied via [`crate::app::App::use_pre_middleware`] or one of
//! the builtins below, is stored as a [`Middleware`]: a path prefix to match against, a
//! [`MiddlewareType`] deciding whether it runs before or after the handler, and the boxed
//! closure itself.

use crate::types::HandlerMiddleware;

/// Cross-Origin Resource Sharing (CORS) middleware.
pub mod cors;

/// HTTP request/response logging middleware.
pub mod logger;

/// File upload handling middleware (binary and multipart forms).
pub mod file_upload;

/// Request rate limiting middleware.
pub mod rate_limiter;

/// Request body size enforcement middleware.
pub mod body_limit;

/// Response body compression (gzip) middleware.
pub mod compression;

/// HTTP security header middleware.
pub mod shield;

/// Which phase of the request lifecycle a [`Middleware`] runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiddlewareType {
    /// Runs before the route handler; may short-circuit by returning a response.
    Pre,
    /// Runs after the route handler has produced a response.
    Post,
}

/// A registered middleware: a path prefix, its phase, and the function to run.
pub(crate) struct Middleware {
    pub(crate) func: HandlerMiddleware,
    pub(crate) path: String,
    pub(crate) middleware_type: MiddlewareType,
}

/// A registered WebSocket upgrade handler, mounted at a single path.
#[cfg(feature = "with-wynd")]
#[derive(Clone)]
pub(crate) struct WyndMiddleware {
    pub(crate) func: crate::types::WyndMiddlewareHandler,
    pub(crate) path: String,
}

/// The future type every middleware function resolves to: the (possibly modified) request,
/// and `Some(response)` when the chain should short-circuit.
pub(crate) type MiddlewareOutput = crate::types::FutMiddleware;
