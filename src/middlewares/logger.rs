#![warn(missing_docs)]
use crate::{context::HttpResponse, req::HttpRequest, types::MiddlewareOutput};

/// Configuration for the logger middleware.
#[derive(Clone)]
pub struct LoggerConfig {
    /// Whether to log the request method.
    pub method: bool,
    /// Whether to log the request path.
    pub path: bool,
    /// Whether to log the response status code.
    pub status: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        LoggerConfig {
            method: true,
            path: true,
            status: true,
        }
    }
}

/// Builtin logger middleware.
///
/// Registered as a post-middleware so it can report the final response status alongside
/// the request method and path. Logs at `info` level via the `tracing` crate; initialize a
/// subscriber (e.g. `tracing_subscriber::fmt::init()`) for output to appear.
///
/// ## Example
///
/// ```
/// use routen::app::App;
/// let mut app = App::new();
/// app.use_logger(None);
/// ```
pub fn logger(
    config: Option<LoggerConfig>,
) -> impl Fn(HttpRequest, HttpResponse) -> MiddlewareOutput + Send + Sync + 'static {
    let config = config.unwrap_or_default();
    move |req: HttpRequest, res: HttpResponse| {
        let config = config.clone();
        Box::pin(async move {
            let method = if config.method {
                req.method.to_string()
            } else {
                String::new()
            };
            let path = if config.path {
                req.path.clone()
            } else {
                String::new()
            };
            let status = if config.status {
                Some(res.status_code.as_u16())
            } else {
                None
            };

            match status {
                Some(status) => tracing::info!(%method, %path, %status, "request completed"),
                None => tracing::info!(%method, %path, "request completed"),
            }

            (req, Some(res))
        })
    }
}
