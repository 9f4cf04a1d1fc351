//! # App Module
//!
//! The core application module for Ripress, providing Express.js-like functionality
//! for building HTTP servers in Rust. This module contains the main [`App`] struct
//! and [`Middleware`] definitions that form the foundation of a Ripress web application.
//!
//! ## Key Features
//!
//! - Express.js-like routing and middleware system
//! - Built-in middleware for common tasks (CORS, logging, rate limiting, etc.)
//! - Static file serving capabilities
//! - WebSocket support (with `wynd` feature)
//! - Async/await support throughout
//!
//! ## Basic Usage
//!
//! ```no_run
//! use routen::app::App;
//! use routen::types::RouterFns;
//! use routen::req::HttpRequest;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut app = App::new();
//!
//!     app.get("/", |_req: HttpRequest, res| async move {
//!         res.ok().text("Hello, World!")
//!     });
//!
//!     app.listen(3000, || {
//!         println!("Server running on http://localhost:3000");
//!     }).await;
//! }
//! ```

#![warn(missing_docs)]

use crate::app::api_error::ApiError;

#[cfg(feature = "compression")]
use crate::middlewares::compression::{compression, CompressionConfig};

#[cfg(feature = "logger")]
use crate::middlewares::logger::{logger, LoggerConfig};

#[cfg(feature = "with-wynd")]
use crate::middlewares::WyndMiddleware;
#[cfg(feature = "with-wynd")]
use crate::types::WyndMiddlewareHandler;

use crate::{
    helpers::{exec_post_middleware, exec_pre_middleware, negotiated_error_response, path_matches},
    middlewares::{Middleware, MiddlewareType},
    req::HttpRequest,
    res::HttpResponse,
    router::{MatchOutcome, Router, RouteTable},
    shutdown::ShutdownController,
    types::{HttpMethods, RouteBuilder, RouterFns},
};
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{header, http::StatusCode, Request, Response};
use hyper_staticfile::Static;
use std::{collections::HashMap, net::SocketAddr, path::Path, sync::Arc, time::Duration};
use tokio::net::TcpListener;

pub(crate) mod api_error;

/// Handler module for managing server connections, HTTP/2/1 serving logic, and connection-level configuration.
pub mod handler;
/// Middleware support for the App struct, including common and user-defined middleware functionality.
pub mod middlewares;

/// The App struct is the core of Ripress, providing a simple interface for creating HTTP servers and handling requests.
///
/// It follows an Express-like pattern for route handling and middleware management. The App struct
/// manages routes, middlewares, static file serving, and server lifecycle.
///
/// ## Features
///
/// - **Routing**: HTTP method-based routing (GET, POST, PUT, DELETE, etc.)
/// - **Middleware**: Pre and post-processing middleware with path-based matching
/// - **Static Files**: Serve static assets with proper headers and caching
/// - **WebSocket Support**: Optional WebSocket support via the `wynd` crate
/// - **Built-in Middleware**: CORS, logging, rate limiting, compression, and security headers
///
/// ## Example
///
/// ```ignore
/// use routen::app::App;
/// use routen::types::RouterFns;
/// use routen::req::HttpRequest;
///
/// #[tokio::main]
/// async fn main() {
///     let mut app = App::new();
///
///     // Add middleware
///     app.use_cors(None);
///     app.use_logger(None);
///
///     // Add routes
///     app.get("/", |_req: HttpRequest, res| async move {
///         res.ok().text("Hello, World!")
///     });
///
///     app.post("/api/users", |req: HttpRequest, res| async move {
///         // Handle user creation
///         res.ok().json("User created")
///     });
///
///     // Serve static files
///     app.static_files("/public", "./public").unwrap();
///
///     // Start server
///     app.listen(3000, || {
///         println!("Server running on http://localhost:3000");
///     }).await;
/// }
/// ```
pub struct App {
    /// Stores all registered HTTP route handlers for this application.
    routes: Vec<Arc<RouteBuilder>>,

    /// The host address or interface the server will bind to (e.g., `"0.0.0.0"` or `"127.0.0.1"`).
    /// This field determines which IP address or hostname the HTTP server accepts connections on.
    pub(crate) host: String,

    /// Enables or disables HTTP/2 support for the server.
    /// By default, HTTP/2 is **enabled**.
    pub(crate) http2: bool,

    /// Optional advanced configuration for HTTP/2 behavior.
    pub(crate) http2_config: Option<Http2Config>,

    /// The list of middleware functions to be applied to requests.
    pub(crate) middlewares: Vec<Arc<Middleware>>,

    /// Static file mappings from mount path to filesystem path.
    pub(crate) static_files: HashMap<&'static str, &'static str>,

    /// Enables or disables graceful shutdown support for the server.
    pub(crate) graceful_shutdown: bool,

    /// If `true` (the default), a path registered for at least one method but not `OPTIONS`
    /// is served a default 204 response with an `Allow` header instead of a 405.
    pub(crate) default_options_enabled: bool,

    /// Optional subscriber notified of every [`crate::scope::RequestEvent`] a dispatch emits.
    pub(crate) event_listener: Option<crate::scope::EventListener>,

    #[cfg(feature = "with-wynd")]
    /// Optional WebSocket middleware (only available with `wynd` feature).
    pub(crate) wynd_middleware: Option<WyndMiddleware>,
}

/// Advanced configuration options for HTTP/2 behavior.
///
/// All fields are optional; if a field is `None`, Hyper's internal default for
/// that setting is used. Most applications can rely on the defaults and only
/// override `max_concurrent_streams` or timeouts for specific workloads.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Http2Config {
    /// If `true`, only HTTP/2 connections are accepted on this listener.
    /// If `false`, HTTP/1.1 and HTTP/2 are both supported (negotiated by Hyper).
    pub http2_only: bool,
    /// Maximum number of concurrent streams allowed per HTTP/2 connection.
    pub max_concurrent_streams: Option<u32>,
    /// Initial stream-level flow control window size.
    pub initial_stream_window_size: Option<u32>,
    /// Initial connection-level flow control window size.
    pub initial_connection_window_size: Option<u32>,
    /// Enable or disable Hyper's adaptive flow control window behavior.
    pub adaptive_window: Option<bool>,
    /// Maximum allowed HTTP/2 frame size in bytes.
    pub max_frame_size: Option<u32>,
    /// Maximum size of the header list (in octets) that is allowed.
    pub max_header_list_size: Option<u32>,
    /// Interval at which HTTP/2 PING frames are sent to keep the connection alive.
    pub keep_alive_interval: Option<Duration>,
    /// Timeout waiting for a PING ACK before considering the connection dead.
    pub keep_alive_timeout: Option<Duration>,
    /// Whether to send keep-alive PINGs even when the connection is idle.
    pub keep_alive_while_idle: Option<bool>,
}

impl RouterFns for App {
    fn routes(&mut self) -> &mut Vec<Arc<RouteBuilder>> {
        &mut self.routes
    }
}

impl App {
    /// Creates a new App instance with empty routes and middleware.
    ///
    /// This is the starting point for building a Ripress application. The returned
    /// App instance has no routes or middleware configured and is ready to be customized.
    ///
    /// ## Example
    ///
    /// ```
    /// use routen::app::App;
    ///
    /// let mut app = App::new();
    /// ```
    pub fn new() -> Self {
        App {
            routes: Vec::new(),
            http2: true,
            http2_config: None,
            middlewares: Vec::new(),
            static_files: HashMap::new(),
            graceful_shutdown: false,
            default_options_enabled: true,
            event_listener: None,
            host: String::from("0.0.0.0"),
            #[cfg(feature = "with-wynd")]
            wynd_middleware: None,
        }
    }

    /// Sets the host address for the server to bind to.
    ///
    /// This method allows you to specify the network interface (host) that the Ripress server will listen on.
    /// By default, the server binds to `"0.0.0.0"` (all interfaces). You may want to bind to
    /// `"127.0.0.1"` (localhost only) or an external IP for remote access, depending on your deployment requirements.
    ///
    /// **Note:** If you use an empty string (`""`), the server may not bind properly. Use valid IPv4 or IPv6 addresses.
    ///
    /// # Arguments
    ///
    /// * `host` - The host address (e.g., `"127.0.0.1"`, `"0.0.0.0"`, or an IPv6 address like `"::1"`).
    ///
    /// # Examples
    ///
    /// ```
    /// use routen::app::App;
    /// let app = App::new().host("127.0.0.1");
    /// ```
    pub fn host(&mut self, host: &str) -> &mut Self {
        self.host = host.to_string();
        self
    }

    /// Enables or disables HTTP/2 support for the application.
    ///
    /// By default, HTTP/2 is enabled so that compatible clients can negotiate
    /// HTTP/2 with the server transparently via Hyper. Disabling HTTP/2 forces
    /// all connections to use HTTP/1.1 only.
    ///
    /// This setting only affects the underlying protocol negotiation; your
    /// route handlers, middleware, and response APIs remain unchanged.
    ///
    /// # Arguments
    ///
    /// * `enabled` - Set to `true` to enable HTTP/2, or `false` to disable it.
    ///
    /// # Examples
    ///
    /// ```
    /// use routen::app::App;
    ///
    /// let mut app = App::new();
    ///
    /// // Disable HTTP/2 and serve only HTTP/1.1
    /// app.enable_http2(false);
    /// ```
    pub fn enable_http2(&mut self, enabled: bool) -> &mut Self {
        self.http2 = enabled;
        self
    }

    /// Applies advanced HTTP/2 configuration for the application.
    ///
    /// This method allows fine-tuning of HTTP/2 behavior such as maximum
    /// concurrent streams, flow-control windows, and keep-alive settings.
    /// All fields in [`Http2Config`] are optional; any `None` values will
    /// cause Hyper's defaults to be used for that setting.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    /// use routen::app::{App, Http2Config};
    ///
    /// let mut app = App::new();
    ///
    /// app.enable_http2(true)
    ///     .http2_config(Http2Config {
    ///         http2_only: false,
    ///         max_concurrent_streams: Some(100),
    ///         keep_alive_interval: Some(Duration::from_secs(30)),
    ///         keep_alive_timeout: Some(Duration::from_secs(10)),
    ///         ..Default::default()
    ///     });
    /// ```
    pub fn http2_config(&mut self, config: Http2Config) -> &mut Self {
        self.http2_config = Some(config);
        self
    }

    /// Enables graceful shutdown for the application.
    ///
    /// When graceful shutdown is enabled, the server will listen for a shutdown signal
    /// (such as Ctrl+C) and attempt to shut down cleanly, finishing any in-flight requests
    /// before exiting. This is useful for production environments where you want to avoid
    /// abruptly terminating active connections.
    ///
    /// ## Example
    ///
    /// ```
    /// use routen::app::App;
    ///
    /// let mut app = App::new();
    /// app.with_graceful_shutdown();
    /// ```
    pub fn with_graceful_shutdown(&mut self) {
        self.graceful_shutdown = true
    }

    /// Enables or disables the engine's default `OPTIONS` handler.
    ///
    /// When enabled (the default), a request for `OPTIONS` on a path registered for at
    /// least one other method, but with no explicit `OPTIONS` handler, gets a `204` reply
    /// with an `Allow` header listing the registered methods, without running any
    /// middleware. Disabling this turns that case into a `405 Method Not Allowed`.
    ///
    /// ```
    /// use routen::app::App;
    ///
    /// let mut app = App::new();
    /// app.default_options(false);
    /// ```
    pub fn default_options(&mut self, enabled: bool) -> &mut Self {
        self.default_options_enabled = enabled;
        self
    }

    /// Registers a listener invoked for every [`crate::scope::RequestEvent`] emitted during
    /// dispatch (request started/finished, before/after routing, route matched/not found,
    /// routing errors). Useful for logging or metrics middleware that wants lifecycle hooks
    /// rather than just pre/post middleware.
    ///
    /// ```
    /// use routen::app::App;
    ///
    /// let mut app = App::new();
    /// app.on_event(|event| println!("{:?}", event));
    /// ```
    pub fn on_event<F>(&mut self, listener: F) -> &mut Self
    where
        F: Fn(&crate::scope::RequestEvent) + Send + Sync + 'static,
    {
        self.event_listener = Some(std::sync::Arc::new(listener));
        self
    }

    /// Mounts a [`Router`] at a specific base path, registering all of its routes onto the application.
    ///
    /// This method allows you to modularly organize and group routes using separate routers,
    /// then attach them to your application. Each route registered with the router will be
    /// prefixed by the router's base path. This is useful for API versioning, feature groupings,
    /// or splitting logic into modules. The router's routes are incorporated into the main
    /// application's route table, and will take precedence over static file handlers.
    ///
    /// # Example
    /// ```
    /// use routen::{app::App, router::Router};
    /// use routen::{req::HttpRequest, res::HttpResponse};
    /// use routen::types::RouterFns;
    ///
    /// async fn v1_status(_req: HttpRequest, res: HttpResponse) -> HttpResponse {
    ///     res.ok().json(serde_json::json!({"status": "ok"}))
    /// }
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let mut api_router = Router::new("/api/v1");
    ///     api_router.get("/status", v1_status);
    ///     
    ///     let mut app = App::new();
    ///     app.router(api_router);
    /// }
    /// ```
    ///
    /// # Arguments
    ///
    /// * `router` - The [`Router`] instance whose routes will be registered onto this application.
    ///
    /// # Panics
    ///
    /// This method does not panic.
    pub fn router(&mut self, mut router: Router) {
        let base_path = router.base_path.clone();
        for route in router.routes().drain(..) {
            let full_path = if route.path == "/" {
                base_path.clone()
            } else {
                format!("{}{}", base_path, route.path)
            };

            let middlewares = route
                .middlewares
                .read()
                .unwrap_or_else(|e| e.into_inner())
                .clone();

            self.routes.push(Arc::new(RouteBuilder {
                path: full_path,
                method: route.method.clone(),
                handler: Arc::clone(&route.handler),
                middlewares: std::sync::RwLock::new(middlewares),
            }));
        }
    }

    /// Configures static file serving for the application.
    ///
    /// This method allows you to serve static assets (HTML, CSS, JavaScript, images, etc.)
    /// from the filesystem. Files are served with appropriate MIME types, caching headers,
    /// and ETag support for efficient client-side caching.
    ///
    /// ## Arguments
    ///
    /// * `path` - The URL path where static files should be mounted (e.g., "/public", "/static", "/")
    /// * `file` - The filesystem directory path containing the static files (e.g., "./public", "./dist")
    ///
    /// ## Returns
    ///
    /// * `Ok(())` - If the static file configuration was successful
    /// * `Err(&'static str)` - If there was a validation error with the provided paths
    ///
    /// ## Errors
    ///
    /// This method returns an error in the following cases:
    /// - `file` parameter is "/" (serving from filesystem root is blocked for security)
    /// - `path` parameter is empty
    /// - `file` parameter is empty
    /// - `path` parameter doesn't start with "/"
    ///
    /// ## Example
    ///
    /// ```
    /// use routen::app::App;
    ///
    /// let mut app = App::new();
    ///
    /// // Serve files from ./public directory at /public URL path
    /// app.static_files("/public", "./public").unwrap();
    ///
    /// // Serve CSS and JS assets
    /// app.static_files("/assets", "./dist/assets").unwrap();
    ///
    /// // Serve a Single Page Application (SPA) from root
    /// // API routes take precedence, static files serve as fallback
    /// app.static_files("/", "./dist").unwrap();
    ///
    /// // Multiple static directories
    /// app.static_files("/images", "./uploads/images").unwrap();
    /// app.static_files("/docs", "./documentation").unwrap();
    /// ```
    ///
    /// ## Behavior
    ///
    /// - **Route Precedence**: API routes defined with `get()`, `post()`, etc. take precedence over static files
    /// - **Fallback Serving**: When mounted at "/", static files serve as fallback for unmatched routes
    /// - **MIME Types**: Automatically sets appropriate `Content-Type` headers based on file extensions
    /// - **Caching**: Includes `Cache-Control` and `ETag` headers for efficient browser caching
    /// - **Security**: Prevents directory traversal attacks and blocks serving from filesystem root
    ///
    /// ## File System Layout Example
    ///
    /// ```text
    /// project/
    /// ├── src/main.rs
    /// ├── public/           <- app.static_files("/public", "./public")
    /// │   ├── index.html    <- Accessible at /public/index.html
    /// │   ├── style.css     <- Accessible at /public/style.css
    /// │   └── script.js     <- Accessible at /public/script.js
    /// └── dist/             <- app.static_files("/", "./dist")
    ///     ├── index.html    <- Accessible at / (fallback)
    ///     └── favicon.ico   <- Accessible at /favicon.ico
    /// ```
    ///
    /// ## Security Considerations
    ///
    /// - Never use "/" as the `file` parameter - this is blocked for security reasons
    /// - Use specific directories like "./public" or "./assets"
    /// - The static file server prevents directory traversal (../) attacks automatically
    /// - Consider using a reverse proxy like nginx for serving static files in production
    pub fn static_files(
        &mut self,
        path: &'static str,
        file: &'static str,
    ) -> Result<(), &'static str> {
        // Validate inputs
        if file == "/" {
            return Err("Serving from filesystem root '/' is not allowed for security reasons");
        }
        if path.is_empty() {
            return Err("Mount path cannot be empty");
        }
        if file.is_empty() {
            return Err("File path cannot be empty");
        }
        // Require paths to start with '/'
        if !path.starts_with('/') {
            return Err("Mount path must start with '/'");
        }
        self.static_files.insert(path, file);
        Ok(())
    }

    /// Starts the HTTP server and begins listening for incoming requests.
    ///
    /// This method builds the complete router with all configured routes, middleware,
    /// and static file handlers, then starts the HTTP server on the specified port.
    /// The server runs indefinitely until the process is terminated.
    ///
    /// ## Arguments
    ///
    /// * `port` - The port number to listen on (e.g., 3000, 8080)
    /// * `cb` - A callback function that's executed once the server is ready to accept connections
    ///
    /// ## Example
    ///
    /// ```no_run
    /// use routen::app::App;
    /// use routen::types::RouterFns;
    /// use routen::req::HttpRequest;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let mut app = App::new();
    ///
    ///     app.get("/", |_req: HttpRequest, res| async move {
    ///         res.ok().text("Hello, World!")
    ///     });
    ///
    ///     app.get("/health", |_req: HttpRequest, res| async move {
    ///         res.ok().json(serde_json::json!({"status": "healthy"}))
    ///     });
    ///
    ///     // Start server with startup message
    ///     app.listen(3000, || {
    ///         println!("🚀 Server running on http://localhost:3000");
    ///         println!("📊 Health check: http://localhost:3000/health");
    ///     }).await;
    /// }
    /// ```
    ///
    /// ## Server Initialization Order
    ///
    /// 1. **WebSocket Middleware**: Applied first (if `wynd` feature is enabled)
    /// 2. **Application Middleware**: Applied in registration order
    ///    - Pre-middleware (before route handlers)
    ///    - Post-middleware (after route handlers)
    /// 3. **API Routes**: Registered with exact path matching
    /// 4. **Static File Routes**: Registered as fallback handlers
    /// 5. **Error Handler**: Global error handling for the application
    ///
    /// ## Network Configuration
    ///
    /// - **Bind Address**: By default, binds to `0.0.0.0:port` (all interfaces); configurable via [`App::host`]
    /// - **Protocols**: HTTP/1.1 and HTTP/2 by default; HTTP/2 can be disabled via [`App::enable_http2`]
    /// - **Concurrent Connections**: Handled asynchronously with Tokio
    ///
    /// ## Error Handling
    ///
    /// If the server fails to start (e.g., port already in use), the error is printed
    /// to stderr and the process continues. You may want to handle this more gracefully:
    ///
    /// ```no_run
    /// # use routen::app::App;
    /// # #[tokio::main]
    /// # async fn main() {
    /// # let app = App::new();
    /// // The server will print errors but won't panic
    /// app.listen(3000, || println!("Server starting...")).await;
    /// // This line is reached if server fails to start
    /// eprintln!("Server failed to start or has shut down");
    /// # }
    /// ```
    ///
    /// ## Production Considerations
    ///
    /// - Consider using environment variables for port configuration
    /// - Implement graceful shutdown handling
    /// - Use a process manager like systemd or PM2
    /// - Configure reverse proxy (nginx, Apache) for production
    /// - Enable logging middleware to monitor requests
    pub async fn listen<F: FnOnce()>(&self, port: u16, cb: F) {
        let route_table = RouteTable::build(&self.routes);

        let dispatcher = Arc::new(Dispatcher {
            route_table,
            middlewares: self.middlewares.clone(),
            static_files: self.static_files.clone(),
            default_options_enabled: self.default_options_enabled,
            event_listener: self.event_listener.clone(),
            #[cfg(feature = "with-wynd")]
            wynd_middleware: self.wynd_middleware.clone().map(Arc::new),
        });

        let addr = format!("{}:{}", self.host, port)
            .parse::<SocketAddr>()
            .unwrap();

        let listener = TcpListener::bind(addr).await;

        if let Err(e) = listener {
            eprintln!("Error binding to address {}: {}", addr, e);
            return;
        }

        let listener = listener.unwrap();

        let http2_enabled = self.http2;
        let http2_config = self.http2_config.clone();

        let shutdown = if self.graceful_shutdown {
            let controller = Arc::new(ShutdownController::new(Duration::from_secs(30)));
            controller.spawn_signal_listener();
            Some(controller)
        } else {
            None
        };

        cb();

        loop {
            let accept_result = if let Some(ref controller) = shutdown {
                tokio::select! {
                    result = listener.accept() => Some(result),
                    _ = controller.triggered() => None,
                }
            } else {
                Some(listener.accept().await)
            };

            match accept_result {
                Some(Ok((stream, _))) => {
                    let dispatcher = Arc::clone(&dispatcher);
                    let http2_config = http2_config.clone();
                    let guard = shutdown.as_ref().map(|c| c.active_guard());

                    tokio::task::spawn(async move {
                        let _guard = guard;
                        Self::handle_connection(stream, dispatcher, http2_enabled, http2_config)
                            .await;
                    });
                }
                Some(Err(e)) => {
                    eprintln!("Error accepting connection: {}", e);
                }
                None => {
                    // Shutdown signal received: stop accepting and let in-flight requests
                    // finish within the grace period before returning.
                    if let Some(controller) = shutdown {
                        controller.wait_for_drain().await;
                    }
                    break;
                }
            }
        }
    }

    /// Internal method for serving static files with proper headers and caching support.
    ///
    /// This method handles the complex logic of serving static files, including:
    /// - URL path rewriting to map mount points to filesystem paths
    /// - ETag-based conditional requests (304 Not Modified responses)
    /// - Proper caching headers
    /// - Error handling for missing files
    ///
    /// ## Arguments
    ///
    /// * `req` - The incoming HTTP request
    /// * `mount_root` - The URL path where static files are mounted
    /// * `fs_root` - The filesystem directory containing the static files
    ///
    /// ## Returns
    ///
    /// * `Ok(Response<Body>)` - Successfully served file or 304 Not Modified
    /// * `Err(std::io::Error)` - File not found or other I/O error
    pub(crate) async fn serve_static_with_headers<B>(
        req: Request<B>,
        mount_root: String,
        fs_root: String,
    ) -> Result<Response<Full<hyper::body::Bytes>>, std::io::Error>
    where
        B: hyper::body::Body<Data = hyper::body::Bytes> + Send + 'static,
        B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        // Rewrite the request URI by stripping the mount_root prefix so that
        // "/static/index.html" maps to "fs_root/index.html" rather than
        // "fs_root/static/index.html".
        let (mut parts, body) = req.into_parts();
        let original_uri = parts.uri.clone();
        let original_path = original_uri.path();
        let if_none_match = parts
            .headers
            .get(header::IF_NONE_MATCH)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let trimmed_path = if mount_root == "/" {
            // If mounting at root, serve the path as-is
            original_path
        } else if original_path.starts_with(&mount_root) {
            // Strip the mount root prefix, but ensure we don't create an empty path
            let remaining = &original_path[mount_root.len()..];
            if remaining.is_empty() {
                "/"
            } else {
                remaining
            }
        } else {
            // Path doesn't match mount root - this shouldn't happen in normal routing
            original_path
        };

        let normalized_path = if trimmed_path.is_empty() {
            "/"
        } else {
            trimmed_path
        };

        let new_path_and_query = if let Some(query) = original_uri.query() {
            format!("{}?{}", normalized_path, query)
        } else {
            normalized_path.to_string()
        };

        parts.uri = match new_path_and_query.parse() {
            Ok(uri) => uri,
            Err(e) => {
                eprintln!(
                    "Error parsing URI: {} (original: {}, mount_root: {}, trimmed: {}, normalized: {})",
                    e, original_path, mount_root, trimmed_path, normalized_path
                );
                return Err(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("Invalid URI after rewriting: {}", e),
                ));
            }
        };

        let rewritten_req = Request::from_parts(parts, body);

        let static_service = Static::new(Path::new(fs_root.as_str()));

        match static_service.serve(rewritten_req).await {
            Ok(mut response) => {
                response
                    .headers_mut()
                    .insert("Cache-Control", "public, max-age=86400".parse().unwrap());
                response
                    .headers_mut()
                    .insert("X-Served-By", "hyper-staticfile".parse().unwrap());
                // Handle conditional request with If-None-Match since hyper-staticfile 0.9
                // does not evaluate it. If ETag matches, return 304 with empty body.
                if let Some(if_none_match_value) = if_none_match {
                    if let Some(etag) = response.headers().get(header::ETAG) {
                        if let Ok(etag_value) = etag.to_str() {
                            if if_none_match_value == etag_value {
                                let mut builder =
                                    Response::builder().status(StatusCode::NOT_MODIFIED);
                                if let Some(h) = builder.headers_mut() {
                                    // carry forward ETag, Cache-Control, Last-Modified, etc.
                                    for (k, v) in response.headers().iter() {
                                        h.insert(k.clone(), v.clone());
                                    }
                                    h.remove(header::CONTENT_LENGTH);
                                }
                                return Ok(builder.body(Full::from(Bytes::new())).unwrap());
                            }
                        }
                    }
                }
                // Convert hyper_staticfile::Body to Full<Bytes>
                let (parts, body) = response.into_parts();
                let collected = body.collect().await.map_err(|e| {
                    std::io::Error::new(
                        std::io::ErrorKind::Other,
                        format!("Failed to collect body: {}", e),
                    )
                })?;
                let body_bytes = collected.to_bytes();
                let full_body = Full::from(body_bytes);
                Ok(Response::from_parts(parts, full_body))
            }
            Err(e) => Err(e),
        }
    }

}

/// The compiled, per-connection dispatch target: a frozen route table, the middleware chain,
/// and the static file mounts, built once in [`App::listen`] and shared (via `Arc`) across
/// every accepted connection.
pub(crate) struct Dispatcher {
    route_table: RouteTable,
    middlewares: Vec<Arc<Middleware>>,
    static_files: HashMap<&'static str, &'static str>,
    default_options_enabled: bool,
    event_listener: Option<crate::scope::EventListener>,
    #[cfg(feature = "with-wynd")]
    wynd_middleware: Option<Arc<crate::middlewares::WyndMiddleware>>,
}

impl Dispatcher {
    /// Runs one request through the wynd hook (if any), the pre-middleware chain, routing,
    /// the matched handler (or a 404/405/static-file fallback), and the post-middleware chain.
    pub(crate) async fn dispatch(
        &self,
        req: Request<hyper::body::Incoming>,
    ) -> Response<Full<Bytes>> {
        let listener = self.event_listener.as_ref();
        let mut ctx = crate::scope::EngineContext::new();

        let mut req = match Self::collect_body(req).await {
            Ok(req) => req,
            Err(e) => {
                ctx.emit(
                    crate::scope::RequestEvent::RoutingError {
                        message: e.to_string(),
                    },
                    listener,
                );
                return HttpResponse::new()
                    .bad_request()
                    .text(e.to_string())
                    .to_hyper_response()
                    .await
                    .unwrap();
            }
        };

        self.dispatch_collected(req, &mut ctx, listener).await
    }

    /// The body of [`Self::dispatch`] once the request body has been collected into memory.
    /// Split out so tests can drive it with a hand-built body, bypassing the `Incoming` stream.
    async fn dispatch_collected(
        &self,
        mut req: Request<Full<Bytes>>,
        ctx: &mut crate::scope::EngineContext,
        listener: Option<&crate::scope::EventListener>,
    ) -> Response<Full<Bytes>> {
        ctx.emit(
            crate::scope::RequestEvent::RequestStarted {
                method: HttpMethods::from(req.method()),
                path: req.uri().path().to_string(),
            },
            listener,
        );

        #[cfg(feature = "with-wynd")]
        if let Some(wynd) = &self.wynd_middleware {
            use crate::helpers::exec_wynd_middleware;
            match exec_wynd_middleware(req, Arc::clone(wynd)).await {
                Ok(next) => req = next,
                Err(ApiError::WebSocketUpgrade(res)) => return res,
                Err(ApiError::Generic(res)) => return res.to_hyper_response().await.unwrap(),
            }
        }

        for middleware in self
            .middlewares
            .iter()
            .filter(|m| m.middleware_type != MiddlewareType::Post)
        {
            match exec_pre_middleware(req, Arc::clone(middleware)).await {
                Ok(next) => req = next,
                Err(ApiError::Generic(res)) => return res.to_hyper_response().await.unwrap(),
                Err(ApiError::WebSocketUpgrade(res)) => return res,
            }
        }

        let method = HttpMethods::from(req.method());
        let path = req.uri().path().to_string();

        ctx.emit(crate::scope::RequestEvent::BeforeRouting, listener);

        let (our_req, response) = match self.route_table.match_route(&method, &path) {
            MatchOutcome::Matched(route, params) => {
                ctx.set_route(Arc::clone(&route));
                ctx.emit(
                    crate::scope::RequestEvent::RouteMatched {
                        path: route.path.clone(),
                    },
                    listener,
                );
                let mut our_req = match HttpRequest::from_hyper_request(&mut req).await {
                    Ok(r) => r,
                    Err(e) => {
                        ctx.emit(
                            crate::scope::RequestEvent::RoutingError {
                                message: e.to_string(),
                            },
                            listener,
                        );
                        return HttpResponse::new()
                            .bad_request()
                            .text(e.to_string())
                            .to_hyper_response()
                            .await
                            .unwrap();
                    }
                };
                for (key, value) in params.iter() {
                    our_req.set_param(key, value);
                }

                let route_middlewares = route
                    .middlewares
                    .read()
                    .unwrap_or_else(|e| e.into_inner())
                    .clone();

                let mut short_circuit = None;
                for middleware in route_middlewares.iter() {
                    let (next_req, maybe_res) =
                        (middleware.func)(our_req, HttpResponse::new()).await;
                    our_req = next_req;
                    if let Some(res) = maybe_res {
                        short_circuit = Some(res);
                        break;
                    }
                }

                let response = match short_circuit {
                    Some(res) => res,
                    None => (route.handler)(our_req.clone(), HttpResponse::new()).await,
                };
                (Some(our_req), response)
            }
            MatchOutcome::MethodNotAllowed(allowed) => {
                let allow = allowed
                    .iter()
                    .map(|m| m.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");

                if method == HttpMethods::OPTIONS && self.default_options_enabled {
                    ctx.emit(crate::scope::RequestEvent::AfterRouting, listener);
                    ctx.emit(crate::scope::RequestEvent::RequestFinished, listener);
                    let response = HttpResponse::new()
                        .status(204)
                        .set_header("Allow", allow)
                        .text("");
                    return response.to_hyper_response().await.unwrap();
                }

                let our_req = HttpRequest::from_hyper_request(&mut req).await.ok();
                let accept = our_req
                    .as_ref()
                    .and_then(|r| r.headers.get("accept"))
                    .unwrap_or("")
                    .to_string();
                let xhr = our_req.as_ref().map(|r| r.xhr).unwrap_or(false);
                let response =
                    negotiated_error_response(405, "Method Not Allowed", &accept, xhr)
                        .set_header("Allow", allow);
                (our_req, response)
            }
            MatchOutcome::NotFound => {
                let accept = req
                    .headers()
                    .get("accept")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("")
                    .to_string();
                let xhr = req
                    .headers()
                    .get("x-requested-with")
                    .and_then(|v| v.to_str().ok())
                    .map(|v| v.eq_ignore_ascii_case("XMLHttpRequest"))
                    .unwrap_or(false);

                if let Some(res) = self.try_static(req).await {
                    ctx.emit(crate::scope::RequestEvent::AfterRouting, listener);
                    ctx.emit(crate::scope::RequestEvent::RequestFinished, listener);
                    return res;
                }
                ctx.emit(crate::scope::RequestEvent::RouteNotFound, listener);
                let response = negotiated_error_response(404, "Not Found", &accept, xhr);
                (None, response)
            }
        };

        ctx.emit(crate::scope::RequestEvent::AfterRouting, listener);

        let mut hyper_response = response.to_hyper_response().await.unwrap();

        if let Some(our_req) = our_req {
            for middleware in self
                .middlewares
                .iter()
                .filter(|m| m.middleware_type == MiddlewareType::Post)
            {
                match exec_post_middleware(
                    hyper_response,
                    Arc::clone(middleware),
                    our_req.clone(),
                )
                .await
                {
                    Ok(next) => hyper_response = next,
                    Err(ApiError::Generic(res)) => {
                        return res.to_hyper_response().await.unwrap();
                    }
                    Err(ApiError::WebSocketUpgrade(res)) => return res,
                }
            }
        }

        ctx.emit(crate::scope::RequestEvent::RequestFinished, listener);

        hyper_response
    }

    /// Attempts to serve the request from one of the static file mounts; `None` if no mount
    /// matches the request path, signalling the caller should fall through to a plain 404.
    async fn try_static(&self, req: Request<Full<Bytes>>) -> Option<Response<Full<Bytes>>> {
        let path = req.uri().path().to_string();

        for (mount_path, serve_from) in self.static_files.iter() {
            if path_matches(mount_path, &path) {
                return match App::serve_static_with_headers(
                    req,
                    (*mount_path).to_string(),
                    (*serve_from).to_string(),
                )
                .await
                {
                    Ok(res) => Some(res),
                    Err(e) => Some(
                        HttpResponse::new()
                            .internal_server_error()
                            .text(e.to_string())
                            .to_hyper_response()
                            .await
                            .unwrap(),
                    ),
                };
            }
        }

        None
    }

    async fn collect_body(
        req: Request<hyper::body::Incoming>,
    ) -> Result<Request<Full<Bytes>>, hyper::Error> {
        let (parts, body) = req.into_parts();
        let bytes = body.collect().await?.to_bytes();
        Ok(Request::from_parts(parts, Full::from(bytes)))
    }
}
