//! Per-request engine context.
//!
//! [`EngineContext`] is the scope a dispatch carries from the moment a connection is
//! accepted to the moment its response is written: the matched route (or `None` for a 404),
//! the captured path parameters, and a string-keyed bag middleware can use to hand data
//! downstream to the handler (or to a later middleware in the chain). It also carries the
//! lifecycle events a dispatch emits, for logging or metrics middleware to observe.

use crate::types::{HttpMethods, RouteBuilder};
use std::collections::HashMap;
use std::sync::Arc;

/// A lifecycle event emitted once per request, in dispatch order.
#[derive(Debug, Clone)]
pub enum RequestEvent {
    /// The request has been accepted and adapted from the transport layer.
    RequestStarted {
        /// The request method.
        method: HttpMethods,
        /// The request path, before normalization.
        path: String,
    },
    /// About to consult the route table.
    BeforeRouting,
    /// A route matched.
    RouteMatched {
        /// The normalized pattern of the matched route.
        path: String,
    },
    /// No route matched the request.
    RouteNotFound,
    /// The middleware chain and handler have both run.
    AfterRouting,
    /// The response has been fully written.
    RequestFinished,
    /// Routing or dispatch failed with an error before a response could be produced normally.
    RoutingError {
        /// A human-readable description of the failure.
        message: String,
    },
}

/// A subscriber invoked for every [`RequestEvent`] a dispatch emits.
pub type EventListener = Arc<dyn Fn(&RequestEvent) + Send + Sync>;

/// The per-request scope threaded through routing, middleware, and the handler.
///
/// Built once per dispatch by the router/dispatcher; not constructible outside the crate.
pub struct EngineContext {
    route: Option<Arc<RouteBuilder>>,
    data: HashMap<String, String>,
    events: Vec<RequestEvent>,
}

impl EngineContext {
    pub(crate) fn new() -> Self {
        EngineContext {
            route: None,
            data: HashMap::new(),
            events: Vec::new(),
        }
    }

    /// Binds the matched route once the route table has resolved one. Left unset (`None`)
    /// when a request doesn't match any registered route.
    pub(crate) fn set_route(&mut self, route: Arc<RouteBuilder>) {
        self.route = Some(route);
    }

    /// The matched route for this request, or `None` if routing resulted in a 404/405.
    pub fn route(&self) -> Option<&RouteBuilder> {
        self.route.as_deref()
    }

    /// Stashes a value under `key`, for a later middleware or the handler to read back.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.data.insert(key.into(), value.into());
    }

    /// Reads a value previously stashed with [`Self::set`].
    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(|s| s.as_str())
    }

    /// Records a lifecycle event and, if a listener is bound on the owning app, notifies it.
    pub(crate) fn emit(&mut self, event: RequestEvent, listener: Option<&EventListener>) {
        if let Some(listener) = listener {
            listener(&event);
        }
        self.events.push(event);
    }

    /// Every event recorded so far, in emission order.
    pub fn events(&self) -> &[RequestEvent] {
        &self.events
    }
}
