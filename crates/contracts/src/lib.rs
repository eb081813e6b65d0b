//! HTTP contracts of the admin REST API.
//!
//! These are data shapes only: the server implementing them lives elsewhere.
//! Every contract is a module with a `Request` (body + query), an optional
//! `Params` (path parameters) and a `Response` (data, optional meta, optional
//! error). [`ROUTES`] lists the method and path of each contract.

pub mod error;
pub mod review_workflows;
pub mod webhooks;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use error::{ApplicationError, ContractError, ValidationError, ValidationIssue};

/// An empty JSON object (`{}`), used for bodies and queries that carry
/// nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Empty {}

/// A request: body plus query string parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Request<B = Empty, Q = Empty> {
    pub body: B,
    #[serde(default)]
    pub query: Q,
}

impl<B> Request<B> {
    pub fn with_body(body: B) -> Self {
        Self {
            body,
            query: Empty::default(),
        }
    }
}

/// `:id` path parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdParams<I = String> {
    pub id: I,
}

/// A response: data, optional meta and optional error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "D: Deserialize<'de>, M: Deserialize<'de>, E: Deserialize<'de>"))]
pub struct Response<D, M = Empty, E = ApplicationError> {
    pub data: D,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<M>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<E>,
}

impl<D, M, E> Response<D, M, E> {
    pub fn ok(data: D) -> Self {
        Self {
            data,
            meta: None,
            error: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// HTTP method of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        })
    }
}

/// Where a contract is served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub method: Method,
    /// Path template; `:name` segments are parameters.
    pub path: &'static str,
    /// Contract module path, e.g. `webhooks::get_webhook`.
    pub name: &'static str,
}

impl Route {
    pub const fn new(method: Method, path: &'static str, name: &'static str) -> Self {
        Self { method, path, name }
    }

    /// Fill in `:name` segments. Unknown parameters are left as-is.
    pub fn resolve(&self, params: &[(&str, &str)]) -> String {
        self.path
            .split('/')
            .map(|segment| {
                segment
                    .strip_prefix(':')
                    .and_then(|name| params.iter().find(|(key, _)| *key == name))
                    .map_or(segment, |(_, value)| *value)
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Every contract route.
pub const ROUTES: &[Route] = &[
    Route::new(Method::Get, "/webhooks", "webhooks::get_webhooks"),
    Route::new(Method::Get, "/webhooks/:id", "webhooks::get_webhook"),
    Route::new(Method::Post, "/webhooks", "webhooks::create_webhook"),
    Route::new(Method::Put, "/webhooks/:id", "webhooks::update_webhook"),
    Route::new(Method::Delete, "/webhooks/:id", "webhooks::delete_webhook"),
    Route::new(Method::Post, "/webhooks/batch-delete", "webhooks::delete_webhooks"),
    Route::new(Method::Post, "/webhooks/:id/trigger", "webhooks::trigger_webhook"),
    Route::new(Method::Get, "/review-workflows/workflows", "review_workflows::get_all"),
    Route::new(Method::Get, "/review-workflows/workflows/:id", "review_workflows::get"),
    Route::new(Method::Put, "/review-workflows/workflows/:id", "review_workflows::update"),
    Route::new(Method::Post, "/review-workflows/workflows", "review_workflows::create"),
    Route::new(Method::Delete, "/review-workflows/workflows/:id", "review_workflows::delete"),
];

/// Find the route of a contract by name.
pub fn route(name: &str) -> Option<&'static Route> {
    ROUTES.iter().find(|route| route.name == name)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn routes_are_unique() {
        let mut seen = HashSet::new();
        for route in ROUTES {
            assert!(seen.insert((route.method, route.path)), "{} {}", route.method, route.path);
        }
    }

    #[test]
    fn resolve_fills_parameters() {
        let route = route("webhooks::trigger_webhook").unwrap();
        assert_eq!(route.resolve(&[("id", "42")]), "/webhooks/42/trigger");
        assert_eq!(route.resolve(&[]), "/webhooks/:id/trigger");
    }

    #[test]
    fn empty_serializes_as_object() {
        let request: Request = Request::default();
        assert_eq!(
            serde_json::to_value(request).unwrap(),
            serde_json::json!({ "body": {}, "query": {} })
        );
    }

    #[test]
    fn response_omits_absent_meta_and_error() {
        let response: Response<u32> = Response::ok(1);
        assert_eq!(
            serde_json::to_value(response).unwrap(),
            serde_json::json!({ "data": 1 })
        );
    }
}
